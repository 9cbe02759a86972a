//! Text preprocessing.
//!
//! Provides corpus normalization, lemmatization, and the frequency/matrix
//! structures consumed by the sentiment and topic stages.

pub mod lemmatizer;
pub mod normalizer;
pub mod vectorizer;
