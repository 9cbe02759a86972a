//! Sentiment scoring.
//!
//! Joins normalized documents against a polarity lexicon and aggregates
//! asymmetric weighted counts per author.

mod lexicon;
mod scorer;

pub use lexicon::PolarityLexicon;
pub use scorer::{ScoreError, SentimentScorer};
