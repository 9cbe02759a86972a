//! # review_insights
//!
//! Batch analytics for product-review corpora. From a bounded set of review
//! records the pipeline produces a normalized frequency-ranked vocabulary,
//! one negativity-biased sentiment score per author, and a set of latent
//! topics whose count is chosen by an elbow rule over a perplexity curve.
//!
//! ## Modules
//!
//! - `preprocessing` - normalization, lemmatization, vectorization
//! - `sentiment` - lexicon join and per-author scoring
//! - `models` - LDA fitting and topic-count selection
//! - `utils` - diagnostics on the selected model

pub mod models;
pub mod preprocessing;
pub mod sentiment;
pub mod utils;

pub use models::lda::{FittedLda, LdaConfig, LdaError};
pub use models::selection::{
    select_topic_count, RelativeImprovement, SelectionError, SelectionRule, SweepConfig,
    TopicSelection,
};
pub use models::types::{
    AuthorSentiment, CandidateScore, Document, Polarity, Record, RecordSentiment, ScoredWord,
    TopicSummary,
};
pub use preprocessing::normalizer::Normalizer;
pub use preprocessing::vectorizer::{CountVectorizer, DocumentTermMatrix, TermFrequencyTable};
pub use sentiment::{PolarityLexicon, ScoreError, SentimentScorer};
