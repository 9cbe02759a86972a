//! Lexicon-based sentiment scoring with negativity bias.
//!
//! Each document's tokens are joined against the polarity lexicon; matched
//! terms are weighted (negative terms count double by default) and summed
//! per author. The aggregate score is (P - N) / (P + N), undefined when the
//! author produced no lexicon matches at all.

use std::collections::HashMap;

use rayon::prelude::*;
use thiserror::Error;

use crate::models::types::{
    AuthorSentiment, Document, Polarity, Record, RecordSentiment, ScoredWord,
};
use crate::sentiment::lexicon::PolarityLexicon;

/// Errors raised while configuring the scorer.
#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("polarity lexicon is empty; scoring requires at least one entry")]
    EmptyLexicon,
}

/// Sentiment scorer over normalized documents.
#[derive(Debug, Clone)]
pub struct SentimentScorer {
    lexicon: PolarityLexicon,
    negative_weight: f64,
}

impl SentimentScorer {
    /// Create a scorer with the default 2:1 negativity bias.
    ///
    /// An empty lexicon is a configuration error, never silently treated
    /// as all-neutral.
    pub fn new(lexicon: PolarityLexicon) -> Result<Self, ScoreError> {
        if lexicon.is_empty() {
            return Err(ScoreError::EmptyLexicon);
        }
        Ok(Self {
            lexicon,
            negative_weight: 2.0,
        })
    }

    /// Override the negative-term weight multiplier.
    pub fn negative_weight(mut self, weight: f64) -> Self {
        self.negative_weight = weight;
        self
    }

    /// Extract the sentiment evidence of a single document.
    pub fn score_document(&self, document: &Document) -> RecordSentiment {
        let mut matches = Vec::new();
        let mut positive = 0.0;
        let mut negative = 0.0;

        for token in &document.tokens {
            match self.lexicon.polarity(token) {
                Some(Polarity::Positive) => {
                    positive += 1.0;
                    matches.push(ScoredWord {
                        word: token.clone(),
                        weight: 1.0,
                    });
                }
                Some(Polarity::Negative) => {
                    negative += self.negative_weight;
                    matches.push(ScoredWord {
                        word: token.clone(),
                        weight: -self.negative_weight,
                    });
                }
                None => {}
            }
        }

        RecordSentiment {
            record: document.record,
            matches,
            positive,
            negative,
        }
    }

    /// One sentiment entry per distinct author in the corpus.
    ///
    /// `documents` must be the normalized form of `records` (each document's
    /// `record` field indexes into `records`). The per-document pass runs in
    /// parallel; the merge is an associative sum keyed by author, and entries
    /// come back in first-encounter order for reproducible reporting. Authors
    /// whose documents never match the lexicon are reported with no score.
    pub fn score_authors(
        &self,
        records: &[Record],
        documents: &[Document],
    ) -> Vec<AuthorSentiment> {
        let partials: Vec<RecordSentiment> = documents
            .par_iter()
            .map(|doc| self.score_document(doc))
            .collect();

        let mut totals: HashMap<&str, (f64, f64)> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();

        for partial in &partials {
            let author = records[partial.record].author.as_str();
            let entry = totals.entry(author).or_insert_with(|| {
                order.push(author);
                (0.0, 0.0)
            });
            entry.0 += partial.positive;
            entry.1 += partial.negative;
        }

        order
            .into_iter()
            .map(|author| {
                let (positive, negative) = totals[author];
                AuthorSentiment {
                    author: author.to_string(),
                    positive,
                    negative,
                    score: sentiment_score(positive, negative),
                }
            })
            .collect()
    }
}

/// (P - N) / (P + N), or `None` when there is no signal to score.
fn sentiment_score(positive: f64, negative: f64) -> Option<f64> {
    let mass = positive + negative;
    if mass == 0.0 {
        None
    } else {
        Some((positive - negative) / mass)
    }
}
