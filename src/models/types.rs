//! Data types passed between pipeline stages.

use serde::{Deserialize, Serialize};

/// One product review, as supplied by the external loader.
///
/// Records are read-only inputs; every stage derives new values from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Author identifier. Not unique: one author may have several reviews.
    pub author: String,
    /// Review body. Absent or empty text is tolerated.
    #[serde(default)]
    pub text: Option<String>,
    /// Star rating, 1-5.
    pub rating: u8,
    /// Helpfulness vote count, when the platform reports one.
    #[serde(default)]
    pub votes: Option<u32>,
    /// Verified-purchase flag.
    #[serde(default)]
    pub verified: bool,
}

impl Record {
    /// The review body, with missing text treated as empty.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// The normalized token stream of one record.
///
/// Token order is preserved, though downstream aggregations only count.
/// A document may be empty after normalization; empty documents are valid
/// and are pruned before topic fitting, not rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Index of the source record.
    pub record: usize,
    /// Normalized tokens in original order.
    pub tokens: Vec<String>,
}

impl Document {
    pub fn new(record: usize, tokens: Vec<String>) -> Self {
        Self { record, tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Polarity label of a lexicon term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Positive,
    Negative,
}

/// A lexicon term matched in a document, with its signed contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredWord {
    pub word: String,
    /// Positive weight for positive terms, negated weight for negative ones.
    pub weight: f64,
}

/// Sentiment evidence extracted from a single document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSentiment {
    /// Index of the source record.
    pub record: usize,
    /// Lexicon terms that matched, in document order.
    pub matches: Vec<ScoredWord>,
    /// Weighted positive mass contributed by this document.
    pub positive: f64,
    /// Weighted negative mass contributed by this document.
    pub negative: f64,
}

/// Per-author sentiment aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorSentiment {
    pub author: String,
    /// Weighted positive mass P across the author's documents.
    pub positive: f64,
    /// Weighted negative mass N across the author's documents.
    pub negative: f64,
    /// (P - N) / (P + N). `None` when P + N = 0: an author with no lexicon
    /// matches has no signal, which is distinct from a balanced score of 0.
    pub score: Option<f64>,
}

/// One row of the topic-count sweep: a candidate k and its held-out fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub k: usize,
    /// Perplexity of the fit; lower is better.
    pub perplexity: f64,
}

/// Human-labelable summary of one topic from the selected model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicSummary {
    pub topic: usize,
    /// Top terms by probability mass, descending; ties keep vocabulary order.
    pub top_terms: Vec<(String, f64)>,
    /// Share of total token mass assigned to this topic.
    pub prevalence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_tolerates_missing_fields() {
        let record: Record = serde_json::from_str(r#"{"author": "a1", "rating": 4}"#).unwrap();
        assert_eq!(record.text(), "");
        assert_eq!(record.votes, None);
        assert!(!record.verified);
    }

    #[test]
    fn empty_document_is_valid() {
        let doc = Document::new(3, vec![]);
        assert!(doc.is_empty());
        assert_eq!(doc.record, 3);
    }
}
