//! Corpus normalization.
//!
//! Converts raw review text into canonical token streams through a fixed
//! pipeline: lowercase, strip digits, strip punctuation, remove stopwords,
//! collapse whitespace, lemmatize. Stopword matching runs on lowercased,
//! de-punctuated text so the set matches reliably.

use std::collections::HashSet;
use std::sync::LazyLock;

use rayon::prelude::*;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::models::types::{Document, Record};
use crate::preprocessing::lemmatizer::Lemmatizer;

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());
static NON_ALPHA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z\s]+").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Corpus normalizer with a combined stopword set.
///
/// The set is the union of a standard English list and caller-supplied
/// domain noise terms (category self-references, filler the product corpus
/// repeats without carrying sentiment or topic signal).
#[derive(Debug, Clone)]
pub struct Normalizer {
    stop_words: HashSet<String>,
    lemmatizer: Lemmatizer,
}

impl Normalizer {
    /// Normalizer with the standard English stopword set only.
    pub fn new() -> Self {
        Self {
            stop_words: default_stop_words(),
            lemmatizer: Lemmatizer::new(),
        }
    }

    /// Normalizer preconfigured for product-review corpora.
    pub fn for_product_reviews() -> Self {
        Self::new().with_domain_terms([
            "product", "item", "review", "star", "stars", "purchase", "order",
            "amazon", "seller", "price", "money", "time", "day", "week",
            "month", "year",
        ])
    }

    /// Add domain-specific noise terms to the stopword set.
    pub fn with_domain_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for term in terms {
            self.stop_words.insert(term.as_ref().to_lowercase());
        }
        self
    }

    pub fn is_stop_word(&self, term: &str) -> bool {
        self.stop_words.contains(term)
    }

    /// Snapshot 1: lowercased word split with no further processing.
    pub fn raw_tokens(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .unicode_words()
            .map(|w| w.to_string())
            .collect()
    }

    /// Steps 1-5 of the pipeline as a single cleaned string.
    fn clean(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let no_digits = DIGITS.replace_all(&lowered, "");
        let alpha = NON_ALPHA.replace_all(&no_digits, "");
        WHITESPACE.replace_all(alpha.trim(), " ").into_owned()
    }

    /// Snapshot 2: cleaned tokens with stopwords removed, not yet lemmatized.
    pub fn clean_tokens(&self, text: &str) -> Vec<String> {
        self.clean(text)
            .unicode_words()
            .filter(|w| !self.stop_words.contains(*w))
            .map(|w| w.to_string())
            .collect()
    }

    /// Snapshot 3, the canonical form: cleaned, stopword-free, lemmatized.
    ///
    /// Lemmas that collapse into the stopword set are dropped as well, which
    /// keeps the no-stopword invariant and makes normalization idempotent.
    pub fn normalize_text(&self, text: &str) -> Vec<String> {
        self.clean_tokens(text)
            .iter()
            .map(|t| self.lemmatizer.lemma(t))
            .filter(|t| !self.stop_words.contains(t))
            .collect()
    }

    /// Normalize every record into a parallel sequence of documents.
    ///
    /// Documents come back in record order; missing text yields an empty
    /// document, tagged for downstream pruning rather than rejected.
    pub fn normalize_records(&self, records: &[Record]) -> Vec<Document> {
        records
            .par_iter()
            .enumerate()
            .map(|(idx, record)| Document::new(idx, self.normalize_text(record.text())))
            .collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Standard English stopword set.
fn default_stop_words() -> HashSet<String> {
    let words = [
        // Articles
        "a", "an", "the",
        // Pronouns and possessives
        "i", "me", "my", "myself", "we", "us", "our", "ours", "ourselves",
        "you", "your", "yours", "yourself", "yourselves", "he", "him", "his",
        "himself", "she", "her", "hers", "herself", "it", "its", "itself",
        "they", "them", "their", "theirs", "themselves", "what", "which",
        "who", "whom", "this", "that", "these", "those",
        // Verbs
        "am", "is", "are", "was", "were", "be", "been", "being", "have",
        "has", "had", "having", "do", "does", "did", "doing", "would",
        "should", "could", "ought", "might", "must", "shall", "will", "can",
        "may", "get", "got",
        // Prepositions
        "at", "by", "for", "from", "in", "into", "of", "on", "to", "with",
        "about", "against", "between", "during", "before", "after", "above",
        "below", "up", "down", "out", "off", "over", "under", "again",
        "further", "then", "once",
        // Conjunctions
        "and", "but", "or", "nor", "so", "yet", "both", "either", "neither",
        "not", "only", "than", "when", "where", "while", "if", "because",
        "as", "until", "although",
        // Other common words
        "here", "there", "all", "each", "few", "more", "most", "other",
        "some", "such", "no", "any", "own", "same", "too", "very", "just",
        "also", "now", "how", "why", "well",
    ];

    words.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_order_and_content() {
        let normalizer = Normalizer::new();
        let tokens = normalizer.normalize_text("The 2 cameras WORKED great!!");

        assert_eq!(tokens, vec!["camera", "work", "great"]);
    }

    #[test]
    fn output_alphabet_is_lowercase_ascii() {
        let normalizer = Normalizer::new();
        let tokens =
            normalizer.normalize_text("Battery lasted 48 hours... 100% satisfied, 5/5!");

        for token in &tokens {
            assert!(
                token.chars().all(|c| c.is_ascii_lowercase()),
                "token {token:?} escaped the pipeline"
            );
            assert!(!normalizer.is_stop_word(token));
        }
    }

    #[test]
    fn empty_and_all_stopword_text_yield_empty_documents() {
        let normalizer = Normalizer::new();
        assert!(normalizer.normalize_text("").is_empty());
        assert!(normalizer.normalize_text("it was the very same").is_empty());
    }

    #[test]
    fn normalization_is_idempotent() {
        let normalizer = Normalizer::new();
        let once = normalizer.normalize_text("The batteries were charging quickly, 10/10");
        let twice = normalizer.normalize_text(&once.join(" "));
        assert_eq!(once, twice);
    }

    #[test]
    fn lemma_collapsing_into_stopword_is_dropped() {
        // "cans" lemmatizes to "can", which is a stopword.
        let normalizer = Normalizer::new();
        assert!(normalizer.normalize_text("cans").is_empty());
    }

    #[test]
    fn domain_terms_extend_the_base_set() {
        let base = Normalizer::new();
        let tuned = Normalizer::new().with_domain_terms(["blender"]);

        assert_eq!(base.normalize_text("great blender"), vec!["great", "blender"]);
        assert_eq!(tuned.normalize_text("great blender"), vec!["great"]);
    }

    #[test]
    fn records_normalize_in_order_with_empty_tagging() {
        let normalizer = Normalizer::new();
        let records = vec![
            Record {
                author: "a1".into(),
                text: Some("Loved the camera".into()),
                rating: 5,
                votes: None,
                verified: true,
            },
            Record {
                author: "a2".into(),
                text: None,
                rating: 3,
                votes: Some(2),
                verified: false,
            },
        ];

        let docs = normalizer.normalize_records(&records);
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].record, 0);
        assert_eq!(docs[0].tokens, vec!["love", "camera"]);
        assert!(docs[1].is_empty());
    }
}
