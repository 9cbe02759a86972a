//! Polarity lexicon for sentiment lookup.
//!
//! Maps terms to a fixed positive/negative label. Terms absent from the
//! lexicon are neutral and contribute nothing to scoring. Entries are kept
//! in lemma form because the scorer joins against normalized documents.

use std::collections::HashMap;

use crate::models::types::Polarity;

/// Built-in positive terms for product-review corpora.
const POSITIVE: &[&str] = &[
    "great", "good", "excellent", "amazing", "awesome", "fantastic",
    "wonderful", "perfect", "love", "best", "nice", "happy", "satisfied",
    "comfortable", "durable", "sturdy", "solid", "smooth", "easy", "fast",
    "beautiful", "gorgeous", "recommend", "impressed", "pleased",
    "delighted", "superb", "outstanding", "brilliant", "reliable", "crisp",
    "bargain", "quality", "favorite", "enjoy", "worth", "accurate",
    "helpful", "quick", "soft", "bright", "handy",
];

/// Built-in negative terms for product-review corpora.
const NEGATIVE: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "poor", "worst", "worse",
    "hate", "disappoint", "broken", "break", "cheap", "flimsy", "defective",
    "useless", "waste", "garbage", "junk", "refund", "slow", "noisy",
    "leak", "crack", "scratch", "fail", "failure", "faulty", "damage",
    "uncomfortable", "annoy", "ugly", "regret", "mislead", "defect",
    "stuck", "dead", "weak", "loose", "rough", "smelly", "shoddy",
    "unusable", "overprice",
];

/// Term -> polarity lookup table.
///
/// `product_reviews()` ships the built-in list; callers may extend or
/// override entries, or start from `new()` with their own vocabulary.
#[derive(Debug, Clone, Default)]
pub struct PolarityLexicon {
    terms: HashMap<String, Polarity>,
}

impl PolarityLexicon {
    /// An empty lexicon. The scorer rejects it until entries are added.
    pub fn new() -> Self {
        Self {
            terms: HashMap::new(),
        }
    }

    /// The built-in English product-review lexicon.
    pub fn product_reviews() -> Self {
        let mut lexicon = Self::new();
        for word in POSITIVE {
            lexicon.insert(word, Polarity::Positive);
        }
        for word in NEGATIVE {
            lexicon.insert(word, Polarity::Negative);
        }
        lexicon
    }

    /// Add or override one entry.
    pub fn insert(&mut self, term: &str, polarity: Polarity) {
        self.terms.insert(term.to_lowercase(), polarity);
    }

    /// Add or override many entries.
    pub fn extend<'a, I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (&'a str, Polarity)>,
    {
        for (term, polarity) in entries {
            self.insert(term, polarity);
        }
    }

    pub fn polarity(&self, term: &str) -> Option<Polarity> {
        self.terms.get(term).copied()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Count of (positive, negative) entries.
    pub fn counts(&self) -> (usize, usize) {
        let positive = self
            .terms
            .values()
            .filter(|p| **p == Polarity::Positive)
            .count();
        (positive, self.terms.len() - positive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_lexicon_covers_both_polarities() {
        let lexicon = PolarityLexicon::product_reviews();

        assert_eq!(lexicon.polarity("great"), Some(Polarity::Positive));
        assert_eq!(lexicon.polarity("terrible"), Some(Polarity::Negative));
        assert_eq!(lexicon.polarity("table"), None);

        let (positive, negative) = lexicon.counts();
        assert!(positive > 0 && negative > 0);
    }

    #[test]
    fn entries_can_be_added_and_overridden() {
        let mut lexicon = PolarityLexicon::product_reviews();
        lexicon.insert("lag", Polarity::Negative);
        lexicon.insert("cheap", Polarity::Positive); // caller disagrees

        assert_eq!(lexicon.polarity("lag"), Some(Polarity::Negative));
        assert_eq!(lexicon.polarity("cheap"), Some(Polarity::Positive));
    }

    #[test]
    fn lookup_is_case_normalized_on_insert() {
        let mut lexicon = PolarityLexicon::new();
        lexicon.insert("Great", Polarity::Positive);
        assert!(lexicon.contains("great"));
    }
}
