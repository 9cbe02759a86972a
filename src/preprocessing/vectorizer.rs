//! Frequency accounting and document-term matrices.
//!
//! Both structures are pure functions of their input documents: re-running
//! against any corpus snapshot (raw, cleaned, lemmatized) builds a fresh
//! value with no state carried between runs.

use hashbrown::{HashMap, HashSet};
use ndarray::Array2;

use crate::models::types::Document;

#[derive(Debug, Clone, Copy)]
struct TermStats {
    total: usize,
    documents: usize,
    first_seen: usize,
}

/// Term -> corpus-wide occurrence counts.
///
/// Totals are independent of document order. Top-N queries break count ties
/// by first-insertion order so repeated runs report identically.
#[derive(Debug, Clone, Default)]
pub struct TermFrequencyTable {
    stats: HashMap<String, TermStats>,
    n_documents: usize,
}

impl TermFrequencyTable {
    pub fn from_documents(documents: &[Document]) -> Self {
        let lists: Vec<&[String]> = documents.iter().map(|d| d.tokens.as_slice()).collect();
        Self::from_token_lists(&lists)
    }

    /// Build from bare token streams, e.g. an intermediate corpus snapshot.
    pub fn from_token_lists(documents: &[&[String]]) -> Self {
        let mut stats: HashMap<String, TermStats> = HashMap::new();
        let mut order = 0;

        for tokens in documents {
            let mut seen_here: HashSet<&str> = HashSet::new();
            for token in *tokens {
                let entry = stats.entry(token.clone()).or_insert_with(|| {
                    order += 1;
                    TermStats {
                        total: 0,
                        documents: 0,
                        first_seen: order,
                    }
                });
                entry.total += 1;
                if seen_here.insert(token) {
                    entry.documents += 1;
                }
            }
        }

        Self {
            stats,
            n_documents: documents.len(),
        }
    }

    /// Total occurrences of a term across the corpus.
    pub fn total(&self, term: &str) -> usize {
        self.stats.get(term).map_or(0, |s| s.total)
    }

    /// Number of documents containing the term at least once.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.stats.get(term).map_or(0, |s| s.documents)
    }

    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// The `n` most frequent terms, descending; ties keep insertion order.
    pub fn top(&self, n: usize) -> Vec<(String, usize)> {
        let mut ranked: Vec<(&String, &TermStats)> = self.stats.iter().collect();
        ranked.sort_by(|a, b| {
            b.1.total
                .cmp(&a.1.total)
                .then(a.1.first_seen.cmp(&b.1.first_seen))
        });
        ranked
            .into_iter()
            .take(n)
            .map(|(term, s)| (term.clone(), s.total))
            .collect()
    }
}

/// Document-term count matrix plus its vocabulary.
///
/// Rows with zero total count are pruned before construction completes;
/// `kept` maps each surviving row back to its original document index.
#[derive(Debug, Clone)]
pub struct DocumentTermMatrix {
    /// Counts, kept documents x terms.
    pub matrix: Array2<f64>,
    /// Term -> column index.
    pub vocabulary: HashMap<String, usize>,
    /// Column index -> term, in first-seen order.
    pub terms: Vec<String>,
    /// Original document index of each surviving row.
    pub kept: Vec<usize>,
}

impl DocumentTermMatrix {
    pub fn n_documents(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn n_terms(&self) -> usize {
        self.matrix.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.matrix.nrows(), self.matrix.ncols())
    }
}

/// Builds count matrices over a vocabulary in first-seen term order.
///
/// The document-frequency filters and the vocabulary cap default to
/// pass-through values; untouched, every term survives.
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    min_df: usize,
    max_df_ratio: f64,
    max_features: Option<usize>,
}

impl CountVectorizer {
    pub fn new() -> Self {
        Self {
            min_df: 1,
            max_df_ratio: 1.0,
            max_features: None,
        }
    }

    /// Drop terms appearing in fewer than `min_df` documents.
    pub fn min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df;
        self
    }

    /// Drop terms appearing in more than this share of documents.
    pub fn max_df_ratio(mut self, ratio: f64) -> Self {
        self.max_df_ratio = ratio;
        self
    }

    /// Cap the vocabulary at the `max` most frequent terms.
    pub fn max_features(mut self, max: usize) -> Self {
        self.max_features = Some(max);
        self
    }

    /// Count every document into a matrix, then prune zero-total rows.
    pub fn fit_transform(&self, documents: &[Document]) -> DocumentTermMatrix {
        let table = TermFrequencyTable::from_documents(documents);
        let max_df = (documents.len() as f64 * self.max_df_ratio) as usize;

        // Vocabulary in first-seen order, filtered by document frequency.
        let mut selected: Vec<(String, TermStats)> = table
            .stats
            .iter()
            .filter(|(_, s)| s.documents >= self.min_df && s.documents <= max_df)
            .map(|(t, s)| (t.clone(), *s))
            .collect();
        selected.sort_by_key(|(_, s)| s.first_seen);

        if let Some(max) = self.max_features {
            // Keep the most frequent terms, then restore first-seen order.
            selected.sort_by(|a, b| {
                b.1.total
                    .cmp(&a.1.total)
                    .then(a.1.first_seen.cmp(&b.1.first_seen))
            });
            selected.truncate(max);
            selected.sort_by_key(|(_, s)| s.first_seen);
        }

        let terms: Vec<String> = selected.into_iter().map(|(t, _)| t).collect();
        let vocabulary: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();

        let mut full = Array2::zeros((documents.len(), terms.len()));
        for (row, doc) in documents.iter().enumerate() {
            for token in &doc.tokens {
                if let Some(&col) = vocabulary.get(token) {
                    full[[row, col]] += 1.0;
                }
            }
        }

        // A document with no surviving tokens carries no count mass and
        // cannot support a topic distribution; drop its row, remember which.
        let kept: Vec<usize> = (0..documents.len())
            .filter(|&row| full.row(row).sum() > 0.0)
            .collect();

        let mut matrix = Array2::zeros((kept.len(), terms.len()));
        for (new_row, &old_row) in kept.iter().enumerate() {
            matrix.row_mut(new_row).assign(&full.row(old_row));
        }

        DocumentTermMatrix {
            matrix,
            vocabulary,
            terms,
            kept,
        }
    }
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self::new()
    }
}
