//! Diagnostics for the selected topic model.

use crate::models::types::TopicSummary;
use crate::preprocessing::vectorizer::DocumentTermMatrix;

/// UMass coherence of one topic's top terms.
///
/// Uses document co-occurrence over the count matrix; higher (less
/// negative) means the terms travel together. `None` when fewer than two
/// of the terms are in the vocabulary.
pub fn umass_coherence(dtm: &DocumentTermMatrix, top_terms: &[String]) -> Option<f64> {
    let indices: Vec<usize> = top_terms
        .iter()
        .filter_map(|t| dtm.vocabulary.get(t).copied())
        .collect();
    if indices.len() < 2 {
        return None;
    }

    let epsilon = 1.0;
    let mut coherence = 0.0;
    let mut pairs = 0;

    for (i, &w1) in indices.iter().enumerate() {
        for &w2 in indices.iter().skip(i + 1) {
            let docs_w2 = (0..dtm.n_documents())
                .filter(|&doc| dtm.matrix[[doc, w2]] > 0.0)
                .count() as f64;
            if docs_w2 == 0.0 {
                continue;
            }
            let docs_both = (0..dtm.n_documents())
                .filter(|&doc| dtm.matrix[[doc, w1]] > 0.0 && dtm.matrix[[doc, w2]] > 0.0)
                .count() as f64;

            coherence += ((docs_both + epsilon) / docs_w2).ln();
            pairs += 1;
        }
    }

    (pairs > 0).then(|| coherence / pairs as f64)
}

/// Share of distinct terms across all topic labels; 1.0 means no overlap.
pub fn topic_diversity(summaries: &[TopicSummary]) -> f64 {
    let all: Vec<&str> = summaries
        .iter()
        .flat_map(|s| s.top_terms.iter().map(|(t, _)| t.as_str()))
        .collect();
    if all.is_empty() {
        return 0.0;
    }

    let unique: std::collections::HashSet<&str> = all.iter().copied().collect();
    unique.len() as f64 / all.len() as f64
}
