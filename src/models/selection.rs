//! Topic-count selection over a candidate sweep.
//!
//! One model is fitted per candidate k, every fit from the same pinned seed
//! against the same immutable matrix, so the sweep parallelizes across
//! candidates and reproduces run to run. The elbow decision is pluggable:
//! production uses the relative-improvement rule, tests can hand in
//! synthetic curves with a known elbow.

use std::ops::RangeInclusive;

use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::models::lda::{FittedLda, LdaConfig, LdaError};
use crate::models::types::{CandidateScore, TopicSummary};
use crate::preprocessing::vectorizer::DocumentTermMatrix;

/// Errors raised while validating or running the sweep.
#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("candidate range must contain at least two topic counts")]
    CandidateRangeTooSmall,

    #[error("topic fitting needs at least {required} non-empty documents, found {available}")]
    TooFewDocuments { required: usize, available: usize },

    #[error("selection rule chose k={0}, which is not among the candidates")]
    UnknownCandidate(usize),

    #[error(transparent)]
    Lda(#[from] LdaError),
}

/// Decision function mapping a fit curve to the chosen k.
///
/// The curve arrives ordered by ascending k and the rule must return one of
/// its k values.
pub trait SelectionRule: Send + Sync {
    fn select(&self, curve: &[CandidateScore]) -> usize;
}

impl<F> SelectionRule for F
where
    F: Fn(&[CandidateScore]) -> usize + Send + Sync,
{
    fn select(&self, curve: &[CandidateScore]) -> usize {
        self(curve)
    }
}

/// Default elbow rule: smallest k whose improvement toward k+1 is marginal.
///
/// A drop counts as marginal when it falls below `threshold` of the total
/// score range observed across the candidates. A flat curve has no elbow to
/// find and yields the smallest candidate.
#[derive(Debug, Clone)]
pub struct RelativeImprovement {
    pub threshold: f64,
}

impl Default for RelativeImprovement {
    fn default() -> Self {
        Self { threshold: 0.1 }
    }
}

impl SelectionRule for RelativeImprovement {
    fn select(&self, curve: &[CandidateScore]) -> usize {
        let min = curve.iter().map(|c| c.perplexity).fold(f64::INFINITY, f64::min);
        let max = curve.iter().map(|c| c.perplexity).fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        if range <= 0.0 {
            return curve[0].k;
        }

        for pair in curve.windows(2) {
            let drop = pair[0].perplexity - pair[1].perplexity;
            if drop / range < self.threshold {
                return pair[0].k;
            }
        }
        curve[curve.len() - 1].k
    }
}

/// Sweep configuration.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Candidate topic counts.
    pub candidates: RangeInclusive<usize>,
    /// Shared fit parameters; `n_topics` is overridden per candidate.
    pub lda: LdaConfig,
    /// Terms per topic label in the final summaries.
    pub terms_per_topic: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            candidates: 2..=10,
            lda: LdaConfig::default(),
            terms_per_topic: 8,
        }
    }
}

/// Outcome of the sweep: the full curve plus the winning model.
#[derive(Debug)]
pub struct TopicSelection {
    /// (k, perplexity) for every candidate, ascending k.
    pub curve: Vec<CandidateScore>,
    pub selected_k: usize,
    pub model: FittedLda,
    pub summaries: Vec<TopicSummary>,
}

/// Fit every candidate, score the curve, and pick k*.
pub fn select_topic_count(
    dtm: &DocumentTermMatrix,
    config: &SweepConfig,
    rule: &dyn SelectionRule,
) -> Result<TopicSelection, SelectionError> {
    let candidates: Vec<usize> = config.candidates.clone().collect();
    if candidates.len() < 2 {
        return Err(SelectionError::CandidateRangeTooSmall);
    }

    let required = candidates[0];
    if dtm.n_documents() < required {
        return Err(SelectionError::TooFewDocuments {
            required,
            available: dtm.n_documents(),
        });
    }

    // Candidate fits are independent reads of the shared matrix.
    let fits: Vec<(usize, FittedLda)> = candidates
        .par_iter()
        .map(|&k| {
            let fit_config = LdaConfig {
                n_topics: k,
                ..config.lda.clone()
            };
            FittedLda::fit(&fit_config, dtm).map(|model| (k, model))
        })
        .collect::<Result<_, LdaError>>()?;

    let curve: Vec<CandidateScore> = fits
        .iter()
        .map(|(k, model)| CandidateScore {
            k: *k,
            perplexity: model.perplexity(dtm),
        })
        .collect();
    for point in &curve {
        debug!(k = point.k, perplexity = point.perplexity, "candidate scored");
    }

    let selected_k = rule.select(&curve);
    let model = fits
        .into_iter()
        .find(|(k, _)| *k == selected_k)
        .map(|(_, model)| model)
        .ok_or(SelectionError::UnknownCandidate(selected_k))?;

    let summaries = model.summaries(&dtm.terms, config.terms_per_topic);

    Ok(TopicSelection {
        curve,
        selected_k,
        model,
        summaries,
    })
}
