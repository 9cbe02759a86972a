//! Latent Dirichlet Allocation by collapsed Gibbs sampling.
//!
//! Each document is a probabilistic mixture over latent topics; each topic
//! is a distribution over the vocabulary. The sampler is seeded, so a fit
//! is a deterministic function of (config, matrix).

use ndarray::{Array1, Array2};
use rand::prelude::*;
use thiserror::Error;

use crate::models::types::TopicSummary;
use crate::preprocessing::vectorizer::DocumentTermMatrix;

/// Errors raised while configuring or fitting a topic model.
#[derive(Error, Debug)]
pub enum LdaError {
    #[error("number of topics must be positive")]
    InvalidTopicCount,

    #[error("invalid hyperparameter: {0}")]
    InvalidParameter(String),

    #[error("document-term matrix has no rows or no columns")]
    EmptyMatrix,
}

/// Topic model configuration.
#[derive(Debug, Clone)]
pub struct LdaConfig {
    /// Number of latent topics.
    pub n_topics: usize,
    /// Document-topic prior.
    pub alpha: f64,
    /// Topic-term prior.
    pub beta: f64,
    /// Gibbs sampling iterations.
    pub n_iterations: usize,
    /// RNG seed. Pinned so repeated fits and candidate sweeps reproduce.
    pub seed: u64,
}

impl Default for LdaConfig {
    fn default() -> Self {
        Self {
            n_topics: 10,
            alpha: 0.1,
            beta: 0.01,
            n_iterations: 200,
            seed: 123,
        }
    }
}

impl LdaConfig {
    pub fn new(n_topics: usize) -> Self {
        Self {
            n_topics,
            ..Default::default()
        }
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn n_iterations(mut self, n: usize) -> Self {
        self.n_iterations = n;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// A fitted topic model.
#[derive(Debug, Clone)]
pub struct FittedLda {
    config: LdaConfig,
    /// Topic-term assignment counts, topics x terms.
    topic_term_counts: Array2<f64>,
    /// Document-topic assignment counts, documents x topics.
    doc_topic_counts: Array2<f64>,
    /// Token mass per topic.
    topic_counts: Array1<f64>,
    n_terms: usize,
}

impl FittedLda {
    /// Fit the model on a pruned document-term matrix.
    pub fn fit(config: &LdaConfig, dtm: &DocumentTermMatrix) -> Result<Self, LdaError> {
        if config.n_topics == 0 {
            return Err(LdaError::InvalidTopicCount);
        }
        if config.alpha <= 0.0 {
            return Err(LdaError::InvalidParameter("alpha must be positive".into()));
        }
        if config.beta <= 0.0 {
            return Err(LdaError::InvalidParameter("beta must be positive".into()));
        }

        let n_docs = dtm.n_documents();
        let n_terms = dtm.n_terms();
        if n_docs == 0 || n_terms == 0 {
            return Err(LdaError::EmptyMatrix);
        }

        let n_topics = config.n_topics;
        let mut rng = StdRng::seed_from_u64(config.seed);

        // Expand the count matrix into per-document token lists.
        let doc_tokens: Vec<Vec<usize>> = (0..n_docs)
            .map(|doc| {
                let mut tokens = Vec::new();
                for term in 0..n_terms {
                    let count = dtm.matrix[[doc, term]] as usize;
                    tokens.extend(std::iter::repeat(term).take(count));
                }
                tokens
            })
            .collect();

        // Random initial topic assignment.
        let mut topic_term_counts = Array2::zeros((n_topics, n_terms));
        let mut doc_topic_counts = Array2::zeros((n_docs, n_topics));
        let mut topic_counts = Array1::zeros(n_topics);
        let mut assignments: Vec<Vec<usize>> = Vec::with_capacity(n_docs);

        for (doc, tokens) in doc_tokens.iter().enumerate() {
            let mut doc_assignments = Vec::with_capacity(tokens.len());
            for &term in tokens {
                let topic = rng.gen_range(0..n_topics);
                topic_term_counts[[topic, term]] += 1.0;
                doc_topic_counts[[doc, topic]] += 1.0;
                topic_counts[topic] += 1.0;
                doc_assignments.push(topic);
            }
            assignments.push(doc_assignments);
        }

        let alpha = config.alpha;
        let beta = config.beta;
        let beta_sum = beta * n_terms as f64;
        let mut probs = vec![0.0; n_topics];

        for _ in 0..config.n_iterations {
            for (doc, tokens) in doc_tokens.iter().enumerate() {
                for (pos, &term) in tokens.iter().enumerate() {
                    let old_topic = assignments[doc][pos];
                    topic_term_counts[[old_topic, term]] -= 1.0;
                    doc_topic_counts[[doc, old_topic]] -= 1.0;
                    topic_counts[old_topic] -= 1.0;

                    // Sample from P(topic | doc) * P(term | topic).
                    let doc_total = doc_topic_counts.row(doc).sum();
                    let mut total = 0.0;
                    for (topic, prob) in probs.iter_mut().enumerate() {
                        let doc_topic = (doc_topic_counts[[doc, topic]] + alpha)
                            / (doc_total + n_topics as f64 * alpha);
                        let topic_term = (topic_term_counts[[topic, term]] + beta)
                            / (topic_counts[topic] + beta_sum);
                        *prob = doc_topic * topic_term;
                        total += *prob;
                    }

                    let threshold = rng.gen::<f64>() * total;
                    let mut cumulative = 0.0;
                    let mut new_topic = n_topics - 1;
                    for (topic, &prob) in probs.iter().enumerate() {
                        cumulative += prob;
                        if cumulative >= threshold {
                            new_topic = topic;
                            break;
                        }
                    }

                    topic_term_counts[[new_topic, term]] += 1.0;
                    doc_topic_counts[[doc, new_topic]] += 1.0;
                    topic_counts[new_topic] += 1.0;
                    assignments[doc][pos] = new_topic;
                }
            }
        }

        Ok(Self {
            config: config.clone(),
            topic_term_counts,
            doc_topic_counts,
            topic_counts,
            n_terms,
        })
    }

    pub fn n_topics(&self) -> usize {
        self.config.n_topics
    }

    /// Smoothed P(term | topic), topics x terms.
    pub fn topic_term_probs(&self) -> Array2<f64> {
        let n_topics = self.config.n_topics;
        let beta = self.config.beta;
        let beta_sum = beta * self.n_terms as f64;

        let mut probs = Array2::zeros((n_topics, self.n_terms));
        for topic in 0..n_topics {
            let denom = self.topic_counts[topic] + beta_sum;
            for term in 0..self.n_terms {
                probs[[topic, term]] = (self.topic_term_counts[[topic, term]] + beta) / denom;
            }
        }
        probs
    }

    /// Smoothed P(topic | document), documents x topics.
    pub fn document_topic_probs(&self) -> Array2<f64> {
        let n_docs = self.doc_topic_counts.nrows();
        let n_topics = self.config.n_topics;
        let alpha = self.config.alpha;

        let mut probs = Array2::zeros((n_docs, n_topics));
        for doc in 0..n_docs {
            let denom = self.doc_topic_counts.row(doc).sum() + n_topics as f64 * alpha;
            for topic in 0..n_topics {
                probs[[doc, topic]] = (self.doc_topic_counts[[doc, topic]] + alpha) / denom;
            }
        }
        probs
    }

    /// Held-out style predictive fit over the matrix; lower is better.
    pub fn perplexity(&self, dtm: &DocumentTermMatrix) -> f64 {
        let doc_topics = self.document_topic_probs();
        let topic_terms = self.topic_term_probs();

        let mut log_likelihood = 0.0;
        let mut total_tokens = 0.0;

        for doc in 0..dtm.n_documents() {
            for term in 0..dtm.n_terms().min(self.n_terms) {
                let count = dtm.matrix[[doc, term]];
                if count > 0.0 {
                    let mut prob = 0.0;
                    for topic in 0..self.config.n_topics {
                        prob += topic_terms[[topic, term]] * doc_topics[[doc, topic]];
                    }
                    log_likelihood += count * prob.ln();
                    total_tokens += count;
                }
            }
        }

        (-log_likelihood / total_tokens).exp()
    }

    /// Top-N term summaries per topic, descending by probability.
    ///
    /// The sort is stable, so equal probabilities keep vocabulary order.
    pub fn summaries(&self, terms: &[String], top_n: usize) -> Vec<TopicSummary> {
        let probs = self.topic_term_probs();
        let total_mass: f64 = self.topic_counts.sum();

        (0..self.config.n_topics)
            .map(|topic| {
                let mut ranked: Vec<(usize, f64)> = (0..self.n_terms)
                    .map(|term| (term, probs[[topic, term]]))
                    .collect();
                ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
                ranked.truncate(top_n);

                let top_terms = ranked
                    .into_iter()
                    .filter_map(|(term, prob)| terms.get(term).map(|t| (t.clone(), prob)))
                    .collect();

                let prevalence = if total_mass > 0.0 {
                    self.topic_counts[topic] / total_mass
                } else {
                    0.0
                };

                TopicSummary {
                    topic,
                    top_terms,
                    prevalence,
                }
            })
            .collect()
    }

    /// Most probable topic per document row.
    pub fn dominant_topics(&self) -> Vec<usize> {
        let probs = self.document_topic_probs();
        (0..probs.nrows())
            .map(|doc| {
                let row = probs.row(doc);
                let mut best = 0;
                let mut best_prob = f64::MIN;
                for (topic, &prob) in row.iter().enumerate() {
                    if prob > best_prob {
                        best_prob = prob;
                        best = topic;
                    }
                }
                best
            })
            .collect()
    }
}
