//! End-to-end pipeline behavior: records in, artifacts out, and the
//! reproducibility guarantees across repeated runs.

use review_insights::{
    select_topic_count, CountVectorizer, LdaConfig, Normalizer, PolarityLexicon, Record,
    RelativeImprovement, SentimentScorer, SweepConfig, TermFrequencyTable,
};
use serde_json::json;

fn record(author: &str, text: Option<&str>, rating: u8) -> Record {
    Record {
        author: author.to_string(),
        text: text.map(String::from),
        rating,
        votes: None,
        verified: false,
    }
}

fn corpus() -> Vec<Record> {
    vec![
        record(
            "ana",
            Some("The battery life is great, charges fast and lasted all trip"),
            5,
        ),
        record(
            "ben",
            Some("Battery died after 2 days, charging is terrible and slow"),
            1,
        ),
        record(
            "ana",
            Some("The screen is gorgeous, crisp display with bright pixels"),
            5,
        ),
        record(
            "cid",
            Some("Screen scratched easily, display looks cheap and the pixels failed"),
            2,
        ),
        record("dee", None, 3),
        record("eva", Some("!!! 123"), 3),
        record(
            "ben",
            Some("The strap broke and the buckle is flimsy garbage"),
            1,
        ),
        record(
            "fay",
            Some("Comfortable strap, solid buckle, love the band quality"),
            4,
        ),
        record(
            "gus",
            Some("Battery and screen both excellent, great display and charge behavior"),
            5,
        ),
        record("hal", Some("Table lamp"), 3),
    ]
}

struct PipelineRun {
    report: serde_json::Value,
    n_documents: usize,
    kept_rows: Vec<usize>,
}

fn run_pipeline(records: &[Record]) -> PipelineRun {
    let normalizer = Normalizer::new();
    let documents = normalizer.normalize_records(records);

    let table = TermFrequencyTable::from_documents(&documents);
    let scorer = SentimentScorer::new(PolarityLexicon::product_reviews()).unwrap();
    let authors = scorer.score_authors(records, &documents);

    let dtm = CountVectorizer::new().fit_transform(&documents);
    let sweep = SweepConfig {
        candidates: 2..=4,
        lda: LdaConfig::default().seed(123),
        terms_per_topic: 8,
    };
    let selection = select_topic_count(&dtm, &sweep, &RelativeImprovement::default()).unwrap();

    PipelineRun {
        report: json!({
            "top_terms": table.top(20),
            "authors": authors,
            "curve": selection.curve,
            "selected_k": selection.selected_k,
            "topics": selection.summaries,
        }),
        n_documents: documents.len(),
        kept_rows: dtm.kept,
    }
}

#[test]
fn same_inputs_and_seed_reproduce_identical_artifacts() {
    let records = corpus();
    let first = run_pipeline(&records);
    let second = run_pipeline(&records);

    assert_eq!(
        serde_json::to_string(&first.report).unwrap(),
        serde_json::to_string(&second.report).unwrap()
    );
}

#[test]
fn empty_documents_are_tracked_but_pruned_from_the_matrix() {
    let records = corpus();
    let run = run_pipeline(&records);

    // All ten records normalize to documents; the missing-text and
    // digits-only reviews come out empty and lose their matrix rows.
    assert_eq!(run.n_documents, 10);
    assert_eq!(run.kept_rows.len(), 8);
    assert!(!run.kept_rows.contains(&4));
    assert!(!run.kept_rows.contains(&5));
}

#[test]
fn author_scores_cover_the_full_range_of_signals() {
    let records = corpus();
    let normalizer = Normalizer::new();
    let documents = normalizer.normalize_records(&records);
    let scorer = SentimentScorer::new(PolarityLexicon::product_reviews()).unwrap();
    let authors = scorer.score_authors(&records, &documents);

    let score_of = |name: &str| {
        authors
            .iter()
            .find(|a| a.author == name)
            .unwrap_or_else(|| panic!("author {name} missing"))
            .score
    };

    // ben's reviews only ever match negative terms.
    assert_eq!(score_of("ben"), Some(-1.0));
    // fay's only match positive terms.
    assert_eq!(score_of("fay"), Some(1.0));
    // ana leans positive but stays inside the bounds.
    let ana = score_of("ana").unwrap();
    assert!(ana > 0.0 && ana <= 1.0);
    // No lexicon matches and no text at all both mean "no signal".
    assert_eq!(score_of("hal"), None);
    assert_eq!(score_of("dee"), None);
    assert_eq!(score_of("eva"), None);
}

#[test]
fn vocabulary_ranks_the_recurring_product_terms() {
    let records = corpus();
    let documents = Normalizer::new().normalize_records(&records);
    let table = TermFrequencyTable::from_documents(&documents);

    assert_eq!(table.total("battery"), 3);
    assert_eq!(table.total("screen"), 3);

    let top: Vec<String> = table.top(5).into_iter().map(|(t, _)| t).collect();
    assert!(top.contains(&"battery".to_string()));
    assert!(top.contains(&"screen".to_string()));
}

#[test]
fn frequency_tables_rebuild_per_corpus_snapshot() {
    let normalizer = Normalizer::new();
    let text = "The cameras are charging";

    let raw = normalizer.raw_tokens(text);
    let cleaned = normalizer.clean_tokens(text);
    let lemmas = normalizer.normalize_text(text);

    let raw_table = TermFrequencyTable::from_token_lists(&[raw.as_slice()]);
    let clean_table = TermFrequencyTable::from_token_lists(&[cleaned.as_slice()]);
    let lemma_table = TermFrequencyTable::from_token_lists(&[lemmas.as_slice()]);

    // Each snapshot is counted fresh; no state leaks between runs.
    assert_eq!(raw_table.total("the"), 1);
    assert_eq!(clean_table.total("the"), 0);
    assert_eq!(clean_table.total("cameras"), 1);
    assert_eq!(clean_table.total("camera"), 0);
    assert_eq!(lemma_table.total("camera"), 1);
    assert_eq!(lemma_table.total("cameras"), 0);
}

#[test]
fn sweep_selects_a_candidate_and_labels_every_topic() {
    let records = corpus();
    let documents = Normalizer::new().normalize_records(&records);
    let dtm = CountVectorizer::new().fit_transform(&documents);

    let sweep = SweepConfig {
        candidates: 2..=4,
        lda: LdaConfig::default(),
        terms_per_topic: 3,
    };
    let selection = select_topic_count(&dtm, &sweep, &RelativeImprovement::default()).unwrap();

    assert_eq!(selection.curve.len(), 3);
    assert!((2..=4).contains(&selection.selected_k));
    assert_eq!(selection.summaries.len(), selection.selected_k);
    for summary in &selection.summaries {
        assert!(!summary.top_terms.is_empty());
        assert!(summary.top_terms.len() <= 3);
    }
    for point in &selection.curve {
        assert!(point.perplexity.is_finite() && point.perplexity > 0.0);
    }
}
