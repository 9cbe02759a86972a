//! Review analytics CLI.
//!
//! Plays the external collaborator for the library: loads review records
//! from a JSON Lines file, runs the full pipeline, and renders the results
//! as plain tables (or one JSON report with `--json`).
//!
//! ```bash
//! analyze reviews.jsonl
//! analyze reviews.jsonl --domain-term blender --k-max 8 --json
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use review_insights::utils::evaluation::{topic_diversity, umass_coherence};
use review_insights::{
    select_topic_count, AuthorSentiment, CandidateScore, CountVectorizer, LdaConfig, Normalizer,
    PolarityLexicon, RelativeImprovement, SentimentScorer, SweepConfig, TermFrequencyTable,
    TopicSummary,
};

#[derive(Parser, Debug)]
#[command(name = "analyze")]
#[command(version)]
#[command(about = "Batch NLP analytics for product reviews", long_about = None)]
struct Args {
    /// JSON Lines file with one review record per line
    input: PathBuf,

    /// Extra domain noise terms added to the stopword set
    #[arg(long = "domain-term")]
    domain_terms: Vec<String>,

    /// Weight multiplier for negative lexicon terms
    #[arg(long, default_value_t = 2.0)]
    negative_weight: f64,

    /// Smallest candidate topic count
    #[arg(long, default_value_t = 2)]
    k_min: usize,

    /// Largest candidate topic count
    #[arg(long, default_value_t = 10)]
    k_max: usize,

    /// Terms shown per topic label
    #[arg(long, default_value_t = 8)]
    topic_terms: usize,

    /// Terms shown in the frequency report
    #[arg(long, default_value_t = 20)]
    top_terms: usize,

    /// Random seed for topic fitting
    #[arg(long, default_value_t = 123)]
    seed: u64,

    /// Elbow threshold, as a share of the observed score range
    #[arg(long, default_value_t = 0.1)]
    elbow_threshold: f64,

    /// Emit one JSON report instead of tables
    #[arg(long)]
    json: bool,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Serialize)]
struct Report {
    top_terms: Vec<(String, usize)>,
    authors: Vec<AuthorSentiment>,
    curve: Vec<CandidateScore>,
    selected_k: usize,
    topics: Vec<TopicSummary>,
    topic_diversity: f64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level: Level = args
        .log_level
        .parse()
        .with_context(|| format!("invalid log level {:?}", args.log_level))?;
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let records = load_records(&args.input)?;
    info!("loaded {} records", records.len());

    let normalizer = Normalizer::for_product_reviews().with_domain_terms(&args.domain_terms);
    let documents = normalizer.normalize_records(&records);
    let empty = documents.iter().filter(|d| d.is_empty()).count();
    info!("normalized {} documents, {} empty", documents.len(), empty);

    let table = TermFrequencyTable::from_documents(&documents);

    let scorer = SentimentScorer::new(PolarityLexicon::product_reviews())?
        .negative_weight(args.negative_weight);
    let authors = scorer.score_authors(&records, &documents);

    let dtm = CountVectorizer::new().fit_transform(&documents);
    info!(
        "document-term matrix: {} documents x {} terms",
        dtm.n_documents(),
        dtm.n_terms()
    );

    let sweep = SweepConfig {
        candidates: args.k_min..=args.k_max,
        lda: LdaConfig::default().seed(args.seed),
        terms_per_topic: args.topic_terms,
    };
    let rule = RelativeImprovement {
        threshold: args.elbow_threshold,
    };
    let selection = select_topic_count(&dtm, &sweep, &rule)?;

    let diversity = topic_diversity(&selection.summaries);
    let report = Report {
        top_terms: table.top(args.top_terms),
        authors,
        curve: selection.curve,
        selected_k: selection.selected_k,
        topics: selection.summaries,
        topic_diversity: diversity,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &dtm);
    }

    Ok(())
}

fn load_records(path: &PathBuf) -> Result<Vec<review_insights::Record>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line)
            .with_context(|| format!("parsing record on line {}", line_no + 1))?;
        records.push(record);
    }
    Ok(records)
}

fn print_report(report: &Report, dtm: &review_insights::DocumentTermMatrix) {
    println!("=== Vocabulary ({} terms shown) ===", report.top_terms.len());
    for (term, count) in &report.top_terms {
        println!("  {term:<20} {count}");
    }

    println!("\n=== Author sentiment ===");
    for entry in &report.authors {
        match entry.score {
            Some(score) => println!(
                "  {:<20} P={:<6.1} N={:<6.1} score={:+.3}",
                entry.author, entry.positive, entry.negative, score
            ),
            None => println!("  {:<20} no sentiment signal", entry.author),
        }
    }

    println!("\n=== Topic-count sweep ===");
    for point in &report.curve {
        let marker = if point.k == report.selected_k { " <-- k*" } else { "" };
        println!("  k={:<3} perplexity={:.2}{marker}", point.k, point.perplexity);
    }

    println!("\n=== Topics (k = {}) ===", report.selected_k);
    for topic in &report.topics {
        let terms: Vec<String> = topic.top_terms.iter().map(|(t, _)| t.clone()).collect();
        let coherence = umass_coherence(dtm, &terms)
            .map(|c| format!("{c:.3}"))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "  Topic {:<3} ({:>5.1}% of tokens, coherence {}): {}",
            topic.topic,
            topic.prevalence * 100.0,
            coherence,
            terms.join(", ")
        );
    }
    println!("\nTopic diversity: {:.3}", report.topic_diversity);
}
