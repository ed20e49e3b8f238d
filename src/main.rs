use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod aggregate;
mod catalog;
mod config;
mod error;
mod fallback;
mod feedback;
mod lexicon;
mod models;
mod remote;
mod report;
mod service;

use aggregate::BucketingPolicy;
use catalog::EventCatalog;
use config::Config;
use remote::RemoteClassifier;
use service::{FallbackAlignment, SentimentService};

#[derive(Parser)]
#[command(name = "event-feedback-sentiment")]
#[command(about = "Sentiment scoring and analytics for event feedback", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single piece of text
    Analyze { text: String },
    /// Score a `{"texts": [...]}` request file
    Batch {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = FallbackAlignment::Filtered)]
        align: FallbackAlignment,
    },
    /// Generate a markdown analytics report from feedback records
    Report {
        #[arg(long)]
        feedback: PathBuf,
        #[arg(long)]
        events: Option<PathBuf>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
        /// Run suggestions through the sentiment service
        #[arg(long)]
        score_suggestions: bool,
        /// Floor per-event ratings into buckets instead of rounding
        #[arg(long)]
        legacy_bucketing: bool,
    },
}

/// Built only by the commands that score text, so `report` runs without sentiment settings.
fn sentiment_service(alignment: FallbackAlignment) -> anyhow::Result<SentimentService> {
    let config = Config::from_env()?;
    let remote = RemoteClassifier::new(config.api_url, config.request_timeout)
        .context("failed to build sentiment service client")?;
    Ok(SentimentService::new(remote, alignment))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { text } => {
            let service = sentiment_service(FallbackAlignment::default())?;
            let result = service.analyze_sentiment(&text).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Batch { input, align } => {
            let raw = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let body: serde_json::Value = serde_json::from_str(&raw)
                .with_context(|| format!("invalid JSON in {}", input.display()))?;
            let texts = remote::parse_texts_request(&body)?;

            let service = sentiment_service(align)?;
            let results = service.batch_analyze_sentiment(&texts).await;
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({ "results": results }))?
            );
        }
        Commands::Report {
            feedback: feedback_path,
            events,
            out,
            score_suggestions,
            legacy_bucketing,
        } => {
            let records = aggregate::valid_feedback(&feedback::load_feedback(&feedback_path)?);
            let catalog = match events {
                Some(path) => EventCatalog::load(&path)?,
                None => EventCatalog::new(),
            };
            if catalog.is_empty() {
                info!("no event catalog entries, using names carried by the feedback");
            }
            let bucketing = if legacy_bucketing {
                BucketingPolicy::legacy()
            } else {
                BucketingPolicy::unified()
            };

            let suggestion_sentiments = if score_suggestions {
                let texts: Vec<String> = records.iter().map(|r| r.suggestions.clone()).collect();
                let service = sentiment_service(FallbackAlignment::Filtered)?;
                Some(service.batch_analyze_sentiment(&texts).await)
            } else {
                None
            };

            let report = report::build_report(
                chrono::Utc::now(),
                &records,
                &catalog,
                bucketing,
                suggestion_sentiments.as_deref(),
            );
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
