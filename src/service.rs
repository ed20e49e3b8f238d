use clap::ValueEnum;
use tracing::warn;

use crate::fallback;
use crate::models::SentimentResult;
use crate::remote::RemoteClassifier;

const MIN_TEXT_CHARS: usize = 5;

/// Which inputs the keyword fallback scores when a batch cannot be classified remotely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FallbackAlignment {
    /// Score only the non-blank texts, matching the cardinality of a successful remote call.
    #[default]
    Filtered,
    /// Score every original input, blanks included. Kept for parity with the legacy dashboard.
    Original,
}

/// Entry point for sentiment scoring. Never fails: remote errors degrade to [`fallback::classify`].
#[derive(Debug, Clone)]
pub struct SentimentService {
    remote: RemoteClassifier,
    alignment: FallbackAlignment,
}

impl SentimentService {
    pub fn new(remote: RemoteClassifier, alignment: FallbackAlignment) -> Self {
        Self { remote, alignment }
    }

    pub async fn analyze_sentiment(&self, text: &str) -> SentimentResult {
        if text.chars().count() < MIN_TEXT_CHARS {
            return SentimentResult::neutral();
        }

        match self.remote.classify(&[text.to_string()]).await {
            Ok(results) => match results.into_iter().next() {
                Some(result) => result,
                None => fallback::classify(text),
            },
            Err(e) => {
                warn!("Error analyzing sentiment with remote service: {e}");
                fallback::classify(text)
            }
        }
    }

    pub async fn batch_analyze_sentiment(&self, texts: &[String]) -> Vec<SentimentResult> {
        let valid: Vec<String> = texts
            .iter()
            .filter(|text| !text.trim().is_empty())
            .cloned()
            .collect();

        if valid.is_empty() {
            return Vec::new();
        }

        match self.remote.classify(&valid).await {
            Ok(results) => results,
            Err(e) => {
                warn!(
                    count = valid.len(),
                    "Error batch analyzing sentiment with remote service: {e}"
                );
                let inputs = match self.alignment {
                    FallbackAlignment::Filtered => valid.as_slice(),
                    FallbackAlignment::Original => texts,
                };
                inputs.iter().map(|text| fallback::classify(text)).collect()
            }
        }
    }
}
