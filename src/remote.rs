use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::SentimentError;
use crate::models::{Sentiment, SentimentResult};

/// Client for the external classification service.
///
/// One call is one batched POST. The reply must echo the batch back as `results` in the same
/// order and length; anything else fails the whole call.
#[derive(Debug, Clone)]
pub struct RemoteClassifier {
    client: Client,
    endpoint: String,
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    texts: &'a [String],
}

#[derive(Deserialize)]
struct ClassifyResponse {
    results: Vec<WireResult>,
}

#[derive(Deserialize)]
struct WireResult {
    sentiment: Sentiment,
    score: f64,
}

impl RemoteClassifier {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, SentimentError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    pub async fn classify(
        &self,
        texts: &[String],
    ) -> Result<Vec<SentimentResult>, SentimentError> {
        debug!(
            count = texts.len(),
            endpoint = %self.endpoint,
            "requesting remote classification"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ClassifyRequest { texts })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SentimentError::Status(status));
        }

        let body = response.bytes().await?;
        let parsed: ClassifyResponse = serde_json::from_slice(&body)
            .map_err(|e| SentimentError::protocol(format!("unexpected response shape: {e}")))?;

        if parsed.results.len() != texts.len() {
            return Err(SentimentError::protocol(format!(
                "expected {} results, got {}",
                texts.len(),
                parsed.results.len()
            )));
        }

        parsed
            .results
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                if !item.score.is_finite() || !(0.0..=1.0).contains(&item.score) {
                    return Err(SentimentError::protocol(format!(
                        "score {} at index {index} is outside [0, 1]",
                        item.score
                    )));
                }
                Ok(SentimentResult {
                    sentiment: item.sentiment,
                    score: item.score,
                })
            })
            .collect()
    }
}

/// Validates a raw `{ "texts": [...] }` request body.
///
/// `null` entries are kept as empty strings so the blank filter drops them later; any other
/// non-string entry rejects the request.
pub fn parse_texts_request(body: &Value) -> Result<Vec<String>, SentimentError> {
    let texts = body
        .get("texts")
        .and_then(Value::as_array)
        .ok_or(SentimentError::InvalidRequest)?;

    texts
        .iter()
        .map(|text| match text {
            Value::String(text) => Ok(text.clone()),
            Value::Null => Ok(String::new()),
            _ => Err(SentimentError::InvalidRequest),
        })
        .collect()
}
