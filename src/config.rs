use std::{env, time::Duration};

use anyhow::Context;
use tracing::info;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api/sentiment/analyze";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_url = env::var("SENTIMENT_API_URL").unwrap_or_else(|_| {
            info!("SENTIMENT_API_URL not set, using default: {DEFAULT_API_URL}");
            DEFAULT_API_URL.to_string()
        });

        let request_timeout = match env::var("SENTIMENT_TIMEOUT_SECS") {
            Ok(raw) => Some(parse_timeout(&raw)?),
            Err(_) => None,
        };

        Ok(Self {
            api_url,
            request_timeout,
        })
    }
}

fn parse_timeout(raw: &str) -> anyhow::Result<Duration> {
    let secs: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("invalid SENTIMENT_TIMEOUT_SECS value: {raw}"))?;
    Ok(Duration::from_secs(secs))
}
