use thiserror::Error;

#[derive(Error, Debug)]
pub enum SentimentError {
    #[error("Sentiment service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Sentiment service returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Malformed sentiment response: {0}")]
    Protocol(String),

    #[error("Please provide an array of texts to analyze")]
    InvalidRequest,
}

impl SentimentError {
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }
}
