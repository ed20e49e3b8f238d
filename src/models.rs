use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub const POSITIVE_THRESHOLD: f64 = 0.6;
pub const NEGATIVE_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Discretizes a score in `[0, 1]` with the fixed thresholds.
    pub fn from_score(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if score < NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub sentiment: Sentiment,
    pub score: f64,
}

impl SentimentResult {
    pub fn neutral() -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            score: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    #[serde(default)]
    pub id: String,
    pub event_id: String,
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default = "missing_rating", deserialize_with = "rating")]
    pub rating: f64,
    #[serde(default = "missing_rating", deserialize_with = "rating")]
    pub event_experience: f64,
    #[serde(default = "missing_rating", deserialize_with = "rating")]
    pub speaker_interaction: f64,
    #[serde(default = "missing_rating", deserialize_with = "rating")]
    pub session_relevance: f64,
    #[serde(default)]
    pub suggestions: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_id: Option<String>,
}

fn missing_rating() -> f64 {
    f64::NAN
}

// Ratings come from untrusted clients: null or absent becomes NaN and is skipped downstream.
fn rating<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingDimension {
    Rating,
    EventExperience,
    SpeakerInteraction,
    SessionRelevance,
}

impl RatingDimension {
    pub const ALL: [RatingDimension; 4] = [
        RatingDimension::Rating,
        RatingDimension::EventExperience,
        RatingDimension::SpeakerInteraction,
        RatingDimension::SessionRelevance,
    ];

    pub fn value(self, record: &FeedbackRecord) -> f64 {
        match self {
            RatingDimension::Rating => record.rating,
            RatingDimension::EventExperience => record.event_experience,
            RatingDimension::SpeakerInteraction => record.speaker_interaction,
            RatingDimension::SessionRelevance => record.session_relevance,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RatingDimension::Rating => "Overall Rating",
            RatingDimension::EventExperience => "Event Experience",
            RatingDimension::SpeakerInteraction => "Speaker Interaction",
            RatingDimension::SessionRelevance => "Session Relevance",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub event_type: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingAverages {
    pub rating: f64,
    pub event_experience: f64,
    pub speaker_interaction: f64,
    pub session_relevance: f64,
}

impl RatingAverages {
    pub fn get(&self, dimension: RatingDimension) -> f64 {
        match dimension {
            RatingDimension::Rating => self.rating,
            RatingDimension::EventExperience => self.event_experience,
            RatingDimension::SpeakerInteraction => self.speaker_interaction,
            RatingDimension::SessionRelevance => self.session_relevance,
        }
    }
}

/// Star counts; index 0 holds the 1-star bucket.
pub type RatingDistribution = [usize; 5];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAggregate {
    pub event_id: String,
    pub event_name: String,
    pub averages: RatingAverages,
    pub rating_distribution: RatingDistribution,
    pub count: usize,
    pub unique_users: usize,
    pub suggestions: Vec<String>,
    pub sentiment_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentBand {
    Positive,
    Neutral,
    NeedsImprovement,
}

impl SentimentBand {
    pub fn from_score(sentiment_score: f64) -> Self {
        if sentiment_score >= 80.0 {
            SentimentBand::Positive
        } else if sentiment_score >= 60.0 {
            SentimentBand::Neutral
        } else {
            SentimentBand::NeedsImprovement
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SentimentBand::Positive => "Positive",
            SentimentBand::Neutral => "Neutral",
            SentimentBand::NeedsImprovement => "Needs Improvement",
        }
    }
}
