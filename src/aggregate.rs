use std::collections::{HashMap, HashSet};

use crate::catalog::EventCatalog;
use crate::models::{
    EventAggregate, FeedbackRecord, RatingAverages, RatingDimension, RatingDistribution,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucketing {
    Round,
    Floor,
}

impl Bucketing {
    fn bucket(self, value: f64) -> Option<usize> {
        let star = match self {
            Bucketing::Round => value.round(),
            Bucketing::Floor if (1.0..=5.0).contains(&value) => value.floor(),
            Bucketing::Floor => return None,
        };
        if (1.0..=5.0).contains(&star) {
            Some(star as usize - 1)
        } else {
            None
        }
    }
}

/// Bucketing applied to the dashboard-wide distribution and to each event's distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketingPolicy {
    pub global: Bucketing,
    pub per_event: Bucketing,
}

impl BucketingPolicy {
    pub fn unified() -> Self {
        Self {
            global: Bucketing::Round,
            per_event: Bucketing::Round,
        }
    }

    /// Rounds globally but floors per event, as the original dashboard did.
    pub fn legacy() -> Self {
        Self {
            global: Bucketing::Round,
            per_event: Bucketing::Floor,
        }
    }
}

impl Default for BucketingPolicy {
    fn default() -> Self {
        Self::unified()
    }
}

/// Keeps records whose four ratings are all positive. NaN ratings fail the comparison.
pub fn valid_feedback(records: &[FeedbackRecord]) -> Vec<FeedbackRecord> {
    records
        .iter()
        .filter(|record| {
            RatingDimension::ALL
                .iter()
                .all(|dimension| dimension.value(record) > 0.0)
        })
        .cloned()
        .collect()
}

/// Rounds the exact decimal value of `value` to one place. Binary ties (x.25, x.75) round away
/// from zero, matching the dashboard's `toFixed(1)`.
fn round_one_decimal(value: f64) -> f64 {
    if (value * 4.0).fract() == 0.0 {
        return (value * 10.0).round() / 10.0;
    }
    format!("{value:.1}").parse().unwrap_or(value)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    round_one_decimal(values.iter().sum::<f64>() / values.len() as f64)
}

fn finite_values(records: &[FeedbackRecord], dimension: RatingDimension) -> Vec<f64> {
    records
        .iter()
        .map(|record| dimension.value(record))
        .filter(|value| value.is_finite())
        .collect()
}

pub fn overall_averages(records: &[FeedbackRecord]) -> RatingAverages {
    RatingAverages {
        rating: mean(&finite_values(records, RatingDimension::Rating)),
        event_experience: mean(&finite_values(records, RatingDimension::EventExperience)),
        speaker_interaction: mean(&finite_values(records, RatingDimension::SpeakerInteraction)),
        session_relevance: mean(&finite_values(records, RatingDimension::SessionRelevance)),
    }
}

pub fn rating_distribution<I>(values: I, bucketing: Bucketing) -> RatingDistribution
where
    I: IntoIterator<Item = f64>,
{
    let mut distribution = [0usize; 5];
    for value in values {
        if let Some(index) = bucketing.bucket(value) {
            distribution[index] += 1;
        }
    }
    distribution
}

#[derive(Default)]
struct EventAccumulator {
    event_name: String,
    ratings: Vec<f64>,
    event_experiences: Vec<f64>,
    speaker_interactions: Vec<f64>,
    session_relevances: Vec<f64>,
    user_ids: HashSet<String>,
    suggestions: Vec<String>,
    count: usize,
}

fn push_finite(values: &mut Vec<f64>, value: f64) {
    if value.is_finite() {
        values.push(value);
    }
}

/// Groups feedback by event in first-seen order and derives one [`EventAggregate`] per event.
pub fn per_event_aggregates(
    records: &[FeedbackRecord],
    catalog: &EventCatalog,
    bucketing: Bucketing,
) -> Vec<EventAggregate> {
    let mut order: Vec<String> = Vec::new();
    let mut events: HashMap<String, EventAccumulator> = HashMap::new();

    for record in records {
        let entry = events.entry(record.event_id.clone()).or_insert_with(|| {
            order.push(record.event_id.clone());
            EventAccumulator {
                event_name: catalog.display_name(&record.event_id, record.event_name.as_deref()),
                ..EventAccumulator::default()
            }
        });

        push_finite(&mut entry.ratings, record.rating);
        push_finite(&mut entry.event_experiences, record.event_experience);
        push_finite(&mut entry.speaker_interactions, record.speaker_interaction);
        push_finite(&mut entry.session_relevances, record.session_relevance);

        if let Some(user_id) = record.user_id.as_deref().filter(|id| !id.is_empty()) {
            entry.user_ids.insert(user_id.to_string());
        }
        if !record.suggestions.is_empty() {
            entry.suggestions.push(record.suggestions.clone());
        }
        entry.count += 1;
    }

    order
        .into_iter()
        .filter_map(|event_id| {
            let event = events.remove(&event_id)?;
            let averages = RatingAverages {
                rating: mean(&event.ratings),
                event_experience: mean(&event.event_experiences),
                speaker_interaction: mean(&event.speaker_interactions),
                session_relevance: mean(&event.session_relevances),
            };

            Some(EventAggregate {
                event_id,
                event_name: event.event_name,
                rating_distribution: rating_distribution(event.ratings.iter().copied(), bucketing),
                count: event.count,
                unique_users: event.user_ids.len(),
                suggestions: event.suggestions,
                sentiment_score: averages.rating / 5.0 * 100.0,
                averages,
            })
        })
        .collect()
}

pub fn total_unique_users(aggregates: &[EventAggregate]) -> usize {
    aggregates.iter().map(|event| event.unique_users).sum()
}

/// Highest average rating first; ties keep their grouping order.
pub fn rank_by_rating(mut aggregates: Vec<EventAggregate>) -> Vec<EventAggregate> {
    aggregates.sort_by(|a, b| {
        b.averages
            .rating
            .partial_cmp(&a.averages.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    aggregates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventDetails;

    fn feedback(event_id: &str, rating: f64, user_id: Option<&str>) -> FeedbackRecord {
        FeedbackRecord {
            id: format!("{event_id}-{rating}"),
            event_id: event_id.to_string(),
            event_name: Some("Embedded Name".to_string()),
            rating,
            event_experience: 4.0,
            speaker_interaction: 3.0,
            session_relevance: 5.0,
            suggestions: String::new(),
            created_at: None,
            user_id: user_id.map(str::to_string),
        }
    }

    #[test]
    fn overall_averages_skip_missing_values() {
        let records = vec![
            feedback("E1", 4.0, None),
            feedback("E1", 5.0, None),
            feedback("E2", f64::NAN, None),
        ];

        let averages = overall_averages(&records);
        assert_eq!(averages.rating, 4.5);
        assert_eq!(finite_values(&records, RatingDimension::Rating).len(), 2);
        assert_eq!(averages.event_experience, 4.0);
        assert_eq!(averages.session_relevance, 5.0);
    }

    #[test]
    fn overall_averages_are_zero_without_data() {
        assert_eq!(overall_averages(&[]), RatingAverages::default());
    }

    #[test]
    fn averages_round_to_one_decimal() {
        let records = vec![
            feedback("E1", 4.0, None),
            feedback("E1", 4.0, None),
            feedback("E1", 5.0, None),
        ];
        assert_eq!(overall_averages(&records).rating, 4.3);
    }

    #[test]
    fn rounding_follows_the_exact_decimal_value() {
        // 87 / 20 is stored just below 4.35.
        assert_eq!(round_one_decimal(87.0 / 20.0), 4.3);
        assert_eq!(round_one_decimal(4.35), 4.3);
        assert_eq!(round_one_decimal(17.0 / 4.0), 4.3);
        assert_eq!(round_one_decimal(4.75), 4.8);
        assert_eq!(round_one_decimal(3.96), 4.0);
        assert_eq!(round_one_decimal(2.0), 2.0);
    }

    #[test]
    fn near_tie_average_feeds_sentiment_score() {
        let mut records = vec![feedback("E1", 5.0, None); 7];
        records.extend(vec![feedback("E1", 4.0, None); 13]);

        let catalog = EventCatalog::new();
        let aggregates = per_event_aggregates(&records, &catalog, Bucketing::Round);
        let event = &aggregates[0];

        assert_eq!(event.averages.rating, 4.3);
        assert!((event.sentiment_score - 86.0).abs() < 1e-9);
        assert_eq!(overall_averages(&records).rating, 4.3);
    }

    #[test]
    fn per_event_average_and_sentiment_score() {
        let records = vec![
            feedback("E1", 3.0, Some("u1")),
            feedback("E1", 5.0, Some("u2")),
        ];

        let catalog = EventCatalog::new();
        let aggregates = per_event_aggregates(&records, &catalog, Bucketing::Floor);
        assert_eq!(aggregates.len(), 1);
        let event = &aggregates[0];
        assert_eq!(event.averages.rating, 4.0);
        assert_eq!(event.sentiment_score, 80.0);
        assert_eq!(event.count, 2);
        assert_eq!(event.unique_users, 2);
        assert_eq!(event.rating_distribution, [0, 0, 1, 0, 1]);
    }

    #[test]
    fn unique_users_ignore_repeats_and_missing_ids() {
        let records = vec![
            feedback("E1", 4.0, Some("u1")),
            feedback("E1", 4.0, Some("u1")),
            feedback("E1", 4.0, None),
            feedback("E1", 4.0, Some("")),
        ];

        let catalog = EventCatalog::new();
        let aggregates = per_event_aggregates(&records, &catalog, Bucketing::Round);
        assert_eq!(aggregates[0].unique_users, 1);
        assert_eq!(aggregates[0].count, 4);
    }

    #[test]
    fn groups_keep_first_seen_order_and_resolve_names() {
        let details = EventDetails {
            title: Some("Resume Building Session".to_string()),
            ..EventDetails::default()
        };
        let catalog: EventCatalog = [("E2".to_string(), details)].into_iter().collect();

        let mut orphan = feedback("E3", 2.0, None);
        orphan.event_name = None;
        let records = vec![
            feedback("E2", 5.0, None),
            feedback("E1", 4.0, None),
            orphan,
        ];

        let aggregates = per_event_aggregates(&records, &catalog, Bucketing::Round);
        assert_eq!(aggregates.len(), 3);
        assert_eq!(aggregates[0].event_name, "Resume Building Session");
        assert_eq!(aggregates[1].event_name, "Embedded Name");
        assert_eq!(aggregates[2].event_name, "Unknown Event");
    }

    #[test]
    fn suggestions_are_collected_when_present() {
        let mut with_note = feedback("E1", 4.0, None);
        with_note.suggestions = "More hands-on time".to_string();
        let records = vec![with_note, feedback("E1", 5.0, None)];

        let catalog = EventCatalog::new();
        let aggregates = per_event_aggregates(&records, &catalog, Bucketing::Round);
        assert_eq!(aggregates[0].suggestions, ["More hands-on time"]);
    }

    #[test]
    fn round_and_floor_bucket_fractional_ratings_differently() {
        let values = [0.2, 0.6, 1.5, 4.5, 4.9, 5.0, 5.4, -1.0, f64::NAN];

        let rounded = rating_distribution(values, Bucketing::Round);
        let floored = rating_distribution(values, Bucketing::Floor);
        assert_eq!(rounded, [1, 1, 0, 0, 4]);
        assert_eq!(floored, [1, 0, 0, 2, 1]);
    }

    #[test]
    fn legacy_policy_floors_per_event_only() {
        let legacy = BucketingPolicy::legacy();
        assert_eq!(legacy.global, Bucketing::Round);
        assert_eq!(legacy.per_event, Bucketing::Floor);
        assert_eq!(BucketingPolicy::default(), BucketingPolicy::unified());
    }

    #[test]
    fn valid_feedback_drops_non_positive_or_missing_ratings() {
        let mut zero = feedback("E1", 4.0, None);
        zero.speaker_interaction = 0.0;
        let records = vec![
            feedback("E1", 4.0, None),
            zero,
            feedback("E2", f64::NAN, None),
        ];

        let valid = valid_feedback(&records);
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].event_id, "E1");
    }

    #[test]
    fn ranking_and_unique_user_totals() {
        let records = vec![
            feedback("E1", 3.0, Some("u1")),
            feedback("E2", 5.0, Some("u1")),
            feedback("E2", 5.0, Some("u2")),
        ];

        let catalog = EventCatalog::new();
        let aggregates = per_event_aggregates(&records, &catalog, Bucketing::Round);
        let ranked = rank_by_rating(aggregates);
        assert_eq!(ranked[0].event_id, "E2");
        assert_eq!(ranked[1].event_id, "E1");
        assert_eq!(total_unique_users(&ranked), 3);
    }
}
