use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::aggregate::{self, BucketingPolicy};
use crate::catalog::EventCatalog;
use crate::models::{FeedbackRecord, RatingDimension, Sentiment, SentimentBand, SentimentResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentMix {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

pub fn summarize_sentiments(results: &[SentimentResult]) -> SentimentMix {
    results
        .iter()
        .fold(SentimentMix::default(), |mut mix, result| {
            match result.sentiment {
                Sentiment::Positive => mix.positive += 1,
                Sentiment::Neutral => mix.neutral += 1,
                Sentiment::Negative => mix.negative += 1,
            }
            mix
        })
}

pub fn build_report(
    generated_at: DateTime<Utc>,
    records: &[FeedbackRecord],
    catalog: &EventCatalog,
    bucketing: BucketingPolicy,
    suggestion_sentiments: Option<&[SentimentResult]>,
) -> String {
    let averages = aggregate::overall_averages(records);
    let distribution =
        aggregate::rating_distribution(records.iter().map(|r| r.rating), bucketing.global);
    let events = aggregate::rank_by_rating(aggregate::per_event_aggregates(
        records,
        catalog,
        bucketing.per_event,
    ));

    let mut output = String::new();

    let _ = writeln!(output, "# Event Feedback Report");
    let _ = writeln!(
        output,
        "Generated {} from {} feedback entries",
        generated_at.format("%Y-%m-%d %H:%M UTC"),
        records.len()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Overview");

    for dimension in RatingDimension::ALL {
        let _ = writeln!(
            output,
            "- {}: {:.1}",
            dimension.label(),
            averages.get(dimension)
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Rating Distribution");

    let total: usize = distribution.iter().sum();
    if total == 0 {
        let _ = writeln!(output, "No ratings recorded.");
    } else {
        for (index, count) in distribution.iter().enumerate() {
            let stars = index + 1;
            let _ = writeln!(
                output,
                "- {} {}: {} ({:.0}%)",
                stars,
                if stars == 1 { "Star" } else { "Stars" },
                count,
                *count as f64 / total as f64 * 100.0
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Events");

    if events.is_empty() {
        let _ = writeln!(output, "No events with feedback.");
    } else {
        let _ = writeln!(
            output,
            "Total unique users: {}",
            aggregate::total_unique_users(&events)
        );
        let _ = writeln!(output);
        let _ = writeln!(
            output,
            "| Event | Responses | Users | Rating | Experience | Speaker | Relevance | Sentiment |"
        );
        let _ = writeln!(output, "|---|---|---|---|---|---|---|---|");
        for event in events.iter() {
            let _ = writeln!(
                output,
                "| {} | {} | {} | {:.1} | {:.1} | {:.1} | {:.1} | {:.0}% {} |",
                event.event_name,
                event.count,
                event.unique_users,
                event.averages.rating,
                event.averages.event_experience,
                event.averages.speaker_interaction,
                event.averages.session_relevance,
                event.sentiment_score,
                SentimentBand::from_score(event.sentiment_score).label()
            );
        }
    }

    if let Some(results) = suggestion_sentiments {
        let mix = summarize_sentiments(results);
        let _ = writeln!(output);
        let _ = writeln!(output, "## Suggestion Sentiment");
        if results.is_empty() {
            let _ = writeln!(output, "No suggestions to score.");
        } else {
            let _ = writeln!(output, "- positive: {}", mix.positive);
            let _ = writeln!(output, "- neutral: {}", mix.neutral);
            let _ = writeln!(output, "- negative: {}", mix.negative);
        }
    }

    output
}
