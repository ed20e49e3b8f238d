use crate::lexicon::{count_hits, NEGATIVE_WORDS, POSITIVE_WORDS};
use crate::models::{Sentiment, SentimentResult};

/// Keyword classifier used whenever the remote scorer is unavailable.
///
/// Hits are substring matches, so "thankful" counts for "thank". The score is the hit balance
/// per whitespace token shifted around 0.5 and clamped to `[0, 1]`.
pub fn classify(text: &str) -> SentimentResult {
    let lowered = text.to_lowercase();
    let positive = count_hits(&lowered, POSITIVE_WORDS) as f64;
    let negative = count_hits(&lowered, NEGATIVE_WORDS) as f64;

    let total_words = lowered.split_whitespace().count().max(1) as f64;
    let score = ((positive - negative) / total_words + 0.5).clamp(0.0, 1.0);

    SentimentResult {
        sentiment: Sentiment::from_score(score),
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_workshop_feedback() {
        let result = classify("This workshop was great and helpful");
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert!((result.score - (2.0 / 6.0 + 0.5)).abs() < 1e-9);
    }

    #[test]
    fn negative_hits_pull_below_threshold() {
        let result = classify("Boring and confusing");
        assert_eq!(result.sentiment, Sentiment::Negative);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn no_hits_is_neutral_half() {
        let result = classify("The room was on the second floor");
        assert_eq!(result, SentimentResult::neutral());
    }

    #[test]
    fn matches_inside_longer_words_and_ignores_case() {
        let result = classify("THANKFUL");
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn empty_text_counts_as_one_token() {
        assert_eq!(classify(""), SentimentResult::neutral());
        assert_eq!(classify("   "), SentimentResult::neutral());
    }

    #[test]
    fn mixed_hits_cancel_out() {
        let result = classify("good speaker but bad audio quality overall");
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.score, 0.5);
    }

    #[test]
    fn deterministic_and_bounded() {
        let samples = [
            "",
            "great",
            "awful awful awful",
            "I love it, best event, thank you, wonderful, amazing",
            "waste of time, worst, useless, poor and bad",
            "Helpful but a bit difficult to follow at times",
        ];

        for text in samples {
            let first = classify(text);
            let second = classify(text);
            assert_eq!(first, second);
            assert!((0.0..=1.0).contains(&first.score));
            assert_eq!(first.sentiment, Sentiment::from_score(first.score));
        }
    }
}
