pub const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "amazing",
    "love",
    "enjoy",
    "helpful",
    "best",
    "fantastic",
    "wonderful",
    "thank",
    "appreciate",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "poor",
    "terrible",
    "awful",
    "hate",
    "worst",
    "disappointing",
    "useless",
    "boring",
    "waste",
    "difficult",
    "confusing",
];

/// Number of lexicon entries contained anywhere in `text`, which must already be lower-cased.
pub fn count_hits(text: &str, words: &[&str]) -> usize {
    words.iter().filter(|word| text.contains(*word)).count()
}
