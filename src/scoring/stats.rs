//! Surface Statistics Module
//!
//! Counts the text features the band heuristic maps into scores. All
//! counting floors at zero and guards against empty input, so downstream
//! formulas never divide by zero.

use crate::scoring::ScoringConfig;

// == Text Stats ==
/// Surface statistics for one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStats {
    /// Whitespace-separated word count
    pub word_count: usize,
    /// Number of `.` `!` `?` terminators
    pub sentence_count: usize,
    /// Words per sentence; sentence count is floored at 1
    pub avg_sentence_length: f64,
    /// How many sophistication-list keywords appear at least once
    pub sophistication_hits: usize,
    /// How many cohesion-list keywords appear at least once
    pub cohesion_hits: usize,
}

impl TextStats {
    /// Analyzes text against the configured keyword lists.
    ///
    /// Input longer than the configured maximum is capped, never rejected.
    pub fn analyze(text: &str, config: &ScoringConfig) -> Self {
        let text = cap_chars(text, config.max_input_chars);
        let lower = text.to_lowercase();

        let word_count = text.split_whitespace().count();
        let sentence_count = text.chars().filter(|c| matches!(c, '.' | '!' | '?')).count();
        let avg_sentence_length = word_count as f64 / sentence_count.max(1) as f64;

        let sophistication_hits = presence_count(&lower, &config.sophistication_keywords);
        let cohesion_hits = presence_count(&lower, &config.cohesion_keywords);

        Self {
            word_count,
            sentence_count,
            avg_sentence_length,
            sophistication_hits,
            cohesion_hits,
        }
    }
}

/// Number of keywords from the list that occur in the text. Each keyword
/// counts once no matter how often it repeats.
fn presence_count(lower_text: &str, keywords: &[String]) -> usize {
    keywords
        .iter()
        .filter(|keyword| lower_text.contains(keyword.as_str()))
        .count()
}

/// Returns at most `max_chars` characters of the input, respecting char
/// boundaries.
fn cap_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScoringConfig {
        ScoringConfig::default()
    }

    #[test]
    fn test_basic_counts() {
        let stats = TextStats::analyze("One two three. Four five! Six?", &config());

        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.sentence_count, 3);
        assert!((stats.avg_sentence_length - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_text_floors_at_zero() {
        let stats = TextStats::analyze("", &config());

        assert_eq!(stats.word_count, 0);
        assert_eq!(stats.sentence_count, 0);
        assert_eq!(stats.avg_sentence_length, 0.0);
        assert_eq!(stats.sophistication_hits, 0);
        assert_eq!(stats.cohesion_hits, 0);
    }

    #[test]
    fn test_whitespace_only_text() {
        let stats = TextStats::analyze("   \n\t  ", &config());
        assert_eq!(stats.word_count, 0);
        assert_eq!(stats.sentence_count, 0);
    }

    #[test]
    fn test_no_terminators_uses_floor_guard() {
        let stats = TextStats::analyze("ten words without any sentence ending here at all yes", &config());
        assert_eq!(stats.sentence_count, 0);
        assert!((stats.avg_sentence_length - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_keyword_presence_counted_once() {
        // "however" repeated still counts as a single cohesion hit
        let stats = TextStats::analyze(
            "However the plan failed. However we tried. Therefore we adapted.",
            &config(),
        );
        assert_eq!(stats.cohesion_hits, 2);
    }

    #[test]
    fn test_keyword_matching_is_case_insensitive() {
        let stats = TextStats::analyze("FURTHERMORE this is SIGNIFICANT.", &config());
        assert!(stats.sophistication_hits >= 2);
    }

    #[test]
    fn test_long_input_capped_not_rejected() {
        let config = config();
        let long = "word ".repeat(100_000);

        let stats = TextStats::analyze(&long, &config);

        // 5 chars per repeat: the cap bounds the effective word count
        assert!(stats.word_count <= config.max_input_chars / 5 + 1);
        assert!(stats.word_count > 0);
    }

    #[test]
    fn test_cap_respects_char_boundaries() {
        let text = "é".repeat(50);
        let capped = cap_chars(&text, 10);
        assert_eq!(capped.chars().count(), 10);
    }
}
