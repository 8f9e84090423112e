//! Scoring Module
//!
//! Heuristic band scoring for writing and speaking submissions: surface
//! statistics mapped through saturating linear formulas into 0.5-step
//! bands. The keyword lists and mapping constants are tuning knobs, not
//! contracts; only the shape of the computation is fixed.

mod feedback;
mod heuristic;
mod stats;

#[cfg(test)]
mod property_tests;

pub use heuristic::{assess, criteria_for, round_half, BandBreakdown, Criterion, CriterionScore};
pub use stats::TextStats;

// == Scoring Config ==
/// Keyword lists and mapping constants for the band heuristic.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Less-common vocabulary that signals lexical range
    pub sophistication_keywords: Vec<String>,
    /// Linking devices that signal cohesion
    pub cohesion_keywords: Vec<String>,
    /// Submissions longer than this many characters are capped
    pub max_input_chars: usize,
    /// Lowest band any criterion can score
    pub band_floor: f64,
    /// Saturation point of the linear formulas
    pub band_cap: f64,
    /// Upper clamp for reported bands
    pub band_max: f64,
    /// Word count at which the length formula saturates
    pub target_word_count: f64,
    /// Average sentence length at which the grammar formula saturates
    pub target_sentence_length: f64,
    /// Band contribution of a saturated length ratio
    pub length_scale: f64,
    /// Band contribution per sophistication keyword present
    pub sophistication_step: f64,
    /// Band contribution per cohesion keyword present
    pub cohesion_step: f64,
    /// Criteria at or above this band are reported as strengths
    pub strength_threshold: f64,
    /// Criteria below this band are reported as improvements
    pub improvement_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            sophistication_keywords: to_strings(&[
                "furthermore",
                "moreover",
                "nevertheless",
                "consequently",
                "substantial",
                "significant",
                "demonstrate",
                "fundamental",
                "comprehensive",
                "perspective",
                "implication",
                "phenomenon",
            ]),
            cohesion_keywords: to_strings(&[
                "however",
                "therefore",
                "in addition",
                "firstly",
                "secondly",
                "finally",
                "in conclusion",
                "on the other hand",
                "for example",
                "as a result",
            ]),
            max_input_chars: 20_000,
            band_floor: 6.0,
            band_cap: 8.5,
            band_max: 9.0,
            target_word_count: 300.0,
            target_sentence_length: 20.0,
            length_scale: 2.5,
            sophistication_step: 0.5,
            cohesion_step: 0.75,
            strength_threshold: 7.5,
            improvement_threshold: 6.5,
        }
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_consistent() {
        let config = ScoringConfig::default();

        assert!(config.band_floor < config.band_cap);
        assert!(config.band_cap <= config.band_max);
        assert!(config.improvement_threshold < config.strength_threshold);
        assert!(!config.sophistication_keywords.is_empty());
        assert!(!config.cohesion_keywords.is_empty());
    }
}
