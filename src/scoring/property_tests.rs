//! Property-Based Tests for the Scoring Module
//!
//! Uses proptest to verify the band heuristic's hard guarantees across
//! arbitrary input text.

use proptest::prelude::*;

use crate::models::AssessmentType;
use crate::scoring::{assess, round_half, ScoringConfig};

fn kind_strategy() -> impl Strategy<Value = AssessmentType> {
    prop_oneof![
        Just(AssessmentType::AcademicWriting),
        Just(AssessmentType::GeneralWriting),
        Just(AssessmentType::AcademicSpeaking),
        Just(AssessmentType::GeneralSpeaking),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Same input always yields the same breakdown.
    #[test]
    fn prop_deterministic(text in ".{0,400}", kind in kind_strategy()) {
        let config = ScoringConfig::default();

        let first = assess(&text, kind, None, &config);
        let second = assess(&text, kind, None, &config);

        prop_assert_eq!(first, second);
    }

    // Every band stays in [6.0, 9.0] in 0.5 steps, and the overall band
    // is the rounded mean of the four criteria.
    #[test]
    fn prop_band_invariants(text in ".{0,400}", kind in kind_strategy()) {
        let config = ScoringConfig::default();
        let result = assess(&text, kind, None, &config);

        prop_assert_eq!(result.criteria.len(), 4);
        for score in &result.criteria {
            prop_assert!(score.band >= 6.0 && score.band <= 9.0);
            let doubled = score.band * 2.0;
            prop_assert!((doubled - doubled.round()).abs() < 1e-9);
        }

        prop_assert!(result.overall_band >= 6.0 && result.overall_band <= 9.0);
        let mean = result.criteria.iter().map(|c| c.band).sum::<f64>() / 4.0;
        prop_assert_eq!(result.overall_band, round_half(mean));
    }

    // No input raises or produces an empty narrative.
    #[test]
    fn prop_feedback_always_present(text in ".{0,400}", kind in kind_strategy()) {
        let config = ScoringConfig::default();
        let result = assess(&text, kind, None, &config);

        prop_assert!(!result.feedback.is_empty());
    }
}
