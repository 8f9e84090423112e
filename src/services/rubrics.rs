//! Rubric Seeding Module
//!
//! Builds the examiner rubrics loaded into the rubrics table at startup.
//! Descriptors are public IELTS-style band language, condensed to the
//! bands this backend can actually award.

use std::collections::BTreeMap;

use crate::models::{AssessmentType, CriterionRubric, Rubric};
use crate::scoring::{criteria_for, Criterion};

/// Rubrics for all four assessment types.
pub fn default_rubrics() -> Vec<Rubric> {
    AssessmentType::ALL
        .into_iter()
        .map(|kind| Rubric {
            assessment_type: kind.as_str().to_string(),
            rubric_id: format!("ielts_{}_v2024", kind.as_str()),
            criteria: criteria_for(kind)
                .into_iter()
                .map(criterion_rubric)
                .collect(),
            examiner_prompt: examiner_prompt(kind).to_string(),
        })
        .collect()
}

fn criterion_rubric(criterion: Criterion) -> CriterionRubric {
    let descriptors: [(u8, &str); 4] = match criterion {
        Criterion::TaskAchievement => [
            (9, "Fully satisfies all requirements with a fully developed response."),
            (8, "Covers all requirements with a well-developed response."),
            (7, "Covers the requirements and presents a clear position throughout."),
            (6, "Addresses the requirements though some parts are underdeveloped."),
        ],
        Criterion::CoherenceAndCohesion => [
            (9, "Sequences ideas effortlessly; cohesion attracts no attention."),
            (8, "Sequences information logically; manages all aspects of cohesion well."),
            (7, "Logically organises information; uses a range of cohesive devices."),
            (6, "Arranges information coherently but cohesion may be mechanical."),
        ],
        Criterion::FluencyAndCoherence => [
            (9, "Speaks fluently with only rare repetition or self-correction."),
            (8, "Speaks fluently with only occasional repetition or self-correction."),
            (7, "Speaks at length without noticeable effort or loss of coherence."),
            (6, "Speaks at length though may show hesitation and lose progression."),
        ],
        Criterion::LexicalResource => [
            (9, "Uses vocabulary with full flexibility and precision in all topics."),
            (8, "Uses a wide range of vocabulary fluently to convey precise meanings."),
            (7, "Uses vocabulary flexibly to discuss a variety of topics."),
            (6, "Has a wide enough vocabulary to discuss topics at length."),
        ],
        Criterion::GrammaticalRangeAndAccuracy => [
            (9, "Uses a wide range of structures with full flexibility and accuracy."),
            (8, "Uses a wide range of structures with the majority error-free."),
            (7, "Uses a range of complex structures with some flexibility."),
            (6, "Uses a mix of simple and complex structures with some errors."),
        ],
        Criterion::Pronunciation => [
            (9, "Uses a wide range of pronunciation features with precise control."),
            (8, "Uses a wide range of pronunciation features flexibly."),
            (7, "Shows all positive features with sustained ability."),
            (6, "Uses a range of pronunciation features with mixed control."),
        ],
    };

    CriterionRubric {
        name: criterion.as_str().to_string(),
        band_descriptors: descriptors
            .into_iter()
            .map(|(band, text)| (band, text.to_string()))
            .collect::<BTreeMap<u8, String>>(),
    }
}

fn examiner_prompt(kind: AssessmentType) -> &'static str {
    match kind {
        AssessmentType::AcademicWriting => {
            "You are an IELTS Academic Writing examiner. Evaluate Task Achievement, Coherence \
             and Cohesion, Lexical Resource, and Grammatical Range and Accuracy, and provide \
             band scores with detailed feedback."
        }
        AssessmentType::GeneralWriting => {
            "You are an IELTS General Training Writing examiner. Focus on practical written \
             communication: letters and everyday essay topics, scored on the four writing \
             criteria."
        }
        AssessmentType::AcademicSpeaking => {
            "You are Maya, an experienced IELTS examiner conducting a speaking assessment. \
             Follow the three-part format: familiar topics, a long turn, then abstract \
             discussion."
        }
        AssessmentType::GeneralSpeaking => {
            "You are Maya, an IELTS examiner for General Training. Focus on everyday \
             situations, practical English usage, and social contexts."
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_rubric_per_type() {
        let rubrics = default_rubrics();
        assert_eq!(rubrics.len(), 4);

        for kind in AssessmentType::ALL {
            assert!(rubrics.iter().any(|r| r.assessment_type == kind.as_str()));
        }
    }

    #[test]
    fn test_rubrics_cover_scored_criteria() {
        for rubric in default_rubrics() {
            let kind = AssessmentType::parse(&rubric.assessment_type).unwrap();
            let expected = criteria_for(kind);

            assert_eq!(rubric.criteria.len(), 4);
            for (criterion, entry) in expected.iter().zip(&rubric.criteria) {
                assert_eq!(entry.name, criterion.as_str());
                assert!(entry.band_descriptors.contains_key(&6));
                assert!(entry.band_descriptors.contains_key(&9));
            }
            assert!(!rubric.examiner_prompt.is_empty());
        }
    }
}
