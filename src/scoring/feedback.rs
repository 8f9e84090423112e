//! Feedback Narrative Module
//!
//! Turns a scored breakdown into the learner-facing text: an overall
//! summary, and strength/improvement buckets selected by band threshold.

use crate::models::AssessmentType;
use crate::scoring::heuristic::{Criterion, CriterionScore};
use crate::scoring::ScoringConfig;

/// Builds (feedback, strengths, improvements) from the per-criterion bands.
///
/// Criteria at or above the strength threshold land in the strengths
/// bucket; criteria below the improvement threshold land in improvements.
pub fn build_feedback(
    kind: AssessmentType,
    scores: &[CriterionScore],
    overall_band: f64,
    config: &ScoringConfig,
) -> (String, Vec<String>, Vec<String>) {
    let mut feedback = format!(
        "Estimated overall band {:.1} for {}.",
        overall_band,
        kind_label(kind)
    );

    let mut strengths = Vec::new();
    let mut improvements = Vec::new();

    for score in scores {
        feedback.push_str(&format!(
            " {}: {:.1} — {}.",
            score.criterion.label(),
            score.band,
            level_fragment(score.band)
        ));

        if score.band >= config.strength_threshold {
            strengths.push(format!(
                "{} ({:.1}): {}",
                score.criterion.label(),
                score.band,
                strength_fragment(score.criterion)
            ));
        } else if score.band < config.improvement_threshold {
            improvements.push(format!(
                "{} ({:.1}): {}",
                score.criterion.label(),
                score.band,
                improvement_fragment(score.criterion)
            ));
        }
    }

    (feedback, strengths, improvements)
}

fn kind_label(kind: AssessmentType) -> &'static str {
    match kind {
        AssessmentType::AcademicWriting => "Academic Writing",
        AssessmentType::GeneralWriting => "General Training Writing",
        AssessmentType::AcademicSpeaking => "Academic Speaking",
        AssessmentType::GeneralSpeaking => "General Training Speaking",
    }
}

fn level_fragment(band: f64) -> &'static str {
    if band >= 8.0 {
        "performs at a very strong level"
    } else if band >= 7.0 {
        "shows good control with minor lapses"
    } else if band >= 6.5 {
        "is adequate but uneven"
    } else {
        "needs focused practice"
    }
}

fn strength_fragment(criterion: Criterion) -> &'static str {
    match criterion {
        Criterion::TaskAchievement => "the response develops the task fully and stays on topic",
        Criterion::FluencyAndCoherence => "ideas flow at length without losing the thread",
        Criterion::CoherenceAndCohesion => "linking devices connect ideas clearly",
        Criterion::LexicalResource => "precise, varied vocabulary conveys exact meanings",
        Criterion::GrammaticalRangeAndAccuracy => {
            "complex structures are handled with consistent accuracy"
        }
        Criterion::Pronunciation => "speech is chunked clearly and easy to follow",
    }
}

fn improvement_fragment(criterion: Criterion) -> &'static str {
    match criterion {
        Criterion::TaskAchievement => "develop each point further and answer every part of the task",
        Criterion::FluencyAndCoherence => "extend answers and reduce hesitation between ideas",
        Criterion::CoherenceAndCohesion => {
            "use a wider range of linking words to signal how ideas relate"
        }
        Criterion::LexicalResource => "work less-common vocabulary into familiar topics",
        Criterion::GrammaticalRangeAndAccuracy => {
            "mix simple and complex sentence forms and check agreement"
        }
        Criterion::Pronunciation => "practice stress and intonation on longer turns",
    }
}
