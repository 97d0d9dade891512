use super::super::domain::{
    AnswerQuality, ExperienceLevel, MandatoryAssessment, MandatoryBreakdownEntry,
    PreferredAssessment, PreferredBreakdownEntry, PreferredCategory, PreferredSignals,
    RequirementOutcome,
};
use super::config::ScoringConfig;

pub(crate) fn mandatory_breakdown(assessment: &MandatoryAssessment) -> Vec<MandatoryBreakdownEntry> {
    assessment
        .iter()
        .map(|(requirement, outcome)| match outcome {
            RequirementOutcome::Passed => MandatoryBreakdownEntry {
                requirement,
                passed: true,
                reason: format!("confirmed {}", requirement.label()),
            },
            RequirementOutcome::Failed { reason } => MandatoryBreakdownEntry {
                requirement,
                passed: false,
                reason: reason.clone(),
            },
            // Never fabricate detail for questions the interview skipped.
            RequirementOutcome::NotReached => MandatoryBreakdownEntry {
                requirement,
                passed: false,
                reason: "not reached".to_string(),
            },
        })
        .collect()
}

pub(crate) fn preferred_breakdown(
    signals: &PreferredSignals,
    assessment: &PreferredAssessment,
    config: &ScoringConfig,
) -> (Vec<PreferredBreakdownEntry>, u8) {
    let experience_present = signals.has_delivery_experience
        || signals.has_courier_experience
        || assessment.experience != ExperienceLevel::None;
    let time_management_present = signals.has_time_management_skills
        || signals.has_organizational_skills
        || assessment.time_management != AnswerQuality::NotDemonstrated;
    let independent_present =
        signals.can_work_independently || assessment.independent_work != AnswerQuality::NotDemonstrated;

    let entries = vec![
        PreferredBreakdownEntry {
            category: PreferredCategory::Experience,
            present: experience_present,
            points: assessment.experience.points(),
        },
        PreferredBreakdownEntry {
            category: PreferredCategory::TimeManagement,
            present: time_management_present,
            points: assessment.time_management.points(),
        },
        PreferredBreakdownEntry {
            category: PreferredCategory::IndependentWork,
            present: independent_present,
            points: assessment.independent_work.points(),
        },
    ];

    let total: u8 = entries.iter().map(|entry| entry.points).sum();
    (entries, total.min(config.preferred_cap))
}
