use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for stored candidate records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

/// Case-insensitive email identity key. Construction validates syntax and
/// normalizes to lowercase so the store never sees two spellings of one
/// candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(raw: &str) -> Result<Self, EmailParseError> {
        let trimmed = raw.trim();
        let (local, domain) = trimmed
            .split_once('@')
            .ok_or_else(|| EmailParseError(trimmed.to_string()))?;
        let domain_ok = domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && domain.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
        if local.is_empty() || domain.is_empty() || !domain_ok || local.contains(char::is_whitespace)
        {
            return Err(EmailParseError(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("'{0}' is not a valid email address")]
pub struct EmailParseError(pub String);

/// Contact details gathered during the opening phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateIdentity {
    pub first_name: String,
    pub last_name: String,
    pub email: EmailAddress,
    pub phone: Option<String>,
}

impl CandidateIdentity {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The seven pass/fail gates, in canonical interview order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MandatoryRequirement {
    AgeAtLeast21,
    ValidDriversLicense,
    CleanDrivingRecord,
    BackgroundScreening,
    DrugScreening,
    Lift150Lbs,
    ScheduleAvailability,
}

impl MandatoryRequirement {
    pub const ALL: [MandatoryRequirement; 7] = [
        MandatoryRequirement::AgeAtLeast21,
        MandatoryRequirement::ValidDriversLicense,
        MandatoryRequirement::CleanDrivingRecord,
        MandatoryRequirement::BackgroundScreening,
        MandatoryRequirement::DrugScreening,
        MandatoryRequirement::Lift150Lbs,
        MandatoryRequirement::ScheduleAvailability,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            MandatoryRequirement::AgeAtLeast21 => "age 21 or older",
            MandatoryRequirement::ValidDriversLicense => "valid driver's license",
            MandatoryRequirement::CleanDrivingRecord => "clean driving record",
            MandatoryRequirement::BackgroundScreening => "background screening",
            MandatoryRequirement::DrugScreening => "drug screening",
            MandatoryRequirement::Lift150Lbs => "lift up to 150 lbs",
            MandatoryRequirement::ScheduleAvailability => "weekend and long-shift availability",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            MandatoryRequirement::AgeAtLeast21 => 0,
            MandatoryRequirement::ValidDriversLicense => 1,
            MandatoryRequirement::CleanDrivingRecord => 2,
            MandatoryRequirement::BackgroundScreening => 3,
            MandatoryRequirement::DrugScreening => 4,
            MandatoryRequirement::Lift150Lbs => 5,
            MandatoryRequirement::ScheduleAvailability => 6,
        }
    }
}

/// Per-requirement result of the mandatory assessment phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequirementOutcome {
    Passed,
    Failed { reason: String },
    NotReached,
}

impl RequirementOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, RequirementOutcome::Passed)
    }
}

/// Fixed-arity view of the mandatory gates, one slot per requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MandatoryAssessment {
    outcomes: [RequirementOutcome; 7],
}

impl Default for MandatoryAssessment {
    fn default() -> Self {
        Self {
            outcomes: std::array::from_fn(|_| RequirementOutcome::NotReached),
        }
    }
}

impl MandatoryAssessment {
    pub fn record(&mut self, requirement: MandatoryRequirement, outcome: RequirementOutcome) {
        self.outcomes[requirement.index()] = outcome;
    }

    pub fn outcome(&self, requirement: MandatoryRequirement) -> &RequirementOutcome {
        &self.outcomes[requirement.index()]
    }

    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(RequirementOutcome::passed)
    }

    pub fn first_failure(&self) -> Option<(MandatoryRequirement, &str)> {
        MandatoryRequirement::ALL.iter().find_map(|req| {
            match self.outcome(*req) {
                RequirementOutcome::Failed { reason } => Some((*req, reason.as_str())),
                _ => None,
            }
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (MandatoryRequirement, &RequirementOutcome)> {
        MandatoryRequirement::ALL
            .iter()
            .map(move |req| (*req, self.outcome(*req)))
    }

    /// Convenience constructor for pre-extracted signals: `true` becomes a
    /// pass, `false` a failure citing the requirement itself.
    pub fn from_booleans(values: [bool; 7]) -> Self {
        let mut assessment = Self::default();
        for (req, value) in MandatoryRequirement::ALL.iter().zip(values) {
            let outcome = if value {
                RequirementOutcome::Passed
            } else {
                RequirementOutcome::Failed {
                    reason: format!("did not meet {}", req.label()),
                }
            };
            assessment.record(*req, outcome);
        }
        assessment
    }
}

/// The five raw preferred signals captured from the conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferredSignals {
    pub has_delivery_experience: bool,
    pub has_courier_experience: bool,
    pub has_time_management_skills: bool,
    pub has_organizational_skills: bool,
    pub can_work_independently: bool,
}

/// The three scored preferred categories. Delivery and courier experience
/// collapse into one category; time management and organization likewise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PreferredCategory {
    Experience,
    TimeManagement,
    IndependentWork,
}

impl PreferredCategory {
    pub const ALL: [PreferredCategory; 3] = [
        PreferredCategory::Experience,
        PreferredCategory::TimeManagement,
        PreferredCategory::IndependentWork,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            PreferredCategory::Experience => "delivery/courier experience",
            PreferredCategory::TimeManagement => "time management",
            PreferredCategory::IndependentWork => "independent work",
        }
    }
}

/// Qualitative rating of the combined delivery/courier experience answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[default]
    None,
    Limited,
    OneYearPlus,
}

impl ExperienceLevel {
    pub const fn points(self) -> u8 {
        match self {
            ExperienceLevel::None => 0,
            ExperienceLevel::Limited => 10,
            ExperienceLevel::OneYearPlus => 20,
        }
    }
}

/// Qualitative rating of a free-text preferred answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnswerQuality {
    #[default]
    NotDemonstrated,
    Adequate,
    Strong,
}

impl AnswerQuality {
    pub const fn points(self) -> u8 {
        match self {
            AnswerQuality::NotDemonstrated => 0,
            AnswerQuality::Adequate => 8,
            AnswerQuality::Strong => 15,
        }
    }
}

/// Category-level assessments feeding the preferred half of the rubric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferredAssessment {
    pub experience: ExperienceLevel,
    pub time_management: AnswerQuality,
    pub independent_work: AnswerQuality,
}

/// One line of the mandatory breakdown persisted with every evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MandatoryBreakdownEntry {
    pub requirement: MandatoryRequirement,
    pub passed: bool,
    pub reason: String,
}

/// One line of the preferred breakdown persisted with every evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferredBreakdownEntry {
    pub category: PreferredCategory,
    pub present: bool,
    pub points: u8,
}

/// Evaluation output stored on a candidate record once scoring has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub is_qualified: bool,
    pub match_score: u8,
    pub mandatory_breakdown: Vec<MandatoryBreakdownEntry>,
    pub preferred_breakdown: Vec<PreferredBreakdownEntry>,
    pub reasoning: String,
    pub evaluated_at: DateTime<Utc>,
    pub evaluated_by: String,
}

/// Durable record for one candidate, keyed by email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: CandidateId,
    pub identity: CandidateIdentity,
    pub mandatory: MandatoryAssessment,
    pub preferred: PreferredSignals,
    pub assessment: PreferredAssessment,
    pub evaluation: Option<Evaluation>,
    pub created_at: DateTime<Utc>,
}

/// Field-scoped partial update applied to an existing record. `None` means
/// "leave untouched"; the orchestrator issues one of these per correction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,

    pub age_at_least_21: Option<bool>,
    pub has_valid_drivers_license: Option<bool>,
    pub has_clean_driving_record: Option<bool>,
    pub accepts_background_screening: Option<bool>,
    pub accepts_drug_screening: Option<bool>,
    pub can_lift_150_lbs: Option<bool>,
    pub has_schedule_availability: Option<bool>,

    pub has_delivery_experience: Option<bool>,
    pub has_courier_experience: Option<bool>,
    pub has_time_management_skills: Option<bool>,
    pub has_organizational_skills: Option<bool>,
    pub can_work_independently: Option<bool>,

    pub is_qualified: Option<bool>,
    pub match_score: Option<u8>,
    pub mandatory_breakdown: Option<Vec<MandatoryBreakdownEntry>>,
    pub preferred_breakdown: Option<Vec<PreferredBreakdownEntry>>,
    pub reasoning: Option<String>,
}

impl CandidateUpdate {
    pub fn is_empty(&self) -> bool {
        *self == CandidateUpdate::default()
    }

    /// Fields in the evaluation-outcome group; touching any of them
    /// re-stamps `evaluated_at`/`evaluated_by`.
    pub fn touches_evaluation(&self) -> bool {
        self.is_qualified.is_some()
            || self.match_score.is_some()
            || self.mandatory_breakdown.is_some()
            || self.preferred_breakdown.is_some()
    }

    /// True when a mandatory or preferred signal changed, which obliges the
    /// orchestrator to re-run scoring before persisting.
    pub fn touches_signals(&self) -> bool {
        self.mandatory_bool(MandatoryRequirement::AgeAtLeast21).is_some()
            || self.has_valid_drivers_license.is_some()
            || self.has_clean_driving_record.is_some()
            || self.accepts_background_screening.is_some()
            || self.accepts_drug_screening.is_some()
            || self.can_lift_150_lbs.is_some()
            || self.has_schedule_availability.is_some()
            || self.has_delivery_experience.is_some()
            || self.has_courier_experience.is_some()
            || self.has_time_management_skills.is_some()
            || self.has_organizational_skills.is_some()
            || self.can_work_independently.is_some()
    }

    pub fn mandatory_bool(&self, requirement: MandatoryRequirement) -> Option<bool> {
        match requirement {
            MandatoryRequirement::AgeAtLeast21 => self.age_at_least_21,
            MandatoryRequirement::ValidDriversLicense => self.has_valid_drivers_license,
            MandatoryRequirement::CleanDrivingRecord => self.has_clean_driving_record,
            MandatoryRequirement::BackgroundScreening => self.accepts_background_screening,
            MandatoryRequirement::DrugScreening => self.accepts_drug_screening,
            MandatoryRequirement::Lift150Lbs => self.can_lift_150_lbs,
            MandatoryRequirement::ScheduleAvailability => self.has_schedule_availability,
        }
    }

    /// Human-readable list of the touched fields, used for confirmation
    /// wording and tool summaries.
    pub fn touched_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.first_name.is_some() {
            fields.push("first name");
        }
        if self.last_name.is_some() {
            fields.push("last name");
        }
        if self.phone.is_some() {
            fields.push("phone");
        }
        for req in MandatoryRequirement::ALL {
            if self.mandatory_bool(req).is_some() {
                fields.push(req.label());
            }
        }
        if self.has_delivery_experience.is_some() {
            fields.push("delivery experience");
        }
        if self.has_courier_experience.is_some() {
            fields.push("courier experience");
        }
        if self.has_time_management_skills.is_some() {
            fields.push("time management");
        }
        if self.has_organizational_skills.is_some() {
            fields.push("organizational skills");
        }
        if self.can_work_independently.is_some() {
            fields.push("independent work");
        }
        if self.is_qualified.is_some() {
            fields.push("qualification status");
        }
        if self.match_score.is_some() {
            fields.push("match score");
        }
        if self.reasoning.is_some() {
            fields.push("reasoning");
        }
        fields
    }
}
