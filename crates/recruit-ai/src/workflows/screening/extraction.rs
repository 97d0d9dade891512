//! The language-understanding seam. Classifying a free-text answer is a
//! judgment call delegated to whatever model backs this trait; the engine
//! only depends on the fixed signal shapes returned here, so the state
//! machine and scorer stay testable against pre-extracted signals.

use super::domain::{AnswerQuality, CandidateUpdate, ExperienceLevel, MandatoryRequirement};

/// Classification of one mandatory-question answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MandatoryAnswer {
    Pass,
    Fail { reason: String },
    /// Neither a clear pass nor fail; the orchestrator asks exactly one
    /// clarifying follow-up before classifying.
    Ambiguous,
}

/// Identity details recognized in an utterance. All optional: the opening
/// phase keeps asking until the required pieces arrive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityFacts {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Assessment of the combined delivery/courier experience answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExperienceAnswer {
    pub delivery: bool,
    pub courier: bool,
    pub level: ExperienceLevel,
}

/// Assessment of the time-management/organization answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrganizationAnswer {
    pub time_management: bool,
    pub organization: bool,
    pub quality: AnswerQuality,
}

/// Assessment of the independent-work answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndependenceAnswer {
    pub independent: bool,
    pub quality: AnswerQuality,
}

/// Opaque natural-language-understanding capability consumed by the
/// orchestrator. Implementations range from the keyword heuristics in the
/// service binary to a hosted language model; the contract is only that the
/// returned shapes are deterministic for a given utterance.
pub trait AnswerClassifier: Send + Sync {
    fn identity(&self, utterance: &str) -> IdentityFacts;

    fn mandatory(&self, requirement: MandatoryRequirement, utterance: &str) -> MandatoryAnswer;

    fn experience(&self, utterance: &str) -> ExperienceAnswer;

    fn organization(&self, utterance: &str) -> OrganizationAnswer;

    fn independence(&self, utterance: &str) -> IndependenceAnswer;

    /// Detects a correction of previously supplied information ("actually,
    /// I am available on weekends"). Returns the field-scoped update to
    /// apply, or `None` when the utterance is a plain answer.
    fn correction(&self, utterance: &str) -> Option<CandidateUpdate>;

    /// Flags utterances outside the screening scope so the orchestrator can
    /// steer the conversation back.
    fn off_topic(&self, _utterance: &str) -> bool {
        false
    }
}
