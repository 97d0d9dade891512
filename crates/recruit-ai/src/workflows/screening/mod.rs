//! Conversational screening for the delivery-driver role: a scripted
//! interview state machine, a deterministic scoring rubric, and the tool
//! layer that persists candidate evaluations through the repository
//! contract.

pub mod domain;
pub mod extraction;
pub mod orchestrator;
pub mod repository;
pub mod router;
pub(crate) mod scoring;
pub mod script;
pub mod session;
pub mod tools;

#[cfg(test)]
mod tests;

pub use domain::{
    AnswerQuality, CandidateId, CandidateIdentity, CandidateRecord, CandidateUpdate, EmailAddress,
    Evaluation, ExperienceLevel, MandatoryAssessment, MandatoryBreakdownEntry,
    MandatoryRequirement, PreferredAssessment, PreferredBreakdownEntry, PreferredCategory,
    PreferredSignals, RequirementOutcome,
};
pub use extraction::{
    AnswerClassifier, ExperienceAnswer, IdentityFacts, IndependenceAnswer, MandatoryAnswer,
    OrganizationAnswer,
};
pub use orchestrator::{
    AgentTurn, Conversation, ConversationTurn, ScreeningError, ScreeningOrchestrator,
    ToolInvocation, TurnRole,
};
pub use repository::{CandidateRepository, CandidateSummary, RepositoryError};
pub use router::screening_router;
pub use scoring::{ScoringConfig, ScoringEngine, ScoringInvariantError, ScoringOutcome};
pub use session::{InterviewPhase, ScreeningSession};
pub use tools::{CandidateTools, EvaluationInput, LookupReply, ToolReply};
