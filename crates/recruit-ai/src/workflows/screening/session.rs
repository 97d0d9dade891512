use serde::{Deserialize, Serialize};

use super::domain::{
    EmailAddress, MandatoryAssessment, MandatoryRequirement, PreferredAssessment, PreferredCategory,
    PreferredSignals,
};
use super::repository::CandidateSummary;

/// Interview phases. Linear with one early-exit edge:
/// `Opening -> Mandatory -> (EarlyExit | Preferred) -> Closing -> Persisted`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InterviewPhase {
    /// Greeting plus identity collection (name, then email).
    Opening,
    /// Walking the seven mandatory questions in canonical order.
    Mandatory {
        index: usize,
        /// Set after the single clarifying follow-up has been asked.
        awaiting_clarification: bool,
    },
    /// First confirmed failure; persistence of the disqualification is
    /// pending (stays here across turns if the store is unreachable).
    EarlyExit { requirement: MandatoryRequirement },
    /// The three preferred prompts, asked only when all gates passed.
    Preferred { index: usize },
    /// Decision summarized; persistence pending.
    Closing,
    /// Terminal. Exactly one create (or update) has succeeded.
    Persisted,
}

impl InterviewPhase {
    pub fn mandatory_requirement(index: usize) -> Option<MandatoryRequirement> {
        MandatoryRequirement::ALL.get(index).copied()
    }

    pub fn preferred_category(index: usize) -> Option<PreferredCategory> {
        PreferredCategory::ALL.get(index).copied()
    }
}

/// Identity fields accumulate across opening turns before the full
/// `CandidateIdentity` exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<EmailAddress>,
    pub phone: Option<String>,
}

impl IdentityDraft {
    pub fn display_name(&self) -> &str {
        self.first_name.as_deref().unwrap_or("there")
    }
}

/// All mutable interview state, passed explicitly through the orchestrator
/// so independent sessions never share anything but the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningSession {
    pub phase: InterviewPhase,
    pub identity: IdentityDraft,
    /// Lookup result captured at session start; decides create-vs-update
    /// at persistence time.
    pub existing: Option<CandidateSummary>,
    pub mandatory: MandatoryAssessment,
    pub preferred: PreferredSignals,
    pub assessment: PreferredAssessment,
}

impl Default for ScreeningSession {
    fn default() -> Self {
        Self {
            phase: InterviewPhase::Opening,
            identity: IdentityDraft::default(),
            existing: None,
            mandatory: MandatoryAssessment::default(),
            preferred: PreferredSignals::default(),
            assessment: PreferredAssessment::default(),
        }
    }
}

impl ScreeningSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, InterviewPhase::Persisted)
    }

    /// A stored record exists for this candidate (repeat interview, or this
    /// session already persisted one).
    pub fn record_exists(&self) -> bool {
        self.existing.is_some() || self.is_terminal()
    }
}
