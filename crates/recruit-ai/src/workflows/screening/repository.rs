use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{CandidateId, CandidateRecord, EmailAddress};

/// Storage abstraction keyed by email so the tool layer can be exercised in
/// isolation. Implementations must enforce email uniqueness atomically:
/// concurrent creates for one email yield exactly one success and one
/// `Conflict`, never two records. No deletion is exposed to this engine.
pub trait CandidateRepository: Send + Sync {
    fn create(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError>;
    fn find_by_email(&self, email: &EmailAddress)
        -> Result<Option<CandidateRecord>, RepositoryError>;
    fn update(&self, record: CandidateRecord) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures. `Timeout` is how an adapter
/// reports an exhausted deadline; the tool layer treats it as transient and
/// never as success.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store call exceeded its deadline")]
    Timeout,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    pub fn is_transient(&self) -> bool {
        matches!(self, RepositoryError::Timeout | RepositoryError::Unavailable(_))
    }
}

/// Sanitized lookup view returned to the orchestrator; never exposes the
/// raw breakdowns to the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub id: CandidateId,
    pub name: String,
    pub email: EmailAddress,
    pub is_qualified: Option<bool>,
    pub match_score: Option<u8>,
    pub evaluated_at: Option<DateTime<Utc>>,
    pub reasoning: Option<String>,
}

impl CandidateRecord {
    pub fn summary(&self) -> CandidateSummary {
        CandidateSummary {
            id: self.id.clone(),
            name: self.identity.full_name(),
            email: self.identity.email.clone(),
            is_qualified: self.evaluation.as_ref().map(|eval| eval.is_qualified),
            match_score: self.evaluation.as_ref().map(|eval| eval.match_score),
            evaluated_at: self.evaluation.as_ref().map(|eval| eval.evaluated_at),
            reasoning: self.evaluation.as_ref().map(|eval| eval.reasoning.clone()),
        }
    }
}

impl CandidateSummary {
    /// Lookup wording surfaced to the orchestrator for repeat candidates.
    pub fn describe(&self) -> String {
        match (self.evaluated_at, self.match_score) {
            (Some(at), Some(score)) => format!(
                "Candidate {} was previously screened on {} with a score of {score}/100.",
                self.name,
                at.format("%Y-%m-%d")
            ),
            _ => format!("Candidate {} exists but has not been evaluated yet.", self.name),
        }
    }
}
