use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{
    CandidateId, CandidateIdentity, CandidateRecord, CandidateUpdate, EmailAddress, Evaluation,
    MandatoryAssessment, MandatoryRequirement, PreferredAssessment, PreferredSignals,
    RequirementOutcome,
};
use super::repository::{CandidateRepository, CandidateSummary, RepositoryError};
use super::scoring::{score_in_range, ScoringInvariantError, ScoringOutcome};

static CANDIDATE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_candidate_id() -> CandidateId {
    let id = CANDIDATE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CandidateId(format!("cand-{id:06}"))
}

/// Complete input for `create_evaluation`. Every field is required; the
/// identity strings arrive raw so validation happens here, at the tool
/// boundary, before anything reaches storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub mandatory: MandatoryAssessment,
    pub preferred: PreferredSignals,
    pub assessment: PreferredAssessment,
    pub outcome: ScoringOutcome,
    pub reasoning: String,
}

/// Uniform result envelope for the mutating tool operations. Each variant
/// maps to a fixed conversational behavior in the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolReply {
    Success {
        record_id: CandidateId,
        summary: String,
    },
    /// Malformed or missing input; nothing reached storage.
    Validation { issues: Vec<String> },
    /// Create hit an existing record for the email. Carries the existing
    /// record's id, which is left untouched.
    Duplicate {
        record_id: CandidateId,
        summary: String,
    },
    NotFound { summary: String },
    /// Store timeout or outage that survived one automatic retry.
    Transient { summary: String },
}

/// Result envelope for the read-only lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupReply {
    pub found: bool,
    pub summary: String,
    pub candidate: Option<CandidateSummary>,
}

/// The three side-effecting operations the orchestrator may invoke.
/// Transient repository failures are retried once before surfacing.
pub struct CandidateTools<R> {
    repository: Arc<R>,
    evaluator: String,
}

impl<R> CandidateTools<R>
where
    R: CandidateRepository,
{
    pub fn new(repository: Arc<R>, evaluator: impl Into<String>) -> Self {
        Self {
            repository,
            evaluator: evaluator.into(),
        }
    }

    pub fn evaluator(&self) -> &str {
        &self.evaluator
    }

    /// Read-only, idempotent lookup used at session start to detect repeat
    /// candidates. Issues no mutation regardless of the result.
    pub fn lookup_by_email(&self, email: &str) -> LookupReply {
        let email = match EmailAddress::parse(email) {
            Ok(email) => email,
            Err(err) => {
                return LookupReply {
                    found: false,
                    summary: err.to_string(),
                    candidate: None,
                }
            }
        };

        match self.with_retry(|| self.repository.find_by_email(&email)) {
            Ok(Some(record)) => {
                let summary = record.summary();
                LookupReply {
                    found: true,
                    summary: summary.describe(),
                    candidate: Some(summary),
                }
            }
            Ok(None) => LookupReply {
                found: false,
                summary: format!("No candidate found with email {email}."),
                candidate: None,
            },
            Err(err) => {
                warn!(%email, error = %err, "candidate lookup failed");
                LookupReply {
                    found: false,
                    summary: "Records system is temporarily unreachable.".to_string(),
                    candidate: None,
                }
            }
        }
    }

    /// Full-record fetch backing the read endpoint.
    pub fn fetch_record(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<CandidateRecord>, RepositoryError> {
        self.with_retry(|| self.repository.find_by_email(email))
    }

    /// Persist a completed interview. Fails closed: invariant-breaking
    /// outcomes abort before any storage call, and a duplicate email never
    /// overwrites the existing record.
    pub fn create_evaluation(
        &self,
        input: EvaluationInput,
    ) -> Result<ToolReply, ScoringInvariantError> {
        let mut issues = Vec::new();
        if input.first_name.trim().is_empty() {
            issues.push("first name is required".to_string());
        }
        if input.last_name.trim().is_empty() {
            issues.push("last name is required".to_string());
        }
        if input.reasoning.trim().is_empty() {
            issues.push("reasoning is required".to_string());
        }
        let email = match EmailAddress::parse(&input.email) {
            Ok(email) => Some(email),
            Err(err) => {
                issues.push(err.to_string());
                None
            }
        };
        if !issues.is_empty() {
            return Ok(ToolReply::Validation { issues });
        }
        let email = email.expect("validated above");

        // Structural invariants are fatal, not retryable: storing a
        // malformed evaluation would poison the audit trail.
        input.outcome.verify()?;

        let record = CandidateRecord {
            id: next_candidate_id(),
            identity: CandidateIdentity {
                first_name: input.first_name.trim().to_string(),
                last_name: input.last_name.trim().to_string(),
                email: email.clone(),
                phone: input.phone.clone(),
            },
            mandatory: input.mandatory,
            preferred: input.preferred,
            assessment: input.assessment,
            evaluation: Some(Evaluation {
                is_qualified: input.outcome.is_qualified,
                match_score: input.outcome.match_score,
                mandatory_breakdown: input.outcome.mandatory_breakdown.clone(),
                preferred_breakdown: input.outcome.preferred_breakdown.clone(),
                reasoning: input.reasoning.clone(),
                evaluated_at: Utc::now(),
                evaluated_by: self.evaluator.clone(),
            }),
            created_at: Utc::now(),
        };

        match self.with_retry(|| self.repository.create(record.clone())) {
            Ok(stored) => {
                let status = if input.outcome.is_qualified {
                    "QUALIFIED"
                } else {
                    "NOT QUALIFIED"
                };
                Ok(ToolReply::Success {
                    record_id: stored.id.clone(),
                    summary: format!(
                        "Candidate {} saved with match score {}/100. Status: {status}",
                        stored.identity.full_name(),
                        input.outcome.match_score
                    ),
                })
            }
            Err(RepositoryError::Conflict) => {
                // Surface the pre-existing record's id so callers can see
                // the conflict left it untouched.
                let existing = self
                    .with_retry(|| self.repository.find_by_email(&email))
                    .ok()
                    .flatten();
                match existing {
                    Some(existing) => Ok(ToolReply::Duplicate {
                        record_id: existing.id.clone(),
                        summary: format!(
                            "A candidate with email {email} already exists in the system."
                        ),
                    }),
                    None => Ok(ToolReply::Transient {
                        summary: "Store reported a conflict but the record could not be read back."
                            .to_string(),
                    }),
                }
            }
            Err(RepositoryError::NotFound) => Ok(ToolReply::Transient {
                summary: "Store rejected the create unexpectedly.".to_string(),
            }),
            Err(err) => {
                warn!(%email, error = %err, "evaluation create failed");
                Ok(ToolReply::Transient {
                    summary: "Failed to save the evaluation. Please try again.".to_string(),
                })
            }
        }
    }

    /// Apply a field-scoped update to an existing record. Updates touching
    /// the evaluation-outcome group re-stamp `evaluated_at`/`evaluated_by`
    /// atomically within the same write. Never creates a record.
    pub fn update_candidate(&self, email: &str, update: CandidateUpdate) -> ToolReply {
        let mut issues = Vec::new();
        let email = match EmailAddress::parse(email) {
            Ok(email) => Some(email),
            Err(err) => {
                issues.push(err.to_string());
                None
            }
        };
        if update.is_empty() {
            issues.push("update contains no fields".to_string());
        }
        if let Some(score) = update.match_score {
            if !score_in_range(score) {
                issues.push(format!("match score {score} outside {{0}} or [50,100]"));
            }
        }
        if let Some(breakdown) = &update.mandatory_breakdown {
            if breakdown.len() != 7 {
                issues.push(format!(
                    "mandatory breakdown has {} entries, expected 7",
                    breakdown.len()
                ));
            }
        }
        if let Some(breakdown) = &update.preferred_breakdown {
            if breakdown.len() != 3 {
                issues.push(format!(
                    "preferred breakdown has {} entries, expected 3",
                    breakdown.len()
                ));
            }
        }
        if !issues.is_empty() {
            return ToolReply::Validation { issues };
        }
        let email = email.expect("validated above");

        let existing = match self.with_retry(|| self.repository.find_by_email(&email)) {
            Ok(Some(record)) => record,
            Ok(None) => {
                return ToolReply::NotFound {
                    summary: format!("Candidate with email {email} not found."),
                }
            }
            Err(err) => {
                warn!(%email, error = %err, "candidate fetch for update failed");
                return ToolReply::Transient {
                    summary: "Failed to reach the candidate record. Please try again.".to_string(),
                };
            }
        };

        let mut record = existing;
        if update.touches_evaluation() && record.evaluation.is_none() {
            let complete = update.is_qualified.is_some()
                && update.match_score.is_some()
                && update.mandatory_breakdown.is_some()
                && update.preferred_breakdown.is_some()
                && update.reasoning.is_some();
            if !complete {
                return ToolReply::Validation {
                    issues: vec![
                        "outcome update for an unevaluated record requires qualification, \
                         score, both breakdowns, and reasoning"
                            .to_string(),
                    ],
                };
            }
        }
        apply_update(&mut record, &update, &self.evaluator);

        match self.with_retry(|| self.repository.update(record.clone())) {
            Ok(()) => ToolReply::Success {
                record_id: record.id.clone(),
                summary: format!(
                    "Candidate {} updated successfully ({}).",
                    record.identity.full_name(),
                    update.touched_fields().join(", ")
                ),
            },
            Err(RepositoryError::NotFound) => ToolReply::NotFound {
                summary: format!("Candidate with email {email} not found."),
            },
            Err(err) => {
                warn!(%email, error = %err, "candidate update failed");
                ToolReply::Transient {
                    summary: "Failed to update the candidate. Please try again.".to_string(),
                }
            }
        }
    }

    /// One automatic retry for transient store failures; anything else
    /// surfaces immediately.
    fn with_retry<T>(
        &self,
        mut call: impl FnMut() -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        match call() {
            Err(err) if err.is_transient() => {
                warn!(error = %err, "transient store failure, retrying once");
                call()
            }
            other => other,
        }
    }
}

fn apply_update(record: &mut CandidateRecord, update: &CandidateUpdate, evaluator: &str) {
    if let Some(first_name) = &update.first_name {
        record.identity.first_name = first_name.clone();
    }
    if let Some(last_name) = &update.last_name {
        record.identity.last_name = last_name.clone();
    }
    if let Some(phone) = &update.phone {
        record.identity.phone = Some(phone.clone());
    }

    for requirement in MandatoryRequirement::ALL {
        if let Some(value) = update.mandatory_bool(requirement) {
            let outcome = if value {
                RequirementOutcome::Passed
            } else {
                RequirementOutcome::Failed {
                    reason: format!("candidate corrected {} to no", requirement.label()),
                }
            };
            record.mandatory.record(requirement, outcome);
        }
    }

    if let Some(value) = update.has_delivery_experience {
        record.preferred.has_delivery_experience = value;
    }
    if let Some(value) = update.has_courier_experience {
        record.preferred.has_courier_experience = value;
    }
    if let Some(value) = update.has_time_management_skills {
        record.preferred.has_time_management_skills = value;
    }
    if let Some(value) = update.has_organizational_skills {
        record.preferred.has_organizational_skills = value;
    }
    if let Some(value) = update.can_work_independently {
        record.preferred.can_work_independently = value;
    }

    if update.touches_evaluation() {
        let stamped_at = Utc::now();
        let evaluation = record.evaluation.get_or_insert_with(|| Evaluation {
            is_qualified: false,
            match_score: 0,
            mandatory_breakdown: Vec::new(),
            preferred_breakdown: Vec::new(),
            reasoning: String::new(),
            evaluated_at: stamped_at,
            evaluated_by: evaluator.to_string(),
        });
        if let Some(value) = update.is_qualified {
            evaluation.is_qualified = value;
        }
        if let Some(value) = update.match_score {
            evaluation.match_score = value;
        }
        if let Some(breakdown) = &update.mandatory_breakdown {
            evaluation.mandatory_breakdown = breakdown.clone();
        }
        if let Some(breakdown) = &update.preferred_breakdown {
            evaluation.preferred_breakdown = breakdown.clone();
        }
        if let Some(reasoning) = &update.reasoning {
            evaluation.reasoning = reasoning.clone();
        }
        evaluation.evaluated_at = stamped_at;
        evaluation.evaluated_by = evaluator.to_string();
    } else if let Some(reasoning) = &update.reasoning {
        if let Some(evaluation) = record.evaluation.as_mut() {
            evaluation.reasoning = reasoning.clone();
        }
    }
}
