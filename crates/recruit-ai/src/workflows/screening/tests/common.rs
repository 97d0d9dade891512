use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::workflows::screening::domain::{
    AnswerQuality, CandidateId, CandidateIdentity, CandidateRecord, CandidateUpdate, EmailAddress,
    ExperienceLevel, MandatoryAssessment, MandatoryRequirement, PreferredAssessment,
    PreferredSignals,
};
use crate::workflows::screening::extraction::{
    AnswerClassifier, ExperienceAnswer, IdentityFacts, IndependenceAnswer, MandatoryAnswer,
    OrganizationAnswer,
};
use crate::workflows::screening::orchestrator::{AgentTurn, ScreeningOrchestrator};
use crate::workflows::screening::repository::{CandidateRepository, RepositoryError};
use crate::workflows::screening::scoring::ScoringEngine;
use crate::workflows::screening::session::ScreeningSession;
use crate::workflows::screening::tools::CandidateTools;
use crate::workflows::screening::Evaluation;

#[derive(Default)]
pub(super) struct MemoryRepository {
    pub(super) records: Mutex<HashMap<EmailAddress, CandidateRecord>>,
}

impl CandidateRepository for MemoryRepository {
    fn create(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.identity.email) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.identity.email.clone(), record.clone());
        Ok(record)
    }

    fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<CandidateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(email).cloned())
    }

    fn update(&self, record: CandidateRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if !guard.contains_key(&record.identity.email) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(record.identity.email.clone(), record);
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl CandidateRepository for UnavailableRepository {
    fn create(&self, _record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_email(
        &self,
        _email: &EmailAddress,
    ) -> Result<Option<CandidateRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: CandidateRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Fails the first `failures` store calls with a timeout, then behaves like
/// the in-memory store. Exercises the single-retry policy.
pub(super) struct FlakyRepository {
    pub(super) inner: MemoryRepository,
    remaining_failures: AtomicUsize,
    pub(super) calls: AtomicUsize,
}

impl FlakyRepository {
    pub(super) fn new(failures: usize) -> Self {
        Self {
            inner: MemoryRepository::default(),
            remaining_failures: AtomicUsize::new(failures),
            calls: AtomicUsize::new(0),
        }
    }

    /// Arm the next `n` store calls to time out.
    pub(super) fn fail_next(&self, n: usize) {
        self.remaining_failures.store(n, Ordering::SeqCst);
    }

    fn trip(&self) -> Result<(), RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut remaining = self.remaining_failures.load(Ordering::SeqCst);
        while remaining > 0 {
            match self.remaining_failures.compare_exchange(
                remaining,
                remaining - 1,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return Err(RepositoryError::Timeout),
                Err(actual) => remaining = actual,
            }
        }
        Ok(())
    }
}

impl CandidateRepository for FlakyRepository {
    fn create(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        self.trip()?;
        self.inner.create(record)
    }

    fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<CandidateRecord>, RepositoryError> {
        self.trip()?;
        self.inner.find_by_email(email)
    }

    fn update(&self, record: CandidateRecord) -> Result<(), RepositoryError> {
        self.trip()?;
        self.inner.update(record)
    }
}

/// Deterministic classifier used to drive interviews from canned utterances.
/// Identity: a token containing `@` is the email; otherwise two words are
/// first and last name. Mandatory answers: leading "yes"/"no", anything else
/// is ambiguous.
pub(super) struct ScriptedClassifier;

impl AnswerClassifier for ScriptedClassifier {
    fn identity(&self, utterance: &str) -> IdentityFacts {
        let mut facts = IdentityFacts::default();
        let mut names = Vec::new();
        for word in utterance.split_whitespace() {
            if word.contains('@') {
                facts.email = Some(word.to_string());
            } else {
                names.push(word.to_string());
            }
        }
        if names.len() >= 2 {
            facts.first_name = Some(names[0].clone());
            facts.last_name = Some(names[1].clone());
        }
        facts
    }

    fn mandatory(&self, requirement: MandatoryRequirement, utterance: &str) -> MandatoryAnswer {
        let lower = utterance.to_lowercase();
        if lower.starts_with("yes") {
            MandatoryAnswer::Pass
        } else if lower.starts_with("no") {
            MandatoryAnswer::Fail {
                reason: format!("answered no to {}", requirement.label()),
            }
        } else {
            MandatoryAnswer::Ambiguous
        }
    }

    fn experience(&self, utterance: &str) -> ExperienceAnswer {
        let lower = utterance.to_lowercase();
        let delivery = lower.contains("deliver");
        let courier = lower.contains("courier");
        let level = if lower.contains("year") {
            ExperienceLevel::OneYearPlus
        } else if delivery || courier {
            ExperienceLevel::Limited
        } else {
            ExperienceLevel::None
        };
        ExperienceAnswer {
            delivery,
            courier,
            level,
        }
    }

    fn organization(&self, utterance: &str) -> OrganizationAnswer {
        let lower = utterance.to_lowercase();
        if lower.contains("checklist") || lower.contains("route") {
            OrganizationAnswer {
                time_management: true,
                organization: true,
                quality: AnswerQuality::Strong,
            }
        } else if lower.contains("organized") {
            OrganizationAnswer {
                time_management: true,
                organization: false,
                quality: AnswerQuality::Adequate,
            }
        } else {
            OrganizationAnswer::default()
        }
    }

    fn independence(&self, utterance: &str) -> IndependenceAnswer {
        let lower = utterance.to_lowercase();
        if lower.contains("on my own") || lower.contains("independent") {
            IndependenceAnswer {
                independent: true,
                quality: AnswerQuality::Strong,
            }
        } else if lower.contains("fine") {
            IndependenceAnswer {
                independent: true,
                quality: AnswerQuality::Adequate,
            }
        } else {
            IndependenceAnswer::default()
        }
    }

    fn correction(&self, utterance: &str) -> Option<CandidateUpdate> {
        let lower = utterance.to_lowercase();
        if !lower.starts_with("actually") {
            return None;
        }
        let mut update = CandidateUpdate::default();
        if lower.contains("weekend") {
            update.has_schedule_availability = Some(!lower.contains("can't"));
        }
        if lower.contains("phone") {
            update.phone = Some("555-0100".to_string());
        }
        if lower.contains("courier") {
            update.has_courier_experience = Some(true);
        }
        if lower.contains("lift") {
            update.can_lift_150_lbs = Some(false);
        }
        if update.is_empty() {
            return None;
        }
        Some(update)
    }

    fn off_topic(&self, utterance: &str) -> bool {
        utterance.to_lowercase().contains("weather")
    }
}

pub(super) fn tools<R: CandidateRepository>(repository: Arc<R>) -> CandidateTools<R> {
    CandidateTools::new(repository, "screening-agent")
}

pub(super) fn orchestrator<R: CandidateRepository>(
    repository: Arc<R>,
) -> ScreeningOrchestrator<R, ScriptedClassifier> {
    ScreeningOrchestrator::new(tools(repository), Arc::new(ScriptedClassifier))
}

pub(super) fn passing_mandatory() -> MandatoryAssessment {
    MandatoryAssessment::from_booleans([true; 7])
}

pub(super) fn strong_signals() -> PreferredSignals {
    PreferredSignals {
        has_delivery_experience: true,
        has_courier_experience: true,
        has_time_management_skills: true,
        has_organizational_skills: true,
        can_work_independently: true,
    }
}

pub(super) fn strong_assessment() -> PreferredAssessment {
    PreferredAssessment {
        experience: ExperienceLevel::OneYearPlus,
        time_management: AnswerQuality::Strong,
        independent_work: AnswerQuality::Strong,
    }
}

/// Fully evaluated record for a qualified candidate, as the create tool
/// would have stored it.
pub(super) fn evaluated_record(id: &str, email: &str) -> CandidateRecord {
    let mandatory = passing_mandatory();
    let signals = strong_signals();
    let assessment = strong_assessment();
    let outcome = ScoringEngine::default().score(&mandatory, &signals, &assessment);
    CandidateRecord {
        id: CandidateId(id.to_string()),
        identity: CandidateIdentity {
            first_name: "Alex".to_string(),
            last_name: "Reyes".to_string(),
            email: EmailAddress::parse(email).expect("valid email"),
            phone: None,
        },
        mandatory,
        preferred: signals,
        assessment,
        evaluation: Some(Evaluation {
            is_qualified: outcome.is_qualified,
            match_score: outcome.match_score,
            mandatory_breakdown: outcome.mandatory_breakdown,
            preferred_breakdown: outcome.preferred_breakdown,
            reasoning: "met every requirement with strong preferred answers".to_string(),
            evaluated_at: Utc::now(),
            evaluated_by: "screening-agent".to_string(),
        }),
        created_at: Utc::now(),
    }
}

/// Candidate turns for a complete interview by a qualified candidate.
pub(super) fn qualified_interview() -> Vec<&'static str> {
    vec![
        "Alex Reyes",
        "alex.reyes@example.com",
        "yes",
        "yes",
        "yes, clean record",
        "yes",
        "yes",
        "yes",
        "yes",
        "I delivered packages for two years",
        "I plan my route with a checklist",
        "I prefer working on my own",
    ]
}

pub(super) fn run_interview<R: CandidateRepository>(
    orchestrator: &ScreeningOrchestrator<R, ScriptedClassifier>,
    session: &mut ScreeningSession,
    utterances: &[&str],
) -> AgentTurn {
    let mut last = orchestrator.open();
    for utterance in utterances {
        last = orchestrator
            .advance(session, utterance)
            .expect("turn advances");
    }
    last
}
