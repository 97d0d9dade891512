mod config;
mod rules;

pub use config::ScoringConfig;

use super::domain::{
    MandatoryAssessment, MandatoryBreakdownEntry, PreferredAssessment, PreferredBreakdownEntry,
    PreferredSignals,
};
use serde::{Deserialize, Serialize};

/// Stateless scorer mapping extracted signals to a qualification decision.
/// Deterministic and side-effect free: the same signals always produce the
/// same outcome.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn score(
        &self,
        mandatory: &MandatoryAssessment,
        preferred: &PreferredSignals,
        assessment: &PreferredAssessment,
    ) -> ScoringOutcome {
        let mandatory_breakdown = rules::mandatory_breakdown(mandatory);
        let is_qualified = mandatory.all_passed();

        let (preferred_breakdown, preferred_points) = if is_qualified {
            rules::preferred_breakdown(preferred, assessment, &self.config)
        } else {
            // Disqualified interviews never reach the preferred prompts, so
            // the breakdown records them as absent rather than guessing.
            let (entries, _) =
                rules::preferred_breakdown(&PreferredSignals::default(), &PreferredAssessment::default(), &self.config);
            (entries, 0)
        };

        let match_score = if is_qualified {
            (self.config.base_score + preferred_points).min(self.config.max_score)
        } else {
            0
        };

        ScoringOutcome {
            is_qualified,
            match_score,
            mandatory_breakdown,
            preferred_breakdown,
        }
    }
}

/// Scoring result handed to the tool layer for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringOutcome {
    pub is_qualified: bool,
    pub match_score: u8,
    pub mandatory_breakdown: Vec<MandatoryBreakdownEntry>,
    pub preferred_breakdown: Vec<PreferredBreakdownEntry>,
}

impl ScoringOutcome {
    /// Enforces the structural invariants every persisted evaluation must
    /// satisfy. A violation is fatal: the caller must abort persistence.
    pub fn verify(&self) -> Result<(), ScoringInvariantError> {
        if self.mandatory_breakdown.len() != 7 {
            return Err(ScoringInvariantError::MandatoryArity(
                self.mandatory_breakdown.len(),
            ));
        }
        if self.preferred_breakdown.len() != 3 {
            return Err(ScoringInvariantError::PreferredArity(
                self.preferred_breakdown.len(),
            ));
        }
        if !score_in_range(self.match_score) {
            return Err(ScoringInvariantError::ScoreOutOfRange(self.match_score));
        }
        if self.is_qualified != self.mandatory_breakdown.iter().all(|entry| entry.passed) {
            return Err(ScoringInvariantError::QualificationMismatch);
        }
        if !self.is_qualified && self.match_score != 0 {
            return Err(ScoringInvariantError::ScoreOutOfRange(self.match_score));
        }
        Ok(())
    }
}

/// Valid scores are exactly {0} ∪ [50, 100].
pub fn score_in_range(score: u8) -> bool {
    score == 0 || (50..=100).contains(&score)
}

/// Internal invariant violations; never shown to the candidate channel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringInvariantError {
    #[error("mandatory breakdown has {0} entries, expected 7")]
    MandatoryArity(usize),
    #[error("preferred breakdown has {0} entries, expected 3")]
    PreferredArity(usize),
    #[error("match score {0} outside {{0}} ∪ [50,100]")]
    ScoreOutOfRange(u8),
    #[error("qualification flag disagrees with mandatory breakdown")]
    QualificationMismatch,
}
