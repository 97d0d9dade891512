use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::domain::{CandidateUpdate, EmailAddress, MandatoryRequirement, RequirementOutcome};
use super::extraction::{AnswerClassifier, MandatoryAnswer};
use super::repository::CandidateRepository;
use super::scoring::{ScoringEngine, ScoringInvariantError, ScoringOutcome};
use super::script;
use super::session::{InterviewPhase, ScreeningSession};
use super::tools::{CandidateTools, EvaluationInput, ToolReply};

/// Role tag on a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    Candidate,
    Agent,
}

/// One turn of the role-tagged conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub text: String,
}

/// Full conversation consumed at the chat boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub turns: Vec<ConversationTurn>,
}

/// Report of the single tool call issued during a turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolInvocation {
    pub tool: &'static str,
    pub summary: String,
}

/// The next agent turn: conversational text plus zero-or-one tool call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentTurn {
    pub message: String,
    pub tool: Option<ToolInvocation>,
}

/// Fatal engine faults. Everything candidate-facing is mapped to
/// conversational wording before it can reach this type.
#[derive(Debug, thiserror::Error)]
pub enum ScreeningError {
    #[error(transparent)]
    Scoring(#[from] ScoringInvariantError),
}

/// Whether a turn is being replayed from history (mutations suppressed) or
/// processed live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Effects {
    Replay,
    Apply,
}

impl Effects {
    fn live(self) -> bool {
        matches!(self, Effects::Apply)
    }
}

/// Result of the persistence step for a terminal turn.
enum PersistAttempt {
    /// Replayed turn whose mutation is visible in the store.
    Confirmed,
    /// Replayed turn whose mutation never landed; the phase stays pending
    /// so the next live turn reissues the call.
    Pending,
    /// Live turn that issued the tool call.
    Issued(&'static str, ToolReply),
}

/// Drives one interview to completion: per turn it either speaks or issues
/// exactly one tool call, walking the fixed script with an early exit at the
/// first confirmed mandatory failure.
pub struct ScreeningOrchestrator<R, C> {
    tools: CandidateTools<R>,
    classifier: Arc<C>,
    engine: ScoringEngine,
}

impl<R, C> ScreeningOrchestrator<R, C>
where
    R: CandidateRepository,
    C: AnswerClassifier,
{
    pub fn new(tools: CandidateTools<R>, classifier: Arc<C>) -> Self {
        Self {
            tools,
            classifier,
            engine: ScoringEngine::default(),
        }
    }

    pub fn tools(&self) -> &CandidateTools<R> {
        &self.tools
    }

    /// The greeting that opens every interview.
    pub fn open(&self) -> AgentTurn {
        AgentTurn {
            message: script::opening(),
            tool: None,
        }
    }

    /// Stateless conversation boundary: consumes the full history, rebuilds
    /// the session by replaying prior candidate turns (read-only lookups may
    /// repeat; recorded mutations are verified against the store rather than
    /// reissued), and processes the final utterance live.
    pub fn respond(&self, conversation: &Conversation) -> Result<AgentTurn, ScreeningError> {
        let utterances: Vec<&str> = conversation
            .turns
            .iter()
            .filter(|turn| turn.role == TurnRole::Candidate)
            .map(|turn| turn.text.as_str())
            .collect();

        let Some((last, prior)) = utterances.split_last() else {
            return Ok(self.open());
        };

        let mut session = ScreeningSession::new();
        for utterance in prior {
            self.process(&mut session, utterance, Effects::Replay)?;
        }
        self.process(&mut session, last, Effects::Apply)
    }

    /// Advance a live session by one candidate utterance.
    pub fn advance(
        &self,
        session: &mut ScreeningSession,
        utterance: &str,
    ) -> Result<AgentTurn, ScreeningError> {
        self.process(session, utterance, Effects::Apply)
    }

    fn process(
        &self,
        session: &mut ScreeningSession,
        utterance: &str,
        effects: Effects,
    ) -> Result<AgentTurn, ScreeningError> {
        if let Some(update) = self.classifier.correction(utterance) {
            return self.handle_correction(session, update, effects);
        }

        if self.classifier.off_topic(utterance) && !session.is_terminal() {
            let mut message = script::off_script_reminder();
            if let Some(prompt) = self.current_prompt(session) {
                message.push(' ');
                message.push_str(&prompt);
            }
            return Ok(AgentTurn { message, tool: None });
        }

        match session.phase.clone() {
            InterviewPhase::Opening => Ok(self.opening_turn(session, utterance)),
            InterviewPhase::Mandatory {
                index,
                awaiting_clarification,
            } => self.mandatory_turn(session, utterance, index, awaiting_clarification, effects),
            InterviewPhase::EarlyExit { requirement } => {
                self.persist_disqualification(session, requirement, effects)
            }
            InterviewPhase::Preferred { index } => {
                self.preferred_turn(session, utterance, index, effects)
            }
            InterviewPhase::Closing => self.persist_qualified(session, effects),
            InterviewPhase::Persisted => Ok(AgentTurn {
                message: script::screening_complete(),
                tool: None,
            }),
        }
    }

    // Opening collects first name, last name, and a syntactically valid
    // email; the turn that completes the email also issues the lookup call.
    fn opening_turn(&self, session: &mut ScreeningSession, utterance: &str) -> AgentTurn {
        let facts = self.classifier.identity(utterance);
        if let Some(first_name) = facts.first_name {
            session.identity.first_name = Some(first_name);
        }
        if let Some(last_name) = facts.last_name {
            session.identity.last_name = Some(last_name);
        }
        if let Some(phone) = facts.phone {
            session.identity.phone = Some(phone);
        }

        let (Some(first), Some(_)) = (
            session.identity.first_name.clone(),
            session.identity.last_name.clone(),
        ) else {
            return AgentTurn {
                message: if session.identity.first_name.is_some() {
                    format!(
                        "Thanks, {}! Could I get your last name as well?",
                        session.identity.display_name()
                    )
                } else {
                    "Sorry, I didn't catch your name - what should I call you?".to_string()
                },
                tool: None,
            };
        };

        let Some(raw_email) = facts.email else {
            return AgentTurn {
                message: script::ask_email(&first),
                tool: None,
            };
        };

        let email = match EmailAddress::parse(&raw_email) {
            Ok(email) => email,
            Err(_) => {
                return AgentTurn {
                    message: script::invalid_email(),
                    tool: None,
                }
            }
        };
        session.identity.email = Some(email.clone());

        // Read-only and idempotent, so the lookup also runs on replay.
        let reply = self.tools.lookup_by_email(email.as_str());
        session.existing = reply.candidate.clone();

        let mut message = format!("Perfect, thanks {first}.");
        if reply.found {
            message.push(' ');
            message.push_str(&reply.summary);
            message.push_str(" We'll run through the questions again and refresh your record.");
        }
        message.push(' ');
        message.push_str(script::question(MandatoryRequirement::ALL[0]));

        session.phase = InterviewPhase::Mandatory {
            index: 0,
            awaiting_clarification: false,
        };

        AgentTurn {
            message,
            tool: Some(ToolInvocation {
                tool: "lookup_by_email",
                summary: reply.summary,
            }),
        }
    }

    fn mandatory_turn(
        &self,
        session: &mut ScreeningSession,
        utterance: &str,
        index: usize,
        awaiting_clarification: bool,
        effects: Effects,
    ) -> Result<AgentTurn, ScreeningError> {
        let requirement =
            InterviewPhase::mandatory_requirement(index).expect("mandatory index in range");

        let answer = match self.classifier.mandatory(requirement, utterance) {
            MandatoryAnswer::Ambiguous if !awaiting_clarification => {
                session.phase = InterviewPhase::Mandatory {
                    index,
                    awaiting_clarification: true,
                };
                return Ok(AgentTurn {
                    message: script::clarification(requirement).to_string(),
                    tool: None,
                });
            }
            // One follow-up only: still ambiguous means unconfirmed.
            MandatoryAnswer::Ambiguous => MandatoryAnswer::Fail {
                reason: format!("could not confirm {}", requirement.label()),
            },
            other => other,
        };

        match answer {
            MandatoryAnswer::Pass => {
                session
                    .mandatory
                    .record(requirement, RequirementOutcome::Passed);
                debug!(requirement = requirement.label(), "mandatory requirement passed");
                if let Some(next) = InterviewPhase::mandatory_requirement(index + 1) {
                    session.phase = InterviewPhase::Mandatory {
                        index: index + 1,
                        awaiting_clarification: false,
                    };
                    Ok(AgentTurn {
                        message: format!("Great. {}", script::question(next)),
                        tool: None,
                    })
                } else {
                    session.phase = InterviewPhase::Preferred { index: 0 };
                    Ok(AgentTurn {
                        message: format!(
                            "That covers the requirements - you're through the tough part. {}",
                            script::preferred_prompt(
                                InterviewPhase::preferred_category(0)
                                    .expect("first preferred prompt"),
                            )
                        ),
                        tool: None,
                    })
                }
            }
            MandatoryAnswer::Fail { reason } => {
                session
                    .mandatory
                    .record(requirement, RequirementOutcome::Failed { reason });
                info!(
                    requirement = requirement.label(),
                    "mandatory requirement failed, ending interview early"
                );
                session.phase = InterviewPhase::EarlyExit { requirement };
                self.persist_disqualification(session, requirement, effects)
            }
            MandatoryAnswer::Ambiguous => unreachable!("ambiguity resolved above"),
        }
    }

    fn preferred_turn(
        &self,
        session: &mut ScreeningSession,
        utterance: &str,
        index: usize,
        effects: Effects,
    ) -> Result<AgentTurn, ScreeningError> {
        match index {
            0 => {
                let answer = self.classifier.experience(utterance);
                session.preferred.has_delivery_experience = answer.delivery;
                session.preferred.has_courier_experience = answer.courier;
                session.assessment.experience = answer.level;
                session.phase = InterviewPhase::Preferred { index: 1 };
                Ok(AgentTurn {
                    message: script::preferred_prompt(
                        InterviewPhase::preferred_category(1).expect("second preferred prompt"),
                    )
                    .to_string(),
                    tool: None,
                })
            }
            1 => {
                let answer = self.classifier.organization(utterance);
                session.preferred.has_time_management_skills = answer.time_management;
                session.preferred.has_organizational_skills = answer.organization;
                session.assessment.time_management = answer.quality;
                session.phase = InterviewPhase::Preferred { index: 2 };
                Ok(AgentTurn {
                    message: script::preferred_prompt(
                        InterviewPhase::preferred_category(2).expect("third preferred prompt"),
                    )
                    .to_string(),
                    tool: None,
                })
            }
            _ => {
                let answer = self.classifier.independence(utterance);
                session.preferred.can_work_independently = answer.independent;
                session.assessment.independent_work = answer.quality;
                session.phase = InterviewPhase::Closing;
                self.persist_qualified(session, effects)
            }
        }
    }

    /// Persist the early-exit decision. A transient store failure keeps the
    /// session in `EarlyExit` so the next turn retries; success or a
    /// duplicate conflict both terminate the interview.
    fn persist_disqualification(
        &self,
        session: &mut ScreeningSession,
        requirement: MandatoryRequirement,
        effects: Effects,
    ) -> Result<AgentTurn, ScreeningError> {
        let farewell = script::disqualification(session.identity.display_name(), requirement);
        let attempt = self.persist(session, effects)?;
        Ok(self.finish_persist(session, farewell, attempt))
    }

    fn persist_qualified(
        &self,
        session: &mut ScreeningSession,
        effects: Effects,
    ) -> Result<AgentTurn, ScreeningError> {
        let farewell = script::qualified_closing(session.identity.display_name());
        let attempt = self.persist(session, effects)?;
        Ok(self.finish_persist(session, farewell, attempt))
    }

    /// Run scoring and issue the single create-or-update call for this
    /// interview. Replayed turns never mutate; instead the store is checked
    /// for the recorded decision, and a missing one keeps the phase pending
    /// so the final live turn reissues the call.
    fn persist(
        &self,
        session: &mut ScreeningSession,
        effects: Effects,
    ) -> Result<PersistAttempt, ScreeningError> {
        let outcome = self
            .engine
            .score(&session.mandatory, &session.preferred, &session.assessment);
        outcome.verify()?;

        if !effects.live() {
            // The replayed opening lookup refreshed `session.existing`
            // against the current store state, so it tells us whether the
            // recorded persist actually landed.
            let confirmed = session.existing.as_ref().is_some_and(|summary| {
                summary.is_qualified == Some(outcome.is_qualified)
                    && summary.match_score == Some(outcome.match_score)
            });
            return Ok(if confirmed {
                PersistAttempt::Confirmed
            } else {
                PersistAttempt::Pending
            });
        }

        let reasoning = build_reasoning(session, &outcome);
        let email = session
            .identity
            .email
            .clone()
            .map(|email| email.as_str().to_string())
            .unwrap_or_default();

        let (tool_name, reply) = if session.existing.is_some() {
            let update = revised_decision(session, &outcome, reasoning);
            let reply = match self.tools.update_candidate(&email, update) {
                // The record vanished between lookup and update; fall back
                // to a create on the next turn.
                ToolReply::NotFound { summary } => {
                    session.existing = None;
                    ToolReply::NotFound { summary }
                }
                other => other,
            };
            ("update_candidate", reply)
        } else {
            let reply = self.tools.create_evaluation(EvaluationInput {
                first_name: session.identity.first_name.clone().unwrap_or_default(),
                last_name: session.identity.last_name.clone().unwrap_or_default(),
                email,
                phone: session.identity.phone.clone(),
                mandatory: session.mandatory.clone(),
                preferred: session.preferred,
                assessment: session.assessment,
                outcome: outcome.clone(),
                reasoning,
            })?;
            ("create_evaluation", reply)
        };

        Ok(PersistAttempt::Issued(tool_name, reply))
    }

    fn finish_persist(
        &self,
        session: &mut ScreeningSession,
        farewell: String,
        attempt: PersistAttempt,
    ) -> AgentTurn {
        let (tool_name, reply) = match attempt {
            PersistAttempt::Confirmed => {
                session.phase = InterviewPhase::Persisted;
                return AgentTurn {
                    message: farewell,
                    tool: None,
                };
            }
            // Phase stays pending; the next live turn reissues the call.
            PersistAttempt::Pending => {
                return AgentTurn {
                    message: farewell,
                    tool: None,
                };
            }
            PersistAttempt::Issued(tool_name, reply) => (tool_name, reply),
        };

        match reply {
            ToolReply::Success { summary, .. } => {
                session.phase = InterviewPhase::Persisted;
                AgentTurn {
                    message: farewell,
                    tool: Some(ToolInvocation {
                        tool: tool_name,
                        summary,
                    }),
                }
            }
            ToolReply::Duplicate { summary, .. } => {
                session.phase = InterviewPhase::Persisted;
                let email = session
                    .identity
                    .email
                    .as_ref()
                    .map(|email| email.as_str().to_string())
                    .unwrap_or_default();
                AgentTurn {
                    message: format!("{farewell} {}", script::already_screened(&email)),
                    tool: Some(ToolInvocation {
                        tool: tool_name,
                        summary,
                    }),
                }
            }
            ToolReply::NotFound { summary } => AgentTurn {
                message: format!(
                    "{farewell} I don't have your record on file anymore, so let me create a \
                     fresh one - one moment."
                ),
                tool: Some(ToolInvocation {
                    tool: tool_name,
                    summary,
                }),
            },
            ToolReply::Transient { summary } => AgentTurn {
                message: format!("{farewell} {}", script::transient_trouble()),
                tool: Some(ToolInvocation {
                    tool: tool_name,
                    summary,
                }),
            },
            ToolReply::Validation { issues } => AgentTurn {
                // Incomplete inputs mean the interview is missing data; ask
                // rather than drop anything silently.
                message: format!(
                    "{farewell} Before I can save your evaluation I still need: {}.",
                    issues.join("; ")
                ),
                tool: Some(ToolInvocation {
                    tool: tool_name,
                    summary: issues.join("; "),
                }),
            },
        }
    }

    /// A correction is applied to the session immediately and, when a stored
    /// record exists, persisted with a single update call in the same turn.
    /// Signal changes on a finished interview re-run the scorer so the
    /// stored decision is revised.
    fn handle_correction(
        &self,
        session: &mut ScreeningSession,
        update: CandidateUpdate,
        effects: Effects,
    ) -> Result<AgentTurn, ScreeningError> {
        apply_correction_to_session(session, &update);

        let fields = update.touched_fields();
        let mut message = format!("I've updated your {}.", fields.join(", "));
        let mut tool = None;

        // When a stored record exists the change is written through in the
        // same turn, never batched. The decision group is only revised once
        // the interview is complete; a half-walked session must not
        // overwrite a finished decision, so mid-interview write-throughs
        // carry the corrected fields alone and the terminal persist brings
        // the breakdowns back in line.
        if session.record_exists() {
            let mut update = update.clone();
            if session.is_terminal() && update.touches_signals() {
                let outcome =
                    self.engine
                        .score(&session.mandatory, &session.preferred, &session.assessment);
                outcome.verify()?;
                update.is_qualified = Some(outcome.is_qualified);
                update.match_score = Some(outcome.match_score);
                update.mandatory_breakdown = Some(outcome.mandatory_breakdown.clone());
                update.preferred_breakdown = Some(outcome.preferred_breakdown.clone());
                update.reasoning = Some(build_reasoning(session, &outcome));
            }

            if effects.live() {
                let email = session
                    .identity
                    .email
                    .as_ref()
                    .map(|email| email.as_str().to_string())
                    .unwrap_or_default();
                match self.tools.update_candidate(&email, update) {
                    ToolReply::Success { summary, .. } => {
                        tool = Some(ToolInvocation {
                            tool: "update_candidate",
                            summary,
                        });
                    }
                    ToolReply::NotFound { summary } => {
                        session.existing = None;
                        if session.is_terminal() {
                            session.phase = InterviewPhase::Closing;
                        }
                        message.push_str(
                            " I don't see your record anymore, so I'll recreate it in a moment.",
                        );
                        tool = Some(ToolInvocation {
                            tool: "update_candidate",
                            summary,
                        });
                    }
                    ToolReply::Validation { issues } => {
                        message = format!(
                            "I couldn't apply that change ({}). Could you restate it?",
                            issues.join("; ")
                        );
                        tool = Some(ToolInvocation {
                            tool: "update_candidate",
                            summary: issues.join("; "),
                        });
                    }
                    ToolReply::Transient { summary } => {
                        message.push(' ');
                        message.push_str(&script::transient_trouble());
                        tool = Some(ToolInvocation {
                            tool: "update_candidate",
                            summary,
                        });
                    }
                    ToolReply::Duplicate { summary, .. } => {
                        // Updates never conflict; nothing further to do.
                        tool = Some(ToolInvocation {
                            tool: "update_candidate",
                            summary,
                        });
                    }
                }
            }
        }

        self.recompute_phase_after_correction(session);

        if let Some(prompt) = self.current_prompt(session) {
            message.push(' ');
            message.push_str(&prompt);
        }

        Ok(AgentTurn { message, tool })
    }

    /// A correction can confirm a failure (jump to early exit) or clear the
    /// only failure (resume the mandatory walk at the first unasked
    /// question). Terminal sessions stay terminal.
    fn recompute_phase_after_correction(&self, session: &mut ScreeningSession) {
        match session.phase {
            InterviewPhase::Mandatory { .. } | InterviewPhase::Preferred { .. } => {
                if let Some((requirement, _)) = session.mandatory.first_failure() {
                    session.phase = InterviewPhase::EarlyExit { requirement };
                }
            }
            InterviewPhase::EarlyExit { .. } => {
                if session.mandatory.first_failure().is_none() {
                    let next_unasked = MandatoryRequirement::ALL
                        .iter()
                        .position(|req| {
                            matches!(session.mandatory.outcome(*req), RequirementOutcome::NotReached)
                        })
                        .unwrap_or(MandatoryRequirement::ALL.len());
                    session.phase = if next_unasked < MandatoryRequirement::ALL.len() {
                        InterviewPhase::Mandatory {
                            index: next_unasked,
                            awaiting_clarification: false,
                        }
                    } else {
                        InterviewPhase::Preferred { index: 0 }
                    };
                }
            }
            _ => {}
        }
    }

    fn current_prompt(&self, session: &ScreeningSession) -> Option<String> {
        match &session.phase {
            InterviewPhase::Opening => Some(if session.identity.first_name.is_none() {
                "First, what's your name?".to_string()
            } else {
                script::ask_email(session.identity.display_name())
            }),
            InterviewPhase::Mandatory {
                index,
                awaiting_clarification,
            } => InterviewPhase::mandatory_requirement(*index).map(|req| {
                if *awaiting_clarification {
                    script::clarification(req).to_string()
                } else {
                    script::question(req).to_string()
                }
            }),
            InterviewPhase::Preferred { index } => InterviewPhase::preferred_category(*index)
                .map(|category| script::preferred_prompt(category).to_string()),
            _ => None,
        }
    }
}

fn apply_correction_to_session(session: &mut ScreeningSession, update: &CandidateUpdate) {
    if let Some(first_name) = &update.first_name {
        session.identity.first_name = Some(first_name.clone());
    }
    if let Some(last_name) = &update.last_name {
        session.identity.last_name = Some(last_name.clone());
    }
    if let Some(phone) = &update.phone {
        session.identity.phone = Some(phone.clone());
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
            session.mandatory.record(requirement, outcome);
        }
    }

    if let Some(value) = update.has_delivery_experience {
        session.preferred.has_delivery_experience = value;
    }
    if let Some(value) = update.has_courier_experience {
        session.preferred.has_courier_experience = value;
    }
    if let Some(value) = update.has_time_management_skills {
        session.preferred.has_time_management_skills = value;
    }
    if let Some(value) = update.has_organizational_skills {
        session.preferred.has_organizational_skills = value;
    }
    if let Some(value) = update.can_work_independently {
        session.preferred.can_work_independently = value;
    }
}

/// Update payload carrying the complete revised decision for a repeat
/// candidate, so the stored breakdowns never go stale.
fn revised_decision(
    session: &ScreeningSession,
    outcome: &ScoringOutcome,
    reasoning: String,
) -> CandidateUpdate {
    let mandatory_bool = |requirement: MandatoryRequirement| match session.mandatory.outcome(requirement)
    {
        RequirementOutcome::Passed => Some(true),
        RequirementOutcome::Failed { .. } => Some(false),
        RequirementOutcome::NotReached => None,
    };

    CandidateUpdate {
        first_name: session.identity.first_name.clone(),
        last_name: session.identity.last_name.clone(),
        phone: session.identity.phone.clone(),
        age_at_least_21: mandatory_bool(MandatoryRequirement::AgeAtLeast21),
        has_valid_drivers_license: mandatory_bool(MandatoryRequirement::ValidDriversLicense),
        has_clean_driving_record: mandatory_bool(MandatoryRequirement::CleanDrivingRecord),
        accepts_background_screening: mandatory_bool(MandatoryRequirement::BackgroundScreening),
        accepts_drug_screening: mandatory_bool(MandatoryRequirement::DrugScreening),
        can_lift_150_lbs: mandatory_bool(MandatoryRequirement::Lift150Lbs),
        has_schedule_availability: mandatory_bool(MandatoryRequirement::ScheduleAvailability),
        has_delivery_experience: Some(session.preferred.has_delivery_experience),
        has_courier_experience: Some(session.preferred.has_courier_experience),
        has_time_management_skills: Some(session.preferred.has_time_management_skills),
        has_organizational_skills: Some(session.preferred.has_organizational_skills),
        can_work_independently: Some(session.preferred.can_work_independently),
        is_qualified: Some(outcome.is_qualified),
        match_score: Some(outcome.match_score),
        mandatory_breakdown: Some(outcome.mandatory_breakdown.clone()),
        preferred_breakdown: Some(outcome.preferred_breakdown.clone()),
        reasoning: Some(reasoning),
    }
}

/// Two-to-three sentence decision summary stored alongside the breakdowns.
fn build_reasoning(session: &ScreeningSession, outcome: &ScoringOutcome) -> String {
    let name = session.identity.display_name();
    if outcome.is_qualified {
        let strengths: Vec<&str> = outcome
            .preferred_breakdown
            .iter()
            .filter(|entry| entry.present)
            .map(|entry| entry.category.label())
            .collect();
        if strengths.is_empty() {
            format!(
                "{name} met all seven mandatory requirements for the delivery driver role. \
                 No preferred qualifications were demonstrated, so the match rests on the \
                 mandatory baseline."
            )
        } else {
            format!(
                "{name} met all seven mandatory requirements for the delivery driver role. \
                 Preferred strengths: {}.",
                strengths.join(", ")
            )
        }
    } else {
        let failed: Vec<String> = outcome
            .mandatory_breakdown
            .iter()
            .filter(|entry| !entry.passed && entry.reason != "not reached")
            .map(|entry| format!("{} ({})", entry.requirement.label(), entry.reason))
            .collect();
        format!(
            "{name} was disqualified: {}. The interview ended at the first confirmed failure, \
             so remaining requirements were not assessed.",
            failed.join("; ")
        )
    }
}
