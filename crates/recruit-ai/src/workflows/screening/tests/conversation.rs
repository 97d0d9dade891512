use std::sync::Arc;

use chrono::{Duration, Utc};

use super::common::*;

use crate::workflows::screening::domain::{EmailAddress, MandatoryRequirement};
use crate::workflows::screening::orchestrator::{Conversation, ConversationTurn, TurnRole};
use crate::workflows::screening::session::{InterviewPhase, ScreeningSession};

fn email() -> EmailAddress {
    EmailAddress::parse("alex.reyes@example.com").expect("valid email")
}

#[test]
fn qualified_interview_persists_once_and_closes_warmly() {
    let repository = Arc::new(MemoryRepository::default());
    let orchestrator = orchestrator(repository.clone());
    let mut session = ScreeningSession::new();

    let last = run_interview(&orchestrator, &mut session, &qualified_interview());

    assert!(last.message.contains("strong fit"));
    let tool = last.tool.expect("closing turn issues the create");
    assert_eq!(tool.tool, "create_evaluation");
    assert!(session.is_terminal());

    let records = repository.records.lock().unwrap();
    assert_eq!(records.len(), 1);
    let evaluation = records[&email()].evaluation.as_ref().unwrap();
    assert!(evaluation.is_qualified);
    assert_eq!(evaluation.match_score, 100);
    // Closing words never leak the numeric score to the candidate.
    assert!(!last.message.contains("100"));
}

#[test]
fn terminal_sessions_do_not_persist_again() {
    let repository = Arc::new(MemoryRepository::default());
    let orchestrator = orchestrator(repository.clone());
    let mut session = ScreeningSession::new();
    run_interview(&orchestrator, &mut session, &qualified_interview());

    let turn = orchestrator.advance(&mut session, "thanks!").expect("turn");

    assert!(turn.tool.is_none());
    assert!(turn.message.contains("already wrapped up"));
    assert_eq!(repository.records.lock().unwrap().len(), 1);
}

#[test]
fn first_failed_gate_ends_the_interview_and_stores_a_zero_score() {
    let repository = Arc::new(MemoryRepository::default());
    let orchestrator = orchestrator(repository.clone());
    let mut session = ScreeningSession::new();

    let last = run_interview(
        &orchestrator,
        &mut session,
        &["Alex Reyes", "alex.reyes@example.com", "yes", "no, it's suspended"],
    );

    assert!(last.message.contains("may not be the best match"));
    assert_eq!(last.tool.expect("disqualification persists").tool, "create_evaluation");
    assert!(session.is_terminal());

    let records = repository.records.lock().unwrap();
    let evaluation = records[&email()].evaluation.as_ref().unwrap();
    assert!(!evaluation.is_qualified);
    assert_eq!(evaluation.match_score, 0);
    let unreached = evaluation
        .mandatory_breakdown
        .iter()
        .filter(|entry| entry.reason == "not reached")
        .count();
    assert_eq!(unreached, 5, "questions after the failure stay unasked");
}

#[test]
fn ambiguous_answers_get_exactly_one_follow_up() {
    let repository = Arc::new(MemoryRepository::default());
    let orchestrator = orchestrator(repository.clone());
    let mut session = ScreeningSession::new();
    run_interview(
        &orchestrator,
        &mut session,
        &["Alex Reyes", "alex.reyes@example.com"],
    );

    let follow_up = orchestrator.advance(&mut session, "uh, maybe?").expect("turn");
    assert!(follow_up.message.contains("21 or older as of today"));
    assert!(follow_up.tool.is_none());

    // Still unclear after the one follow-up: treated as unconfirmed.
    let exit = orchestrator.advance(&mut session, "hard to say").expect("turn");
    assert!(exit.message.contains("may not be the best match"));
    assert!(session.is_terminal());

    let records = repository.records.lock().unwrap();
    let evaluation = records[&email()].evaluation.as_ref().unwrap();
    let age = &evaluation.mandatory_breakdown[0];
    assert!(!age.passed);
    assert!(age.reason.contains("could not confirm"));
}

#[test]
fn a_clear_answer_after_the_follow_up_continues_the_walk() {
    let repository = Arc::new(MemoryRepository::default());
    let orchestrator = orchestrator(repository.clone());
    let mut session = ScreeningSession::new();
    run_interview(
        &orchestrator,
        &mut session,
        &["Alex Reyes", "alex.reyes@example.com", "uh, maybe?"],
    );

    let turn = orchestrator.advance(&mut session, "yes, I'm 26").expect("turn");

    assert!(turn.message.contains("driver's license"));
    assert_eq!(
        session.phase,
        InterviewPhase::Mandatory {
            index: 1,
            awaiting_clarification: false
        }
    );
}

#[test]
fn malformed_emails_are_rechecked_before_any_lookup() {
    let repository = Arc::new(MemoryRepository::default());
    let orchestrator = orchestrator(repository.clone());
    let mut session = ScreeningSession::new();

    let bad = run_interview(
        &orchestrator,
        &mut session,
        &["Alex Reyes", "alex.reyes.example.com"],
    );
    assert!(bad.message.contains("valid email"));
    assert!(bad.tool.is_none());
    assert_eq!(session.phase, InterviewPhase::Opening);

    let good = orchestrator
        .advance(&mut session, "sorry, alex.reyes@example.com")
        .expect("turn");
    assert_eq!(good.tool.expect("lookup issued").tool, "lookup_by_email");
    assert!(matches!(session.phase, InterviewPhase::Mandatory { index: 0, .. }));
}

#[test]
fn off_topic_turns_are_steered_back_to_the_current_question() {
    let repository = Arc::new(MemoryRepository::default());
    let orchestrator = orchestrator(repository.clone());
    let mut session = ScreeningSession::new();
    run_interview(
        &orchestrator,
        &mut session,
        &["Alex Reyes", "alex.reyes@example.com"],
    );

    let turn = orchestrator
        .advance(&mut session, "how's the weather over there?")
        .expect("turn");

    assert!(turn.message.contains("stay focused"));
    assert!(turn.message.contains("21 years old"));
    assert!(turn.tool.is_none());
    assert!(matches!(session.phase, InterviewPhase::Mandatory { index: 0, .. }));
}

#[test]
fn transient_store_failure_keeps_the_exit_pending_until_a_retry_lands() {
    let repository = Arc::new(FlakyRepository::new(0));
    let orchestrator = orchestrator(repository.clone());
    let mut session = ScreeningSession::new();
    run_interview(
        &orchestrator,
        &mut session,
        &["Alex Reyes", "alex.reyes@example.com", "yes"],
    );

    // Both the call and its automatic retry time out.
    repository.fail_next(2);
    let stalled = orchestrator
        .advance(&mut session, "no, I don't have a license")
        .expect("turn");
    assert!(stalled.message.contains("trouble reaching our records"));
    assert!(!session.is_terminal());
    assert!(repository.inner.records.lock().unwrap().is_empty());

    let recovered = orchestrator.advance(&mut session, "okay").expect("turn");
    assert_eq!(recovered.tool.expect("persist retried").tool, "create_evaluation");
    assert!(session.is_terminal());
    assert_eq!(repository.inner.records.lock().unwrap().len(), 1);
}

#[test]
fn respond_retries_a_persist_that_failed_in_an_earlier_request() {
    let repository = Arc::new(FlakyRepository::new(0));
    let orchestrator = orchestrator(repository.clone());

    let mut conversation = Conversation::default();
    for utterance in ["Alex Reyes", "alex.reyes@example.com", "yes"] {
        conversation.turns.push(ConversationTurn {
            role: TurnRole::Candidate,
            text: utterance.to_string(),
        });
        let turn = orchestrator.respond(&conversation).expect("turn");
        conversation.turns.push(ConversationTurn {
            role: TurnRole::Agent,
            text: turn.message,
        });
    }

    // Four timeouts: the replayed lookup and its retry eat two, then the
    // disqualifying create and its retry eat the rest.
    repository.fail_next(4);
    conversation.turns.push(ConversationTurn {
        role: TurnRole::Candidate,
        text: "no, I don't have a license".to_string(),
    });
    let stalled = orchestrator.respond(&conversation).expect("turn");
    assert!(stalled.message.contains("trouble reaching our records"));
    assert!(repository.inner.records.lock().unwrap().is_empty());
    conversation.turns.push(ConversationTurn {
        role: TurnRole::Agent,
        text: stalled.message,
    });

    // The store is healthy again. Replaying the history must notice the
    // missing record and let the live turn reissue the create instead of
    // declaring the screening already saved.
    conversation.turns.push(ConversationTurn {
        role: TurnRole::Candidate,
        text: "okay".to_string(),
    });
    let recovered = orchestrator.respond(&conversation).expect("turn");

    assert_eq!(recovered.tool.expect("persist reissued").tool, "create_evaluation");
    assert!(!recovered.message.contains("already wrapped up"));
    let records = repository.inner.records.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert!(!records[&email()].evaluation.as_ref().unwrap().is_qualified);
}

#[test]
fn repeat_candidate_corrections_write_through_mid_interview() {
    let repository = Arc::new(MemoryRepository::default());
    let existing = evaluated_record("cand-000042", "alex.reyes@example.com");
    let stamped = existing.evaluation.as_ref().unwrap().evaluated_at;
    repository
        .records
        .lock()
        .unwrap()
        .insert(existing.identity.email.clone(), existing);

    let orchestrator = orchestrator(repository.clone());
    let mut session = ScreeningSession::new();
    run_interview(
        &orchestrator,
        &mut session,
        &["Alex Reyes", "alex.reyes@example.com", "yes"],
    );

    let turn = orchestrator
        .advance(&mut session, "actually, my phone number has changed")
        .expect("turn");

    assert_eq!(turn.tool.expect("write-through issued").tool, "update_candidate");
    assert!(!session.is_terminal(), "the re-interview keeps going");

    let records = repository.records.lock().unwrap();
    let stored = &records[&email()];
    assert_eq!(stored.identity.phone.as_deref(), Some("555-0100"));
    // A contact-detail change never touches the stored decision.
    let evaluation = stored.evaluation.as_ref().unwrap();
    assert_eq!(evaluation.match_score, 100);
    assert_eq!(evaluation.evaluated_at, stamped);
}

#[test]
fn corrections_before_persistence_only_touch_the_session() {
    let repository = Arc::new(MemoryRepository::default());
    let orchestrator = orchestrator(repository.clone());
    let mut session = ScreeningSession::new();
    run_interview(
        &orchestrator,
        &mut session,
        &[
            "Alex Reyes",
            "alex.reyes@example.com",
            "yes",
            "yes",
            "yes",
            "yes",
            "yes",
            "yes",
            "yes",
            "I delivered packages for two years",
        ],
    );

    let correction = orchestrator
        .advance(&mut session, "actually, I can't do weekend shifts after all")
        .expect("turn");

    assert!(correction.message.contains("I've updated your"));
    assert!(correction.tool.is_none(), "nothing stored yet, nothing to update");
    assert!(matches!(
        session.phase,
        InterviewPhase::EarlyExit {
            requirement: MandatoryRequirement::ScheduleAvailability
        }
    ));
    assert!(repository.records.lock().unwrap().is_empty());

    let exit = orchestrator.advance(&mut session, "sorry about that").expect("turn");
    assert_eq!(exit.tool.expect("disqualification persists").tool, "create_evaluation");
    let records = repository.records.lock().unwrap();
    let evaluation = records[&email()].evaluation.as_ref().unwrap();
    assert!(!evaluation.is_qualified);
    assert_eq!(evaluation.match_score, 0);
}

#[test]
fn corrections_after_persistence_write_through_with_a_fresh_stamp() {
    let repository = Arc::new(MemoryRepository::default());
    let orchestrator = orchestrator(repository.clone());
    let mut session = ScreeningSession::new();
    run_interview(&orchestrator, &mut session, &qualified_interview());

    let stale = Utc::now() - Duration::days(2);
    {
        let mut records = repository.records.lock().unwrap();
        let record = records.get_mut(&email()).unwrap();
        record.evaluation.as_mut().unwrap().evaluated_at = stale;
    }

    let turn = orchestrator
        .advance(&mut session, "actually, I was a courier before that too")
        .expect("turn");

    assert!(turn.message.contains("courier experience"));
    assert_eq!(turn.tool.expect("write-through issued").tool, "update_candidate");

    let records = repository.records.lock().unwrap();
    let stored = &records[&email()];
    assert!(stored.preferred.has_courier_experience);
    let evaluation = stored.evaluation.as_ref().unwrap();
    assert!(evaluation.evaluated_at > stale, "outcome change re-stamps the evaluation");
    assert!(evaluation.is_qualified);
    assert_eq!(evaluation.match_score, 100);
}

#[test]
fn repeat_candidates_are_recognized_and_updated_in_place() {
    let repository = Arc::new(MemoryRepository::default());
    let existing = evaluated_record("cand-000042", "alex.reyes@example.com");
    repository
        .records
        .lock()
        .unwrap()
        .insert(existing.identity.email.clone(), existing);

    let orchestrator = orchestrator(repository.clone());
    let mut session = ScreeningSession::new();

    let greeting = run_interview(
        &orchestrator,
        &mut session,
        &["Alex Reyes", "alex.reyes@example.com"],
    );
    assert!(greeting.message.contains("previously screened"));

    let last = run_interview(&orchestrator, &mut session, &qualified_interview()[2..]);

    assert_eq!(last.tool.expect("refresh issued").tool, "update_candidate");
    let records = repository.records.lock().unwrap();
    assert_eq!(records.len(), 1, "re-screening never forks a second record");
    assert_eq!(records[&email()].id.0, "cand-000042");
}

#[test]
fn respond_replays_history_without_repeating_mutations() {
    let repository = Arc::new(MemoryRepository::default());
    let orchestrator = orchestrator(repository.clone());

    let mut conversation = Conversation::default();
    for utterance in qualified_interview() {
        conversation.turns.push(ConversationTurn {
            role: TurnRole::Candidate,
            text: utterance.to_string(),
        });
        let turn = orchestrator.respond(&conversation).expect("turn");
        conversation.turns.push(ConversationTurn {
            role: TurnRole::Agent,
            text: turn.message,
        });
    }
    assert_eq!(repository.records.lock().unwrap().len(), 1);

    conversation.turns.push(ConversationTurn {
        role: TurnRole::Candidate,
        text: "thanks, talk soon".to_string(),
    });
    let coda = orchestrator.respond(&conversation).expect("turn");

    assert!(coda.tool.is_none());
    assert_eq!(repository.records.lock().unwrap().len(), 1);
}

#[test]
fn an_empty_conversation_gets_the_opening_greeting() {
    let repository = Arc::new(MemoryRepository::default());
    let orchestrator = orchestrator(repository);

    let turn = orchestrator.respond(&Conversation::default()).expect("turn");

    assert!(turn.message.contains("what's your name"));
    assert!(turn.tool.is_none());
}
