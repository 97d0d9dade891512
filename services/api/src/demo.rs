use crate::classify::KeywordClassifier;
use crate::infra::InMemoryCandidateRepository;
use clap::Args;
use recruit_ai::error::AppError;
use recruit_ai::workflows::screening::{
    AgentTurn, CandidateTools, EmailAddress, ScreeningOrchestrator, ScreeningSession,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Script a candidate who fails a knockout question instead of qualifying.
    #[arg(long)]
    pub(crate) disqualify: bool,
    /// Identifier stamped on the demo evaluation as `evaluated_by`.
    #[arg(long, default_value = "screening-agent")]
    pub(crate) evaluator: String,
}

const DEMO_EMAIL: &str = "dana.whitfield@example.com";

fn qualified_script() -> Vec<&'static str> {
    vec![
        "My name is Dana Whitfield",
        "dana.whitfield@example.com",
        "Yes, I'm 23",
        "Yes, I have a valid driver's license",
        "Completely clean, no accidents or violations",
        "Yes, happy to complete a background check",
        "Yes, a drug test is no problem",
        "Yes, I can lift that",
        "Yes, weekends and evenings both work",
        "I delivered packages for three years",
        "I plan my route with a checklist every morning",
        "I prefer working on my own",
    ]
}

fn disqualified_script() -> Vec<&'static str> {
    vec![
        "My name is Dana Whitfield",
        "dana.whitfield@example.com",
        "Yes, I'm 23",
        "No, my license is suspended right now",
    ]
}

fn print_turn(turn: &AgentTurn) {
    println!("  agent: {}", turn.message);
    if let Some(tool) = &turn.tool {
        println!("    [tool {}] {}", tool.tool, tool.summary);
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryCandidateRepository::default());
    let tools = CandidateTools::new(repository, args.evaluator);
    let orchestrator = ScreeningOrchestrator::new(tools, Arc::new(KeywordClassifier));

    println!("Screening interview demo");
    let script = if args.disqualify {
        disqualified_script()
    } else {
        qualified_script()
    };

    let mut session = ScreeningSession::new();
    print_turn(&orchestrator.open());
    for utterance in script {
        println!("  candidate: {utterance}");
        let turn = orchestrator.advance(&mut session, utterance)?;
        print_turn(&turn);
    }

    let email = match EmailAddress::parse(DEMO_EMAIL) {
        Ok(email) => email,
        Err(err) => {
            println!("\nDemo email rejected: {err}");
            return Ok(());
        }
    };
    match orchestrator.tools().fetch_record(&email) {
        Ok(Some(record)) => {
            println!("\nStored evaluation");
            match serde_json::to_string_pretty(&record.summary()) {
                Ok(json) => println!("{json}"),
                Err(err) => println!("  summary unavailable: {err}"),
            }
        }
        Ok(None) => println!("\nNo record was stored for {DEMO_EMAIL}"),
        Err(err) => println!("\nRecord store unavailable: {err}"),
    }

    Ok(())
}
