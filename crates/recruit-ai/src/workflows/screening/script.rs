//! The fixed interview script for the Tsavo West Inc delivery-driver role.
//! Question order is canonical: the orchestrator walks it top to bottom and
//! never continues past the first confirmed failure.

use super::domain::{MandatoryRequirement, PreferredCategory};

pub const COMPANY: &str = "Tsavo West Inc";
pub const ROLE: &str = "FedEx Ground ISP Delivery Driver (Non-CDL)";

pub fn opening() -> String {
    format!(
        "Hi there! Thanks for your interest in the {ROLE} position with {COMPANY}. \
         I'm here to have a quick conversation about the role and see if it might \
         be a good fit - this should only take about 5-10 minutes. First, what's your name?"
    )
}

pub fn ask_email(first_name: &str) -> String {
    format!(
        "Great to meet you, {first_name}! Before we dive in, what's the best \
         email address to keep your application under?"
    )
}

pub fn invalid_email() -> String {
    "Hmm, that doesn't look like a valid email address - could you double-check it for me?"
        .to_string()
}

pub fn question(requirement: MandatoryRequirement) -> &'static str {
    match requirement {
        MandatoryRequirement::AgeAtLeast21 => {
            "To start with a basic requirement, can you confirm you're at least 21 years old?"
        }
        MandatoryRequirement::ValidDriversLicense => {
            "Do you currently have a valid driver's license?"
        }
        MandatoryRequirement::CleanDrivingRecord => {
            "How would you describe your driving record over the past 3-5 years? \
             Any major violations, accidents, or moving violations?"
        }
        MandatoryRequirement::BackgroundScreening => {
            "This position requires passing a background check. Are you comfortable with that?"
        }
        MandatoryRequirement::DrugScreening => {
            "We also run a drug screening for all drivers. Are you comfortable with that as well?"
        }
        MandatoryRequirement::Lift150Lbs => {
            "The role involves heavy lifting - packages up to 150 pounds. \
             Are you physically able to handle that requirement?"
        }
        MandatoryRequirement::ScheduleAvailability => {
            "This role requires weekend availability and shifts can run 10-12 hours. \
             Does that work with your schedule?"
        }
    }
}

pub fn clarification(requirement: MandatoryRequirement) -> &'static str {
    match requirement {
        MandatoryRequirement::AgeAtLeast21 => {
            "Just to be sure - are you 21 or older as of today?"
        }
        MandatoryRequirement::ValidDriversLicense => {
            "Is your license currently active, with no suspensions?"
        }
        MandatoryRequirement::CleanDrivingRecord => {
            "Can you tell me a bit more - any DUI, reckless driving, or multiple \
             moving violations in the last few years?"
        }
        MandatoryRequirement::BackgroundScreening => {
            "Is there anything that might come up in a background check that we should discuss?"
        }
        MandatoryRequirement::DrugScreening => {
            "Is there anything that might come up in a drug screening that we should discuss?"
        }
        MandatoryRequirement::Lift150Lbs => {
            "Have you done physical work before that involved heavy lifting?"
        }
        MandatoryRequirement::ScheduleAvailability => {
            "Can you tell me more about your availability - which days and shift lengths work for you?"
        }
    }
}

pub fn preferred_prompt(category: PreferredCategory) -> &'static str {
    match category {
        PreferredCategory::Experience => {
            "Do you have any previous delivery, courier, or driving experience? \
             If so, what did you deliver and for how long?"
        }
        PreferredCategory::TimeManagement => {
            "Delivery drivers manage multiple stops and tight schedules. \
             How do you typically stay organized during a busy day?"
        }
        PreferredCategory::IndependentWork => {
            "You'll be on the road solo most of the day. How do you feel about \
             working independently without direct supervision?"
        }
    }
}

pub fn disqualification(name: &str, requirement: MandatoryRequirement) -> String {
    format!(
        "{name}, I really appreciate you taking the time to speak with me today. \
         Based on the {} requirement, this particular role may not be the best \
         match right now, but I encourage you to check our other opportunities.",
        requirement.label()
    )
}

pub fn qualified_closing(name: &str) -> String {
    format!(
        "{name}, thank you for your time today. Based on our conversation, you \
         seem like a strong fit for this position! Our recruiting team will reach \
         out shortly with the formal application and next steps."
    )
}

pub fn already_screened(email: &str) -> String {
    format!(
        "It looks like we already have a completed screening on file for {email}, \
         so I've kept that record in place. Our recruiting team can walk you \
         through where things stand."
    )
}

pub fn transient_trouble() -> String {
    "I'm having trouble reaching our records system right now - give me a moment \
     and we'll try again."
        .to_string()
}

pub fn screening_complete() -> String {
    "Your screening is already wrapped up and saved. If any of your details change, \
     just tell me and I'll update your record."
        .to_string()
}

pub fn off_script_reminder() -> String {
    "I'd like to stay focused on your application to respect your time.".to_string()
}
