//! Keyword-heuristic implementation of the answer classifier. It stands in
//! for a hosted language model so the service runs self-contained; the
//! orchestrator only sees the trait, so swapping in a model-backed
//! implementation is a drop-in change.

use recruit_ai::workflows::screening::{
    AnswerClassifier, AnswerQuality, CandidateUpdate, ExperienceAnswer, ExperienceLevel,
    IdentityFacts, IndependenceAnswer, MandatoryAnswer, MandatoryRequirement, OrganizationAnswer,
};

pub(crate) struct KeywordClassifier;

const AFFIRMATIVE: [&str; 10] = [
    "yes", "yeah", "yep", "sure", "absolutely", "definitely", "of course", "certainly", "i do",
    "i am",
];

const NEGATIVE: [&str; 7] = [
    "no", "nope", "not", "can't", "cannot", "don't", "won't",
];

fn starts_affirmative(lower: &str) -> bool {
    AFFIRMATIVE.iter().any(|word| lower.starts_with(word))
}

fn starts_negative(lower: &str) -> bool {
    NEGATIVE
        .iter()
        .any(|word| lower.starts_with(word) || lower.starts_with(&format!("i {word}")))
}

fn extract_phone(utterance: &str) -> Option<String> {
    let digits: String = utterance
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    let count = digits.chars().filter(char::is_ascii_digit).count();
    (count >= 7).then(|| digits.trim_matches('-').to_string())
}

impl AnswerClassifier for KeywordClassifier {
    fn identity(&self, utterance: &str) -> IdentityFacts {
        let mut facts = IdentityFacts::default();
        facts.phone = extract_phone(utterance);

        let mut names = Vec::new();
        for word in utterance.split_whitespace() {
            let trimmed = word.trim_matches(|c: char| matches!(c, ',' | '.' | '!' | '?'));
            if trimmed.contains('@') {
                facts.email = Some(trimmed.to_string());
            } else if trimmed.chars().next().is_some_and(char::is_uppercase)
                && trimmed.chars().all(|c| c.is_alphabetic() || c == '\'' || c == '-')
            {
                names.push(trimmed.to_string());
            }
        }

        // "My name is Dana Whitfield" keeps only the capitalized tail.
        let lower = utterance.to_lowercase();
        if lower.contains("my name is") || lower.contains("i'm") || lower.contains("i am") {
            names.retain(|name| !matches!(name.as_str(), "My" | "I" | "I'm"));
        }
        if names.len() >= 2 {
            facts.first_name = Some(names[0].clone());
            facts.last_name = Some(names[1].clone());
        }
        facts
    }

    fn mandatory(&self, requirement: MandatoryRequirement, utterance: &str) -> MandatoryAnswer {
        let lower = utterance.to_lowercase();

        if requirement == MandatoryRequirement::CleanDrivingRecord {
            // The record question is open-ended, so look at content before
            // yes/no shape: "no accidents" is a pass, not a refusal.
            if lower.contains("clean")
                || lower.contains("spotless")
                || lower.contains("no accidents")
                || lower.contains("no violations")
                || lower.contains("nothing on it")
            {
                return MandatoryAnswer::Pass;
            }
            if lower.contains("dui")
                || lower.contains("suspended")
                || lower.contains("reckless")
                || lower.contains("accident")
                || lower.contains("violation")
            {
                return MandatoryAnswer::Fail {
                    reason: "driving record includes recent violations".to_string(),
                };
            }
        }

        if starts_affirmative(&lower) {
            MandatoryAnswer::Pass
        } else if starts_negative(&lower) {
            MandatoryAnswer::Fail {
                reason: format!("candidate does not meet {}", requirement.label()),
            }
        } else {
            MandatoryAnswer::Ambiguous
        }
    }

    fn experience(&self, utterance: &str) -> ExperienceAnswer {
        let lower = utterance.to_lowercase();
        let delivery = lower.contains("deliver") || lower.contains("driver");
        let courier = lower.contains("courier");
        let level = if starts_negative(&lower) && !delivery && !courier {
            ExperienceLevel::None
        } else if lower.contains("year") {
            ExperienceLevel::OneYearPlus
        } else if delivery || courier || lower.contains("month") {
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
        let strong = ["route", "checklist", "plan", "schedule", "prioritize"]
            .iter()
            .any(|word| lower.contains(word));
        let adequate = ["organized", "list", "on time", "calendar"]
            .iter()
            .any(|word| lower.contains(word));
        if strong {
            OrganizationAnswer {
                time_management: true,
                organization: true,
                quality: AnswerQuality::Strong,
            }
        } else if adequate {
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
        let strong = ["on my own", "independent", "self-sufficient", "prefer solo", "love working alone"]
            .iter()
            .any(|phrase| lower.contains(phrase));
        let adequate = ["fine", "comfortable", "alone", "no problem"]
            .iter()
            .any(|phrase| lower.contains(phrase));
        if strong {
            IndependenceAnswer {
                independent: true,
                quality: AnswerQuality::Strong,
            }
        } else if adequate {
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
        let is_correction = lower.starts_with("actually")
            || lower.starts_with("wait")
            || lower.starts_with("correction")
            || lower.contains("i meant");
        if !is_correction {
            return None;
        }

        let affirmed = !NEGATIVE.iter().any(|word| lower.contains(word));
        let mut update = CandidateUpdate::default();
        if lower.contains("weekend") || lower.contains("schedule") || lower.contains("shift") {
            update.has_schedule_availability = Some(affirmed);
        }
        if lower.contains("lift") {
            update.can_lift_150_lbs = Some(affirmed);
        }
        if lower.contains("license") {
            update.has_valid_drivers_license = Some(affirmed);
        }
        if lower.contains("courier") {
            update.has_courier_experience = Some(affirmed);
        }
        if lower.contains("deliver") {
            update.has_delivery_experience = Some(affirmed);
        }
        if let Some(phone) = extract_phone(utterance) {
            update.phone = Some(phone);
        }
        if update.is_empty() {
            return None;
        }
        Some(update)
    }

    fn off_topic(&self, utterance: &str) -> bool {
        let lower = utterance.to_lowercase();
        ["weather", "salary", "sports", "tell me a joke"]
            .iter()
            .any(|phrase| lower.contains(phrase))
    }
}
