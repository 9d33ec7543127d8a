use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Greeting,
    Pricing,
    Services,
    Portfolio,
    Contact,
    General,
}

impl Intent {
    pub const fn label(self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Pricing => "pricing",
            Intent::Services => "services",
            Intent::Portfolio => "portfolio",
            Intent::Contact => "contact",
            Intent::General => "general",
        }
    }

    /// Steer for the model, appended to the system prompt.
    pub const fn hint(self) -> &'static str {
        match self {
            Intent::Greeting => "The visitor is saying hello. Greet them and ask what they are building.",
            Intent::Pricing => "The visitor asks about cost. Explain that pricing depends on scope, mention engagements start under ₹3L and scale past ₹20L, and suggest the contact form for a quote.",
            Intent::Services => "The visitor asks what we offer. Summarize AI marketplace platforms, custom AI solutions, web and mobile applications, and technology consulting.",
            Intent::Portfolio => "The visitor wants examples of past work. Point them to the portfolio and case studies pages.",
            Intent::Contact => "The visitor wants to talk to someone. Invite them to use the contact form or book a demo.",
            Intent::General => "Answer briefly and steer towards how we can help with their project.",
        }
    }

    /// Reply used when no model is configured or the call fails.
    pub const fn fallback_reply(self) -> &'static str {
        match self {
            Intent::Greeting => "Hi there! I can tell you about our services, pricing, or past projects. What are you working on?",
            Intent::Pricing => "Every project is scoped individually. Engagements range from under ₹3L to ₹20L+. Share a few details through the contact form and we'll send a tailored estimate.",
            Intent::Services => "We build AI marketplace platforms, custom AI solutions, web and mobile applications, and offer technology consulting.",
            Intent::Portfolio => "Take a look at our portfolio and case studies pages for projects we've delivered.",
            Intent::Contact => "You can reach us through the contact form or book a demo, and someone from our team will get back to you shortly.",
            Intent::General => "Thanks for your question! Our team would be happy to help. Use the contact form and we'll follow up.",
        }
    }
}

fn rules() -> &'static [(Intent, Regex)] {
    static RULES: OnceLock<Vec<(Intent, Regex)>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            (
                Intent::Pricing,
                r"(?i)\b(price|pricing|cost|costs|budget|quote|rate|rates|how much|expensive|cheap)\b",
            ),
            (
                Intent::Portfolio,
                r"(?i)\b(portfolio|case stud(y|ies)|examples?|past work|clients?|projects you)\b",
            ),
            (
                Intent::Services,
                r"(?i)\b(services?|offer|build|develop|ai|marketplace|mobile|web app|consulting)\b",
            ),
            (
                Intent::Contact,
                r"(?i)\b(contact|call|email|phone|talk|meet|meeting|demo|reach)\b",
            ),
            (
                Intent::Greeting,
                r"(?i)^\s*(hi|hello|hey|good (morning|afternoon|evening)|namaste)\b",
            ),
        ]
        .into_iter()
        .map(|(intent, pattern)| {
            (
                intent,
                Regex::new(pattern).expect("intent regex should compile"),
            )
        })
        .collect()
    })
}

/// First matching rule wins; topical intents outrank a bare greeting.
pub fn classify(message: &str) -> Intent {
    rules()
        .iter()
        .find(|(_, pattern)| pattern.is_match(message))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::General)
}
