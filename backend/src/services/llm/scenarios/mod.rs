//! Verse Scenarios
//!
//! One scenario per domain: a prompt template, the reply schema the model
//! must produce, and the conversion into a [`StructuredReply`].
//! Templates use `{query}`, `{chat_history}` and `{format_instructions}`.

pub mod gita;
pub mod thirukkural;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::de::DeserializeOwned;
use utoipa::ToSchema;

use crate::models::{Domain, StructuredReply};

pub use gita::GitaScenario;
pub use thirukkural::ThirukkuralScenario;

pub trait VerseScenario {
    type Reply: DeserializeOwned + for<'s> ToSchema<'s>;

    const DOMAIN: Domain;
    const TEMPLATE: &'static str;

    fn into_reply(reply: Self::Reply) -> StructuredReply;

    fn format_instructions() -> String {
        let (_, schema) = <Self::Reply as ToSchema<'_>>::schema();
        let schema = serde_json::to_string(&schema).unwrap_or_default();
        format!(
            "The output should be a single JSON object that conforms to the JSON schema below. \
All listed properties are required and must be strings. Do not add commentary outside the JSON.\n\n\
Here is the output schema:\n```\n{}\n```",
            schema
        )
    }

    fn render_prompt(query: &str, chat_history: &str) -> String {
        render_template(
            Self::TEMPLATE,
            &[
                ("query", query),
                ("chat_history", chat_history),
                ("format_instructions", &Self::format_instructions()),
            ],
        )
    }
}

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder regex is valid"));

/// Single-pass substitution: values are inserted verbatim and never
/// re-scanned, so braces inside a query or schema are left alone.
/// Unknown placeholders are kept as written.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
