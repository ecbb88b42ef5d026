//! Bhagavad Gita scenario

use super::VerseScenario;
use crate::models::{Domain, GitaReply, StructuredReply};

const PROMPT: &str = include_str!("gita_prompt.md");

pub struct GitaScenario;

impl VerseScenario for GitaScenario {
    type Reply = GitaReply;

    const DOMAIN: Domain = Domain::BhagavadGita;
    const TEMPLATE: &'static str = PROMPT;

    fn into_reply(reply: Self::Reply) -> StructuredReply {
        StructuredReply::Gita(reply)
    }
}
