//! Thirukkural scenario

use super::VerseScenario;
use crate::models::{Domain, StructuredReply, ThirukkuralReply};

const PROMPT: &str = include_str!("thirukkural_prompt.md");

pub struct ThirukkuralScenario;

impl VerseScenario for ThirukkuralScenario {
    type Reply = ThirukkuralReply;

    const DOMAIN: Domain = Domain::Thirukkural;
    const TEMPLATE: &'static str = PROMPT;

    fn into_reply(reply: Self::Reply) -> StructuredReply {
        StructuredReply::Thirukkural(reply)
    }
}
