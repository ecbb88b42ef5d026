//! Response generation: prompt, completion, strict parse, history bookkeeping.

use std::sync::Arc;

use crate::models::{Domain, StructuredReply};
use crate::services::conversation::ConversationMemory;
use crate::services::llm::{
    GitaScenario, LLMError, LlmClient, ThirukkuralScenario, VerseScenario, parse_reply,
};

pub struct ResponseGenerator {
    llm: Arc<dyn LlmClient>,
    memory: Arc<ConversationMemory>,
    context_turns: usize,
}

impl ResponseGenerator {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        memory: Arc<ConversationMemory>,
        context_turns: usize,
    ) -> Self {
        Self { llm, memory, context_turns }
    }

    /// Generate a reply for `query` in `domain`.
    ///
    /// On success the query and a one-line summary are appended to the
    /// domain's log. On failure the log is left untouched.
    pub async fn generate(&self, query: &str, domain: Domain) -> Result<StructuredReply, LLMError> {
        match domain {
            Domain::Thirukkural => self.run::<ThirukkuralScenario>(query).await,
            Domain::BhagavadGita => self.run::<GitaScenario>(query).await,
        }
    }

    async fn run<S: VerseScenario>(&self, query: &str) -> Result<StructuredReply, LLMError> {
        let chat_history = self.memory.read_recent(S::DOMAIN, self.context_turns);
        let prompt = S::render_prompt(query, &chat_history);
        tracing::debug!(
            domain = %S::DOMAIN,
            history_lines = chat_history.lines().count(),
            "Rendered prompt"
        );

        let raw = self.llm.complete(&prompt).await?;
        let reply = S::into_reply(parse_reply::<S::Reply>(&raw)?);

        self.memory.record_exchange(S::DOMAIN, query, reply.summary_line());
        Ok(reply)
    }
}
