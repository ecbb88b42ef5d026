pub mod classifier;
pub mod conversation;
pub mod generator;
pub mod llm;
pub mod translator;

pub use classifier::{classify, is_follow_up, is_greeting, resolve_follow_up};
pub use conversation::{ConversationLog, ConversationMemory};
pub use generator::ResponseGenerator;
pub use llm::{GeminiClient, LLMError, LlmClient};
pub use translator::{
    AzureCredentials, AzureTranslator, TranslateError, TranslationRelay, Translator,
};
