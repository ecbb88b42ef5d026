//! LLM Service Module
//!
//! Turns a query plus conversation context into a typed verse reply.
//!
//! # Architecture
//! ```text
//! ┌──────────────────┐
//! │ VerseScenario    │  ← prompt template + reply schema per domain
//! └────────┬─────────┘
//!          │ rendered prompt
//!          ▼
//! ┌──────────────────┐
//! │ LlmClient        │  ← Trait (Gemini in production, mocks in tests)
//! └────────┬─────────┘
//!          │ raw completion
//!          ▼
//! ┌──────────────────┐
//! │ parse_reply      │  ← strict schema check
//! └──────────────────┘
//! ```

mod client;
mod models;
mod parser;
mod scenarios;

pub use client::{GeminiClient, LlmClient};
pub use models::LLMError;
pub use parser::{extract_json, parse_reply};
pub use scenarios::{GitaScenario, ThirukkuralScenario, VerseScenario, render_template};
