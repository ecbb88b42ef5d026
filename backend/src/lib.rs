pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::services::{
    ConversationMemory, LlmClient, ResponseGenerator, TranslationRelay, Translator,
};

/// Shared state handed to every request handler
pub struct AppState {
    pub memory: Arc<ConversationMemory>,
    pub generator: ResponseGenerator,
    pub relay: TranslationRelay,
}

impl AppState {
    pub fn new(llm: Arc<dyn LlmClient>, translator: Arc<dyn Translator>, config: &Config) -> Self {
        let memory = Arc::new(ConversationMemory::new());
        Self {
            generator: ResponseGenerator::new(llm, memory.clone(), config.history.context_turns),
            relay: TranslationRelay::new(translator),
            memory,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::chat::query,
        handlers::chat::clear_history,
        handlers::translate::translate,
    ),
    components(schemas(
        models::QueryRequest,
        models::QueryResponse,
        models::TranslateRequest,
        models::TranslateResponse,
        models::ClearHistoryResponse,
        models::ErrorResponse,
        models::StructuredReply,
        models::ThirukkuralReply,
        models::GitaReply,
        models::TranslatedFields,
    )),
    tags(
        (name = "Chat", description = "Verse lookup and conversation history"),
        (name = "Translation", description = "Azure Translator relay"),
    ),
    info(title = "Sacred Verse Chat API", description = "Thirukkural and Bhagavad Gita chatbot")
)]
pub struct ApiDoc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::home::index))
        .route("/query", post(handlers::chat::query))
        .route("/translate", post(handlers::translate::translate))
        .route("/clear_history", post(handlers::chat::clear_history))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
