//! Chat Handlers - verse lookup and history reset

use axum::{Json, extract::State};
use std::sync::Arc;

use crate::AppState;
use crate::models::{
    ClearHistoryResponse, QueryRequest, QueryResponse, StructuredReply, TranslationBundle,
};
use crate::services::{classify, is_follow_up, is_greeting, resolve_follow_up};
use crate::utils::{ApiError, ApiResult};

/// POST /query
#[utoipa::path(
    post,
    path = "/query",
    request_body = QueryRequest,
    responses(
        (status = 200, description = "Verse with translations", body = QueryResponse),
        (status = 400, description = "Query is missing", body = ErrorResponse)
    ),
    tag = "Chat"
)]
pub async fn query(
    State(state): State<Arc<AppState>>,
    payload: Option<Json<QueryRequest>>,
) -> ApiResult<Json<QueryResponse>> {
    let req = payload.map(|Json(req)| req).unwrap_or_default();
    let mut query = req
        .query
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::validation_error("Query is required"))?;

    if is_greeting(&query) {
        return Ok(Json(QueryResponse::new(StructuredReply::greeting(), None)));
    }

    let mut domain = classify(&query);
    tracing::debug!("Classified query as {}", domain);

    if is_follow_up(&query) {
        let (follow_up_domain, rewritten) = resolve_follow_up(&query, &state.memory);
        tracing::debug!("Follow-up query rewritten to '{}' ({})", rewritten, follow_up_domain);
        domain = follow_up_domain;
        query = rewritten;
    }

    let response = match state.generator.generate(&query, domain).await {
        Ok(reply) => {
            let translations = state.relay.translate_reply(&reply).await;
            QueryResponse::new(reply, Some(translations))
        },
        Err(e) => {
            tracing::error!("Error generating response: {}", e);
            QueryResponse::new(StructuredReply::failure(&e), Some(TranslationBundle::new()))
        },
    };

    Ok(Json(response))
}

/// POST /clear_history
#[utoipa::path(
    post,
    path = "/clear_history",
    responses(
        (status = 200, description = "Both conversation logs cleared", body = ClearHistoryResponse)
    ),
    tag = "Chat"
)]
pub async fn clear_history(State(state): State<Arc<AppState>>) -> Json<ClearHistoryResponse> {
    state.memory.clear_all();
    tracing::info!("Conversation history cleared");
    Json(ClearHistoryResponse { message: "Conversation history cleared!".to_string() })
}
