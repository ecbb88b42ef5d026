//! Single-locale translation of a reply the client already holds

use axum::{Json, extract::State};
use std::sync::Arc;

use crate::AppState;
use crate::models::{TranslateRequest, TranslateResponse, supported_languages};
use crate::utils::{ApiError, ApiResult};

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// POST /translate
#[utoipa::path(
    post,
    path = "/translate",
    request_body = TranslateRequest,
    responses(
        (status = 200, description = "Translated fields", body = TranslateResponse),
        (status = 400, description = "A required field is missing", body = ErrorResponse),
        (status = 500, description = "Translation backend failed", body = ErrorResponse)
    ),
    tag = "Translation"
)]
pub async fn translate(
    State(state): State<Arc<AppState>>,
    payload: Option<Json<TranslateRequest>>,
) -> ApiResult<Json<TranslateResponse>> {
    let req = payload.map(|Json(req)| req).unwrap_or_default();

    let (Some(text), Some(explanation), Some(story), Some(language)) = (
        required(req.text),
        required(req.explanation),
        required(req.story),
        required(req.language),
    ) else {
        return Err(ApiError::validation_error(
            "Text, explanation, story, and target language are required",
        ));
    };

    let fields = state
        .relay
        .translate_fields(&text, &explanation, &story, &language)
        .await
        .map_err(|e| {
            tracing::error!("Error during translation: {}", e);
            ApiError::translation_failed(e.to_string())
        })?;

    Ok(Json(TranslateResponse {
        translated_text: fields.translation,
        translated_explanation: fields.explanation,
        translated_story: fields.story,
        languages: supported_languages(),
        ready_for_translation: true,
    }))
}
