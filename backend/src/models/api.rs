use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::verse::{StructuredReply, TranslationBundle, supported_languages};

// Request fields are all optional so that missing values surface as
// validation errors with the expected message instead of extractor rejections.

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub story: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QueryResponse {
    #[serde(flatten)]
    pub reply: StructuredReply,
    /// Absent for canned greetings
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<BTreeMap<String, TranslatedFields>>)]
    pub translations: Option<TranslationBundle>,
    pub languages: Vec<String>,
    pub ready_for_translation: bool,
}

impl QueryResponse {
    pub fn new(reply: StructuredReply, translations: Option<TranslationBundle>) -> Self {
        Self {
            reply,
            translations,
            languages: supported_languages(),
            ready_for_translation: true,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TranslateResponse {
    pub translated_text: String,
    pub translated_explanation: String,
    pub translated_story: String,
    pub languages: Vec<String>,
    pub ready_for_translation: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClearHistoryResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
