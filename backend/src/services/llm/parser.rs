//! Strict parsing of model output into a typed reply

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

use super::models::LLMError;

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)\s*```").expect("code fence regex is valid")
});

/// Pull the JSON document out of a completion.
///
/// Models often wrap JSON in a Markdown fence or surround it with prose;
/// the fenced block wins, then the outermost `{...}` span.
pub fn extract_json(raw: &str) -> &str {
    if let Some(body) = CODE_FENCE.captures(raw).and_then(|c| c.get(1)) {
        return body.as_str();
    }

    let trimmed = raw.trim();
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}

/// Deserialize a completion into `T`. Every field `T` requires must be
/// present with the right type; anything else is a `ParseError`.
pub fn parse_reply<T: DeserializeOwned>(raw: &str) -> Result<T, LLMError> {
    let json = extract_json(raw);
    serde_json::from_str(json).map_err(|e| {
        let name = std::any::type_name::<T>().rsplit("::").next().unwrap_or("reply");
        LLMError::ParseError(format!("Failed to parse {} from completion: {}", name, e))
    })
}
