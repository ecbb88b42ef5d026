//! Chat UI page, embedded into the binary at build time

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "templates/"]
struct Templates;

/// GET /
pub async fn index() -> Response {
    match Templates::get("index.html") {
        Some(page) => Html(page.data.into_owned()).into_response(),
        None => (StatusCode::NOT_FOUND, "index.html not embedded").into_response(),
    }
}
