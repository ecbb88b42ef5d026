// Common test utilities and helpers

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use serde_json::{Value, json};
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use crate::config::Config;
use crate::services::{LLMError, LlmClient, TranslateError, Translator};
use crate::{AppState, build_router};

/// Scripted LLM: hands out queued replies in order and records prompts
pub struct MockLlm {
    replies: Mutex<VecDeque<Result<String, LLMError>>>,
    prompts: Mutex<Vec<String>>,
}

impl MockLlm {
    pub fn with_replies(replies: Vec<Result<String, LLMError>>) -> Arc<Self> {
        Arc::new(Self { replies: Mutex::new(replies.into()), prompts: Mutex::new(Vec::new()) })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, prompt: &str) -> Result<String, LLMError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies.lock().unwrap().pop_front().unwrap_or(Err(LLMError::EmptyResponse))
    }
}

/// Deterministic translator: `"[<lang>] <text>"`, failing for chosen locales
pub struct MockTranslator {
    failing: HashSet<String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl Default for MockTranslator {
    fn default() -> Self {
        Self::failing_for(&[])
    }
}

impl MockTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(languages: &[&str]) -> Self {
        Self {
            failing: languages.iter().map(|l| l.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(language, text)` pairs in call order
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslateError> {
        self.calls.lock().unwrap().push((target_language.to_string(), text.to_string()));
        if self.failing.contains(target_language) {
            let body = "service unavailable".to_string();
            return Err(TranslateError::Api { status: 503, body });
        }
        Ok(format!("[{}] {}", target_language, text))
    }
}

pub fn kural_json(section: &str, translation: &str) -> String {
    json!({
        "verse": "அகர முதல எழுத்தெல்லாம்",
        "translation": translation,
        "section": section,
        "explanation": "An explanation of the couplet",
        "story": "A short modern story"
    })
    .to_string()
}

pub fn gita_json(chapter: &str, translation: &str) -> String {
    json!({
        "verse": "कर्मण्येवाधिकारस्ते",
        "translation": translation,
        "chapter": chapter,
        "explanation": "An explanation of the verse",
        "story": "A short modern story"
    })
    .to_string()
}

/// Router plus handles on its collaborators
pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub llm: Arc<MockLlm>,
    pub translator: Arc<MockTranslator>,
}

pub fn test_app(llm: Arc<MockLlm>, translator: MockTranslator) -> TestApp {
    let translator = Arc::new(translator);
    let state = Arc::new(AppState::new(llm.clone(), translator.clone(), &Config::default()));
    TestApp { router: build_router(state.clone()), state, llm, translator }
}

/// Send a request through the router and decode the JSON response body
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value =
        if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

pub async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(router, Method::POST, uri, Some(body)).await
}

/// Serve `app` on an ephemeral local port and return its base URL
pub async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}
