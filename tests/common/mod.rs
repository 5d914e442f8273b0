// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::{Json, Router};
use ecotrace::config::Config;
use ecotrace::routes::create_router;
use ecotrace::services::{CoachService, GeminiClient};
use ecotrace::store::MemoryStore;
use ecotrace::AppState;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Create a test app over an in-memory store with the coach disabled.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (Router, Arc<AppState>) {
    create_test_app_with_coach(CoachService::new(None)).await
}

/// Create a test app with the given coach.
#[allow(dead_code)]
pub async fn create_test_app_with_coach(coach: CoachService) -> (Router, Arc<AppState>) {
    let config = Config::test_default();
    let store = Arc::new(MemoryStore::new());
    let state = Arc::new(AppState::new(config, store, coach));
    state.auth.restore().await;

    (create_router(state.clone()), state)
}

/// Build a request with an optional JSON body.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// A stand-in for the Gemini endpoint that counts calls.
#[allow(dead_code)]
pub struct MockGemini {
    pub base_url: String,
    pub calls: Arc<AtomicUsize>,
    pub last_request: Arc<Mutex<Option<Value>>>,
}

#[allow(dead_code)]
impl MockGemini {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// A coach pointed at this mock.
    pub fn coach(&self) -> CoachService {
        let client = GeminiClient::new(
            "test_key".to_string(),
            "gemini-2.5-flash".to_string(),
            self.base_url.clone(),
            Duration::from_secs(5),
        )
        .unwrap();
        CoachService::new(Some(client))
    }
}

/// Serve `body` with `status` for every request, after an optional delay.
#[allow(dead_code)]
pub async fn spawn_mock_gemini(status: StatusCode, body: Value, delay: Option<Duration>) -> MockGemini {
    let calls = Arc::new(AtomicUsize::new(0));
    let last_request = Arc::new(Mutex::new(None));

    let handler = {
        let calls = calls.clone();
        let last_request = last_request.clone();
        move |Json(request): Json<Value>| {
            let calls = calls.clone();
            let last_request = last_request.clone();
            let body = body.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                *last_request.lock().unwrap() = Some(request);
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                (status, Json(body))
            }
        }
    };

    let app = Router::new().fallback(handler);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockGemini {
        base_url: format!("http://{}", addr),
        calls,
        last_request,
    }
}

/// Wrap model output text in a `generateContent` response.
#[allow(dead_code)]
pub fn candidate_body(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

/// Well-formed feedback as the model would return it.
#[allow(dead_code)]
pub fn sample_feedback_json() -> Value {
    json!({
        "summary": "You're doing well, with home energy as your main source.",
        "impactArea": {
            "name": "Energy",
            "explanation": "Gas heating in a small house dominates your day."
        },
        "tips": [
            {"tip": "Try a heat pump quote."},
            {"tip": "Seal drafts around windows."}
        ],
        "motivation": "Every degree counts!"
    })
}
