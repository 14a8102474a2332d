//! Common test utilities for integration tests.
//!
//! Reusable inputs, response bodies and lifecycle constructors.

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use punchline::{ExplainerConfig, ExplanationClient, ImageUpload, InputState, RequestLifecycle};
use std::time::Duration;

/// Reveal cadence used by tests, short enough to keep real-time tests fast.
pub const TEST_REVEAL_INTERVAL: Duration = Duration::from_millis(2);

/// A service success body.
pub fn success_body(explanation: &str, model: &str, language: &str) -> serde_json::Value {
    serde_json::json!({
        "explanation": explanation,
        "model": model,
        "language": language,
    })
}

/// Input holding only text.
pub fn text_input(text: &str, language: &str) -> InputState {
    let mut input = InputState::with_language(language);
    input.set_text(text);
    input
}

/// Input holding a small PNG upload.
pub fn image_input(language: &str) -> InputState {
    let mut input = InputState::with_language(language);
    input.set_image(ImageUpload::new("meme.png", b"\x89PNG\r\n".to_vec()));
    input
}

/// Config pointing at `base_url` with the test reveal cadence.
pub fn test_config(base_url: &str) -> ExplainerConfig {
    ExplainerConfig::new()
        .with_base_url(base_url)
        .with_reveal_interval(TEST_REVEAL_INTERVAL)
}

/// Lifecycle talking to a real HTTP server (usually wiremock).
pub fn http_lifecycle(base_url: &str) -> RequestLifecycle {
    RequestLifecycle::new(ExplanationClient::new(test_config(base_url)))
}

/// Lifecycle over a mock HTTP client.
pub fn mock_lifecycle(client: MockHttpClient) -> RequestLifecycle<MockHttpClient> {
    RequestLifecycle::new(ExplanationClient::with_http(
        test_config("http://svc.test"),
        client,
    ))
}
