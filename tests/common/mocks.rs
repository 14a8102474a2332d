//! Mock implementations for test fixtures.
//!
//! This module re-exports the mock HTTP client from `punchline::adapters::mock`
//! and provides a builder for the common response setups.

#![allow(dead_code)]

pub use punchline::adapters::mock::{MockHttpClient, MockResponse};
pub use punchline::traits::{HttpClient, HttpError};

use std::time::Duration;

/// Configuration for setting up mock HTTP responses.
pub struct MockHttpConfig {
    client: MockHttpClient,
}

impl MockHttpConfig {
    /// Creates a new mock HTTP configuration.
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Configures a JSON response for a URL prefix.
    pub fn with_json_response(self, url: &str, status: u16, json: &str) -> Self {
        self.client.set_response(url, MockResponse::json(status, json));
        self
    }

    /// Configures a JSON response that arrives after `delay`.
    pub fn with_delayed_json_response(
        self,
        url: &str,
        status: u16,
        json: &str,
        delay: Duration,
    ) -> Self {
        self.client
            .set_delayed_response(url, MockResponse::json(status, json), delay);
        self
    }

    /// Configures every unmatched URL to fail at the transport level.
    pub fn with_unreachable_service(self) -> Self {
        self.client
            .set_default_response(MockResponse::Error(HttpError::ConnectionFailed(
                "connection refused".to_string(),
            )));
        self
    }

    /// Builds the configured MockHttpClient.
    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}
