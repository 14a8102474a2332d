//! Mock HTTP client for testing.
//!
//! Provides a configurable mock HTTP client that can return predefined
//! responses or errors, optionally after a delay, and records every request
//! it receives.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::traits::{HttpClient, HttpError, MultipartFile, Response};

/// Body of a recorded request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedBody {
    /// JSON document as sent
    Json(String),
    /// Multipart upload
    Multipart(MultipartFile),
}

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL including query string
    pub url: String,
    /// Request body
    pub body: RecordedBody,
}

impl RecordedRequest {
    /// JSON body, if this was a JSON request.
    pub fn json_body(&self) -> Option<&str> {
        match &self.body {
            RecordedBody::Json(body) => Some(body),
            RecordedBody::Multipart(_) => None,
        }
    }

    /// Uploaded file, if this was a multipart request.
    pub fn multipart_file(&self) -> Option<&MultipartFile> {
        match &self.body {
            RecordedBody::Multipart(file) => Some(file),
            RecordedBody::Json(_) => None,
        }
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response (any status)
    Success(Response),
    /// Return a transport error
    Error(HttpError),
}

impl MockResponse {
    /// Response with a JSON body.
    pub fn json(status: u16, body: &str) -> Self {
        MockResponse::Success(Response::new(status, Bytes::from(body.to_string())))
    }
}

/// Mock HTTP client for testing.
///
/// Responses are looked up by exact URL match, then URL prefix match, then
/// the default response. A response may be delayed to simulate a slow
/// service; the delay runs on tokio's clock, so paused-time tests stay fast.
///
/// # Example
///
/// ```ignore
/// use punchline::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "http://localhost:8000/explain/text",
///     MockResponse::json(200, r#"{"explanation":"It's a pun."}"#),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    /// Configured responses (and their delay) by URL pattern
    responses: Arc<Mutex<HashMap<String, (MockResponse, Duration)>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a response for a specific URL or URL prefix.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        self.set_delayed_response(url, response, Duration::ZERO);
    }

    /// Set a response for a URL or URL prefix that is returned after `delay`.
    pub fn set_delayed_response(&self, url: &str, response: MockResponse, delay: Duration) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), (response, delay));
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests made so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    /// Record a request.
    fn record_request(&self, url: &str, body: RecordedBody) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            url: url.to_string(),
            body,
        });
    }

    /// Get the response for a URL, along with how long to wait before returning it.
    fn get_response(&self, url: &str) -> Option<(MockResponse, Duration)> {
        let responses = self.responses.lock().unwrap();

        // First try exact match
        if let Some(entry) = responses.get(url) {
            return Some(entry.clone());
        }

        // Then try prefix match (for URL patterns)
        for (pattern, entry) in responses.iter() {
            if url.starts_with(pattern) {
                return Some(entry.clone());
            }
        }

        // Finally use default
        let default = self.default_response.lock().unwrap();
        default.clone().map(|response| (response, Duration::ZERO))
    }

    async fn respond(&self, url: &str) -> Result<Response, HttpError> {
        let Some((response, delay)) = self.get_response(url) else {
            return Err(HttpError::Other(format!("No mock response for URL: {}", url)));
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match response {
            MockResponse::Success(response) => Ok(response),
            MockResponse::Error(err) => Err(err),
        }
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_json(&self, url: &str, body: &str) -> Result<Response, HttpError> {
        self.record_request(url, RecordedBody::Json(body.to_string()));
        self.respond(url).await
    }

    async fn post_multipart(
        &self,
        url: &str,
        file: &MultipartFile,
    ) -> Result<Response, HttpError> {
        self.record_request(url, RecordedBody::Multipart(file.clone()));
        self.respond(url).await
    }
}
