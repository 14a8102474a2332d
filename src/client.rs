//! Explanation service API client.
//!
//! One round trip per call, no retries, no timeout. The lifecycle decides
//! whether a response still matters when it arrives.

use serde::Deserialize;

use crate::adapters::ReqwestHttpClient;
use crate::config::ExplainerConfig;
use crate::encoder::{RequestDescriptor, RequestPayload};
use crate::error::{ExplainError, ExplainResult};
use crate::traits::{HttpClient, MultipartFile, Response};

/// Multipart field carrying the image bytes.
pub const IMAGE_FIELD: &str = "file";

/// Success body returned by both endpoints.
///
/// Older service revisions only send `explanation`.
#[derive(Debug, Clone, Deserialize)]
struct ExplanationResponse {
    explanation: String,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    language: Option<String>,
}

/// A successfully fetched explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    /// The explanation text
    pub explanation: String,
    /// Model that produced it, when the service reports one
    pub model: Option<String>,
    /// Language of the explanation
    pub language: String,
}

/// Client for the explain-by-text and explain-by-image endpoints.
pub struct ExplanationClient<C = ReqwestHttpClient> {
    config: ExplainerConfig,
    http: C,
}

impl ExplanationClient<ReqwestHttpClient> {
    /// Create a client backed by reqwest.
    pub fn new(config: ExplainerConfig) -> Self {
        Self::with_http(config, ReqwestHttpClient::new())
    }
}

impl<C: HttpClient> ExplanationClient<C> {
    /// Create a client over any [`HttpClient`].
    pub fn with_http(config: ExplainerConfig, http: C) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &ExplainerConfig {
        &self.config
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// URL the descriptor will be sent to, query string included.
    pub fn url_for(&self, descriptor: &RequestDescriptor) -> String {
        let lang = urlencoding::encode(descriptor.language());
        match descriptor.payload() {
            RequestPayload::Image { .. } => {
                format!("{}?lang={}", self.config.image_endpoint(), lang)
            }
            RequestPayload::Text(_) if self.config.text_language_query => {
                format!("{}?lang={}", self.config.text_endpoint(), lang)
            }
            RequestPayload::Text(_) => self.config.text_endpoint(),
        }
    }

    /// Perform the exchange for one request.
    pub async fn send(&self, descriptor: &RequestDescriptor) -> ExplainResult<Explanation> {
        let url = self.url_for(descriptor);

        let result = match descriptor.payload() {
            RequestPayload::Text(text) => {
                let body = serde_json::json!({ "text": text }).to_string();
                self.http.post_json(&url, &body).await
            }
            RequestPayload::Image {
                file_name,
                content_type,
                bytes,
            } => {
                let file = MultipartFile {
                    field: IMAGE_FIELD.to_string(),
                    file_name: file_name.clone(),
                    content_type: content_type.clone(),
                    bytes: bytes.clone(),
                };
                self.http.post_multipart(&url, &file).await
            }
        };

        let response = result.map_err(|e| ExplainError::Transport(e.to_string()))?;
        Self::parse_response(&response, descriptor.language())
    }

    fn parse_response(response: &Response, requested_language: &str) -> ExplainResult<Explanation> {
        if !response.is_success() {
            tracing::warn!("Explanation service returned HTTP {}", response.status);
            return Err(ExplainError::RequestFailed {
                status: response.status,
            });
        }

        let body: ExplanationResponse = response
            .json()
            .map_err(|e| ExplainError::Decode(e.to_string()))?;

        Ok(Explanation {
            explanation: body.explanation,
            model: body.model,
            language: body
                .language
                .unwrap_or_else(|| requested_language.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::domain::{ImageUpload, InputState};
    use crate::encoder::encode;
    use crate::traits::HttpError;

    const BASE: &str = "http://svc.test";

    fn client(config: ExplainerConfig) -> ExplanationClient<MockHttpClient> {
        ExplanationClient::with_http(config, MockHttpClient::new())
    }

    fn text_request(text: &str, lang: &str) -> RequestDescriptor {
        let mut input = InputState::with_language(lang);
        input.set_text(text);
        encode(&input).unwrap()
    }

    fn image_request(lang: &str) -> RequestDescriptor {
        let mut input = InputState::with_language(lang);
        input.set_image(ImageUpload::new("meme.png", vec![1u8, 2, 3]));
        encode(&input).unwrap()
    }

    #[test]
    fn test_url_for_text_with_language_query() {
        let client = client(ExplainerConfig::new().with_base_url(BASE));
        assert_eq!(
            client.url_for(&text_request("x", "en")),
            "http://svc.test/explain/text?lang=en"
        );
    }

    #[test]
    fn test_url_for_text_legacy_revision() {
        let client = client(
            ExplainerConfig::new()
                .with_base_url(BASE)
                .with_text_language_query(false),
        );
        assert_eq!(
            client.url_for(&text_request("x", "en")),
            "http://svc.test/explain/text"
        );
        // The image endpoint always carries the language
        assert_eq!(
            client.url_for(&image_request("en")),
            "http://svc.test/explain/image?lang=en"
        );
    }

    #[test]
    fn test_url_language_is_percent_encoded() {
        let client = client(ExplainerConfig::new().with_base_url(BASE));
        assert_eq!(
            client.url_for(&text_request("x", "a b&c")),
            "http://svc.test/explain/text?lang=a%20b%26c"
        );
    }

    #[tokio::test]
    async fn test_send_text_success() {
        let client = client(ExplainerConfig::new().with_base_url(BASE));
        client.http().set_response(
            "http://svc.test/explain/text",
            MockResponse::json(
                200,
                r#"{"explanation":"It's a pun.","model":"m1","language":"en"}"#,
            ),
        );

        let explanation = client
            .send(&text_request("why is this funny", "en"))
            .await
            .unwrap();

        assert_eq!(
            explanation,
            Explanation {
                explanation: "It's a pun.".to_string(),
                model: Some("m1".to_string()),
                language: "en".to_string(),
            }
        );
        let requests = client.http().get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://svc.test/explain/text?lang=en");
        assert_eq!(requests[0].json_body(), Some(r#"{"text":"why is this funny"}"#));
    }

    #[tokio::test]
    async fn test_send_image_uses_multipart_file_field() {
        let client = client(ExplainerConfig::new().with_base_url(BASE));
        client.http().set_default_response(MockResponse::json(
            200,
            r#"{"explanation":"Cat.","model":"m2","language":"de"}"#,
        ));

        let explanation = client.send(&image_request("de")).await.unwrap();
        assert_eq!(explanation.explanation, "Cat.");

        let requests = client.http().get_requests();
        assert_eq!(requests[0].url, "http://svc.test/explain/image?lang=de");
        let file = requests[0].multipart_file().unwrap();
        assert_eq!(file.field, "file");
        assert_eq!(file.file_name, "meme.png");
        assert_eq!(file.content_type, "image/png");
        assert_eq!(file.bytes.as_ref(), &[1u8, 2, 3]);
    }

    #[tokio::test]
    async fn test_legacy_body_without_model_or_language() {
        let client = client(ExplainerConfig::new().with_base_url(BASE));
        client
            .http()
            .set_default_response(MockResponse::json(200, r#"{"explanation":"Old."}"#));

        let explanation = client.send(&text_request("x", "fr")).await.unwrap();
        assert_eq!(explanation.model, None);
        assert_eq!(explanation.language, "fr");
    }

    #[tokio::test]
    async fn test_non_success_status_is_request_failed() {
        let client = client(ExplainerConfig::new().with_base_url(BASE));
        client.http().set_default_response(MockResponse::json(
            500,
            r#"{"detail":"Error processing text explanation"}"#,
        ));

        let err = client.send(&text_request("x", "en")).await.unwrap_err();
        assert_eq!(err, ExplainError::RequestFailed { status: 500 });
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let client = client(ExplainerConfig::new().with_base_url(BASE));
        client
            .http()
            .set_default_response(MockResponse::json(200, "<html>oops</html>"));

        let err = client.send(&text_request("x", "en")).await.unwrap_err();
        assert!(matches!(err, ExplainError::Decode(_)));
    }

    #[tokio::test]
    async fn test_empty_body_is_decode_error() {
        let client = client(ExplainerConfig::new().with_base_url(BASE));
        client.http().set_default_response(MockResponse::json(200, ""));

        let err = client.send(&text_request("x", "en")).await.unwrap_err();
        assert!(matches!(err, ExplainError::Decode(_)));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let client = client(ExplainerConfig::new().with_base_url(BASE));
        client
            .http()
            .set_default_response(MockResponse::Error(HttpError::ConnectionFailed(
                "refused".to_string(),
            )));

        let err = client.send(&text_request("x", "en")).await.unwrap_err();
        assert_eq!(
            err,
            ExplainError::Transport("Connection failed: refused".to_string())
        );
    }
}
