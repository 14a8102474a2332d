//! Turns an [`InputState`] into a transport-ready request.
//!
//! Encoding is pure: no I/O, no logging of payloads. An image always wins
//! over text, and the language code is copied verbatim.

use bytes::Bytes;

use crate::domain::{InputState, Submission};
use crate::error::{ExplainError, ExplainResult};

/// Which wire encoding a request uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// JSON body to the explain-by-text endpoint
    Text,
    /// Multipart body to the explain-by-image endpoint
    Image,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Text => "text",
            RequestKind::Image => "image",
        }
    }
}

/// Payload carried by a [`RequestDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPayload {
    Text(String),
    Image {
        file_name: String,
        content_type: String,
        bytes: Bytes,
    },
}

/// An immutable, fully-resolved explanation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    payload: RequestPayload,
    language: String,
}

impl RequestDescriptor {
    /// Which encoding path was chosen.
    pub fn kind(&self) -> RequestKind {
        match self.payload {
            RequestPayload::Text(_) => RequestKind::Text,
            RequestPayload::Image { .. } => RequestKind::Image,
        }
    }

    pub fn payload(&self) -> &RequestPayload {
        &self.payload
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Payload size in bytes, for logging.
    pub fn payload_len(&self) -> usize {
        match &self.payload {
            RequestPayload::Text(text) => text.len(),
            RequestPayload::Image { bytes, .. } => bytes.len(),
        }
    }
}

/// Build the request for the current input.
///
/// Fails with [`ExplainError::Validation`] when the input is not submittable.
pub fn encode(input: &InputState) -> ExplainResult<RequestDescriptor> {
    let payload = match input.submission() {
        Some(Submission::Image(image)) => RequestPayload::Image {
            file_name: image.file_name().to_string(),
            content_type: image.content_type().to_string(),
            bytes: image.bytes().clone(),
        },
        Some(Submission::Text(text)) => RequestPayload::Text(text.to_string()),
        None => return Err(ExplainError::missing_input()),
    };

    Ok(RequestDescriptor {
        payload,
        language: input.language().to_string(),
    })
}
