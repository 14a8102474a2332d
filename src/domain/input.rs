//! Input state management.
//!
//! This module provides [`InputState`], the candidate submission a user is
//! editing: free text, an uploaded image, and the explanation language.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bytes::Bytes;
use std::path::Path;

use crate::config::DEFAULT_LANGUAGE;

/// Image extensions the explanation service accepts.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// An uploaded image together with its display preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    file_name: String,
    content_type: String,
    bytes: Bytes,
    preview: String,
}

impl ImageUpload {
    /// Wrap raw image bytes. The MIME type is guessed from the file name.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let bytes = bytes.into();
        let content_type = guess_content_type(&file_name).to_string();
        let preview = format!("data:{};base64,{}", content_type, BASE64.encode(&bytes));
        Self {
            file_name,
            content_type,
            bytes,
            preview,
        }
    }

    /// Read an image from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }

    /// File name as reported to the service.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// MIME type guessed from the file name.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Raw image bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// `data:` URL for display. Has no bearing on submission.
    pub fn preview(&self) -> &str {
        &self.preview
    }

    /// Whether the file extension is one the service accepts.
    pub fn is_supported_format(&self) -> bool {
        extension_of(&self.file_name)
            .is_some_and(|ext| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
    }
}

fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}

fn guess_content_type(file_name: &str) -> &'static str {
    match extension_of(file_name).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// The payload a submission would carry, after precedence is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission<'a> {
    /// Text only
    Text(&'a str),
    /// An image, regardless of any text
    Image(&'a ImageUpload),
}

/// Candidate input for an explanation request.
///
/// Nothing here is cleared automatically; values persist until overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputState {
    text: Option<String>,
    image: Option<ImageUpload>,
    language: String,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    /// Create an empty InputState using the default language.
    pub fn new() -> Self {
        Self::with_language(DEFAULT_LANGUAGE)
    }

    /// Create an empty InputState with a preselected language.
    pub fn with_language(language: impl Into<String>) -> Self {
        Self {
            text: None,
            image: None,
            language: language.into(),
        }
    }

    /// Replace the free-form text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Replace the uploaded image.
    pub fn set_image(&mut self, image: ImageUpload) {
        self.image = Some(image);
    }

    /// Remove the uploaded image, if any.
    pub fn clear_image(&mut self) {
        self.image = None;
    }

    /// Set the explanation language code. Not validated.
    pub fn set_language(&mut self, code: impl Into<String>) {
        self.language = code.into();
    }

    /// Current text, if any was set.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Current image, if any.
    pub fn image(&self) -> Option<&ImageUpload> {
        self.image.as_ref()
    }

    /// Explanation language code.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// True iff the text is non-empty or an image is set.
    pub fn is_submittable(&self) -> bool {
        self.submission().is_some()
    }

    /// The payload that would be submitted. An image wins over text.
    pub fn submission(&self) -> Option<Submission<'_>> {
        if let Some(image) = &self.image {
            return Some(Submission::Image(image));
        }
        match self.text.as_deref() {
            Some(text) if !text.is_empty() => Some(Submission::Text(text)),
            _ => None,
        }
    }
}
