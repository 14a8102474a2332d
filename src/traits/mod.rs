//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (JSON POST, multipart POST)

pub mod http;

pub use http::{Headers, HttpClient, HttpError, MultipartFile, Response};
