//! Mock implementations for testing.
//!
//! Lets the client and lifecycle be exercised without network access.

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedBody, RecordedRequest};
