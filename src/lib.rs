//! Punchline - ask an explanation service why something is funny
//!
//! The library holds the request lifecycle and the incremental reveal engine;
//! the binary is a thin terminal front end over them.
//!
//! ```text
//! InputState ─▶ encoder::encode ─▶ ExplanationClient::send
//!                                          │
//!          RequestLifecycle (phase) ◀──────┘
//!                    │ Success
//!                    ▼
//!             RevealScheduler ─▶ watch::Receiver<RevealState> ─▶ display
//! ```

pub mod adapters;
pub mod cli;
pub mod client;
pub mod config;
pub mod domain;
pub mod encoder;
pub mod error;
pub mod lifecycle;
pub mod reveal;
pub mod traits;

pub use client::{Explanation, ExplanationClient};
pub use config::ExplainerConfig;
pub use domain::{ImageUpload, InputState};
pub use error::{ExplainError, ExplainResult};
pub use lifecycle::{LifecyclePhase, RequestLifecycle};
pub use reveal::{RevealHandle, RevealScheduler, RevealState};
