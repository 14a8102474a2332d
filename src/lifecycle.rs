//! Request lifecycle state machine.
//!
//! ```text
//! Idle ──submit──▶ Loading ──resolve──▶ Success | Error
//!                    ▲                        │
//!                    └─────────submit─────────┘
//! ```
//!
//! Only one request is current at a time. Every `submit()` bumps a
//! generation counter; the exchange runs on a spawned task and reports back
//! over a channel tagged with the generation it was started under. Responses
//! whose generation is no longer current are dropped without touching the
//! phase.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::adapters::ReqwestHttpClient;
use crate::client::{Explanation, ExplanationClient};
use crate::domain::InputState;
use crate::encoder::encode;
use crate::error::ExplainResult;
use crate::traits::HttpClient;

/// The current discrete state of the request lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LifecyclePhase {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    /// The current request produced an explanation
    Success(Explanation),
    /// The current request failed; `message` is ready for display
    Error { message: String },
}

impl LifecyclePhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, LifecyclePhase::Loading)
    }

    /// The explanation, if the phase is `Success`.
    pub fn explanation(&self) -> Option<&Explanation> {
        match self {
            LifecyclePhase::Success(explanation) => Some(explanation),
            _ => None,
        }
    }

    /// The error message, if the phase is `Error`.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            LifecyclePhase::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LifecyclePhase::Idle => "idle",
            LifecyclePhase::Loading => "loading",
            LifecyclePhase::Success(_) => "success",
            LifecyclePhase::Error { .. } => "error",
        }
    }
}

/// Messages sent from exchange tasks back to the lifecycle.
#[derive(Debug, Clone)]
pub enum LifecycleMessage {
    /// An exchange finished
    Resolved {
        generation: u64,
        outcome: ExplainResult<Explanation>,
    },
}

/// Owns the lifecycle phase and the generation counter for one view.
pub struct RequestLifecycle<C: HttpClient + 'static = ReqwestHttpClient> {
    client: Arc<ExplanationClient<C>>,
    phase: LifecyclePhase,
    generation: u64,
    message_tx: mpsc::UnboundedSender<LifecycleMessage>,
    message_rx: mpsc::UnboundedReceiver<LifecycleMessage>,
}

impl<C: HttpClient + 'static> RequestLifecycle<C> {
    pub fn new(client: ExplanationClient<C>) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            client: Arc::new(client),
            phase: LifecyclePhase::Idle,
            generation: 0,
            message_tx,
            message_rx,
        }
    }

    pub fn phase(&self) -> &LifecyclePhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    /// Generation of the most recent submission (0 before the first).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn client(&self) -> &ExplanationClient<C> {
        &self.client
    }

    /// Whether a display should offer submission right now.
    pub fn can_submit(&self, input: &InputState) -> bool {
        input.is_submittable() && !self.is_loading()
    }

    /// Submit the input.
    ///
    /// Supersedes any request still in flight, including when validation
    /// fails. Invalid input moves straight to `Error` without network
    /// activity and returns `None`; otherwise the phase becomes `Loading`
    /// and the generation of the new request is returned.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, input: &InputState) -> Option<u64> {
        self.generation += 1;
        let generation = self.generation;

        let descriptor = match encode(input) {
            Ok(descriptor) => descriptor,
            Err(err) => {
                tracing::debug!(generation, code = err.error_code(), "Submission rejected");
                self.phase = LifecyclePhase::Error {
                    message: err.user_message(),
                };
                return None;
            }
        };

        if let Some(image) = input.image() {
            if !image.is_supported_format() {
                tracing::warn!(
                    "Uploading {} as {}; the service may reject this format",
                    image.file_name(),
                    image.content_type()
                );
            }
        }

        tracing::info!(
            generation,
            kind = descriptor.kind().as_str(),
            language = descriptor.language(),
            bytes = descriptor.payload_len(),
            "Submitting explanation request"
        );

        self.phase = LifecyclePhase::Loading;

        let client = Arc::clone(&self.client);
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            let outcome = client.send(&descriptor).await;
            // Receiver lives as long as the lifecycle; a send error only
            // means the view is gone.
            let _ = message_tx.send(LifecycleMessage::Resolved {
                generation,
                outcome,
            });
        });

        Some(generation)
    }

    /// Apply a message. Returns `false` if it was stale and ignored.
    pub fn handle_message(&mut self, message: LifecycleMessage) -> bool {
        match message {
            LifecycleMessage::Resolved {
                generation,
                outcome,
            } => {
                if generation != self.generation {
                    tracing::debug!(
                        generation,
                        current = self.generation,
                        "Dropping stale explanation response"
                    );
                    return false;
                }

                self.phase = match outcome {
                    Ok(explanation) => {
                        tracing::info!(
                            generation,
                            model = explanation.model.as_deref().unwrap_or("unknown"),
                            chars = explanation.explanation.chars().count(),
                            "Explanation received"
                        );
                        LifecyclePhase::Success(explanation)
                    }
                    Err(err) => {
                        tracing::warn!(generation, code = err.error_code(), "{}", err);
                        LifecyclePhase::Error {
                            message: err.user_message(),
                        }
                    }
                };
                true
            }
        }
    }

    /// Wait for the next message from an exchange task.
    pub async fn next_message(&mut self) -> Option<LifecycleMessage> {
        self.message_rx.recv().await
    }

    /// Apply every message that has already arrived, without waiting.
    ///
    /// Returns how many messages changed the phase.
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.message_rx.try_recv() {
            if self.handle_message(message) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait until the current request resolves and return the final phase.
    ///
    /// Returns immediately when nothing is loading.
    pub async fn settle(&mut self) -> &LifecyclePhase {
        while self.phase.is_loading() {
            match self.message_rx.recv().await {
                Some(message) => {
                    self.handle_message(message);
                }
                None => break,
            }
        }
        &self.phase
    }
}
