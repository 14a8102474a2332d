//! Incremental reveal of a finished explanation.
//!
//! [`RevealScheduler`] exposes a growing prefix of a text, one `char` per
//! tick, through a `watch` channel the display subscribes to. Starting a new
//! reveal cancels the previous one outright; stopping freezes the prefix
//! where it is.
//!
//! Each reveal carries a generation number. The timer task only advances the
//! shared state while its generation is current and the reveal is active,
//! so a tick that races with `start()` or `stop()` can never leak into the
//! next reveal.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

use crate::config::ExplainerConfig;

/// Snapshot of the reveal the display should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealState {
    source: Arc<str>,
    emitted: usize,
    total: usize,
    generation: u64,
    active: bool,
}

impl Default for RevealState {
    fn default() -> Self {
        Self {
            source: Arc::from(""),
            emitted: 0,
            total: 0,
            generation: 0,
            active: false,
        }
    }
}

impl RevealState {
    /// The full text being revealed.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of chars revealed so far.
    pub fn emitted_len(&self) -> usize {
        self.emitted
    }

    /// Number of chars in the source.
    pub fn total_len(&self) -> usize {
        self.total
    }

    /// The revealed prefix.
    pub fn visible(&self) -> &str {
        prefix_of(&self.source, self.emitted)
    }

    pub fn is_complete(&self) -> bool {
        self.emitted == self.total
    }

    /// True while ticks are still scheduled.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Prefix of `text` holding its first `chars` chars.
pub fn prefix_of(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Every prefix of `text` in reveal order, from `""` to `text` itself.
///
/// Yields `n + 1` items for a text of `n` chars.
pub fn prefixes(text: &str) -> impl Iterator<Item = &str> + '_ {
    std::iter::once(0)
        .chain(text.char_indices().map(|(i, c)| i + c.len_utf8()))
        .map(move |end| &text[..end])
}

/// Cancels one particular reveal.
///
/// `cancel` is idempotent, safe after the reveal completed, and has no
/// effect on a reveal started later.
#[derive(Debug, Clone)]
pub struct RevealHandle {
    generation: u64,
    state: Arc<watch::Sender<RevealState>>,
}

impl RevealHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cancel(&self) {
        let generation = self.generation;
        self.state.send_if_modified(|state| {
            if state.generation == generation && state.active {
                state.active = false;
                true
            } else {
                false
            }
        });
    }

    /// True while this reveal is current and still advancing.
    pub fn is_active(&self) -> bool {
        let state = self.state.borrow();
        state.generation == self.generation && state.active
    }
}

/// Shortest tick the scheduler accepts; smaller intervals are raised to it.
pub const MIN_REVEAL_INTERVAL: Duration = Duration::from_millis(1);

/// Drives one reveal at a time for a single display surface.
#[derive(Debug)]
pub struct RevealScheduler {
    interval: Duration,
    state: Arc<watch::Sender<RevealState>>,
    task: Option<JoinHandle<()>>,
    generation: u64,
}

impl RevealScheduler {
    /// Create a scheduler advancing one char per `interval`.
    ///
    /// Intervals below [`MIN_REVEAL_INTERVAL`] are clamped to it.
    pub fn new(interval: Duration) -> Self {
        let (state, _) = watch::channel(RevealState::default());
        Self {
            interval: interval.max(MIN_REVEAL_INTERVAL),
            state: Arc::new(state),
            task: None,
            generation: 0,
        }
    }

    pub fn from_config(config: &ExplainerConfig) -> Self {
        Self::new(config.reveal_interval)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Receiver the display reads reveal snapshots from.
    pub fn subscribe(&self) -> watch::Receiver<RevealState> {
        self.state.subscribe()
    }

    /// Current snapshot.
    pub fn state(&self) -> RevealState {
        self.state.borrow().clone()
    }

    /// Begin revealing `text` from an empty prefix.
    ///
    /// Any reveal in progress is cancelled first. Must be called from within
    /// a tokio runtime.
    pub fn start(&mut self, text: impl Into<String>) -> RevealHandle {
        self.abort_task();

        self.generation += 1;
        let generation = self.generation;
        let source: Arc<str> = Arc::from(text.into());
        let total = source.chars().count();

        self.state.send_replace(RevealState {
            source,
            emitted: 0,
            total,
            generation,
            active: total > 0,
        });
        tracing::debug!(generation, chars = total, "Reveal started");

        if total > 0 {
            let state = Arc::clone(&self.state);
            let interval = self.interval;
            self.task = Some(tokio::spawn(run_reveal(state, generation, interval)));
        }

        RevealHandle {
            generation,
            state: Arc::clone(&self.state),
        }
    }

    /// Cancel any pending tick, keeping the prefix revealed so far.
    pub fn stop(&mut self) {
        self.abort_task();
        let stopped = self.state.send_if_modified(|state| {
            if state.active {
                state.active = false;
                true
            } else {
                false
            }
        });
        if stopped {
            tracing::debug!(generation = self.generation, "Reveal stopped");
        }
    }

    /// True while a reveal is still advancing.
    pub fn is_running(&self) -> bool {
        self.state.borrow().active
    }

    fn abort_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for RevealScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_reveal(state: Arc<watch::Sender<RevealState>>, generation: u64, interval: Duration) {
    let mut ticker = interval_at(Instant::now() + interval, interval);
    loop {
        ticker.tick().await;

        let mut finished = false;
        state.send_if_modified(|current| {
            if current.generation != generation || !current.active {
                finished = true;
                return false;
            }
            current.emitted += 1;
            if current.emitted >= current.total {
                current.active = false;
                finished = true;
            }
            true
        });

        if finished {
            break;
        }
    }
    tracing::trace!(generation, "Reveal task exited");
}
