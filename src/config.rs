//! Client configuration.
//!
//! Use the builder methods to customize, or [`ExplainerConfig::from_env`] to
//! pick up overrides from the environment.
//!
//! # Example
//!
//! ```
//! use punchline::config::ExplainerConfig;
//! use std::time::Duration;
//!
//! let config = ExplainerConfig::default()
//!     .with_base_url("http://explainer.internal:8000/")
//!     .with_reveal_interval(Duration::from_millis(10));
//! assert_eq!(config.base_url, "http://explainer.internal:8000");
//! ```

use std::time::Duration;

/// Default explanation service location.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default explanation language.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default time between two reveal steps.
pub const DEFAULT_REVEAL_INTERVAL: Duration = Duration::from_millis(20);

/// Env var overriding the service base URL.
pub const ENV_URL: &str = "PUNCHLINE_URL";
/// Env var overriding the default language.
pub const ENV_LANG: &str = "PUNCHLINE_LANG";
/// Env var overriding the reveal cadence, in milliseconds.
pub const ENV_REVEAL_MS: &str = "PUNCHLINE_REVEAL_MS";
/// Env var selecting the older text endpoint without a `lang` query.
pub const ENV_LEGACY_TEXT: &str = "PUNCHLINE_LEGACY_TEXT";

/// Configuration shared by the client, lifecycle and reveal scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainerConfig {
    /// Service base URL, without trailing slash
    pub base_url: String,
    /// Language code preselected for new inputs
    pub default_language: String,
    /// Time between two reveal steps
    pub reveal_interval: Duration,
    /// Whether the text endpoint receives `lang` as a query parameter
    pub text_language_query: bool,
}

impl Default for ExplainerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_language: DEFAULT_LANGUAGE.to_string(),
            reveal_interval: DEFAULT_REVEAL_INTERVAL,
            text_language_query: true,
        }
    }
}

impl ExplainerConfig {
    /// Create a new ExplainerConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service base URL. Trailing slashes are dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set the default explanation language.
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    /// Set the reveal cadence.
    pub fn with_reveal_interval(mut self, interval: Duration) -> Self {
        self.reveal_interval = interval;
        self
    }

    /// Choose whether the text endpoint gets the `lang` query parameter.
    pub fn with_text_language_query(mut self, enabled: bool) -> Self {
        self.text_language_query = enabled;
        self
    }

    /// Create config from the `PUNCHLINE_*` environment variables.
    ///
    /// Unset variables keep their defaults. An unparseable reveal interval
    /// is ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_URL).filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(url.trim());
        }

        if let Some(lang) = lookup(ENV_LANG).filter(|v| !v.trim().is_empty()) {
            config = config.with_default_language(lang.trim());
        }

        if let Some(raw) = lookup(ENV_REVEAL_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => {
                    config = config.with_reveal_interval(Duration::from_millis(ms));
                }
                _ => {
                    tracing::warn!(
                        "Ignoring {}={:?}: expected a positive number of milliseconds",
                        ENV_REVEAL_MS,
                        raw
                    );
                }
            }
        }

        if lookup(ENV_LEGACY_TEXT).is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true")) {
            config = config.with_text_language_query(false);
        }

        config
    }

    /// URL of the explain-by-text endpoint.
    pub fn text_endpoint(&self) -> String {
        format!("{}/explain/text", self.base_url)
    }

    /// URL of the explain-by-image endpoint.
    pub fn image_endpoint(&self) -> String {
        format!("{}/explain/image", self.base_url)
    }
}
