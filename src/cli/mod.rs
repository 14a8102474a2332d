//! CLI module for punchline.
//!
//! Argument parsing plus the glue that turns parsed arguments into a
//! configured client and input.

pub mod args;

pub use args::{parse_args, ArgsError, CliCommand, ExplainArgs, USAGE};

use std::time::Duration;

use crate::config::ExplainerConfig;
use crate::domain::{ImageUpload, InputState};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Apply command-line overrides on top of an environment-derived config.
pub fn resolve_config(base: ExplainerConfig, args: &ExplainArgs) -> ExplainerConfig {
    let mut config = base;
    if let Some(url) = &args.base_url {
        config = config.with_base_url(url.as_str());
    }
    if let Some(language) = &args.language {
        config = config.with_default_language(language.as_str());
    }
    if let Some(ms) = args.reveal_ms.filter(|ms| *ms > 0) {
        config = config.with_reveal_interval(Duration::from_millis(ms));
    }
    config
}

/// Build the input described by the arguments.
pub async fn build_input(config: &ExplainerConfig, args: &ExplainArgs) -> std::io::Result<InputState> {
    let mut input = InputState::with_language(config.default_language.as_str());
    if let Some(text) = &args.text {
        input.set_text(text.as_str());
    }
    if let Some(path) = &args.image {
        input.set_image(ImageUpload::from_path(path).await?);
    }
    Ok(input)
}
