//! Command-line argument parsing for punchline.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

use std::path::PathBuf;
use thiserror::Error;

/// Usage text printed by `--help`.
pub const USAGE: &str = "\
Usage: punchline [OPTIONS] [TEXT]...

Ask the explanation service why something is funny.

Options:
  -t, --text <TEXT>      Text to explain (positional words are joined as text)
  -i, --image <PATH>     Image to explain; wins over text when both are given
  -l, --lang <CODE>      Explanation language (default: $PUNCHLINE_LANG or en)
      --url <URL>        Service base URL (default: $PUNCHLINE_URL or http://localhost:8000)
      --reveal-ms <MS>   Milliseconds between revealed characters
  -v, --verbose          Debug logging on stderr
  -V, --version          Print version
  -h, --help             Print this help";

/// Options for an explanation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplainArgs {
    pub text: Option<String>,
    pub image: Option<PathBuf>,
    pub language: Option<String>,
    pub base_url: Option<String>,
    pub reveal_ms: Option<u64>,
    pub verbose: bool,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Submit input and reveal the explanation (default)
    Explain(ExplainArgs),
}

/// Argument errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Invalid value for {flag}: {value}")]
    InvalidNumber { flag: String, value: String },
}

/// Parse command-line arguments and return the appropriate command.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
///
/// # Examples
///
/// ```
/// use punchline::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["punchline".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut parsed = ExplainArgs::default();
    let mut words: Vec<String> = Vec::new();
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--verbose" | "-v" => parsed.verbose = true,
            "--text" | "-t" => parsed.text = Some(value_for(&arg, &mut args)?),
            "--image" | "-i" => parsed.image = Some(PathBuf::from(value_for(&arg, &mut args)?)),
            "--lang" | "-l" => parsed.language = Some(value_for(&arg, &mut args)?),
            "--url" => parsed.base_url = Some(value_for(&arg, &mut args)?),
            "--reveal-ms" => {
                let value = value_for(&arg, &mut args)?;
                let ms = value.parse::<u64>().map_err(|_| ArgsError::InvalidNumber {
                    flag: arg.clone(),
                    value,
                })?;
                parsed.reveal_ms = Some(ms);
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(ArgsError::UnknownOption(flag.to_string()));
            }
            _ => words.push(arg),
        }
    }

    if parsed.text.is_none() && !words.is_empty() {
        parsed.text = Some(words.join(" "));
    }

    Ok(CliCommand::Explain(parsed))
}

fn value_for<I>(flag: &str, args: &mut I) -> Result<String, ArgsError>
where
    I: Iterator<Item = String>,
{
    args.next()
        .ok_or_else(|| ArgsError::MissingValue(flag.to_string()))
}
