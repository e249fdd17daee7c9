use clap::error::{ContextKind, ContextValue, ErrorKind};
use thiserror::Error;

use crate::render::RenderError;

pub type CliResult<T> = Result<T, CliError>;

/// Exit status for a successful invocation.
pub const EXIT_OK: u8 = 0;
/// Exit status for handler, remote and configuration failures.
pub const EXIT_FAILURE: u8 = 1;
/// Exit status for malformed command lines.
pub const EXIT_USAGE: u8 = 2;
/// Exit status after an interrupt from the terminal.
pub const EXIT_INTERRUPTED: u8 = 130;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("argument error: {0}")]
    InvalidArgument(String),
    #[error("nothing-to-update: {0}")]
    NothingToUpdate(String),
    #[error("remote error: {resource}: status {status}: {message}")]
    Remote {
        resource: String,
        status: u16,
        message: String,
    },
    #[error("remote error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("remote error: {0}")]
    Decode(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("input error: failed to read {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error("output error: failed to write {path}: {source}")]
    OutputFile {
        path: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl CliError {
    pub fn invalid(detail: impl Into<String>) -> Self {
        Self::InvalidArgument(detail.into())
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidArgument(_) => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }

    /// HTTP status to record for this error in a batch result.
    pub fn status(&self) -> u16 {
        match self {
            Self::Remote { status, .. } => *status,
            Self::Transport(err) => err.status().map_or(500, |s| s.as_u16()),
            Self::InvalidArgument(_) | Self::NothingToUpdate(_) => 400,
            _ => 500,
        }
    }
}

/// Render a clap parse failure in the `argument error: <detail>` form.
///
/// Choice violations list the permitted values and missing-argument errors
/// name every missing flag, so the one-line message is actionable on its own.
pub fn describe_usage_error(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let first = rendered
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or_default()
        .trim_start_matches("error:")
        .trim();

    let mut detail = first.to_string();
    match (err.kind(), err.get(ContextKind::ValidValue), err.get(ContextKind::InvalidArg)) {
        (ErrorKind::InvalidValue, Some(ContextValue::Strings(values)), _) if !values.is_empty() => {
            detail.push_str(&format!(" (possible values: {})", values.join(", ")));
        }
        (ErrorKind::MissingRequiredArgument, _, Some(ContextValue::Strings(missing))) => {
            detail = format!("{} {}", detail.trim_end_matches(':'), missing.join(", "));
        }
        _ => {}
    }
    format!("argument error: {detail}")
}
