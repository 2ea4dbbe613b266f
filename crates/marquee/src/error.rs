//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError`, `ConfigError`, failed loads and rejected writes into
//! user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use marquee_config::ConfigError;
use marquee_core::{CoreError, LoadError, Submission};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the backend at {url}")]
    #[diagnostic(
        code(marquee::connection_failed),
        help(
            "Check that the backend is running and accessible.\n\
             Try: marquee --base-url http://127.0.0.1:5000 movies list"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(marquee::timeout),
        help("Increase timeout with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── Backend answers ──────────────────────────────────────────────

    /// A status >= 400, or the generic retry message when none came back.
    #[error("{message}")]
    #[diagnostic(code(marquee::rejected))]
    Rejected { status: Option<u16>, message: String },

    #[error("{message}")]
    #[diagnostic(
        code(marquee::unauthorized),
        help(
            "The backend refused the bearer token.\n\
             Store a fresh one with: marquee config set-token\n\
             Check what it grants with: marquee permissions"
        )
    )]
    Unauthorized { status: u16, message: String },

    #[error("{resource_type} {id} not found")]
    #[diagnostic(
        code(marquee::not_found),
        help("Run: marquee {resource_type}s list to see what exists")
    )]
    NotFound { resource_type: String, id: i64 },

    #[error("Unexpected response from the backend: {message}")]
    #[diagnostic(code(marquee::decode))]
    Decode { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(marquee::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(marquee::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: marquee config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(marquee::config))]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(marquee::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not encode JSON: {0}")]
    #[diagnostic(code(marquee::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Unauthorized { status: 403, .. } => exit_code::PERMISSION,
            Self::Unauthorized { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Rejected { status, .. } => status_exit_code(*status),
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// A view whose loader ended in error.
    pub fn from_load(err: LoadError, resource_type: &str, id: Option<i64>) -> Self {
        match (err.status, id) {
            (Some(404), Some(id)) => Self::NotFound {
                resource_type: resource_type.into(),
                id,
            },
            (Some(status @ (401 | 403)), _) => Self::Unauthorized {
                status,
                message: err.message,
            },
            (status, _) => Self::Rejected {
                status,
                message: err.message,
            },
        }
    }

    /// A write that did not succeed.
    pub fn from_submission(submission: Submission) -> Self {
        let status = submission.status.map(|s| s.code);
        let message = submission.notification.message;
        match status {
            Some(status @ (401 | 403)) => Self::Unauthorized { status, message },
            _ => Self::Rejected { status, message },
        }
    }
}

fn status_exit_code(status: Option<u16>) -> i32 {
    match status {
        None => exit_code::CONNECTION,
        Some(404) => exit_code::NOT_FOUND,
        Some(409) => exit_code::CONFLICT,
        Some(400 | 422) => exit_code::USAGE,
        Some(_) => exit_code::GENERAL,
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::Timeout => CliError::Timeout,

            CoreError::Http { status, reason } if matches!(status, 401 | 403) => {
                CliError::Unauthorized {
                    status,
                    message: format!("{status}: {reason}"),
                }
            }

            CoreError::Http { status, reason } => CliError::Rejected {
                status: Some(status),
                message: format!("{status}: {reason}"),
            },

            CoreError::NotFound { entity_type, id } => CliError::NotFound {
                resource_type: entity_type.trim_end_matches('s').into(),
                id,
            },

            CoreError::Decode { message } => CliError::Decode { message },

            CoreError::Validation(errors) => {
                let field = errors
                    .iter()
                    .map(|e| e.field)
                    .collect::<Vec<_>>()
                    .join(", ");
                CliError::Validation {
                    field,
                    reason: errors.to_string(),
                }
            }

            CoreError::Patch { message } | CoreError::Config { message } => {
                CliError::Validation {
                    field: "input".into(),
                    reason: message,
                }
            }
        }
    }
}
