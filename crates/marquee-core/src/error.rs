// ── Core error types ──
//
// Errors surfaced by marquee-core. Views never propagate these: every
// failure ends up as a notification or a `LoadError`. `execute()` callers
// (the CLI) get them directly and map them to exit codes.

use thiserror::Error;

use crate::form::FieldErrors;

/// Message shown for any failure that carries no HTTP status.
pub const RETRY_MESSAGE: &str = "Error occurred - please try again.";

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    // ── HTTP errors ──────────────────────────────────────────────────
    /// The backend answered with status >= 400. Displayed verbatim.
    #[error("{status}: {reason}")]
    Http { status: u16, reason: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: i64 },

    #[error("Unexpected response: {message}")]
    Decode { message: String },

    // ── Validation errors ────────────────────────────────────────────
    /// Form input was rejected locally; no request was sent.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Invalid patch: {message}")]
    Patch { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// HTTP status code, if the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    /// The text a notification shows for this error.
    ///
    /// HTTP failures read `"{status}: {reason}"`; validation failures list
    /// the offending fields; everything else gets the generic retry message.
    pub fn notification_message(&self) -> String {
        match self {
            Self::Http { .. } | Self::Validation(_) => self.to_string(),
            Self::NotFound { .. } => "404: Not Found".into(),
            _ => RETRY_MESSAGE.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<marquee_api::Error> for CoreError {
    fn from(err: marquee_api::Error) -> Self {
        match err {
            marquee_api::Error::Http { status, reason, .. } => CoreError::Http { status, reason },
            marquee_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(ToString::to_string)
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                }
            }
            marquee_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            marquee_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            marquee_api::Error::InvalidToken { message }
            | marquee_api::Error::MalformedToken { message } => CoreError::Config { message },
            marquee_api::Error::Deserialization { message, body: _ } => {
                CoreError::Decode { message }
            }
        }
    }
}
