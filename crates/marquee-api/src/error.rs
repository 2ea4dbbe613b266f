use thiserror::Error;

/// Top-level error type for the `marquee-api` crate.
///
/// Covers every failure mode of the REST surface: transport, HTTP status,
/// payload decoding, and credential handling. `marquee-core` maps these
/// into user-facing notifications.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The bearer token could not be turned into a header value.
    #[error("Invalid bearer token: {message}")]
    InvalidToken { message: String },

    /// The token is not a decodable JWT (permissions lookup only).
    #[error("Malformed access token: {message}")]
    MalformedToken { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── HTTP status ─────────────────────────────────────────────────
    /// The server answered with a status >= 400.
    ///
    /// `reason` is the canonical status text; `body` is kept for debugging.
    #[error("{status}: {reason}")]
    Http {
        status: u16,
        reason: String,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// HTTP status code, when the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the server rejected the bearer token (401/403).
    ///
    /// These are surfaced like any other HTTP error; callers may use this to
    /// pick a better diagnostic, never to retry.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(e) if e.status().is_none())
    }

    /// Returns `true` if the transport gave up waiting.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> Error {
        Error::Http {
            status,
            reason: "Whatever".into(),
            body: String::new(),
        }
    }

    #[test]
    fn http_error_displays_status_and_reason() {
        let err = Error::Http {
            status: 404,
            reason: "Not Found".into(),
            body: "{}".into(),
        };
        assert_eq!(err.to_string(), "404: Not Found");
    }

    #[test]
    fn classifies_statuses() {
        assert!(http(401).is_auth_failure());
        assert!(http(403).is_auth_failure());
        assert!(!http(500).is_auth_failure());
        assert!(http(404).is_not_found());
        assert!(!http(404).is_transport());
    }
}
