// ── Runtime client configuration ──
//
// Describes *where* the backend lives and *how* to talk to it.
// Carries credential data and transport tuning, but never touches disk.
// The CLI builds a `ClientConfig` from its profile and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use marquee_api::{Credentials, TlsMode, TransportConfig};
use url::Url;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed development backends).
    DangerAcceptInvalid,
}

/// Configuration for one backend.
///
/// Passed explicitly to [`Catalog::new`](crate::Catalog::new); there is no
/// process-wide base URL.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend root (e.g. `http://127.0.0.1:5000`).
    pub base_url: Url,
    /// Bearer token, or anonymous.
    pub credentials: Credentials,
    pub tls: TlsVerification,
    /// Per-request timeout enforced by the HTTP transport.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Build a config for `base_url`: anonymous, system TLS, 30 s timeout.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            credentials: Credentials::Anonymous,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: match &self.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: self.timeout,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn local() -> ClientConfig {
        ClientConfig::new(Url::parse(DEFAULT_BASE_URL).unwrap())
    }

    #[test]
    fn default_points_at_local_backend() {
        let config = local();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:5000/");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(matches!(config.credentials, Credentials::Anonymous));
    }

    #[test]
    fn insecure_maps_to_accept_invalid() {
        let config = ClientConfig {
            tls: TlsVerification::DangerAcceptInvalid,
            ..local()
        };
        assert!(matches!(
            config.transport().tls,
            TlsMode::DangerAcceptInvalid
        ));
    }
}
