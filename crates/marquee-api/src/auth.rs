use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Credentials for talking to the backend.
///
/// Tokens are issued by an external identity provider; this crate only
/// carries them. Each variant holds the secret material for its flow.
#[derive(Debug, Clone, Default)]
pub enum Credentials {
    /// No `Authorization` header. Public deployments and local testing.
    #[default]
    Anonymous,

    /// OAuth2 access token sent as `Authorization: Bearer <token>`.
    Bearer { token: SecretString },
}

impl Credentials {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: SecretString::from(token.into()),
        }
    }

    /// Default headers for every request made with these credentials.
    ///
    /// The header value is marked sensitive so it never shows up in
    /// `Debug` output or request logs.
    pub fn default_headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        if let Self::Bearer { token } = self {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|e| Error::InvalidToken {
                    message: format!("invalid header value: {e}"),
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }
}

/// Permissions granted to an access token.
///
/// Read from the `permissions` claim of the JWT payload. The signature is
/// NOT verified here -- the backend does that on every request. This is
/// only used to tell the user what the current token is allowed to do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub sub: Option<String>,
}

impl Permissions {
    /// Decode the claims segment of a compact JWT.
    pub fn from_token(token: &SecretString) -> Result<Self, Error> {
        let mut segments = token.expose_secret().split('.');
        let payload = match (segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(payload), Some(_)) => payload,
            _ => {
                return Err(Error::MalformedToken {
                    message: "expected three dot-separated segments".into(),
                });
            }
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| Error::MalformedToken {
                message: format!("payload is not base64url: {e}"),
            })?;

        serde_json::from_slice(&bytes).map_err(|e| Error::MalformedToken {
            message: format!("payload is not JSON: {e}"),
        })
    }

    /// Whether the token carries the given permission (e.g. `"delete:actors"`).
    pub fn allows(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn token_with(claims: &serde_json::Value) -> SecretString {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        SecretString::from(format!("{header}.{payload}.signature"))
    }

    #[test]
    fn anonymous_sends_no_authorization() {
        let headers = Credentials::Anonymous.default_headers().unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn bearer_header_is_sensitive() {
        let headers = Credentials::bearer("abc").default_headers().unwrap();
        let value = headers.get(AUTHORIZATION).unwrap();
        assert_eq!(value.to_str().unwrap(), "Bearer abc");
        assert!(value.is_sensitive());
    }

    #[test]
    fn reads_permissions_claim() {
        let token = token_with(&serde_json::json!({
            "sub": "auth0|42",
            "permissions": ["read:actors", "delete:actors"],
        }));
        let perms = Permissions::from_token(&token).unwrap();
        assert_eq!(perms.sub.as_deref(), Some("auth0|42"));
        assert!(perms.allows("delete:actors"));
        assert!(!perms.allows("create:movies"));
    }

    #[test]
    fn missing_claim_means_no_permissions() {
        let token = token_with(&serde_json::json!({ "sub": "x" }));
        assert!(Permissions::from_token(&token).unwrap().permissions.is_empty());
    }

    #[test]
    fn rejects_opaque_tokens() {
        let token = SecretString::from("not-a-jwt".to_string());
        assert!(matches!(
            Permissions::from_token(&token),
            Err(Error::MalformedToken { .. })
        ));
    }
}
