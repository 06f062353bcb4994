//! Server credentials and authentication token derivation.
//!
//! Nightscout-compatible servers authenticate requests with an
//! `api-secret` header carrying the SHA-1 digest of the shared secret in
//! lowercase hex, never the raw secret itself.

use ring::digest;
use url::Url;

use crate::error::ClientError;

/// Header carrying the hashed shared secret on every request.
pub const API_SECRET_HEADER: &str = "api-secret";

/// Immutable server coordinates: base URL plus the derived auth token.
#[derive(Debug, Clone)]
pub struct Credentials {
    base_url: Url,
    token: String,
}

impl Credentials {
    /// Creates credentials from a base URL and a shared secret.
    ///
    /// The token is derived once here; repeated calls with the same secret
    /// always produce the same token.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if the base URL is empty or not an
    /// absolute http(s) URL, or if the secret is empty.
    pub fn new(base_url: &str, secret: &str) -> Result<Self, ClientError> {
        let base_url = base_url.trim();
        if base_url.is_empty() {
            return Err(ClientError::Config("server URL is empty".to_string()));
        }

        let secret = secret.trim();
        if secret.is_empty() {
            return Err(ClientError::Config("API secret is empty".to_string()));
        }

        let parsed = Url::parse(base_url)
            .map_err(|e| ClientError::Config(format!("invalid server URL {base_url:?}: {e}")))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "unsupported URL scheme {:?}; expected http or https",
                parsed.scheme()
            )));
        }

        Ok(Self {
            base_url: parsed,
            token: derive_token(secret),
        })
    }

    /// Returns the derived authentication token (SHA-1 hex of the secret).
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the fully-qualified URL for an API path.
    ///
    /// `path` is expected to start with `/`; a trailing slash on the base
    /// URL is normalized away so the two never double up.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}

/// Derives the `api-secret` header value from the raw secret.
fn derive_token(secret: &str) -> String {
    let digest = digest::digest(&digest::SHA1_FOR_LEGACY_USE_ONLY, secret.as_bytes());
    digest
        .as_ref()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_deterministic() {
        let a = Credentials::new("https://ns.example.com", "abc123").unwrap();
        let b = Credentials::new("https://ns.example.com", "abc123").unwrap();
        assert_eq!(a.token(), b.token());
    }

    #[test]
    fn test_token_known_vector() {
        let creds = Credentials::new("https://ns.example.com", "abc123").unwrap();
        assert_eq!(creds.token(), "6367c48dd193d56ea7b0baad25b19455e529f5ee");
    }

    #[test]
    fn test_token_changes_with_secret() {
        let a = Credentials::new("https://ns.example.com", "abc123").unwrap();
        let b = Credentials::new("https://ns.example.com", "abc124").unwrap();
        assert_ne!(a.token(), b.token());
    }

    #[test]
    fn test_empty_url_rejected() {
        assert!(matches!(
            Credentials::new("", "secret"),
            Err(ClientError::Config(_))
        ));
        assert!(matches!(
            Credentials::new("   ", "secret"),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            Credentials::new("https://ns.example.com", ""),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_malformed_url_rejected() {
        assert!(matches!(
            Credentials::new("not a url", "secret"),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        assert!(matches!(
            Credentials::new("ftp://ns.example.com", "secret"),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_endpoint_join() {
        let creds = Credentials::new("https://ns.example.com", "secret").unwrap();
        assert_eq!(
            creds.endpoint("/api/v1/entries.json"),
            "https://ns.example.com/api/v1/entries.json"
        );
    }

    #[test]
    fn test_endpoint_join_trailing_slash() {
        let creds = Credentials::new("https://ns.example.com/", "secret").unwrap();
        assert_eq!(
            creds.endpoint("/api/v1/entries.json"),
            "https://ns.example.com/api/v1/entries.json"
        );
    }
}
