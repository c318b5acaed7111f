//! Auth value types
//!
//! Credential encoding and the cached-token record used by the
//! authenticator.

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};

/// Consumer key/secret pair
#[derive(Debug, Clone)]
pub struct Credentials {
    key: String,
    secret: String,
}

impl Credentials {
    /// Create a credential pair; both parts must be non-empty
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let secret = secret.into();
        if key.trim().is_empty() {
            return Err(Error::missing_field("consumer_key"));
        }
        if secret.trim().is_empty() {
            return Err(Error::missing_field("consumer_secret"));
        }
        Ok(Self { key, secret })
    }

    /// The `Basic <base64(key:secret)>` authorization header value
    pub fn basic_auth(&self) -> String {
        let encoded = BASE64.encode(format!("{}:{}", self.key, self.secret));
        format!("Basic {encoded}")
    }
}

/// Cached bearer token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: impl Into<String>, seconds: i64) -> Self {
        Self {
            token: token.into(),
            expires_at: Utc::now() + chrono::Duration::seconds(seconds),
        }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        let buffer = chrono::Duration::seconds(30);
        Utc::now() + buffer >= self.expires_at
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_basic_auth_encoding() {
        use base64::Engine;

        let credentials = Credentials::new("user", "pass").unwrap();
        let header = credentials.basic_auth();
        assert!(header.starts_with("Basic "));

        let encoded = header.strip_prefix("Basic ").unwrap();
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), "user:pass");
    }

    #[test]
    fn test_basic_auth_deterministic() {
        let a = Credentials::new("key", "secret").unwrap();
        let b = Credentials::new("key", "secret").unwrap();
        assert_eq!(a.basic_auth(), b.basic_auth());
    }

    #[test]
    fn test_empty_credentials_rejected() {
        assert!(Credentials::new("", "secret").is_err());
        assert!(Credentials::new("key", "").is_err());
        assert!(Credentials::new("  ", "secret").is_err());
    }

    #[test]
    fn test_cached_token_not_expired() {
        let token = CachedToken::expires_in("test", 3600);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_cached_token_expired() {
        let token = CachedToken::expires_in("test", -100);
        assert!(token.is_expired());
    }

    #[test]
    fn test_cached_token_expiry_buffer() {
        // Inside the 30s safety margin counts as expired
        let token = CachedToken::expires_in("test", 10);
        assert!(token.is_expired());
    }
}
