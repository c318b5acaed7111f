//! Authenticator implementation
//!
//! Produces a valid bearer token on demand, refreshing through the token
//! endpoint when the cache is empty or expired.

use super::types::{CachedToken, Credentials};
use crate::config::Config;
use crate::error::{Error, Result};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Token lifetime assumed when the endpoint omits `expires_in`
const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Authenticator handles token caching and refresh for API requests
pub struct Authenticator {
    credentials: Credentials,
    token_url: String,
    /// Cached bearer token; None until the first refresh
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token requests
    http_client: Client,
}

impl Authenticator {
    /// Create an authenticator from a validated config and a shared HTTP client
    pub fn with_client(config: &Config, http_client: Client) -> Result<Self> {
        let credentials = Credentials::new(&config.consumer_key, &config.consumer_secret)?;
        Ok(Self {
            credentials,
            token_url: config.auth_url(),
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
        })
    }

    /// Apply bearer authentication to a request
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.access_token().await?;
        Ok(req.bearer_auth(token))
    }

    /// Get a valid access token, refreshing if necessary
    pub async fn access_token(&self) -> Result<String> {
        // Check if we have a valid cached token
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        // Need to refresh - acquire write lock
        let mut cached = self.cached_token.write().await;

        // Double-check after acquiring write lock (another task might have refreshed)
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        debug!("access token missing or expired, refreshing");
        match self.fetch_token().await {
            Ok(new_token) => {
                let token_str = new_token.token.clone();
                *cached = Some(new_token);
                Ok(token_str)
            }
            Err(e) => {
                // An expired token cannot be trusted either
                *cached = None;
                Err(e)
            }
        }
    }

    /// Issue one token request against the token endpoint
    async fn fetch_token(&self) -> Result<CachedToken> {
        let response = self
            .http_client
            .get(&self.token_url)
            .query(&[("grant_type", "client_credentials")])
            .header("Authorization", self.credentials.basic_auth())
            .send()
            .await
            .map_err(|e| Error::auth(format!("token request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::auth(format!("failed to read token response: {e}")))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "token endpoint rejected request");
            return Err(Error::auth(format!(
                "token request failed with status {}: {body}",
                status.as_u16()
            )));
        }

        let token_response: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| Error::auth(format!("malformed token response: {e}")))?;

        let ttl = token_response.expires_in.unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        debug!(expires_in = ttl, "access token refreshed");
        Ok(CachedToken::expires_in(token_response.access_token, ttl))
    }

    /// Clear the cached token (useful for testing or forced refresh)
    pub async fn clear_cache(&self) {
        let mut cached = self.cached_token.write().await;
        *cached = None;
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("token_url", &self.token_url)
            .finish_non_exhaustive()
    }
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    /// Seconds until expiry; the sandbox returns this as a numeric string
    #[serde(default, deserialize_with = "expires_in_seconds")]
    expires_in: Option<i64>,
}

fn expires_in_seconds<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid expires_in: {s}"))),
    }
}
