//! HTTP client with auth injection and response classification
//!
//! The dispatch path for every API operation:
//! - Obtain a bearer token (may trigger a refresh)
//! - Send the request with the configured timeout and TLS settings
//! - Classify the response: status >= 400 becomes a typed API error with
//!   the provider's error code and description
//! - Transport failures surface as typed errors, never raw panics

use super::response::ApiResponse;
use crate::auth::Authenticator;
use crate::config::Config;
use crate::error::{Error, Result};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// Request body encoding
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// JSON-encoded body
    Json(Value),
    /// Form-urlencoded body (used by C2B URL registration)
    Form(Value),
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: Vec<(String, String)>,
    /// Extra request headers
    pub headers: Vec<(String, String)>,
    /// Request body
    pub body: Option<RequestBody>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Set a JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Set a form-urlencoded body
    #[must_use]
    pub fn form(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Form(body));
        self
    }
}

/// HTTP client that dispatches authenticated API requests
pub struct HttpClient {
    client: Client,
    authenticator: Authenticator,
}

impl HttpClient {
    /// Build a client from a validated config
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder().timeout(config.timeout);
        if !config.verify_tls {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        let authenticator = Authenticator::with_client(config, client.clone())?;

        Ok(Self {
            client,
            authenticator,
        })
    }

    /// The authenticator backing this client
    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    /// Dispatch a request and classify the response
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<ApiResponse> {
        let mut req = self.client.request(method.clone(), url);

        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        // Body first: json()/form() set the matching Content-Type
        match &config.body {
            Some(RequestBody::Json(body)) => req = req.json(body),
            Some(RequestBody::Form(body)) => req = req.form(body),
            None => {}
        }

        // May suspend on a token refresh
        req = self.authenticator.apply(req).await?;

        debug!(%method, url, "dispatching request");
        let response = req.send().await?;

        let status = response.status();
        let body = response.text().await?;

        if status.as_u16() >= 400 {
            let (code, description) = extract_error_fields(&body);
            warn!(status = status.as_u16(), code = %code, "request failed");
            return Err(Error::api(status.as_u16(), code, description));
        }

        debug!(status = status.as_u16(), "request succeeded");
        Ok(ApiResponse::new(status.as_u16(), body))
    }

    /// Dispatch a request and decode the JSON response
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<T> {
        let response = self.request(method, url, config).await?;
        response.json()
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("authenticator", &self.authenticator)
            .finish_non_exhaustive()
    }
}

/// Pull the conventional error fields out of a failure body
fn extract_error_fields(body: &str) -> (String, String) {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => (
            error_field(&value, "errorCode"),
            error_field(&value, "errorMessage"),
        ),
        Err(_) => ("unknown".to_string(), "unknown".to_string()),
    }
}

fn error_field(value: &Value, field: &str) -> String {
    match value.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "unknown".to_string(),
        Some(other) => other.to_string(),
    }
}
