//! SDK configuration
//!
//! Credentials, endpoint URLs, and transport settings supplied at
//! construction time. Validation happens eagerly in [`ConfigBuilder::build`]
//! so a misconfigured client fails before the first network call.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Target environment for API requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Sandbox environment for integration testing
    #[default]
    Sandbox,
    /// Live production environment
    Production,
}

impl Environment {
    /// Base URL for this environment
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Sandbox => "https://apisandbox.safaricom.et",
            Environment::Production => "https://api.safaricom.et",
        }
    }
}

/// Complete SDK configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// OAuth consumer key
    pub consumer_key: String,
    /// OAuth consumer secret
    pub consumer_secret: String,
    /// Target environment
    pub environment: Environment,
    /// Base URL for all requests; defaults to the environment's base URL
    pub base_url: String,
    /// Token endpoint path
    pub auth_path: String,
    /// STK push endpoint path
    pub stk_push_path: String,
    /// B2C payment endpoint path
    pub b2c_path: String,
    /// C2B URL registration endpoint path
    pub c2b_register_path: String,
    /// C2B payment endpoint path
    pub c2b_payment_path: String,
    /// Request timeout
    pub timeout: Duration,
    /// Whether to verify TLS certificates
    pub verify_tls: bool,
    /// API key for C2B URL registration; falls back to the consumer key
    pub api_key: Option<String>,
    /// Initiator name for B2C transactions
    pub initiator_name: Option<String>,
    /// Encrypted security credential for B2C transactions
    pub security_credential: Option<String>,
}

impl Config {
    /// Create a config builder
    pub fn builder(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> ConfigBuilder {
        ConfigBuilder::new(consumer_key, consumer_secret)
    }

    /// Create a validated sandbox config with default endpoints
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> Result<Self> {
        ConfigBuilder::new(consumer_key, consumer_secret).build()
    }

    /// Whether this config targets production
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Complete token endpoint URL
    pub fn auth_url(&self) -> String {
        self.join(&self.auth_path)
    }

    /// Complete STK push URL
    pub fn stk_push_url(&self) -> String {
        self.join(&self.stk_push_path)
    }

    /// Complete B2C payment URL
    pub fn b2c_url(&self) -> String {
        self.join(&self.b2c_path)
    }

    /// Complete C2B URL registration URL
    pub fn c2b_register_url(&self) -> String {
        self.join(&self.c2b_register_path)
    }

    /// Complete C2B payment URL
    pub fn c2b_payment_url(&self) -> String {
        self.join(&self.c2b_payment_path)
    }

    /// API key used for C2B URL registration
    pub fn registration_api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or(&self.consumer_key)
    }

    fn join(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

/// Builder for [`Config`]
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    consumer_key: String,
    consumer_secret: String,
    environment: Environment,
    base_url: Option<String>,
    auth_path: String,
    stk_push_path: String,
    b2c_path: String,
    c2b_register_path: String,
    c2b_payment_path: String,
    timeout: Duration,
    verify_tls: bool,
    api_key: Option<String>,
    initiator_name: Option<String>,
    security_credential: Option<String>,
}

impl ConfigBuilder {
    /// Create a new builder with the required credentials
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            environment: Environment::default(),
            base_url: None,
            auth_path: "/v1/token/generate".to_string(),
            stk_push_path: "/mpesa/stkpush/v3/processrequest".to_string(),
            b2c_path: "/mpesa/b2c/v1/paymentrequest".to_string(),
            c2b_register_path: "/v1/c2b-registerurl/register".to_string(),
            c2b_payment_path: "/v1/c2b/payments".to_string(),
            timeout: DEFAULT_TIMEOUT,
            verify_tls: true,
            api_key: None,
            initiator_name: None,
            security_credential: None,
        }
    }

    /// Set the target environment
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Override the base URL (e.g. for a mock server)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Disable TLS certificate verification (sandbox testing only)
    pub fn danger_disable_tls_verify(mut self) -> Self {
        self.verify_tls = false;
        self
    }

    /// Set the API key used for C2B URL registration
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the B2C initiator name
    pub fn initiator_name(mut self, name: impl Into<String>) -> Self {
        self.initiator_name = Some(name.into());
        self
    }

    /// Set the encrypted B2C security credential
    pub fn security_credential(mut self, credential: impl Into<String>) -> Self {
        self.security_credential = Some(credential.into());
        self
    }

    /// Validate and build the config
    pub fn build(self) -> Result<Config> {
        if self.consumer_key.trim().is_empty() {
            return Err(Error::missing_field("consumer_key"));
        }
        if self.consumer_secret.trim().is_empty() {
            return Err(Error::missing_field("consumer_secret"));
        }
        if self.timeout.is_zero() {
            return Err(Error::config("timeout must be non-zero"));
        }

        let base_url = self
            .base_url
            .unwrap_or_else(|| self.environment.base_url().to_string());
        url::Url::parse(&base_url)?;

        Ok(Config {
            consumer_key: self.consumer_key,
            consumer_secret: self.consumer_secret,
            environment: self.environment,
            base_url,
            auth_path: self.auth_path,
            stk_push_path: self.stk_push_path,
            b2c_path: self.b2c_path,
            c2b_register_path: self.c2b_register_path,
            c2b_payment_path: self.c2b_payment_path,
            timeout: self.timeout,
            verify_tls: self.verify_tls,
            api_key: self.api_key,
            initiator_name: self.initiator_name,
            security_credential: self.security_credential,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_defaults() {
        let config = Config::new("key", "secret").unwrap();
        assert_eq!(config.environment, Environment::Sandbox);
        assert_eq!(config.base_url, "https://apisandbox.safaricom.et");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.verify_tls);
        assert!(!config.is_production());
    }

    #[test]
    fn test_url_composition() {
        let config = Config::new("key", "secret").unwrap();
        assert_eq!(
            config.auth_url(),
            "https://apisandbox.safaricom.et/v1/token/generate"
        );
        assert_eq!(
            config.stk_push_url(),
            "https://apisandbox.safaricom.et/mpesa/stkpush/v3/processrequest"
        );
        assert_eq!(
            config.c2b_register_url(),
            "https://apisandbox.safaricom.et/v1/c2b-registerurl/register"
        );
    }

    #[test]
    fn test_url_composition_trims_slashes() {
        let config = Config::builder("key", "secret")
            .base_url("https://mock.example.com/")
            .build()
            .unwrap();
        assert_eq!(config.auth_url(), "https://mock.example.com/v1/token/generate");
    }

    #[test]
    fn test_empty_credentials_rejected() {
        let err = Config::new("", "secret").unwrap_err();
        assert_eq!(err.to_string(), "Missing required config field: consumer_key");

        let err = Config::new("key", "   ").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required config field: consumer_secret"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = Config::builder("key", "secret")
            .base_url("not a url")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_production_base_url() {
        let config = Config::builder("key", "secret")
            .environment(Environment::Production)
            .build()
            .unwrap();
        assert_eq!(config.base_url, "https://api.safaricom.et");
        assert!(config.is_production());
    }

    #[test]
    fn test_registration_api_key_fallback() {
        let config = Config::new("consumer-key", "secret").unwrap();
        assert_eq!(config.registration_api_key(), "consumer-key");

        let config = Config::builder("consumer-key", "secret")
            .api_key("dedicated-key")
            .build()
            .unwrap();
        assert_eq!(config.registration_api_key(), "dedicated-key");
    }
}
