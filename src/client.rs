//! Main client for the M-PESA APIs
//!
//! Thin per-operation wrappers over the HTTP dispatch layer: each method
//! supplies its fixed URL, body encoding, and response record. Local
//! validation runs before anything touches the network.

use crate::config::Config;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::models::{
    B2cRequest, C2bPaymentRequest, C2bRegisterUrlRequest, C2bRegisterUrlResponse, StkPushRequest,
    StkPushResponse, TransactionResponse,
};
use crate::util;
use reqwest::Method;
use uuid::Uuid;

/// Client for the M-PESA payment APIs
#[derive(Debug)]
pub struct MpesaClient {
    config: Config,
    http: HttpClient,
}

impl MpesaClient {
    /// Create a client from a validated config
    pub fn new(config: Config) -> Result<Self> {
        let http = HttpClient::new(&config)?;
        Ok(Self { config, http })
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Initiate an STK push (customer payment prompt)
    ///
    /// The payer's phone number is normalized to `251XXXXXXXXX` form
    /// before dispatch; a malformed number fails without a network call.
    pub async fn stk_push(&self, mut request: StkPushRequest) -> Result<StkPushResponse> {
        request.phone_number = util::validate_phone_number(&request.phone_number)?;

        let body = serde_json::to_value(&request)?;
        self.http
            .request_json(
                Method::POST,
                &self.config.stk_push_url(),
                RequestConfig::new().json(body),
            )
            .await
    }

    /// Register C2B confirmation and validation callback URLs
    ///
    /// Sent form-encoded with the registration API key as a query
    /// parameter alongside the bearer token.
    pub async fn register_c2b_urls(
        &self,
        request: C2bRegisterUrlRequest,
    ) -> Result<C2bRegisterUrlResponse> {
        let body = serde_json::to_value(&request)?;
        self.http
            .request_json(
                Method::POST,
                &self.config.c2b_register_url(),
                RequestConfig::new()
                    .query("apikey", self.config.registration_api_key())
                    .form(body),
            )
            .await
    }

    /// Process a customer-to-business payment
    pub async fn process_c2b_payment(
        &self,
        request: C2bPaymentRequest,
    ) -> Result<TransactionResponse> {
        let body = serde_json::to_value(&request)?;
        self.http
            .request_json(
                Method::POST,
                &self.config.c2b_payment_url(),
                RequestConfig::new().json(body),
            )
            .await
    }

    /// Process a business-to-customer payment
    ///
    /// The receiving party's phone number is normalized before dispatch.
    pub async fn process_b2c_payment(&self, mut request: B2cRequest) -> Result<TransactionResponse> {
        request.party_b = util::validate_phone_number(&request.party_b)?;

        let body = serde_json::to_value(&request)?;
        self.http
            .request_json(
                Method::POST,
                &self.config.b2c_url(),
                RequestConfig::new().json(body),
            )
            .await
    }

    /// Current timestamp in the `YYYYMMDDHHMMSS` format the API expects
    pub fn generate_timestamp() -> String {
        util::current_timestamp()
    }

    /// Generate a unique request ID
    pub fn generate_request_id() -> String {
        Uuid::new_v4().to_string()
    }
}
