//! # M-PESA SDK
//!
//! A Rust-native client for the Safaricom M-PESA payment APIs.
//!
//! ## Features
//!
//! - **STK Push**: Prompt a customer's device to authorize a payment
//! - **C2B**: Register callback URLs and process customer-to-business payments
//! - **B2C**: Process business-to-customer payouts
//! - **Token caching**: OAuth client-credentials tokens are cached in memory
//!   and refreshed once per expiry, even under concurrent callers
//! - **Typed errors**: configuration, authentication, validation, and API
//!   failures are distinct variants callers can match on
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mpesa_sdk::{Config, MpesaClient, StkPushRequest};
//! use mpesa_sdk::util::{current_timestamp, generate_password};
//!
//! #[tokio::main]
//! async fn main() -> mpesa_sdk::Result<()> {
//!     let config = Config::new("consumer-key", "consumer-secret")?;
//!     let client = MpesaClient::new(config)?;
//!
//!     let timestamp = current_timestamp();
//!     let request = StkPushRequest {
//!         merchant_request_id: MpesaClient::generate_request_id(),
//!         business_short_code: "174379".into(),
//!         password: generate_password("174379", "passkey", &timestamp)?,
//!         timestamp,
//!         transaction_type: mpesa_sdk::models::TRANSACTION_TYPE_PAY_BILL.into(),
//!         amount: "10.00".into(),
//!         party_a: "251712345678".into(),
//!         party_b: "174379".into(),
//!         phone_number: "0712345678".into(),
//!         transaction_desc: "Order #42".into(),
//!         callback_url: "https://example.com/callback".into(),
//!         account_reference: "INV-042".into(),
//!         reference_data: None,
//!     };
//!
//!     let response = client.stk_push(request).await?;
//!     println!("checkout: {}", response.checkout_request_id);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        MpesaClient                          │
//! │  stk_push()   register_c2b_urls()   process_c2b_payment()   │
//! │  process_b2c_payment()                                      │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────────┬──────────────┴──────────────┬────────────────┐
//! │     Auth     │            HTTP             │     Models     │
//! ├──────────────┼─────────────────────────────┼────────────────┤
//! │ Basic creds  │ Dispatch + classification   │ Wire records   │
//! │ Token cache  │ JSON / form bodies          │ PascalCase     │
//! │ Refresh lock │ Typed ApiResponse           │ serde renames  │
//! └──────────────┴─────────────────────────────┴────────────────┘
//! ```

#![warn(clippy::all)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the SDK
pub mod error;

/// SDK configuration
pub mod config;

/// Authentication and token caching
pub mod auth;

/// HTTP dispatch and response classification
pub mod http;

/// Request and response models
pub mod models;

/// Phone-number validation and request-building helpers
pub mod util;

/// Main API client
pub mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::MpesaClient;
pub use config::{Config, ConfigBuilder, Environment};
pub use error::{Error, Result};
pub use models::{
    B2cRequest, C2bPaymentRequest, C2bRegisterUrlRequest, C2bRegisterUrlResponse, StkPushRequest,
    StkPushResponse, TransactionResponse,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
