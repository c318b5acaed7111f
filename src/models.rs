//! Request and response models
//!
//! Wire-faithful records for each API operation. Field names follow the
//! provider's PascalCase JSON convention via serde renames; optional
//! fields are omitted from the payload when unset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Key-value parameter attached to C2B payment requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl Parameter {
    /// Create a key-value parameter
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Reference data item carried alongside a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceItem {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// Initiator identity for C2B payment requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Initiator {
    #[serde(rename = "IdentifierType")]
    pub identifier_type: i32,
    #[serde(rename = "Identifier")]
    pub identifier: String,
    #[serde(rename = "SecurityCredential")]
    pub security_credential: String,
    #[serde(rename = "SecretKey", skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
}

/// Transaction party (payer or payee)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    #[serde(rename = "IdentifierType")]
    pub identifier_type: i32,
    #[serde(rename = "Identifier")]
    pub identifier: String,
    #[serde(rename = "ShortCode", skip_serializing_if = "Option::is_none")]
    pub short_code: Option<String>,
}

// ============================================================================
// STK Push
// ============================================================================

/// STK push (customer prompt) request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StkPushRequest {
    #[serde(rename = "MerchantRequestID")]
    pub merchant_request_id: String,
    #[serde(rename = "BusinessShortCode")]
    pub business_short_code: String,
    /// base64 of `shortcode + passkey + timestamp`, see [`crate::util::generate_password`]
    #[serde(rename = "Password")]
    pub password: String,
    /// `YYYYMMDDHHMMSS` local time
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "TransactionType")]
    pub transaction_type: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "PartyA")]
    pub party_a: String,
    #[serde(rename = "PartyB")]
    pub party_b: String,
    #[serde(rename = "PhoneNumber")]
    pub phone_number: String,
    #[serde(rename = "TransactionDesc")]
    pub transaction_desc: String,
    #[serde(rename = "CallBackURL")]
    pub callback_url: String,
    #[serde(rename = "AccountReference")]
    pub account_reference: String,
    #[serde(rename = "ReferenceData", skip_serializing_if = "Option::is_none")]
    pub reference_data: Option<Vec<ReferenceItem>>,
}

/// Default STK push transaction type
pub const TRANSACTION_TYPE_PAY_BILL: &str = "CustomerPayBillOnline";

/// STK push response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StkPushResponse {
    #[serde(rename = "MerchantRequestID")]
    pub merchant_request_id: String,
    #[serde(rename = "CheckoutRequestID")]
    pub checkout_request_id: String,
    #[serde(rename = "ResponseCode")]
    pub response_code: String,
    #[serde(rename = "ResponseDescription")]
    pub response_description: String,
    #[serde(rename = "CustomerMessage")]
    pub customer_message: String,
}

impl StkPushResponse {
    /// Whether the request was accepted for processing
    pub fn is_success(&self) -> bool {
        self.response_code == "0"
    }
}

// ============================================================================
// C2B URL Registration
// ============================================================================

/// C2B callback-URL registration request (form-encoded on the wire)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct C2bRegisterUrlRequest {
    #[serde(rename = "ShortCode")]
    pub short_code: String,
    /// `Completed` or `Cancelled`
    #[serde(rename = "ResponseType")]
    pub response_type: String,
    #[serde(rename = "CommandID", default = "default_register_command")]
    pub command_id: String,
    #[serde(rename = "ConfirmationURL")]
    pub confirmation_url: String,
    #[serde(rename = "ValidationURL")]
    pub validation_url: String,
}

fn default_register_command() -> String {
    "RegisterURL".to_string()
}

impl C2bRegisterUrlRequest {
    /// Create a registration request with the fixed `RegisterURL` command
    pub fn new(
        short_code: impl Into<String>,
        response_type: impl Into<String>,
        confirmation_url: impl Into<String>,
        validation_url: impl Into<String>,
    ) -> Self {
        Self {
            short_code: short_code.into(),
            response_type: response_type.into(),
            command_id: default_register_command(),
            confirmation_url: confirmation_url.into(),
            validation_url: validation_url.into(),
        }
    }
}

/// C2B callback-URL registration response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct C2bRegisterUrlResponse {
    #[serde(rename = "header")]
    pub header: C2bRegisterUrlResponseHeader,
}

/// Status header of a registration response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct C2bRegisterUrlResponseHeader {
    #[serde(rename = "responseCode")]
    pub response_code: String,
    #[serde(rename = "responseMessage")]
    pub response_message: String,
    #[serde(rename = "customerMessage", skip_serializing_if = "Option::is_none")]
    pub customer_message: Option<String>,
    #[serde(rename = "timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

// ============================================================================
// C2B Payment
// ============================================================================

/// C2B payment processing request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct C2bPaymentRequest {
    #[serde(rename = "RequestRefID")]
    pub request_ref_id: String,
    #[serde(rename = "CommandID")]
    pub command_id: String,
    #[serde(rename = "Remark")]
    pub remark: String,
    #[serde(rename = "ChannelSessionID")]
    pub channel_session_id: String,
    #[serde(rename = "SourceSystem")]
    pub source_system: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "Parameters")]
    pub parameters: Vec<Parameter>,
    #[serde(rename = "ReferenceData", skip_serializing_if = "Option::is_none")]
    pub reference_data: Option<Vec<ReferenceItem>>,
    #[serde(rename = "Initiator")]
    pub initiator: Initiator,
    #[serde(rename = "PrimaryParty")]
    pub primary_party: Party,
    #[serde(rename = "ReceiverParty")]
    pub receiver_party: Party,
}

// ============================================================================
// B2C Payment
// ============================================================================

/// B2C payment request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct B2cRequest {
    #[serde(rename = "InitiatorName")]
    pub initiator_name: String,
    #[serde(rename = "SecurityCredential")]
    pub security_credential: String,
    #[serde(rename = "CommandID", default = "default_b2c_command")]
    pub command_id: String,
    #[serde(rename = "Amount")]
    pub amount: u64,
    #[serde(rename = "PartyA")]
    pub party_a: String,
    #[serde(rename = "PartyB")]
    pub party_b: String,
    #[serde(rename = "Remarks")]
    pub remarks: String,
    #[serde(rename = "QueueTimeOutURL")]
    pub queue_timeout_url: String,
    #[serde(rename = "ResultURL")]
    pub result_url: String,
    #[serde(rename = "Occassion", skip_serializing_if = "Option::is_none")]
    pub occassion: Option<String>,
}

fn default_b2c_command() -> String {
    "BusinessPayment".to_string()
}

// ============================================================================
// Transaction Response
// ============================================================================

/// Generic transaction response shared by C2B and B2C payments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResponse {
    #[serde(rename = "ResponseCode")]
    pub response_code: String,
    #[serde(rename = "ResponseDescription")]
    pub response_description: String,
    #[serde(rename = "ConversationID", skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(
        rename = "OriginatorConversationID",
        skip_serializing_if = "Option::is_none"
    )]
    pub originator_conversation_id: Option<String>,
    #[serde(rename = "TransactionID", skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl TransactionResponse {
    /// Whether the request was accepted for processing
    pub fn is_success(&self) -> bool {
        self.response_code == "0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stk_push_request_wire_names() {
        let request = StkPushRequest {
            merchant_request_id: "m1".to_string(),
            business_short_code: "174379".to_string(),
            password: "cGFzcw==".to_string(),
            timestamp: "20230418163442".to_string(),
            transaction_type: TRANSACTION_TYPE_PAY_BILL.to_string(),
            amount: "10.00".to_string(),
            party_a: "251712870937".to_string(),
            party_b: "174379".to_string(),
            phone_number: "251712870937".to_string(),
            transaction_desc: "Payment".to_string(),
            callback_url: "https://example.com/callback".to_string(),
            account_reference: "INV-001".to_string(),
            reference_data: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["BusinessShortCode"], "174379");
        assert_eq!(value["CallBackURL"], "https://example.com/callback");
        assert_eq!(value["TransactionType"], "CustomerPayBillOnline");
        assert!(value.get("ReferenceData").is_none());
    }

    #[test]
    fn test_stk_push_response_round_trip() {
        let body = serde_json::json!({
            "MerchantRequestID": "m1",
            "CheckoutRequestID": "c1",
            "ResponseCode": "0",
            "ResponseDescription": "Success",
            "CustomerMessage": "ok"
        });

        let response: StkPushResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.checkout_request_id, "c1");
        assert!(response.is_success());
    }

    #[test]
    fn test_register_url_command_fixed() {
        let request = C2bRegisterUrlRequest::new(
            "174379",
            "Completed",
            "https://example.com/confirm",
            "https://example.com/validate",
        );
        assert_eq!(request.command_id, "RegisterURL");

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["CommandID"], "RegisterURL");
    }

    #[test]
    fn test_transaction_response_optional_fields() {
        let body = serde_json::json!({
            "ResponseCode": "0",
            "ResponseDescription": "Accepted"
        });

        let response: TransactionResponse = serde_json::from_value(body).unwrap();
        assert!(response.is_success());
        assert_eq!(response.conversation_id, None);
        assert_eq!(response.transaction_id, None);
    }

    #[test]
    fn test_b2c_request_skips_unset_occassion() {
        let request = B2cRequest {
            initiator_name: "api-user".to_string(),
            security_credential: "encrypted".to_string(),
            command_id: "BusinessPayment".to_string(),
            amount: 100,
            party_a: "174379".to_string(),
            party_b: "251712870937".to_string(),
            remarks: "Salary".to_string(),
            queue_timeout_url: "https://example.com/timeout".to_string(),
            result_url: "https://example.com/result".to_string(),
            occassion: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("Occassion").is_none());
        assert_eq!(value["CommandID"], "BusinessPayment");
    }
}
