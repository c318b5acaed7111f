//! Request-building helpers
//!
//! Phone-number normalization, STK push password generation, and the
//! timestamp/amount formats the M-PESA API expects. All validation here
//! is local and runs before any network call.

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;

static NON_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\D").expect("valid regex"));

static ET_MOBILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^251(7|9)\d{8}$").expect("valid regex"));

/// Validate and normalize an Ethiopian mobile number to `251` + 9 digits.
///
/// Accepts local (`0712345678`), bare-local (`712345678`), country-code
/// (`251712345678`), and international (`+251712345678`) forms.
/// Normalization is idempotent on valid input.
pub fn validate_phone_number(phone_number: &str) -> Result<String> {
    let cleaned = NON_DIGITS.replace_all(phone_number, "").into_owned();

    if cleaned.len() < 9 || cleaned.len() > 12 {
        return Err(Error::validation(format!(
            "invalid phone number length: {phone_number}"
        )));
    }

    let normalized = if let Some(rest) = cleaned.strip_prefix('0') {
        format!("251{rest}")
    } else if cleaned.starts_with('9') || cleaned.starts_with('7') {
        format!("251{cleaned}")
    } else if cleaned.starts_with("251") {
        cleaned
    } else {
        // Unknown prefix: keep the subscriber digits, re-prefix the country code
        format!("251{}", &cleaned[cleaned.len() - 9..])
    };

    if !ET_MOBILE.is_match(&normalized) {
        return Err(Error::validation(format!(
            "invalid Ethiopian phone number format: {phone_number}"
        )));
    }

    Ok(normalized)
}

/// Generate the base64 STK push password from `shortcode + passkey + timestamp`.
pub fn generate_password(shortcode: &str, passkey: &str, timestamp: &str) -> Result<String> {
    if shortcode.is_empty() || passkey.is_empty() {
        return Err(Error::validation("shortcode and passkey must not be empty"));
    }

    Ok(BASE64.encode(format!("{shortcode}{passkey}{timestamp}")))
}

/// Format a datetime as `YYYYMMDDHHMMSS` local time.
pub fn format_timestamp(dt: DateTime<Local>) -> String {
    dt.format("%Y%m%d%H%M%S").to_string()
}

/// Current local time as `YYYYMMDDHHMMSS`.
pub fn current_timestamp() -> String {
    format_timestamp(Local::now())
}

/// Format an amount with two decimal places.
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Strip characters with injection potential and cap the length.
pub fn sanitize_input(input: &str, max_length: usize) -> String {
    let sanitized: String = input
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '&' | '\'' | '"' | '(' | ')'))
        .collect();

    sanitized.chars().take(max_length).collect()
}
