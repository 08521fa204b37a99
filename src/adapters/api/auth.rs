//! GMO Coin Authentication — HMAC-SHA256 Request Signing
//!
//! Signs every private API request per the GMO Coin specification:
//! the signature is HMAC-SHA256 over `timestamp + method + path + body`
//! keyed with the secret key, encoded as lowercase hex. The signature
//! travels in the `API-SIGN` header alongside `API-KEY` and
//! `API-TIMESTAMP`.

use std::time::{SystemTime, UNIX_EPOCH};

/// The four fields that fully determine a request signature.
///
/// `path` is the signed path (e.g. `/v1/order`), not the full URL.
/// `body` is the exact JSON text sent, or `None` for body-less requests.
#[derive(Debug, Clone, Copy)]
pub struct SignatureContext<'a> {
    pub timestamp: &'a str,
    pub method: &'a str,
    pub path: &'a str,
    pub body: Option<&'a str>,
}

/// GMO Coin API credential holder and request signer.
pub struct GmoAuth {
    /// API key sent in the `API-KEY` header.
    api_key: String,
    /// Secret key used as the HMAC key (never sent in headers).
    secret_key: String,
}

impl GmoAuth {
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key,
            secret_key,
        }
    }

    /// Get the API key for request headers.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Current Unix timestamp in milliseconds, as the decimal string the
    /// `API-TIMESTAMP` header expects.
    pub fn timestamp_ms() -> String {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis()
            .to_string()
    }

    /// Sign a request context.
    ///
    /// Pure function of the context and the secret key: the same inputs
    /// always produce the same signature. An absent body signs as the
    /// empty string. Output is lowercase hex, two digits per MAC byte.
    pub fn sign(&self, ctx: &SignatureContext<'_>) -> String {
        let message = format!(
            "{}{}{}{}",
            ctx.timestamp,
            ctx.method,
            ctx.path,
            ctx.body.unwrap_or("")
        );
        let mac = hmac_sha256::HMAC::mac(message.as_bytes(), self.secret_key.as_bytes());
        mac.iter().map(|byte| format!("{byte:02x}")).collect()
    }
}
