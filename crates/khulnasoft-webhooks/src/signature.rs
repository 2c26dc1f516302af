//! Signature header parsing and production.
//!
//! The `KhulnaSoft-Signature` header carries a Unix timestamp and one or
//! more HMAC-SHA256 codes:
//!
//! ```text
//! t=<unix-seconds>,v1=<base64url-nopad(code)>[,v1=<base64url-nopad(code)>...]
//! ```
//!
//! Several `v1` codes may be present while a secret is being rotated; any one
//! of them matching is sufficient.

use crate::error::{WebhookError, WebhookResult};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use std::str::FromStr;

type HmacSha256 = Hmac<Sha256>;

/// Name of the HTTP header carrying the signature.
pub const SIGNATURE_HEADER: &str = "KhulnaSoft-Signature";

const TIMESTAMP_KEY: &str = "t";
const V1_KEY: &str = "v1";

/// A parsed signature header.
///
/// Always holds a timestamp and at least one candidate code; codes keep
/// header order and duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    timestamp: DateTime<Utc>,
    codes: Vec<Vec<u8>>,
}

impl Signature {
    /// Create a signature from a timestamp and candidate codes.
    ///
    /// Taking a `DateTime` makes the timestamp always present. Any instant,
    /// including the Unix epoch, is a valid signing time; only a header with
    /// no `t` segment lacks one, which [`Signature::parse`] rejects.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::NoValidSignature`] if `codes` is empty.
    pub fn new(timestamp: DateTime<Utc>, codes: Vec<Vec<u8>>) -> WebhookResult<Self> {
        if codes.is_empty() {
            return Err(WebhookError::NoValidSignature);
        }
        Ok(Self {
            timestamp: truncate_to_seconds(timestamp),
            codes,
        })
    }

    /// Parse a signature header value.
    ///
    /// `v1` values that are not valid unpadded URL-safe base64 are dropped
    /// rather than rejected. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// - [`WebhookError::NoSignature`] if the header is empty
    /// - [`WebhookError::InvalidSignatureFormat`] if a segment has no `=`,
    ///   the timestamp is not an integer, or no timestamp is present
    /// - [`WebhookError::NoValidSignature`] if no `v1` code could be decoded
    pub fn parse(header: &str) -> WebhookResult<Self> {
        if header.is_empty() {
            return Err(WebhookError::NoSignature);
        }

        let mut timestamp = None;
        let mut codes = Vec::new();

        for segment in header.split(',') {
            let (key, value) = segment
                .split_once('=')
                .ok_or(WebhookError::InvalidSignatureFormat)?;

            match key {
                TIMESTAMP_KEY => {
                    let seconds = value
                        .parse::<i64>()
                        .map_err(|_| WebhookError::InvalidSignatureFormat)?;
                    let parsed = DateTime::from_timestamp(seconds, 0)
                        .ok_or(WebhookError::InvalidSignatureFormat)?;
                    timestamp = Some(parsed);
                }
                V1_KEY => {
                    // At least one decodable code is checked for below.
                    if let Ok(code) = URL_SAFE_NO_PAD.decode(value) {
                        codes.push(code);
                    }
                }
                _ => {}
            }
        }

        if codes.is_empty() {
            return Err(WebhookError::NoValidSignature);
        }
        let timestamp = timestamp.ok_or(WebhookError::InvalidSignatureFormat)?;

        Ok(Self { timestamp, codes })
    }

    /// Time the platform signed the delivery, at one-second granularity.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Candidate codes in header order.
    pub fn codes(&self) -> &[Vec<u8>] {
        &self.codes
    }
}

impl FromStr for Signature {
    type Err = WebhookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Formats the signature as a header value that [`Signature::parse`] accepts.
impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", TIMESTAMP_KEY, self.timestamp.timestamp())?;
        for code in &self.codes {
            write!(f, ",{}={}", V1_KEY, URL_SAFE_NO_PAD.encode(code))?;
        }
        Ok(())
    }
}

/// Compute the MAC signature for the given payload.
///
/// The signed message is the decimal Unix-seconds value of `timestamp`, a
/// literal `.`, then the raw payload bytes.
pub fn compute_signature(timestamp: DateTime<Utc>, payload: &[u8], secret: &str) -> Vec<u8> {
    compute_signature_with_key(timestamp, payload, secret.as_bytes())
}

pub(crate) fn compute_signature_with_key(
    timestamp: DateTime<Utc>,
    payload: &[u8],
    key: &[u8],
) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(timestamp.timestamp().to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Produce a complete signature header value for `payload`.
///
/// Used when relaying deliveries or building test fixtures.
pub fn sign_payload(timestamp: DateTime<Utc>, payload: &[u8], secret: &str) -> String {
    let code = compute_signature(timestamp, payload, secret);
    Signature {
        timestamp: truncate_to_seconds(timestamp),
        codes: vec![code],
    }
    .to_string()
}

fn truncate_to_seconds(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp.timestamp(), 0).unwrap_or(timestamp)
}

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;
