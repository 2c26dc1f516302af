//! Signature verification.
//!
//! Recomputes the HMAC-SHA256 code for a delivery, enforces the freshness
//! window, and compares against every candidate code from the header using
//! constant-time comparison.

use crate::config::ParserConfig;
use crate::error::{WebhookError, WebhookResult};
use crate::secret::WebhookSecret;
use crate::signature::{compute_signature_with_key, Signature};
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

/// Verifies that deliveries were signed with a shared secret and are fresh.
///
/// # Examples
///
/// ```rust
/// use khulnasoft_webhooks::{sign_payload, SignatureVerifier};
/// use chrono::Utc;
///
/// let payload = br#"{"id":"evt_1"}"#;
/// let header = sign_payload(Utc::now(), payload, "whsec_test");
///
/// let verifier = SignatureVerifier::new("whsec_test");
/// assert!(verifier.verify_header(payload, &header).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    secret: WebhookSecret,
    config: ParserConfig,
}

impl SignatureVerifier {
    /// Create a verifier with the default configuration.
    pub fn new(secret: impl Into<WebhookSecret>) -> Self {
        Self::with_config(secret, ParserConfig::default())
    }

    /// Create a verifier with explicit configuration.
    pub fn with_config(secret: impl Into<WebhookSecret>, config: ParserConfig) -> Self {
        Self {
            secret: secret.into(),
            config,
        }
    }

    /// Configuration in effect
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse `header` and verify it against `payload` using the current time.
    pub fn verify_header(&self, payload: &[u8], header: &str) -> WebhookResult<()> {
        let signature = Signature::parse(header)?;
        self.verify(payload, &signature)
    }

    /// Verify a parsed signature against `payload` using the current time.
    pub fn verify(&self, payload: &[u8], signature: &Signature) -> WebhookResult<()> {
        self.verify_at(payload, signature, Utc::now())
    }

    /// Verify a parsed signature against `payload` as of `now`.
    ///
    /// # Errors
    ///
    /// - [`WebhookError::TooOld`] if the signature is older than the
    ///   tolerance, whether or not a code matches
    /// - [`WebhookError::TimestampInFuture`] if a future skew bound is
    ///   configured and exceeded
    /// - [`WebhookError::NoValidSignature`] if no candidate code matches
    #[instrument(skip_all, fields(payload_len = payload.len(), candidates = signature.codes().len()))]
    pub fn verify_at(
        &self,
        payload: &[u8],
        signature: &Signature,
        now: DateTime<Utc>,
    ) -> WebhookResult<()> {
        let expected =
            compute_signature_with_key(signature.timestamp(), payload, self.secret.expose_bytes());

        self.check_freshness(signature.timestamp(), now)?;

        if signature
            .codes()
            .iter()
            .any(|code| constant_time_compare(code, &expected))
        {
            debug!("signature verified");
            return Ok(());
        }

        Err(WebhookError::NoValidSignature)
    }

    fn check_freshness(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> WebhookResult<()> {
        match now.signed_duration_since(timestamp).to_std() {
            Ok(age) if age > self.config.tolerance() => {
                debug!(age_seconds = age.as_secs(), "signature timestamp outside tolerance");
                Err(WebhookError::TooOld)
            }
            Ok(_) => Ok(()),
            // Negative age: the timestamp is ahead of our clock.
            Err(_) => {
                let Some(max_skew) = self.config.max_future_skew() else {
                    return Ok(());
                };
                let ahead = timestamp
                    .signed_duration_since(now)
                    .to_std()
                    .unwrap_or_default();
                if ahead > max_skew {
                    debug!(ahead_seconds = ahead.as_secs(), "signature timestamp in the future");
                    return Err(WebhookError::TimestampInFuture);
                }
                Ok(())
            }
        }
    }
}

/// Constant-time comparison of signature codes.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    use subtle::ConstantTimeEq;

    // Length is not secret; the HMAC output size is fixed.
    if a.len() != b.len() {
        return false;
    }

    a.ct_eq(b).into()
}

#[cfg(test)]
#[path = "verifier_tests.rs"]
mod tests;
