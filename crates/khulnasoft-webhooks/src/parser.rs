//! Event parsing pipeline.
//!
//! [`EventParser::parse`] runs every stage in order and fails fast:
//!
//! 1. parse the signature header
//! 2. verify authenticity and freshness
//! 3. decode the outer envelope
//! 4. resolve the type tag in the registry
//! 5. decode the inner data into the registered shape
//!
//! Either a fully verified, fully decoded [`Event`] is returned or an error;
//! there are no partial results.

use crate::config::ParserConfig;
use crate::error::{WebhookError, WebhookResult};
use crate::events::Event;
use crate::registry::EventKind;
use crate::secret::WebhookSecret;
use crate::signature::Signature;
use crate::verifier::SignatureVerifier;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::value::RawValue;
use tracing::{debug, instrument, warn};

/// Outer wire shape of a delivery, before the data is decoded.
///
/// Missing metadata fields decode to their zero value; a missing `type`
/// then fails the registry lookup as an unknown event type.
#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    id: String,
    #[serde(default)]
    webhook_id: String,
    #[serde(default)]
    sequence_id: i64,
    #[serde(rename = "type", default)]
    event_type: String,
    data: Option<Box<RawValue>>,
}

/// Verifies and decodes webhook deliveries for one endpoint secret.
///
/// A parser holds no mutable state and can be shared across threads.
///
/// # Examples
///
/// ```rust,no_run
/// use khulnasoft_webhooks::{EventParser, WebhookError};
///
/// # fn handle(body: &[u8], signature_header: &str) -> Result<(), WebhookError> {
/// let parser = EventParser::new("whsec_...");
/// let event = parser.parse(body, signature_header)?;
/// println!("{} #{}: {}", event.webhook_id, event.sequence_id, event.event_type);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EventParser {
    verifier: SignatureVerifier,
}

impl EventParser {
    /// Create a parser with the default configuration.
    pub fn new(secret: impl Into<WebhookSecret>) -> Self {
        Self {
            verifier: SignatureVerifier::new(secret),
        }
    }

    /// Create a parser with explicit configuration.
    pub fn with_config(secret: impl Into<WebhookSecret>, config: ParserConfig) -> Self {
        Self {
            verifier: SignatureVerifier::with_config(secret, config),
        }
    }

    /// Configuration in effect
    pub fn config(&self) -> &ParserConfig {
        self.verifier.config()
    }

    /// Verify and decode a delivery using the current time.
    pub fn parse(&self, payload: &[u8], signature_header: &str) -> WebhookResult<Event> {
        self.parse_at(payload, signature_header, Utc::now())
    }

    /// Verify and decode a delivery, checking freshness as of `now`.
    ///
    /// # Errors
    ///
    /// Any [`WebhookError`]; see the module documentation for stage order.
    #[instrument(skip_all, fields(payload_len = payload.len()))]
    pub fn parse_at(
        &self,
        payload: &[u8],
        signature_header: &str,
        now: DateTime<Utc>,
    ) -> WebhookResult<Event> {
        let signature = Signature::parse(signature_header).inspect_err(|e| {
            warn!(kind = e.kind(), "rejected webhook signature header");
        })?;

        self.verifier
            .verify_at(payload, &signature, now)
            .inspect_err(|e| {
                warn!(kind = e.kind(), "webhook signature verification failed");
            })?;

        decode_verified(payload).inspect_err(|e| {
            warn!(kind = e.kind(), error = %e, "failed to decode verified webhook");
        })
    }
}

/// Decode an already-authenticated payload.
fn decode_verified(payload: &[u8]) -> WebhookResult<Event> {
    let raw: RawEnvelope =
        serde_json::from_slice(payload).map_err(WebhookError::MalformedEnvelope)?;

    let kind = EventKind::from_tag(&raw.event_type)?;

    // A missing data blob decodes like an explicit null.
    let data_json = raw.data.as_deref().map_or("null", RawValue::get);
    let data = kind
        .decode_str(data_json)
        .map_err(|source| WebhookError::MalformedEventData {
            event_type: raw.event_type.clone(),
            source,
        })?;

    debug!(
        event_id = %raw.id,
        webhook_id = %raw.webhook_id,
        sequence_id = raw.sequence_id,
        event_type = %raw.event_type,
        "decoded webhook event"
    );

    Ok(Event {
        id: raw.id,
        webhook_id: raw.webhook_id,
        sequence_id: raw.sequence_id,
        event_type: raw.event_type,
        data,
    })
}

/// Verify and decode a delivery with the default configuration.
///
/// Equivalent to `EventParser::new(secret).parse(payload, signature_header)`.
pub fn parse_event(payload: &[u8], signature_header: &str, secret: &str) -> WebhookResult<Event> {
    EventParser::new(secret).parse(payload, signature_header)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
