//! Error types for webhook verification and decoding.
//!
//! Every failure of [`crate::parse_event`] is an ordinary, expected outcome of
//! handling untrusted network input. Each kind is a distinct variant so callers
//! can decide whether to log, alert, or silently drop a delivery.

use crate::signature::SIGNATURE_HEADER;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard result type for webhook operations
pub type WebhookResult<T> = Result<T, WebhookError>;

/// High-level error categorization for alerting decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Authenticity or freshness could not be established
    Security,
    /// The delivery was authentic but could not be decoded
    Permanent,
}

/// Errors raised while verifying and decoding a webhook delivery.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The signature header was empty.
    #[error("missing {} header", SIGNATURE_HEADER)]
    NoSignature,

    /// The header has no parseable timestamp, or a segment is malformed.
    #[error("invalid {} header", SIGNATURE_HEADER)]
    InvalidSignatureFormat,

    /// No usable code was present, or none matched the payload.
    #[error("no valid {} signatures", SIGNATURE_HEADER)]
    NoValidSignature,

    /// The signature timestamp is older than the tolerance window.
    #[error("webhook event is too old")]
    TooOld,

    /// The signature timestamp is further in the future than allowed.
    #[error("webhook event timestamp is in the future")]
    TimestampInFuture,

    /// The outer envelope is not valid JSON of the expected shape.
    #[error("webhooks: parse event: {0}")]
    MalformedEnvelope(#[source] serde_json::Error),

    /// The inner data blob does not match the shape registered for its type.
    #[error("webhooks: parse event data for {event_type:?}: {source}")]
    MalformedEventData {
        event_type: String,
        #[source]
        source: serde_json::Error,
    },

    /// The type tag is not registered, at either dispatch level.
    #[error("webhooks: unknown event type {event_type:?}")]
    UnknownEventType { event_type: String },
}

impl WebhookError {
    /// Get error category for monitoring and alerting
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NoSignature
            | Self::InvalidSignatureFormat
            | Self::NoValidSignature
            | Self::TooOld
            | Self::TimestampInFuture => ErrorCategory::Security,
            Self::MalformedEnvelope(_)
            | Self::MalformedEventData { .. }
            | Self::UnknownEventType { .. } => ErrorCategory::Permanent,
        }
    }

    /// Check if error is transient and should be retried.
    ///
    /// Verification and decoding are pure functions of their inputs, so
    /// re-running them with the same delivery always fails the same way.
    pub fn is_transient(&self) -> bool {
        false
    }

    /// Short, stable name of the error kind, suitable as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoSignature => "no_signature",
            Self::InvalidSignatureFormat => "invalid_signature_format",
            Self::NoValidSignature => "no_valid_signature",
            Self::TooOld => "too_old",
            Self::TimestampInFuture => "timestamp_in_future",
            Self::MalformedEnvelope(_) => "malformed_envelope",
            Self::MalformedEventData { .. } => "malformed_event_data",
            Self::UnknownEventType { .. } => "unknown_event_type",
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
