//! # KhulnaSoft Webhooks
//!
//! Authenticates and decodes inbound KhulnaSoft webhook deliveries.
//!
//! Given the raw request body and the `KhulnaSoft-Signature` header, this
//! crate:
//! - proves the body was signed by the platform with the endpoint's secret
//!   (HMAC-SHA256, constant-time comparison)
//! - rejects deliveries older than the tolerance window (300 seconds)
//! - decodes the JSON body into a typed [`Event`] selected by its type tag
//!
//! Transport, retries, persistence and de-duplication by sequence number are
//! left to the caller.
//!
//! ## Usage
//!
//! ```rust
//! use khulnasoft_webhooks::{parse_event, sign_payload, EventData, RolloutEvent};
//! use chrono::Utc;
//! use serde_json::json;
//!
//! let body = json!({
//!     "id": "evt_1",
//!     "webhook_id": "wh_1",
//!     "sequence_id": 1,
//!     "type": "rollout.created",
//!     "data": {
//!         "rollout": {
//!             "id": "rollout_1",
//!             "status": "pending",
//!             "conclusion": "",
//!             "build": {
//!                 "id": "build_1",
//!                 "status": "queued",
//!                 "conclusion": "",
//!                 "commit_hash": "abc123",
//!                 "queued_at": "2024-03-01T12:00:00Z"
//!             }
//!         },
//!         "env": {
//!             "id": "env_1",
//!             "name": "production",
//!             "type": "production",
//!             "api_base_url": "https://myapp.example.com",
//!             "created_at": "2024-01-01T00:00:00Z"
//!         },
//!         "app": { "id": "app_1", "slug": "myapp", "created_at": "2024-01-01T00:00:00Z" }
//!     }
//! })
//! .to_string();
//!
//! // The platform produces this header; it is computed here for the example.
//! let header = sign_payload(Utc::now(), body.as_bytes(), "whsec_example");
//!
//! let event = parse_event(body.as_bytes(), &header, "whsec_example").unwrap();
//! match &event.data {
//!     EventData::RolloutCreated(created) => assert_eq!(created.app().slug, "myapp"),
//!     other => panic!("unexpected event {}", other.event_type()),
//! }
//! ```

/// Verification settings
pub mod config;

/// Error taxonomy for verification and decoding
pub mod error;

/// Decoded event shapes
pub mod events;

/// Platform entity records carried by events
pub mod models;

/// Verification and decoding pipeline
pub mod parser;

/// Type tag to event shape mapping
pub mod registry;

/// Shared secret container
pub mod secret;

/// Signature header parsing and production
pub mod signature;

/// HMAC verification and freshness checks
pub mod verifier;

#[cfg(test)]
mod test_fixtures;

// Re-export key types for convenience
pub use config::{ParserConfig, DEFAULT_TOLERANCE_SECONDS};
pub use error::{ErrorCategory, WebhookError, WebhookResult};
pub use events::{
    Event, EventData, RolloutAwaitingInfraApprovalEvent, RolloutCompletedEvent,
    RolloutCreatedEvent, RolloutEvent,
};
pub use models::{
    Application, Build, BuildStatus, Conclusion, Deploy, DeployStatus, Environment,
    EnvironmentType, InfraChange, InfraChangeConclusion, InfraChangeStatus, Rollout,
    RolloutStatus,
};
pub use parser::{parse_event, EventParser};
pub use registry::EventKind;
pub use secret::WebhookSecret;
pub use signature::{compute_signature, sign_payload, Signature, SIGNATURE_HEADER};
pub use verifier::SignatureVerifier;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
