//! Common test utilities for khulnasoft-webhooks integration tests
//!
//! This module provides:
//! - A fixed verification clock
//! - Builders for envelope payloads and signature headers

use chrono::{DateTime, Duration, TimeZone, Utc};
use khulnasoft_webhooks::{compute_signature, sign_payload, Signature};
use serde_json::{json, Value};

pub const SECRET: &str = "whsec_integration";

/// Verification time used by every test.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 8, 30, 0).unwrap()
}

#[allow(dead_code)]
pub fn seconds_ago(seconds: i64) -> DateTime<Utc> {
    now() - Duration::seconds(seconds)
}

/// Header signed with [`SECRET`] at [`now`].
#[allow(dead_code)]
pub fn signed_header(payload: &[u8]) -> String {
    sign_payload(now(), payload, SECRET)
}

/// Header carrying the given codes in order, timestamped at `timestamp`.
#[allow(dead_code)]
pub fn header_with_codes(timestamp: DateTime<Utc>, codes: Vec<Vec<u8>>) -> String {
    Signature::new(timestamp, codes).unwrap().to_string()
}

/// Correct code for `payload` at `timestamp` under [`SECRET`].
#[allow(dead_code)]
pub fn correct_code(timestamp: DateTime<Utc>, payload: &[u8]) -> Vec<u8> {
    compute_signature(timestamp, payload, SECRET)
}

// ============================================================================
// Payload builders
// ============================================================================

pub fn rollout_data() -> Value {
    json!({
        "rollout": {
            "id": "rollout_int",
            "status": "completed",
            "conclusion": "failure",
            "build": {
                "id": "build_int",
                "status": "completed",
                "conclusion": "success",
                "commit_hash": "0c1d2e3f",
                "queued_at": "2024-06-15T08:20:00Z",
                "started_at": "2024-06-15T08:20:05Z",
                "completed_at": "2024-06-15T08:22:40Z"
            },
            "infra_provision": {
                "id": "infra_int",
                "status": "completed",
                "conclusion": "rejected",
                "queued_at": "2024-06-15T08:22:41Z"
            },
            "deploy": null,
            "queued_at": "2024-06-15T08:20:00Z",
            "started_at": "2024-06-15T08:20:01Z",
            "completed_at": "2024-06-15T08:25:00Z"
        },
        "env": {
            "id": "env_int",
            "name": "preview-42",
            "type": "preview",
            "api_base_url": "https://preview-42.example.com",
            "created_at": "2024-06-01T00:00:00Z"
        },
        "app": {
            "id": "app_int",
            "slug": "integration-app",
            "created_at": "2024-05-01T00:00:00Z"
        }
    })
}

pub fn envelope_payload(event_type: &str, data: Value) -> Vec<u8> {
    json!({
        "id": "evt_int",
        "webhook_id": "wh_int",
        "sequence_id": 1001,
        "type": event_type,
        "data": data
    })
    .to_string()
    .into_bytes()
}
