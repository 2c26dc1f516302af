//! Integration tests for signature header handling and verification
//!
//! These tests drive the public parsing entry points with hand-built
//! headers and check which failure kind surfaces.

mod common;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use common::{
    correct_code, envelope_payload, header_with_codes, now, rollout_data, seconds_ago,
    signed_header, SECRET,
};
use khulnasoft_webhooks::{sign_payload, EventParser, ParserConfig, WebhookError};
use std::time::Duration;

fn parser() -> EventParser {
    EventParser::new(SECRET)
}

fn payload() -> Vec<u8> {
    envelope_payload("rollout.created", rollout_data())
}

/// Verify that a correctly signed delivery inside the window is accepted
/// anywhere between zero and three hundred seconds old.
#[test]
fn test_fresh_signed_delivery_is_accepted() {
    let payload = payload();

    for age in [0, 1, 150, 299, 300] {
        // Arrange
        let header = sign_payload(seconds_ago(age), &payload, SECRET);

        // Act
        let result = parser().parse_at(&payload, &header, now());

        // Assert
        assert!(result.is_ok(), "age {}s rejected: {:?}", age, result);
    }
}

/// Verify that flipping any single payload byte invalidates the signature.
#[test]
fn test_single_byte_flip_is_no_valid_signature() {
    let payload = payload();
    let header = signed_header(&payload);

    for index in 0..payload.len() {
        // Arrange
        let mut tampered = payload.clone();
        tampered[index] ^= 0x01;

        // Act
        let result = parser().parse_at(&tampered, &header, now());

        // Assert
        assert!(
            matches!(result, Err(WebhookError::NoValidSignature)),
            "byte {} flip gave {:?}",
            index,
            result
        );
    }
}

/// Verify that staleness wins over a correct code.
#[test]
fn test_stale_correct_signature_is_too_old() {
    let payload = payload();
    let header = sign_payload(seconds_ago(301), &payload, SECRET);

    let result = parser().parse_at(&payload, &header, now());

    assert!(matches!(result, Err(WebhookError::TooOld)));
}

/// Verify that an undecodable candidate before the real one is skipped.
#[test]
fn test_garbage_candidate_before_valid_one_is_dropped() {
    let payload = payload();
    let code = URL_SAFE_NO_PAD.encode(correct_code(now(), &payload));
    let header = format!("t={},v1=!!not-base64!!,v1={}", now().timestamp(), code);

    let result = parser().parse_at(&payload, &header, now());

    assert!(result.is_ok(), "unexpected {:?}", result);
}

/// Verify that a wrong candidate alongside the right one still verifies.
#[test]
fn test_any_matching_candidate_is_sufficient() {
    let payload = payload();
    let header = header_with_codes(now(), vec![vec![0u8; 32], correct_code(now(), &payload)]);

    assert!(parser().parse_at(&payload, &header, now()).is_ok());
}

/// Verify the failure kinds for structurally incomplete headers.
#[test]
fn test_header_shape_failures() {
    let payload = payload();
    let code = URL_SAFE_NO_PAD.encode(correct_code(now(), &payload));

    let cases = [
        (String::new(), "no_signature"),
        (format!("t={}", now().timestamp()), "no_valid_signature"),
        (format!("t={},v1=%%%", now().timestamp()), "no_valid_signature"),
        (format!("v1={}", code), "invalid_signature_format"),
        (format!("t=yesterday,v1={}", code), "invalid_signature_format"),
        (format!("t{},v1={}", now().timestamp(), code), "invalid_signature_format"),
    ];

    for (header, expected_kind) in cases {
        let error = parser().parse_at(&payload, &header, now()).unwrap_err();
        assert_eq!(error.kind(), expected_kind, "header {:?}", header);
    }
}

/// Verify that unknown header keys are ignored.
#[test]
fn test_unknown_header_keys_are_ignored() {
    let payload = payload();
    let header = format!("{},v0=legacy,scheme=hmac", signed_header(&payload));

    assert!(parser().parse_at(&payload, &header, now()).is_ok());
}

/// Verify that future timestamps pass unless a skew bound is configured.
#[test]
fn test_future_timestamp_policy() {
    let payload = payload();
    let header = sign_payload(now() + chrono::Duration::hours(1), &payload, SECRET);

    assert!(parser().parse_at(&payload, &header, now()).is_ok());

    let strict = EventParser::with_config(
        SECRET,
        ParserConfig::default().with_max_future_skew(Duration::from_secs(300)),
    );
    assert!(matches!(
        strict.parse_at(&payload, &header, now()),
        Err(WebhookError::TimestampInFuture)
    ));
}

/// Verify that every verification failure is a security, non-transient error.
#[test]
fn test_verification_failures_are_not_transient() {
    let payload = payload();
    let stale = sign_payload(seconds_ago(1000), &payload, SECRET);

    for header in ["", "t=1", stale.as_str()] {
        let error = parser().parse_at(&payload, header, now()).unwrap_err();
        assert!(!error.is_transient());
        assert_eq!(error.category(), khulnasoft_webhooks::ErrorCategory::Security);
    }
}
