//! Tests for the platform entity records.

use super::*;
use chrono::TimeZone;
use serde_json::json;

fn build_json() -> serde_json::Value {
    json!({
        "id": "build_1",
        "status": "completed",
        "conclusion": "success",
        "commit_hash": "4f2a9c1",
        "queued_at": "2024-03-01T11:58:00Z",
        "started_at": "2024-03-01T11:58:05.123456Z",
        "completed_at": "2024-03-01T11:59:40Z"
    })
}

#[test]
fn test_build_decodes_all_fields() {
    let build: Build = serde_json::from_value(build_json()).unwrap();

    assert_eq!(build.id, "build_1");
    assert!(build.status.is_completed());
    assert!(build.is_success());
    assert_eq!(
        build.queued_at,
        Utc.with_ymd_and_hms(2024, 3, 1, 11, 58, 0).unwrap()
    );
    assert!(build.started_at.is_some());
}

#[test]
fn test_unset_conclusion_forms_decode_to_none() {
    for conclusion in [json!(""), json!(null)] {
        let mut value = build_json();
        value["status"] = json!("running");
        value["conclusion"] = conclusion;

        let build: Build = serde_json::from_value(value).unwrap();
        assert_eq!(build.conclusion, None);
    }

    let mut value = build_json();
    value.as_object_mut().unwrap().remove("conclusion");
    let build: Build = serde_json::from_value(value).unwrap();
    assert_eq!(build.conclusion, None);
}

#[test]
fn test_unrecognised_values_decode_to_unknown() {
    let mut value = build_json();
    value["status"] = json!("paused");
    value["conclusion"] = json!("timed_out");

    let build: Build = serde_json::from_value(value).unwrap();

    assert_eq!(build.status, BuildStatus::Unknown);
    assert_eq!(build.conclusion, Some(Conclusion::Unknown));
}

#[test]
fn test_environment_type_field_is_renamed() {
    let env: Environment = serde_json::from_value(json!({
        "id": "env_1",
        "name": "staging",
        "type": "development",
        "api_base_url": "https://staging-myapp.example.com",
        "created_at": "2024-01-01T00:00:00Z"
    }))
    .unwrap();

    assert_eq!(env.env_type, EnvironmentType::Development);
    assert_eq!(env.env_type.as_str(), "development");

    let encoded = serde_json::to_value(&env).unwrap();
    assert_eq!(encoded["type"], "development");
}

#[test]
fn test_infra_change_awaiting_approval() {
    let change: InfraChange = serde_json::from_value(json!({
        "id": "infra_1",
        "status": "awaiting_approval",
        "conclusion": "",
        "queued_at": null,
        "started_at": null,
        "completed_at": null
    }))
    .unwrap();

    assert!(change.is_awaiting_approval());
    assert!(!change.status.is_completed());
    assert!(!change.is_success());
}

#[test]
fn test_infra_change_rejected_conclusion() {
    let change: InfraChange = serde_json::from_value(json!({
        "id": "infra_1",
        "status": "completed",
        "conclusion": "rejected"
    }))
    .unwrap();

    assert_eq!(change.conclusion, Some(InfraChangeConclusion::Rejected));
}

#[test]
fn test_rollout_requires_build() {
    let result: Result<Rollout, _> = serde_json::from_value(json!({
        "id": "rollout_1",
        "status": "pending",
        "conclusion": ""
    }));

    assert!(result.is_err());
}

#[test]
fn test_rollout_with_optional_phases() {
    let rollout: Rollout = serde_json::from_value(json!({
        "id": "rollout_1",
        "status": "running",
        "conclusion": "",
        "build": build_json(),
        "infra_provision": null,
        "deploy": {
            "id": "deploy_1",
            "status": "queued",
            "conclusion": "",
            "queued_at": "2024-03-01T11:59:41Z"
        },
        "queued_at": "2024-03-01T11:58:00Z",
        "started_at": "2024-03-01T11:58:01Z"
    }))
    .unwrap();

    assert_eq!(rollout.status, RolloutStatus::Running);
    assert!(rollout.infra_provision.is_none());
    let deploy = rollout.deploy.as_ref().unwrap();
    assert_eq!(deploy.status, DeployStatus::Queued);
    assert!(!deploy.is_success());
    assert!(rollout.completed_at.is_none());
    assert!(!rollout.is_success());
}

#[test]
fn test_missing_scalar_fields_decode_to_defaults() {
    let mut value = build_json();
    let object = value.as_object_mut().unwrap();
    object.remove("commit_hash");
    object.remove("queued_at");
    object.remove("status");

    let build: Build = serde_json::from_value(value).unwrap();

    assert_eq!(build.commit_hash, "");
    assert_eq!(build.queued_at, DateTime::<Utc>::default());
    assert_eq!(build.status, BuildStatus::Unknown);
    assert!(build.is_success());
}

#[test]
fn test_null_scalar_fields_decode_to_defaults() {
    let env: Environment = serde_json::from_value(json!({
        "id": "env_1",
        "name": null,
        "type": null,
        "api_base_url": null,
        "created_at": null
    }))
    .unwrap();

    assert_eq!(env.id, "env_1");
    assert_eq!(env.name, "");
    assert_eq!(env.env_type, EnvironmentType::Unknown);
    assert_eq!(env.api_base_url, "");
    assert_eq!(env.created_at, DateTime::<Utc>::default());

    let app: Application = serde_json::from_value(json!({ "slug": "myapp" })).unwrap();
    assert_eq!(app.id, "");
    assert_eq!(app.slug, "myapp");
}

#[test]
fn test_present_scalar_with_wrong_type_is_rejected() {
    let mut value = build_json();
    value["commit_hash"] = json!(42);

    let result: Result<Build, _> = serde_json::from_value(value);

    assert!(result.is_err());
}
