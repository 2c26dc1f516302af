//! Shared payload fixtures for unit tests.

use serde_json::{json, Value};

pub(crate) fn build_json() -> Value {
    json!({
        "id": "build_01HQ",
        "status": "completed",
        "conclusion": "success",
        "commit_hash": "9b2f3d4e",
        "queued_at": "2024-03-01T11:50:00Z",
        "started_at": "2024-03-01T11:50:02Z",
        "completed_at": "2024-03-01T11:54:10Z"
    })
}

pub(crate) fn rollout_json() -> Value {
    json!({
        "id": "rollout_01HQ",
        "status": "pending",
        "conclusion": "",
        "build": build_json(),
        "infra_provision": null,
        "deploy": null,
        "queued_at": null,
        "started_at": null,
        "completed_at": null
    })
}

pub(crate) fn env_json() -> Value {
    json!({
        "id": "env_01HQ",
        "name": "production",
        "type": "production",
        "api_base_url": "https://myapp.example.com",
        "created_at": "2023-11-20T09:00:00Z"
    })
}

pub(crate) fn app_json() -> Value {
    json!({
        "id": "app_01HQ",
        "slug": "myapp",
        "created_at": "2023-11-20T08:59:00Z"
    })
}

pub(crate) fn rollout_data_json() -> Value {
    json!({
        "rollout": rollout_json(),
        "env": env_json(),
        "app": app_json()
    })
}

pub(crate) fn envelope(event_type: &str, data: Value) -> Vec<u8> {
    json!({
        "id": "evt_01HQ",
        "webhook_id": "wh_01HQ",
        "sequence_id": 42,
        "type": event_type,
        "data": data
    })
    .to_string()
    .into_bytes()
}
