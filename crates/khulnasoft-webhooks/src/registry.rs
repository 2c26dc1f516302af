//! Event type registry.
//!
//! Maps a type tag such as `rollout.created` to the shape its data decodes
//! into. Lookup is two-level: the category before the first `.` selects a
//! category resolver, which then matches the full tag.

use crate::error::{WebhookError, WebhookResult};
use crate::events::EventData;
use serde_json::value::RawValue;
use std::fmt;
use std::str::FromStr;

const ROLLOUT_CATEGORY: &str = "rollout";

/// Every event type this crate can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `rollout.created`
    RolloutCreated,
    /// `rollout.awaiting_infra_approval`
    RolloutAwaitingInfraApproval,
    /// `rollout.completed`
    RolloutCompleted,
}

impl EventKind {
    /// All registered kinds
    pub const ALL: [EventKind; 3] = [
        Self::RolloutCreated,
        Self::RolloutAwaitingInfraApproval,
        Self::RolloutCompleted,
    ];

    /// Resolve a type tag.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::UnknownEventType`] carrying `tag` if either the
    /// category or the full tag is not registered.
    pub fn from_tag(tag: &str) -> WebhookResult<Self> {
        let category = tag.split_once('.').map_or(tag, |(category, _)| category);

        let kind = match category {
            ROLLOUT_CATEGORY => resolve_rollout(tag),
            _ => None,
        };

        kind.ok_or_else(|| WebhookError::UnknownEventType {
            event_type: tag.to_string(),
        })
    }

    /// Canonical type tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RolloutCreated => "rollout.created",
            Self::RolloutAwaitingInfraApproval => "rollout.awaiting_infra_approval",
            Self::RolloutCompleted => "rollout.completed",
        }
    }

    /// Category the tag belongs to
    pub fn category(&self) -> &'static str {
        match self {
            Self::RolloutCreated | Self::RolloutAwaitingInfraApproval | Self::RolloutCompleted => {
                ROLLOUT_CATEGORY
            }
        }
    }

    /// Decode a data blob into the shape registered for this kind.
    pub fn decode(self, data: &RawValue) -> Result<EventData, serde_json::Error> {
        self.decode_str(data.get())
    }

    pub(crate) fn decode_str(self, data: &str) -> Result<EventData, serde_json::Error> {
        let decoded = match self {
            Self::RolloutCreated => EventData::RolloutCreated(serde_json::from_str(data)?),
            Self::RolloutAwaitingInfraApproval => {
                EventData::RolloutAwaitingInfraApproval(serde_json::from_str(data)?)
            }
            Self::RolloutCompleted => EventData::RolloutCompleted(serde_json::from_str(data)?),
        };
        Ok(decoded)
    }
}

/// Category resolver for `rollout.*` tags; matches the full tag.
fn resolve_rollout(tag: &str) -> Option<EventKind> {
    match tag {
        "rollout.created" => Some(EventKind::RolloutCreated),
        "rollout.awaiting_infra_approval" => Some(EventKind::RolloutAwaitingInfraApproval),
        "rollout.completed" => Some(EventKind::RolloutCompleted),
        _ => None,
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = WebhookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
