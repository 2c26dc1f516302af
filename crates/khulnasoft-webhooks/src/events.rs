//! Decoded webhook events.
//!
//! [`Event`] is the verified delivery handed to callers. Its `data` is one of
//! the shapes registered in [`crate::registry`], held in the closed
//! [`EventData`] sum type.

use crate::models::{Application, Environment, Rollout};
use crate::registry::EventKind;
use serde::{Deserialize, Serialize};

// ============================================================================
// Event
// ============================================================================

/// A verified, decoded webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// Unique id for this event
    pub id: String,

    /// Id of the webhook endpoint that received this event
    pub webhook_id: String,

    /// Strictly increasing sequence number, scoped to the webhook
    pub sequence_id: i64,

    /// Type tag, e.g. `rollout.created`
    #[serde(rename = "type")]
    pub event_type: String,

    /// Event payload; the variant always matches `event_type`
    pub data: EventData,
}

impl Event {
    /// Registered kind of this event
    pub fn kind(&self) -> EventKind {
        self.data.kind()
    }
}

/// Payload of a decoded event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EventData {
    RolloutCreated(RolloutCreatedEvent),
    RolloutAwaitingInfraApproval(RolloutAwaitingInfraApprovalEvent),
    RolloutCompleted(RolloutCompletedEvent),
}

impl EventData {
    /// Registered kind of this payload
    pub fn kind(&self) -> EventKind {
        match self {
            Self::RolloutCreated(_) => EventKind::RolloutCreated,
            Self::RolloutAwaitingInfraApproval(_) => EventKind::RolloutAwaitingInfraApproval,
            Self::RolloutCompleted(_) => EventKind::RolloutCompleted,
        }
    }

    /// Canonical type tag of this payload
    pub fn event_type(&self) -> &'static str {
        self.kind().as_str()
    }

    /// View the payload as a rollout event, if it is one.
    ///
    /// Every registered shape is currently in the rollout category, so this
    /// returns `Some` for all variants; shapes from other categories will
    /// return `None`.
    ///
    /// ```rust,no_run
    /// # use khulnasoft_webhooks::{Event, RolloutEvent};
    /// # fn handle(event: Event) {
    /// if let Some(rollout_event) = event.data.as_rollout_event() {
    ///     println!(
    ///         "{} rollout {} to {}",
    ///         rollout_event.app().slug,
    ///         rollout_event.rollout().id,
    ///         rollout_event.env().name,
    ///     );
    /// }
    /// # }
    /// ```
    pub fn as_rollout_event(&self) -> Option<&dyn RolloutEvent> {
        let event: &dyn RolloutEvent = match self {
            Self::RolloutCreated(e) => e,
            Self::RolloutAwaitingInfraApproval(e) => e,
            Self::RolloutCompleted(e) => e,
        };
        Some(event)
    }
}

// ============================================================================
// Rollout events
// ============================================================================

/// Implemented by all rollout-related events.
pub trait RolloutEvent {
    /// Current rollout state
    fn rollout(&self) -> &Rollout;

    /// Environment the rollout is targeting
    fn env(&self) -> &Environment;

    /// Application the event is for
    fn app(&self) -> &Application;
}

/// Data of the `rollout.created` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloutCreatedEvent {
    pub rollout: Rollout,
    pub env: Environment,
    pub app: Application,
}

/// Data of the `rollout.awaiting_infra_approval` event.
///
/// Sent when the rollout's infrastructure change needs manual approval
/// before it can proceed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloutAwaitingInfraApprovalEvent {
    pub rollout: Rollout,
    pub env: Environment,
    pub app: Application,
}

/// Data of the `rollout.completed` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloutCompletedEvent {
    pub rollout: Rollout,
    pub env: Environment,
    pub app: Application,
}

macro_rules! impl_rollout_event {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl RolloutEvent for $ty {
                fn rollout(&self) -> &Rollout {
                    &self.rollout
                }

                fn env(&self) -> &Environment {
                    &self.env
                }

                fn app(&self) -> &Application {
                    &self.app
                }
            }
        )+
    };
}

impl_rollout_event!(
    RolloutCreatedEvent,
    RolloutAwaitingInfraApprovalEvent,
    RolloutCompletedEvent,
);

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
