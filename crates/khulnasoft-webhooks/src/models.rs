//! Platform entity records carried by webhook events.
//!
//! These mirror the JSON the platform sends. Status and conclusion values
//! introduced after this crate was released decode to an `Unknown` variant
//! instead of failing the whole event.
//!
//! Scalar fields that are missing or `null` decode to their default (empty
//! string, Unix epoch, `Unknown`). Only nested records the event shape
//! depends on, such as [`Rollout::build`], are required.

use chrono::{DateTime, Utc};
use serde::de::value::StrDeserializer;
use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Application and Environment
// ============================================================================

/// An application hosted on the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Unique id for this application
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    /// Unique, human-readable identifier
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: DateTime<Utc>,
}

/// Kind of environment an application is deployed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentType {
    Production,
    /// Cloud-hosted, persistent environment that is not production
    Development,
    /// Ephemeral environment for a single pull request
    Preview,
    #[default]
    #[serde(other)]
    Unknown,
}

impl EnvironmentType {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
            Self::Preview => "preview",
            Self::Unknown => "unknown",
        }
    }
}

/// An environment an application is deployed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub env_type: EnvironmentType,

    /// Base URL for making requests to this environment
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_base_url: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Build
// ============================================================================

/// Build progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStatus {
    Queued,
    Running,
    Completed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl BuildStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Outcome of a completed build or deploy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conclusion {
    Success,
    Failure,
    Canceled,
    #[serde(other)]
    Unknown,
}

/// A build of the application source.
///
/// Builds may be shared by several rollouts and can already be underway or
/// finished when a rollout is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: BuildStatus,

    /// Set only once the build has completed
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub conclusion: Option<Conclusion>,

    /// Commit being built
    #[serde(default, deserialize_with = "null_as_default")]
    pub commit_hash: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub queued_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Build {
    pub fn is_success(&self) -> bool {
        self.conclusion == Some(Conclusion::Success)
    }
}

// ============================================================================
// Deploy
// ============================================================================

/// Deploy phase progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeployStatus {
    /// Created but not yet queued
    Pending,
    Queued,
    Running,
    Completed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl DeployStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// The deploy phase of a rollout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deploy {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: DeployStatus,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub conclusion: Option<Conclusion>,

    /// `None` while the deploy is pending
    pub queued_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Deploy {
    pub fn is_success(&self) -> bool {
        self.conclusion == Some(Conclusion::Success)
    }
}

// ============================================================================
// Infrastructure change
// ============================================================================

/// Infrastructure provisioning progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfraChangeStatus {
    Pending,
    /// Blocked until a user approves the change
    AwaitingApproval,
    Queued,
    Running,
    Completed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl InfraChangeStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Outcome of a completed infrastructure change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfraChangeConclusion {
    Success,
    Failure,
    Canceled,
    /// Rejected by a user at the manual approval stage
    Rejected,
    #[serde(other)]
    Unknown,
}

/// The infrastructure provisioning phase of a rollout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfraChange {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: InfraChangeStatus,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub conclusion: Option<InfraChangeConclusion>,

    pub queued_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl InfraChange {
    pub fn is_success(&self) -> bool {
        self.conclusion == Some(InfraChangeConclusion::Success)
    }

    /// Whether the change is blocked on manual approval
    pub fn is_awaiting_approval(&self) -> bool {
        self.status == InfraChangeStatus::AwaitingApproval
    }
}

// ============================================================================
// Rollout
// ============================================================================

/// Rollout progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RolloutStatus {
    Pending,
    Queued,
    Running,
    Completed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl RolloutStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// A rollout of a build to an environment.
///
/// A rollout moves through a build, an optional infrastructure provisioning
/// phase, and a deploy phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rollout {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: RolloutStatus,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub conclusion: Option<Conclusion>,

    /// Build used by the rollout; always present
    pub build: Build,

    /// `None` until infrastructure provisioning starts
    pub infra_provision: Option<InfraChange>,

    /// `None` until the deploy phase starts
    pub deploy: Option<Deploy>,

    pub queued_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Rollout {
    pub fn is_success(&self) -> bool {
        self.conclusion == Some(Conclusion::Success)
    }
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Treats a missing, `null`, or empty-string field as `None`.
fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => {
            let de: StrDeserializer<'_, D::Error> = s.into_deserializer();
            T::deserialize(de).map(Some)
        }
    }
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;
