//! Verification settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Maximum age of a delivery, in seconds, under the default configuration.
pub const DEFAULT_TOLERANCE_SECONDS: u64 = 300;

/// Settings controlling how strictly deliveries are verified.
///
/// Deserializes from partial input; missing fields take their defaults.
///
/// ```rust
/// use khulnasoft_webhooks::ParserConfig;
///
/// let config: ParserConfig = serde_json::from_str(r#"{"max_future_skew_seconds": 30}"#).unwrap();
/// assert_eq!(config.tolerance_seconds, 300);
/// assert_eq!(config.max_future_skew().map(|d| d.as_secs()), Some(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// How far in the past a signature timestamp may be.
    pub tolerance_seconds: u64,

    /// How far in the future a signature timestamp may be.
    ///
    /// `None` accepts any future timestamp, matching the platform's own
    /// receivers.
    pub max_future_skew_seconds: Option<u64>,
}

impl ParserConfig {
    /// Maximum accepted age of a delivery
    pub fn tolerance(&self) -> Duration {
        Duration::from_secs(self.tolerance_seconds)
    }

    /// Maximum accepted clock skew into the future, if bounded
    pub fn max_future_skew(&self) -> Option<Duration> {
        self.max_future_skew_seconds.map(Duration::from_secs)
    }

    /// Set the tolerance window
    pub fn with_tolerance(mut self, tolerance: Duration) -> Self {
        self.tolerance_seconds = tolerance.as_secs();
        self
    }

    /// Reject timestamps more than `skew` ahead of the verifier's clock
    pub fn with_max_future_skew(mut self, skew: Duration) -> Self {
        self.max_future_skew_seconds = Some(skew.as_secs());
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            tolerance_seconds: DEFAULT_TOLERANCE_SECONDS,
            max_future_skew_seconds: None,
        }
    }
}
