//! Shared webhook secret container.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The secret shared between the platform and a webhook endpoint.
///
/// The value is wiped from memory on drop and never appears in `Debug`
/// output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WebhookSecret {
    inner: String,
}

impl WebhookSecret {
    /// Create secret from string
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// Get secret as string (only for immediate use)
    pub fn expose_secret(&self) -> &str {
        &self.inner
    }

    /// Get secret as bytes, the HMAC key material
    pub fn expose_bytes(&self) -> &[u8] {
        self.inner.as_bytes()
    }

    /// Check if secret is empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Get secret length without exposing content
    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookSecret")
            .field("length", &self.len())
            .field("value", &"[REDACTED]")
            .finish()
    }
}

impl From<String> for WebhookSecret {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for WebhookSecret {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
#[path = "secret_tests.rs"]
mod tests;
