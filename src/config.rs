//! Execution settings for a [`Session`](crate::sql::engine::Session)

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Session configuration
///
/// Every field has a default, so a partial document deserializes fine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Simulated scheduling delay before each statement runs, in milliseconds
    pub latency_ms: u64,
    /// Run each statement under one store-wide lock
    ///
    /// Only matters for `Session::run` called from several threads; with it
    /// off those statements interleave one table operation at a time.
    pub exclusive: bool,
    /// Reject inserts whose column and value counts differ
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            latency_ms: 0,
            exclusive: true,
            strict: false,
        }
    }
}

impl Config {
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_exclusive(mut self, exclusive: bool) -> Self {
        self.exclusive = exclusive;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}
