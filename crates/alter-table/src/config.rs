//! Alteration settings.

use serde::{Deserialize, Serialize};

/// What to do when a guard rejects an index operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SkipPolicy {
    /// Log a warning, drop the operation and keep the rest of the batch.
    #[default]
    Continue,
    /// Fail the whole alteration before anything is sent.
    Abort,
}

/// Settings applied to one alteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AlterConfig {
    /// Handling of guard skips.
    pub on_skip: SkipPolicy,
    /// Compose and log the statement without executing it.
    pub dry_run: bool,
}

impl AlterConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the skip policy.
    #[must_use]
    pub fn on_skip(mut self, policy: SkipPolicy) -> Self {
        self.on_skip = policy;
        self
    }

    /// Enables dry-run mode.
    #[must_use]
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }
}
