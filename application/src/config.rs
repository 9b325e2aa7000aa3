//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave,
//! such as meal-wide preference defaults and provider timeouts.

use std::time::Duration;
use tablevote_domain::Preferences;

/// Application behavior configuration.
#[derive(Debug, Clone, Default)]
pub struct BehaviorConfig {
    /// Preferences applied to members who have not set their own.
    pub default_preferences: Preferences,
    /// Maximum time to wait for the candidate source before giving up.
    pub source_timeout: Option<Duration>,
}

impl BehaviorConfig {
    pub fn with_default_preferences(mut self, preferences: Preferences) -> Self {
        self.default_preferences = preferences;
        self
    }

    /// Creates a BehaviorConfig from an optional timeout in seconds.
    ///
    /// If `seconds` is `None`, no timeout is applied.
    pub fn with_timeout_seconds(mut self, seconds: Option<u64>) -> Self {
        self.source_timeout = seconds.map(Duration::from_secs);
        self
    }
}
