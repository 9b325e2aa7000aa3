//! Candidate source configuration from TOML (`[source]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tablevote_domain::{ConfigIssue, ConfigIssueCode};

/// Raw candidate source configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSourceConfig {
    /// JSON array of candidate restaurants
    pub catalog_file: Option<PathBuf>,
    /// Give up on the provider after this many seconds
    pub timeout_seconds: Option<u64>,
}

impl FileSourceConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        match self.timeout_seconds {
            Some(0) => vec![ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "source.timeout_seconds".to_string(),
                    value: "0".to_string(),
                },
                "source.timeout_seconds: 0 would fail every fetch, ignoring",
            )],
            _ => vec![],
        }
    }

    /// Effective timeout; zero is treated as unset
    pub fn timeout(&self) -> Option<u64> {
        self.timeout_seconds.filter(|s| *s > 0)
    }
}
