//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
///
/// # Example
///
/// ```toml
/// [logging]
/// event_log = "meal-events.jsonl"   # JSONL audit trail of meal events
/// log_dir = "~/.local/state/tablevote"  # daily rolling diagnostic logs
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    pub event_log: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}
