//! Store configuration from TOML (`[store]` section)

use crate::store::StoreBackend;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tablevote_domain::{ConfigIssue, ConfigIssueCode};

/// Raw store configuration from TOML
///
/// # Example
///
/// ```toml
/// [store]
/// backend = "json"          # "memory" or "json"
/// dir = "~/.local/share/tablevote/meals"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    pub backend: String,
    /// Directory for the JSON backend (defaults to the user data dir)
    pub dir: Option<PathBuf>,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            dir: None,
        }
    }
}

impl FileStoreConfig {
    /// Parse the backend name, falling back to in-memory storage
    pub fn parse_backend(&self) -> (StoreBackend, Vec<ConfigIssue>) {
        match self.backend.parse::<StoreBackend>() {
            Ok(backend) => (backend, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "store.backend".to_string(),
                        value: self.backend.clone(),
                        valid_values: vec!["memory".to_string(), "json".to_string()],
                    },
                    format!(
                        "store.backend: unknown value '{}', falling back to 'memory'",
                        self.backend
                    ),
                );
                (StoreBackend::Memory, vec![issue])
            }
        }
    }

    /// Directory for the JSON backend
    pub fn resolved_dir(&self) -> Option<PathBuf> {
        self.dir
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("tablevote").join("meals")))
    }
}
