//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod logging;
mod output;
mod preferences;
mod source;
mod store;

pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use preferences::FilePreferencesConfig;
pub use source::FileSourceConfig;
pub use store::FileStoreConfig;

use serde::{Deserialize, Serialize};
use tablevote_domain::ConfigIssue;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Meal-wide preference defaults
    pub preferences: FilePreferencesConfig,
    /// Meal state persistence
    pub store: FileStoreConfig,
    /// Candidate provider settings
    pub source: FileSourceConfig,
    /// Event log and diagnostic log locations
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.preferences.to_preferences().1);
        issues.extend(self.store.parse_backend().1);
        issues.extend(self.source.validate());
        issues
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablevote_domain::ConfigIssueCode;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[preferences]
default_min_rating = 4.0
default_unwanted_tags = ["fast_food_restaurant"]

[store]
backend = "json"
dir = "/var/lib/tablevote"

[source]
catalog_file = "places.json"
timeout_seconds = 5

[logging]
event_log = "events.jsonl"

[output]
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.preferences.default_min_rating, 4.0);
        assert_eq!(config.preferences.default_unwanted_tags.len(), 1);
        assert_eq!(config.store.backend, "json");
        assert_eq!(config.source.timeout_seconds, Some(5));
        assert!(config.logging.event_log.is_some());
        assert!(!config.output.color);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[store]\nbackend = \"memory\"\n").unwrap();
        assert_eq!(config.preferences.default_min_rating, 0.0);
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_collects_every_issue() {
        let toml_str = r#"
[preferences]
default_min_rating = 9.0

[store]
backend = "redis"

[source]
timeout_seconds = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().any(|i| matches!(
            &i.code,
            ConfigIssueCode::InvalidEnumValue { field, .. } if field == "store.backend"
        )));
    }

    #[test]
    fn test_to_toml_round_trips() {
        let config = FileConfig::default();
        let rendered = config.to_toml().unwrap();
        let parsed: FileConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.store.backend, config.store.backend);
    }
}
