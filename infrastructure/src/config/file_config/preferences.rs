//! Preference defaults from TOML (`[preferences]` section)

use serde::{Deserialize, Serialize};
use tablevote_domain::{ConfigIssue, ConfigIssueCode, Preferences};

/// Raw preference defaults from TOML
///
/// # Example
///
/// ```toml
/// [preferences]
/// default_min_rating = 3.5
/// default_unwanted_tags = ["fast_food_restaurant"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePreferencesConfig {
    /// Applied to members who have not set a minimum rating
    pub default_min_rating: f64,
    /// Applied to members who have not set unwanted tags
    pub default_unwanted_tags: Vec<String>,
}

impl FilePreferencesConfig {
    /// Build domain preferences, falling back to permissive defaults on error
    pub fn to_preferences(&self) -> (Preferences, Vec<ConfigIssue>) {
        match Preferences::new(&self.default_unwanted_tags, self.default_min_rating) {
            Ok(prefs) => (prefs, vec![]),
            Err(e) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::OutOfRange {
                        field: "preferences.default_min_rating".to_string(),
                        value: self.default_min_rating.to_string(),
                    },
                    format!("preferences.default_min_rating: {}, falling back to 0.0", e),
                );
                (Preferences::default(), vec![issue])
            }
        }
    }
}
