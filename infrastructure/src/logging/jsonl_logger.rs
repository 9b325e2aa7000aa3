//! Append-only JSONL audit trail of meal events.
//!
//! One line per event:
//!
//! ```json
//! {"timestamp":"2026-10-16T19:04:11.532Z","type":"vote_cast","meal":"friday","details":{...}}
//! ```
//!
//! Every line is written with a single `write_all` on a file opened in append
//! mode, so several processes can share one log.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tablevote_application::ports::event_logger::{MealEvent, MealEventLogger};
use tablevote_domain::MealId;
use tracing::warn;

#[derive(Serialize)]
struct EventRecord<'a> {
    timestamp: String,
    #[serde(rename = "type")]
    kind: &'a str,
    meal: &'a MealId,
    #[serde(skip_serializing_if = "no_details")]
    details: &'a Value,
}

fn no_details(details: &&Value) -> bool {
    details.is_null()
}

impl<'a> EventRecord<'a> {
    fn new(event: &'a MealEvent, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            kind: event.kind,
            meal: &event.meal,
            details: &event.details,
        }
    }
}

/// [`MealEventLogger`] writing JSON lines to a file
pub struct JsonlMealEventLogger {
    file: Mutex<File>,
    path: PathBuf,
}

impl JsonlMealEventLogger {
    /// Open the log for appending, creating it and its parent directory.
    ///
    /// Returns `None` (after a warning) when the file cannot be opened; the
    /// caller then runs without an audit trail.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match Self::open(path) {
            Ok(file) => Some(Self {
                file: Mutex::new(file),
                path: path.to_path_buf(),
            }),
            Err(e) => {
                warn!("Could not open event log {}: {}", path.display(), e);
                None
            }
        }
    }

    fn open(path: &Path) -> std::io::Result<File> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MealEventLogger for JsonlMealEventLogger {
    fn log(&self, event: MealEvent) {
        let record = EventRecord::new(&event, Utc::now());
        let mut line = match serde_json::to_vec(&record) {
            Ok(line) => line,
            Err(e) => {
                warn!("Dropping {} event for meal {}: {}", event.kind, event.meal, e);
                return;
            }
        };
        line.push(b'\n');

        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = file.write_all(&line) {
            warn!("Could not write to event log {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_records_are_scoped_to_the_meal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("events.jsonl");
        let logger = JsonlMealEventLogger::new(&path).unwrap();
        let meal = MealId::from("friday");

        logger.log(MealEvent::new(
            "vote_cast",
            &meal,
            json!({ "member": "alice", "place": "R1", "round": 0, "decision": "approve" }),
        ));
        logger.log(MealEvent::new("meal_deleted", &meal, Value::Null));

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "vote_cast");
        assert_eq!(records[0]["meal"], "friday");
        assert_eq!(records[0]["details"]["member"], "alice");
        assert_eq!(records[0]["details"]["round"], 0);
        assert!(records[0]["timestamp"].as_str().unwrap().ends_with('Z'));

        assert_eq!(records[1]["type"], "meal_deleted");
        assert!(records[1].get("details").is_none());
    }

    #[test]
    fn test_record_layout() {
        let event = MealEvent::new("round_advanced", &MealId::from("m"), json!({ "to": 1 }));
        let at = DateTime::parse_from_rfc3339("2026-10-16T19:04:11.532Z")
            .unwrap()
            .with_timezone(&Utc);

        let line = serde_json::to_string(&EventRecord::new(&event, at)).unwrap();
        assert_eq!(
            line,
            r#"{"timestamp":"2026-10-16T19:04:11.532Z","type":"round_advanced","meal":"m","details":{"to":1}}"#
        );
    }

    #[test]
    fn test_reopening_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let meal = MealId::from("m");

        for _ in 0..2 {
            let logger = JsonlMealEventLogger::new(&path).unwrap();
            logger.log(MealEvent::new("meal_created", &meal, json!({ "name": "Lunch" })));
        }

        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_unopenable_path_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as the log file
        assert!(JsonlMealEventLogger::new(dir.path()).is_none());
    }
}
