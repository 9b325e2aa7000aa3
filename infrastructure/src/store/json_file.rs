//! JSON file meal store
//!
//! Each meal is one pretty-printed JSON file named after its id. Writes go to
//! a temporary sibling first and are renamed into place, so a crash never
//! leaves a half-written meal behind.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tablevote_application::ports::meal_store::{MealStore, StoreError};
use tablevote_domain::{MealId, MealState};
use tokio::sync::Mutex;
use tracing::debug;

/// [`MealStore`] writing one JSON document per meal under a directory
pub struct JsonFileMealStore {
    dir: PathBuf,
    /// Serializes the revision check with the write
    write_lock: Mutex<()>,
}

impl JsonFileMealStore {
    /// Create the store, creating `dir` if needed
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, meal: &MealId) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(meal)))
    }

    async fn read(&self, meal: &MealId) -> Result<Option<MealState>, StoreError> {
        let path = self.path_for(meal);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StoreError::Corrupt {
                meal: meal.clone(),
                reason: e.to_string(),
            })
    }
}

/// Meal ids may contain characters that are unsafe in file names
fn file_stem(meal: &MealId) -> String {
    meal.as_str()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_string()
            } else {
                format!("%{:02X}", c as u32)
            }
        })
        .collect()
}

#[async_trait]
impl MealStore for JsonFileMealStore {
    async fn load(&self, meal: &MealId) -> Result<Option<MealState>, StoreError> {
        self.read(meal).await
    }

    async fn save(&self, state: &MealState) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let meal = &state.meal().id;

        if let Some(stored) = self.read(meal).await?
            && stored.revision() >= state.revision()
        {
            return Err(StoreError::Conflict {
                meal: meal.clone(),
                stored: stored.revision(),
                attempted: state.revision(),
            });
        }

        let json = serde_json::to_vec_pretty(state).map_err(|e| StoreError::Corrupt {
            meal: meal.clone(),
            reason: e.to_string(),
        })?;

        let path = self.path_for(meal);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &path).await?;
        debug!("Saved meal {} (revision {}) to {}", meal, state.revision(), path.display());
        Ok(())
    }

    async fn delete(&self, meal: &MealId) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        match tokio::fs::remove_file(self.path_for(meal)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
