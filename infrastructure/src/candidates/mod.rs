//! Candidate sources
//!
//! [`JsonFileCandidateSource`] reads restaurants from a JSON file, standing
//! in for the external place-search provider.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tablevote_application::ports::candidate_source::{CandidateSource, CandidateSourceError};
use tablevote_domain::{CandidateEntry, MealId, SearchArea};
use tracing::debug;

/// File layouts accepted by [`JsonFileCandidateSource`]
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    /// `[ {...}, {...} ]`
    Flat(Vec<CandidateEntry>),
    /// `{ "places": [ ... ] }`, the provider response shape
    Wrapped { places: Vec<CandidateEntry> },
}

impl CatalogFile {
    fn into_entries(self) -> Vec<CandidateEntry> {
        match self {
            CatalogFile::Flat(entries) | CatalogFile::Wrapped { places: entries } => entries,
        }
    }
}

/// [`CandidateSource`] reading a JSON catalog from disk on every fetch
pub struct JsonFileCandidateSource {
    path: PathBuf,
}

impl JsonFileCandidateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CandidateSource for JsonFileCandidateSource {
    async fn fetch_candidates(
        &self,
        meal: &MealId,
        area: &SearchArea,
    ) -> Result<Vec<CandidateEntry>, CandidateSourceError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            CandidateSourceError::Unavailable(format!("{}: {}", self.path.display(), e))
        })?;
        let entries = serde_json::from_slice::<CatalogFile>(&bytes)
            .map_err(|e| CandidateSourceError::Malformed(e.to_string()))?
            .into_entries();

        debug!(
            "Read {} candidates for {} (radius {}m) from {}",
            entries.len(),
            meal,
            area.radius_meters,
            self.path.display()
        );
        Ok(entries)
    }
}

/// A fixed list of candidates, for scenarios that embed their catalog
pub struct StaticCandidateSource {
    entries: Vec<CandidateEntry>,
}

impl StaticCandidateSource {
    pub fn new(entries: Vec<CandidateEntry>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl CandidateSource for StaticCandidateSource {
    async fn fetch_candidates(
        &self,
        _meal: &MealId,
        _area: &SearchArea,
    ) -> Result<Vec<CandidateEntry>, CandidateSourceError> {
        Ok(self.entries.clone())
    }
}
