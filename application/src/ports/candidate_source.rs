//! Candidate source port
//!
//! Stands in for the external place-search provider that supplies the
//! restaurants a meal can vote on.

use async_trait::async_trait;
use tablevote_domain::{CandidateEntry, MealId, SearchArea};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CandidateSourceError {
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed provider response: {0}")]
    Malformed(String),

    #[error("Timeout")]
    Timeout,
}

#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Fetch candidate restaurants for the meal's search area
    async fn fetch_candidates(
        &self,
        meal: &MealId,
        area: &SearchArea,
    ) -> Result<Vec<CandidateEntry>, CandidateSourceError>;
}
