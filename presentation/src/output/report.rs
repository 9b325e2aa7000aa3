//! Report model handed from the runner to the formatters

use serde::Serialize;
use tablevote_domain::{
    CandidateEntry, CastOutcome, Meal, PlaceId, PlaceScore, RoundStatus, RoundTransition,
};

/// Everything printed after a meal scenario has run
#[derive(Debug, Clone, Serialize)]
pub struct MealReport {
    pub meal: Meal,
    pub status: RoundStatus,
    pub steps: Vec<StepReport>,
    pub scores: Vec<PlaceScore>,
    /// Catalog entry of the chosen restaurant, if any
    pub chosen: Option<CandidateEntry>,
}

/// One scenario step and what came of it
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub index: usize,
    /// Short human description, e.g. "alice approves R1 (round 0)"
    pub action: String,
    pub outcome: StepOutcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum StepOutcome {
    Vote { outcome: CastOutcome },
    Evaluated { transition: Option<RoundTransition> },
    Eligible { places: Vec<PlaceId> },
    Applied,
    Rejected { reason: String },
}

impl StepOutcome {
    pub fn transition(&self) -> Option<&RoundTransition> {
        match self {
            StepOutcome::Vote { outcome } => outcome.transition(),
            StepOutcome::Evaluated { transition } => transition.as_ref(),
            _ => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, StepOutcome::Rejected { .. })
    }
}
