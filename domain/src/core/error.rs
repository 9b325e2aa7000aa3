//! Domain error types

use super::ids::{MemberId, PlaceId};
use thiserror::Error;

/// Recoverable rejections raised by the consensus engine.
///
/// A rejected operation never alters meal state. Voting after the meal is
/// resolved is not an error; see [`CastOutcome`](crate::CastOutcome).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MealError {
    #[error("Member {0} is not part of this meal")]
    NotAMember(MemberId),

    #[error("Restaurant {place} is not eligible for member {member}")]
    NotEligible { member: MemberId, place: PlaceId },

    #[error("Vote for round {submitted} rejected: meal is in round {current}")]
    StaleRound { submitted: u32, current: u32 },

    #[error("Member {actor} is not allowed to remove member {target}")]
    NotAuthorized { actor: MemberId, target: MemberId },

    #[error("Minimum rating must be between 0 and 5, got {0}")]
    InvalidRating(f64),

    #[error("No restaurant has been chosen for this meal yet")]
    NotResolved,
}

impl MealError {
    /// The vote targeted a round that has already closed
    pub fn is_stale(&self) -> bool {
        matches!(self, MealError::StaleRound { .. })
    }

    /// The restaurant is filtered out or was already rejected by the member
    pub fn is_not_eligible(&self) -> bool {
        matches!(self, MealError::NotEligible { .. })
    }
}
