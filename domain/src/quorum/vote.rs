//! Vote types for meal consensus
//!
//! This module defines the voting primitives members use when swiping on
//! candidate restaurants.

use crate::core::ids::{MemberId, PlaceId};
use serde::{Deserialize, Serialize};

/// A member's decision on one restaurant
///
/// # Example
///
/// ```
/// use tablevote_domain::Decision;
///
/// let like: Decision = "like".parse().unwrap();
/// assert!(like.is_approve());
///
/// let pass: Decision = "disapprove".parse().unwrap();
/// assert!(!pass.is_approve());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Disapprove,
}

impl Decision {
    pub fn is_approve(&self) -> bool {
        matches!(self, Decision::Approve)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Approve => "approve",
            Decision::Disapprove => "disapprove",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Decision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "approve" | "like" | "yes" => Ok(Decision::Approve),
            "disapprove" | "dislike" | "no" => Ok(Decision::Disapprove),
            other => Err(format!(
                "Unknown decision: {}. Valid: approve, like, disapprove, dislike",
                other
            )),
        }
    }
}

impl From<bool> for Decision {
    fn from(approved: bool) -> Self {
        if approved {
            Decision::Approve
        } else {
            Decision::Disapprove
        }
    }
}

/// One row of the vote ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub member: MemberId,
    pub place: PlaceId,
    pub round: u32,
    pub decision: Decision,
}
