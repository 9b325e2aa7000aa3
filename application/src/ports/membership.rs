//! Membership port
//!
//! Who belongs to a meal and with which role is owned outside the consensus
//! engine. The engine only asks for the active member set and roles.

use async_trait::async_trait;
use std::collections::BTreeSet;
use tablevote_domain::{MealId, MemberId, MemberRole};
use thiserror::Error;

/// Errors that can occur during membership lookups
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MembershipError {
    #[error("Unknown meal: {0}")]
    UnknownMeal(MealId),

    #[error("{member} is not a member of {meal}")]
    NotJoined { meal: MealId, member: MemberId },

    #[error("Membership backend error: {0}")]
    Backend(String),
}

/// Source of truth for meal membership
#[async_trait]
pub trait MembershipPort: Send + Sync {
    /// Members currently taking part in the meal
    async fn list_active_members(&self, meal: &MealId)
    -> Result<BTreeSet<MemberId>, MembershipError>;

    /// Role of a member, `None` if they are not in the meal
    async fn role_of(
        &self,
        meal: &MealId,
        member: &MemberId,
    ) -> Result<Option<MemberRole>, MembershipError>;

    /// Remove a member from the meal
    async fn remove_member(&self, meal: &MealId, member: &MemberId)
    -> Result<(), MembershipError>;
}
