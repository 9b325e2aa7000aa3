//! In-process membership registry
//!
//! Tracks who joined which meal and with which role. Stands in for the
//! account/membership service the consensus engine does not own.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tablevote_application::ports::membership::{MembershipError, MembershipPort};
use tablevote_domain::{MealId, MemberId, MemberRole};
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory [`MembershipPort`] implementation
#[derive(Default)]
pub struct InMemoryMembership {
    meals: RwLock<HashMap<MealId, BTreeMap<MemberId, MemberRole>>>,
}

impl InMemoryMembership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member, or update their role if already joined
    pub async fn join(&self, meal: &MealId, member: &MemberId, role: MemberRole) {
        debug!("{} joined {} as {:?}", member, meal, role);
        self.meals
            .write()
            .await
            .entry(meal.clone())
            .or_default()
            .insert(member.clone(), role);
    }

    /// Returns `true` if the member was present
    pub async fn leave(&self, meal: &MealId, member: &MemberId) -> bool {
        let mut meals = self.meals.write().await;
        meals
            .get_mut(meal)
            .is_some_and(|members| members.remove(member).is_some())
    }

    /// All members of a meal with their roles
    pub async fn members(&self, meal: &MealId) -> BTreeMap<MemberId, MemberRole> {
        self.meals
            .read()
            .await
            .get(meal)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl MembershipPort for InMemoryMembership {
    async fn list_active_members(
        &self,
        meal: &MealId,
    ) -> Result<BTreeSet<MemberId>, MembershipError> {
        Ok(self
            .meals
            .read()
            .await
            .get(meal)
            .map(|members| members.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn role_of(
        &self,
        meal: &MealId,
        member: &MemberId,
    ) -> Result<Option<MemberRole>, MembershipError> {
        Ok(self
            .meals
            .read()
            .await
            .get(meal)
            .and_then(|members| members.get(member).copied()))
    }

    async fn remove_member(&self, meal: &MealId, member: &MemberId) -> Result<(), MembershipError> {
        if self.leave(meal, member).await {
            Ok(())
        } else {
            Err(MembershipError::NotJoined {
                meal: meal.clone(),
                member: member.clone(),
            })
        }
    }
}
