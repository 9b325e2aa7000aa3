//! In-memory meal store

use async_trait::async_trait;
use std::collections::HashMap;
use tablevote_application::ports::meal_store::{MealStore, StoreError};
use tablevote_domain::{MealId, MealState};
use tokio::sync::RwLock;

/// [`MealStore`] backed by a process-local map
///
/// A save must carry a revision newer than the stored copy.
#[derive(Default)]
pub struct InMemoryMealStore {
    meals: RwLock<HashMap<MealId, MealState>>,
}

impl InMemoryMealStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.meals.read().await.len()
    }
}

#[async_trait]
impl MealStore for InMemoryMealStore {
    async fn load(&self, meal: &MealId) -> Result<Option<MealState>, StoreError> {
        Ok(self.meals.read().await.get(meal).cloned())
    }

    async fn save(&self, state: &MealState) -> Result<(), StoreError> {
        let mut meals = self.meals.write().await;
        let id = &state.meal().id;
        if let Some(stored) = meals.get(id)
            && stored.revision() >= state.revision()
        {
            return Err(StoreError::Conflict {
                meal: id.clone(),
                stored: stored.revision(),
                attempted: state.revision(),
            });
        }
        meals.insert(id.clone(), state.clone());
        Ok(())
    }

    async fn delete(&self, meal: &MealId) -> Result<bool, StoreError> {
        Ok(self.meals.write().await.remove(meal).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tablevote_domain::{CandidateEntry, Decision, Meal, MemberId, PlaceId};

    fn state() -> MealState {
        MealState::new(Meal::new("m", "lunch")).with_catalog(vec![CandidateEntry::new("R1", 4.0)])
    }

    #[tokio::test]
    async fn test_save_load_delete() {
        let store = InMemoryMealStore::new();
        let meal = MealId::from("m");
        assert!(store.load(&meal).await.unwrap().is_none());

        store.save(&state()).await.unwrap();
        assert_eq!(store.load(&meal).await.unwrap(), Some(state()));
        assert_eq!(store.len().await, 1);

        assert!(store.delete(&meal).await.unwrap());
        assert!(!store.delete(&meal).await.unwrap());
    }

    #[tokio::test]
    async fn test_older_revision_is_refused() {
        let store = InMemoryMealStore::new();
        let stale = state();
        let mut fresh = stale.clone();
        let active: BTreeSet<MemberId> = [MemberId::from("a")].into_iter().collect();
        fresh
            .update_preferences(&active, &MemberId::from("a"), ["x"], 1.0)
            .unwrap();

        store.save(&fresh).await.unwrap();
        let err = store.save(&stale).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { stored: 1, attempted: 0, .. }));
    }

    #[tokio::test]
    async fn test_concurrent_writers_same_revision_conflict() {
        let store = InMemoryMealStore::new();
        let active: BTreeSet<MemberId> = ["a", "b"].into_iter().map(MemberId::from).collect();
        store.save(&state()).await.unwrap();

        let meal = MealId::from("m");
        let mut first = store.load(&meal).await.unwrap().unwrap();
        let mut second = store.load(&meal).await.unwrap().unwrap();
        first
            .cast_vote(&active, &MemberId::from("a"), &PlaceId::from("R1"), 0, Decision::Approve)
            .unwrap();
        second
            .cast_vote(&active, &MemberId::from("b"), &PlaceId::from("R1"), 0, Decision::Approve)
            .unwrap();
        assert_eq!(first.revision(), second.revision());

        store.save(&first).await.unwrap();
        let err = store.save(&second).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { stored: 1, attempted: 1, .. }));

        // The first writer's vote survives
        let stored = store.load(&meal).await.unwrap().unwrap();
        assert_eq!(stored, first);
    }
}
