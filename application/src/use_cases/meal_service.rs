//! Meal service use case
//!
//! Drives [`MealState`] through the ports: membership comes from
//! [`MembershipPort`], state is loaded from and saved to [`MealStore`], and
//! every notable change is reported to the [`MealEventLogger`].
//!
//! Operations on the same meal are serialized through a per-meal async mutex,
//! so concurrent votes never overwrite each other. Different meals proceed
//! independently.

use crate::config::BehaviorConfig;
use crate::ports::candidate_source::{CandidateSource, CandidateSourceError};
use crate::ports::event_logger::{MealEvent, MealEventLogger, NoMealEventLogger};
use crate::ports::meal_store::{MealStore, StoreError};
use crate::ports::membership::{MembershipError, MembershipPort};
use serde_json::json;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, PoisonError};
use tablevote_domain::{
    CandidateEntry, CastOutcome, Decision, Meal, MealError, MealId, MealState, MemberId, PlaceId,
    PlaceScore, Preferences, RoundStatus, RoundTransition, SearchArea,
};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while operating on a meal
#[derive(Error, Debug)]
pub enum MealServiceError {
    #[error("Meal not found: {0}")]
    MealNotFound(MealId),

    #[error("Meal already exists: {0}")]
    MealExists(MealId),

    #[error(transparent)]
    Domain(#[from] MealError),

    #[error("Membership error: {0}")]
    Membership(#[from] MembershipError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Candidate source error: {0}")]
    Source(#[from] CandidateSourceError),
}

impl MealServiceError {
    /// The domain rejection behind this error, if any
    pub fn as_domain(&self) -> Option<&MealError> {
        match self {
            MealServiceError::Domain(e) => Some(e),
            _ => None,
        }
    }
}

/// Application service for group meal decisions
pub struct MealService {
    membership: Arc<dyn MembershipPort>,
    store: Arc<dyn MealStore>,
    source: Arc<dyn CandidateSource>,
    logger: Arc<dyn MealEventLogger>,
    config: BehaviorConfig,
    locks: Mutex<HashMap<MealId, Arc<tokio::sync::Mutex<()>>>>,
}

impl MealService {
    pub fn new(
        membership: Arc<dyn MembershipPort>,
        store: Arc<dyn MealStore>,
        source: Arc<dyn CandidateSource>,
    ) -> Self {
        Self {
            membership,
            store,
            source,
            logger: Arc::new(NoMealEventLogger),
            config: BehaviorConfig::default(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn MealEventLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_config(mut self, config: BehaviorConfig) -> Self {
        self.config = config;
        self
    }

    // ==================== Lifecycle ====================

    pub async fn create_meal(&self, meal: Meal) -> Result<RoundStatus, MealServiceError> {
        let lock = self.session_lock(&meal.id);
        let _guard = lock.lock().await;

        if self.store.load(&meal.id).await?.is_some() {
            return Err(MealServiceError::MealExists(meal.id));
        }

        let state = MealState::new(meal).with_default_preferences(self.config.default_preferences.clone());
        self.store.save(&state).await?;
        info!("Created meal {} ({})", state.meal().id, state.meal().name);
        self.logger.log(MealEvent::new(
            "meal_created",
            &state.meal().id,
            json!({ "name": state.meal().name }),
        ));
        Ok(state.status())
    }

    /// Delete a meal; any member may do this
    pub async fn delete_meal(
        &self,
        meal: &MealId,
        actor: &MemberId,
    ) -> Result<(), MealServiceError> {
        {
            let lock = self.session_lock(meal);
            let _guard = lock.lock().await;

            let active = self.membership.list_active_members(meal).await?;
            if !active.contains(actor) {
                return Err(MealError::NotAMember(actor.clone()).into());
            }
            if !self.store.delete(meal).await? {
                return Err(MealServiceError::MealNotFound(meal.clone()));
            }
        }

        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(meal);
        info!("Deleted meal {} (by {})", meal, actor);
        self.logger.log(MealEvent::new(
            "meal_deleted",
            meal,
            json!({ "actor": actor }),
        ));
        Ok(())
    }

    /// Fetch candidates for the meal and replace its catalog
    ///
    /// Uses the meal's own search area unless `area` overrides it.
    pub async fn load_candidates(
        &self,
        meal: &MealId,
        area: Option<SearchArea>,
    ) -> Result<usize, MealServiceError> {
        let lock = self.session_lock(meal);
        let _guard = lock.lock().await;

        let mut state = self.load(meal).await?;
        let area = area.unwrap_or_else(|| state.meal().search_area());
        let entries = self.fetch(meal, &area).await?;

        let count = state.replace_catalog(entries);
        self.store.save(&state).await?;
        info!("Loaded {} candidates for meal {}", count, meal);
        self.logger.log(MealEvent::new(
            "catalog_replaced",
            meal,
            json!({ "count": count, "round": state.current_round() }),
        ));
        Ok(count)
    }

    // ==================== Voting ====================

    pub async fn cast_vote(
        &self,
        meal: &MealId,
        member: &MemberId,
        place: &PlaceId,
        round: u32,
        decision: Decision,
    ) -> Result<CastOutcome, MealServiceError> {
        let result = self
            .mutate(meal, |state, active| {
                state.cast_vote(active, member, place, round, decision)
            })
            .await;

        match &result {
            Ok(CastOutcome::Accepted { transition, .. }) => {
                debug!("{} voted {} on {} in round {}", member, decision, place, round);
                self.logger.log(MealEvent::new(
                    "vote_cast",
                    meal,
                    json!({
                        "member": member,
                        "place": place,
                        "round": round,
                        "decision": decision,
                    }),
                ));
                if let Some(transition) = transition {
                    self.report_transition(meal, transition);
                }
            }
            Ok(outcome) => {
                debug!("Vote by {} on {} ignored: {:?}", member, place, outcome);
            }
            Err(MealServiceError::Domain(reason)) => {
                warn!("Rejected vote by {} on {}: {}", member, place, reason);
                self.logger.log(MealEvent::new(
                    "vote_rejected",
                    meal,
                    json!({
                        "member": member,
                        "place": place,
                        "round": round,
                        "reason": reason.to_string(),
                    }),
                ));
            }
            Err(_) => {}
        }

        result
    }

    /// Re-check completeness, e.g. after membership changed
    pub async fn evaluate_round(
        &self,
        meal: &MealId,
    ) -> Result<Option<RoundTransition>, MealServiceError> {
        let transition = self
            .mutate(meal, |state, active| Ok(state.evaluate(active)))
            .await?;
        if let Some(transition) = &transition {
            self.report_transition(meal, transition);
        }
        Ok(transition)
    }

    /// Remove `target` from the meal; allowed for admins and for oneself
    pub async fn kick_member(
        &self,
        meal: &MealId,
        actor: &MemberId,
        target: &MemberId,
    ) -> Result<Option<RoundTransition>, MealServiceError> {
        let transition = {
            let lock = self.session_lock(meal);
            let _guard = lock.lock().await;

            let mut state = self.load(meal).await?;
            let role = self
                .membership
                .role_of(meal, actor)
                .await?
                .ok_or_else(|| MealError::NotAMember(actor.clone()))?;
            if !role.is_admin() && actor != target {
                return Err(MealError::NotAuthorized {
                    actor: actor.clone(),
                    target: target.clone(),
                }
                .into());
            }
            if self.membership.role_of(meal, target).await?.is_none() {
                return Err(MealError::NotAMember(target.clone()).into());
            }

            self.membership.remove_member(meal, target).await?;
            info!("{} removed {} from meal {}", actor, target, meal);

            let active = self.membership.list_active_members(meal).await?;
            let revision = state.revision();
            let transition = state.evaluate(&active);
            if state.revision() != revision {
                self.store.save(&state).await?;
            }
            transition
        };

        self.logger.log(MealEvent::new(
            "member_removed",
            meal,
            json!({ "actor": actor, "target": target }),
        ));
        if let Some(transition) = &transition {
            self.report_transition(meal, transition);
        }
        Ok(transition)
    }

    // ==================== Preferences & outcome ====================

    pub async fn update_preferences(
        &self,
        meal: &MealId,
        member: &MemberId,
        unwanted_tags: Vec<String>,
        min_rating: f64,
    ) -> Result<Preferences, MealServiceError> {
        let preferences = self
            .mutate(meal, |state, active| {
                state
                    .update_preferences(active, member, &unwanted_tags, min_rating)
                    .cloned()
            })
            .await?;

        debug!("Updated preferences of {} in meal {}", member, meal);
        self.logger.log(MealEvent::new(
            "preferences_updated",
            meal,
            json!({ "member": member, "preferences": preferences }),
        ));
        Ok(preferences)
    }

    pub async fn record_liked(
        &self,
        meal: &MealId,
        member: &MemberId,
        liked: Option<bool>,
    ) -> Result<(), MealServiceError> {
        self.mutate(meal, |state, active| state.record_liked(active, member, liked))
            .await?;
        self.logger.log(MealEvent::new(
            "liked_recorded",
            meal,
            json!({ "member": member, "liked": liked }),
        ));
        Ok(())
    }

    // ==================== Queries ====================

    /// Restaurants the member may currently vote on, in catalog order
    pub async fn get_eligible(
        &self,
        meal: &MealId,
        member: &MemberId,
    ) -> Result<Vec<CandidateEntry>, MealServiceError> {
        let state = self.load(meal).await?;
        let active = self.membership.list_active_members(meal).await?;
        let eligible: Vec<CandidateEntry> = state
            .eligible_for(&active, member)?
            .into_iter()
            .cloned()
            .collect();
        debug!("{} has {} eligible places in {}", member, eligible.len(), meal);
        Ok(eligible)
    }

    pub async fn get_round_status(&self, meal: &MealId) -> Result<RoundStatus, MealServiceError> {
        Ok(self.load(meal).await?.status())
    }

    pub async fn restaurant_scores(
        &self,
        meal: &MealId,
    ) -> Result<Vec<PlaceScore>, MealServiceError> {
        let state = self.load(meal).await?;
        let active = self.membership.list_active_members(meal).await?;
        Ok(state.tally(&active))
    }

    /// Full aggregate snapshot, for reporting
    pub async fn snapshot(&self, meal: &MealId) -> Result<MealState, MealServiceError> {
        self.load(meal).await
    }

    // ==================== Internals ====================

    fn session_lock(&self, meal: &MealId) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(meal.clone()).or_default())
    }

    async fn load(&self, meal: &MealId) -> Result<MealState, MealServiceError> {
        self.store
            .load(meal)
            .await?
            .ok_or_else(|| MealServiceError::MealNotFound(meal.clone()))
    }

    /// Load, apply `f` and save under the meal's lock.
    ///
    /// Nothing is saved when `f` fails or leaves the revision unchanged.
    async fn mutate<T, F>(&self, meal: &MealId, f: F) -> Result<T, MealServiceError>
    where
        F: FnOnce(&mut MealState, &BTreeSet<MemberId>) -> Result<T, MealError>,
    {
        let lock = self.session_lock(meal);
        let _guard = lock.lock().await;

        let mut state = self.load(meal).await?;
        let active = self.membership.list_active_members(meal).await?;
        let revision = state.revision();
        let value = f(&mut state, &active)?;
        if state.revision() != revision {
            self.store.save(&state).await?;
        }
        Ok(value)
    }

    async fn fetch(
        &self,
        meal: &MealId,
        area: &SearchArea,
    ) -> Result<Vec<CandidateEntry>, CandidateSourceError> {
        match self.config.source_timeout {
            Some(limit) => tokio::time::timeout(limit, self.source.fetch_candidates(meal, area))
                .await
                .map_err(|_| CandidateSourceError::Timeout)?,
            None => self.source.fetch_candidates(meal, area).await,
        }
    }

    fn report_transition(&self, meal: &MealId, transition: &RoundTransition) {
        let kind = match transition {
            RoundTransition::Resolved { round, place } => {
                info!("Meal {} resolved to {} in round {}", meal, place, round);
                "meal_resolved"
            }
            RoundTransition::Advanced { from, to } => {
                info!("Meal {} advanced from round {} to {}", meal, from, to);
                "round_advanced"
            }
            RoundTransition::Exhausted { round } => {
                info!("Meal {} exhausted in round {}", meal, round);
                "meal_exhausted"
            }
        };
        self.logger.log(MealEvent::new(
            kind,
            meal,
            json!({ "transition": transition }),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::future::join_all;
    use std::collections::BTreeMap;
    use tablevote_domain::MemberRole;

    // ==================== Test Mocks ====================

    #[derive(Default)]
    struct MockMembership {
        members: Mutex<BTreeMap<MemberId, MemberRole>>,
    }

    impl MockMembership {
        fn with(members: &[(&str, MemberRole)]) -> Self {
            Self {
                members: Mutex::new(
                    members
                        .iter()
                        .map(|(id, role)| (MemberId::from(*id), *role))
                        .collect(),
                ),
            }
        }
    }

    #[async_trait]
    impl MembershipPort for MockMembership {
        async fn list_active_members(
            &self,
            _meal: &MealId,
        ) -> Result<BTreeSet<MemberId>, MembershipError> {
            Ok(self.members.lock().unwrap().keys().cloned().collect())
        }

        async fn role_of(
            &self,
            _meal: &MealId,
            member: &MemberId,
        ) -> Result<Option<MemberRole>, MembershipError> {
            Ok(self.members.lock().unwrap().get(member).copied())
        }

        async fn remove_member(
            &self,
            _meal: &MealId,
            member: &MemberId,
        ) -> Result<(), MembershipError> {
            self.members.lock().unwrap().remove(member);
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockStore {
        states: Mutex<HashMap<MealId, MealState>>,
        saves: Mutex<usize>,
    }

    impl MockStore {
        fn save_count(&self) -> usize {
            *self.saves.lock().unwrap()
        }
    }

    #[async_trait]
    impl MealStore for MockStore {
        async fn load(&self, meal: &MealId) -> Result<Option<MealState>, StoreError> {
            // Yield so concurrent callers interleave between load and save
            tokio::task::yield_now().await;
            Ok(self.states.lock().unwrap().get(meal).cloned())
        }

        async fn save(&self, state: &MealState) -> Result<(), StoreError> {
            tokio::task::yield_now().await;
            *self.saves.lock().unwrap() += 1;
            let mut states = self.states.lock().unwrap();
            if let Some(stored) = states.get(&state.meal().id)
                && stored.revision() >= state.revision()
            {
                return Err(StoreError::Conflict {
                    meal: state.meal().id.clone(),
                    stored: stored.revision(),
                    attempted: state.revision(),
                });
            }
            states.insert(state.meal().id.clone(), state.clone());
            Ok(())
        }

        async fn delete(&self, meal: &MealId) -> Result<bool, StoreError> {
            Ok(self.states.lock().unwrap().remove(meal).is_some())
        }
    }

    struct MockSource {
        entries: Vec<CandidateEntry>,
        fail: bool,
    }

    impl MockSource {
        fn returning(entries: Vec<CandidateEntry>) -> Self {
            Self {
                entries,
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                entries: vec![],
                fail: true,
            }
        }
    }

    #[async_trait]
    impl CandidateSource for MockSource {
        async fn fetch_candidates(
            &self,
            _meal: &MealId,
            _area: &SearchArea,
        ) -> Result<Vec<CandidateEntry>, CandidateSourceError> {
            if self.fail {
                return Err(CandidateSourceError::Unavailable("offline".to_string()));
            }
            Ok(self.entries.clone())
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl RecordingLogger {
        fn events(&self) -> Vec<&'static str> {
            self.events.lock().unwrap().clone()
        }
    }

    impl MealEventLogger for RecordingLogger {
        fn log(&self, event: MealEvent) {
            self.events.lock().unwrap().push(event.kind);
        }
    }

    // ==================== Helpers ====================

    struct Fixture {
        service: Arc<MealService>,
        membership: Arc<MockMembership>,
        store: Arc<MockStore>,
        logger: Arc<RecordingLogger>,
        meal: MealId,
    }

    fn catalog() -> Vec<CandidateEntry> {
        vec![
            CandidateEntry::new("R1", 4.0).with_tags(["pizza"]),
            CandidateEntry::new("R2", 3.0).with_tags(["sushi"]),
        ]
    }

    async fn fixture(members: &[(&str, MemberRole)]) -> Fixture {
        let membership = Arc::new(MockMembership::with(members));
        let store = Arc::new(MockStore::default());
        let logger = Arc::new(RecordingLogger::default());
        let service = MealService::new(
            membership.clone(),
            store.clone(),
            Arc::new(MockSource::returning(catalog())),
        )
        .with_logger(logger.clone());

        let meal = MealId::from("friday");
        service
            .create_meal(Meal::new(meal.clone(), "Friday dinner"))
            .await
            .unwrap();
        service.load_candidates(&meal, None).await.unwrap();

        Fixture {
            service: Arc::new(service),
            membership,
            store,
            logger,
            meal,
        }
    }

    fn m(id: &str) -> MemberId {
        MemberId::from(id)
    }

    fn p(id: &str) -> PlaceId {
        PlaceId::from(id)
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_unanimous_vote_resolves_and_logs() {
        let f = fixture(&[("A", MemberRole::Admin), ("B", MemberRole::Guest)]).await;

        f.service
            .update_preferences(&f.meal, &m("A"), vec![], 3.5)
            .await
            .unwrap();
        let eligible = f.service.get_eligible(&f.meal, &m("A")).await.unwrap();
        assert_eq!(eligible.len(), 1);

        f.service
            .cast_vote(&f.meal, &m("A"), &p("R1"), 0, Decision::Approve)
            .await
            .unwrap();
        let outcome = f
            .service
            .cast_vote(&f.meal, &m("B"), &p("R1"), 0, Decision::Approve)
            .await
            .unwrap();
        assert!(matches!(
            outcome.transition(),
            Some(RoundTransition::Resolved { .. })
        ));

        let status = f.service.get_round_status(&f.meal).await.unwrap();
        assert_eq!(status.chosen_restaurant, Some(p("R1")));

        let events = f.logger.events();
        assert!(events.contains(&"catalog_replaced"));
        assert!(events.contains(&"preferences_updated"));
        assert_eq!(events.iter().filter(|e| **e == "vote_cast").count(), 2);
        assert_eq!(events.last(), Some(&"meal_resolved"));
    }

    #[tokio::test]
    async fn test_rejected_vote_is_not_saved() {
        let f = fixture(&[("A", MemberRole::Admin)]).await;
        let saves = f.store.save_count();

        let err = f
            .service
            .cast_vote(&f.meal, &m("A"), &p("R1"), 3, Decision::Approve)
            .await
            .unwrap_err();
        assert!(err.as_domain().is_some_and(|e| e.is_stale()));

        let err = f
            .service
            .cast_vote(&f.meal, &m("A"), &p("nope"), 0, Decision::Approve)
            .await
            .unwrap_err();
        assert!(err.as_domain().is_some_and(|e| e.is_not_eligible()));

        assert_eq!(f.store.save_count(), saves);
        assert_eq!(
            f.logger
                .events()
                .iter()
                .filter(|e| **e == "vote_rejected")
                .count(),
            2
        );
    }

    #[tokio::test]
    async fn test_unknown_meal() {
        let f = fixture(&[("A", MemberRole::Admin)]).await;
        let err = f
            .service
            .get_round_status(&MealId::from("missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, MealServiceError::MealNotFound(_)));
    }

    #[tokio::test]
    async fn test_create_twice_fails() {
        let f = fixture(&[("A", MemberRole::Admin)]).await;
        let err = f
            .service
            .create_meal(Meal::new(f.meal.clone(), "again"))
            .await
            .unwrap_err();
        assert!(matches!(err, MealServiceError::MealExists(_)));
    }

    #[tokio::test]
    async fn test_guest_cannot_kick_others() {
        let f = fixture(&[
            ("A", MemberRole::Admin),
            ("B", MemberRole::Guest),
            ("C", MemberRole::Guest),
        ])
        .await;

        let err = f
            .service
            .kick_member(&f.meal, &m("B"), &m("C"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_domain(),
            Some(MealError::NotAuthorized { .. })
        ));

        // Leaving oneself is always allowed
        f.service
            .kick_member(&f.meal, &m("C"), &m("C"))
            .await
            .unwrap();
        assert_eq!(f.membership.members.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_admin_kick_unblocks_consensus() {
        let f = fixture(&[
            ("A", MemberRole::Admin),
            ("B", MemberRole::Guest),
            ("C", MemberRole::Guest),
        ])
        .await;

        for member in ["A", "B"] {
            f.service
                .cast_vote(&f.meal, &m(member), &p("R2"), 0, Decision::Approve)
                .await
                .unwrap();
        }
        assert!(!f.service.get_round_status(&f.meal).await.unwrap().is_resolved);

        let transition = f
            .service
            .kick_member(&f.meal, &m("A"), &m("C"))
            .await
            .unwrap();
        assert_eq!(
            transition,
            Some(RoundTransition::Resolved {
                round: 0,
                place: p("R2")
            })
        );
    }

    #[tokio::test]
    async fn test_scores_and_liked() {
        let f = fixture(&[("A", MemberRole::Admin), ("B", MemberRole::Guest)]).await;

        let err = f
            .service
            .record_liked(&f.meal, &m("A"), Some(true))
            .await
            .unwrap_err();
        assert!(matches!(err.as_domain(), Some(MealError::NotResolved)));

        f.service
            .cast_vote(&f.meal, &m("A"), &p("R2"), 0, Decision::Disapprove)
            .await
            .unwrap();
        f.service
            .cast_vote(&f.meal, &m("A"), &p("R1"), 0, Decision::Approve)
            .await
            .unwrap();
        let scores = f.service.restaurant_scores(&f.meal).await.unwrap();
        assert_eq!(scores[0].place, p("R1"));
        assert_eq!(scores[0].approvals, 1);
        assert_eq!(scores[1].disapprovals, 1);

        f.service
            .cast_vote(&f.meal, &m("B"), &p("R1"), 0, Decision::Approve)
            .await
            .unwrap();
        f.service
            .record_liked(&f.meal, &m("B"), Some(true))
            .await
            .unwrap();
        let state = f.service.snapshot(&f.meal).await.unwrap();
        assert_eq!(state.meal().liked, Some(true));
    }

    #[tokio::test]
    async fn test_source_failure_keeps_catalog() {
        let membership = Arc::new(MockMembership::with(&[("A", MemberRole::Admin)]));
        let store = Arc::new(MockStore::default());
        let service = MealService::new(membership, store, Arc::new(MockSource::failing()));
        let meal = MealId::from("m");
        service.create_meal(Meal::new(meal.clone(), "x")).await.unwrap();

        let err = service.load_candidates(&meal, None).await.unwrap_err();
        assert!(matches!(err, MealServiceError::Source(_)));
        assert!(service.snapshot(&meal).await.unwrap().catalog().is_empty());
    }

    #[tokio::test]
    async fn test_delete_meal() {
        let f = fixture(&[("A", MemberRole::Admin)]).await;

        let err = f.service.delete_meal(&f.meal, &m("Z")).await.unwrap_err();
        assert!(matches!(err.as_domain(), Some(MealError::NotAMember(_))));

        f.service.delete_meal(&f.meal, &m("A")).await.unwrap();
        assert!(matches!(
            f.service.get_round_status(&f.meal).await.unwrap_err(),
            MealServiceError::MealNotFound(_)
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_votes_are_serialized() {
        let names: Vec<String> = (0..8).map(|i| format!("member-{}", i)).collect();
        let roster: Vec<(&str, MemberRole)> = names
            .iter()
            .map(|n| (n.as_str(), MemberRole::Guest))
            .collect();
        let f = fixture(&roster).await;

        let votes = |place: &'static str, decision: Decision| {
            names
                .iter()
                .map(|name| {
                    let service = Arc::clone(&f.service);
                    let meal = f.meal.clone();
                    let member = m(name);
                    tokio::spawn(async move {
                        service
                            .cast_vote(&meal, &member, &p(place), 0, decision)
                            .await
                    })
                })
                .collect::<Vec<_>>()
        };

        for handle in join_all(votes("R2", Decision::Disapprove)).await {
            assert!(handle.unwrap().unwrap().is_accepted());
        }
        let state = f.service.snapshot(&f.meal).await.unwrap();
        assert_eq!(state.ledger().len(), 8);

        let outcomes: Vec<CastOutcome> = join_all(votes("R1", Decision::Approve))
            .await
            .into_iter()
            .map(|h| h.unwrap().unwrap())
            .collect();
        let resolutions = outcomes
            .iter()
            .filter(|o| matches!(o.transition(), Some(RoundTransition::Resolved { .. })))
            .count();
        assert_eq!(resolutions, 1);

        let state = f.service.snapshot(&f.meal).await.unwrap();
        assert_eq!(state.ledger().len(), 16);
        assert_eq!(state.status().chosen_restaurant, Some(p("R1")));
    }
}
