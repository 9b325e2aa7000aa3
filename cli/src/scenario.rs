//! Scenario files and the runner that plays them through [`MealService`]
//!
//! A scenario describes a meal, its members, an optional embedded catalog
//! and an ordered list of steps (votes, preference edits, membership
//! changes). Domain rejections are recorded in the report rather than
//! aborting the run.

use futures::future::join_all;
use serde::Deserialize;
use std::sync::Arc;
use tablevote_application::{MealService, MealServiceError};
use tablevote_domain::{
    Budget, CandidateEntry, Decision, Meal, MealId, MemberId, MemberRole, PlaceId,
};
use tablevote_infrastructure::InMemoryMembership;
use tablevote_presentation::{MealReport, StepOutcome, StepReport};
use tracing::{debug, info};

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub meal: MealSpec,
    pub members: Vec<MemberSpec>,
    /// Used when no external catalog file is configured
    #[serde(default)]
    pub catalog: Vec<CandidateEntry>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MealSpec {
    pub id: MealId,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub radius_meters: Option<u32>,
    #[serde(default)]
    pub budget: Option<Budget>,
    #[serde(default)]
    pub scheduled_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl MealSpec {
    fn to_meal(&self) -> Meal {
        let mut meal = Meal::new(self.id.clone(), self.name.clone());
        if let Some(radius) = self.radius_meters {
            meal.radius_meters = radius;
        }
        if let Some(location) = &self.location {
            let radius = meal.radius_meters;
            meal = meal.at_location(location.clone(), radius);
        }
        if let Some(budget) = self.budget {
            meal = meal.with_budget(budget.min, budget.max);
        }
        if let Some(at) = self.scheduled_at {
            meal = meal.scheduled_at(at);
        }
        meal
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberSpec {
    pub id: MemberId,
    #[serde(default)]
    pub role: MemberRole,
    #[serde(default)]
    pub preferences: Option<PreferenceSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreferenceSpec {
    #[serde(default)]
    pub unwanted_tags: Vec<String>,
    #[serde(default)]
    pub min_rating: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VoteSpec {
    pub member: MemberId,
    pub place: PlaceId,
    pub decision: Decision,
    /// Defaults to the meal's current round
    #[serde(default)]
    pub round: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Vote(VoteSpec),
    /// Votes submitted at the same time
    Concurrent { votes: Vec<VoteSpec> },
    Preferences {
        member: MemberId,
        #[serde(flatten)]
        preferences: PreferenceSpec,
    },
    Eligible { member: MemberId },
    Join {
        member: MemberId,
        #[serde(default)]
        role: MemberRole,
    },
    Kick { actor: MemberId, target: MemberId },
    Evaluate,
    Liked { member: MemberId, liked: Option<bool> },
}

/// Plays scenarios against a wired [`MealService`]
pub struct ScenarioRunner {
    service: Arc<MealService>,
    membership: Arc<InMemoryMembership>,
}

impl ScenarioRunner {
    pub fn new(service: Arc<MealService>, membership: Arc<InMemoryMembership>) -> Self {
        Self {
            service,
            membership,
        }
    }

    pub async fn run(&self, scenario: &Scenario) -> Result<MealReport, MealServiceError> {
        let meal = scenario.meal.to_meal();
        let meal_id = meal.id.clone();
        info!("Running scenario for meal {} ({} steps)", meal_id, scenario.steps.len());

        for member in &scenario.members {
            self.membership.join(&meal_id, &member.id, member.role).await;
        }
        self.service.create_meal(meal).await?;
        self.service.load_candidates(&meal_id, None).await?;

        for member in &scenario.members {
            if let Some(prefs) = &member.preferences {
                self.service
                    .update_preferences(
                        &meal_id,
                        &member.id,
                        prefs.unwanted_tags.clone(),
                        prefs.min_rating,
                    )
                    .await?;
            }
        }

        let mut steps = Vec::new();
        for step in &scenario.steps {
            let index = steps.len() + 1;
            steps.extend(self.run_step(&meal_id, index, step).await?);
        }

        self.report(&meal_id, steps).await
    }

    async fn run_step(
        &self,
        meal: &MealId,
        index: usize,
        step: &Step,
    ) -> Result<Vec<StepReport>, MealServiceError> {
        debug!("Step {}: {:?}", index, step);
        let report = |action: String, outcome: StepOutcome| StepReport {
            index,
            action,
            outcome,
        };

        let reports = match step {
            Step::Vote(vote) => vec![self.vote(meal, index, vote).await?],
            Step::Concurrent { votes } => {
                let results =
                    join_all(votes.iter().enumerate().map(|(i, vote)| self.vote(meal, index + i, vote)))
                        .await;
                results.into_iter().collect::<Result<Vec<_>, _>>()?
            }
            Step::Preferences {
                member,
                preferences,
            } => {
                let action = format!(
                    "{} sets preferences (min {:.1}, avoid [{}])",
                    member,
                    preferences.min_rating,
                    preferences.unwanted_tags.join(", ")
                );
                let outcome = recover(
                    self.service
                        .update_preferences(
                            meal,
                            member,
                            preferences.unwanted_tags.clone(),
                            preferences.min_rating,
                        )
                        .await
                        .map(|_| StepOutcome::Applied),
                )?;
                vec![report(action, outcome)]
            }
            Step::Eligible { member } => {
                let outcome = recover(self.service.get_eligible(meal, member).await.map(|entries| {
                    StepOutcome::Eligible {
                        places: entries.into_iter().map(|e| e.place_id).collect(),
                    }
                }))?;
                vec![report(format!("{} checks eligible places", member), outcome)]
            }
            Step::Join { member, role } => {
                self.membership.join(meal, member, *role).await;
                let outcome = StepOutcome::Evaluated {
                    transition: self.service.evaluate_round(meal).await?,
                };
                vec![report(format!("{} joins as {:?}", member, role), outcome)]
            }
            Step::Kick { actor, target } => {
                let outcome = recover(
                    self.service
                        .kick_member(meal, actor, target)
                        .await
                        .map(|transition| StepOutcome::Evaluated { transition }),
                )?;
                vec![report(format!("{} removes {}", actor, target), outcome)]
            }
            Step::Evaluate => {
                let outcome = StepOutcome::Evaluated {
                    transition: self.service.evaluate_round(meal).await?,
                };
                vec![report("evaluate round".to_string(), outcome)]
            }
            Step::Liked { member, liked } => {
                let outcome = recover(
                    self.service
                        .record_liked(meal, member, *liked)
                        .await
                        .map(|_| StepOutcome::Applied),
                )?;
                let verdict = match liked {
                    Some(true) => "liked",
                    Some(false) => "disliked",
                    None => "cleared feedback on",
                };
                vec![report(format!("{} {} the meal", member, verdict), outcome)]
            }
        };
        Ok(reports)
    }

    async fn vote(
        &self,
        meal: &MealId,
        index: usize,
        vote: &VoteSpec,
    ) -> Result<StepReport, MealServiceError> {
        let round = match vote.round {
            Some(round) => round,
            None => self.service.get_round_status(meal).await?.round,
        };
        let verb = match vote.decision {
            Decision::Approve => "approves",
            Decision::Disapprove => "disapproves",
        };
        let outcome = recover(
            self.service
                .cast_vote(meal, &vote.member, &vote.place, round, vote.decision)
                .await
                .map(|outcome| StepOutcome::Vote { outcome }),
        )?;
        Ok(StepReport {
            index,
            action: format!("{} {} {} (round {})", vote.member, verb, vote.place, round),
            outcome,
        })
    }

    async fn report(
        &self,
        meal: &MealId,
        steps: Vec<StepReport>,
    ) -> Result<MealReport, MealServiceError> {
        let state = self.service.snapshot(meal).await?;
        let status = state.status();
        let scores = self.service.restaurant_scores(meal).await?;
        let chosen = status
            .chosen_restaurant
            .as_ref()
            .and_then(|place| state.catalog().get(place).cloned());
        Ok(MealReport {
            meal: state.meal().clone(),
            status,
            steps,
            scores,
            chosen,
        })
    }
}

/// Turn domain rejections into a reported outcome; other failures propagate
fn recover(result: Result<StepOutcome, MealServiceError>) -> Result<StepOutcome, MealServiceError> {
    match result {
        Ok(outcome) => Ok(outcome),
        Err(MealServiceError::Domain(reason)) => Ok(StepOutcome::Rejected {
            reason: reason.to_string(),
        }),
        Err(e) => Err(e),
    }
}
