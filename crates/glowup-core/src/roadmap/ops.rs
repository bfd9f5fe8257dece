//! Roadmap operations exposed to the UI layer.

use log::{info, warn};

use super::{Roadmap, validate_owner};
use crate::{
    error::{Result, RoadmapError},
    models::{
        AdvanceOutcome, Plan, PlanSummary, RoadmapState, Task, Week, WeekSummary, WeekUnlocked,
    },
    params::{Advance, Owner, ResetPlan, TaskRef, WeekRef},
    progression,
};

impl Roadmap {
    /// Feeds a completed analysis into the progression state machine.
    ///
    /// Creates the plan on first use, appends the next week when the active
    /// one is complete and its cooldown has elapsed, and otherwise returns a
    /// rejection naming the reason. Rejections are not errors.
    ///
    /// The unlock notifier is called on the storage worker right after the
    /// new week is committed, so dropping the returned future cannot lose
    /// the event.
    pub async fn advance(&self, params: &Advance) -> Result<AdvanceOutcome> {
        let owner = validate_owner(&params.owner)?;
        let analysis = params.analysis.clone();
        let source_id = params.source_id.clone();
        let policy = self.policy;
        let clock = self.clock.clone();
        let notifier = self.notifier.clone();

        let _guard = self.locks.acquire(&owner).await;
        self.with_database(move |db| {
            let outcome = db.advance(
                &owner,
                &analysis,
                source_id.as_deref(),
                clock.now(),
                &policy,
            )?;

            if let Some(week) = &outcome.week {
                notifier.week_unlocked(&WeekUnlocked {
                    owner,
                    plan_id: week.plan_id,
                    week_number: week.week_number,
                    title: week.title.clone(),
                    unlocked_at: week.unlocked_at,
                });
            }
            Ok(outcome)
        })
        .await
    }

    /// Flips a task's completion and returns the updated task.
    ///
    /// Never creates weeks; the next [`Self::advance`] observes the change.
    pub async fn toggle_task_completion(&self, params: &TaskRef) -> Result<Task> {
        let owner = validate_owner(&params.owner)?;
        let task_id = params.id;
        let clock = self.clock.clone();

        let _guard = self.locks.acquire(&owner).await;
        self.with_database(move |db| db.toggle_task(&owner, task_id, clock.now()))
            .await
    }

    /// Returns everything the roadmap screen renders: plan summary, week
    /// summaries and the progression state at the clock's current time.
    pub async fn get_current_state(&self, params: &Owner) -> Result<RoadmapState> {
        let owner = validate_owner(&params.owner)?;
        let plan = self.get_plan(params).await?;
        let evaluated_at = self.clock.now();
        let progression = progression::evaluate(plan.as_ref(), evaluated_at, &self.policy)?;

        Ok(RoadmapState {
            owner,
            plan: plan.as_ref().map(PlanSummary::from),
            weeks: plan
                .as_ref()
                .map(|p| p.weeks.iter().map(WeekSummary::from).collect())
                .unwrap_or_default(),
            progression,
            evaluated_at,
        })
    }

    /// Retrieves the owner's plan with all weeks and tasks.
    pub async fn get_plan(&self, params: &Owner) -> Result<Option<Plan>> {
        let owner = validate_owner(&params.owner)?;
        self.with_database(move |db| db.get_plan(&owner)).await
    }

    /// Retrieves one week of the owner's plan.
    pub async fn show_week(&self, params: &WeekRef) -> Result<Week> {
        let owner = validate_owner(&params.owner)?;
        let week_number = params.week_number;

        self.with_database(move |db| {
            db.get_week(&owner, week_number)?
                .ok_or(RoadmapError::WeekNotFound { owner, week_number })
        })
        .await
    }

    /// Retrieves one task of the owner's plan.
    pub async fn show_task(&self, params: &TaskRef) -> Result<Task> {
        let owner = validate_owner(&params.owner)?;
        let task_id = params.id;

        self.with_database(move |db| {
            db.get_task(&owner, task_id)?
                .ok_or(RoadmapError::TaskNotFound { id: task_id })
        })
        .await
    }

    /// Permanently deletes the owner's plan with its weeks and tasks.
    ///
    /// Requires `confirmed`; returns the deleted plan.
    pub async fn reset_plan(&self, params: &ResetPlan) -> Result<Plan> {
        let owner = validate_owner(&params.owner)?;
        if !params.confirmed {
            return Err(RoadmapError::invalid_input("confirmed")
                .with_reason("resetting deletes every week and task; pass confirmation to proceed"));
        }

        let _guard = self.locks.acquire(&owner).await;
        let owner_clone = owner.clone();
        let deleted = self
            .with_database(move |db| db.delete_plan(&owner_clone))
            .await?;

        match deleted {
            Some(plan) => {
                info!("reset plan {} for '{owner}'", plan.id);
                Ok(plan)
            }
            None => {
                warn!("reset requested for '{owner}' without a plan");
                Err(RoadmapError::PlanNotFound { owner })
            }
        }
    }
}
