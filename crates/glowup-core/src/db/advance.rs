//! The transactional read-decide-write behind `advance`.

use jiff::Timestamp;
use log::{debug, info};
use rusqlite::{Connection, TransactionBehavior};

use crate::{
    error::{DatabaseResultExt, Result, RoadmapError},
    generation,
    models::{AdvanceOutcome, AnalysisResult, Week},
    policy::ProgressionPolicy,
    progression::{self, Transition},
};

impl super::Database {
    /// Evaluates the owner's plan and, when eligible, appends the next week.
    ///
    /// The plan is read, the transition decided and the new week written in
    /// one immediate transaction. Rejections commit nothing and come back as
    /// an [`AdvanceOutcome`], not an error. `source_id` wins over
    /// `analysis.id` when stamping the plan.
    pub fn advance(
        &mut self,
        owner: &str,
        analysis: &AnalysisResult,
        source_id: Option<&str>,
        now: Timestamp,
        policy: &ProgressionPolicy,
    ) -> Result<AdvanceOutcome> {
        let source = source_id.or(analysis.id.as_deref());

        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let plan = Self::load_plan(&tx, owner)?;
        let transition = progression::decide(plan.as_ref(), now, policy)?;
        debug!("advance for '{owner}' decided {transition:?}");

        let week = match transition {
            Transition::Reject {
                current_week,
                reason,
            } => {
                info!("advance rejected for '{owner}' at week {current_week}: {reason:?}");
                return Ok(AdvanceOutcome::rejected(current_week, reason));
            }
            Transition::CreatePlan => {
                let plan_id = Self::insert_plan(&tx, owner, source, now)?;
                info!("created plan {plan_id} for '{owner}'");
                Self::append_generated_week(&tx, owner, plan_id, 1, analysis, policy, now)?
            }
            Transition::SeedFirstWeek { plan_id } => {
                let expected = plan.as_ref().map_or(1, |p| p.current_week_number);
                let week =
                    Self::append_generated_week(&tx, owner, plan_id, 1, analysis, policy, now)?;
                Self::move_pointer(&tx, owner, plan_id, expected, 1, source, now)?;
                week
            }
            Transition::AppendWeek {
                plan_id,
                week_number,
                expected_pointer,
            } => {
                let week = Self::append_generated_week(
                    &tx,
                    owner,
                    plan_id,
                    week_number,
                    analysis,
                    policy,
                    now,
                )?;
                Self::move_pointer(&tx, owner, plan_id, expected_pointer, week_number, source, now)?;
                week
            }
        };

        tx.commit().db_context("Failed to commit transaction")?;
        info!(
            "unlocked week {} '{}' for '{owner}' with {} tasks",
            week.week_number,
            week.title,
            week.tasks.len()
        );

        Ok(AdvanceOutcome::added(week))
    }

    fn append_generated_week(
        conn: &Connection,
        owner: &str,
        plan_id: u64,
        week_number: u32,
        analysis: &AnalysisResult,
        policy: &ProgressionPolicy,
        now: Timestamp,
    ) -> Result<Week> {
        let draft = generation::generate_week(week_number, analysis, policy);
        Self::insert_week(conn, owner, plan_id, &draft, now)
    }

    /// Compare-and-swap on the plan pointer; a stale read is a conflict.
    fn move_pointer(
        conn: &Connection,
        owner: &str,
        plan_id: u64,
        expected: u32,
        new_pointer: u32,
        source: Option<&str>,
        now: Timestamp,
    ) -> Result<()> {
        if Self::update_plan_pointer(conn, plan_id, expected, new_pointer, source, now)? {
            Ok(())
        } else {
            Err(RoadmapError::Conflict {
                owner: owner.to_string(),
            })
        }
    }
}
