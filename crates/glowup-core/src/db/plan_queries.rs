//! Plan CRUD operations and queries.

use jiff::Timestamp;
use log::debug;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};

use super::timestamp_column;
use crate::{
    error::{DatabaseResultExt, Result, RoadmapError},
    models::Plan,
};

const INSERT_PLAN_SQL: &str = "INSERT INTO plans (owner, current_week_number, source_analysis_id, created_at, updated_at) VALUES (?1, 1, ?2, ?3, ?4)";
const SELECT_PLAN_BY_OWNER_SQL: &str = "SELECT id, owner, current_week_number, source_analysis_id, created_at, updated_at FROM plans WHERE owner = ?1";
const UPDATE_PLAN_POINTER_SQL: &str = "UPDATE plans SET current_week_number = ?1, source_analysis_id = COALESCE(?2, source_analysis_id), updated_at = ?3 WHERE id = ?4 AND current_week_number = ?5";
const DELETE_PLAN_TASKS_SQL: &str =
    "DELETE FROM tasks WHERE week_id IN (SELECT id FROM weeks WHERE plan_id = ?1)";
const DELETE_PLAN_WEEKS_SQL: &str = "DELETE FROM weeks WHERE plan_id = ?1";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";

impl super::Database {
    /// Helper function to construct a Plan (without weeks) from a database row
    fn build_plan_from_row(row: &rusqlite::Row) -> rusqlite::Result<Plan> {
        Ok(Plan {
            id: row.get::<_, i64>(0)? as u64,
            owner: row.get(1)?,
            current_week_number: row.get::<_, i64>(2)? as u32,
            source_analysis_id: row.get(3)?,
            created_at: timestamp_column(row, 4)?,
            updated_at: timestamp_column(row, 5)?,
            weeks: Vec::new(),
        })
    }

    /// Loads the owner's plan with every week and task.
    pub(crate) fn load_plan(conn: &Connection, owner: &str) -> Result<Option<Plan>> {
        let mut plan = conn
            .query_row(SELECT_PLAN_BY_OWNER_SQL, params![owner], Self::build_plan_from_row)
            .optional()
            .db_context("Failed to query plan")?;

        if let Some(ref mut plan) = plan {
            plan.weeks = Self::load_weeks(conn, plan.id)?;
        }

        Ok(plan)
    }

    /// Inserts an empty plan row and returns its id.
    pub(crate) fn insert_plan(
        conn: &Connection,
        owner: &str,
        source_analysis_id: Option<&str>,
        now: Timestamp,
    ) -> Result<u64> {
        let now_str = now.to_string();
        conn.execute(
            INSERT_PLAN_SQL,
            params![owner, source_analysis_id, &now_str, &now_str],
        )
        .map_err(|e| {
            if super::is_constraint_violation(&e) {
                RoadmapError::Conflict {
                    owner: owner.to_string(),
                }
            } else {
                RoadmapError::database("Failed to insert plan").with_source(e)
            }
        })?;

        let id = conn.last_insert_rowid() as u64;
        debug!("inserted plan {id} for owner '{owner}'");
        Ok(id)
    }

    /// Moves the plan pointer from `expected` to `new_pointer`.
    ///
    /// Returns false when the stored pointer no longer equals `expected`,
    /// meaning another writer got there first.
    pub(crate) fn update_plan_pointer(
        conn: &Connection,
        plan_id: u64,
        expected: u32,
        new_pointer: u32,
        source_analysis_id: Option<&str>,
        now: Timestamp,
    ) -> Result<bool> {
        let rows_affected = conn
            .execute(
                UPDATE_PLAN_POINTER_SQL,
                params![
                    new_pointer as i64,
                    source_analysis_id,
                    now.to_string(),
                    plan_id as i64,
                    expected as i64
                ],
            )
            .db_context("Failed to update plan pointer")?;
        Ok(rows_affected == 1)
    }

    /// Retrieves the owner's plan, eagerly loading weeks and tasks.
    pub fn get_plan(&self, owner: &str) -> Result<Option<Plan>> {
        Self::load_plan(&self.connection, owner)
    }

    /// Permanently deletes the owner's plan with all its weeks and tasks.
    /// Returns the deleted plan, or None if the owner had no plan.
    pub fn delete_plan(&mut self, owner: &str) -> Result<Option<Plan>> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let Some(plan) = Self::load_plan(&tx, owner)? else {
            return Ok(None);
        };

        // Foreign keys cascade as well; the explicit deletes keep files
        // opened without the pragma consistent.
        tx.execute(DELETE_PLAN_TASKS_SQL, params![plan.id as i64])
            .db_context("Failed to delete plan tasks")?;
        tx.execute(DELETE_PLAN_WEEKS_SQL, params![plan.id as i64])
            .db_context("Failed to delete plan weeks")?;
        tx.execute(DELETE_PLAN_SQL, params![plan.id as i64])
            .db_context("Failed to delete plan")?;

        tx.commit().db_context("Failed to commit transaction")?;
        debug!("deleted plan {} for owner '{owner}'", plan.id);

        Ok(Some(plan))
    }
}
