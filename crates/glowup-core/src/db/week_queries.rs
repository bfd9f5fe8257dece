//! Week CRUD operations and queries.

use jiff::Timestamp;
use log::debug;
use rusqlite::{Connection, OptionalExtension, params};

use super::timestamp_column;
use crate::{
    error::{DatabaseResultExt, Result, RoadmapError},
    models::{TaskDraft, Week, WeekDraft},
};

const INSERT_WEEK_SQL: &str = "INSERT INTO weeks (plan_id, week_number, title, summary, unlocked_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const INSERT_TASK_SQL: &str = "INSERT INTO tasks (week_id, title, body, category, timeframe, priority, product_suggestions, is_completed, completed_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, NULL)";
const SELECT_WEEKS_BY_PLAN_SQL: &str = "SELECT id, plan_id, week_number, title, summary, unlocked_at FROM weeks WHERE plan_id = ?1 ORDER BY week_number";
const SELECT_WEEK_BY_OWNER_SQL: &str = "SELECT w.id, w.plan_id, w.week_number, w.title, w.summary, w.unlocked_at FROM weeks w JOIN plans p ON p.id = w.plan_id WHERE p.owner = ?1 AND w.week_number = ?2";

impl super::Database {
    /// Helper function to construct a Week (without tasks) from a database row
    fn build_week_from_row(row: &rusqlite::Row) -> rusqlite::Result<Week> {
        Ok(Week {
            id: row.get::<_, i64>(0)? as u64,
            plan_id: row.get::<_, i64>(1)? as u64,
            week_number: row.get::<_, i64>(2)? as u32,
            title: row.get(3)?,
            summary: row.get(4)?,
            unlocked_at: timestamp_column(row, 5)?,
            completed_at: None,
            tasks: Vec::new(),
        })
    }

    /// Attaches tasks and derives the completion timestamp.
    fn hydrate_week(conn: &Connection, mut week: Week) -> Result<Week> {
        week.tasks = Self::load_tasks(conn, week.id)?;
        week.derive_completion();
        Ok(week)
    }

    /// Loads the plan's weeks in ascending week order.
    pub(crate) fn load_weeks(conn: &Connection, plan_id: u64) -> Result<Vec<Week>> {
        let mut stmt = conn
            .prepare(SELECT_WEEKS_BY_PLAN_SQL)
            .db_context("Failed to prepare query")?;

        let weeks = stmt
            .query_map(params![plan_id as i64], Self::build_week_from_row)
            .db_context("Failed to query weeks")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch weeks")?;

        weeks
            .into_iter()
            .map(|week| Self::hydrate_week(conn, week))
            .collect()
    }

    /// Inserts a generated week and its tasks, returning the stored week.
    ///
    /// Task priorities follow draft order starting at 1. A duplicate week
    /// number for the plan is reported as [`RoadmapError::Conflict`].
    pub(crate) fn insert_week(
        conn: &Connection,
        owner: &str,
        plan_id: u64,
        draft: &WeekDraft,
        now: Timestamp,
    ) -> Result<Week> {
        if draft.title.trim().is_empty() {
            return Err(RoadmapError::invalid_input("title").with_reason("must not be empty"));
        }
        draft.tasks.iter().try_for_each(TaskDraft::validate)?;

        conn.execute(
            INSERT_WEEK_SQL,
            params![
                plan_id as i64,
                draft.week_number as i64,
                &draft.title,
                &draft.summary,
                now.to_string()
            ],
        )
        .map_err(|e| {
            if super::is_constraint_violation(&e) {
                RoadmapError::Conflict {
                    owner: owner.to_string(),
                }
            } else {
                RoadmapError::database("Failed to insert week").with_source(e)
            }
        })?;
        let week_id = conn.last_insert_rowid() as u64;

        for (index, task) in draft.tasks.iter().enumerate() {
            let suggestions = if task.product_suggestions.is_empty() {
                None
            } else {
                Some(serde_json::to_string(&task.product_suggestions)?)
            };
            conn.execute(
                INSERT_TASK_SQL,
                params![
                    week_id as i64,
                    &task.title,
                    &task.body,
                    &task.category,
                    &task.timeframe,
                    (index + 1) as i64,
                    suggestions
                ],
            )
            .db_context("Failed to insert task")?;
        }

        debug!(
            "inserted week {} ({} tasks) into plan {plan_id}",
            draft.week_number,
            draft.tasks.len()
        );

        let week = Week {
            id: week_id,
            plan_id,
            week_number: draft.week_number,
            title: draft.title.clone(),
            summary: draft.summary.clone(),
            unlocked_at: now,
            completed_at: None,
            tasks: Vec::new(),
        };
        Self::hydrate_week(conn, week)
    }

    /// Retrieves one week of the owner's plan with its tasks.
    pub fn get_week(&self, owner: &str, week_number: u32) -> Result<Option<Week>> {
        let week = self
            .connection
            .query_row(
                SELECT_WEEK_BY_OWNER_SQL,
                params![owner, week_number as i64],
                Self::build_week_from_row,
            )
            .optional()
            .db_context("Failed to query week")?;

        week.map(|w| Self::hydrate_week(&self.connection, w))
            .transpose()
    }
}
