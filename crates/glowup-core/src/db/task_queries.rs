//! Task queries and completion toggling.

use jiff::Timestamp;
use log::debug;
use rusqlite::{Connection, OptionalExtension, params, types::Type};

use super::optional_timestamp_column;
use crate::{
    error::{DatabaseResultExt, Result, RoadmapError},
    models::Task,
};

const SELECT_TASKS_BY_WEEK_SQL: &str = "SELECT id, week_id, title, body, category, timeframe, priority, product_suggestions, is_completed, completed_at FROM tasks WHERE week_id = ?1 ORDER BY priority, id";
const SELECT_TASK_BY_OWNER_SQL: &str = "SELECT t.id, t.week_id, t.title, t.body, t.category, t.timeframe, t.priority, t.product_suggestions, t.is_completed, t.completed_at FROM tasks t JOIN weeks w ON w.id = t.week_id JOIN plans p ON p.id = w.plan_id WHERE p.owner = ?1 AND t.id = ?2";
const UPDATE_TASK_COMPLETION_SQL: &str =
    "UPDATE tasks SET is_completed = ?1, completed_at = ?2 WHERE id = ?3";
const UPDATE_PLAN_TIMESTAMP_BY_TASK_SQL: &str = "UPDATE plans SET updated_at = ?1 WHERE id = (SELECT w.plan_id FROM weeks w JOIN tasks t ON t.week_id = w.id WHERE t.id = ?2)";

impl super::Database {
    /// Helper function to construct a Task from a database row
    fn build_task_from_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        // Suggestions are stored as a JSON array
        let suggestions_str: Option<String> = row.get(7)?;
        let product_suggestions = match suggestions_str {
            Some(s) if !s.is_empty() => serde_json::from_str::<Vec<String>>(&s).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e))
            })?,
            _ => Vec::new(),
        };

        Ok(Task {
            id: row.get::<_, i64>(0)? as u64,
            week_id: row.get::<_, i64>(1)? as u64,
            title: row.get(2)?,
            body: row.get(3)?,
            category: row.get(4)?,
            timeframe: row.get(5)?,
            priority: row.get::<_, i64>(6)? as u32,
            product_suggestions,
            is_completed: row.get::<_, i64>(8)? != 0,
            completed_at: optional_timestamp_column(row, 9)?,
        })
    }

    /// Loads a week's tasks in priority order.
    pub(crate) fn load_tasks(conn: &Connection, week_id: u64) -> Result<Vec<Task>> {
        let mut stmt = conn
            .prepare(SELECT_TASKS_BY_WEEK_SQL)
            .db_context("Failed to prepare query")?;

        stmt.query_map(params![week_id as i64], Self::build_task_from_row)
            .db_context("Failed to query tasks")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch tasks")
    }

    fn load_owned_task(conn: &Connection, owner: &str, task_id: u64) -> Result<Option<Task>> {
        conn.query_row(
            SELECT_TASK_BY_OWNER_SQL,
            params![owner, task_id as i64],
            Self::build_task_from_row,
        )
        .optional()
        .db_context("Failed to query task")
    }

    /// Retrieves a task belonging to the owner's plan.
    pub fn get_task(&self, owner: &str, task_id: u64) -> Result<Option<Task>> {
        Self::load_owned_task(&self.connection, owner, task_id)
    }

    /// Flips a task's completion flag.
    ///
    /// Completing stamps `completed_at` with `now`; uncompleting clears it.
    /// Tasks of other owners are reported as not found.
    pub fn toggle_task(&mut self, owner: &str, task_id: u64, now: Timestamp) -> Result<Task> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut task = Self::load_owned_task(&tx, owner, task_id)?
            .ok_or(RoadmapError::TaskNotFound { id: task_id })?;

        task.is_completed = !task.is_completed;
        task.completed_at = task.is_completed.then_some(now);

        tx.execute(
            UPDATE_TASK_COMPLETION_SQL,
            params![
                i64::from(task.is_completed),
                task.completed_at.map(|t| t.to_string()),
                task_id as i64
            ],
        )
        .db_context("Failed to update task")?;

        tx.execute(
            UPDATE_PLAN_TIMESTAMP_BY_TASK_SQL,
            params![now.to_string(), task_id as i64],
        )
        .db_context("Failed to update plan timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;
        debug!(
            "task {task_id} of '{owner}' is now {}",
            if task.is_completed { "done" } else { "open" }
        );

        Ok(task)
    }
}
