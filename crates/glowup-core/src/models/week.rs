//! Week model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Task;

/// One generated stage of a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Week {
    /// Unique identifier for the week
    pub id: u64,

    /// ID of the parent plan
    pub plan_id: u64,

    /// 1-based position within the plan
    pub week_number: u32,

    /// Generated headline, e.g. "Week 2: Brow Density Sprint"
    pub title: String,

    /// Generated summary naming the focus areas
    pub summary: String,

    /// When the week became active; set once at creation
    pub unlocked_at: Timestamp,

    /// When the last task was completed, derived from the tasks on load
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,

    /// Tasks in priority order
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Week {
    /// Whether every task is done. A week without tasks is vacuously complete.
    pub fn is_complete(&self) -> bool {
        self.tasks.iter().all(|t| t.is_completed)
    }

    /// Completed and total task counts.
    pub fn task_counts(&self) -> (u32, u32) {
        let done = self.tasks.iter().filter(|t| t.is_completed).count() as u32;
        (done, self.tasks.len() as u32)
    }

    /// Fraction of tasks completed, 0 when the week has no tasks.
    pub fn progress(&self) -> f64 {
        let (done, total) = self.task_counts();
        super::fraction(done, total)
    }

    /// Recomputes `completed_at` from the current task state.
    pub fn derive_completion(&mut self) {
        self.completed_at = if self.tasks.is_empty() {
            Some(self.unlocked_at)
        } else if self.is_complete() {
            self.tasks
                .iter()
                .filter_map(|t| t.completed_at)
                .max()
                .or(Some(self.unlocked_at))
        } else {
            None
        };
    }
}
