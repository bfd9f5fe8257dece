//! Read-side summaries handed to the UI layer.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Plan, Task, Week};

/// Where an owner stands in the progression state machine.
///
/// Derived from the stored plan and the current time; never persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProgressionState {
    /// No plan (or a plan without weeks) exists yet.
    NoPlan,
    /// The active week has at least one open task.
    WeekInProgress { completed: u32, total: u32 },
    /// The active week is done; the next one unlocks later.
    WeekCompleteWaiting { next_unlock_at: Timestamp },
    /// The active week is done and the cooldown has elapsed.
    WeekCompleteReady,
}

impl ProgressionState {
    /// Whether the next `advance` call would create a week.
    pub fn can_advance(&self) -> bool {
        matches!(self, Self::NoPlan | Self::WeekCompleteReady)
    }

    /// Short label used in logs and listings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoPlan => "no_plan",
            Self::WeekInProgress { .. } => "week_in_progress",
            Self::WeekCompleteWaiting { .. } => "week_complete_waiting",
            Self::WeekCompleteReady => "week_complete_ready",
        }
    }
}

/// Per-week summary for rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekSummary {
    pub week_number: u32,
    pub title: String,
    pub summary: String,
    pub unlocked_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
    pub completed_tasks: u32,
    pub total_tasks: u32,
    /// Fraction of tasks completed, 0 for an empty week
    pub progress: f64,
    pub tasks: Vec<Task>,
}

impl From<&Week> for WeekSummary {
    fn from(week: &Week) -> Self {
        let (completed_tasks, total_tasks) = week.task_counts();
        Self {
            week_number: week.week_number,
            title: week.title.clone(),
            summary: week.summary.clone(),
            unlocked_at: week.unlocked_at,
            completed_at: week.completed_at,
            completed_tasks,
            total_tasks,
            progress: week.progress(),
            tasks: week.tasks.clone(),
        }
    }
}

/// Plan-level summary for rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanSummary {
    pub id: u64,
    pub current_week: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_analysis_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub completed_tasks: u32,
    pub total_tasks: u32,
    /// Completed tasks over total tasks across all weeks
    pub progress: f64,
}

impl From<&Plan> for PlanSummary {
    fn from(plan: &Plan) -> Self {
        let (completed_tasks, total_tasks) = plan.task_counts();
        Self {
            id: plan.id,
            current_week: plan.max_week_number(),
            source_analysis_id: plan.source_analysis_id.clone(),
            created_at: plan.created_at,
            updated_at: plan.updated_at,
            completed_tasks,
            total_tasks,
            progress: plan.progress(),
        }
    }
}

/// Everything the roadmap screen needs in one value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoadmapState {
    pub owner: String,
    /// Absent when the owner has no plan yet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<PlanSummary>,
    /// Weeks in ascending order
    pub weeks: Vec<WeekSummary>,
    pub progression: ProgressionState,
    /// Time the progression state was evaluated at
    pub evaluated_at: Timestamp,
}

impl RoadmapState {
    /// Whether the owner has a plan.
    pub fn exists(&self) -> bool {
        self.plan.is_some()
    }

    /// Current week number, 0 without a plan.
    pub fn current_week(&self) -> u32 {
        self.plan.as_ref().map_or(0, |p| p.current_week)
    }
}
