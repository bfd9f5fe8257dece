//! Results of the progression controller.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Week;

/// Why `advance` declined to add a week.
///
/// These are expected outcomes that the caller renders as guidance, not
/// errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdvanceRejection {
    /// The active week still has open tasks.
    IncompleteWeek {
        completed: u32,
        total: u32,
        /// `completed / total`, 0 when the week has no tasks
        progress: f64,
    },
    /// The active week is done but the cooldown has not elapsed.
    WaitingPeriod { next_unlock_at: Timestamp },
}

impl AdvanceRejection {
    /// Builds an incomplete-week rejection, guarding against empty weeks.
    pub fn incomplete(completed: u32, total: u32) -> Self {
        Self::IncompleteWeek {
            completed,
            total,
            progress: super::fraction(completed, total),
        }
    }
}

/// Result of one `advance` call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdvanceOutcome {
    /// Whether a new week (or the whole plan) was created
    pub added_new_week: bool,
    /// Current week number after the call
    pub current_week: u32,
    /// Present exactly when `added_new_week` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<AdvanceRejection>,
    /// The newly created week, when one was added
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week: Option<Week>,
}

impl AdvanceOutcome {
    /// Outcome for a freshly committed week.
    pub fn added(week: Week) -> Self {
        Self {
            added_new_week: true,
            current_week: week.week_number,
            reason: None,
            week: Some(week),
        }
    }

    /// Outcome for a refused advance.
    pub fn rejected(current_week: u32, reason: AdvanceRejection) -> Self {
        Self {
            added_new_week: false,
            current_week,
            reason: Some(reason),
            week: None,
        }
    }
}

/// Event emitted after a week has been committed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekUnlocked {
    pub owner: String,
    pub plan_id: u64,
    pub week_number: u32,
    pub title: String,
    pub unlocked_at: Timestamp,
}
