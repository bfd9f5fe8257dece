//! Wrappers and Display implementations for operation results.

use std::fmt;

use super::datetime::LocalDate;
use crate::models::{AdvanceOutcome, AdvanceRejection, Plan, Task};

impl AdvanceRejection {
    /// The guidance line shown when `advance` declines at `current_week`.
    pub fn message(&self, current_week: u32) -> String {
        match self {
            Self::IncompleteWeek { .. } => {
                format!("Complete every task to unlock Week {}", current_week + 1)
            }
            Self::WaitingPeriod { next_unlock_at } => {
                format!("Next week unlocks on {}", LocalDate(next_unlock_at))
            }
        }
    }
}

impl fmt::Display for AdvanceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(week) = &self.week {
            writeln!(f, "Unlocked Week {}", self.current_week)?;
            writeln!(f)?;
            return write!(f, "{week}");
        }

        writeln!(f, "Still on Week {}", self.current_week)?;
        writeln!(f)?;
        match &self.reason {
            Some(reason @ AdvanceRejection::IncompleteWeek {
                completed,
                total,
                progress,
            }) => {
                writeln!(f, "{}.", reason.message(self.current_week))?;
                writeln!(
                    f,
                    "\nProgress: {completed}/{total} tasks ({}%)",
                    (progress * 100.0).round() as u32
                )
            }
            Some(reason) => writeln!(f, "{}.", reason.message(self.current_week)),
            None => Ok(()),
        }
    }
}

/// Wrapper type for displaying a task after its completion was toggled.
pub struct ToggleResult<'a>(pub &'a Task);

impl fmt::Display for ToggleResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.0.is_completed {
            "Completed"
        } else {
            "Reopened"
        };
        writeln!(f, "{verb} task {}", self.0.id)?;
        writeln!(f)?;
        write!(f, "{}", self.0)
    }
}

/// Wrapper type for displaying the result of a plan reset.
pub struct DeleteResult<'a>(pub &'a Plan);

impl fmt::Display for DeleteResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (_, total) = self.0.task_counts();
        writeln!(
            f,
            "Deleted plan for '{}' ({} weeks, {total} tasks)",
            self.0.owner,
            self.0.weeks.len()
        )
    }
}
