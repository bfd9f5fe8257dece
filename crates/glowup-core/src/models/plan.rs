//! Plan model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Week;

/// The per-owner multi-week program.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Owner the plan belongs to (one plan per owner)
    pub owner: String,

    /// Pointer to the most recent week
    pub current_week_number: u32,

    /// Analysis that most recently triggered week generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_analysis_id: Option<String>,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,

    /// Weeks ordered by week number, each with its tasks loaded
    #[serde(default)]
    pub weeks: Vec<Week>,
}

impl Plan {
    /// Highest week number among the loaded weeks, or 0 without weeks.
    ///
    /// This is the current week reported to callers. The stored pointer can
    /// drift from the week rows in either direction and is healed to this
    /// value on the next append, so it is never reported on its own.
    pub fn max_week_number(&self) -> u32 {
        self.weeks.iter().map(|w| w.week_number).max().unwrap_or(0)
    }

    /// The week that gates advancement: the highest-numbered existing week.
    pub fn active_week(&self) -> Option<&Week> {
        self.weeks.iter().max_by_key(|w| w.week_number)
    }

    /// Completed and total task counts across every week.
    pub fn task_counts(&self) -> (u32, u32) {
        self.weeks.iter().fold((0, 0), |(done, total), week| {
            let (d, t) = week.task_counts();
            (done + d, total + t)
        })
    }

    /// Fraction of all tasks completed, 0 when there are none.
    pub fn progress(&self) -> f64 {
        let (done, total) = self.task_counts();
        super::fraction(done, total)
    }
}
