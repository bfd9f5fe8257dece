//! Tunable constants of the progression engine.

use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RoadmapError};

const SECONDS_PER_DAY: i64 = 86_400;
/// Longest cooldown accepted, roughly a century.
const MAX_COOLDOWN_DAYS: i64 = 36_500;

/// Engine constants, defaulting to a 7-day cooldown, at most 6 tasks per
/// week, 3 focus areas and a 7.0 "needs help" threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ProgressionPolicy {
    /// Minimum time between a week unlocking and the next one being generated
    pub cooldown: SignedDuration,
    /// Upper bound on tasks in a generated week
    pub max_tasks_per_week: usize,
    /// How many focus candidates a week draws from
    pub focus_limit: usize,
    /// Scores at or below this value count as needing help
    pub help_threshold: f64,
}

impl ProgressionPolicy {
    /// Default cooldown between weeks.
    pub const DEFAULT_COOLDOWN_DAYS: i64 = 7;

    /// Returns a copy with the cooldown set to a whole number of days.
    ///
    /// Fails when the day count does not fit in a duration.
    pub fn with_cooldown_days(mut self, days: i64) -> Result<Self> {
        self.cooldown = days
            .checked_mul(SECONDS_PER_DAY)
            .map(SignedDuration::from_secs)
            .ok_or_else(|| {
                RoadmapError::invalid_input("cooldown_days")
                    .with_reason(format!("{days} days is out of range"))
            })?;
        Ok(self)
    }

    /// Rejects configurations the engine cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.cooldown.is_negative() {
            return Err(RoadmapError::invalid_input("cooldown").with_reason("must not be negative"));
        }
        if self.cooldown > SignedDuration::from_secs(MAX_COOLDOWN_DAYS * SECONDS_PER_DAY) {
            return Err(RoadmapError::invalid_input("cooldown")
                .with_reason(format!("must not exceed {MAX_COOLDOWN_DAYS} days")));
        }
        if self.max_tasks_per_week == 0 {
            return Err(RoadmapError::invalid_input("max_tasks_per_week")
                .with_reason("must allow at least one task"));
        }
        if self.focus_limit == 0 {
            return Err(RoadmapError::invalid_input("focus_limit")
                .with_reason("must allow at least one focus area"));
        }
        if !self.help_threshold.is_finite() || !(0.0..=10.0).contains(&self.help_threshold) {
            return Err(RoadmapError::invalid_input("help_threshold")
                .with_reason("must be a number between 0 and 10"));
        }
        Ok(())
    }
}

impl Default for ProgressionPolicy {
    fn default() -> Self {
        Self {
            cooldown: SignedDuration::from_hours(Self::DEFAULT_COOLDOWN_DAYS * 24),
            max_tasks_per_week: 6,
            focus_limit: 3,
            help_threshold: 7.0,
        }
    }
}
