//! Display of the roadmap screen state.

use std::fmt;

use super::datetime::{LocalDate, days_until};
use crate::models::{ProgressionState, RoadmapState};

impl fmt::Display for ProgressionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl RoadmapState {
    fn fmt_progression(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let next_week = self.current_week() + 1;
        match self.progression {
            ProgressionState::NoPlan => {
                writeln!(f, "Run an analysis and advance to generate Week 1.")
            }
            ProgressionState::WeekInProgress { completed, total } => writeln!(
                f,
                "Complete every task to unlock Week {next_week} ({completed}/{total} done)."
            ),
            ProgressionState::WeekCompleteWaiting { next_unlock_at } => {
                let days = days_until(self.evaluated_at, next_unlock_at);
                let unit = if days == 1 { "day" } else { "days" };
                writeln!(
                    f,
                    "Week complete. Next week unlocks on {} (come back in {days} {unit}).",
                    LocalDate(&next_unlock_at)
                )
            }
            ProgressionState::WeekCompleteReady => {
                writeln!(f, "Week complete. Advance to unlock Week {next_week}.")
            }
        }
    }
}

impl fmt::Display for RoadmapState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(plan) = &self.plan else {
            writeln!(f, "# No plan for {}", self.owner)?;
            writeln!(f)?;
            return self.fmt_progression(f);
        };

        writeln!(f, "# Roadmap for {}", self.owner)?;
        writeln!(f)?;
        write!(f, "{plan}")?;
        writeln!(f)?;
        self.fmt_progression(f)?;

        for week in &self.weeks {
            writeln!(f)?;
            write!(f, "{week}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};

    use super::*;

    fn state(progression: ProgressionState, evaluated_at: Timestamp) -> RoadmapState {
        RoadmapState {
            owner: "ana".to_string(),
            plan: None,
            weeks: vec![],
            progression,
            evaluated_at,
        }
    }

    #[test]
    fn test_no_plan_prompt() {
        let output = state(ProgressionState::NoPlan, Timestamp::now()).to_string();
        assert!(output.contains("# No plan for ana"));
        assert!(output.contains("generate Week 1"));
    }

    #[test]
    fn test_waiting_shows_days_remaining() {
        let now = Timestamp::from_second(1_700_000_000).unwrap();
        let next_unlock_at = now + SignedDuration::from_hours(24 * 4);
        let mut state = state(ProgressionState::WeekCompleteWaiting { next_unlock_at }, now);
        state.plan = Some(crate::models::PlanSummary {
            id: 1,
            current_week: 2,
            source_analysis_id: None,
            created_at: now,
            updated_at: now,
            completed_tasks: 6,
            total_tasks: 6,
            progress: 1.0,
        });

        let output = state.to_string();
        assert!(output.contains("# Roadmap for ana"));
        assert!(output.contains("come back in 4 days"));
        assert!(output.contains("6/6 tasks (100%)"));
    }
}
