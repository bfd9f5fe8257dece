//! Display implementations for domain models.
//!
//! All output is markdown so the terminal renderer can style it. Tasks are
//! shown with their id because the id is what `task toggle` expects.

use std::fmt;

use super::datetime::{LocalDate, LocalDateTime};
use crate::models::{Plan, PlanSummary, Task, Week, WeekSummary};

fn percent(fraction: f64) -> u32 {
    (fraction * 100.0).round() as u32
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (completed, total) = self.task_counts();
        writeln!(f, "# Glow-up plan for {}", self.owner)?;
        writeln!(f)?;

        writeln!(f, "- Current week: {}", self.max_week_number())?;
        writeln!(
            f,
            "- Progress: {completed}/{total} tasks ({}%)",
            percent(self.progress())
        )?;
        if let Some(source) = &self.source_analysis_id {
            writeln!(f, "- Source analysis: {source}")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if self.weeks.is_empty() {
            writeln!(f, "\nNo weeks in this plan.")?;
        } else {
            for week in &self.weeks {
                writeln!(f)?;
                write!(f, "{week}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (completed, total) = self.task_counts();
        writeln!(f, "## {} ({completed}/{total})", self.title)?;
        writeln!(f)?;

        if !self.summary.is_empty() {
            writeln!(f, "{}", self.summary)?;
            writeln!(f)?;
        }

        writeln!(f, "- Unlocked: {}", LocalDateTime(&self.unlocked_at))?;
        if let Some(completed_at) = &self.completed_at {
            writeln!(f, "- Completed: {}", LocalDateTime(completed_at))?;
        }
        writeln!(f)?;

        if self.tasks.is_empty() {
            writeln!(f, "No tasks this week.")?;
        }
        for task in &self.tasks {
            write!(f, "{task}")?;
        }

        Ok(())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {} {}. {} ({} · {})",
            self.check_icon(),
            self.id,
            self.title,
            self.category,
            self.timeframe
        )?;
        writeln!(f)?;

        if !self.body.is_empty() {
            writeln!(f, "{}", self.body)?;
            writeln!(f)?;
        }

        if !self.product_suggestions.is_empty() {
            writeln!(f, "#### Suggestions")?;
            writeln!(f)?;
            for suggestion in &self.product_suggestions {
                writeln!(f, "- {suggestion}")?;
            }
            writeln!(f)?;
        }

        if let Some(completed_at) = &self.completed_at {
            writeln!(f, "Completed {}", LocalDateTime(completed_at))?;
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- **Current week**: {}", self.current_week)?;
        writeln!(
            f,
            "- **Progress**: {}/{} tasks ({}%)",
            self.completed_tasks,
            self.total_tasks,
            percent(self.progress)
        )?;
        writeln!(f, "- **Started**: {}", LocalDate(&self.created_at))?;
        Ok(())
    }
}

impl fmt::Display for WeekSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} ({}/{}, {}%)",
            self.title,
            self.completed_tasks,
            self.total_tasks,
            percent(self.progress)
        )?;
        writeln!(f)?;

        for task in &self.tasks {
            writeln!(
                f,
                "- {} {}. {} *({})*",
                task.check_icon(),
                task.id,
                task.title,
                task.timeframe
            )?;
        }
        writeln!(f)?;

        Ok(())
    }
}
