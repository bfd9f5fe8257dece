//! Transient focus candidates derived from an analysis.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoadmapError};

/// A ranked weakness that a generated week should work on.
///
/// Candidates only live for one generation cycle and are never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FocusCandidate {
    /// Normalized metric key (e.g. `brow_density`)
    pub metric_key: String,
    /// Human-readable metric name (e.g. "Brow Density")
    pub display_title: String,
    /// Task grouping label (e.g. "Brows")
    pub category: String,
    /// Score on a 0-10 scale
    pub score: f64,
    /// Supporting notes from the analysis, never empty
    pub notes: String,
}

/// One task as produced by the task composer, before persistence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub category: String,
    /// Cadence label such as "Daily" or "Weekend"
    pub timeframe: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub product_suggestions: Vec<String>,
}

impl TaskDraft {
    /// Checks that the free-text labels are usable before the draft is
    /// stored.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("title", &self.title),
            ("category", &self.category),
            ("timeframe", &self.timeframe),
        ] {
            if value.trim().is_empty() {
                return Err(RoadmapError::invalid_input(field).with_reason("must not be empty"));
            }
        }
        Ok(())
    }
}

/// One generated week, before persistence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekDraft {
    pub week_number: u32,
    pub title: String,
    pub summary: String,
    /// Tasks in priority order
    pub tasks: Vec<TaskDraft>,
}
