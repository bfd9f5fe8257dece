//! Task model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A single actionable item within a week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier for the task
    pub id: u64,

    /// ID of the parent week
    pub week_id: u64,

    /// Short imperative title
    pub title: String,

    /// Instructional text
    pub body: String,

    /// Free-text grouping, e.g. "Skin" or "Brows"
    pub category: String,

    /// Free-text cadence label, e.g. "Daily" or "Weekend"
    pub timeframe: String,

    /// 1-based order of creation within the week
    pub priority: u32,

    /// Optional product or technique suggestions, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub product_suggestions: Vec<String>,

    /// Whether the user ticked the task off
    pub is_completed: bool,

    /// When the task was ticked off; cleared when unticked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
}

impl Task {
    /// Status marker used by the display layer.
    pub fn check_icon(&self) -> &'static str {
        if self.is_completed { "✓" } else { "○" }
    }
}
