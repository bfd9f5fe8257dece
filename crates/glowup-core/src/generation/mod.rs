//! Week generation: analysis scores in, a week of tasks out.
//!
//! ```text
//! AnalysisResult ──▶ metrics::extract_focus_candidates ──▶ Vec<FocusCandidate>
//!                                                              │
//!                      composer::compose_tasks ◀── per candidate
//!                                                              │
//!                    week_builder::build_week ──▶ WeekDraft (≤ cap tasks)
//! ```
//!
//! Everything here is pure and deterministic for a given input.

pub mod composer;
pub mod metrics;
pub mod week_builder;

pub use composer::compose_tasks;
pub use metrics::{KNOWN_METRICS, MetricDefinition, extract_focus_candidates};
pub use week_builder::{build_week, join_titles, maintenance_week};

use crate::{
    models::{AnalysisResult, WeekDraft},
    policy::ProgressionPolicy,
};

/// Runs the full pipeline for one week.
pub fn generate_week(
    week_number: u32,
    analysis: &AnalysisResult,
    policy: &ProgressionPolicy,
) -> WeekDraft {
    let candidates = extract_focus_candidates(analysis, policy);
    build_week(week_number, &candidates, analysis, policy)
}
