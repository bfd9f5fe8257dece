//! Data models for the roadmap engine.
//!
//! Persistent entities ([`Plan`], [`Week`], [`Task`]) reference their parent
//! by id and are loaded eagerly by the store, so a [`Plan`] value always
//! carries its weeks and each [`Week`] its tasks. Transient generation types
//! ([`FocusCandidate`], [`WeekDraft`], [`TaskDraft`]) never touch storage.
//!
//! Display implementations live in [`crate::display`].

pub mod analysis;
pub mod focus;
pub mod outcome;
pub mod plan;
pub mod state;
pub mod task;
pub mod week;


pub use analysis::{AnalysisResult, MetricReading};
pub use focus::{FocusCandidate, TaskDraft, WeekDraft};
pub use outcome::{AdvanceOutcome, AdvanceRejection, WeekUnlocked};
pub use plan::Plan;
pub use state::{PlanSummary, ProgressionState, RoadmapState, WeekSummary};
pub use task::Task;
pub use week::Week;

/// `done / total` as a fraction, 0 when `total` is 0.
pub(crate) fn fraction(done: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(done) / f64::from(total)
    }
}
