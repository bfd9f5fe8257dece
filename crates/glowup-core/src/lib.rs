//! Core library for the Glowup roadmap progression engine.
//!
//! The engine turns a one-shot appearance analysis into a gated, multi-week
//! task plan. Each week targets the lowest-scoring metrics of the latest
//! analysis; the next week unlocks only once every task is done and the
//! cooldown since the active week unlocked has elapsed.
//!
//! # Layers
//!
//! - [`generation`]: pure week generation (metric extraction, task
//!   composition, week assembly)
//! - [`progression`]: the state machine deciding what `advance` does
//! - [`db`]: SQLite persistence with transactional advance
//! - [`roadmap`]: the async façade used by the CLI and MCP server
//! - [`display`]: markdown formatting of models and results
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use glowup_core::{RoadmapBuilder, models::AnalysisResult, params::Advance};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let roadmap = RoadmapBuilder::new()
//!     .with_database_path(Some("roadmap.db"))
//!     .build()
//!     .await?;
//!
//! let outcome = roadmap
//!     .advance(&Advance {
//!         owner: "default".to_string(),
//!         analysis: AnalysisResult::default().with_metric("brow_density", 3.5, "Sparse tails"),
//!         source_id: None,
//!     })
//!     .await?;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod db;
pub mod display;
pub mod error;
pub mod generation;
pub mod models;
pub mod notify;
pub mod params;
pub mod policy;
pub mod progression;
pub mod roadmap;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use db::Database;
pub use display::{DeleteResult, LocalDateTime, ToggleResult};
pub use error::{Result, RoadmapError};
pub use models::{
    AdvanceOutcome, AdvanceRejection, AnalysisResult, MetricReading, Plan, ProgressionState,
    RoadmapState, Task, Week, WeekUnlocked,
};
pub use notify::{LogNotifier, UnlockNotifier};
pub use params::{Advance, Owner, ResetPlan, TaskRef, WeekRef};
pub use policy::ProgressionPolicy;
pub use roadmap::{Roadmap, RoadmapBuilder};
