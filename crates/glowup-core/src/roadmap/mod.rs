//! High-level async API over the roadmap store.
//!
//! [`Roadmap`] is what the CLI and the MCP server talk to. Each call opens a
//! fresh SQLite connection on a blocking thread, so callers on the async
//! runtime never block.
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌──────────────────────┐
//! │  CLI / MCP   │──▶│ Roadmap (ops.rs) │──▶│ Database (db/)       │
//! │              │   │ owner lock,      │   │ BEGIN IMMEDIATE,     │
//! │              │   │ clock, notifier  │   │ decide, insert, CAS  │
//! └──────────────┘   └──────────────────┘   └──────────────────────┘
//! ```
//!
//! Writes for one owner are serialized by an in-process lock; the immediate
//! transaction and the compare-and-swap on the plan pointer cover writers in
//! other processes.
//!
//! # Usage
//!
//! ```rust,no_run
//! use glowup_core::{
//!     RoadmapBuilder,
//!     models::AnalysisResult,
//!     params::{Advance, Owner},
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let roadmap = RoadmapBuilder::new()
//!     .with_database_path(Some("roadmap.db"))
//!     .build()
//!     .await?;
//!
//! let analysis = AnalysisResult::default()
//!     .with_metric("skin_texture", 4.5, "Uneven texture on the cheeks")
//!     .with_metric("lighting_quality", 5.0, "Harsh overhead light");
//!
//! let outcome = roadmap
//!     .advance(&Advance {
//!         owner: "ana".to_string(),
//!         analysis,
//!         source_id: Some("scan-1".to_string()),
//!     })
//!     .await?;
//! assert!(outcome.added_new_week);
//!
//! let state = roadmap
//!     .get_current_state(&Owner {
//!         owner: "ana".to_string(),
//!     })
//!     .await?;
//! println!("{state}");
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, sync::Arc};

use tokio::task;

use crate::{
    clock::Clock,
    db::Database,
    error::{Result, RoadmapError},
    notify::UnlockNotifier,
    policy::ProgressionPolicy,
};

pub mod builder;
mod locks;
pub mod ops;


pub use builder::RoadmapBuilder;
use locks::OwnerLocks;

/// Main interface for reading and advancing roadmaps.
pub struct Roadmap {
    pub(crate) db_path: PathBuf,
    pub(crate) policy: ProgressionPolicy,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) notifier: Arc<dyn UnlockNotifier>,
    locks: OwnerLocks,
}

impl Roadmap {
    pub(crate) fn new(
        db_path: PathBuf,
        policy: ProgressionPolicy,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn UnlockNotifier>,
    ) -> Self {
        Self {
            db_path,
            policy,
            clock,
            notifier,
            locks: OwnerLocks::default(),
        }
    }

    /// Path of the SQLite file backing this roadmap.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// The engine constants in effect.
    pub fn policy(&self) -> &ProgressionPolicy {
        &self.policy
    }

    /// Runs `op` against a fresh connection on the blocking pool.
    async fn with_database<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(RoadmapError::join)?
    }
}

fn validate_owner(owner: &str) -> Result<String> {
    let owner = owner.trim();
    if owner.is_empty() {
        return Err(RoadmapError::invalid_input("owner").with_reason("must not be empty"));
    }
    Ok(owner.to_string())
}
