//! Builder for creating and configuring Roadmap instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::task;

use super::Roadmap;
use crate::{
    clock::{Clock, SystemClock},
    db::Database,
    error::{Result, RoadmapError},
    notify::{LogNotifier, UnlockNotifier},
    policy::ProgressionPolicy,
};

/// Builder for creating and configuring Roadmap instances.
#[derive(Clone)]
pub struct RoadmapBuilder {
    database_path: Option<PathBuf>,
    policy: ProgressionPolicy,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn UnlockNotifier>,
}

impl RoadmapBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            policy: ProgressionPolicy::default(),
            clock: Arc::new(SystemClock),
            notifier: Arc::new(LogNotifier),
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG data directory:
    /// `$XDG_DATA_HOME/glowup/roadmap.db` or `~/.local/share/glowup/roadmap.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Overrides the engine constants. Checked in [`Self::build`].
    pub fn with_policy(mut self, policy: ProgressionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the wall clock, e.g. with a [`crate::clock::FixedClock`].
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the log-based unlock notifier.
    pub fn with_notifier(mut self, notifier: Arc<dyn UnlockNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Builds the configured roadmap instance.
    ///
    /// # Errors
    ///
    /// Returns `RoadmapError::InvalidInput` if the policy is invalid
    /// Returns `RoadmapError::FileSystem` if the database path is invalid
    /// Returns `RoadmapError::Database` if database initialization fails
    pub async fn build(self) -> Result<Roadmap> {
        self.policy.validate()?;

        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| RoadmapError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let init_path = db_path.clone();
        task::spawn_blocking(move || Database::new(&init_path).map(drop))
            .await
            .map_err(RoadmapError::join)??;

        log::debug!("roadmap database ready at {}", db_path.display());
        Ok(Roadmap::new(db_path, self.policy, self.clock, self.notifier))
    }

    /// Returns the default database path in the XDG data directory.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("glowup")
            .place_data_file("roadmap.db")
            .map_err(|e| RoadmapError::XdgDirectory(e.to_string()))
    }
}

impl Default for RoadmapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
