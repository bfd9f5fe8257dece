//! Error types for the roadmap engine.
//!
//! Only infrastructure problems are errors. A refused `advance` (incomplete
//! week, cooldown still running) is a normal [`crate::models::AdvanceOutcome`].

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all roadmap operations.
#[derive(Error, Debug)]
pub enum RoadmapError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// No plan exists for the given owner
    #[error("No plan found for owner '{owner}'")]
    PlanNotFound { owner: String },
    /// Week number does not exist in the owner's plan
    #[error("Week {week_number} not found for owner '{owner}'")]
    WeekNotFound { owner: String, week_number: u32 },
    /// Task not found (or not owned by the caller)
    #[error("Task with ID {id} not found")]
    TaskNotFound { id: u64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Timestamp arithmetic overflowed or was rejected
    #[error("Time calculation error: {source}")]
    Time {
        #[from]
        source: jiff::Error,
    },
    /// Another writer changed the plan between read and write
    #[error("Plan for owner '{owner}' was modified concurrently; retry the operation")]
    Conflict { owner: String },
    /// The blocking worker running a storage call panicked or was cancelled
    #[error("Background storage task failed: {source}")]
    Worker {
        #[source]
        source: tokio::task::JoinError,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> RoadmapError {
        RoadmapError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> RoadmapError {
        RoadmapError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl RoadmapError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Whether the caller may safely repeat the operation.
    ///
    /// Storage failures leave nothing committed, so a retry observes the same
    /// state the failed attempt did. A worker that died mid-call drops its
    /// open transaction, which rolls back.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Database { .. } | Self::Conflict { .. } | Self::Worker { .. }
        )
    }

    /// Whether the error was caused by the caller's input rather than the
    /// engine or its storage.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. }
                | Self::PlanNotFound { .. }
                | Self::WeekNotFound { .. }
                | Self::TaskNotFound { .. }
        )
    }

    pub(crate) fn join(source: tokio::task::JoinError) -> Self {
        Self::Worker { source }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| RoadmapError::database(message).with_source(e))
    }
}

/// Result type alias for roadmap operations
pub type Result<T> = std::result::Result<T, RoadmapError>;
