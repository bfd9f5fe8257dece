//! Markdown formatting for models and operation results.
//!
//! Domain models implement `Display` directly; operation results that need
//! extra framing use small wrapper types. Everything renders as markdown so
//! the CLI can style it with termimad and the MCP server can return it as
//! tool text unchanged.
//!
//! ```rust
//! use glowup_core::models::{AdvanceOutcome, AdvanceRejection};
//!
//! let outcome = AdvanceOutcome::rejected(2, AdvanceRejection::incomplete(1, 4));
//! assert!(outcome.to_string().contains("Complete every task to unlock Week 3"));
//! ```

pub mod datetime;
pub mod models;
pub mod results;
pub mod state;

pub use datetime::{LocalDate, LocalDateTime, days_until};
pub use results::{DeleteResult, ToggleResult};
