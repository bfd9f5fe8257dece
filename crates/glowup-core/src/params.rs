//! Parameter structures shared by the CLI and the MCP server.
//!
//! These carry no interface-specific derives beyond serde. Interface layers
//! wrap them: the CLI builds them from clap `Args` structs with
//! `into_params(owner)`, since the owner comes from a global flag, and the
//! MCP server deserializes them through a transparent wrapper that
//! adds `schemars::JsonSchema` when the `schema` feature is enabled.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │───▶│                 │
//! │  (clap derives) │    │  Core Params    │───▶ Roadmap
//! ├─────────────────┤    │ (serde derives) │
//! │   MCP Params    │───▶│                 │
//! └─────────────────┘    └─────────────────┘
//! ```

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::AnalysisResult;

/// Owner used when a caller does not name one.
pub const DEFAULT_OWNER: &str = "default";

fn default_owner() -> String {
    DEFAULT_OWNER.to_string()
}

/// Parameters for operations scoped to an owner only.
///
/// Used by get_state and get_plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Owner {
    /// Identifier of the user whose roadmap to read
    #[serde(default = "default_owner")]
    pub owner: String,
}

impl Default for Owner {
    fn default() -> Self {
        Self {
            owner: default_owner(),
        }
    }
}

/// Parameters for advancing the roadmap with a fresh analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Advance {
    /// Identifier of the user whose roadmap to advance
    #[serde(default = "default_owner")]
    pub owner: String,
    /// The completed analysis that seeds the next week
    #[serde(default)]
    pub analysis: AnalysisResult,
    /// Identifier stamped on the plan; overrides `analysis.id`
    #[serde(default)]
    pub source_id: Option<String>,
}

/// Parameters for operations on a single task.
///
/// Used by toggle_task and show_task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TaskRef {
    /// Identifier of the user who owns the task
    #[serde(default = "default_owner")]
    pub owner: String,
    /// ID of the task
    pub id: u64,
}

/// Parameters for showing one week.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct WeekRef {
    /// Identifier of the user who owns the plan
    #[serde(default = "default_owner")]
    pub owner: String,
    /// 1-based week number
    pub week_number: u32,
}

/// Parameters for deleting an owner's plan.
///
/// The deletion cascades to every week and task and cannot be undone, so it
/// only proceeds when `confirmed` is true.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ResetPlan {
    /// Identifier of the user whose plan to delete
    #[serde(default = "default_owner")]
    pub owner: String,
    /// Must be true for the deletion to proceed
    #[serde(default)]
    pub confirmed: bool,
}
