//! MCP tool handlers implementation

use std::sync::Arc;

use glowup_core::{DeleteResult, Roadmap, ToggleResult, params as core};
use log::debug;
use rmcp::{
    ErrorData,
    handler::server::tool::Parameters,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::errors::to_mcp_error;

/// Generic MCP wrapper for core parameter types with serde integration
///
/// Deserializes transparently into the wrapped core type and forwards its
/// JSON schema, so the core params stay free of MCP concerns.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

// Type aliases for cleaner usage in function signatures
pub type Owner = McpParams<core::Owner>;
pub type Advance = McpParams<core::Advance>;
pub type TaskRef = McpParams<core::TaskRef>;
pub type WeekRef = McpParams<core::WeekRef>;
pub type ResetPlan = McpParams<core::ResetPlan>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(markdown: String) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(markdown)]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    roadmap: Arc<Roadmap>,
}

impl McpHandlers {
    pub fn new(roadmap: Arc<Roadmap>) -> Self {
        Self { roadmap }
    }

    pub async fn get_state(&self, Parameters(params): Parameters<Owner>) -> McpResult {
        debug!("get_state: {params:?}");

        let state = self
            .roadmap
            .get_current_state(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to load roadmap state", &e))?;
        text(state.to_string())
    }

    pub async fn advance(&self, Parameters(params): Parameters<Advance>) -> McpResult {
        debug!(
            "advance: owner={} metrics={}",
            params.as_ref().owner,
            params.as_ref().analysis.metrics.len()
        );

        let outcome = self
            .roadmap
            .advance(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to advance roadmap", &e))?;
        text(outcome.to_string())
    }

    pub async fn toggle_task(&self, Parameters(params): Parameters<TaskRef>) -> McpResult {
        debug!("toggle_task: {params:?}");

        let task = self
            .roadmap
            .toggle_task_completion(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to toggle task", &e))?;
        text(ToggleResult(&task).to_string())
    }

    pub async fn show_task(&self, Parameters(params): Parameters<TaskRef>) -> McpResult {
        debug!("show_task: {params:?}");

        let task = self
            .roadmap
            .show_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to show task", &e))?;
        text(task.to_string())
    }

    pub async fn show_week(&self, Parameters(params): Parameters<WeekRef>) -> McpResult {
        debug!("show_week: {params:?}");

        let week = self
            .roadmap
            .show_week(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to show week", &e))?;
        text(week.to_string())
    }

    pub async fn reset_plan(&self, Parameters(params): Parameters<ResetPlan>) -> McpResult {
        debug!("reset_plan: {params:?}");

        let plan = self
            .roadmap
            .reset_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to reset plan", &e))?;
        text(DeleteResult(&plan).to_string())
    }
}
