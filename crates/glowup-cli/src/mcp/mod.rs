//! MCP server implementation for Glowup
//!
//! Exposes the roadmap operations as Model Context Protocol tools so an AI
//! assistant can read a user's roadmap, feed in new analyses and tick off
//! tasks. Tool results are the same markdown the CLI prints.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use glowup_core::Roadmap;
use log::{debug, error, info};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use tokio::signal::unix::{SignalKind, signal};

pub mod errors;
pub mod handlers;

pub use handlers::{Advance, McpHandlers, McpResult, Owner, ResetPlan, TaskRef, WeekRef};

const INSTRUCTIONS: &str = r#"Glowup turns an appearance analysis into a gated, multi-week self-improvement roadmap.

## Core Concepts
- **Plan**: one per owner, an ordered list of weeks
- **Week**: a generated set of at most six tasks targeting the lowest-scoring metrics of the analysis that unlocked it
- **Task**: an actionable item with a completion checkbox

## Progression Rules
- The first `advance` creates the plan and Week 1.
- The next week unlocks only when every task of the current week is done AND seven days have passed since the current week unlocked.
- A refused `advance` is not an error: the result says whether tasks are still open or when the next week unlocks.

## Workflow
1. `get_state` to see the roadmap, progress and whether the next week is ready
2. `toggle_task` to tick off tasks by ID as the user completes them
3. `advance` with the latest analysis (metrics with 0-10 scores and notes) to unlock the next week
4. `show_week` / `show_task` for full instructions and product suggestions

Every tool takes an optional `owner` (defaults to "default")."#;

/// MCP server for Glowup
#[derive(Clone)]
pub struct GlowupMcpServer {
    roadmap: Arc<Roadmap>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl GlowupMcpServer {
    /// Create a new Glowup MCP server
    pub fn new(roadmap: Roadmap) -> Self {
        Self {
            roadmap: Arc::new(roadmap),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> McpHandlers {
        McpHandlers::new(self.roadmap.clone())
    }

    #[tool(
        name = "get_state",
        description = "Show the owner's roadmap: current week, overall progress, every week with its tasks (IDs, done or open), and whether the next week can be unlocked now or on which date."
    )]
    async fn get_state(&self, params: Parameters<Owner>) -> McpResult {
        self.handlers().get_state(params).await
    }

    #[tool(
        name = "advance",
        description = "Feed a completed analysis into the roadmap. Creates the plan and Week 1 on first use; afterwards unlocks the next week only when all current tasks are done and the 7-day cooldown has passed. Otherwise returns why not (progress so far, or the unlock date). Provide analysis.metrics as [{key, score (0-10), notes}] plus optional face_shape, skin_undertone, hair_color, best_colors, avoid_colors, makeup_style, and an optional source_id."
    )]
    async fn advance(&self, params: Parameters<Advance>) -> McpResult {
        self.handlers().advance(params).await
    }

    #[tool(
        name = "toggle_task",
        description = "Mark a task as done, or reopen it if it is already done. Use the task ID shown by get_state. Never unlocks a week by itself; call advance afterwards."
    )]
    async fn toggle_task(&self, params: Parameters<TaskRef>) -> McpResult {
        self.handlers().toggle_task(params).await
    }

    #[tool(
        name = "show_task",
        description = "Show one task with its full instructions, cadence and product suggestions."
    )]
    async fn show_task(&self, params: Parameters<TaskRef>) -> McpResult {
        self.handlers().show_task(params).await
    }

    #[tool(
        name = "show_week",
        description = "Show one week of the roadmap by week number, with its summary and every task."
    )]
    async fn show_week(&self, params: Parameters<WeekRef>) -> McpResult {
        self.handlers().show_week(params).await
    }

    #[tool(
        name = "reset_plan",
        description = "Permanently delete the owner's plan with all weeks and tasks. Requires confirmed=true; only use when the user explicitly asks to start over."
    )]
    async fn reset_plan(&self, params: Parameters<ResetPlan>) -> McpResult {
        self.handlers().reset_plan(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for GlowupMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "glowup".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: GlowupMcpServer) -> Result<()> {
    use rmcp::{ServiceExt, transport::stdio};

    info!("Starting Glowup MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    // Set up signal handlers for graceful shutdown
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use glowup_core::RoadmapBuilder;
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_server_registers_every_tool() {
        let temp_dir = TempDir::new().unwrap();
        let roadmap = RoadmapBuilder::new()
            .with_database_path(Some(temp_dir.path().join("mcp.db")))
            .build()
            .await
            .unwrap();
        let server = GlowupMcpServer::new(roadmap);

        let mut names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "advance",
                "get_state",
                "reset_plan",
                "show_task",
                "show_week",
                "toggle_task"
            ]
        );
        assert!(server.get_info().instructions.unwrap().contains("toggle_task"));
    }
}
