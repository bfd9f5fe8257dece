//! Glowup CLI application
//!
//! Command-line and MCP front end for the roadmap progression engine.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use glowup_core::{ProgressionPolicy, RoadmapBuilder};
use log::info;
use mcp::{GlowupMcpServer, run_stdio_server};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        owner,
        cooldown_days,
        command,
    } = Args::parse();

    let policy = ProgressionPolicy::default()
        .with_cooldown_days(cooldown_days)
        .context("Invalid --cooldown-days")?;
    let roadmap = RoadmapBuilder::new()
        .with_database_path(database_file)
        .with_policy(policy)
        .build()
        .await
        .context("Failed to initialize roadmap")?;

    info!(
        "Glowup started for owner '{owner}' on {} (cooldown {})",
        roadmap.database_path().display(),
        roadmap.policy().cooldown
    );

    let renderer = TerminalRenderer::new(!no_color);
    match command {
        Some(Serve) => {
            info!("Starting Glowup MCP server");
            run_stdio_server(GlowupMcpServer::new(roadmap))
                .await
                .context("MCP server failed")
        }
        Some(Advance(args)) => Cli::new(roadmap, renderer, owner).advance(args).await,
        Some(Task { command }) => {
            Cli::new(roadmap, renderer, owner)
                .handle_task_command(command)
                .await
        }
        Some(Week { command }) => {
            Cli::new(roadmap, renderer, owner)
                .handle_week_command(command)
                .await
        }
        Some(Plan { command }) => {
            Cli::new(roadmap, renderer, owner)
                .handle_plan_command(command)
                .await
        }
        Some(State) | None => Cli::new(roadmap, renderer, owner).show_state().await,
    }
}
