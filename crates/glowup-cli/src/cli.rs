//! Command-line argument wrappers and command handlers.
//!
//! Each subcommand has a clap `Args` struct that converts into the matching
//! core parameter type. The owner comes from the global `--owner` flag, so
//! conversions take it as an argument instead of implementing `From`.
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Roadmap → Display → Terminal
//! ```

use std::{
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use glowup_core::{
    DeleteResult, Roadmap, ToggleResult,
    models::AnalysisResult,
    params::{Advance, Owner, ResetPlan, TaskRef, WeekRef},
};
use log::debug;

use crate::renderer::TerminalRenderer;

/// Feed a completed analysis into the roadmap
///
/// The analysis is a JSON document with a `metrics` array of
/// `{ "key", "score", "notes" }` entries and optional descriptive fields
/// (face_shape, skin_undertone, hair_color, best_colors, avoid_colors,
/// makeup_style). Pass `-` to read it from standard input.
#[derive(Args)]
pub struct AdvanceArgs {
    /// Path to the analysis JSON file, or `-` for stdin
    #[arg(help = "Path to the analysis JSON file, or '-' to read stdin")]
    pub analysis: PathBuf,
    /// Identifier to stamp on the plan; overrides the analysis id
    #[arg(long, help = "Identifier to stamp on the plan (overrides the analysis id)")]
    pub source_id: Option<String>,
}

impl AdvanceArgs {
    fn into_params(self, owner: String) -> Result<Advance> {
        let analysis = read_analysis(&self.analysis)?;
        Ok(Advance {
            owner,
            analysis,
            source_id: self.source_id,
        })
    }
}

/// Commands for individual tasks
#[derive(Subcommand)]
pub enum TaskCommands {
    /// Mark a task done, or reopen it if it is already done
    Toggle(TaskIdArgs),
    /// Show a task with its instructions and suggestions
    Show(TaskIdArgs),
}

/// Identify a task
#[derive(Args)]
pub struct TaskIdArgs {
    #[arg(help = "ID of the task, as shown in the roadmap")]
    pub id: u64,
}

impl TaskIdArgs {
    fn into_params(self, owner: String) -> TaskRef {
        TaskRef { owner, id: self.id }
    }
}

/// Commands for weeks
#[derive(Subcommand)]
pub enum WeekCommands {
    /// Show one week with all its tasks
    Show(WeekArgs),
}

/// Identify a week
#[derive(Args)]
pub struct WeekArgs {
    #[arg(help = "Week number, starting at 1")]
    pub week_number: u32,
}

impl WeekArgs {
    fn into_params(self, owner: String) -> WeekRef {
        WeekRef {
            owner,
            week_number: self.week_number,
        }
    }
}

/// Commands for the whole plan
#[derive(Subcommand)]
pub enum PlanCommands {
    /// Show the full plan with every week and task
    Show,
    /// Permanently delete the plan with all weeks and tasks
    Reset(ResetArgs),
}

/// Delete the plan
///
/// This cannot be undone. Without `--confirm` nothing is deleted.
#[derive(Args)]
pub struct ResetArgs {
    #[arg(long, help = "Confirm the permanent deletion")]
    pub confirm: bool,
}

impl ResetArgs {
    fn into_params(self, owner: String) -> ResetPlan {
        ResetPlan {
            owner,
            confirmed: self.confirm,
        }
    }
}

/// Reads an analysis from a file, or from stdin for `-`.
fn read_analysis(path: &Path) -> Result<AnalysisResult> {
    let raw = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read analysis from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read analysis file {}", path.display()))?
    };

    serde_json::from_str(&raw).context("Analysis is not valid JSON")
}

/// Runs CLI commands against a roadmap and renders the results.
pub struct Cli {
    roadmap: Roadmap,
    renderer: TerminalRenderer,
    owner: String,
}

impl Cli {
    pub fn new(roadmap: Roadmap, renderer: TerminalRenderer, owner: String) -> Self {
        Self {
            roadmap,
            renderer,
            owner,
        }
    }

    fn owner_params(&self) -> Owner {
        Owner {
            owner: self.owner.clone(),
        }
    }

    /// Renders the roadmap state.
    pub async fn show_state(&self) -> Result<()> {
        let state = self
            .roadmap
            .get_current_state(&self.owner_params())
            .await
            .context("Failed to load roadmap state")?;
        self.renderer.render(&state.to_string())
    }

    pub async fn advance(&self, args: AdvanceArgs) -> Result<()> {
        let params = args.into_params(self.owner.clone())?;
        debug!(
            "advancing '{}' with {} metrics",
            params.owner,
            params.analysis.metrics.len()
        );

        let outcome = self
            .roadmap
            .advance(&params)
            .await
            .context("Failed to advance roadmap")?;
        self.renderer.render(&outcome.to_string())
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Toggle(args) => {
                let task = self
                    .roadmap
                    .toggle_task_completion(&args.into_params(self.owner.clone()))
                    .await
                    .context("Failed to toggle task")?;
                self.renderer.render(&ToggleResult(&task).to_string())
            }
            TaskCommands::Show(args) => {
                let task = self
                    .roadmap
                    .show_task(&args.into_params(self.owner.clone()))
                    .await
                    .context("Failed to show task")?;
                self.renderer.render(&task.to_string())
            }
        }
    }

    pub async fn handle_week_command(&self, command: WeekCommands) -> Result<()> {
        match command {
            WeekCommands::Show(args) => {
                let week = self
                    .roadmap
                    .show_week(&args.into_params(self.owner.clone()))
                    .await
                    .context("Failed to show week")?;
                self.renderer.render(&week.to_string())
            }
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Show => {
                let plan = self
                    .roadmap
                    .get_plan(&self.owner_params())
                    .await
                    .context("Failed to load plan")?;
                match plan {
                    Some(plan) => self.renderer.render(&plan.to_string()),
                    None => self
                        .renderer
                        .render(&format!("No plan for {} yet.\n", self.owner)),
                }
            }
            PlanCommands::Reset(args) => {
                let plan = self
                    .roadmap
                    .reset_plan(&args.into_params(self.owner.clone()))
                    .await
                    .context("Failed to reset plan")?;
                self.renderer.render(&DeleteResult(&plan).to_string())
            }
        }
    }
}
