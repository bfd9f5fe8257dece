use std::path::PathBuf;

use clap::{Parser, Subcommand};
use glowup_core::{ProgressionPolicy, params::DEFAULT_OWNER};

use crate::cli::{AdvanceArgs, PlanCommands, TaskCommands, WeekCommands};

/// Weekly glow-up roadmap: turns an appearance analysis into a gated,
/// multi-week task plan
///
/// Each week targets the lowest-scoring areas of your latest analysis. The
/// next week unlocks once every task is done and the cooldown since the
/// current week unlocked has passed. Run `glowup serve` to expose the same
/// operations to AI assistants over MCP.
#[derive(Parser)]
#[command(version, about, name = "glowup")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/glowup/roadmap.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Whose roadmap to operate on
    #[arg(long, global = true, env = "GLOWUP_OWNER", default_value = DEFAULT_OWNER)]
    pub owner: String,

    /// Days that must pass after a week unlocks before the next one can
    #[arg(long, global = true, default_value_t = ProgressionPolicy::DEFAULT_COOLDOWN_DAYS)]
    pub cooldown_days: i64,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the glowup CLI
///
/// Without a command the current roadmap state is shown.
#[derive(Subcommand)]
pub enum Commands {
    /// Show the roadmap, its weeks and whether the next week can unlock
    State,
    /// Feed a new analysis in and unlock the next week if eligible
    #[command(alias = "a")]
    Advance(AdvanceArgs),
    /// Inspect or tick off tasks
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Inspect weeks
    #[command(alias = "w")]
    Week {
        #[command(subcommand)]
        command: WeekCommands,
    },
    /// Show or reset the whole plan
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Start the MCP server
    Serve,
}
