//! Integration tests comparing CLI output with the core Display implementations
//!
//! The MCP tools return the same Display output, so matching the CLI here
//! keeps both surfaces consistent.

use std::{path::Path, process::Command};

use glowup_core::{
    Roadmap, RoadmapBuilder,
    params::{Owner, TaskRef, WeekRef},
};
use tempfile::TempDir;

const ANALYSIS: &str = r#"{
    "metrics": [
        { "key": "skin_texture", "score": 4.0, "notes": "Dry patches" },
        { "key": "hair_health", "score": 6.0, "notes": "Split ends" }
    ]
}"#;

/// Run a CLI command and capture its output
fn run_cli_command(db_path: &Path, args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_glowup"))
        .env_remove("GLOWUP_OWNER")
        .arg("--no-color")
        .arg("--database-file")
        .arg(db_path)
        .args(args)
        .output()
        .expect("Failed to run CLI command");
    assert!(output.status.success(), "CLI command failed: {args:?}");
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

/// Create a plan through the CLI and open the same database directly
async fn create_plan_via_cli() -> (TempDir, Roadmap) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");
    let analysis_path = temp_dir.path().join("analysis.json");
    std::fs::write(&analysis_path, ANALYSIS).unwrap();

    run_cli_command(&db_path, &["advance", analysis_path.to_str().unwrap()]);

    let roadmap = RoadmapBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to open roadmap");
    (temp_dir, roadmap)
}

fn default_owner() -> Owner {
    Owner::default()
}

#[tokio::test]
async fn test_plan_display_consistency() {
    let (temp_dir, roadmap) = create_plan_via_cli().await;

    let cli_output = run_cli_command(&temp_dir.path().join("test.db"), &["plan", "show"]);
    let plan = roadmap
        .get_plan(&default_owner())
        .await
        .unwrap()
        .expect("Plan should exist");

    assert_eq!(cli_output, plan.to_string());
}

#[tokio::test]
async fn test_week_display_consistency() {
    let (temp_dir, roadmap) = create_plan_via_cli().await;

    let cli_output = run_cli_command(&temp_dir.path().join("test.db"), &["week", "show", "1"]);
    let week = roadmap
        .show_week(&WeekRef {
            owner: default_owner().owner,
            week_number: 1,
        })
        .await
        .unwrap();

    assert_eq!(cli_output, week.to_string());
    assert!(cli_output.starts_with("## Week 1: Skin Texture Sprint"));
}

#[tokio::test]
async fn test_task_display_consistency() {
    let (temp_dir, roadmap) = create_plan_via_cli().await;

    let cli_output = run_cli_command(&temp_dir.path().join("test.db"), &["task", "show", "1"]);
    let task = roadmap
        .show_task(&TaskRef {
            owner: default_owner().owner,
            id: 1,
        })
        .await
        .unwrap();

    assert_eq!(cli_output, task.to_string());
}

#[tokio::test]
async fn test_state_display_consistency() {
    let (temp_dir, roadmap) = create_plan_via_cli().await;

    // Week 1 is still open, so the state does not depend on the clock
    let cli_output = run_cli_command(&temp_dir.path().join("test.db"), &["state"]);
    let state = roadmap.get_current_state(&default_owner()).await.unwrap();

    assert_eq!(cli_output, state.to_string());
}
