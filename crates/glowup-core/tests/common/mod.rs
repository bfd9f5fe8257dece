#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc};

use glowup_core::{
    AnalysisResult, FixedClock, Owner, ProgressionPolicy, Roadmap, RoadmapBuilder, TaskRef,
};
use jiff::{SignedDuration, Timestamp};
use tempfile::TempDir;

pub const DAY: SignedDuration = SignedDuration::from_hours(24);

/// Fixed starting instant for every test clock
pub fn t0() -> Timestamp {
    Timestamp::from_second(1_700_000_000).unwrap()
}

/// Helper function to create a temporary directory and database path
pub fn create_test_environment() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("roadmap.db");
    (temp_dir, db_path)
}

/// Helper function to create a test roadmap on a fixed clock
pub async fn create_test_roadmap(
    policy: ProgressionPolicy,
) -> (TempDir, Roadmap, Arc<FixedClock>) {
    let (temp_dir, db_path) = create_test_environment();
    let clock = Arc::new(FixedClock::new(t0()));
    let roadmap = RoadmapBuilder::new()
        .with_database_path(Some(db_path))
        .with_policy(policy)
        .with_clock(clock.clone())
        .build()
        .await
        .expect("Failed to create roadmap");
    (temp_dir, roadmap, clock)
}

/// An analysis where brows, makeup and skin need help, in that order
pub fn three_low_scores() -> AnalysisResult {
    AnalysisResult {
        id: Some("scan-1".to_string()),
        face_shape: Some("oval".to_string()),
        skin_undertone: Some("warm".to_string()),
        ..AnalysisResult::default()
    }
    .with_metric("skin_texture", 5.0, "Some congestion on the chin")
    .with_metric("brow_density", 3.0, "Sparse tails")
    .with_metric("facial_harmony", 8.5, "Balanced proportions")
    .with_metric("lighting_quality", 7.5, "Even light")
    .with_metric("makeup_suitability", 4.0, "Foundation too cool")
    .with_metric("pose_naturalness", 9.0, "Relaxed")
    .with_metric("color_harmony", 8.0, "Good palette")
}

/// A degraded analysis where every score is zero
pub fn all_zero_scores() -> AnalysisResult {
    [
        "skin_texture",
        "brow_density",
        "facial_harmony",
        "lighting_quality",
        "makeup_suitability",
        "pose_naturalness",
        "color_harmony",
    ]
    .into_iter()
    .fold(AnalysisResult::default(), |acc, key| acc.with_metric(key, 0.0, ""))
}

pub fn owner(name: &str) -> Owner {
    Owner {
        owner: name.to_string(),
    }
}

/// Ticks off every open task of the owner's active week
pub async fn complete_active_week(roadmap: &Roadmap, name: &str) {
    let plan = roadmap
        .get_plan(&owner(name))
        .await
        .expect("Failed to load plan")
        .expect("Plan should exist");
    let week = plan.active_week().expect("Plan should have a week");
    for task in week.tasks.iter().filter(|t| !t.is_completed) {
        roadmap
            .toggle_task_completion(&TaskRef {
                owner: name.to_string(),
                id: task.id,
            })
            .await
            .expect("Failed to toggle task");
    }
}
