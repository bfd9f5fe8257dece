mod common;

use common::{DAY, all_zero_scores, t0, three_low_scores};
use glowup_core::{
    AdvanceRejection, AnalysisResult, Database, ProgressionPolicy, RoadmapError,
};
use rusqlite::{Connection, params};
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn raw_connection(temp_file: &NamedTempFile) -> Connection {
    let conn = Connection::open(temp_file.path()).expect("Failed to open raw connection");
    conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
    conn
}

fn complete_week(db: &mut Database, owner: &str, week_number: u32) {
    let week = db.get_week(owner, week_number).unwrap().unwrap();
    for task in week.tasks.iter().filter(|t| !t.is_completed) {
        db.toggle_task(owner, task.id, t0()).unwrap();
    }
}

#[test]
fn test_database_initialization_is_idempotent() {
    let (temp_file, db) = create_test_db();
    drop(db);

    // Reopening an existing file must not fail on the schema
    let mut db = Database::new(temp_file.path()).expect("Failed to reopen database");
    let outcome = db
        .advance("ana", &three_low_scores(), None, t0(), &ProgressionPolicy::default())
        .unwrap();
    assert!(outcome.added_new_week);
}

#[test]
fn test_advance_persists_plan_weeks_and_tasks() {
    let (_temp_file, mut db) = create_test_db();
    let policy = ProgressionPolicy::default();

    let outcome = db
        .advance("ana", &three_low_scores(), Some("override"), t0(), &policy)
        .unwrap();
    let created = outcome.week.unwrap();

    let plan = db.get_plan("ana").unwrap().expect("Plan should exist");
    assert_eq!(plan.owner, "ana");
    assert_eq!(plan.current_week_number, 1);
    assert_eq!(plan.source_analysis_id.as_deref(), Some("override"));
    assert_eq!(plan.created_at, t0());
    assert_eq!(plan.weeks.len(), 1);
    assert_eq!(plan.weeks[0], created);

    let task = &plan.weeks[0].tasks[0];
    assert!(!task.product_suggestions.is_empty());
    assert!(task.completed_at.is_none());
}

#[test]
fn test_toggle_round_trip_and_derived_completion() {
    let (_temp_file, mut db) = create_test_db();
    db.advance("ana", &all_zero_scores(), None, t0(), &ProgressionPolicy::default())
        .unwrap();
    let week = db.get_week("ana", 1).unwrap().unwrap();
    assert!(week.completed_at.is_none());

    let ids: Vec<u64> = week.tasks.iter().map(|t| t.id).collect();
    db.toggle_task("ana", ids[0], t0() + DAY).unwrap();
    db.toggle_task("ana", ids[1], t0() + DAY * 3).unwrap();
    db.toggle_task("ana", ids[2], t0() + DAY * 2).unwrap();

    let week = db.get_week("ana", 1).unwrap().unwrap();
    assert!(week.is_complete());
    assert_eq!(week.completed_at, Some(t0() + DAY * 3));

    let task = db.toggle_task("ana", ids[1], t0() + DAY * 4).unwrap();
    assert!(!task.is_completed);
    assert!(task.completed_at.is_none());

    let week = db.get_week("ana", 1).unwrap().unwrap();
    assert!(!week.is_complete());
    assert!(week.completed_at.is_none());
    assert_eq!(db.get_task("ana", ids[1]).unwrap().unwrap(), task);
}

#[test]
fn test_tasks_are_scoped_to_owner() {
    let (_temp_file, mut db) = create_test_db();
    let policy = ProgressionPolicy::default();
    let week = db
        .advance("ana", &three_low_scores(), None, t0(), &policy)
        .unwrap()
        .week
        .unwrap();
    db.advance("bo", &three_low_scores(), None, t0(), &policy)
        .unwrap();

    let task_id = week.tasks[0].id;
    assert!(db.get_task("bo", task_id).unwrap().is_none());
    assert!(matches!(
        db.toggle_task("bo", task_id, t0()),
        Err(RoadmapError::TaskNotFound { id }) if id == task_id
    ));
    assert!(db.get_week("carla", 1).unwrap().is_none());
}

#[test]
fn test_delete_plan_cascades() {
    let (temp_file, mut db) = create_test_db();
    db.advance("ana", &three_low_scores(), None, t0(), &ProgressionPolicy::default())
        .unwrap();

    let deleted = db.delete_plan("ana").unwrap().expect("Plan should be deleted");
    assert_eq!(deleted.weeks.len(), 1);
    assert!(db.get_plan("ana").unwrap().is_none());
    assert!(db.delete_plan("ana").unwrap().is_none());

    let conn = raw_connection(&temp_file);
    let weeks: i64 = conn
        .query_row("SELECT COUNT(*) FROM weeks", [], |row| row.get(0))
        .unwrap();
    let tasks: i64 = conn
        .query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))
        .unwrap();
    assert_eq!((weeks, tasks), (0, 0));
}

#[test]
fn test_lagging_pointer_self_heals() {
    let (temp_file, mut db) = create_test_db();
    let policy = ProgressionPolicy::default();
    db.advance("ana", &three_low_scores(), None, t0(), &policy)
        .unwrap();
    complete_week(&mut db, "ana", 1);
    db.advance("ana", &three_low_scores(), None, t0() + DAY * 7, &policy)
        .unwrap();

    // Simulate a pointer left behind by an older writer
    let conn = raw_connection(&temp_file);
    conn.execute(
        "UPDATE plans SET current_week_number = 1 WHERE owner = ?1",
        params!["ana"],
    )
    .unwrap();

    let plan = db.get_plan("ana").unwrap().unwrap();
    assert_eq!(plan.current_week_number, 1);
    assert_eq!(plan.max_week_number(), 2);

    let outcome = db
        .advance("ana", &three_low_scores(), None, t0() + DAY * 8, &policy)
        .unwrap();
    assert_eq!(outcome.current_week, 2);
    assert!(matches!(
        outcome.reason,
        Some(AdvanceRejection::IncompleteWeek { .. })
    ));

    complete_week(&mut db, "ana", 2);
    let outcome = db
        .advance("ana", &three_low_scores(), None, t0() + DAY * 14, &policy)
        .unwrap();
    assert_eq!(outcome.current_week, 3);
    assert_eq!(db.get_plan("ana").unwrap().unwrap().current_week_number, 3);
}

#[test]
fn test_plan_without_weeks_is_seeded() {
    let (temp_file, mut db) = create_test_db();
    let conn = raw_connection(&temp_file);
    conn.execute(
        "INSERT INTO plans (owner, current_week_number, source_analysis_id, created_at, updated_at) VALUES (?1, 4, NULL, ?2, ?2)",
        params!["ana", t0().to_string()],
    )
    .unwrap();

    let outcome = db
        .advance(
            "ana",
            &AnalysisResult::default(),
            None,
            t0() + DAY,
            &ProgressionPolicy::default(),
        )
        .unwrap();
    assert!(outcome.added_new_week);
    assert_eq!(outcome.current_week, 1);

    let plan = db.get_plan("ana").unwrap().unwrap();
    assert_eq!(plan.current_week_number, 1);
    assert_eq!(plan.weeks.len(), 1);
}

#[test]
fn test_duplicate_week_number_is_rejected_by_schema() {
    let (temp_file, mut db) = create_test_db();
    db.advance("ana", &three_low_scores(), None, t0(), &ProgressionPolicy::default())
        .unwrap();

    let conn = raw_connection(&temp_file);
    let plan_id: i64 = conn
        .query_row("SELECT id FROM plans WHERE owner = 'ana'", [], |row| row.get(0))
        .unwrap();
    let result = conn.execute(
        "INSERT INTO weeks (plan_id, week_number, title, summary, unlocked_at) VALUES (?1, 1, 'dup', '', ?2)",
        params![plan_id, t0().to_string()],
    );
    assert!(result.is_err());
}

#[test]
fn test_blank_task_fields_are_rejected_by_schema() {
    let (temp_file, mut db) = create_test_db();
    let week = db
        .advance("ana", &three_low_scores(), None, t0(), &ProgressionPolicy::default())
        .unwrap()
        .week
        .unwrap();

    let conn = raw_connection(&temp_file);
    let result = conn.execute(
        "INSERT INTO tasks (week_id, title, body, category, timeframe, priority, product_suggestions, is_completed, completed_at) VALUES (?1, 'Title', '', '  ', 'Daily', 9, NULL, 0, NULL)",
        params![week.id as i64],
    );
    assert!(result.is_err());
}

#[test]
fn test_failed_plan_creation_leaves_no_plan() {
    let (temp_file, mut db) = create_test_db();
    let conn = raw_connection(&temp_file);
    conn.execute_batch(
        "CREATE TRIGGER fail_task_insert BEFORE INSERT ON tasks \
         BEGIN SELECT RAISE(ABORT, 'simulated storage failure'); END;",
    )
    .unwrap();

    let policy = ProgressionPolicy::default();
    let err = db
        .advance("ana", &three_low_scores(), None, t0(), &policy)
        .unwrap_err();
    assert!(err.is_retryable());
    assert!(db.get_plan("ana").unwrap().is_none());

    conn.execute_batch("DROP TRIGGER fail_task_insert;").unwrap();
    let outcome = db
        .advance("ana", &three_low_scores(), None, t0(), &policy)
        .unwrap();
    assert!(outcome.added_new_week);
    assert_eq!(outcome.current_week, 1);
    assert_eq!(db.get_plan("ana").unwrap().unwrap().weeks.len(), 1);
}
