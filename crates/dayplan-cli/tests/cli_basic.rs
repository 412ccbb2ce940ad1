//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with an isolated data directory and verify
//! outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_dayplan"))
        .args(args)
        .env("DAYPLAN_DATA_DIR", data_dir)
        .env_remove("DAYPLAN_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_cli_success(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "command {args:?} failed: {stderr}");
    stdout
}

fn write_tasks(dir: &Path) -> String {
    let path = dir.join("tasks.json");
    std::fs::write(
        &path,
        r#"{
            "morning_tasks": [{"id": "m1", "title": "Coffee"}],
            "deep_tasks": [{"id": "d1", "title": "Write report", "estimated_duration": 90}],
            "light_tasks": [{"id": "l1", "title": "Email"}]
        }"#,
    )
    .unwrap();
    path.to_string_lossy().to_string()
}

fn generate(data_dir: &Path) -> serde_json::Value {
    let tasks = write_tasks(data_dir);
    let stdout = run_cli_success(
        data_dir,
        &["plan", "generate", "--date", "2024-09-02", "--tasks", &tasks, "--json"],
    );
    serde_json::from_str(&stdout).expect("generate --json prints a schedule")
}

fn block_id(schedule: &serde_json::Value, title: &str) -> String {
    schedule["time_blocks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["title"] == title)
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[test]
fn test_plan_generate_json() {
    let dir = tempfile::tempdir().unwrap();
    let schedule = generate(dir.path());

    assert_eq!(schedule["date"], "2024-09-02");
    assert_eq!(schedule["version"], 1);
    assert_eq!(schedule["is_optimized"], true);
    let report = schedule["time_blocks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["title"] == "Write report")
        .unwrap();
    assert_eq!(report["start_time"], "09:00");
    assert_eq!(report["end_time"], "10:30");
}

#[test]
fn test_plan_show_after_generate() {
    let dir = tempfile::tempdir().unwrap();
    generate(dir.path());

    let stdout = run_cli_success(dir.path(), &["plan", "show", "--date", "2024-09-02"]);
    assert!(stdout.contains("Schedule for 2024-09-02"));
    assert!(stdout.contains("Write report"));
    assert!(stdout.contains("Efficiency:"));
}

#[test]
fn test_plan_show_missing_date_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["plan", "show", "--date", "2024-01-01"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_block_set_completed() {
    let dir = tempfile::tempdir().unwrap();
    let schedule = generate(dir.path());
    let id = block_id(&schedule, "Email");

    run_cli_success(dir.path(), &["block", "set", &id, "completed", "--at", "09:25"]);

    let stdout = run_cli_success(dir.path(), &["plan", "show", "--date", "2024-09-02", "--json"]);
    let updated: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let block = updated["time_blocks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["id"] == id.as_str())
        .unwrap();
    assert_eq!(block["completion_status"], "completed");
    assert_eq!(block["actual_end_time"], "09:25");
    assert_eq!(updated["version"], 2);
}

#[test]
fn test_block_set_skipped_then_completed() {
    let dir = tempfile::tempdir().unwrap();
    let schedule = generate(dir.path());
    let id = block_id(&schedule, "Email");

    run_cli_success(dir.path(), &["block", "set", &id, "skipped"]);
    let stdout = run_cli_success(dir.path(), &["block", "set", &id, "completed"]);
    assert!(stdout.contains("completed"));

    let stdout = run_cli_success(dir.path(), &["plan", "show", "--date", "2024-09-02", "--json"]);
    let updated: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let block = updated["time_blocks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["id"] == id.as_str())
        .unwrap();
    assert_eq!(block["completion_status"], "completed");
    assert_eq!(updated["version"], 3);
}

#[test]
fn test_block_set_unknown_id_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["block", "set", "nope", "completed"]);
    assert_eq!(code, 1);
}

#[test]
fn test_config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(dir.path(), &["config", "set", "preferences.work_start_time", "08:30"]);
    let value = run_cli_success(dir.path(), &["config", "get", "preferences.work_start_time"]);
    assert_eq!(value.trim(), "08:30");

    run_cli_success(dir.path(), &["config", "reset"]);
    let value = run_cli_success(dir.path(), &["config", "get", "preferences.work_start_time"]);
    assert_eq!(value.trim(), "09:00");
}

#[test]
fn test_config_rejects_bad_time() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "preferences.lunch_time", "noon"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_list() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(dir.path(), &["config", "list"]);
    assert!(stdout.contains("preferences.lunch_duration = 60"));
    assert!(stdout.contains("scheduler.recovery_break_minutes = 15"));
}

#[test]
fn test_completions_bash() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(dir.path(), &["completions", "bash"]);
    assert!(stdout.contains("dayplan"));
}
