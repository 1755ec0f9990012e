//! Basic CLI E2E tests.
//!
//! Each test drives the built binary against its own temporary data directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_skillplan"))
        .args(args)
        .env("SKILLPLAN_DATA_DIR", data_dir)
        .env_remove("SKILLPLAN_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Run a CLI command and expect success.
fn run_ok(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "command {args:?} failed: {stderr}");
    stdout
}

#[test]
fn test_skill_add_and_list() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_ok(dir.path(), &["skill", "add", "Rust", "--priority", "high", "--hours", "2"]);
    assert!(out.contains("Skill added:"));

    let json = run_ok(dir.path(), &["skill", "list", "--json"]);
    let skills: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(skills.as_array().unwrap().len(), 1);
    assert_eq!(skills[0]["name"], "Rust");
    assert_eq!(skills[0]["priority"], "High");
    assert_eq!(skills[0]["estimatedHours"], 2.0);
}

#[test]
fn test_duplicate_skill_name_fails() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["skill", "add", "Rust", "--hours", "2"]);
    let (_, stderr, code) = run_cli(dir.path(), &["skill", "add", "rust", "--hours", "1"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("already exists"));
}

#[test]
fn test_skill_add_rejects_blank_name_and_tiny_estimate() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["skill", "add", "   ", "--hours", "1"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("must not be blank"));

    let (_, stderr, code) = run_cli(dir.path(), &["skill", "add", "Rust", "--hours", "0.001"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("at least one minute"));

    let json = run_ok(dir.path(), &["skill", "list", "--json"]);
    let skills: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(skills.as_array().unwrap().is_empty());
}

#[test]
fn test_plan_without_skills_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["plan", "generate"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("No skills"));
}

#[test]
fn test_generate_daily_plan_json() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["skill", "add", "Rust", "--priority", "high", "--hours", "2"]);

    let json = run_ok(
        dir.path(),
        &[
            "plan", "generate", "--mode", "daily", "--daily-hours", "2", "--from", "2026-04-06",
            "--start", "09:00", "--end", "11:00", "--work", "50", "--break", "10", "--no-lunch",
            "--json",
        ],
    );
    let plan: serde_json::Value = serde_json::from_str(&json).unwrap();
    let days = plan["days"].as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["date"], "2026-04-06");
    let types: Vec<_> = days[0]["blocks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["type"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(types, vec!["work", "break", "work", "buffer"]);
    assert_eq!(plan["summary"][0]["minutes"], 100);

    let shown = run_ok(dir.path(), &["plan", "show", "--json"]);
    let reloaded: serde_json::Value = serde_json::from_str(&shown).unwrap();
    assert_eq!(reloaded, plan);
}

#[test]
fn test_monthly_plan_and_block_toggle() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["skill", "add", "Rust", "--priority", "high", "--hours", "1"]);
    run_ok(
        dir.path(),
        &[
            "plan", "generate", "--mode", "monthly", "--from", "2026-04-06", "--to", "2026-04-07",
            "--start", "09:00", "--end", "11:00",
        ],
    );

    let out = run_ok(dir.path(), &["block", "toggle", "2026-04-06", "0"]);
    assert!(out.contains("marked done"));

    let list = run_ok(dir.path(), &["block", "list", "2026-04-06", "--json"]);
    let blocks: serde_json::Value = serde_json::from_str(&list).unwrap();
    assert_eq!(blocks[0]["completed"], true);
    assert_eq!(blocks[0]["type"], "work");

    let (_, stderr, code) = run_cli(dir.path(), &["block", "toggle", "2026-04-06", "1"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("not a work block"));
}

#[test]
fn test_export_text_to_file() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["skill", "add", "Rust", "--hours", "1"]);
    run_ok(dir.path(), &["plan", "generate", "--daily-hours", "1", "--from", "2026-04-06"]);

    let target = dir.path().join("plan.txt");
    run_ok(
        dir.path(),
        &["export", "--format", "text", "--output", target.to_str().unwrap()],
    );
    let text = std::fs::read_to_string(target).unwrap();
    assert!(text.starts_with("2026-04-06"));
    assert!(text.contains("Summary"));
}

#[test]
fn test_config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["config", "set", "planner.work_block_mins", "45"]);
    let out = run_ok(dir.path(), &["config", "get", "planner.work_block_mins"]);
    assert_eq!(out.trim(), "45");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "planner.nope", "1"]);
    assert_ne!(code, 0);
}
