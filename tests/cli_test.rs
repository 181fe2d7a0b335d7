//! CLI smoke tests
//!
//! Runs the built binary against fixture files copied into an isolated temp
//! directory, so no stray config file in the repo can leak in.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

const EXPERT: &str = include_str!("fixtures/expert.md");
const SLOP: &str = include_str!("fixtures/slop.md");

fn distill_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_distill"))
}

fn setup_workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("expert.md"), EXPERT).unwrap();
    std::fs::write(dir.path().join("slop.md"), SLOP).unwrap();
    dir
}

/// Run in `dir`, returning (exit code, stdout, stderr)
fn run(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(distill_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run distill");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

fn parse_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("Invalid JSON on stdout")
}

#[test]
fn test_score_json() {
    let dir = setup_workspace();
    let (code, stdout, _) = run(dir.path(), &["score", "expert.md", "--format", "json"]);
    assert_eq!(code, 0);

    let json = parse_json(&stdout);
    assert_eq!(json["source"], "expert.md");
    let overall = json["overall_score"].as_f64().unwrap();
    assert!(overall > 0.0 && overall <= 1.0);
    assert!(["A", "B", "C", "D", "F"].contains(&json["grade"].as_str().unwrap()));
    assert_eq!(json["dimensions"].as_object().unwrap().len(), 7);
    assert!(json["dimensions"]["substance"].get("highlights").is_none());
}

#[test]
fn test_score_text_output() {
    let dir = setup_workspace();
    let (code, stdout, _) = run(dir.path(), &["score", "slop.md"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Quality Report - slop.md"));
    assert!(stdout.contains("DIMENSIONS"));
    assert!(stdout.contains("substance"));
}

#[test]
fn test_score_flags() {
    let dir = setup_workspace();
    let (code, stdout, _) = run(
        dir.path(),
        &[
            "score",
            "expert.md",
            "--format",
            "json",
            "--scorers",
            "substance,epistemic",
            "--weight",
            "substance=2",
            "--highlights",
            "--paragraphs",
        ],
    );
    assert_eq!(code, 0);

    let json = parse_json(&stdout);
    let dims = json["dimensions"].as_object().unwrap();
    assert_eq!(dims.len(), 2);
    assert!(dims.contains_key("substance") && dims.contains_key("epistemic"));
    assert!(json["dimensions"]["substance"]["highlights"].is_array());
    assert_eq!(json["paragraphs"].as_array().unwrap().len(), 2);
}

#[test]
fn test_score_stdin() {
    let dir = setup_workspace();
    let mut child = Command::new(distill_bin())
        .args(["score", "-", "--format", "jsonl"])
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to run distill");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(EXPERT.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim().lines().count(), 1);
    let json = parse_json(stdout.trim());
    assert_eq!(json["source"], "<stdin>");
}

#[test]
fn test_compare_json() {
    let dir = setup_workspace();
    let (code, stdout, _) = run(
        dir.path(),
        &["compare", "expert.md", "slop.md", "--format", "json"],
    );
    assert_eq!(code, 0);

    let json = parse_json(&stdout);
    assert_eq!(json["winner"], "A");
    assert_eq!(json["label_a"], "expert.md");
    assert!(json["overall_delta"].as_f64().unwrap() > 0.0);
    assert_eq!(json["dimensions"].as_array().unwrap().len(), 7);
}

#[test]
fn test_compare_text_announces_winner() {
    let dir = setup_workspace();
    let (code, stdout, _) = run(dir.path(), &["compare", "slop.md", "expert.md"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("WINNER: B"));

    let (_, stdout, _) = run(dir.path(), &["compare", "expert.md", "expert.md"]);
    assert!(stdout.contains("TIE"));
}

#[test]
fn test_batch_jsonl_preserves_order() {
    let dir = setup_workspace();
    let (code, stdout, _) = run(
        dir.path(),
        &[
            "batch",
            "slop.md",
            "expert.md",
            "slop.md",
            "--format",
            "jsonl",
            "--workers",
            "2",
        ],
    );
    assert_eq!(code, 0);

    let sources: Vec<String> = stdout
        .lines()
        .map(|line| parse_json(line)["source"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(sources, vec!["slop.md", "expert.md", "slop.md"]);
}

#[test]
fn test_list_and_profiles() {
    let dir = setup_workspace();
    let (code, stdout, _) = run(dir.path(), &["list", "--format", "json"]);
    assert_eq!(code, 0);
    let names: Vec<String> = parse_json(&stdout)
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "argument",
            "authority",
            "complexity",
            "epistemic",
            "originality",
            "readability",
            "substance"
        ]
    );

    let (code, stdout, _) = run(dir.path(), &["profiles"]);
    assert_eq!(code, 0);
    for name in ["default", "technical", "news", "opinion"] {
        assert!(stdout.contains(name), "missing profile {name}");
    }
}

#[test]
fn test_config_file_is_applied() {
    let dir = setup_workspace();
    std::fs::write(
        dir.path().join("distill.toml"),
        r#"
[pipeline]
scorers = ["substance"]
profile = "legal"

[profiles.legal]
description = "Contracts and policy text"
weights = { substance = 2.0 }
"#,
    )
    .unwrap();

    let (code, stdout, _) = run(dir.path(), &["score", "expert.md", "--format", "json"]);
    assert_eq!(code, 0);
    let json = parse_json(&stdout);
    assert_eq!(json["profile"], "legal");
    assert_eq!(json["dimensions"].as_object().unwrap().len(), 1);

    // Flags win over the file
    let (code, stdout, _) = run(
        dir.path(),
        &["score", "expert.md", "--format", "json", "--profile", "news"],
    );
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout)["profile"], "news");

    let (_, stdout, _) = run(dir.path(), &["profiles"]);
    assert!(stdout.contains("legal"));
}

#[test]
fn test_unknown_scorer_fails_with_options() {
    let dir = setup_workspace();
    let (code, stdout, stderr) = run(dir.path(), &["score", "expert.md", "--scorers", "vibes"]);
    assert_ne!(code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Unknown scorer: 'vibes'"));
    assert!(stderr.contains("substance"));
}

#[test]
fn test_profile_conflicts_with_auto_profile() {
    let dir = setup_workspace();
    let (code, _, _) = run(
        dir.path(),
        &["score", "expert.md", "--profile", "news", "--auto-profile"],
    );
    assert_ne!(code, 0);
}

#[test]
fn test_missing_file_is_error() {
    let dir = setup_workspace();
    let (code, _, stderr) = run(dir.path(), &["score", "absent.md"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Failed to read absent.md"));
}

#[test]
fn test_compare_rejects_stdin_on_both_sides() {
    let dir = setup_workspace();
    let (code, stdout, stderr) = run(dir.path(), &["compare", "-", "-"]);
    assert_ne!(code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Only one side of a comparison can be read from stdin"));
}

#[test]
fn test_batch_csv_has_row_per_source() {
    let dir = setup_workspace();
    let (code, stdout, _) = run(
        dir.path(),
        &["batch", "expert.md", "slop.md", "--format", "csv"],
    );
    assert_eq!(code, 0);

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("source,overall_score,grade,label,word_count,argument_score"));
    assert!(lines[0].ends_with("substance_score"));
    assert!(lines[1].starts_with("expert.md,"));
    assert!(lines[2].starts_with("slop.md,"));
    assert_eq!(lines[1].split(',').count(), 12);
}
