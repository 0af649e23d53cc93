//! Integration tests for school-cli
//!
//! These tests verify the CLI commands work end-to-end against a throwaway
//! database. Tests run serially to avoid database lock conflicts.

use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use tempfile::TempDir;

const SCHOOL_ENV: [&str; 5] = [
    "SCHOOL_DB_PATH",
    "SCHOOL_INSTITUTIONAL_DOMAIN",
    "SCHOOL_SIGNUP_POLICY",
    "SCHOOL_SUBMIT_DELAY_MS",
    "SCHOOL_OTP_COOLDOWN_SECS",
];

/// Get a Command for the school binary with a clean environment
fn school() -> Command {
    let mut cmd = Command::cargo_bin("school").unwrap();
    for key in SCHOOL_ENV {
        cmd.env_remove(key);
    }
    cmd.env("SCHOOL_SUBMIT_DELAY_MS", "0");
    cmd
}

/// A school command pointed at a database inside `dir`
fn school_in(dir: &TempDir) -> Command {
    let mut cmd = school();
    cmd.arg("--db").arg(dir.path().join("school.db"));
    cmd
}

fn add_fractions(dir: &TempDir) {
    school_in(dir)
        .args(["items", "add", "--title", "Fractions", "--subject", "Mathematics"])
        .args(["--class", "1A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created activity"));
}

fn list_json(dir: &TempDir) -> Vec<serde_json::Value> {
    let output = school_in(dir)
        .args(["--format", "json", "items", "list"])
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
#[serial]
fn test_cli_help() {
    school()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("school"))
        .stdout(predicate::str::contains("COMMAND").or(predicate::str::contains("Commands")));
}

#[test]
#[serial]
fn test_cli_version() {
    school()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("school"));
}

#[test]
#[serial]
fn test_invalid_format_rejected() {
    let dir = TempDir::new().unwrap();
    school_in(&dir)
        .args(["--format", "xml", "items", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}

// =============================================================================
// Items Command Tests
// =============================================================================

#[test]
#[serial]
fn test_items_list_empty() {
    let dir = TempDir::new().unwrap();
    school_in(&dir)
        .args(["items", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to show."));
}

#[test]
#[serial]
fn test_items_add_and_list() {
    let dir = TempDir::new().unwrap();
    add_fractions(&dir);

    school_in(&dir)
        .args(["items", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fractions"))
        .stdout(predicate::str::contains("1st A"));

    let items = list_json(&dir);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["classIds"][0], "1A");
    assert_eq!(items[0]["kind"], "activity");
}

#[test]
#[serial]
fn test_items_add_requires_target() {
    let dir = TempDir::new().unwrap();
    school_in(&dir)
        .args(["items", "add", "--title", "Fractions", "--subject", "Mathematics"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Select at least one class."));

    assert!(list_json(&dir).is_empty());
}

#[test]
#[serial]
fn test_items_add_rejects_unknown_student() {
    let dir = TempDir::new().unwrap();
    school_in(&dir)
        .args(["items", "add", "--title", "Oral exam", "--subject", "History"])
        .args(["--kind", "assessment", "--scope", "individual", "--student", "s99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown student: s99"));
}

#[test]
#[serial]
fn test_items_list_filters() {
    let dir = TempDir::new().unwrap();
    add_fractions(&dir);
    school_in(&dir)
        .args(["items", "add", "--title", "Oral exam", "--subject", "History"])
        .args(["--kind", "assessment", "--scope", "individual", "--student", "s3"])
        .args(["--due", "2099-05-01T10:00"])
        .assert()
        .success();

    school_in(&dir)
        .args(["items", "list", "--class", "1B"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Oral exam"))
        .stdout(predicate::str::contains("Fractions").not());

    school_in(&dir)
        .args(["items", "list", "--kind", "any", "--class", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Oral exam"))
        .stdout(predicate::str::contains("Fractions"));

    school_in(&dir)
        .args(["items", "list", "--window", "no-date"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fractions"))
        .stdout(predicate::str::contains("Oral exam").not());
}

#[test]
#[serial]
fn test_items_delete_requires_force() {
    let dir = TempDir::new().unwrap();
    add_fractions(&dir);
    let id = list_json(&dir)[0]["id"].as_str().unwrap().to_string();

    school_in(&dir)
        .args(["items", "delete", &id[..8]])
        .assert()
        .success()
        .stderr(predicate::str::contains("--force"));
    assert_eq!(list_json(&dir).len(), 1);

    school_in(&dir)
        .args(["items", "delete", &id[..8], "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted item"));
    assert!(list_json(&dir).is_empty());
}

#[test]
#[serial]
fn test_items_delete_unknown_id() {
    let dir = TempDir::new().unwrap();
    school_in(&dir)
        .args(["items", "delete", "nope", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Item not found"));
}

#[test]
#[serial]
fn test_items_clear() {
    let dir = TempDir::new().unwrap();
    add_fractions(&dir);
    add_fractions(&dir);

    school_in(&dir)
        .args(["items", "clear", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2 items"));
    assert!(list_json(&dir).is_empty());
}

// =============================================================================
// Roster Command Tests
// =============================================================================

#[test]
#[serial]
fn test_roster_show_seed() {
    let dir = TempDir::new().unwrap();
    school_in(&dir)
        .args(["roster", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1st A"))
        .stdout(predicate::str::contains("Ana Clara"))
        .stdout(predicate::str::contains("Life Project"));
}

#[test]
#[serial]
fn test_roster_reset() {
    let dir = TempDir::new().unwrap();
    school_in(&dir)
        .args(["roster", "reset"])
        .assert()
        .success()
        .stderr(predicate::str::contains("--force"));

    school_in(&dir)
        .args(["roster", "reset", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Roster reset to seed"));
}

// =============================================================================
// Dashboard Command Tests
// =============================================================================

#[test]
#[serial]
fn test_dashboard_classes_counts() {
    let dir = TempDir::new().unwrap();
    add_fractions(&dir);

    let output = school_in(&dir)
        .args(["--format", "json", "dashboard", "classes"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    let counts: Vec<(String, u64)> = rows
        .iter()
        .map(|r| (r["key"].as_str().unwrap().to_string(), r["count"].as_u64().unwrap()))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("1A".to_string(), 1),
            ("1B".to_string(), 0),
            ("2A".to_string(), 0)
        ]
    );
}

#[test]
#[serial]
fn test_dashboard_stats_json() {
    let dir = TempDir::new().unwrap();
    add_fractions(&dir);
    school_in(&dir)
        .args(["items", "add", "--title", "Old quiz", "--subject", "History"])
        .args(["--kind", "assessment", "--class", "2A", "--due", "2000-01-01T08:00"])
        .assert()
        .success();

    let output = school_in(&dir)
        .args(["--format", "json", "dashboard", "stats"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["kpis"]["total"], 2);
    assert_eq!(report["kpis"]["assessmentCount"], 1);
    assert_eq!(report["kpis"]["overdueCount"], 1);
    assert_eq!(report["scopes"][0]["scope"], "general");
    assert_eq!(report["scopes"][0]["count"], 2);
}

#[test]
#[serial]
fn test_dashboard_upcoming_skips_past_items() {
    let dir = TempDir::new().unwrap();
    school_in(&dir)
        .args(["items", "add", "--title", "Old quiz", "--subject", "History"])
        .args(["--class", "2A", "--due", "2000-01-01T08:00"])
        .assert()
        .success();
    school_in(&dir)
        .args(["items", "add", "--title", "Future essay", "--subject", "History"])
        .args(["--class", "2A", "--due", "2099-01-01T08:00"])
        .assert()
        .success();

    school_in(&dir)
        .args(["dashboard", "upcoming", "--limit", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Future essay"))
        .stdout(predicate::str::contains("Old quiz").not());
}

#[test]
#[serial]
fn test_dashboard_subjects() {
    let dir = TempDir::new().unwrap();
    add_fractions(&dir);
    school_in(&dir)
        .args(["dashboard", "subjects"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mathematics"));
}

// =============================================================================
// Account Command Tests
// =============================================================================

#[test]
#[serial]
fn test_account_signup_student() {
    let dir = TempDir::new().unwrap();
    school_in(&dir)
        .args(["account", "signup", "--role", "student"])
        .args(["--identifier", "20250001", "--name", "Ana Clara"])
        .args(["--birth-date", "2000-01-01", "--email", "ana@example.com"])
        .args(["--class-name", "1st A", "--shift", "morning", "--consent"])
        .args(["--code", "123456", "--password", "Abcdef1!"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Account created! You can sign in now."));
}

#[test]
#[serial]
fn test_account_signup_request_policy() {
    let dir = TempDir::new().unwrap();
    school_in(&dir)
        .env("SCHOOL_SIGNUP_POLICY", "request")
        .args(["account", "signup", "--role", "teacher"])
        .args(["--identifier", "prof@school.edu", "--name", "Carlos"])
        .args(["--birth-date", "1980-05-20", "--department", "Sciences", "--consent"])
        .args(["--code", "654321", "--password", "Abcdef1!"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Request sent!"));
}

#[test]
#[serial]
fn test_account_signup_minor_needs_guardian() {
    let dir = TempDir::new().unwrap();
    school_in(&dir)
        .args(["account", "signup", "--role", "student"])
        .args(["--identifier", "20250002", "--name", "Bruno Lima"])
        .args(["--birth-date", "2020-01-01", "--email", "bruno@example.com"])
        .args(["--class-name", "1st A", "--shift", "morning", "--consent"])
        .args(["--code", "123456", "--password", "Abcdef1!"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Step 2 of 4"))
        .stderr(predicate::str::contains("Enter the guardian's name and e-mail."));
}

#[test]
#[serial]
fn test_account_signup_institutional_domain() {
    let dir = TempDir::new().unwrap();
    school_in(&dir)
        .env("SCHOOL_INSTITUTIONAL_DOMAIN", "@school.edu")
        .args(["account", "signup", "--role", "teacher"])
        .args(["--identifier", "prof@gmail.com", "--name", "Carlos"])
        .args(["--birth-date", "1980-05-20", "--department", "Sciences", "--consent"])
        .args(["--code", "654321", "--password", "Abcdef1!"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Use your institutional e-mail (invalid domain)."));
}

#[test]
#[serial]
fn test_account_signup_weak_password() {
    let dir = TempDir::new().unwrap();
    school_in(&dir)
        .args(["account", "signup", "--role", "manager"])
        .args(["--identifier", "boss@school.edu", "--name", "Davi"])
        .args(["--birth-date", "1975-03-03", "--org-unit", "Head office", "--consent"])
        .args(["--code", "111111", "--password", "password"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Weak password"));
}

#[test]
#[serial]
fn test_account_recover() {
    let dir = TempDir::new().unwrap();
    school_in(&dir)
        .args(["account", "recover", "--identifier", "prof@school.edu"])
        .args(["--code", "123456", "--password", "Newpass1!"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Password updated! You can sign in now."));
}

#[test]
#[serial]
fn test_account_recover_bad_code() {
    let dir = TempDir::new().unwrap();
    school_in(&dir)
        .args(["account", "recover", "--identifier", "prof@school.edu"])
        .args(["--code", "12ab56", "--password", "Newpass1!"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Enter the 6-digit code."));
}

#[test]
#[serial]
fn test_account_login() {
    let dir = TempDir::new().unwrap();
    school_in(&dir)
        .args(["account", "login", "--identifier", "20250001", "--password", "secret1"])
        .args(["--role", "student"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as 20250001"));

    school_in(&dir)
        .args(["account", "login", "--identifier", "abc", "--password", "secret1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Fill in your identification and password correctly.",
        ));
}

// =============================================================================
// Subjects and Config Command Tests
// =============================================================================

#[test]
#[serial]
fn test_subjects_filter_new() {
    let dir = TempDir::new().unwrap();
    school_in(&dir)
        .args(["subjects", "--filter", "new"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mathematics"))
        .stdout(predicate::str::contains("Biology"))
        .stdout(predicate::str::contains("History").not());
}

#[test]
#[serial]
fn test_subjects_sort_progress_json() {
    let dir = TempDir::new().unwrap();
    let output = school_in(&dir)
        .args(["--format", "json", "subjects", "--sort", "progress"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let cards: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(cards.len(), 6);
    assert_eq!(cards[0]["name"], "Physics");
    assert_eq!(cards[5]["name"], "History");
}

#[test]
#[serial]
fn test_subjects_topics() {
    let dir = TempDir::new().unwrap();
    school_in(&dir)
        .args(["subjects", "topics", "mat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mathematics - Topics"))
        .stdout(predicate::str::contains("Fractions - Part 2"))
        .stdout(predicate::str::contains("In progress"));

    school_in(&dir)
        .args(["subjects", "topics", "hist"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No content here yet."));
}

#[test]
#[serial]
fn test_subjects_topics_json() {
    let dir = TempDir::new().unwrap();
    let output = school_in(&dir)
        .args(["--format", "json", "subjects", "topics", "mat"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let topics: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(topics.len(), 2);
    assert_eq!(topics[0]["durationMin"], 15);
    assert_eq!(topics[1]["status"], "in-progress");
}

#[test]
#[serial]
fn test_config_show_reports_sources() {
    let dir = TempDir::new().unwrap();
    school_in(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SCHOOL_DB_PATH"))
        .stdout(predicate::str::contains("flag"))
        .stdout(predicate::str::contains("SCHOOL_SUBMIT_DELAY_MS"))
        .stdout(predicate::str::contains("env"))
        .stdout(predicate::str::contains("default"));
}
