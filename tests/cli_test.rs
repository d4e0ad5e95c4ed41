//! Integration tests for the listing and theme commands.

mod common;

use common::TestEnv;
use predicates::prelude::*;
use std::fs;

// === Listing ===

#[test]
fn test_projects_lists_seeded_data_with_stats() {
    let env = TestEnv::new();
    env.prohub()
        .arg("projects")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 3  High priority: 2  In development: 1  Tasks: 4"))
        .stdout(predicate::str::contains("E-commerce Platform"))
        .stdout(predicate::str::contains("Mobile Banking App"))
        .stdout(predicate::str::contains("AI Dashboard"));
}

#[test]
fn test_projects_search_is_case_insensitive() {
    let env = TestEnv::new();
    env.prohub()
        .args(["projects", "--search", "REACT"])
        .assert()
        .success()
        .stdout(predicate::str::contains("E-commerce Platform"))
        .stdout(predicate::str::contains("AI Dashboard").not());
}

#[test]
fn test_projects_filter_by_priority() {
    let env = TestEnv::new();
    env.prohub()
        .args(["projects", "--priority", "high"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mobile Banking App"))
        .stdout(predicate::str::contains("AI Dashboard").not());
}

#[test]
fn test_tasks_for_assignee_and_status() {
    let env = TestEnv::new();
    env.prohub()
        .args(["tasks", "--assignee", "john@example.com", "--status", "completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Setup CI/CD pipeline"))
        .stdout(predicate::str::contains("Design user authentication flow").not())
        .stdout(predicate::str::contains("Total: 2  Completed: 1"));
}

#[test]
fn test_tasks_unknown_assignee_fails() {
    let env = TestEnv::new();
    env.prohub()
        .args(["tasks", "--assignee", "nobody@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User not found: nobody@example.com"));
}

#[test]
fn test_unread_notifications() {
    let env = TestEnv::new();
    env.prohub()
        .args(["notifications", "--unread"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project deadline approaching"))
        .stdout(predicate::str::contains("Task completed").not());
}

// === Theme ===

#[test]
fn test_theme_defaults_to_dark() {
    let env = TestEnv::new();
    env.prohub()
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::diff("dark\n"));
}

#[test]
fn test_theme_toggle_persists() {
    let env = TestEnv::new();
    env.prohub()
        .args(["theme", "toggle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme set to light"));

    let saved = fs::read_to_string(env.data_path().join("preferences.json")).unwrap();
    assert!(saved.contains("\"light\""));

    env.prohub()
        .args(["theme", "show"])
        .assert()
        .success()
        .stdout(predicate::str::diff("light\n"));

    env.prohub()
        .args(["theme", "toggle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme set to dark"));
}

#[test]
fn test_theme_set() {
    let env = TestEnv::new();
    env.prohub().args(["theme", "set", "light"]).assert().success();
    env.prohub()
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::diff("light\n"));
}

#[test]
fn test_corrupt_preferences_fall_back_to_dark() {
    let env = TestEnv::new();
    fs::write(env.data_path().join("preferences.json"), "{not json").unwrap();
    env.prohub()
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::diff("dark\n"));
}

// === Misc ===

#[test]
fn test_completions() {
    let env = TestEnv::new();
    env.prohub()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("prohub"));
}

#[test]
fn test_invalid_port_is_rejected() {
    let env = TestEnv::new();
    env.prohub()
        .args(["serve", "--port", "not-a-port"])
        .assert()
        .failure();
}
