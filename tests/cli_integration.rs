//! CLI integration tests for the month planner
//!
//! These drive the `planner` binary end to end: project setup, task
//! management, saved filters and the month/day views.

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command instance for the planner binary
fn planner_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("planner"))
}

/// Create a temporary directory with an empty planner project
fn setup_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    planner_cmd()
        .arg("init")
        .arg(dir.path())
        .arg("--empty")
        .assert()
        .success();
    dir
}

/// Run a command in `dir` with JSON output and parse stdout
fn run_json(dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = planner_cmd()
        .current_dir(dir.path())
        .arg("--format")
        .arg("json")
        .args(args)
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    serde_json::from_str(&stdout).unwrap()
}

/// Add a task and return its ID
fn add_task(dir: &TempDir, args: &[&str]) -> String {
    let mut full = vec!["task", "add"];
    full.extend_from_slice(args);
    run_json(dir, &full)["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Initialization Tests
// =============================================================================

#[test]
fn test_init_creates_structure() {
    let dir = TempDir::new().unwrap();

    planner_cmd()
        .arg("init")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized planner project"));

    assert!(dir.path().join(".planner").is_dir());
    assert!(dir.path().join(".planner/config.toml").is_file());
    assert!(dir.path().join(".planner/month_planner_tasks_v1.json").is_file());
}

#[test]
fn test_init_seeds_demo_tasks() {
    let dir = TempDir::new().unwrap();
    planner_cmd().arg("init").arg(dir.path()).assert().success();

    let json = run_json(&dir, &["task", "list"]);
    let titles: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();

    assert_eq!(titles.len(), 4);
    assert!(titles.contains(&"Kickoff moodboard"));
    assert!(titles.contains(&"Vendor onboarding"));
}

#[test]
fn test_init_empty_has_no_tasks() {
    let dir = setup_project();

    let json = run_json(&dir, &["task", "list"]);
    assert!(json.as_array().unwrap().is_empty());
}

#[test]
fn test_init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    planner_cmd().arg("init").arg(dir.path()).assert().success();
    add_task(&dir, &["Extra", "--date", "2026-10-01"]);

    planner_cmd()
        .arg("init")
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("already initialized"));

    let json = run_json(&dir, &["task", "list"]);
    assert_eq!(json.as_array().unwrap().len(), 5);
}

#[test]
fn test_not_in_project_error() {
    let dir = TempDir::new().unwrap();

    planner_cmd()
        .current_dir(dir.path())
        .args(["task", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not in a planner project"));
}

// =============================================================================
// Task Tests
// =============================================================================

#[test]
fn test_task_add_json() {
    let dir = setup_project();

    let json = run_json(
        &dir,
        &["task", "add", "API review", "--date", "2026-10-20", "--label", "dev", "--notes", "v2"],
    );

    assert!(json["id"].as_str().unwrap().starts_with("t-"));
    assert_eq!(json["title"], "API review");
    assert_eq!(json["date"], "2026-10-20");
    assert_eq!(json["label"], "dev");
    assert_eq!(json["status"], "todo");
    assert_eq!(json["notes"], "v2");
}

#[test]
fn test_task_add_trims_title() {
    let dir = setup_project();

    let json = run_json(&dir, &["task", "add", "  Padded  ", "--date", "2026-10-20"]);
    assert_eq!(json["title"], "Padded");
}

#[test]
fn test_task_add_rejects_blank_title() {
    let dir = setup_project();

    planner_cmd()
        .current_dir(dir.path())
        .args(["task", "add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task title cannot be empty"));

    let json = run_json(&dir, &["task", "list"]);
    assert!(json.as_array().unwrap().is_empty());
}

#[test]
fn test_task_add_rejects_unknown_label() {
    let dir = setup_project();

    planner_cmd()
        .current_dir(dir.path())
        .args(["task", "add", "Thing", "--label", "marketing"])
        .assert()
        .failure();
}

#[test]
fn test_task_add_rejects_bad_date() {
    let dir = setup_project();

    planner_cmd()
        .current_dir(dir.path())
        .args(["task", "add", "Thing", "--date", "2026-02-30"])
        .assert()
        .failure();
}

#[test]
fn test_task_show_text() {
    let dir = setup_project();
    let id = add_task(&dir, &["Landing copy", "--date", "2026-10-22", "--label", "content"]);

    planner_cmd()
        .current_dir(dir.path())
        .args(["task", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: Landing copy"))
        .stdout(predicate::str::contains("Label: Content"))
        .stdout(predicate::str::contains("2026-10-22"));
}

#[test]
fn test_task_show_trims_typed_id() {
    let dir = setup_project();
    let id = add_task(&dir, &["Landing copy", "--date", "2026-10-22"]);

    planner_cmd()
        .current_dir(dir.path())
        .args(["task", "show", &format!("  {}  ", id)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: Landing copy"));
}

#[test]
fn test_month_rejects_far_years() {
    let dir = setup_project();

    planner_cmd()
        .current_dir(dir.path())
        .args(["month", "--month", "+262142-12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Date out of range"));
}

#[test]
fn test_task_show_not_found() {
    let dir = setup_project();

    planner_cmd()
        .current_dir(dir.path())
        .args(["task", "show", "t-missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task not found"));
}

#[test]
fn test_task_edit_updates_fields() {
    let dir = setup_project();
    let id = add_task(&dir, &["Draft", "--date", "2026-10-20"]);

    let json = run_json(&dir, &["task", "edit", &id, "--title", "Final", "--status", "done"]);
    assert_eq!(json["title"], "Final");
    assert_eq!(json["status"], "done");
    assert_eq!(json["date"], "2026-10-20");
}

#[test]
fn test_task_edit_rejects_blank_title() {
    let dir = setup_project();
    let id = add_task(&dir, &["Draft", "--date", "2026-10-20"]);

    planner_cmd()
        .current_dir(dir.path())
        .args(["task", "edit", &id, "--title", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task title cannot be empty"));

    let json = run_json(&dir, &["task", "show", &id]);
    assert_eq!(json["title"], "Draft");
}

#[test]
fn test_task_edit_requires_a_change() {
    let dir = setup_project();
    let id = add_task(&dir, &["Draft"]);

    planner_cmd()
        .current_dir(dir.path())
        .args(["task", "edit", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to change"));
}

#[test]
fn test_task_move_changes_only_date() {
    let dir = setup_project();
    let id = add_task(
        &dir,
        &[
            "Vendor call",
            "--date",
            "2026-10-20",
            "--label",
            "ops",
            "--status",
            "inprogress",
            "--notes",
            "bring contract",
        ],
    );

    let json = run_json(&dir, &["task", "move", &id, "2026-11-03"]);
    assert_eq!(json["id"], id.as_str());
    assert_eq!(json["date"], "2026-11-03");
    assert_eq!(json["title"], "Vendor call");
    assert_eq!(json["label"], "ops");
    assert_eq!(json["status"], "inprogress");
    assert_eq!(json["notes"], "bring contract");
}

#[test]
fn test_task_move_not_found() {
    let dir = setup_project();

    planner_cmd()
        .current_dir(dir.path())
        .args(["task", "move", "t-missing", "2026-11-03"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task not found"));
}

#[test]
fn test_task_delete() {
    let dir = setup_project();
    let id = add_task(&dir, &["Temporary"]);

    planner_cmd()
        .current_dir(dir.path())
        .args(["task", "delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted task"));

    planner_cmd()
        .current_dir(dir.path())
        .args(["task", "delete", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task not found"));
}

#[test]
fn test_task_list_orders_by_day_then_status_then_title() {
    let dir = setup_project();
    add_task(&dir, &["Apple", "--date", "2026-10-20", "--status", "done"]);
    add_task(&dir, &["Zebra", "--date", "2026-10-20"]);
    add_task(&dir, &["banana", "--date", "2026-10-20"]);
    add_task(&dir, &["Earlier", "--date", "2026-10-02", "--status", "done"]);

    let json = run_json(&dir, &["task", "list"]);
    let titles: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();

    assert_eq!(titles, vec!["Earlier", "banana", "Zebra", "Apple"]);
}

#[test]
fn test_task_list_month_scope() {
    let dir = setup_project();
    add_task(&dir, &["October", "--date", "2026-10-31"]);
    add_task(&dir, &["November", "--date", "2026-11-01"]);

    let json = run_json(&dir, &["task", "list", "--month", "2026-11"]);
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "November");
}

#[test]
fn test_task_list_text() {
    let dir = setup_project();
    add_task(&dir, &["Kickoff", "--date", "2026-10-20"]);

    planner_cmd()
        .current_dir(dir.path())
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2026-10-20"))
        .stdout(predicate::str::contains("Kickoff"));
}

// =============================================================================
// Filter Tests
// =============================================================================

#[test]
fn test_filter_set_and_show() {
    let dir = setup_project();

    let json = run_json(
        &dir,
        &["filter", "set", "--query", "hero", "--label", "dev", "--label", "ops"],
    );
    assert_eq!(json["query"], "hero");
    assert_eq!(json["labels"], serde_json::json!(["dev", "ops"]));
    assert_eq!(json["statuses"], serde_json::json!([]));

    planner_cmd()
        .current_dir(dir.path())
        .args(["filter", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("query=\"hero\""))
        .stdout(predicate::str::contains("labels=dev,ops"));
}

#[test]
fn test_filter_persists_as_lists() {
    let dir = setup_project();
    run_json(&dir, &["filter", "toggle-status", "done"]);

    let raw =
        fs::read_to_string(dir.path().join(".planner/month_planner_settings_v1.json")).unwrap();
    let blob: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(blob["statuses"], serde_json::json!(["done"]));
    assert_eq!(blob["labels"], serde_json::json!([]));
    assert_eq!(blob["query"], "");
}

#[test]
fn test_filter_toggle_twice_restores() {
    let dir = setup_project();

    let on = run_json(&dir, &["filter", "toggle-label", "design"]);
    assert_eq!(on["labels"], serde_json::json!(["design"]));

    let off = run_json(&dir, &["filter", "toggle-label", "design"]);
    assert_eq!(off["labels"], serde_json::json!([]));
}

#[test]
fn test_filter_rejects_unknown_key() {
    let dir = setup_project();

    planner_cmd()
        .current_dir(dir.path())
        .args(["filter", "toggle-label", "marketing"])
        .assert()
        .failure();
}

#[test]
fn test_filter_narrows_task_list() {
    let dir = setup_project();
    add_task(&dir, &["Hero banner", "--date", "2026-10-20", "--label", "design"]);
    add_task(&dir, &["Footer", "--date", "2026-10-20", "--label", "dev", "--notes", "hero link"]);
    add_task(&dir, &["Invoices", "--date", "2026-10-21", "--label", "ops"]);

    run_json(&dir, &["filter", "set", "--query", "HERO"]);
    let json = run_json(&dir, &["task", "list"]);
    assert_eq!(json.as_array().unwrap().len(), 2);

    run_json(&dir, &["filter", "set", "--label", "dev"]);
    let json = run_json(&dir, &["task", "list"]);
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Footer");

    let json = run_json(&dir, &["task", "list", "--no-filter"]);
    assert_eq!(json.as_array().unwrap().len(), 3);

    run_json(&dir, &["filter", "clear"]);
    let json = run_json(&dir, &["task", "list"]);
    assert_eq!(json.as_array().unwrap().len(), 3);
}

// =============================================================================
// Month and Day View Tests
// =============================================================================

#[test]
fn test_month_json_has_42_days() {
    let dir = setup_project();
    add_task(&dir, &["Review", "--date", "2015-02-10"]);

    let json = run_json(&dir, &["month", "--month", "2015-02"]);
    let days = json["days"].as_array().unwrap();

    assert_eq!(json["month"], "2015-02");
    assert_eq!(json["week_start"], "sunday");
    assert_eq!(days.len(), 42);
    assert_eq!(days[0]["date"], "2015-02-01");
    assert_eq!(days[41]["date"], "2015-03-14");

    let review = days.iter().find(|d| d["date"] == "2015-02-10").unwrap();
    assert_eq!(review["tasks"][0]["title"], "Review");
    assert_eq!(review["more"], 0);
}

#[test]
fn test_month_respects_week_start_config() {
    let dir = setup_project();
    let config_path = dir.path().join(".planner/config.toml");
    let config = fs::read_to_string(&config_path).unwrap();
    fs::write(
        &config_path,
        config.replace("week_start = \"sunday\"", "week_start = \"monday\""),
    )
    .unwrap();

    let json = run_json(&dir, &["month", "--month", "2015-02"]);
    let days = json["days"].as_array().unwrap();

    assert_eq!(json["week_start"], "monday");
    assert_eq!(days[0]["date"], "2015-01-26");
}

#[test]
fn test_month_text_shows_overflow() {
    let dir = setup_project();
    for title in ["One", "Two", "Three", "Four", "Five"] {
        add_task(&dir, &[title, "--date", "2026-10-14"]);
    }

    planner_cmd()
        .current_dir(dir.path())
        .args(["month", "--month", "2026-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("October 2026"))
        .stdout(predicate::str::contains("+2 more"));
}

#[test]
fn test_month_rejects_bad_month() {
    let dir = setup_project();

    planner_cmd()
        .current_dir(dir.path())
        .args(["month", "--month", "2026-13"])
        .assert()
        .failure();
}

#[test]
fn test_day_lists_full_bucket() {
    let dir = setup_project();
    for title in ["One", "Two", "Three", "Four", "Five"] {
        add_task(&dir, &[title, "--date", "2026-10-14"]);
    }

    let json = run_json(&dir, &["day", "2026-10-14"]);
    assert_eq!(json["date"], "2026-10-14");
    assert_eq!(json["tasks"].as_array().unwrap().len(), 5);

    planner_cmd()
        .current_dir(dir.path())
        .args(["day", "2026-10-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks"));
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_unknown_values_survive_edits() {
    let dir = setup_project();
    let tasks_path = dir.path().join(".planner/month_planner_tasks_v1.json");
    fs::write(
        &tasks_path,
        r#"[{"id":"legacy-1","title":"Old task","date":"2026-10-05","label":"marketing","status":"blocked","notes":null}]"#,
    )
    .unwrap();

    planner_cmd()
        .current_dir(dir.path())
        .args(["task", "show", "legacy-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("marketing (shown as Design)"));

    add_task(&dir, &["New task", "--date", "2026-10-06"]);

    let raw = fs::read_to_string(&tasks_path).unwrap();
    let tasks: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(tasks[0]["label"], "marketing");
    assert_eq!(tasks[0]["status"], "blocked");
    assert_eq!(tasks[0]["notes"], "");
}

#[test]
fn test_malformed_blob_is_an_error() {
    let dir = setup_project();
    fs::write(dir.path().join(".planner/month_planner_tasks_v1.json"), "{not json").unwrap();

    planner_cmd()
        .current_dir(dir.path())
        .args(["task", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("month_planner_tasks_v1"));
}

// =============================================================================
// Output Tests
// =============================================================================

#[test]
fn test_verbose_flag() {
    let dir = setup_project();

    planner_cmd()
        .current_dir(dir.path())
        .args(["--verbose", "month"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[verbose]"));
}

#[test]
fn test_json_success_message() {
    let dir = setup_project();
    let id = add_task(&dir, &["Temporary"]);

    let json = run_json(&dir, &["task", "delete", &id]);
    assert_eq!(json["deleted"], true);
    assert_eq!(json["id"], id.as_str());
}
