#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn shifts(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("shifts").unwrap();
    cmd.current_dir(dir.path()).env("SHIFTS_ROOT", dir.path());
    cmd
}

fn init_roster(dir: &TempDir) {
    shifts(dir).arg("init").assert().success();
}

fn json(dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let out = shifts(dir).arg("--json").args(args).output().unwrap();
    assert!(
        out.status.success(),
        "command {args:?} failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    serde_json::from_slice(&out.stdout).unwrap()
}

fn add_staff(dir: &TempDir, name: &str) -> String {
    json(dir, &["staff", "add", name])["id"]
        .as_str()
        .unwrap()
        .to_string()
}

fn record_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join(".shifts/shift-manager-state.json")
}

// ---------------------------------------------------------------------------
// shifts init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_shifts_dir_and_config() {
    let dir = TempDir::new().unwrap();
    shifts(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized roster"));

    assert!(dir.path().join(".shifts").is_dir());
    assert!(dir.path().join(".shifts/config.yaml").exists());
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    shifts(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already initialized"));
}

#[test]
fn commands_require_init() {
    let dir = TempDir::new().unwrap();
    shifts(&dir)
        .args(["staff", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

// ---------------------------------------------------------------------------
// shifts staff
// ---------------------------------------------------------------------------

#[test]
fn staff_add_then_list() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    shifts(&dir)
        .args(["staff", "add", "Sato", "Hanako"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added staff"));

    shifts(&dir)
        .args(["staff", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sato Hanako"))
        .stdout(predicate::str::contains("active"));

    let list = json(&dir, &["staff", "list"]);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["isActive"], true);
    assert_eq!(list[0]["ngDays"], serde_json::json!([]));
}

#[test]
fn staff_add_rejects_blank_name() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    shifts(&dir)
        .args(["staff", "add", "   "])
        .assert()
        .failure();
}

#[test]
fn staff_deactivate_and_ng_days() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    add_staff(&dir, "Tanaka");

    shifts(&dir)
        .args(["staff", "deactivate", "Tanaka"])
        .assert()
        .success();
    shifts(&dir)
        .args(["staff", "ng-days", "Tanaka", "--add", "2024-01-10", "--add", "2024-01-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-05, 2024-01-10"));

    let list = json(&dir, &["staff", "list"]);
    assert_eq!(list[0]["isActive"], false);
    assert_eq!(list[0]["ngDays"], serde_json::json!(["2024-01-05", "2024-01-10"]));
}

#[test]
fn staff_remove_cascades() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    let id = add_staff(&dir, "Tanaka");
    add_staff(&dir, "Suzuki");

    shifts(&dir)
        .args(["pattern", "add", "Tanaka", "2024-01-01", "morning"])
        .assert()
        .success();
    shifts(&dir)
        .args(["pattern", "add", "Suzuki", "2024-01-01", "day"])
        .assert()
        .success();
    shifts(&dir)
        .args(["ng", "add", "Tanaka", "night", "3"])
        .assert()
        .success();
    shifts(&dir)
        .args(["weekly", "add", "Tanaka", "base", "morning,-,-,-,-,-,-"])
        .assert()
        .success();

    let removed = json(&dir, &["staff", "remove", &id]);
    assert_eq!(removed["removed"]["patterns"], 1);
    assert_eq!(removed["removed"]["ngShifts"], 1);
    assert_eq!(removed["removed"]["weeklyPatterns"], 1);

    let patterns = json(&dir, &["pattern", "list"]);
    assert_eq!(patterns.as_array().unwrap().len(), 1);
    assert_eq!(json(&dir, &["ng", "list"]), serde_json::json!([]));
    assert_eq!(json(&dir, &["weekly", "list"]), serde_json::json!([]));
}

#[test]
fn staff_remove_text_reports_template_and_history_counts() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    add_staff(&dir, "Tanaka");
    shifts(&dir)
        .args(["pattern", "add", "Tanaka", "2024-01-01", "morning"])
        .assert()
        .success();
    shifts(&dir)
        .args(["template", "save", "jan"])
        .assert()
        .success();

    shifts(&dir)
        .args(["staff", "remove", "Tanaka"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 template assignments"))
        .stdout(predicate::str::contains("1 history entries"));
}

// ---------------------------------------------------------------------------
// shifts pattern
// ---------------------------------------------------------------------------

#[test]
fn pattern_add_replaces_same_day() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    add_staff(&dir, "Tanaka");

    shifts(&dir)
        .args(["pattern", "add", "Tanaka", "2024-01-01", "morning"])
        .assert()
        .success();
    shifts(&dir)
        .args(["pattern", "add", "Tanaka", "2024-01-01", "②日勤"])
        .assert()
        .success()
        .stdout(predicate::str::contains("①朝番 -> ②日勤"));

    let patterns = json(&dir, &["pattern", "list"]);
    let patterns = patterns.as_array().unwrap();
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0]["shiftTime"], "②日勤");
    assert_eq!(patterns[0]["date"], "2024-01-01");
}

#[test]
fn pattern_add_rejects_unknown_shift() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    add_staff(&dir, "Tanaka");
    shifts(&dir)
        .args(["pattern", "add", "Tanaka", "2024-01-01", "brunch"])
        .assert()
        .failure();
}

#[test]
fn pattern_bulk_covers_inclusive_range() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    add_staff(&dir, "Tanaka");
    add_staff(&dir, "Suzuki");

    let outcome = json(
        &dir,
        &[
            "pattern", "bulk", "--staff", "Tanaka", "--staff", "Suzuki", "--from", "2024-01-01",
            "--to", "2024-01-03", "evening",
        ],
    );
    assert_eq!(outcome["inserted"], 6);

    let on_day = json(&dir, &["pattern", "list", "--date", "2024-01-02"]);
    assert_eq!(on_day.as_array().unwrap().len(), 2);
}

#[test]
fn pattern_bulk_rejects_reversed_range() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    add_staff(&dir, "Tanaka");
    shifts(&dir)
        .args([
            "pattern", "bulk", "--staff", "Tanaka", "--from", "2024-01-05", "--to", "2024-01-01",
            "day",
        ])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// shifts undo / redo
// ---------------------------------------------------------------------------

#[test]
fn undo_on_empty_history_is_noop() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    shifts(&dir)
        .arg("undo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to undo"));
}

#[test]
fn undo_restores_replaced_shift_and_redo_reapplies() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    add_staff(&dir, "Tanaka");
    shifts(&dir)
        .args(["pattern", "add", "Tanaka", "2024-01-01", "morning"])
        .assert()
        .success();
    shifts(&dir)
        .args(["pattern", "add", "Tanaka", "2024-01-01", "night"])
        .assert()
        .success();

    shifts(&dir).arg("undo").assert().success();
    let patterns = json(&dir, &["pattern", "list"]);
    assert_eq!(patterns[0]["shiftTime"], "①朝番");

    shifts(&dir).arg("redo").assert().success();
    let patterns = json(&dir, &["pattern", "list"]);
    assert_eq!(patterns[0]["shiftTime"], "⑤夜番");
}

// ---------------------------------------------------------------------------
// shifts template / weekly
// ---------------------------------------------------------------------------

#[test]
fn template_save_and_apply_at_anchor() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    add_staff(&dir, "Tanaka");
    shifts(&dir)
        .args(["pattern", "add", "Tanaka", "2024-01-01", "morning"])
        .assert()
        .success();
    shifts(&dir)
        .args(["pattern", "add", "Tanaka", "2024-01-03", "day"])
        .assert()
        .success();

    let saved = json(&dir, &["template", "save", "week", "one"]);
    let id = saved["id"].as_str().unwrap().to_string();
    assert_eq!(saved["patterns"], 2);

    let applied = json(&dir, &["template", "apply", &id, "2024-02-05"]);
    assert_eq!(applied["inserted"], 2);

    let feb = json(&dir, &["pattern", "list", "--date", "2024-02-07"]);
    assert_eq!(feb[0]["shiftTime"], "②日勤");
}

#[test]
fn template_apply_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    shifts(&dir)
        .args(["template", "apply", "nope", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn weekly_apply_writes_assigned_slots() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    add_staff(&dir, "Tanaka");
    shifts(&dir)
        .args(["weekly", "add", "Tanaka", "early", "morning,-,day,-,-,-,night-support"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added weekly pattern"));

    let outcome = json(&dir, &["weekly", "apply", "Tanaka", "early", "2024-01-01"]);
    assert_eq!(outcome["inserted"], 3);

    let dates: Vec<String> = json(&dir, &["pattern", "list"])
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["date"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(dates, ["2024-01-01", "2024-01-03", "2024-01-07"]);
}

#[test]
fn weekly_add_rejects_short_slot_list() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    add_staff(&dir, "Tanaka");
    shifts(&dir)
        .args(["weekly", "add", "Tanaka", "bad", "morning,day"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("7 comma-separated"));
}

// ---------------------------------------------------------------------------
// shifts ng
// ---------------------------------------------------------------------------

#[test]
fn ng_check_reports_conflicts() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    add_staff(&dir, "Tanaka");
    // 2024-01-01 is a Monday (day 1).
    shifts(&dir)
        .args(["ng", "add", "Tanaka", "morning", "1"])
        .assert()
        .success();
    shifts(&dir)
        .args(["pattern", "add", "Tanaka", "2024-01-01", "morning"])
        .assert()
        .success();

    let violations = json(&dir, &["ng", "check"]);
    assert_eq!(violations.as_array().unwrap().len(), 1);
    assert_eq!(violations[0]["reason"]["kind"], "ng_shift");
}

#[test]
fn ng_add_rejects_bad_weekday() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    add_staff(&dir, "Tanaka");
    shifts(&dir)
        .args(["ng", "add", "Tanaka", "morning", "7"])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// shifts summary / calendar
// ---------------------------------------------------------------------------

#[test]
fn summary_counts_month_only() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    add_staff(&dir, "Tanaka");
    for (date, shift) in [
        ("2024-01-01", "morning"),
        ("2024-01-02", "morning"),
        ("2024-01-03", "day"),
        ("2024-02-01", "day"),
    ] {
        shifts(&dir)
            .args(["pattern", "add", "Tanaka", date, shift])
            .assert()
            .success();
    }

    let report = json(&dir, &["summary", "2024", "1"]);
    let row = &report["staff"][0];
    assert_eq!(row["total"], 3);
    assert_eq!(row["counts"]["①朝番"], 2);
    assert_eq!(row["counts"]["②日勤"], 1);
    assert_eq!(row["counts"]["⑥夜支援員"], 0);
}

#[test]
fn summary_rejects_bad_month() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    shifts(&dir)
        .args(["summary", "2024", "13"])
        .assert()
        .failure();
}

#[test]
fn calendar_lists_every_day() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    let days = json(&dir, &["calendar", "2024", "2"]);
    assert_eq!(days.as_array().unwrap().len(), 29);
}

// ---------------------------------------------------------------------------
// persistence / reset / config
// ---------------------------------------------------------------------------

#[test]
fn state_is_saved_as_versioned_envelope() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    add_staff(&dir, "Tanaka");

    let text = std::fs::read_to_string(record_path(&dir)).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["version"], 1);
    assert_eq!(doc["state"]["staff"][0]["name"], "Tanaka");
}

#[test]
fn corrupt_record_loads_as_empty() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    std::fs::write(record_path(&dir), "{not json").unwrap();

    assert_eq!(json(&dir, &["staff", "list"]), serde_json::json!([]));
}

#[test]
fn reset_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    add_staff(&dir, "Tanaka");

    shifts(&dir).arg("reset").assert().failure();
    assert_eq!(json(&dir, &["staff", "list"]).as_array().unwrap().len(), 1);

    shifts(&dir).args(["reset", "--yes"]).assert().success();
    assert!(!record_path(&dir).exists());
    assert_eq!(json(&dir, &["staff", "list"]), serde_json::json!([]));
}

#[test]
fn config_validate_default_is_clean() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    shifts(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));
}

#[test]
fn config_validate_flags_bad_storage_key() {
    let dir = TempDir::new().unwrap();
    init_roster(&dir);
    std::fs::write(
        dir.path().join(".shifts/config.yaml"),
        "version: 1\nstorage:\n  key: ../escape\n",
    )
    .unwrap();
    shifts(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[error] storage.key"));
}

#[test]
fn escaping_storage_key_is_rejected_before_writing() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("ward");
    std::fs::create_dir(&root).unwrap();
    let mut cmd = Command::cargo_bin("shifts").unwrap();
    cmd.current_dir(&root).env("SHIFTS_ROOT", &root).arg("init").assert().success();
    std::fs::write(
        root.join(".shifts/config.yaml"),
        "version: 1\nstorage:\n  key: ../escaped\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("shifts").unwrap();
    cmd.current_dir(&root)
        .env("SHIFTS_ROOT", &root)
        .args(["staff", "add", "Tanaka"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("storage key"));

    assert!(!root.join("escaped.json").exists());
    assert!(!root.join(".shifts/escaped.json").exists());
    assert!(!dir.path().join("escaped.json").exists());
}
