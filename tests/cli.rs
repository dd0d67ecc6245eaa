use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "pennywise";

fn pennywise(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("PENNYWISE_DATA_DIR", dir);
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_without_command_prints_hint() {
    let dir = TempDir::new().unwrap();
    pennywise(dir.path())
        .assert()
        .success()
        .stdout(contains("pennywise --help"));
}

#[test]
fn cli_lists_default_categories() {
    let dir = TempDir::new().unwrap();
    pennywise(dir.path())
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(contains("Categories (8):").and(contains("1. Food")));
}

#[test]
fn cli_category_add_and_duplicate() {
    let dir = TempDir::new().unwrap();

    pennywise(dir.path())
        .args(["category", "add", "Pets"])
        .assert()
        .success()
        .stdout(contains("Added category: Pets"));

    pennywise(dir.path())
        .args(["category", "add", "Pets"])
        .assert()
        .success()
        .stdout(contains("already exists"));

    pennywise(dir.path())
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(contains("9. Pets (custom)"));

    let saved = fs::read_to_string(dir.path().join("data").join("categories.json")).unwrap();
    assert!(saved.contains("\"Pets\""));
}

#[test]
fn cli_rename_onto_existing_fails() {
    let dir = TempDir::new().unwrap();
    pennywise(dir.path())
        .args(["category", "rename", "Food", "Bills"])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn cli_delete_missing_category_fails() {
    let dir = TempDir::new().unwrap();
    pennywise(dir.path())
        .args(["category", "delete", "Nope"])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn cli_distribute_then_reconcile_on_show() {
    let dir = TempDir::new().unwrap();

    pennywise(dir.path())
        .args(["budget", "distribute", "800", "--month", "2024-00"])
        .assert()
        .success()
        .stdout(contains("across 8 categories ($100.00 each)"));

    let saved = fs::read_to_string(dir.path().join("data").join("budgetData.json")).unwrap();
    assert!(saved.contains("\"2024-00\""));

    pennywise(dir.path())
        .args(["category", "delete", "Other"])
        .assert()
        .success();

    pennywise(dir.path())
        .args(["budget", "show", "--month", "2024-00"])
        .assert()
        .success()
        .stdout(
            contains("Redistributed $800.00 across 7 categories")
                .and(contains("Budget Overview - January 2024"))
                .and(contains("Other").not()),
        );
}

#[test]
fn cli_budget_set_and_clear() {
    let dir = TempDir::new().unwrap();

    pennywise(dir.path())
        .args(["budget", "set", "Food", "250", "--month", "March 2024"])
        .assert()
        .success()
        .stdout(contains("Budgeted $250.00 for Food in March 2024"));

    pennywise(dir.path())
        .args(["budget", "clear", "Food", "--month", "2024-02"])
        .assert()
        .success();

    pennywise(dir.path())
        .args(["budget", "set", "Food", "-5", "--month", "2024-02"])
        .assert()
        .failure();
}

#[test]
fn cli_rejects_invalid_month() {
    let dir = TempDir::new().unwrap();
    pennywise(dir.path())
        .args(["budget", "show", "--month", "2024-12"])
        .assert()
        .failure()
        .stderr(contains("out of range"));
}

#[test]
fn cli_expense_add_list_and_export() {
    let dir = TempDir::new().unwrap();

    pennywise(dir.path())
        .args([
            "expense", "add", "12.5", "Food", "--date", "2024-01-05", "--note", "lunch",
        ])
        .assert()
        .success()
        .stdout(contains("Recorded $12.50 for Food on 2024-01-05"));

    pennywise(dir.path())
        .args(["expense", "add", "30", "Bills", "--date", "2024-02-01"])
        .assert()
        .success();

    pennywise(dir.path())
        .args(["expense", "list", "--month", "2024-00"])
        .assert()
        .success()
        .stdout(
            contains("lunch")
                .and(contains("1 expense(s), total $12.50"))
                .and(contains("Bills").not()),
        );

    let output = dir.path().join("out.csv");
    pennywise(dir.path())
        .args(["expense", "export", "--from", "2024-01-01", "--to", "2024-01-31", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("Exported 1 expense(s)"));

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("Date,Amount,Category,Note\n"));
    assert!(csv.contains("2024-01-05,12.50,Food,lunch"));
}

fn record_expenses(dir: &Path, entries: &[(&str, &str, &str)]) {
    for &(amount, category, date) in entries {
        pennywise(dir)
            .args(["expense", "add", amount, category, "--date", date])
            .assert()
            .success();
    }
}

#[test]
fn cli_expense_list_date_filters() {
    let dir = TempDir::new().unwrap();
    record_expenses(
        dir.path(),
        &[
            ("4", "Food", "2024-01-03"),
            ("6", "Transport", "2024-01-10"),
            ("9", "Bills", "2024-02-20"),
        ],
    );

    pennywise(dir.path())
        .args(["expense", "list", "--date", "2024-01-10"])
        .assert()
        .success()
        .stdout(contains("Transport").and(contains("1 expense(s), total $6.00")));

    // A range may span months when no --month is given
    pennywise(dir.path())
        .args(["expense", "list", "--from", "2024-01-05", "--to", "2024-02-28"])
        .assert()
        .success()
        .stdout(contains("2 expense(s), total $15.00").and(contains("Food").not()));

    pennywise(dir.path())
        .args(["expense", "list", "--month", "2024-00", "--from", "2024-01-05"])
        .assert()
        .success()
        .stdout(contains("1 expense(s), total $6.00"));

    pennywise(dir.path())
        .args(["expense", "list", "--from", "2024-02-01", "--to", "2024-01-01"])
        .assert()
        .failure()
        .stderr(contains("is after end date"));

    pennywise(dir.path())
        .args(["expense", "list", "--date", "2024-01-10", "--from", "2024-01-01"])
        .assert()
        .failure();
}

#[test]
fn cli_expense_daily_totals() {
    let dir = TempDir::new().unwrap();
    record_expenses(
        dir.path(),
        &[
            ("4", "Food", "2024-01-03"),
            ("6", "Transport", "2024-01-03"),
            ("5", "Bills", "2024-01-09"),
        ],
    );

    pennywise(dir.path())
        .args(["expense", "daily", "--month", "2024-00"])
        .assert()
        .success()
        .stdout(
            contains("January 2024")
                .and(contains("2024-01-03"))
                .and(contains("$10.00"))
                .and(contains("Total $15.00 over 2 day(s)")),
        );

    pennywise(dir.path())
        .args(["expense", "daily", "--month", "2024-01"])
        .assert()
        .success()
        .stdout(contains("No expenses to display."));
}

#[test]
fn cli_expense_rejects_non_positive_amount() {
    let dir = TempDir::new().unwrap();
    pennywise(dir.path())
        .args(["expense", "add", "0", "Food", "--date", "2024-01-05"])
        .assert()
        .failure()
        .stderr(contains("positive"));
}

#[test]
fn cli_config_shows_paths() {
    let dir = TempDir::new().unwrap();
    pennywise(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(contains("Data directory:").and(contains("Auto reconcile:  true")));
}
