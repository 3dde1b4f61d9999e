use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn script_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("category_manager_cli").unwrap();
    cmd.env("CATEGORY_MANAGER_CLI_SCRIPT", "1")
        .env("CATEGORY_MANAGER_HOME", home.path())
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn script_mode_creates_and_lists_categories() {
    let home = TempDir::new().unwrap();
    script_cmd(&home)
        .write_stdin("add Groceries\nadd Salary type=income color=#22c55e\nlist\nexit\n")
        .assert()
        .success()
        .stdout(contains("Category created successfully"))
        .stdout(contains("Groceries"))
        .stdout(contains("Income"));

    let json = fs::read_to_string(home.path().join("categories.json")).unwrap();
    assert!(json.contains("\"Groceries\""));
    assert!(json.contains("\"#22c55e\""));
}

#[test]
fn empty_store_shows_empty_state() {
    let home = TempDir::new().unwrap();
    script_cmd(&home)
        .write_stdin("list\nexit\n")
        .assert()
        .success()
        .stdout(contains("No categories yet"))
        .stdout(contains("Create your first category to organize your transactions"));
}

#[test]
fn delete_confirms_automatically_in_script_mode() {
    let home = TempDir::new().unwrap();
    script_cmd(&home)
        .write_stdin("add Rent\ndelete 1\nexit\n")
        .assert()
        .success()
        .stdout(contains("Category deleted successfully"))
        .stdout(contains("No categories yet"));
}

#[test]
fn default_categories_are_not_deleted() {
    let home = TempDir::new().unwrap();
    script_cmd(&home)
        .write_stdin("add Main default=true\ndelete 1\nexit\n")
        .assert()
        .success()
        .stdout(contains("Default categories cannot be deleted."))
        .stdout(contains("Category deleted successfully").not());
}

#[test]
fn invalid_form_stays_open_until_fixed() {
    let home = TempDir::new().unwrap();
    script_cmd(&home)
        .write_stdin("add\nlist\nset name Travel\nsave\nexit\n")
        .assert()
        .success()
        .stdout(contains("Please enter a category name"))
        .stdout(contains("A category form is open").not())
        .stdout(contains("Category created successfully"));
}

#[test]
fn mutations_are_refused_while_a_form_is_open() {
    let home = TempDir::new().unwrap();
    script_cmd(&home)
        .write_stdin("add\ndelete 1\ncancel\nexit\n")
        .assert()
        .success()
        .stdout(contains("A category form is open"));
}

#[test]
fn bad_arguments_print_usage() {
    let home = TempDir::new().unwrap();
    script_cmd(&home)
        .write_stdin("add Food type=transfer\nexit\n")
        .assert()
        .success()
        .stdout(contains("unknown category type `transfer`"))
        .stdout(contains("Usage: add"));
}

#[test]
fn unknown_command_suggests_nearest() {
    let home = TempDir::new().unwrap();
    script_cmd(&home)
        .write_stdin("lst\nexit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `lst`"))
        .stdout(contains("Suggestion: `list`?"));
}

#[test]
fn version_reports_package_version() {
    let home = TempDir::new().unwrap();
    let pattern = format!(r"category_manager {} \(", regex::escape(env!("CARGO_PKG_VERSION")));
    script_cmd(&home)
        .write_stdin("version\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::is_match(pattern).unwrap());
}

#[test]
fn config_changes_persist_across_runs() {
    let home = TempDir::new().unwrap();
    script_cmd(&home)
        .write_stdin("config plain on\nexit\n")
        .assert()
        .success()
        .stdout(contains("plain set to on."));

    let json = fs::read_to_string(home.path().join("config.json")).unwrap();
    assert!(json.contains("\"plain_mode\": true"));

    script_cmd(&home)
        .write_stdin("config\nexit\n")
        .assert()
        .success()
        .stdout(contains("=== Configuration ==="))
        .stdout(predicate::str::is_match(r"plain\s+on").unwrap())
        .stdout(predicate::str::is_match(r"screen-reader\s+off").unwrap());
}

#[test]
fn config_rejects_unknown_settings() {
    let home = TempDir::new().unwrap();
    script_cmd(&home)
        .write_stdin("config colors on\nexit\n")
        .assert()
        .success()
        .stdout(contains("unknown setting `colors`"))
        .stdout(contains("Usage: config"));
    assert!(!home.path().join("config.json").exists());
}

#[test]
fn aliases_and_comments_in_scripts() {
    let home = TempDir::new().unwrap();
    script_cmd(&home)
        .write_stdin("# seed one category\n\nnew \"Eating out\"\nls\nrm 1\nquit\nlist\n")
        .assert()
        .success()
        .stdout(contains("Eating out"))
        .stdout(contains("Category deleted successfully"))
        .stdout(contains("Unknown command").not());
}
