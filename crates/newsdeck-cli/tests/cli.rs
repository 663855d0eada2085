//! CLI smoke tests: argument surface and the offline blog workflow.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn newsdeck(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("newsdeck").expect("binary should build");
    cmd.env("NEWSDECK_DATA_DIR", data_dir.path());
    cmd.env("NEWSDECK_CONFIG_DIR", data_dir.path());
    cmd
}

#[test]
fn help_lists_all_commands() {
    let temp = TempDir::new().unwrap();
    newsdeck(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("news"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("weather"))
        .stdout(predicate::str::contains("blog"));
}

#[test]
fn news_without_api_key_fails_with_hint() {
    let temp = TempDir::new().unwrap();
    newsdeck(&temp)
        .args(["news", "technology"])
        .env_remove("NEWSDECK_NEWS_API_KEY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("NEWSDECK_NEWS_API_KEY"));
}

#[test]
fn blog_crud_round_trip() {
    let temp = TempDir::new().unwrap();

    newsdeck(&temp)
        .args(["blog", "add", "First post", "Hello from the test suite."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created post 1"));

    newsdeck(&temp)
        .args(["blog", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("First post"));

    newsdeck(&temp)
        .args(["blog", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello from the test suite."));

    newsdeck(&temp)
        .args(["blog", "edit", "1", "--title", "Renamed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed"));

    newsdeck(&temp)
        .args(["blog", "rm", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed post 1"));

    newsdeck(&temp)
        .args(["blog", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No posts yet"));
}

#[test]
fn blog_list_supports_json_output() {
    let temp = TempDir::new().unwrap();

    newsdeck(&temp)
        .args(["blog", "add", "JSON post", "body", "--image", "cover.png"])
        .assert()
        .success();

    newsdeck(&temp)
        .args(["blog", "list", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"JSON post\""))
        .stdout(predicate::str::contains("\"image\": \"cover.png\""));
}

#[test]
fn blog_stats_reports_budget() {
    let temp = TempDir::new().unwrap();
    newsdeck(&temp)
        .args(["blog", "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("% of budget"));
}

#[test]
fn overlong_blog_title_is_rejected() {
    let temp = TempDir::new().unwrap();
    let long_title = "x".repeat(61);
    newsdeck(&temp)
        .args(["blog", "add", &long_title, "body"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("60"));
}
