//! Integration tests for commands that need no Notion access

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn notion_cmd(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("notion-mcp").unwrap();
    cmd.env_remove("NOTION_TOKEN")
        .env_remove("NOTION_MCP_PAGE_SIZE")
        .env_remove("NOTION_MCP_TIMEOUT")
        .env_remove("NOTION_API_BASE_URL")
        .arg("--config")
        .arg(config_dir.path().join("config.yml"));
    cmd
}

#[test]
fn test_tools_catalog() {
    let dir = TempDir::new().unwrap();
    let output = notion_cmd(&dir).arg("tools").output().unwrap();
    assert!(output.status.success());

    let catalog: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = catalog["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "notion_search",
            "notion_create_page",
            "notion_update_page",
            "notion_append_block"
        ]
    );
}

#[test]
fn test_resources_catalog() {
    let dir = TempDir::new().unwrap();
    notion_cmd(&dir)
        .arg("resources")
        .assert()
        .success()
        .stdout(predicate::str::contains("notion://workspace"));
}

#[test]
fn test_search_without_token_fails() {
    let dir = TempDir::new().unwrap();
    notion_cmd(&dir)
        .args(["search", "meeting"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Notion token is required"));
}

#[test]
fn test_append_rejects_unknown_block_type() {
    let dir = TempDir::new().unwrap();
    notion_cmd(&dir)
        .args(["--token", "t", "append", "page-1", "hello", "--type", "table"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown block type 'table'"));
}

#[test]
fn test_config_show_redacts_token() {
    let dir = TempDir::new().unwrap();
    notion_cmd(&dir)
        .args(["--token", "secret-token", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("***"))
        .stdout(predicate::str::contains("secret-token").not());
}

#[test]
fn test_config_init_round_trips_flags() {
    let dir = TempDir::new().unwrap();
    notion_cmd(&dir)
        .args(["--page-size", "25", "config", "init"])
        .assert()
        .success();
    assert!(dir.path().join("config.yml").exists());

    let output = notion_cmd(&dir).args(["config", "show"]).output().unwrap();
    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["default_page_size"], 25);
}
