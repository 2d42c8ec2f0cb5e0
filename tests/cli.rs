//
//  labctl
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use assert_cmd::Command;
use labctl::config::ConfigStore;
use mockito::{Mock, Server, ServerGuard};
use predicates::prelude::*;
use tempfile::TempDir;

fn labctl(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("labctl").unwrap();
    cmd.env("LABCTL_CONFIG_DIR", config_dir.path())
        .env_remove("LABCTL_TOKEN")
        .env_remove("LABCTL_STRICT")
        .env_remove("LABCTL_DEBUG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_config_set_then_show() {
    let dir = TempDir::new().unwrap();

    labctl(&dir)
        .args([
            "config",
            "set",
            "--token",
            "glpat-abcdefgh1234",
            "--domain",
            "https://gitlab.example.com",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("gitlab.example.com"));

    assert!(dir.path().join("labctl").join("Configuration.toml").is_file());

    labctl(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://gitlab.example.com"))
        .stdout(predicate::str::contains("1234"))
        .stdout(predicate::str::contains("glpat-abcdefgh").not());
}

#[test]
fn test_config_set_rejects_invalid_domain() {
    let dir = TempDir::new().unwrap();

    labctl(&dir)
        .args(["config", "set", "--token", "glpat-abc", "--domain", "not a url"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid domain"));

    assert!(!dir.path().join("labctl").join("Configuration.toml").exists());
}

#[test]
fn test_project_list_without_configuration() {
    let dir = TempDir::new().unwrap();

    labctl(&dir)
        .args(["project", "list"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("No configuration found"));
}

#[test]
fn test_config_path_points_into_config_dir() {
    let dir = TempDir::new().unwrap();

    labctl(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration.toml"));
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();

    labctl(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(labctl::VERSION));
}

/// A server that rejects the saved token, with credentials pointing at it.
fn unauthorized_server() -> (TempDir, ServerGuard, Mock) {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/v3/projects")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "401 Unauthorized"}"#)
        .create();

    let dir = TempDir::new().unwrap();
    ConfigStore::new(dir.path())
        .save("glpat-test-1234", &server.url())
        .unwrap();
    (dir, server, mock)
}

#[test]
fn test_api_error_is_a_warning_by_default() {
    let (dir, _server, mock) = unauthorized_server();

    labctl(&dir)
        .args(["project", "list", "--json"])
        .assert()
        .success()
        .code(0)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("401 Unauthorized"))
        .stderr(predicate::str::contains("/help/api"));

    mock.assert();
}

#[test]
fn test_api_error_fails_with_strict_flag() {
    let (dir, _server, _mock) = unauthorized_server();

    labctl(&dir)
        .args(["project", "list", "--strict"])
        .assert()
        .failure()
        .code(4)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("/help/api"));
}

#[test]
fn test_strict_environment_variable() {
    let (dir, _server, _mock) = unauthorized_server();

    labctl(&dir)
        .env("LABCTL_STRICT", "1")
        .args(["project", "list"])
        .assert()
        .failure()
        .code(4);

    labctl(&dir)
        .env("LABCTL_STRICT", "0")
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_strict_environment_variable_does_not_break_parsing() {
    let dir = TempDir::new().unwrap();

    for value in ["1", "true", "yes", "off", ""] {
        labctl(&dir)
            .env("LABCTL_STRICT", value)
            .arg("version")
            .assert()
            .success();
    }
}
