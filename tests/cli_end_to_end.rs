#![deny(clippy::all, clippy::pedantic)]

use std::io::Write;

use assert_cmd::Command;
use httpmock::MockServer;
use predicates::str::contains;
use serde_json::json;
use tempfile::{NamedTempFile, TempDir};

fn token_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tmp file");
    file.write_all(contents.as_bytes()).expect("write token");
    file
}

/// The binary with a clean environment and an empty working directory, so no
/// stray settings file or variable leaks into the run.
fn cloudadm(workdir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cloudadm"));
    cmd.current_dir(workdir.path());
    for var in [
        "CLOUDADM_ENDPOINT",
        "CLOUDADM_TOKEN",
        "CLOUDADM_TOKEN_FILE",
        "CLOUDADM_CONFIG_FILE",
        "CLOUDADM_REGION",
        "CLOUDADM_OUTPUT",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn disk_update_sends_only_the_given_field() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("PUT")
            .path("/compute/disks/d1")
            .header("X-Auth-Token", "e2e-token")
            .json_body(json!({"name": "x"}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"disk":{"id":"d1","name":"x"}}"#);
    });

    let workdir = TempDir::new().expect("tmp dir");
    let token = token_file("e2e-token\n");
    cloudadm(&workdir)
        .env("CLOUDADM_ENDPOINT", server.base_url())
        .env("CLOUDADM_TOKEN_FILE", token.path())
        .args(["--output", "json", "disk-update", "d1", "--name", "x"])
        .assert()
        .success()
        .stdout(contains("\"name\": \"x\""));
    mock.assert();
}

#[test]
fn empty_update_exits_one_without_calling_out() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("PUT").path("/compute/disks/d1");
        then.status(200).body("{}");
    });

    let workdir = TempDir::new().expect("tmp dir");
    cloudadm(&workdir)
        .env("CLOUDADM_ENDPOINT", server.base_url())
        .args(["disk-update", "d1"])
        .assert()
        .code(1)
        .stderr(contains("nothing-to-update"));
    mock.assert_calls(0);
}

#[test]
fn missing_required_flag_exits_two_and_names_it() {
    let workdir = TempDir::new().expect("tmp dir");
    cloudadm(&workdir)
        .env("CLOUDADM_ENDPOINT", "http://127.0.0.1:9")
        .args(["billcondition-list"])
        .assert()
        .code(2)
        .stderr(contains("argument error"))
        .stderr(contains("--query-type"));
}

#[test]
fn unknown_subcommand_exits_two() {
    let workdir = TempDir::new().expect("tmp dir");
    cloudadm(&workdir)
        .args(["disk-frobnicate"])
        .assert()
        .code(2)
        .stderr(contains("argument error"));
}

#[test]
fn module_list_runs_offline() {
    let workdir = TempDir::new().expect("tmp dir");
    cloudadm(&workdir)
        .args(["--output", "json", "module-list"])
        .assert()
        .success()
        .stdout(contains("\"alarmevents\""));
}

#[test]
fn missing_endpoint_is_a_config_error() {
    let workdir = TempDir::new().expect("tmp dir");
    cloudadm(&workdir)
        .args(["disk-list"])
        .assert()
        .code(1)
        .stderr(contains("config error: endpoint is required"));
}

#[test]
fn remote_errors_are_surfaced_with_the_resource() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/compute/disks/ghost");
        then.status(404).body("disk ghost not found");
    });

    let workdir = TempDir::new().expect("tmp dir");
    cloudadm(&workdir)
        .env("CLOUDADM_ENDPOINT", server.base_url())
        .args(["disk-show", "ghost"])
        .assert()
        .code(1)
        .stderr(contains("remote error: disk ghost: status 404"));
}
