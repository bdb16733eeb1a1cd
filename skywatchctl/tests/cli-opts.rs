use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use httpmock::prelude::*;
use tempfile::TempDir;

const BIN: &str = "skywatchctl";

const STATES: &str = r##"{"time":1715370000,"states":[
["3c6444","DLH4AB  ","Germany",1715369999,1715369999,10.2,51.5,11000.0,false,230.0,0.0,0.0,null,11100.0,"1000",false,0],
["3f8aa1","GAF618  ","Germany",1715369999,1715369999,11.0,51.9,9000.0,false,210.0,0.0,0.0,null,9100.0,null,false,0],
["3c0000",null,"Germany",null,1715369999,null,null,null,false,null,null,null,null,null,null,false,0]
]}"##;

/// A clean command, nothing leaking from the caller's environment.
///
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    for var in [
        "TELEGRAM_TOKEN",
        "CHAT_ID",
        "GITHUB_EVENT_NAME",
        "OPENSKY_USERNAME",
        "OPENSKY_PASSWORD",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Configuration pointing at the mock server.
///
fn config(server: &MockServer) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let fname = dir.path().join("skywatch.hcl");
    let data = format!(
        r##"
version = 1
timeout = 5

opensky {{
  url   = "{base}"
  route = "/states/all"
}}

telegram {{
  url = "{base}"
}}

area {{
  name  = "Harz"
  south = 51.4
  west  = 10.0
  north = 52.0
  east  = 11.2
}}

home {{
  name = "Brocken"
  lat  = 51.7991
  lon  = 10.6156
}}
"##,
        base = server.base_url()
    );
    fs::write(&fname, data).unwrap();
    (dir, fname)
}

#[test]
fn test_empty_args() {
    cmd().assert().failure();
}

#[test]
fn test_help() {
    cmd().arg("-h").assert().success();
}

#[test]
fn test_version_opt() {
    cmd().arg("-V").assert().failure();
}

#[test]
fn test_version_keyword() {
    cmd().arg("version").assert().success();
}

#[test]
fn test_bad_keyword() {
    cmd().arg("bouh").assert().failure();
}

#[test]
fn test_completion() {
    cmd().arg("completion").arg("bash").assert().success();
}

#[test]
fn test_list_empty() {
    cmd().arg("list").assert().failure();
}

#[test]
fn test_list_locations() {
    let out = cmd().arg("list").arg("locations").assert().success();
    let stdout = String::from_utf8_lossy(&out.get_output().stdout).to_string();
    assert!(stdout.contains("Wernigerode"));
}

#[test]
fn test_list_rules() {
    let out = cmd().arg("list").arg("rules").assert().success();
    let stdout = String::from_utf8_lossy(&out.get_output().stdout).to_string();
    assert!(stdout.contains("near_range_km"));
}

#[test]
fn test_missing_config_file() {
    cmd()
        .arg("-c")
        .arg("/nonexistent/skywatch.hcl")
        .arg("planes")
        .arg("--dry-run")
        .assert()
        .failure();
}

#[test]
fn test_planes_missing_credentials() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(GET).path("/states/all");
        then.status(200).body(STATES);
    });
    let (_dir, fname) = config(&server);

    cmd().arg("-c").arg(&fname).arg("planes").assert().failure();

    // Aborted before any network call
    m.assert_hits(0);
}

#[test]
fn test_planes_unknown_home() {
    cmd()
        .arg("planes")
        .arg("--dry-run")
        .arg("--home")
        .arg("atlantis")
        .assert()
        .failure();
}

#[test]
fn test_planes_dry_run() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(GET)
            .path("/states/all")
            .query_param("lamin", "51.4")
            .query_param("lomax", "11.2");
        then.status(200).body(STATES);
    });
    let (_dir, fname) = config(&server);

    let out = cmd()
        .arg("-c")
        .arg(&fname)
        .arg("planes")
        .arg("--dry-run")
        .assert()
        .success();

    m.assert();
    let stdout = String::from_utf8_lossy(&out.get_output().stdout).to_string();
    assert!(stdout.contains("✈️ *HARZ RADAR*"));
    assert!(stdout.contains("*GAF618*"));
    assert!(!stdout.contains("DLH4AB"));
}

#[test]
fn test_planes_delivered() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/states/all");
        then.status(200).body(STATES);
    });
    let tg = server.mock(|when, then| {
        when.method(POST)
            .path("/bot123:ABC/sendMessage")
            .body_contains(r#""chat_id":"42""#)
            .body_contains("GAF618");
        then.status(200).body(r#"{"ok":true,"result":{}}"#);
    });
    let (_dir, fname) = config(&server);

    cmd()
        .env("TELEGRAM_TOKEN", "123:ABC")
        .env("CHAT_ID", "42")
        .arg("-c")
        .arg(&fname)
        .arg("planes")
        .assert()
        .success();

    tg.assert();
}

#[test]
fn test_planes_fetch_failure_is_silent() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/states/all");
        then.status(503);
    });
    let tg = server.mock(|when, then| {
        when.method(POST).path("/bot123:ABC/sendMessage");
        then.status(200).body(r#"{"ok":true,"result":{}}"#);
    });
    let (_dir, fname) = config(&server);

    cmd()
        .env("TELEGRAM_TOKEN", "123:ABC")
        .env("CHAT_ID", "42")
        .env("GITHUB_EVENT_NAME", "workflow_dispatch")
        .arg("-c")
        .arg(&fname)
        .arg("planes")
        .assert()
        .success();

    tg.assert_hits(0);
}

#[test]
fn test_planes_diagnostic_no_traffic() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/states/all");
        then.status(200).body(r#"{"time":1715370000,"states":null}"#);
    });
    let (_dir, fname) = config(&server);

    let out = cmd()
        .arg("-c")
        .arg(&fname)
        .arg("planes")
        .arg("--test")
        .arg("--dry-run")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&out.get_output().stdout).to_string();
    assert!(stdout.contains("PLANE-BOT TEST"));
}
