#![allow(deprecated)]

use std::path::PathBuf;

use assert_cmd::Command;

fn fixture_root(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("java")
        .join(name)
}

fn jstruct() -> Command {
    let mut cmd = Command::cargo_bin("jstruct").expect("binary exists");
    cmd.env("CLICOLOR", "0").env("NO_COLOR", "1");
    cmd
}

#[test]
fn check_reports_problems_and_succeeds() {
    let assert = jstruct()
        .arg("check")
        .arg(fixture_root("catalog"))
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();

    assert!(stdout.contains("module-info.java"), "{stdout}");
    assert!(stdout.contains("implements Serializable"), "{stdout}");
    assert!(stdout.contains("extends com.example.legacy.Config"), "{stdout}");
}

#[test]
fn list_from_dot_keeps_packages() {
    let assert = jstruct()
        .current_dir(fixture_root("catalog"))
        .args(["list", "--package", "legacy", "--json", "."])
        .assert()
        .success();
    let listed: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("json on stdout");

    let entries = listed.as_array().expect("array of entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["name"], "Config");
    assert_eq!(entries[0]["relative_package"], serde_json::json!(["com", "example", "legacy"]));
}

#[test]
fn missing_root_exits_with_an_error() {
    let missing = fixture_root("no-such-tree");
    let assert = jstruct().arg("list").arg(&missing).assert().failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();

    assert!(stderr.contains("does not exist"), "{stderr}");
}

#[test]
fn file_root_exits_with_an_error() {
    let file = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
    let assert = jstruct().arg("check").arg(&file).assert().failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();

    assert!(stderr.contains("is not a directory"), "{stderr}");
}
