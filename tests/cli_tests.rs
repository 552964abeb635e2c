//! CLI integration tests using the REAL mobview binary

use assert_cmd::Command;
use predicates::prelude::*;

// cargo_bin is deprecated but still the reliable way to locate the binary
#[allow(deprecated)]
fn mobview_cmd() -> Command {
    Command::cargo_bin("mobview").unwrap()
}

#[test]
fn test_help_output() {
    mobview_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--host"))
        .stdout(predicate::str::contains("--mob"))
        .stdout(predicate::str::contains("--property"))
        .stdout(predicate::str::contains("--property-list"))
        .stdout(predicate::str::contains("--methods"))
        .stdout(predicate::str::contains("--target"));
}

#[test]
fn test_version_output() {
    mobview_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mobview"));
}

#[test]
fn test_host_is_required() {
    mobview_cmd()
        .args(["--mob", "Datastore"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--host"));
}

#[test]
fn test_mob_is_required() {
    mobview_cmd()
        .args(["--host", "vcenter.local"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--mob"));
}

#[test]
fn test_invalid_mob_kind_lists_choices() {
    mobview_cmd()
        .args(["--host", "vcenter.local", "--mob", "HostSystem"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Datacenter"))
        .stderr(predicate::str::contains("VirtualMachine"));
}

#[test]
fn test_display_modes_conflict() {
    mobview_cmd()
        .args([
            "--host",
            "vcenter.local",
            "--mob",
            "Folder",
            "--property-list",
            "--methods",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));

    mobview_cmd()
        .args([
            "--host",
            "vcenter.local",
            "--mob",
            "Folder",
            "--property",
            "name",
            "--methods",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
#[ignore = "Requires network access to a vCenter endpoint"]
fn test_unreachable_endpoint_fails_cleanly() {
    mobview_cmd()
        .args([
            "--host",
            "127.0.0.1",
            "--mob",
            "Datastore",
            "-p",
            "not-a-password",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
