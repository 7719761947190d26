#![cfg(unix)]

mod common;

use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use predicates::prelude::*;

use common::TestFixture;

const FAILING_THEN_PASSING: &str = r#"
[[check]]
name = "always fails"
command = ["false"]
pass_paths = false

[[check]]
name = "always passes"
command = ["true"]
"#;

#[test]
fn fail_fast_leaves_later_checks_not_run() {
    let fixture = TestFixture::new();
    fixture.create_config(FAILING_THEN_PASSING);

    presubmit_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("2 checks on 1 file: 1 failed, 1 not run"));
}

#[test]
fn keep_going_runs_every_check() {
    let fixture = TestFixture::new();
    fixture.create_config(FAILING_THEN_PASSING);

    presubmit_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never", "--keep-going"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("2 checks on 1 file: 1 passed, 1 failed"));
}

#[test]
fn keep_going_from_config() {
    let fixture = TestFixture::new();
    fixture.create_config(&format!("[run]\nkeep_going = true\n{FAILING_THEN_PASSING}"));

    presubmit_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1 passed, 1 failed"));
}

#[test]
fn command_output_lands_in_step_log() {
    let fixture = TestFixture::new();
    fixture.create_config(
        r#"
[[check]]
name = "Shout!"
command = ["sh", "-c", "echo checked \"$@\"; exit 1", "sh"]
endswith = [".txt"]
"#,
    );
    fixture.add_file("notes.txt", "hello\n");

    presubmit_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never"])
        .assert()
        .code(1);

    let log = fixture.read(".presubmit/shout_/step.log");
    assert!(log.contains("checked notes.txt"));
    assert!(log.contains("Failed with return code 1"));
}

#[test]
fn no_config_falls_back_to_builtins() {
    let fixture = TestFixture::new();
    fixture.create_config(FAILING_THEN_PASSING);
    fixture.add_file("a.h", "#pragma once\n");

    presubmit_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never", "--no-config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pragma_once"));
}

#[test]
fn invalid_config_exits_before_running_anything() {
    let fixture = TestFixture::new();
    fixture.create_config("[[check]]\nname = \"broken\"\n");

    presubmit_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("check[0]"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn explicit_config_file() {
    let fixture = TestFixture::new();
    fixture.add_file("a.h", "#pragma once\n");
    fixture.create_file(
        "ci/presubmit.toml",
        "[[check]]\nname = \"ok\"\ncommand = [\"true\"]\n",
    );

    presubmit_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never", "--config", "ci/presubmit.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1/1   ok"));
}

#[test]
fn interrupt_cancels_the_running_check_and_prints_summary() {
    let fixture = TestFixture::new();
    fixture.create_config(
        r#"
[[check]]
name = "slow"
command = ["sh", "-c", "touch started && exec sleep 30"]
pass_paths = false

[[check]]
name = "after"
command = ["true"]
"#,
    );

    let child = Command::new(assert_cmd::cargo::cargo_bin!("presubmit-guard"))
        .current_dir(fixture.path())
        .args(["--color", "never"])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    let marker = fixture.path().join("started");
    let deadline = Instant::now() + Duration::from_secs(20);
    while !marker.exists() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(20));
    }
    assert!(marker.exists(), "slow check never started");

    let status = Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("CANCEL"), "stdout: {stdout}");
    assert!(stdout.contains("2 checks on 1 file: 2 not run"), "stdout: {stdout}");
    assert!(!stdout.contains("after"), "stdout: {stdout}");
}
