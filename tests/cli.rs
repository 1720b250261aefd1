//! End-to-end tests for the `theme-rank` binary. None of them reach GitHub:
//! either the run stops before fetching, or the API url points at a closed
//! local port.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

const UNREACHABLE_API: &str = "http://127.0.0.1:1";

fn theme_rank() -> Command {
    let mut cmd = cargo_bin_cmd!("theme-rank");
    for var in [
        "HTTP_PROXY",
        "http_proxy",
        "HTTPS_PROXY",
        "https_proxy",
        "ALL_PROXY",
        "all_proxy",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn help() {
    theme_rank()
        .arg("--help")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("--token"));
}

#[test]
fn empty_token_aborts_before_reading_input() {
    let temp = assert_fs::TempDir::new().unwrap();
    let output = temp.child("theme-rank.txt");

    theme_rank()
        .current_dir(temp.path())
        .args(["--token", "", "--input", "does-not-exist.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("empty token"))
        .stderr(predicate::str::contains("does-not-exist.txt").not());

    output.assert(predicate::path::missing());
}

#[test]
fn missing_token_aborts() {
    let temp = assert_fs::TempDir::new().unwrap();

    theme_rank()
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("empty token"));
}

#[test]
fn unreadable_input_writes_nothing() {
    let temp = assert_fs::TempDir::new().unwrap();
    let output = temp.child("rank.txt");

    theme_rank()
        .current_dir(temp.path())
        .args(["--token", "t", "--input", "missing.txt", "--output", "rank.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing.txt"));

    output.assert(predicate::path::missing());
}

#[test]
fn failed_fetches_still_reported() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("themes.txt")
        .write_str("github.com/acme/widget\nffff\ngithub.com/acme/gadget/tree/main\n")
        .unwrap();

    theme_rank()
        .current_dir(temp.path())
        .args(["--token", "t", "--api-url", UNREACHABLE_API, "--timeout", "2"])
        .assert()
        .code(0)
        .stderr(predicate::str::contains("invalid line: ffff"))
        .stderr(predicate::str::contains("get repo err"));

    temp.child("theme-rank.txt")
        .assert("   0 github.com/acme/widget\n   0 github.com/acme/gadget/tree/main\n");
}

#[test]
fn settings_from_config_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("list.txt").write_str("a/b/c\n").unwrap();
    temp.child("theme-rank.toml")
        .write_str(&format!(
            "token = \"t\"\ninput = \"list.txt\"\noutput = \"out.txt\"\napi_url = \"{UNREACHABLE_API}\"\njobs = 2\n"
        ))
        .unwrap();

    theme_rank()
        .current_dir(temp.path())
        .args(["--config", "theme-rank.toml"])
        .assert()
        .code(0);

    temp.child("out.txt").assert("   0 a/b/c\n");
}

#[test]
fn no_valid_lines_truncates_output() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("themes.txt").write_str("ffff\n\nnot/enough\n").unwrap();
    let output = temp.child("theme-rank.txt");
    output.write_str("  99 old/report/line\n").unwrap();

    theme_rank()
        .current_dir(temp.path())
        .args(["--token", "t", "--api-url", UNREACHABLE_API])
        .assert()
        .code(0);

    output.assert("");
}

#[test]
fn unwritable_output_is_not_fatal() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("themes.txt").write_str("ffff\n").unwrap();

    theme_rank()
        .current_dir(temp.path())
        .args(["--token", "t", "--output", "no-such-dir/rank.txt"])
        .assert()
        .code(0)
        .stderr(predicate::str::contains("save to file err"));
}

#[test]
fn oversized_timeout_is_a_config_error() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("themes.txt").write_str("a/b/c\n").unwrap();

    theme_rank()
        .current_dir(temp.path())
        .args([
            "--token",
            "t",
            "--api-url",
            UNREACHABLE_API,
            "--timeout",
            "18446744073709551615",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid timeout"));

    temp.child("theme-rank.txt").assert(predicate::path::missing());
}

#[test]
fn unknown_log_level_is_rejected() {
    theme_rank()
        .args(["--token", "t", "--log-level", "garbage"])
        .assert()
        .code(2);
}
