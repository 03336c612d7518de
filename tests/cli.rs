//! Binary-level behavior.

use std::io::Write;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/test.cast")
}

#[test]
fn requires_a_file_argument() {
    Command::cargo_bin("castplay")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn reports_missing_recording() {
    Command::cargo_bin("castplay")
        .unwrap()
        .arg("no-such-file.cast")
        .assert()
        .failure()
        .stderr(predicate::str::contains("open recording"));
}

#[test]
fn reports_malformed_header() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "this is not a cast").unwrap();

    Command::cargo_bin("castplay")
        .unwrap()
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed header"));
}

#[test]
fn refuses_to_play_without_a_tty() {
    // The test harness pipes stdio, so the terminal setup must bail out.
    Command::cargo_bin("castplay")
        .unwrap()
        .arg(fixture_path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a terminal"));
}

#[test]
fn help_describes_the_flags() {
    Command::cargo_bin("castplay")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--speed"))
        .stdout(predicate::str::contains("--max-wait"))
        .stdout(predicate::str::contains("--ignore-size-check"));
}
