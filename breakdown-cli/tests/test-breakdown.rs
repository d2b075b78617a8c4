// The report itself is covered by the library tests, these just check the
// command line contract: a report on stdout and exit code 0, or the usage
// line and exit code 1.

use std::io::Write;
use std::process::{Command, Output, Stdio};

const USAGE: &str = "Usage: breakdown <SYMBOLS_STORAGE> <CRASH_DUMP>\n";

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_breakdown"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .unwrap()
}

#[test]
fn test_missing_dump() {
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("missing.dmp");
    let output = run(&[dir.path().to_str().unwrap(), dump.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8(output.stdout).unwrap(), USAGE);
}

#[test]
fn test_garbage_dump() {
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("garbage.dmp");
    std::fs::File::create(&dump)
        .unwrap()
        .write_all(b"MDMP but not really")
        .unwrap();

    for format in ["--xml", "--json"] {
        let output = run(&[dir.path().to_str().unwrap(), dump.to_str().unwrap(), format]);
        assert_eq!(output.status.code(), Some(1));
        assert_eq!(String::from_utf8(output.stdout).unwrap(), USAGE);
    }
}

#[test]
fn test_failure_is_logged() {
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("missing.dmp");
    let log = dir.path().join("breakdown.log");
    let output = run(&[
        dir.path().to_str().unwrap(),
        dump.to_str().unwrap(),
        "--verbose=debug",
        "--log-file",
        log.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8(output.stderr).unwrap(), "");
    let log = std::fs::read_to_string(log).unwrap();
    assert!(log.contains("ReadError"), "log was:\n{log}");
    assert!(log.contains("Failed"), "log was:\n{log}");
}

#[test]
fn test_missing_arguments() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("breakdown <SYMBOLS_STORAGE> <CRASH_DUMP>"));
}

#[test]
fn test_pretty_requires_json() {
    let output = run(&["symbols", "crash.dmp", "--pretty"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_help() {
    let output = run(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("<SYMBOLS_STORAGE>"));
    assert!(stdout.contains("--max-frames"));
}
