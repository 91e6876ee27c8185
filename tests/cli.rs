//! Runs the `membrane_fdm` binary and checks its exit codes and stdout.
use std::process::{Command, Output};

const USAGE_FIRST_LINE: &str = "RuntimeError: Wrong inputs";

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_membrane_fdm"))
        .args(args)
        .env("RUST_LOG", "trace")
        .output()
        .expect("failed to launch membrane_fdm")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn wrong_argument_count_prints_usage_and_exits_1() {
    for args in [&[][..], &["1", "2"][..], &["-x", "--foo"][..]] {
        let output = run(args);
        assert_eq!(output.status.code(), Some(1), "args {:?}", args);
        let text = stdout(&output);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2, "args {:?}: {:?}", args, text);
        assert_eq!(lines[0], USAGE_FIRST_LINE);
        assert!(lines[1].starts_with("Correct Format: "));
        assert!(lines[1].ends_with(" <number of iterations>"));
    }
}

#[test]
fn malformed_count_runs_nothing() {
    for arg in ["abc", "-3", "-x", "--foo", "-3abc", "--", ""] {
        let output = run(&[arg]);
        assert_eq!(output.status.code(), Some(0), "arg {:?}", arg);
        assert!(output.stdout.is_empty(), "arg {:?}: {:?}", arg, stdout(&output));
    }
}

#[test]
fn prints_one_snapshot_per_iteration() {
    for k in [1usize, 4, 7] {
        let count = k.to_string();
        let output = run(&[count.as_str()]);
        assert_eq!(output.status.code(), Some(0));
        let text = stdout(&output);
        // trace logging is on, none of it may reach stdout
        for line in text.lines() {
            assert!(line.starts_with("Size of grid: ") || line.starts_with('('), "{:?}", line);
        }
        assert_eq!(text.matches("Size of grid: 16 nodes\n").count(), k);
        assert_eq!(text.lines().count(), k * 5);
        assert!(!output.stderr.is_empty());
    }
}

#[test]
fn trailing_garbage_keeps_leading_count() {
    let output = run(&["2xyz"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output).matches("Size of grid").count(), 2);
}
