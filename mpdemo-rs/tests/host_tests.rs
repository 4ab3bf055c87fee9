/// End-to-end tests: run the `mpdemo` binary and check its console output,
/// stderr diagnostics and exit status.

use std::process::{Command, Output};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Path to the `mpdemo` binary built by this Cargo workspace.
fn binary() -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_BIN_EXE_mpdemo"))
}

fn run(args: &[&str]) -> Output {
    Command::new(binary())
        .args(args)
        .env_remove("MPDEMO_HEAP_SIZE")
        .output()
        .expect("failed to spawn mpdemo")
}

fn stdout_lines(out: &Output) -> Vec<String> {
    String::from_utf8_lossy(&out.stdout)
        .lines()
        .map(str::to_owned)
        .collect()
}

fn routine_lines() -> Vec<String> {
    let mut lines: Vec<String> = (0..10).map(|i| format!("iter {i:08}")).collect();
    lines.push("caught exception ZeroDivisionError('divide by zero')".to_owned());
    lines.push("run GC collect".to_owned());
    lines.push("finish".to_owned());
    lines
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn script_only_output_is_exact() {
    let out = run(&["-s"]);
    assert!(out.status.success());
    assert_eq!(stdout_lines(&out), routine_lines());
    assert!(out.stderr.is_empty());
}

#[test]
fn caught_exception_on_line_eleven() {
    let out = run(&["-s"]);
    let lines = stdout_lines(&out);
    assert!(lines[10].contains("caught exception"));
}

#[test]
fn host_report() {
    let out = run(&[]);
    assert!(out.status.success());
    let lines = stdout_lines(&out);
    assert_eq!(lines.first().map(String::as_str), Some("(entering script)"));
    assert_eq!(lines[1..14], routine_lines()[..]);
    assert_eq!(lines[14], "(exited script)");
    assert!(lines.contains(&"f(5): 25".to_owned()));
    assert!(lines.contains(&"g(5): 3125".to_owned()));
    assert!(lines.contains(&"sum: 45".to_owned()));
    assert!(lines.contains(&"  'gc': <module 'gc'>".to_owned()));
}

#[test]
fn two_runs_print_the_same_sequence() {
    let out = run(&["-s", "-r", "2"]);
    assert!(out.status.success());
    let lines = stdout_lines(&out);
    assert_eq!(lines.len(), 26);
    assert_eq!(lines[..13], lines[13..]);
}

#[test]
fn tiny_heap_is_uncaught() {
    let out = run(&["-H64"]);
    assert_eq!(out.status.code(), Some(1));
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains("demo ran into an uncaught exception!"));
    assert!(err.contains("MemoryError"));
}

#[test]
fn heap_size_from_environment() {
    let out = Command::new(binary())
        .arg("-s")
        .env("MPDEMO_HEAP_SIZE", "64")
        .output()
        .expect("failed to spawn mpdemo");
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn debug_goes_to_stderr() {
    let out = run(&["-sd"]);
    assert!(out.status.success());
    assert_eq!(stdout_lines(&out), routine_lines());
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains("mpdemo: gc: pass 1"));
}

#[test]
fn output_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("console.txt");
    let out = run(&["-s", "-o", path.to_str().unwrap()]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<String> = text.lines().map(str::to_owned).collect();
    assert_eq!(lines, routine_lines());
}

#[test]
fn bad_flag_prints_usage() {
    let out = run(&["-x"]);
    assert_eq!(out.status.code(), Some(1));
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains("unknown option: -x"));
    assert!(err.contains("Usage: mpdemo"));
}
