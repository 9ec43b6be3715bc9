//! Integration tests for the sheetcalc binary

use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::process::Command;

fn run_in(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_sheetcalc"))
        .current_dir(dir)
        // Tests must not pick up a user's ~/.config/sheetcalc/config.toml.
        .env("XDG_CONFIG_HOME", dir)
        .env("HOME", dir)
        .args(args)
        .output()
        .expect("Failed to execute sheetcalc");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

const SHEET: &str = "2\t3\t4\t=A1+B1*C1\n=10-A1-B1\t\t=B2\t=Z9\n=A3\t=A3+1\t=D1 / 2\t8\n";
const EVALUATED: &str = "2\t3\t4\t14\n5\t\t#NAN\t#NAN\n#ERROR\t#ERROR\t7\t8\n";

#[test]
fn test_default_file_names() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("spreadsheet.txt"), SHEET).unwrap();

    let (_, stderr, code) = run_in(dir.path(), &[]);
    assert_eq!(code, 0, "{stderr}");

    let output = fs::read_to_string(dir.path().join("output.txt")).unwrap();
    assert_eq!(output, EVALUATED);
}

#[test]
fn test_explicit_input_and_stdout() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.tsv"), SHEET).unwrap();

    let (stdout, _, code) = run_in(dir.path(), &["in.tsv", "-o", "-"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, EVALUATED);
    assert!(!dir.path().join("output.txt").exists());
}

#[test]
fn test_output_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.tsv"), SHEET).unwrap();

    let (_, _, code) = run_in(dir.path(), &["in.tsv", "-o", "once.tsv"]);
    assert_eq!(code, 0);
    let (_, _, code) = run_in(dir.path(), &["once.tsv", "-o", "twice.tsv"]);
    assert_eq!(code, 0);

    let once = fs::read_to_string(dir.path().join("once.tsv")).unwrap();
    let twice = fs::read_to_string(dir.path().join("twice.tsv")).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_literal_grid_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let content = "1\t2\t3\n\t5\t6\n7\t\t9\n";
    fs::write(dir.path().join("in.tsv"), content).unwrap();

    let (stdout, _, code) = run_in(dir.path(), &["in.tsv", "-o", "-"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, content);
}

#[test]
fn test_jagged_rows_are_padded() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.tsv"), "1\n2\t3\t=A1+B2\n").unwrap();

    let (stdout, _, code) = run_in(dir.path(), &["in.tsv", "-o", "-"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "1\t\t\t\n2\t3\t4\n");
}

#[test]
fn test_custom_delimiter_flag() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.csv"), "6,7,=a1*b1\n").unwrap();

    let (stdout, _, code) = run_in(dir.path(), &["in.csv", "-d", ",", "-o", "-"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "6,7,42\n");
}

#[test]
fn test_config_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("data.txt"), "1;=A1+1\n").unwrap();
    fs::write(
        dir.path().join("calc.toml"),
        "input = \"data.txt\"\noutput = \"result.txt\"\ndelimiter = \";\"\n",
    )
    .unwrap();

    let (_, stderr, code) = run_in(dir.path(), &["--config", "calc.toml"]);
    assert_eq!(code, 0, "{stderr}");
    let output = fs::read_to_string(dir.path().join("result.txt")).unwrap();
    assert_eq!(output, "1;2\n");
}

#[cfg(target_os = "linux")]
#[test]
fn test_user_config_dir_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join("sheetcalc");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "delimiter = \",\"\n").unwrap();
    fs::write(dir.path().join("spreadsheet.txt"), "1,=A1*5\n").unwrap();

    let (stdout, _, code) = run_in(dir.path(), &["-o", "-"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "1,5\n");
}

#[test]
fn test_flags_override_config_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.tsv"), "=A1\n").unwrap();
    fs::write(dir.path().join("calc.toml"), "output = \"ignored.txt\"\n").unwrap();

    let (stdout, _, code) = run_in(dir.path(), &["-c", "calc.toml", "in.tsv", "-o", "-"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "#ERROR\n");
    assert!(!dir.path().join("ignored.txt").exists());
}

#[test]
fn test_division_by_zero_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.tsv"), "0\t=5/A1\n").unwrap();

    let (_, stderr, code) = run_in(dir.path(), &["in.tsv"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Division by zero in B1"), "{stderr}");
    assert!(!dir.path().join("output.txt").exists());
}

#[test]
fn test_malformed_cell_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.tsv"), "1\tabc\n").unwrap();

    let (_, stderr, code) = run_in(dir.path(), &["in.tsv"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("line 1, cell 2"), "{stderr}");
}

#[test]
fn test_missing_input_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_in(dir.path(), &["nope.tsv"]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("Error:"), "{stderr}");
    assert!(stderr.contains("nope.tsv"), "{stderr}");
}

#[test]
fn test_max_depth_flag() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.tsv"), "=B1\t=C1\t=D1\t1\n").unwrap();

    let (_, _, code) = run_in(dir.path(), &["in.tsv", "--max-depth", "2", "-o", "-"]);
    assert_eq!(code, 1);
    let (stdout, _, code) = run_in(dir.path(), &["in.tsv", "--max-depth", "3", "-o", "-"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "1\t1\t1\t1\n");
}

#[test]
fn test_max_depth_above_cap_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.tsv"), "1\n").unwrap();

    let (_, stderr, code) = run_in(dir.path(), &["in.tsv", "--max-depth", "100000", "-o", "-"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("max_depth"), "{stderr}");
}

#[test]
fn test_padded_literal_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.tsv"), "1\t2\n007\t=A1\n").unwrap();

    let (_, stderr, code) = run_in(dir.path(), &["in.tsv"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("line 2, cell 1"), "{stderr}");
    assert!(!dir.path().join("output.txt").exists());
}

#[test]
fn test_invalid_delimiter_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_in(dir.path(), &["-d", "+"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("delimiter"), "{stderr}");
}

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.tsv"), "1\t=A1+1\n").unwrap();

    let (stdout, stderr, code) = run_in(dir.path(), &["in.tsv", "-o", "-", "-vv"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "1\t2\n");
    assert!(stderr.contains("B1: =A1+1 -> 2"), "{stderr}");
}
