//! Integration tests for the griddiff command line

use std::fs;
use std::path::Path;
use std::process::Command;

fn run_griddiff(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_griddiff"))
        // Tests must not depend on a user's ~/.config/griddiff/config.toml.
        .arg("--no-config")
        .args(args)
        .env_remove("GRIDDIFF_LOG")
        .output()
        .expect("Failed to execute griddiff");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_identical_books_exit_zero() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.csv", "id,name\n1,ann\n");
    let b = write(dir.path(), "b.csv", "id,name\n1,ann\n");

    let (stdout, _, code) = run_griddiff(&[&a, &b]);
    assert_eq!(code, 0);
    assert!(stdout.contains("\tDiff cells: (none)\n"));
}

#[test]
fn test_changed_cell_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.csv", "1,2\n");
    let b = write(dir.path(), "b.csv", "1,3\n");

    let (stdout, _, code) = run_griddiff(&["--sheet-a", "a", "--sheet-b", "b", "--detail", &a, &b]);
    assert_eq!(code, 1);
    assert!(stdout.contains("Sheet A: a\nSheet B: b\n"));
    assert!(stdout.contains("\t\tCell A: B1 [2]\n\t\tCell B: B1 [3]\n"));
}

#[test]
fn test_row_gaps_flag_reports_redundant_row() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.csv", "h1,h2\n,\nv1,v2\n");
    let b = write(dir.path(), "b.csv", "h1,h2\nv1,v2\n");

    let (stdout, _, code) = run_griddiff(&["--row-gaps", "--detail", "--sheet-a", "a", "--sheet-b", "b", &a, &b]);
    assert_eq!(code, 1);
    assert!(stdout.contains("\tRedundant rows on sheet A:\n\t\tRow 2\n"));
    assert!(stdout.contains("\tDiff cells: (none)\n"));
}

#[test]
fn test_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.csv", "x\n");
    let b = write(dir.path(), "b.csv", "y\n");

    let (stdout, _, code) = run_griddiff(&["--format", "json", "--sheet-a", "a", "--sheet-b", "b", &a, &b]);
    assert_eq!(code, 1);
    assert!(stdout.contains("\"sheet_a\": \"a\""));
    assert!(stdout.contains("\"value\": \"y\""));
}

#[test]
fn test_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.csv", "x\n");
    let b = write(dir.path(), "b.csv", "x\n");
    let out = dir.path().join("report.txt");

    let (stdout, _, code) = run_griddiff(&["--sheet-a", "a", "--sheet-b", "b", "-o", out.to_str().unwrap(), &a, &b]);
    assert_eq!(code, 0);
    assert!(stdout.is_empty());
    assert!(fs::read_to_string(&out).unwrap().starts_with("Book A: "));
}

#[test]
fn test_self_comparison_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.csv", "x\n");

    let (_, stderr, code) = run_griddiff(&[&a, &a]);
    assert_eq!(code, 2);
    assert!(stderr.starts_with("Error:"));
}

#[test]
fn test_missing_book_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.csv", "x\n");
    let missing = dir.path().join("missing.csv");

    let (_, stderr, code) = run_griddiff(&[&a, missing.to_str().unwrap()]);
    assert_eq!(code, 2);
    assert!(stderr.contains("cannot open"));
}

#[test]
fn test_sheet_a_requires_sheet_b() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.csv", "x\n");
    let b = write(dir.path(), "b.csv", "x\n");

    let (_, _, code) = run_griddiff(&["--sheet-a", "a", &a, &b]);
    assert_eq!(code, 2);
}
