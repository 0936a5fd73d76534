//! Runs the `minute-math` binary end to end.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn minute_math(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_minute-math"))
        .args(args)
        .current_dir(cwd)
        .env("RUST_LOG", "off")
        .env_remove("MINUTE_MATH_OUTPUT_DIR")
        .output()
        .unwrap()
}

fn entries(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn unknown_operation_exits_non_zero_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let output = minute_math(dir.path(), &[
        "--low", "1", "--high", "10", "--operation", "percentages",
        "--output-dir", out.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("percentages"));
    assert!(!out.exists());
    assert!(entries(dir.path()).is_empty());
}

#[test]
fn missing_names_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let output = minute_math(dir.path(), &[
        "--low", "1", "--high", "10", "--operation", "addition",
        "--names", "nope.txt", "--output-dir", ".",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("File not found"));
    assert!(entries(dir.path()).is_empty());
}

#[test]
fn grid_past_the_footer_in_settings_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("minute_math.toml"), "[layout]\nrows_per_page = 6\n").unwrap();
    let output = minute_math(dir.path(), &[
        "--low", "1", "--high", "10", "--operation", "addition", "--student", "Henry",
    ]);
    assert!(!output.status.success());
    assert_eq!(entries(dir.path()), vec!["minute_math.toml".to_string()]);
}

#[test]
fn json_report_lists_the_created_worksheet() {
    let dir = tempfile::tempdir().unwrap();
    let output = minute_math(dir.path(), &[
        "--low", "1", "--high", "10", "--operation", "addition", "--count", "10",
        "--student", "Henry", "--seed", "7", "--json", "--output-dir", ".",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["operation"], "addition");
    let students = report["students"].as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["student"], "Henry");
    assert_eq!(students[0]["status"], "created");

    let files = entries(dir.path());
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("Henry_addition_worksheet_"), "{files:?}");
}

#[test]
fn batch_with_names_file_prints_one_line_per_student() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("class.txt"), "Alice\n\nBob\n").unwrap();
    let output = minute_math(dir.path(), &[
        "--low", "2", "--high", "9", "--operation", "division", "--fixed-factor", "3",
        "--names", "class.txt", "--output-dir", "sheets",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().filter(|l| l.starts_with("Created ")).count(), 2);
    assert_eq!(entries(&dir.path().join("sheets")).len(), 2);
}
