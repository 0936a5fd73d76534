//! Batch driver: one worksheet per student, strictly in list order.
//!
//! A bad configuration or an unreadable name list stops the whole run before
//! anything is written. After that, each student stands alone: a failed
//! worksheet is logged and recorded in the report, and the driver moves on.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::{Result, WorksheetError};
use crate::worksheet_engine::{
    generator::generate,
    layout::GridLayout,
    models::{Operation, WorksheetConfig},
    sheet::{compose, PageSetup, Worksheet},
};

/// Where finished worksheets go.
pub trait WorksheetSink {
    /// Persist `worksheet` under (roughly) `file_name`; returns the real path.
    fn finalize(&mut self, worksheet: &Worksheet, file_name: &str) -> Result<PathBuf>;
}

/// Everything besides the problem configuration that shapes a run.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub layout: GridLayout,
    pub page: PageSetup,
    /// Student `i` (0-based, after blank names are dropped) uses `seed + i`.
    pub rng_seed: Option<u64>,
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StudentOutcome {
    Created { path: PathBuf },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentReport {
    pub student: String,
    #[serde(flatten)]
    pub outcome: StudentOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub operation: Option<Operation>,
    pub students: Vec<StudentReport>,
}

impl BatchReport {
    pub fn created(&self) -> impl Iterator<Item = &Path> {
        self.students.iter().filter_map(|r| match &r.outcome {
            StudentOutcome::Created { path } => Some(path.as_path()),
            StudentOutcome::Failed { .. } => None,
        })
    }

    pub fn created_count(&self) -> usize {
        self.created().count()
    }

    pub fn failed_count(&self) -> usize {
        self.students.len() - self.created_count()
    }

    /// True when there was work to do and none of it succeeded.
    pub fn all_failed(&self) -> bool {
        !self.students.is_empty() && self.created_count() == 0
    }
}

// ---------------------------------------------------------------------------
// Names and file names
// ---------------------------------------------------------------------------

/// Split a newline-delimited name list. Lines are trimmed; blank lines and
/// `#` comments are skipped; a leading UTF-8 BOM is ignored.
pub fn parse_names(text: &str) -> Vec<String> {
    text.trim_start_matches('\u{FEFF}')
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Read a name list from disk. A missing file is [`WorksheetError::FileNotFound`].
pub fn read_names(path: &Path) -> Result<Vec<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(parse_names(&text)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(WorksheetError::FileNotFound { path: path.to_path_buf() })
        }
        Err(e) => Err(e.into()),
    }
}

/// Anything outside `[A-Za-z0-9-_]` becomes `_`.
fn file_safe(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// `{student}_{operation}_worksheet_{YYYYmmdd_HHMMSS}.pdf`; without a student
/// the leading part is dropped.
pub fn output_file_name(student: Option<&str>, operation: Operation, at: &DateTime<Local>) -> String {
    let stamp = at.format("%Y%m%d_%H%M%S");
    match student.map(file_safe).filter(|s| !s.is_empty()) {
        Some(name) => format!("{}_{}_worksheet_{}.pdf", name, operation.name(), stamp),
        None => format!("{}_worksheet_{}.pdf", operation.name(), stamp),
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

fn rng_for(seed: Option<u64>, offset: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(offset)),
        None       => StdRng::from_entropy(),
    }
}

/// Generate, compose and finalise one worksheet. Problems are always freshly
/// drawn, even for a student seen before.
pub fn render_worksheet(
    config: &WorksheetConfig,
    student: Option<&str>,
    options: &BatchOptions,
    sink: &mut dyn WorksheetSink,
    rng: &mut StdRng,
) -> Result<PathBuf> {
    let problems = generate(config, rng)?;
    let worksheet = compose(&problems, config, &options.layout, &options.page, student)?;
    let file_name = output_file_name(student, config.operation, &Local::now());
    sink.finalize(&worksheet, &file_name)
}

/// Single worksheet, no batch bookkeeping. Errors are returned as-is.
pub fn run_single(
    config: &WorksheetConfig,
    student: Option<&str>,
    options: &BatchOptions,
    sink: &mut dyn WorksheetSink,
) -> Result<PathBuf> {
    config.validate()?;
    options.layout.validate_for(&options.page)?;
    let mut rng = rng_for(options.rng_seed, 0);
    render_worksheet(config, student, options, sink, &mut rng)
}

/// One worksheet per non-blank name, in order.
///
/// Configuration problems are fatal and checked before the first student.
/// Per-student failures end up in the report as [`StudentOutcome::Failed`].
pub fn run_batch(
    config: &WorksheetConfig,
    names: &[String],
    options: &BatchOptions,
    sink: &mut dyn WorksheetSink,
) -> Result<BatchReport> {
    config.validate()?;
    options.layout.validate_for(&options.page)?;

    let students: Vec<&str> = names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()).collect();
    let skipped = names.len() - students.len();
    if skipped > 0 {
        warn!(skipped, "skipping blank names");
    }
    info!(students = students.len(), operation = %config.operation, "starting batch");

    let mut report = BatchReport { operation: Some(config.operation), students: Vec::new() };
    for (i, student) in students.into_iter().enumerate() {
        let mut rng = rng_for(options.rng_seed, i as u64);
        let outcome = match render_worksheet(config, Some(student), options, sink, &mut rng) {
            Ok(path) => {
                info!(student, path = %path.display(), "worksheet created");
                StudentOutcome::Created { path }
            }
            Err(source) => {
                let err = WorksheetError::Render { student: student.to_string(), source: Box::new(source) };
                error!("{}", err);
                StudentOutcome::Failed { reason: err.to_string() }
            }
        };
        report.students.push(StudentReport { student: student.to_string(), outcome });
    }

    info!(
        created = report.created_count(),
        failed = report.failed_count(),
        "batch finished"
    );
    Ok(report)
}

/// [`run_batch`] over a name-list file. An unreadable list aborts the batch.
pub fn run_batch_from_file(
    config: &WorksheetConfig,
    names_path: &Path,
    options: &BatchOptions,
    sink: &mut dyn WorksheetSink,
) -> Result<BatchReport> {
    config.validate()?;
    let names = read_names(names_path)?;
    run_batch(config, &names, options, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Keeps worksheets in memory; fails for any student listed in `fail_for`.
    #[derive(Default)]
    struct MemorySink {
        fail_for: Vec<String>,
        saved: Vec<(String, Worksheet)>,
    }

    impl WorksheetSink for MemorySink {
        fn finalize(&mut self, worksheet: &Worksheet, file_name: &str) -> Result<PathBuf> {
            if let Some(student) = &worksheet.student {
                if self.fail_for.contains(student) {
                    return Err(std::io::Error::new(ErrorKind::Other, "disk full").into());
                }
            }
            self.saved.push((file_name.to_string(), worksheet.clone()));
            Ok(PathBuf::from(file_name))
        }
    }

    fn config() -> WorksheetConfig {
        WorksheetConfig::new(1, 10, "addition", 10, None).unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn blank_names_are_skipped_and_order_kept() {
        let mut sink = MemorySink::default();
        let report = run_batch(&config(), &names(&["Alice", "", "  ", "Bob"]), &BatchOptions::default(), &mut sink).unwrap();
        let students: Vec<&str> = report.students.iter().map(|r| r.student.as_str()).collect();
        assert_eq!(students, vec!["Alice", "Bob"]);
        assert_eq!(sink.saved.len(), 2);
        assert!(sink.saved[0].0.starts_with("Alice_addition_worksheet_"));
        assert!(sink.saved[1].0.starts_with("Bob_addition_worksheet_"));
    }

    #[test]
    fn one_failing_student_does_not_stop_the_batch() {
        let mut sink = MemorySink { fail_for: vec!["Bob".into()], ..Default::default() };
        let report = run_batch(&config(), &names(&["Alice", "Bob", "Cara"]), &BatchOptions::default(), &mut sink).unwrap();
        assert_eq!(report.created_count(), 2);
        assert_eq!(report.failed_count(), 1);
        match &report.students[1].outcome {
            StudentOutcome::Failed { reason } => assert!(reason.contains("Bob") && reason.contains("disk full")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(report.students[2].student, "Cara");
        assert!(!report.all_failed());
    }

    #[test]
    fn invalid_configuration_writes_nothing() {
        let mut sink = MemorySink::default();
        let bad = WorksheetConfig { low: 9, high: 1, ..config() };
        let err = run_batch(&bad, &names(&["Alice"]), &BatchOptions::default(), &mut sink).unwrap_err();
        assert!(err.is_invalid_configuration());
        assert!(sink.saved.is_empty());
    }

    #[test]
    fn grid_past_the_footer_is_rejected_before_any_student() {
        let mut sink = MemorySink::default();
        let options = BatchOptions {
            layout: GridLayout { rows_per_page: 6, ..GridLayout::default() },
            ..BatchOptions::default()
        };
        let err = run_batch(&config(), &names(&["Alice", "Bob"]), &options, &mut sink).unwrap_err();
        assert!(err.is_invalid_configuration());
        assert!(run_single(&config(), Some("Alice"), &options, &mut sink).is_err());
        assert!(sink.saved.is_empty());
    }

    #[test]
    fn missing_name_file_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = MemorySink::default();
        let err = run_batch_from_file(&config(), &dir.path().join("nope.txt"), &BatchOptions::default(), &mut sink)
            .unwrap_err();
        assert!(matches!(err, WorksheetError::FileNotFound { .. }));
        assert!(sink.saved.is_empty());
    }

    #[test]
    fn seeded_batch_gives_each_student_fresh_problems() {
        let options = BatchOptions { rng_seed: Some(9), ..Default::default() };
        let mut sink = MemorySink::default();
        run_batch(&config(), &names(&["Ann", "Ann"]), &options, &mut sink).unwrap();
        let first = &sink.saved[0].1;
        let second = &sink.saved[1].1;
        assert_ne!(first.pages, second.pages);

        let mut again = MemorySink::default();
        run_batch(&config(), &names(&["Ann", "Ann"]), &options, &mut again).unwrap();
        assert_eq!(again.saved[0].1.pages, first.pages);
    }

    #[test]
    fn parse_names_handles_bom_comments_and_crlf() {
        let parsed = parse_names("\u{FEFF}Alice\r\n\r\n# absent today\n  Bob  \n");
        assert_eq!(parsed, vec!["Alice", "Bob"]);
    }

    #[test]
    fn file_name_has_student_operation_and_timestamp() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            output_file_name(Some("Henry"), Operation::Addition, &at),
            "Henry_addition_worksheet_20240309_140507.pdf"
        );
        assert_eq!(
            output_file_name(Some("Mary Jo/2"), Operation::Division, &at),
            "Mary_Jo_2_division_worksheet_20240309_140507.pdf"
        );
        assert_eq!(
            output_file_name(Some("Zoë"), Operation::Division, &at),
            "Zo__division_worksheet_20240309_140507.pdf"
        );
        assert_eq!(
            output_file_name(None, Operation::Subtraction, &at),
            "subtraction_worksheet_20240309_140507.pdf"
        );
    }

    #[test]
    fn report_serialises_with_status_tags() {
        let report = BatchReport {
            operation: Some(Operation::Addition),
            students: vec![
                StudentReport { student: "A".into(), outcome: StudentOutcome::Created { path: "a.pdf".into() } },
                StudentReport { student: "B".into(), outcome: StudentOutcome::Failed { reason: "x".into() } },
            ],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["operation"], "addition");
        assert_eq!(json["students"][0]["status"], "created");
        assert_eq!(json["students"][0]["path"], "a.pdf");
        assert_eq!(json["students"][1]["reason"], "x");
    }
}
