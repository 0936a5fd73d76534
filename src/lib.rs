//! # minute_math
//!
//! Printable "minute math" arithmetic worksheets.
//!
//! Given a number range, an operation and a problem count, the crate draws a
//! set of problems, places them on a fixed grid, and writes a paginated PDF
//! with a per-student header and a page-number footer. Batch mode produces one
//! file per student from a name list.
//!
//! ## How it works
//!
//! 1. Build a [`WorksheetConfig`] (range, operation, count, optional fixed
//!    factor). [`WorksheetConfig::new`] parses the operation name and
//!    validates everything up front.
//! 2. [`generate`] draws the problems. Subtraction never goes negative and
//!    division always has an exact integer quotient.
//! 3. [`compose`] maps each problem index to a grid slot via [`GridLayout`]
//!    and produces pages of absolutely-positioned draw primitives.
//! 4. [`write_pdf`] (or a [`PdfDirectory`] sink) turns the pages into a PDF,
//!    finalising the file only once it is complete.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use minute_math::{run_batch, BatchOptions, PdfDirectory, WorksheetConfig};
//!
//! let config = WorksheetConfig::new(1, 10, "addition", 20, None)?;
//! let mut sink = PdfDirectory::new("out");
//! let names = vec!["Alice".to_string(), "Bob".to_string()];
//! let report = run_batch(&config, &names, &BatchOptions::default(), &mut sink)?;
//! for path in report.created() {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), minute_math::WorksheetError>(())
//! ```
//!
//! Pass `rng_seed: Some(u64)` in [`BatchOptions`] (or use
//! [`WorksheetRequest::with_seed`]) to reproduce a problem set exactly.

pub mod error;
pub mod prompt;
pub mod settings;
pub mod worksheet_engine;

pub use error::{Result, WorksheetError};
pub use settings::Settings;
pub use worksheet_engine::{
    compose, generate, generate_problems, output_file_name, read_names, run_batch,
    run_batch_from_file, run_single, write_pdf, BatchOptions, BatchReport, DrawOp, GridLayout,
    LayoutSlot, Operation, Page, PageSetup, PdfDirectory, Problem, StudentOutcome, StudentReport,
    Worksheet,
    WorksheetConfig, WorksheetRequest, WorksheetSink,
};
