//! Worksheet engine: problem generation, grid layout, composition and output.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `models`     | Shared types: operations, configuration, problems, requests |
//! | `helpers`    | Operand drawing and header/footer text |
//! | `operations` | One problem generator per operation |
//! | `generator`  | `generate()` / `generate_problems()`, dispatches to `operations` |
//! | `layout`     | `GridLayout` and the index → slot planner |
//! | `metrics`    | Helvetica glyph widths for alignment |
//! | `sheet`      | Composes pages of positioned draw primitives |
//! | `pdf`        | Writes composed worksheets as PDF files |
//! | `batch`      | One worksheet per student, with per-student failure isolation |

pub mod batch;
pub mod generator;
pub mod helpers;
pub mod layout;
pub mod metrics;
pub mod models;
pub mod operations;
pub mod pdf;
pub mod sheet;

pub use batch::{
    output_file_name, read_names, run_batch, run_batch_from_file, run_single, BatchOptions,
    BatchReport, StudentOutcome, StudentReport, WorksheetSink,
};
pub use generator::{generate, generate_problems};
pub use layout::{GridLayout, LayoutSlot};
pub use models::{Operation, Problem, WorksheetConfig, WorksheetRequest};
pub use pdf::{write_pdf, PdfDirectory};
pub use sheet::{compose, DrawOp, FontStyle, Page, PageSetup, Worksheet};
