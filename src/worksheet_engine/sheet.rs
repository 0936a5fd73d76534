//! Worksheet composition: problems + grid → pages of draw primitives.
//!
//! The composer resolves every alignment up front, so each [`DrawOp`] carries
//! absolute coordinates and the PDF writer never tracks a cursor. Header and
//! footer placement is independent of problem placement.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::worksheet_engine::{
    helpers::{footer_text, header_text},
    layout::GridLayout,
    metrics::{text_width_mm, MM_PER_PT},
    models::{Operation, Problem, WorksheetConfig},
};

// ---------------------------------------------------------------------------
// Page setup
// ---------------------------------------------------------------------------

/// Paper size and type sizes, millimetres and points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSetup {
    pub width: f32,
    pub height: f32,
    /// Top of the header line.
    pub header_top: f32,
    /// Distance from the bottom edge to the top of the footer line.
    pub footer_from_bottom: f32,
    pub header_size: f32,
    pub footer_size: f32,
    pub problem_size: f32,
}

impl Default for PageSetup {
    /// A4 portrait.
    fn default() -> Self {
        PageSetup {
            width: 210.0,
            height: 297.0,
            header_top: 10.0,
            footer_from_bottom: 15.0,
            header_size: 12.0,
            footer_size: 8.0,
            problem_size: 12.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Draw primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Center,
    Right,
}

/// One stateless drawing instruction. `(x, y)` is the text baseline start or
/// the rule endpoints, in millimetres from the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawOp {
    Text { x: f32, y: f32, size: f32, style: FontStyle, text: String },
    Rule { x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// 1-based, as printed in the footer.
    pub number: usize,
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Rule { .. } => None,
        })
    }
}

/// A fully composed worksheet, ready to be written out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Worksheet {
    pub title: String,
    pub student: Option<String>,
    pub operation: Operation,
    pub problem_count: usize,
    pub page_setup: PageSetup,
    pub pages: Vec<Page>,
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// Baseline start of `text` inside a cell of `width × height` whose top-left
/// is `(x, y)`.
fn place(
    x: f32, y: f32, width: f32, height: f32,
    text: &str, style: FontStyle, size: f32, align: Align,
) -> (f32, f32) {
    let text_width = text_width_mm(text, style, size);
    let left = match align {
        Align::Center => x + (width - text_width) / 2.0,
        Align::Right  => x + width - text_width,
    };
    // Vertically centred: baseline sits a third of the font size below the middle.
    let baseline = y + height / 2.0 + 0.3 * size * MM_PER_PT;
    (left, baseline)
}

fn cell_text(
    x: f32, y: f32, width: f32, height: f32,
    text: &str, style: FontStyle, size: f32, align: Align,
) -> DrawOp {
    let (left, baseline) = place(x, y, width, height, text, style, size, align);
    DrawOp::Text { x: left, y: baseline, size, style, text: text.to_string() }
}

fn new_page(number: usize, title: &str, setup: &PageSetup, layout: &GridLayout) -> Page {
    let usable = setup.width - 2.0 * layout.left_margin;
    let header = cell_text(
        layout.left_margin, setup.header_top, usable, layout.line_height,
        title, FontStyle::Bold, setup.header_size, Align::Center,
    );
    let footer = cell_text(
        layout.left_margin, setup.height - setup.footer_from_bottom, usable, layout.line_height,
        &footer_text(number), FontStyle::Italic, setup.footer_size, Align::Center,
    );
    Page { number, ops: vec![header, footer] }
}

/// Three lines: first operand, underlined `symbol b`, blank answer space.
fn problem_ops(
    problem: &Problem, operation: Operation,
    x: f32, y: f32, layout: &GridLayout, size: f32,
) -> [DrawOp; 3] {
    let w = layout.cell_width;
    let h = layout.line_height;
    let top = cell_text(x, y, w, h, &problem.a.to_string(), FontStyle::Regular, size, Align::Right);

    let second = format!("{} {}", operation.symbol(), problem.b);
    let (left, baseline) = place(x, y + h, w, h, &second, FontStyle::Regular, size, Align::Right);
    let under = baseline + 0.1 * size * MM_PER_PT;
    let underline = DrawOp::Rule {
        x1: left,
        y1: under,
        x2: x + w,
        y2: under,
        thickness: 0.05 * size * MM_PER_PT,
    };
    let line = DrawOp::Text { x: left, y: baseline, size, style: FontStyle::Regular, text: second };
    // Third line is left empty for the answer; the next row starts `row_spacing` below.
    [top, line, underline]
}

/// Lay `problems` out on as many pages as the grid needs.
///
/// A new page starts exactly when the planner's page index moves past the
/// current one; every page gets the header and a `Page n` footer.
pub fn compose(
    problems: &[Problem],
    config: &WorksheetConfig,
    layout: &GridLayout,
    setup: &PageSetup,
    student: Option<&str>,
) -> Result<Worksheet> {
    layout.validate_for(setup)?;
    let title = header_text(student, config.operation);

    let mut pages = Vec::with_capacity(layout.page_count(problems.len()));
    let mut current = new_page(1, &title, setup, layout);
    for (index, problem) in problems.iter().enumerate() {
        let slot = layout.locate(index);
        if slot.page + 1 > current.number {
            let next = new_page(slot.page + 1, &title, setup, layout);
            pages.push(std::mem::replace(&mut current, next));
        }
        current.ops.extend(problem_ops(
            problem, config.operation, slot.x, slot.y, layout, setup.problem_size,
        ));
    }
    pages.push(current);

    debug!(title = %title, pages = pages.len(), problems = problems.len(), "composed worksheet");
    Ok(Worksheet {
        title,
        student: student.map(str::to_string),
        operation: config.operation,
        problem_count: problems.len(),
        page_setup: setup.clone(),
        pages,
    })
}
