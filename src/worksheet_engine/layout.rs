//! Grid placement of problems on the page.
//!
//! A problem's slot is a pure function of its index and the grid; nothing
//! here keeps a drawing cursor. Distances are millimetres measured from the
//! top-left corner of the page.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WorksheetError};
use crate::worksheet_engine::sheet::PageSetup;

/// Grid dimensions and spacing. Passed explicitly to the planner and the
/// composer so different worksheets can use different grids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    pub columns_per_row: usize,
    pub rows_per_page: usize,
    pub left_margin: f32,
    pub top_margin: f32,
    pub column_spacing: f32,
    pub row_spacing: f32,
    /// Width of the right-aligned cell each problem is drawn in.
    pub cell_width: f32,
    /// Height of one problem line; a block is three lines tall.
    pub line_height: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        GridLayout {
            columns_per_row: 5,
            rows_per_page: 5,
            left_margin: 10.0,
            top_margin: 30.0,
            column_spacing: 40.0,
            row_spacing: 50.0,
            cell_width: 20.0,
            line_height: 10.0,
        }
    }
}

/// Where one problem lands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutSlot {
    /// Zero-based page index.
    pub page: usize,
    pub column: usize,
    pub row: usize,
    pub x: f32,
    pub y: f32,
}

/// `(page, column, row)` for `index` on a `columns_per_row × rows_per_page` grid.
///
/// Zero dimensions are treated as 1 so the function stays total.
pub fn grid_position(index: usize, columns_per_row: usize, rows_per_page: usize) -> (usize, usize, usize) {
    let columns = columns_per_row.max(1);
    let rows = rows_per_page.max(1);
    let column = index % columns;
    let row = (index / columns) % rows;
    let page = index / (columns * rows);
    (page, column, row)
}

impl GridLayout {
    /// Problems per page.
    pub fn capacity(&self) -> usize {
        self.columns_per_row.max(1) * self.rows_per_page.max(1)
    }

    pub fn locate(&self, index: usize) -> LayoutSlot {
        let (page, column, row) = grid_position(index, self.columns_per_row, self.rows_per_page);
        LayoutSlot {
            page,
            column,
            row,
            x: self.left_margin + column as f32 * self.column_spacing,
            y: self.top_margin + row as f32 * self.row_spacing,
        }
    }

    /// Pages needed for `problem_count` problems; never less than one.
    pub fn page_count(&self, problem_count: usize) -> usize {
        problem_count.div_ceil(self.capacity()).max(1)
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns_per_row == 0 || self.rows_per_page == 0 {
            return Err(WorksheetError::invalid(format!(
                "grid must have at least one column and one row (got {}×{})",
                self.columns_per_row, self.rows_per_page
            )));
        }
        let spacing = [
            self.left_margin,
            self.top_margin,
            self.column_spacing,
            self.row_spacing,
            self.cell_width,
            self.line_height,
        ];
        if spacing.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(WorksheetError::invalid("grid margins and spacing must be non-negative numbers"));
        }
        Ok(())
    }

    /// [`validate`](Self::validate), then check that the last row's three-line
    /// block ends above the footer and the last column's cell ends inside the
    /// page.
    pub fn validate_for(&self, page: &PageSetup) -> Result<()> {
        self.validate()?;
        let bottom = self.top_margin
            + (self.rows_per_page - 1) as f32 * self.row_spacing
            + 3.0 * self.line_height;
        let limit = page.height - page.footer_from_bottom;
        if bottom > limit {
            return Err(WorksheetError::invalid(format!(
                "{} rows of {} mm reach {bottom} mm, past the footer at {limit} mm",
                self.rows_per_page, self.row_spacing
            )));
        }
        let right = self.left_margin
            + (self.columns_per_row - 1) as f32 * self.column_spacing
            + self.cell_width;
        if right > page.width {
            return Err(WorksheetError::invalid(format!(
                "{} columns of {} mm reach {right} mm, past the page width of {} mm",
                self.columns_per_row, self.column_spacing, page.width
            )));
        }
        Ok(())
    }
}
