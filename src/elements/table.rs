//! Table content element.
//!
//! A table is drawn as cell text plus border strokes inside its bounding box.
//! Rows share the box height evenly; columns use `column_widths` when given
//! and split the width evenly otherwise.

use super::Color;
use crate::error::{Error, Result};
use crate::geometry::Rect;

/// Table content element.
#[derive(Debug, Clone)]
pub struct TableContent {
    /// Bounding box of the entire table
    pub bbox: Rect,
    /// Table rows, top to bottom
    pub rows: Vec<TableRowContent>,
    /// Column widths (empty for even split)
    pub column_widths: Vec<f32>,
    /// Table style information
    pub style: TableContentStyle,
}

impl TableContent {
    /// Create a new empty table with a bounding box.
    pub fn new(bbox: Rect) -> Self {
        Self {
            bbox,
            rows: Vec::new(),
            column_widths: Vec::new(),
            style: TableContentStyle::default(),
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRowContent) {
        self.rows.push(row);
    }

    /// Builder form of [`add_row`](Self::add_row).
    pub fn with_row(mut self, row: TableRowContent) -> Self {
        self.rows.push(row);
        self
    }

    /// Set explicit column widths.
    pub fn with_column_widths(mut self, widths: Vec<f32>) -> Self {
        self.column_widths = widths;
        self
    }

    /// Get the number of columns (widest row).
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    /// Height of every row.
    pub fn row_height(&self) -> f32 {
        if self.rows.is_empty() {
            0.0
        } else {
            self.bbox.height / self.rows.len() as f32
        }
    }

    /// Width of column `col`.
    pub fn column_width(&self, col: usize) -> f32 {
        match self.column_widths.get(col) {
            Some(w) => *w,
            None => self.bbox.width / self.column_count().max(1) as f32,
        }
    }

    /// Check the box, rows and column widths.
    pub fn validate(&self) -> Result<()> {
        if !self.bbox.has_area() {
            return Err(Error::invalid_document("table bounding box has no area"));
        }
        if self.rows.is_empty() {
            return Err(Error::invalid_document("table has no rows"));
        }
        if !self.column_widths.is_empty() {
            if self.column_widths.len() != self.column_count() {
                return Err(Error::invalid_document(format!(
                    "table has {} column widths for {} columns",
                    self.column_widths.len(),
                    self.column_count()
                )));
            }
            if self.column_widths.iter().any(|w| !(w.is_finite() && *w > 0.0)) {
                return Err(Error::invalid_document("table column widths must be positive"));
            }
        }
        if !(self.style.font_size.is_finite() && self.style.font_size > 0.0) {
            return Err(Error::invalid_document("table font size must be positive"));
        }
        Ok(())
    }
}

/// A row in a table.
#[derive(Debug, Clone, Default)]
pub struct TableRowContent {
    /// Cells in this row
    pub cells: Vec<TableCellContent>,
    /// Whether this is a header row (bold, optional background)
    pub is_header: bool,
}

impl TableRowContent {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCellContent>) -> Self {
        Self {
            cells,
            is_header: false,
        }
    }

    /// Create a header row with cells.
    pub fn header(cells: Vec<TableCellContent>) -> Self {
        Self {
            cells,
            is_header: true,
        }
    }

    /// Row of plain text cells.
    pub fn from_texts<S: AsRef<str>>(texts: &[S]) -> Self {
        Self::new(texts.iter().map(|t| TableCellContent::new(t.as_ref())).collect())
    }
}

/// Horizontal alignment in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableCellAlign {
    /// Left aligned
    #[default]
    Left,
    /// Centered
    Center,
    /// Right aligned
    Right,
}

/// One table cell.
#[derive(Debug, Clone, Default)]
pub struct TableCellContent {
    /// Cell text
    pub text: String,
    /// Bold text
    pub bold: bool,
    /// Horizontal alignment
    pub align: TableCellAlign,
}

impl TableCellContent {
    /// Create a cell.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set alignment.
    pub fn with_align(mut self, align: TableCellAlign) -> Self {
        self.align = align;
        self
    }

    /// Make the text bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Table styling.
#[derive(Debug, Clone)]
pub struct TableContentStyle {
    /// Cell font size
    pub font_size: f32,
    /// Padding inside cells
    pub cell_padding: f32,
    /// Border width (0 for none)
    pub border_width: f32,
    /// Border color
    pub border_color: Color,
    /// Header row background
    pub header_background: Option<Color>,
}

impl Default for TableContentStyle {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            cell_padding: 4.0,
            border_width: 0.5,
            border_color: Color::black(),
            header_background: Some(Color::new(0.9, 0.9, 0.9)),
        }
    }
}
