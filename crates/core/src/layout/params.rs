//! Layout analysis parameters.
//!
//! Contains LayoutParams for line clustering and fragment merging,
//! TableParams for combining table detections and GridParams for the sheet
//! writer. Distances are in page layout units, widths in spreadsheet
//! character units.

use serde::{Deserialize, Serialize};

/// Parameters for grouping free words into lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Words whose tops differ by no more than this from the previous word
    /// in a cluster belong to the same line.
    pub line_tolerance: f64,

    /// Largest horizontal gap across which two tokens may be merged into
    /// one word.
    pub fragment_gap: f64,

    /// Tokens of at most this many characters merge with a close neighbour
    /// even when they are not alphabetic.
    pub short_fragment_len: usize,

    /// Margin added around each table bbox before testing whether a word
    /// belongs to the table.
    pub table_margin: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            line_tolerance: 3.2,
            fragment_gap: 12.0,
            short_fragment_len: 3,
            table_margin: 1.0,
        }
    }
}

/// Parameters for deduplicating and filtering table candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableParams {
    /// A candidate overlapping an already accepted one by more than this
    /// IoU is dropped.
    pub dedup_iou: f64,
    pub min_rows: usize,
    pub min_cols: usize,
    pub min_non_empty: usize,
}

impl Default for TableParams {
    fn default() -> Self {
        Self {
            dedup_iou: 0.75,
            min_rows: 2,
            min_cols: 2,
            min_non_empty: 4,
        }
    }
}

/// Parameters for writing a page layout onto a sheet grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParams {
    /// A horizontal gap wider than this between two words of a line leaves
    /// one empty column between them.
    pub column_gap: f64,
    pub min_column_width: f64,
    pub max_column_width: f64,
    /// Width per character of the longest value in a column.
    pub width_scale: f64,
    /// Only this many leading columns are auto-sized.
    pub autofit_max_columns: u32,
    /// Only this many leading rows are scanned when auto-sizing.
    pub autofit_max_rows: u32,
    /// Font size hint for free-text cells.
    pub text_font_size: f64,
    /// Emit cell text that parses as a finite number as a number value.
    pub coerce_numbers: bool,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            column_gap: 80.0,
            min_column_width: 10.0,
            max_column_width: 50.0,
            width_scale: 0.95,
            autofit_max_columns: 60,
            autofit_max_rows: 4000,
            text_font_size: 10.0,
            coerce_numbers: false,
        }
    }
}
