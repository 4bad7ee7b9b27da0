//! In-memory spreadsheet model produced by the grid writer.
//!
//! Rows and columns are 1-based, as in spreadsheet applications. Cells carry
//! style hints only; turning the model into an xlsx file is left to the
//! caller.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Text as it would be displayed; `None` for an empty cell.
    pub fn display(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(n) => Some(n.to_string()),
        }
    }

    /// True when the cell shows nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Alignment {
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
    pub wrap_text: bool,
}

/// Thin border on all four sides of a cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Border {
    /// RGB hex color, without a leading '#'.
    pub color: String,
}

impl Border {
    pub fn thin(color: &str) -> Self {
        Self {
            color: color.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CellStyle {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
}

/// One output sheet: sparse rows of cells plus column widths.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Sheet {
    pub name: String,
    pub rows: BTreeMap<u32, BTreeMap<u32, Cell>>,
    pub column_widths: BTreeMap<u32, f64>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&Cell> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Displayed text of a cell, if any.
    pub fn text(&self, row: u32, col: u32) -> Option<String> {
        self.cell(row, col).and_then(|c| c.value.display())
    }

    /// The cell at `(row, col)`, created empty if missing.
    pub fn cell_mut(&mut self, row: u32, col: u32) -> &mut Cell {
        self.rows.entry(row).or_default().entry(col).or_default()
    }

    pub fn set(&mut self, row: u32, col: u32, value: CellValue, style: CellStyle) {
        *self.cell_mut(row, col) = Cell { value, style };
    }

    /// Highest row index holding a cell, 0 for an empty sheet.
    pub fn max_row(&self) -> u32 {
        self.rows
            .iter()
            .rev()
            .find(|(_, cells)| !cells.is_empty())
            .map(|(row, _)| *row)
            .unwrap_or(0)
    }

    /// Highest column index holding a cell, 0 for an empty sheet.
    pub fn max_column(&self) -> u32 {
        self.rows
            .values()
            .filter_map(|cells| cells.keys().next_back().copied())
            .max()
            .unwrap_or(0)
    }

    /// Bounding rectangle `(min_row, min_col, max_row, max_col)` of the
    /// non-blank cells.
    pub fn used_region(&self) -> Option<(u32, u32, u32, u32)> {
        let mut region: Option<(u32, u32, u32, u32)> = None;
        for (&row, cells) in &self.rows {
            for (&col, cell) in cells {
                if cell.value.is_blank() {
                    continue;
                }
                region = Some(match region {
                    None => (row, col, row, col),
                    Some((r0, c0, r1, c1)) => (r0.min(row), c0.min(col), r1.max(row), c1.max(col)),
                });
            }
        }
        region
    }
}

/// Sheets of one converted document, in page order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_used_region_ignores_blank_cells() {
        let mut sheet = Sheet::new("Page_1");
        sheet.set(1, 1, CellValue::Text("  ".into()), CellStyle::default());
        sheet.set(2, 3, CellValue::Text("a".into()), CellStyle::default());
        sheet.set(4, 2, CellValue::Number(1.5), CellStyle::default());
        sheet.set(5, 9, CellValue::Empty, CellStyle::default());
        assert_eq!(sheet.used_region(), Some((2, 2, 4, 3)));
        assert_eq!(sheet.max_row(), 5);
        assert_eq!(sheet.max_column(), 9);
    }

    #[test]
    fn test_empty_sheet() {
        let sheet = Sheet::new("Page_1");
        assert_eq!(sheet.used_region(), None);
        assert_eq!(sheet.max_row(), 0);
        assert_eq!(sheet.max_column(), 0);
    }
}
