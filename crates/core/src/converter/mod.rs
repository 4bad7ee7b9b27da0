//! Output converters for page layouts.
//!
//! - GridConverter: writes each page layout onto a spreadsheet sheet
//! - Sheet/Workbook: the in-memory grid model it produces

mod grid;
mod sheet;

pub use grid::{
    GridConverter, NO_CONTENT_TEXT, apply_region_borders, autofit_columns, render_page, sheet_name,
};
pub use sheet::{
    Alignment, Border, Cell, CellStyle, CellValue, HorizontalAlign, Sheet, VerticalAlign, Workbook,
};
