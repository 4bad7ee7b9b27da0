//! Grid Converter - writes page layouts onto spreadsheet sheets.

use tracing::debug;

use crate::layout::{GridParams, Line, PageElement, PageLayout, TableCandidate};

use super::sheet::{
    Alignment, Border, CellStyle, CellValue, HorizontalAlign, Sheet, VerticalAlign, Workbook,
};

/// Text written on the sheet of a page with nothing extractable.
pub const NO_CONTENT_TEXT: &str = "No extractable text found on this page.";

const TABLE_BORDER_COLOR: &str = "D0D7E2";
const REGION_BORDER_COLOR: &str = "6B7280";

/// Sheet name for a 1-based page number.
pub fn sheet_name(page_number: usize) -> String {
    format!("Page_{page_number}")
}

/// Grid Converter - one sheet per received page.
pub struct GridConverter {
    params: GridParams,
    workbook: Workbook,
}

impl GridConverter {
    pub fn new(params: GridParams) -> Self {
        Self {
            params,
            workbook: Workbook::default(),
        }
    }

    /// Receive and render a page layout as the next sheet.
    pub fn receive_layout(&mut self, layout: &PageLayout) {
        let sheet = render_page(layout, &self.params);
        self.workbook.sheets.push(sheet);
    }

    /// Number of sheets written so far.
    pub fn len(&self) -> usize {
        self.workbook.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workbook.sheets.is_empty()
    }

    pub fn into_workbook(self) -> Workbook {
        self.workbook
    }
}

/// Render one page layout onto a new sheet.
pub fn render_page(layout: &PageLayout, params: &GridParams) -> Sheet {
    let mut sheet = Sheet::new(sheet_name(layout.page_number));

    if layout.is_empty() {
        sheet.set(
            1,
            1,
            CellValue::Text(NO_CONTENT_TEXT.to_string()),
            CellStyle::default(),
        );
        return sheet;
    }

    let mut writer = SheetWriter {
        sheet: &mut sheet,
        params,
        row_cursor: 1,
    };
    for element in &layout.elements {
        match element {
            PageElement::Line { line, .. } => writer.write_line(line),
            PageElement::Table { table, .. } => writer.write_table(table),
            PageElement::NoContent => {}
        }
    }
    debug!(
        sheet = %sheet.name,
        rows = sheet.max_row(),
        cols = sheet.max_column(),
        "rendered page"
    );

    autofit_columns(&mut sheet, params);
    apply_region_borders(&mut sheet);
    sheet
}

struct SheetWriter<'a> {
    sheet: &'a mut Sheet,
    params: &'a GridParams,
    row_cursor: u32,
}

impl SheetWriter<'_> {
    fn value(&self, text: &str) -> CellValue {
        if self.params.coerce_numbers
            && let Ok(n) = text.parse::<f64>()
            && n.is_finite()
        {
            return CellValue::Number(n);
        }
        CellValue::Text(text.to_string())
    }

    fn write_line(&mut self, line: &Line) {
        let style = CellStyle {
            font_size: Some(self.params.text_font_size),
            alignment: Some(Alignment {
                horizontal: HorizontalAlign::Left,
                vertical: VerticalAlign::Top,
                wrap_text: true,
            }),
            ..Default::default()
        };

        let mut col = 1;
        let mut words = line.words.iter().peekable();
        while let Some(word) = words.next() {
            let value = self.value(&word.text);
            self.sheet.set(self.row_cursor, col, value, style.clone());
            col += 1;
            if let Some(next) = words.peek()
                && next.x0 - word.x1 > self.params.column_gap
            {
                col += 1;
            }
        }
        self.row_cursor += 1;
    }

    fn write_table(&mut self, table: &TableCandidate) {
        let base = CellStyle {
            alignment: Some(Alignment {
                horizontal: HorizontalAlign::Left,
                vertical: VerticalAlign::Center,
                wrap_text: true,
            }),
            border: Some(Border::thin(TABLE_BORDER_COLOR)),
            ..Default::default()
        };

        for (ridx, row) in table.grid.iter().enumerate() {
            let sheet_row = self.row_cursor + ridx as u32;
            for (cidx, raw) in row.iter().enumerate() {
                let value = match raw.as_deref().map(str::trim) {
                    Some(text) if !text.is_empty() => self.value(text),
                    _ => CellValue::Empty,
                };
                let style = CellStyle {
                    bold: ridx == 0,
                    ..base.clone()
                };
                self.sheet.set(sheet_row, cidx as u32 + 1, value, style);
            }
        }
        self.row_cursor += table.grid.len().max(1) as u32 + 1;
    }
}

/// Size columns from the longest displayed value, clamped to the
/// configured width range.
pub fn autofit_columns(sheet: &mut Sheet, params: &GridParams) {
    let max_col = sheet.max_column().min(params.autofit_max_columns);
    let max_row = sheet.max_row().min(params.autofit_max_rows);
    for col in 1..=max_col {
        let longest = (1..=max_row)
            .filter_map(|row| sheet.text(row, col))
            .map(|text| text.chars().count())
            .max()
            .unwrap_or(0);
        let width = (longest as f64 * params.width_scale)
            .clamp(params.min_column_width, params.max_column_width);
        sheet.column_widths.insert(col, width);
    }
}

/// Border every cell of the bounding rectangle of non-blank cells.
pub fn apply_region_borders(sheet: &mut Sheet) {
    let Some((min_row, min_col, max_row, max_col)) = sheet.used_region() else {
        return;
    };
    for row in min_row..=max_row {
        for col in min_col..=max_col {
            sheet.cell_mut(row, col).style.border = Some(Border::thin(REGION_BORDER_COLOR));
        }
    }
}
