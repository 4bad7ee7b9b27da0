//! High-level conversion API.
//!
//! Provides the main public entry points:
//! - `analyze_page()` - Reading-order layout of a single page
//! - `analyze_pages()` - Layouts of every selected page, in page order
//! - `convert()` - Page dump to workbook model

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::converter::{GridConverter, Workbook};
use crate::document::{Document, PageInput};
use crate::error::{LayoutError, Result};
use crate::layout::{GridParams, LayoutParams, PageLayout, TableParams, compose_page};
use crate::tables::detect_tables;

pub(crate) fn default_thread_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Options for layout conversion.
///
/// Deserializable with every field optional, so a partial JSON config file
/// only overrides what it names.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Line clustering and fragment merging.
    pub layout: LayoutParams,

    /// Table deduplication and filtering.
    pub tables: TableParams,

    /// Sheet writing.
    pub grid: GridParams,

    /// Zero-indexed page numbers to convert. None means all pages.
    pub page_numbers: Option<Vec<usize>>,

    /// Maximum number of pages to convert. 0 means no limit.
    pub maxpages: usize,

    /// Worker threads. None uses the available parallelism.
    pub threads: Option<usize>,
}

fn check_range(name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(LayoutError::InvalidOptions(format!(
            "{name} must be between {min} and {max}, got {value}"
        )))
    }
}

impl ConvertOptions {
    /// Check every numeric parameter, whether it came from defaults, a
    /// config file or a command line flag.
    pub fn validate(&self) -> Result<()> {
        check_range("line_tolerance", self.layout.line_tolerance, 0.0, f64::MAX)?;
        check_range("fragment_gap", self.layout.fragment_gap, 0.0, f64::MAX)?;
        check_range("table_margin", self.layout.table_margin, 0.0, f64::MAX)?;
        check_range("dedup_iou", self.tables.dedup_iou, 0.0, 1.0)?;
        check_range("column_gap", self.grid.column_gap, 0.0, f64::MAX)?;
        check_range("width_scale", self.grid.width_scale, 0.0, f64::MAX)?;
        check_range("text_font_size", self.grid.text_font_size, 0.0, f64::MAX)?;
        check_range("min_column_width", self.grid.min_column_width, 0.0, f64::MAX)?;
        check_range(
            "max_column_width",
            self.grid.max_column_width,
            self.grid.min_column_width,
            f64::MAX,
        )?;
        if self.threads == Some(0) {
            return Err(LayoutError::InvalidOptions(
                "threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Reconstruct the layout of one page.
///
/// Table detection runs first and defines the regions whose words are left
/// out of line clustering.
pub fn analyze_page(page: &PageInput, page_number: usize, options: &ConvertOptions) -> PageLayout {
    let tables = detect_tables(&page.detections, &options.tables);
    compose_page(page_number, &page.tokens, tables, &options.layout)
}

fn select_pages<'a>(doc: &'a Document, options: &ConvertOptions) -> Vec<(usize, &'a PageInput)> {
    let mut selected = Vec::new();
    for (page_idx, page) in doc.pages.iter().enumerate() {
        if let Some(nums) = &options.page_numbers
            && !nums.contains(&page_idx)
        {
            continue;
        }
        if options.maxpages > 0 && selected.len() >= options.maxpages {
            break;
        }
        selected.push((page_idx, page));
    }
    selected
}

/// Analyze the selected pages of a decoded document in parallel.
///
/// Options are validated first. Layouts are returned in source page order
/// whatever order the workers finish in.
pub fn analyze_pages_with_document(
    doc: &Document,
    options: &ConvertOptions,
) -> Result<Vec<PageLayout>> {
    options.validate()?;
    let selected = select_pages(doc, options);
    let thread_count = options.threads.unwrap_or_else(default_thread_count).max(1);
    debug!(pages = selected.len(), thread_count, "analyzing pages");

    let pool = ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .build()
        .map_err(|e| LayoutError::ThreadPool(e.to_string()))?;

    let mut results: Vec<(usize, PageLayout)> = pool.install(|| {
        selected
            .into_par_iter()
            .map(|(page_idx, page)| (page_idx, analyze_page(page, page_idx + 1, options)))
            .collect()
    });

    results.sort_by_key(|(page_idx, _)| *page_idx);
    Ok(results.into_iter().map(|(_, layout)| layout).collect())
}

/// Decode a JSON page dump and analyze its pages.
///
/// A malformed dump fails with [`LayoutError::InvalidDocument`] before any
/// page is processed.
pub fn analyze_pages(data: &[u8], options: Option<ConvertOptions>) -> Result<Vec<PageLayout>> {
    let options = options.unwrap_or_default();
    let doc = Document::from_slice(data)?;
    analyze_pages_with_document(&doc, &options)
}

/// Convert an already-decoded document into a workbook, one sheet per page.
pub fn convert_document(doc: &Document, options: &ConvertOptions) -> Result<Workbook> {
    let layouts = analyze_pages_with_document(doc, options)?;
    let mut converter = GridConverter::new(options.grid.clone());
    for layout in &layouts {
        converter.receive_layout(layout);
    }
    Ok(converter.into_workbook())
}

/// Decode a JSON page dump and convert it into a workbook.
///
/// # Example
/// ```ignore
/// use nova_core::high_level::convert;
///
/// let dump = std::fs::read("pages.json")?;
/// let workbook = convert(&dump, None)?;
/// println!("{} sheets", workbook.sheets.len());
/// ```
pub fn convert(data: &[u8], options: Option<ConvertOptions>) -> Result<Workbook> {
    let options = options.unwrap_or_default();
    let doc = Document::from_slice(data)?;
    convert_document(&doc, &options)
}
