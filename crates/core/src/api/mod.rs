//! High-level API module for layout conversion.
//!
//! # Example
//!
//! ```ignore
//! use nova_core::api::{convert, ConvertOptions};
//!
//! let dump = std::fs::read("pages.json")?;
//! let workbook = convert(&dump, Some(ConvertOptions::default()))?;
//! ```

pub mod high_level;

// Re-export for convenience
pub use high_level::{
    ConvertOptions, analyze_page, analyze_pages, analyze_pages_with_document, convert,
    convert_document,
};
