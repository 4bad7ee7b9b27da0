//! nova - page layout reconstruction for spreadsheet export.
//!
//! Takes the positioned words of a page and the tables found by several
//! detection strategies, and rebuilds one de-duplicated, reading-order
//! stream of tables and text lines that can be written onto a sheet grid.

pub mod api;
pub mod converter;
pub mod document;
pub mod error;
pub mod layout;
pub mod tables;

pub use api::high_level;

pub use error::{LayoutError, Result};
