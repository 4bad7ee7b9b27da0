//! Table detection and deduplication.
//!
//! Several strategies report candidate tables for a page; this module
//! merges them into one non-overlapping, quality-filtered set.

mod dedup;
mod strategy;

pub use dedup::{dedup_candidates, detect_tables, passes_shape_filter};
pub use strategy::{StrategyDetection, TableStrategy, run_strategies};
