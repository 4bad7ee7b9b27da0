//! Layout reconstruction for extracted pages.
//!
//! This module contains:
//! - Layout types (Token, TableCandidate, Line, PageElement, PageLayout)
//! - Layout parameters (LayoutParams, TableParams)
//! - Geometry and clustering helpers
//! - Fragment merging, line grouping and page composition

pub mod clustering;
pub mod compose;
pub mod geometry;
pub mod lines;
pub mod params;
pub mod types;
pub mod words;

// Re-export params
pub use params::*;

// Re-export layout types
pub use types::*;

pub use clustering::{cluster_1d, cluster_groups, nearest_index};
pub use compose::{TokenPartition, compose_page, exclusion_regions, partition_tokens};
pub use geometry::{bbox_overlap, find_region, iou};
pub use lines::group_lines;
pub use words::merge_fragments;
