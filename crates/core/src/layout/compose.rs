//! Page composition: interleave tables and text lines by vertical position.

use ordered_float::OrderedFloat;
use tracing::{debug, trace};

use super::geometry::find_region;
use super::lines::group_lines;
use super::params::LayoutParams;
use super::types::{BBox, PageElement, PageLayout, TableCandidate, Token};

/// Regions whose words belong to a table rather than to free text.
pub fn exclusion_regions(tables: &[TableCandidate], margin: f64) -> Vec<BBox> {
    tables.iter().map(|t| t.bbox.expand(margin)).collect()
}

/// Result of splitting a page's tokens against the exclusion regions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenPartition {
    /// Normalized tokens outside every region.
    pub free: Vec<Token>,
    /// Tokens whose center falls inside a region.
    pub excluded: usize,
    /// Blank or non-finite tokens that were dropped.
    pub dropped: usize,
}

/// Split tokens into free words and words covered by a table, by
/// center-point containment.
pub fn partition_tokens(tokens: &[Token], regions: &[BBox]) -> TokenPartition {
    let mut partition = TokenPartition::default();
    for token in tokens {
        let Some(token) = token.normalized() else {
            trace!(text = %token.text, "dropping unusable token");
            partition.dropped += 1;
            continue;
        };
        let (cx, cy) = token.center();
        if find_region(cx, cy, regions).is_some() {
            partition.excluded += 1;
        } else {
            partition.free.push(token);
        }
    }
    partition
}

/// Build the reading-order layout of one page from its tokens and its
/// retained tables.
///
/// Table bboxes are normalized first; a table with a non-finite bbox is
/// dropped. Tables are listed first and the whole stream is then stably
/// sorted by `y`, so a table wins a tie with a line. A page with nothing on
/// it yields a single [`PageElement::NoContent`].
pub fn compose_page(
    page_number: usize,
    tokens: &[Token],
    tables: Vec<TableCandidate>,
    params: &LayoutParams,
) -> PageLayout {
    let tables: Vec<TableCandidate> = tables
        .into_iter()
        .filter_map(TableCandidate::normalized)
        .collect();
    let regions = exclusion_regions(&tables, params.table_margin);
    let partition = partition_tokens(tokens, &regions);
    debug!(
        page_number,
        tables = tables.len(),
        free = partition.free.len(),
        excluded = partition.excluded,
        dropped = partition.dropped,
        "partitioned tokens"
    );

    let mut elements: Vec<PageElement> = tables
        .into_iter()
        .map(|table| PageElement::Table {
            y: table.bbox.top,
            table,
        })
        .collect();
    elements.extend(
        group_lines(partition.free, params)
            .into_iter()
            .map(|line| PageElement::Line {
                y: line.y_center,
                line,
            }),
    );
    elements.sort_by_key(|e| OrderedFloat(e.y()));

    if elements.is_empty() {
        elements.push(PageElement::NoContent);
    }
    PageLayout {
        page_number,
        elements,
    }
}
