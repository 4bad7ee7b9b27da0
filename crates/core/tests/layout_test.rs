//! Tests for page composition: line grouping, table exclusion and ordering.

use nova_core::layout::{
    BBox, LayoutParams, PageElement, TableCandidate, TableParams, Token, compose_page,
    exclusion_regions, partition_tokens,
};
use nova_core::tables::{StrategyDetection, detect_tables};

fn word(text: &str, x0: f64, top: f64) -> Token {
    Token::new(text, x0, top, x0 + 30.0, top + 8.0)
}

fn grid(rows: usize, cols: usize) -> Vec<Vec<Option<String>>> {
    (0..rows)
        .map(|r| (0..cols).map(|c| Some(format!("{r}-{c}"))).collect())
        .collect()
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn test_two_bands_without_tables() {
    let tokens = vec![
        word("footer", 0.0, 500.0),
        word("title", 0.0, 10.0),
        word("subtitle", 200.0, 11.5),
        word("page", 200.0, 501.0),
    ];
    let layout = compose_page(1, &tokens, Vec::new(), &LayoutParams::default());

    assert_eq!(layout.tables().count(), 0);
    let lines: Vec<String> = layout.lines().map(|l| l.get_text()).collect();
    assert_eq!(lines, vec!["title subtitle", "footer page"]);
    assert!(layout.elements[0].y() < layout.elements[1].y());
}

#[test]
fn test_near_duplicate_tables_keep_first_strategy() {
    let first = TableCandidate::new(BBox::new(0.0, 0.0, 100.0, 100.0), grid(3, 3));
    let second = TableCandidate::new(BBox::new(0.0, 0.0, 100.0, 90.0), grid(2, 2));
    let detections = vec![
        StrategyDetection::ok("lines", vec![first.clone()]),
        StrategyDetection::ok("text", vec![second]),
    ];
    let tables = detect_tables(&detections, &TableParams::default());
    assert_eq!(tables, vec![first]);
}

#[test]
fn test_single_row_table_is_treated_as_text() {
    let row = TableCandidate::new(BBox::new(0.0, 40.0, 500.0, 60.0), grid(1, 5));
    let detections = vec![StrategyDetection::ok("text", vec![row])];
    let tables = detect_tables(&detections, &TableParams::default());
    assert!(tables.is_empty());

    let tokens = vec![word("alpha", 0.0, 45.0), word("beta", 100.0, 45.0)];
    let layout = compose_page(1, &tokens, tables, &LayoutParams::default());
    assert!(layout.elements.iter().all(PageElement::is_line));
    assert_eq!(layout.lines().count(), 1);
}

#[test]
fn test_split_word_is_rejoined() {
    let tokens = vec![
        Token::new("hn", 11.0, 0.0, 20.0, 10.0),
        Token::new("Jo", 0.0, 0.0, 10.0, 10.0),
    ];
    let layout = compose_page(1, &tokens, Vec::new(), &LayoutParams::default());
    let line = layout.lines().next().unwrap();
    assert_eq!(line.words.len(), 1);
    assert_eq!(line.words[0].text, "John");
}

// ============================================================================
// Exclusion and ordering
// ============================================================================

#[test]
fn test_words_inside_table_are_excluded() {
    let table = TableCandidate::new(BBox::new(100.0, 100.0, 300.0, 200.0), grid(2, 2));
    let tokens = vec![
        word("heading", 0.0, 50.0),
        word("cell", 150.0, 150.0),
        // Center at (130.5, 104) is inside the 1 unit margin.
        Token::new("edge", 100.5, 100.0, 160.5, 108.0),
        word("after", 0.0, 250.0),
    ];
    let layout = compose_page(3, &tokens, vec![table.clone()], &LayoutParams::default());

    assert_eq!(layout.page_number, 3);
    assert_eq!(layout.elements.len(), 3);
    assert!(matches!(&layout.elements[0], PageElement::Line { line, .. } if line.get_text() == "heading"));
    assert!(matches!(&layout.elements[1], PageElement::Table { y, table: t } if *y == 100.0 && *t == table));
    assert!(matches!(&layout.elements[2], PageElement::Line { line, .. } if line.get_text() == "after"));
}

#[test]
fn test_partition_accounts_for_every_token() {
    let regions = exclusion_regions(
        &[TableCandidate::new(BBox::new(0.0, 0.0, 50.0, 50.0), grid(2, 2))],
        1.0,
    );
    let tokens = vec![
        word("in", 5.0, 5.0),
        word("out", 100.0, 100.0),
        Token::new("   ", 200.0, 200.0, 210.0, 210.0),
        Token::new("nan", f64::NAN, 0.0, 10.0, 10.0),
    ];
    let partition = partition_tokens(&tokens, &regions);
    assert_eq!(partition.excluded, 1);
    assert_eq!(partition.dropped, 2);
    assert_eq!(partition.free.len(), 1);
    assert_eq!(partition.free[0].text, "out");
}

#[test]
fn test_table_precedes_line_at_equal_y() {
    let table = TableCandidate::new(BBox::new(200.0, 50.0, 400.0, 150.0), grid(2, 2));
    // A single word has its cluster center at its own top.
    let tokens = vec![word("left", 0.0, 50.0)];
    let layout = compose_page(1, &tokens, vec![table], &LayoutParams::default());
    assert_eq!(layout.elements[0].y(), layout.elements[1].y());
    assert!(layout.elements[0].is_table());
    assert!(layout.elements[1].is_line());
}

#[test]
fn test_equidistant_word_joins_earlier_line() {
    // Tops 0, 3, 6, 9 chain into one cluster (center 4.5); 13.5 stands
    // alone. The word at 9 is 4.5 from both centers.
    let tokens = vec![
        word("a", 0.0, 0.0),
        word("b", 100.0, 3.0),
        word("c", 200.0, 6.0),
        word("d", 300.0, 9.0),
        word("e", 0.0, 13.5),
    ];
    let layout = compose_page(1, &tokens, Vec::new(), &LayoutParams::default());
    let lines: Vec<_> = layout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].y_center, 4.5);
    assert_eq!(lines[0].get_text(), "a b c d");
    assert_eq!(lines[1].get_text(), "e");
}

#[test]
fn test_inverted_token_is_normalized() {
    let tokens = vec![Token::new("flip", 40.0, 18.0, 10.0, 10.0)];
    let layout = compose_page(1, &tokens, Vec::new(), &LayoutParams::default());
    let line = layout.lines().next().unwrap();
    assert_eq!(line.words[0].x0, 10.0);
    assert_eq!(line.words[0].x1, 40.0);
    assert_eq!(line.y_center, 10.0);
}

#[test]
fn test_empty_page_yields_sentinel() {
    let layout = compose_page(1, &[], Vec::new(), &LayoutParams::default());
    assert_eq!(layout.elements, vec![PageElement::NoContent]);
    assert!(layout.is_empty());

    let blank = vec![Token::new(" ", 0.0, 0.0, 5.0, 5.0)];
    let layout = compose_page(2, &blank, Vec::new(), &LayoutParams::default());
    assert!(layout.is_empty());
}

#[test]
fn test_table_only_page_has_no_sentinel() {
    let table = TableCandidate::new(BBox::new(0.0, 0.0, 100.0, 100.0), grid(2, 2));
    let layout = compose_page(1, &[], vec![table], &LayoutParams::default());
    assert_eq!(layout.elements.len(), 1);
    assert!(layout.elements[0].is_table());
    assert!(!layout.is_empty());
}

#[test]
fn test_inverted_table_bbox_still_excludes_its_words() {
    let table = TableCandidate::new(BBox::new(300.0, 200.0, 100.0, 100.0), grid(2, 2));
    let tokens = vec![
        Token::new("cell", 150.0, 150.0, 180.0, 158.0),
        word("below", 0.0, 250.0),
    ];
    let layout = compose_page(1, &tokens, vec![table], &LayoutParams::default());

    assert_eq!(layout.tables().count(), 1);
    assert_eq!(layout.tables().next().unwrap().bbox, BBox::new(100.0, 100.0, 300.0, 200.0));
    let lines: Vec<String> = layout.lines().map(|l| l.get_text()).collect();
    assert_eq!(lines, vec!["below"]);
    let ys: Vec<f64> = layout.elements.iter().map(PageElement::y).collect();
    assert_eq!(ys, vec![100.0, 250.0]);
}

#[test]
fn test_detection_normalizes_before_dedup() {
    let upright = TableCandidate::new(BBox::new(0.0, 0.0, 100.0, 100.0), grid(2, 2));
    let flipped = TableCandidate::new(BBox::new(100.0, 100.0, 0.0, 0.0), grid(3, 3));
    let broken = TableCandidate::new(BBox::new(0.0, f64::NAN, 50.0, 50.0), grid(3, 3));
    let detections = vec![
        StrategyDetection::ok("lines", vec![upright.clone(), broken]),
        StrategyDetection::ok("text", vec![flipped]),
    ];
    let tables = detect_tables(&detections, &TableParams::default());
    assert_eq!(tables, vec![upright]);
}
