//! Layout types: tokens, table candidates, lines and page elements.
//!
//! All coordinates use a top-left page origin, so `top < bottom` for a
//! well-formed box.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f64,
    #[serde(alias = "y0")]
    pub top: f64,
    pub x1: f64,
    #[serde(alias = "y1")]
    pub bottom: f64,
}

impl BBox {
    pub fn new(x0: f64, top: f64, x1: f64, bottom: f64) -> Self {
        Self {
            x0,
            top,
            x1,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Area with negative dimensions clamped to zero.
    pub fn area(&self) -> f64 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.x0 + self.x1) / 2.0, (self.top + self.bottom) / 2.0)
    }

    pub fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.top.is_finite() && self.x1.is_finite() && self.bottom.is_finite()
    }

    /// The same box with `x0 <= x1` and `top <= bottom`, or `None` when a
    /// coordinate is not finite.
    pub fn normalized(&self) -> Option<BBox> {
        if !self.is_finite() {
            return None;
        }
        Some(BBox {
            x0: self.x0.min(self.x1),
            top: self.top.min(self.bottom),
            x1: self.x0.max(self.x1),
            bottom: self.top.max(self.bottom),
        })
    }
}

/// A positioned run of text produced by the word extractor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub x0: f64,
    pub x1: f64,
    #[serde(alias = "y0")]
    pub top: f64,
    #[serde(alias = "y1")]
    pub bottom: f64,
}

impl Token {
    pub fn new(text: impl Into<String>, x0: f64, top: f64, x1: f64, bottom: f64) -> Self {
        Self {
            text: text.into(),
            x0,
            x1,
            top,
            bottom,
        }
    }

    pub fn bbox(&self) -> BBox {
        BBox::new(self.x0, self.top, self.x1, self.bottom)
    }

    pub fn center(&self) -> (f64, f64) {
        self.bbox().center()
    }

    /// Number of characters (Unicode scalar values) in the text.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// True when the text is non-empty and every character is alphabetic.
    pub fn is_alphabetic(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_alphabetic)
    }

    /// Trim the text and order the coordinates so that `x0 <= x1` and
    /// `top <= bottom`.
    ///
    /// Returns `None` for blank text or non-finite coordinates.
    pub fn normalized(&self) -> Option<Token> {
        let text = self.text.trim();
        if text.is_empty() {
            return None;
        }
        let bbox = self.bbox().normalized()?;
        Some(Token::new(text, bbox.x0, bbox.top, bbox.x1, bbox.bottom))
    }
}

/// Shape summary of a detected table grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableShape {
    pub rows: usize,
    pub cols: usize,
    pub non_empty: usize,
}

/// A rectangular region reported as tabular by a detection strategy, with
/// the cell text the strategy extracted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableCandidate {
    pub bbox: BBox,
    #[serde(default)]
    pub grid: Vec<Vec<Option<String>>>,
}

impl TableCandidate {
    pub fn new(bbox: BBox, grid: Vec<Vec<Option<String>>>) -> Self {
        Self { bbox, grid }
    }

    /// Number of rows in the grid.
    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    /// Length of the longest row.
    pub fn cols(&self) -> usize {
        self.grid.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cells whose trimmed text is non-empty.
    pub fn non_empty_cells(&self) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|cell| cell.as_deref().is_some_and(|s| !s.trim().is_empty()))
            .count()
    }

    /// The candidate with its bbox normalized, or `None` when the bbox has
    /// a non-finite coordinate.
    pub fn normalized(self) -> Option<TableCandidate> {
        let bbox = self.bbox.normalized()?;
        Some(TableCandidate { bbox, ..self })
    }

    pub fn shape(&self) -> TableShape {
        TableShape {
            rows: self.rows(),
            cols: self.cols(),
            non_empty: self.non_empty_cells(),
        }
    }
}

/// Words sharing a visual baseline, sorted left to right.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Line {
    pub y_center: f64,
    pub words: Vec<Token>,
}

impl Line {
    pub fn get_text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One unit of the reading-order stream of a page.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageElement {
    Table { y: f64, table: TableCandidate },
    Line { y: f64, line: Line },
    /// Emitted alone when a page has neither tables nor lines.
    NoContent,
}

impl PageElement {
    /// Vertical sort key. The sentinel sorts at the top of the page.
    pub fn y(&self) -> f64 {
        match self {
            PageElement::Table { y, .. } | PageElement::Line { y, .. } => *y,
            PageElement::NoContent => 0.0,
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, PageElement::Table { .. })
    }

    pub fn is_line(&self) -> bool {
        matches!(self, PageElement::Line { .. })
    }
}

/// Reading-order reconstruction of one page.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageLayout {
    /// 1-based page number in the source document.
    pub page_number: usize,
    pub elements: Vec<PageElement>,
}

impl PageLayout {
    pub fn is_empty(&self) -> bool {
        matches!(self.elements.as_slice(), [PageElement::NoContent])
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableCandidate> {
        self.elements.iter().filter_map(|e| match e {
            PageElement::Table { table, .. } => Some(table),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.elements.iter().filter_map(|e| match e {
            PageElement::Line { line, .. } => Some(line),
            _ => None,
        })
    }
}
