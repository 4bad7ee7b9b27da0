//! Page dumps produced by the text and table extraction collaborator.
//!
//! A document is a list of pages, each with its positioned tokens and the
//! table detections of every strategy that ran on it:
//!
//! ```json
//! {"pages": [{
//!     "tokens": [{"text": "Total", "x0": 10, "top": 20, "x1": 40, "bottom": 30}],
//!     "detections": [
//!         {"strategy": "lines", "tables": [{"bbox": {"x0": 0, "top": 50, "x1": 200, "bottom": 120},
//!                                           "grid": [["a", "b"], ["c", null]]}]},
//!         {"strategy": "text", "error": "timed out"}
//!     ]
//! }]}
//! ```

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LayoutError, Result};
use crate::layout::Token;
use crate::tables::StrategyDetection;

/// Raw inputs for one page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PageInput {
    #[serde(default)]
    pub tokens: Vec<Token>,
    /// Detections in strategy order; order decides which duplicate wins.
    #[serde(default)]
    pub detections: Vec<StrategyDetection>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub pages: Vec<PageInput>,
}

impl Document {
    pub fn new(pages: Vec<PageInput>) -> Self {
        Self { pages }
    }

    /// Decode a JSON page dump.
    ///
    /// Any decoding failure is reported as [`LayoutError::InvalidDocument`].
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        if data.iter().all(u8::is_ascii_whitespace) {
            return Err(LayoutError::InvalidDocument("empty input".to_string()));
        }
        let doc: Document = serde_json::from_slice(data)
            .map_err(|e| LayoutError::InvalidDocument(e.to_string()))?;
        debug!(pages = doc.pages.len(), "loaded document");
        Ok(doc)
    }

    /// Read and decode a dump. A read failure is an invalid document too.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .map_err(|e| LayoutError::InvalidDocument(e.to_string()))?;
        Self::from_slice(&data)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| LayoutError::InvalidDocument(format!("{}: {}", path.display(), e)))?;
        Self::from_slice(&data)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
