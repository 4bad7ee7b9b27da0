//! Table detection strategies.
//!
//! A strategy is a pure producer of table candidates for one page. Results
//! are gathered per strategy as [`StrategyDetection`] values and reduced
//! afterwards, so no strategy ever sees another's output.

use std::panic::{AssertUnwindSafe, catch_unwind};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LayoutError, Result};
use crate::layout::{TableCandidate, Token};

/// A table detector, e.g. ruled-line based or text-alignment based.
pub trait TableStrategy: Send + Sync {
    /// Stable identifier used in logs and detection records.
    fn id(&self) -> &str;

    /// Detect candidate tables among the page's tokens.
    fn detect(&self, tokens: &[Token]) -> Result<Vec<TableCandidate>>;
}

/// The output of one strategy on one page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrategyDetection {
    pub strategy: String,
    #[serde(default)]
    pub tables: Vec<TableCandidate>,
    /// Set when the strategy failed; `tables` is then ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StrategyDetection {
    pub fn ok(strategy: impl Into<String>, tables: Vec<TableCandidate>) -> Self {
        Self {
            strategy: strategy.into(),
            tables,
            error: None,
        }
    }

    pub fn failed(strategy: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            strategy: strategy.into(),
            tables: Vec::new(),
            error: Some(reason.into()),
        }
    }

    /// The candidates of a successful detection.
    pub fn outcome(&self) -> Result<&[TableCandidate]> {
        match &self.error {
            Some(reason) => Err(LayoutError::StrategyFailed {
                strategy: self.strategy.clone(),
                reason: reason.clone(),
            }),
            None => Ok(&self.tables),
        }
    }

    /// Candidates to feed into deduplication. A failed strategy
    /// contributes nothing.
    pub fn candidates(&self) -> &[TableCandidate] {
        match self.outcome() {
            Ok(tables) => tables,
            Err(e) => {
                debug!(error = %e, "ignoring failed table strategy");
                &[]
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "strategy panicked".to_string()
    }
}

/// Run every strategy on the page's tokens, in order.
///
/// A strategy that returns an error or panics yields a failed detection
/// instead of aborting the page. No timeout is enforced here: a strategy
/// that never returns blocks the page, so detectors must bound their own
/// running time.
pub fn run_strategies(strategies: &[&dyn TableStrategy], tokens: &[Token]) -> Vec<StrategyDetection> {
    strategies
        .iter()
        .map(|strategy| {
            let id = strategy.id();
            match catch_unwind(AssertUnwindSafe(|| strategy.detect(tokens))) {
                Ok(Ok(tables)) => StrategyDetection::ok(id, tables),
                Ok(Err(e)) => StrategyDetection::failed(id, e.to_string()),
                Err(payload) => StrategyDetection::failed(id, panic_message(payload.as_ref())),
            }
        })
        .collect()
}
