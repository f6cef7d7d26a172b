//! Errors raised while reading scraped data.
//!
//! The matching and arbitrage math never fails; degenerate inputs yield
//! `None` or a non-arbitrage result instead.

use thiserror::Error;

/// Failure to interpret a scraped odds label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OddsError {
    /// The label is neither a decimal number nor a suspended marker.
    #[error("Unparseable odds label: {0:?}")]
    Unparseable(String),
}
