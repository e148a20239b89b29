//! Error types for the engine and the input feed.

use thiserror::Error;

use crate::types::Side;

/// Errors raised by the matching engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// `submit_bid` was handed an offer, or `submit_offer` a bid
    #[error("expected {expected} order, got {actual} order")]
    SideMismatch { expected: Side, actual: Side },

    /// A participant's net position left the i64 range
    #[error("net position overflow for participant {participant}")]
    PositionOverflow { participant: String },

    /// A session counter or traded quantity no longer fits its integer type
    #[error("quantity overflow: {0}")]
    QuantityOverflow(&'static str),

    /// A fatal error already occurred; the session accepts no more orders
    #[error("engine halted after a fatal error")]
    Halted,
}

impl EngineError {
    /// Errors after which the book may hold a partially applied order
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            EngineError::PositionOverflow { .. } | EngineError::QuantityOverflow(_)
        )
    }
}

/// Errors raised while reading the order feed.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("failed to read feed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("line {line}: invalid price {value:?}")]
    InvalidPrice { line: u64, value: String },

    #[error("line {line}: unknown side {side:?}")]
    UnknownSide { line: u64, side: String },
}
