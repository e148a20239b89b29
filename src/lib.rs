//! # crossbook
//!
//! Continuous double-auction matching engine for a single instrument.
//!
//! ## Architecture
//!
//! - **Types**: Order (tagged Bid/Offer), Fill, SessionSummary
//! - **OrderBook**: two priority-ordered sides over a slab arena
//! - **Engine**: crossing algorithm plus the per-participant position ledger
//! - **Feed**: gzip/CSV input turned into orders, kept apart from the core
//!
//! ## Design Principles
//!
//! 1. **Determinism**: the same input stream yields the same fills, book and
//!    positions, checked through a SHA-256 state root
//! 2. **Integer prices**: prices are cents, every comparison is exact
//! 3. **Strict arrival order**: orders are processed one at a time, each to
//!    completion, in the order the feed delivers them
//! 4. **Checked arithmetic**: a position overflow halts the session instead
//!    of wrapping

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Side, Fill, SessionSummary
pub mod types;

/// Order book: bid and offer sides with price / quantity / time priority
pub mod orderbook;

/// Matching engine and position ledger
pub mod engine;

/// Feed reader for the comma separated order file
pub mod feed;

pub mod config;
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::EngineConfig;
pub use engine::{MatchResult, MatchingEngine, OrderStatus, PositionLedger, SessionReport};
pub use error::{EngineError, FeedError};
pub use orderbook::OrderBook;
pub use types::{Fill, Order, SessionSummary, Side};
