//! Matching engine module for crossbook.
//!
//! ## Matching Rules
//!
//! - **Bids** cross resting offers priced at or below the bid
//! - **Offers** cross resting bids priced at or above the offer
//! - Each fill trades `min(incoming open, resting open)` at the resting price
//! - **Partial fills** are supported on both sides
//! - **Unfilled quantity** rests on the incoming order's own side
//! - **Self trades** consume quantity but do not move positions
//!
//! ## Example
//!
//! ```
//! use crossbook::engine::MatchingEngine;
//! use crossbook::types::{Order, Side};
//!
//! let mut engine = MatchingEngine::new();
//!
//! // Resting bid, then an offer that crosses it
//! engine.submit_bid(Order::bid("Kaylee", 10_000, 100, 1)).unwrap();
//! let result = engine.submit_offer(Order::offer("Jayne", 9_950, 100, 2)).unwrap();
//!
//! assert!(result.fully_filled());
//! assert_eq!(result.fills[0].price, 10_000);
//! assert!(engine.snapshot_book(Side::Bid).is_empty());
//! ```

pub mod ledger;
pub mod matcher;

pub use ledger::PositionLedger;
pub use matcher::{MatchResult, MatchingEngine, OrderStatus, SessionReport};
