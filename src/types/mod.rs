//! Core data types for crossbook
//!
//! ## Types
//!
//! - [`Order`]: A limit order, tagged with its [`Side`]
//! - [`Side`]: Bid or Offer
//! - [`Fill`]: One execution between a bid and an offer
//! - [`SessionSummary`]: Session counters and state root
//!
//! ## Integer Prices
//!
//! All prices are stored as `u64` cents. Example: 10.25 is stored as 1025.

mod order;
mod fill;
mod summary;
pub mod price;

pub use order::{Order, Side};
pub use fill::Fill;
pub use summary::SessionSummary;
