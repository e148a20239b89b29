//! Order book module for the crossbook matching engine.
//!
//! ## Architecture
//!
//! - **Slab-based storage**: every resting order lives in one arena under a
//!   stable slot key
//! - **Priority index per side**: a `BTreeMap` ordered by [`PriorityKey`]
//! - **Priority rule**: price, then larger quantity, then earlier timestamp
//!
//! ## Components
//!
//! - [`priority`]: the per-side comparison rule and its key form
//! - [`OrderNode`]: a resting order plus its arrival sequence
//! - [`OrderBook`]: both sides, with peek/pop/rest/reduce and snapshots
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Rest order | O(log n) |
//! | Peek best | O(log n) |
//! | Pop best | O(log n) |
//! | Reduce best | O(log n) |
//! | Snapshot | O(n) |

pub mod priority;
pub mod node;
pub mod book;

pub use node::OrderNode;
pub use book::OrderBook;
pub use priority::{compare, PriorityKey};
