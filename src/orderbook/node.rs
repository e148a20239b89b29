//! Order node for slab-based storage.
//!
//! ## Design
//!
//! `OrderNode` wraps a resting `Order` with the arrival sequence number it
//! was given when it first entered the book. The sequence survives partial
//! fills, so an order that is re-keyed after shrinking keeps its place among
//! orders with identical price, quantity and timestamp.
//!
//! ## Slab Integration
//!
//! Per official slab docs (https://docs.rs/slab/0.4.11):
//! - Keys are `usize` values returned by `slab.insert()`
//! - Keys may be reused after `slab.remove()`
//! - O(1) insert, remove, and lookup

use crate::orderbook::priority::PriorityKey;
use crate::types::Order;

/// Order node stored in the slab.
#[derive(Debug, Clone)]
pub struct OrderNode {
    /// The resting order
    pub order: Order,

    /// Arrival sequence within the book
    pub seq: u64,
}

impl OrderNode {
    /// Wrap an order with its arrival sequence
    ///
    /// # Example
    ///
    /// ```
    /// use crossbook::orderbook::OrderNode;
    /// use crossbook::types::Order;
    ///
    /// let node = OrderNode::new(Order::bid("a", 1_000, 10, 0), 7);
    /// assert_eq!(node.seq, 7);
    /// assert_eq!(node.quantity(), 10);
    /// ```
    #[inline]
    pub fn new(order: Order, seq: u64) -> Self {
        Self { order, seq }
    }

    /// Current priority key; changes whenever the open quantity changes
    #[inline]
    pub fn key(&self) -> PriorityKey {
        PriorityKey::new(self.order.side, &self.order, self.seq)
    }

    #[inline]
    pub fn price(&self) -> u64 {
        self.order.price
    }

    #[inline]
    pub fn quantity(&self) -> u64 {
        self.order.quantity
    }

    /// Fill a portion of this order, returning the quantity actually filled
    #[inline]
    pub fn fill(&mut self, quantity: u64) -> u64 {
        self.order.fill(quantity)
    }

    #[inline]
    pub fn is_filled(&self) -> bool {
        self.order.is_filled()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
