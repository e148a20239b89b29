//! Two-sided order book.
//!
//! ## Architecture
//!
//! - **Slab**: arena holding every resting order under a stable slot key
//! - **BTreeMap per side**: [`PriorityKey`] -> slot, smallest key = best order
//!
//! A key encodes the order's open quantity, so an order whose quantity
//! changes must be re-keyed: [`OrderBook::reduce_best`] takes the best
//! entry out of the index, shrinks the order in the arena and re-inserts it
//! under its new key in O(log n). The slot never moves.
//!
//! ## Example
//!
//! ```
//! use crossbook::orderbook::OrderBook;
//! use crossbook::types::{Order, Side};
//!
//! let mut book = OrderBook::with_capacity(16);
//! book.rest(Order::bid("a", 1_000, 10, 0));
//! book.rest(Order::offer("b", 1_010, 10, 1));
//!
//! assert_eq!(book.best_bid(), Some(1_000));
//! assert_eq!(book.best_offer(), Some(1_010));
//! assert_eq!(book.spread(), Some(10));
//! ```

use std::collections::BTreeMap;

use slab::Slab;
use tracing::trace;

use crate::orderbook::priority::PriorityKey;
use crate::orderbook::OrderNode;
use crate::types::{Order, Side};

/// Resting bids and offers for one instrument.
#[derive(Debug, Default)]
pub struct OrderBook {
    /// Order storage, key: slot
    orders: Slab<OrderNode>,

    /// Bid index, best (highest price) first
    bids: BTreeMap<PriorityKey, usize>,

    /// Offer index, best (lowest price) first
    offers: BTreeMap<PriorityKey, usize>,

    /// Next arrival sequence number
    next_seq: u64,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a book with room for `order_capacity` resting orders
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            ..Self::default()
        }
    }

    #[inline]
    fn index(&self, side: Side) -> &BTreeMap<PriorityKey, usize> {
        match side {
            Side::Bid => &self.bids,
            Side::Offer => &self.offers,
        }
    }

    #[inline]
    fn index_mut(&mut self, side: Side) -> &mut BTreeMap<PriorityKey, usize> {
        match side {
            Side::Bid => &mut self.bids,
            Side::Offer => &mut self.offers,
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    /// Total number of resting orders
    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Number of resting orders on one side
    #[inline]
    pub fn count(&self, side: Side) -> usize {
        self.index(side).len()
    }

    #[inline]
    pub fn bid_count(&self) -> usize {
        self.bids.len()
    }

    #[inline]
    pub fn offer_count(&self) -> usize {
        self.offers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Total open quantity resting on one side
    pub fn depth(&self, side: Side) -> u64 {
        self.iter(side).map(|order| order.quantity).sum()
    }

    // ========================================================================
    // Core Operations
    // ========================================================================

    /// Rest an order on the side named by its tag.
    ///
    /// # Returns
    ///
    /// The slot the order was stored under, or `None` if the order has no
    /// open quantity (such an order is never placed in the book).
    pub fn rest(&mut self, order: Order) -> Option<usize> {
        if order.quantity == 0 {
            return None;
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        let side = order.side;
        let node = OrderNode::new(order, seq);
        let key = node.key();
        let slot = self.orders.insert(node);
        self.index_mut(side).insert(key, slot);

        trace!(%side, slot, seq, "order rested");
        Some(slot)
    }

    /// Highest-priority resting order on `side`, without removing it
    pub fn peek_best(&self, side: Side) -> Option<&Order> {
        let (_, &slot) = self.index(side).first_key_value()?;
        self.orders.get(slot).map(|node| &node.order)
    }

    /// Remove and return the highest-priority resting order on `side`
    pub fn pop_best(&mut self, side: Side) -> Option<Order> {
        let (_, slot) = self.index_mut(side).pop_first()?;
        self.orders.try_remove(slot).map(|node| node.order)
    }

    /// Take `quantity` off the best order on `side`.
    ///
    /// An order that reaches zero is removed from the book; otherwise it is
    /// re-keyed with its reduced quantity. Price, timestamp and arrival
    /// sequence are preserved.
    ///
    /// # Returns
    ///
    /// The order's open quantity after the reduction, or `None` if the side
    /// is empty.
    pub fn reduce_best(&mut self, side: Side, quantity: u64) -> Option<u64> {
        let (_, slot) = self.index_mut(side).pop_first()?;

        let (left, key) = {
            let node = self.orders.get_mut(slot)?;
            node.fill(quantity);
            (node.quantity(), node.key())
        };

        if left == 0 {
            self.orders.remove(slot);
        } else {
            self.index_mut(side).insert(key, slot);
        }

        Some(left)
    }

    // ========================================================================
    // Best Prices
    // ========================================================================

    /// Best price on one side
    #[inline]
    pub fn best_price(&self, side: Side) -> Option<u64> {
        self.peek_best(side).map(|order| order.price)
    }

    /// Highest bid price
    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.best_price(Side::Bid)
    }

    /// Lowest offer price
    #[inline]
    pub fn best_offer(&self) -> Option<u64> {
        self.best_price(Side::Offer)
    }

    /// best_offer - best_bid, when both sides are present and not crossed
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_offer()) {
            (Some(bid), Some(offer)) if offer >= bid => Some(offer - bid),
            _ => None,
        }
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Resting orders on `side`, highest priority first
    pub fn iter(&self, side: Side) -> impl Iterator<Item = &Order> + '_ {
        self.index(side)
            .values()
            .filter_map(move |&slot| self.orders.get(slot).map(|node| &node.order))
    }

    /// Copy of the resting orders on `side`, highest priority first.
    ///
    /// The book is left untouched.
    pub fn snapshot(&self, side: Side) -> Vec<Order> {
        self.iter(side).cloned().collect()
    }

    /// Remove every order on `side`, returning them highest priority first
    pub fn drain(&mut self, side: Side) -> Vec<Order> {
        let index = std::mem::take(self.index_mut(side));
        index
            .into_values()
            .filter_map(|slot| self.orders.try_remove(slot).map(|node| node.order))
            .collect()
    }

    /// Clear all orders from the book
    pub fn clear(&mut self) {
        self.orders.clear();
        self.bids.clear();
        self.offers.clear();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
