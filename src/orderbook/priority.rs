//! Priority rules for the two sides of the book.
//!
//! Both sides rank resting orders by three keys:
//!
//! 1. price: highest first for bids, lowest first for offers
//! 2. larger open quantity first
//! 3. earlier timestamp first
//!
//! [`compare`] is the rule itself. [`PriorityKey`] is the same rule folded
//! into a plain `Ord` value so a side of the book can live in a `BTreeMap`.
//! The key carries one more field, the arrival sequence, which only breaks
//! ties between orders that are equal on all three keys and makes the
//! ordering total and deterministic.

use std::cmp::{Ordering, Reverse};

use crate::types::{Order, Side};

/// Compare two orders of the same side by book priority.
///
/// `Ordering::Less` means `a` is matched before `b`.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use crossbook::orderbook::priority::compare;
/// use crossbook::types::{Order, Side};
///
/// let high = Order::bid("a", 1_010, 10, 0);
/// let low = Order::bid("b", 1_000, 10, 0);
/// assert_eq!(compare(Side::Bid, &high, &low), Ordering::Less);
/// assert_eq!(compare(Side::Offer, &high, &low), Ordering::Greater);
/// ```
pub fn compare(side: Side, a: &Order, b: &Order) -> Ordering {
    let by_price = match side {
        Side::Bid => b.price.cmp(&a.price),
        Side::Offer => a.price.cmp(&b.price),
    };

    by_price
        .then_with(|| b.quantity.cmp(&a.quantity))
        .then_with(|| a.timestamp.cmp(&b.timestamp))
}

/// Bid side rule: price descending, then quantity descending, then time.
#[inline]
pub fn bid_priority(a: &Order, b: &Order) -> Ordering {
    compare(Side::Bid, a, b)
}

/// Offer side rule: price ascending, then quantity descending, then time.
#[inline]
pub fn offer_priority(a: &Order, b: &Order) -> Ordering {
    compare(Side::Offer, a, b)
}

/// Sort key of a resting order within its side.
///
/// The smallest key is the best order. For bids the price is stored
/// bit-inverted so that a higher price yields a smaller key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PriorityKey {
    price_rank: u64,
    quantity_rank: Reverse<u64>,
    timestamp: u64,
    seq: u64,
}

impl PriorityKey {
    /// Build the key of `order` on `side`, with `seq` as the arrival number
    pub fn new(side: Side, order: &Order, seq: u64) -> Self {
        let price_rank = match side {
            Side::Bid => !order.price,
            Side::Offer => order.price,
        };

        Self {
            price_rank,
            quantity_rank: Reverse(order.quantity),
            timestamp: order.timestamp,
            seq,
        }
    }

    /// Arrival sequence number carried by the key
    #[inline]
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
