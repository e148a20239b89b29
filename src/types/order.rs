//! Order types for the crossbook matching engine.
//!
//! ## Single Record, Explicit Side
//!
//! There is exactly one order type. Whether it is a bid or an offer is an
//! immutable [`Side`] tag carried by each instance, and the book picks the
//! priority rule for a collection from that tag.
//!
//! ## Integer Prices
//!
//! Prices are stored as `u64` in cents (see [`crate::types::price`]), so
//! every comparison in the book is exact.

use std::fmt;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Bid or Offer
///
/// Represented as u8 in the state root encoding:
/// - Bid = 0
/// - Offer = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    /// Bid - wants to buy at a maximum acceptable price
    Bid,
    /// Offer - wants to sell at a minimum acceptable price
    Offer,
}

impl Side {
    /// Convert to u8 for encoding
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Bid => 0,
            Side::Offer => 1,
        }
    }

    /// Convert from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Bid),
            1 => Some(Side::Offer),
            _ => None,
        }
    }

    /// Side marker used by the input feed: `B` for bids, `S` for offers.
    pub fn from_feed_char(c: char) -> Option<Self> {
        match c {
            'B' => Some(Side::Bid),
            'S' => Some(Side::Offer),
            _ => None,
        }
    }

    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Offer,
            Side::Offer => Side::Bid,
        }
    }

    /// Does a resting order at `resting_price` on the opposite side cross an
    /// incoming order of this side at `incoming_price`?
    ///
    /// An incoming bid crosses offers priced at or below its own price; an
    /// incoming offer crosses bids priced at or above its own price.
    #[inline]
    pub fn crosses(self, incoming_price: u64, resting_price: u64) -> bool {
        match self {
            Side::Bid => resting_price <= incoming_price,
            Side::Offer => resting_price >= incoming_price,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => f.write_str("bid"),
            Side::Offer => f.write_str("offer"),
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A limit order, either incoming or resting in the book.
///
/// `quantity` is the quantity still open: it shrinks as the order fills and
/// an order whose quantity reaches zero is never kept in a book.
///
/// ## Example
///
/// ```
/// use crossbook::types::{Order, Side};
///
/// // Kaylee wants to buy 100 at 10.25
/// let order = Order::bid("Kaylee", 1_025, 100, 1_703_577_600_000);
/// assert_eq!(order.side, Side::Bid);
/// assert_eq!(order.id, 0); // assigned by the engine on submission
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Order {
    /// Order identifier (assigned by the engine, 0 until submitted)
    pub id: u64,

    /// Participant identity
    pub participant: String,

    /// Bid or Offer
    pub side: Side,

    /// Limit price in cents
    pub price: u64,

    /// Open quantity
    pub quantity: u64,

    /// Feed timestamp; non-decreasing across the stream but not unique
    pub timestamp: u64,
}

impl Order {
    /// Create a new limit order
    ///
    /// # Arguments
    ///
    /// * `participant` - Participant identity
    /// * `side` - Bid or Offer
    /// * `price` - Limit price in cents
    /// * `quantity` - Order quantity
    /// * `timestamp` - Feed timestamp
    pub fn new(
        participant: impl Into<String>,
        side: Side,
        price: u64,
        quantity: u64,
        timestamp: u64,
    ) -> Self {
        Self {
            id: 0,
            participant: participant.into(),
            side,
            price,
            quantity,
            timestamp,
        }
    }

    /// Shorthand for a bid
    pub fn bid(participant: impl Into<String>, price: u64, quantity: u64, timestamp: u64) -> Self {
        Self::new(participant, Side::Bid, price, quantity, timestamp)
    }

    /// Shorthand for an offer
    pub fn offer(participant: impl Into<String>, price: u64, quantity: u64, timestamp: u64) -> Self {
        Self::new(participant, Side::Offer, price, quantity, timestamp)
    }

    /// Check if the order has no open quantity left
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.quantity == 0
    }

    /// Fill a portion of this order
    ///
    /// # Returns
    ///
    /// The actual quantity filled (never more than the open quantity)
    pub fn fill(&mut self, fill_qty: u64) -> u64 {
        let actual_fill = fill_qty.min(self.quantity);
        self.quantity -= actual_fill;
        actual_fill
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.side {
            Side::Bid => "buy",
            Side::Offer => "sell",
        };
        write!(
            f,
            "{}: {} wants to {} {} at {}",
            self.timestamp,
            self.participant,
            verb,
            self.quantity,
            crate::types::price::from_cents(self.price)
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
