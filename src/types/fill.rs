//! Fill type representing one cross between a bid and an offer.

use crate::types::Side;

/// A fill is a single execution between a resting order and an incoming one.
///
/// ## Price
///
/// The fill executes at the resting order's price.
///
/// ## Self Trades
///
/// When the buyer and the seller are the same participant the fill still
/// consumes quantity on both orders, but `self_trade` is set and the
/// position ledger is left alone.
///
/// ## Example
///
/// ```
/// use crossbook::types::{Fill, Side};
///
/// let fill = Fill {
///     id: 1,
///     bid_order_id: 10,
///     offer_order_id: 11,
///     buyer: "Kaylee".to_string(),
///     seller: "Jayne".to_string(),
///     price: 1_000,
///     quantity: 30,
///     timestamp: 7,
///     aggressor: Side::Offer,
/// };
/// assert!(!fill.is_self_trade());
/// assert_eq!(fill.notional(), 30_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fill {
    /// Fill sequence number within the session (starts at 1)
    pub id: u64,

    /// Bid order that took part in the fill
    pub bid_order_id: u64,

    /// Offer order that took part in the fill
    pub offer_order_id: u64,

    /// Participant on the bid side
    pub buyer: String,

    /// Participant on the offer side
    pub seller: String,

    /// Execution price in cents (the resting order's price)
    pub price: u64,

    /// Executed quantity
    pub quantity: u64,

    /// Timestamp of the incoming order that triggered the fill
    pub timestamp: u64,

    /// Side of the incoming order
    pub aggressor: Side,
}

impl Fill {
    /// Buyer and seller are the same participant
    #[inline]
    pub fn is_self_trade(&self) -> bool {
        self.buyer == self.seller
    }

    /// Notional value in cents (price * quantity)
    pub fn notional(&self) -> u128 {
        (self.price as u128) * (self.quantity as u128)
    }

    /// Order id of the resting side of the fill
    pub fn resting_order_id(&self) -> u64 {
        match self.aggressor {
            Side::Bid => self.offer_order_id,
            Side::Offer => self.bid_order_id,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
