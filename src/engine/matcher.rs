//! The crossing algorithm.
//!
//! An incoming order walks the opposite side of the book from the best
//! resting order down, filling `min(open, resting)` at each step, until it
//! is exhausted or the best resting price no longer crosses. Whatever is left
//! rests on the order's own side at its original price and timestamp.

use tracing::{debug, error, trace, warn};

use crate::config::EngineConfig;
use crate::engine::PositionLedger;
use crate::error::EngineError;
use crate::orderbook::OrderBook;
use crate::types::{Fill, Order, SessionSummary, Side};

/// Outcome of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// Zero-quantity order; nothing happened
    Ignored,
    /// No fill; the whole order rests
    Resting,
    /// Some fills; the remainder rests
    PartiallyFilled,
    /// Fully filled; nothing rests
    Filled,
}

/// Result of matching one incoming order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Id assigned to the incoming order (0 if it was ignored)
    pub order_id: u64,
    pub status: OrderStatus,
    /// Fills in execution order
    pub fills: Vec<Fill>,
    /// Quantity executed against the book
    pub filled_quantity: u64,
    /// Quantity left resting on the order's own side
    pub resting_quantity: u64,
}

impl MatchResult {
    fn ignored() -> Self {
        Self {
            order_id: 0,
            status: OrderStatus::Ignored,
            fills: Vec::new(),
            filled_quantity: 0,
            resting_quantity: 0,
        }
    }

    #[inline]
    pub fn fully_filled(&self) -> bool {
        self.status == OrderStatus::Filled
    }

    #[inline]
    pub fn traded(&self) -> bool {
        !self.fills.is_empty()
    }
}

/// Final state handed back by [`MatchingEngine::close_session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    /// Every participant seen, in participant order
    pub positions: Vec<(String, i64)>,
    /// Bids left in the book, highest priority first
    pub bids: Vec<Order>,
    /// Offers left in the book, highest priority first
    pub offers: Vec<Order>,
    /// Counters and the state root taken just before the book was drained
    pub summary: SessionSummary,
}

/// Matching engine for one instrument and one session.
///
/// Owns the book and the ledger outright. Every mutation goes through
/// `&mut self`, so a crossing loop always runs to completion before anything
/// else can observe the book.
#[derive(Debug)]
pub struct MatchingEngine {
    book: OrderBook,
    ledger: PositionLedger,
    next_order_id: u64,
    next_fill_id: u64,
    orders_processed: u64,
    volume: u64,
    halted: bool,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            book: OrderBook::with_capacity(config.order_capacity),
            ledger: PositionLedger::new(),
            next_order_id: 1,
            next_fill_id: 1,
            orders_processed: 0,
            volume: 0,
            halted: false,
        }
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Submit a bid. Fails with `SideMismatch` if `order` is an offer.
    pub fn submit_bid(&mut self, order: Order) -> Result<MatchResult, EngineError> {
        Self::expect_side(Side::Bid, &order)?;
        self.submit(order)
    }

    /// Submit an offer. Fails with `SideMismatch` if `order` is a bid.
    pub fn submit_offer(&mut self, order: Order) -> Result<MatchResult, EngineError> {
        Self::expect_side(Side::Offer, &order)?;
        self.submit(order)
    }

    /// Submit an order of either side.
    ///
    /// # Example
    ///
    /// ```
    /// use crossbook::engine::{MatchingEngine, OrderStatus};
    /// use crossbook::types::Order;
    ///
    /// let mut engine = MatchingEngine::new();
    /// engine.submit(Order::bid("Kaylee", 10_000, 30, 1)).unwrap();
    ///
    /// let result = engine.submit(Order::offer("Jayne", 10_000, 50, 2)).unwrap();
    /// assert_eq!(result.status, OrderStatus::PartiallyFilled);
    /// assert_eq!(result.resting_quantity, 20);
    /// assert_eq!(engine.position("Kaylee"), 30);
    /// assert_eq!(engine.position("Jayne"), -30);
    /// ```
    pub fn submit(&mut self, order: Order) -> Result<MatchResult, EngineError> {
        if self.halted {
            return Err(EngineError::Halted);
        }

        if order.quantity == 0 {
            warn!(
                participant = %order.participant,
                side = %order.side,
                timestamp = order.timestamp,
                "ignoring zero-quantity order"
            );
            return Ok(MatchResult::ignored());
        }

        match self.cross(order) {
            Err(err) if err.is_fatal() => {
                error!(%err, "halting engine");
                self.halted = true;
                Err(err)
            }
            result => result,
        }
    }

    fn expect_side(expected: Side, order: &Order) -> Result<(), EngineError> {
        if order.side == expected {
            Ok(())
        } else {
            Err(EngineError::SideMismatch {
                expected,
                actual: order.side,
            })
        }
    }

    fn cross(&mut self, mut incoming: Order) -> Result<MatchResult, EngineError> {
        let orders_processed = self
            .orders_processed
            .checked_add(1)
            .ok_or(EngineError::QuantityOverflow("orders processed"))?;
        self.orders_processed = orders_processed;

        incoming.id = self.next_order_id;
        self.next_order_id += 1;
        self.ledger.touch(&incoming.participant);

        let side = incoming.side;
        let resting_side = side.opposite();
        let original = incoming.quantity;
        let mut fills = Vec::new();

        while incoming.quantity > 0 {
            let Some(best) = self.book.peek_best(resting_side) else {
                break;
            };
            if !side.crosses(incoming.price, best.price) {
                break;
            }

            let traded = incoming.quantity.min(best.quantity);
            let volume = self
                .volume
                .checked_add(traded)
                .ok_or(EngineError::QuantityOverflow("session volume"))?;

            let (bid, offer) = match side {
                Side::Bid => (&incoming, best),
                Side::Offer => (best, &incoming),
            };
            self.ledger
                .record_fill(&bid.participant, &offer.participant, traded)?;

            let fill = Fill {
                id: self.next_fill_id,
                bid_order_id: bid.id,
                offer_order_id: offer.id,
                buyer: bid.participant.clone(),
                seller: offer.participant.clone(),
                price: best.price,
                quantity: traded,
                timestamp: incoming.timestamp,
                aggressor: side,
            };
            debug!(
                fill_id = fill.id,
                buyer = %fill.buyer,
                seller = %fill.seller,
                price = fill.price,
                quantity = fill.quantity,
                self_trade = fill.is_self_trade(),
                "fill"
            );

            self.next_fill_id += 1;
            self.volume = volume;
            incoming.quantity -= traded;
            self.book.reduce_best(resting_side, traded);
            fills.push(fill);
        }

        let order_id = incoming.id;
        let resting_quantity = incoming.quantity;
        if resting_quantity > 0 {
            trace!(order_id, %side, price = incoming.price, quantity = resting_quantity, "resting residual");
            self.book.rest(incoming);
        }

        let status = match (fills.is_empty(), resting_quantity) {
            (true, _) => OrderStatus::Resting,
            (false, 0) => OrderStatus::Filled,
            (false, _) => OrderStatus::PartiallyFilled,
        };

        Ok(MatchResult {
            order_id,
            status,
            fills,
            filled_quantity: original - resting_quantity,
            resting_quantity,
        })
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Net position of `participant`; zero if the participant was never seen
    pub fn position(&self, participant: &str) -> i64 {
        self.ledger.position(participant)
    }

    pub fn ledger(&self) -> &PositionLedger {
        &self.ledger
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// Resting orders on `side`, highest priority first. Does not modify the book.
    pub fn snapshot_book(&self, side: Side) -> Vec<Order> {
        self.book.snapshot(side)
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn orders_processed(&self) -> u64 {
        self.orders_processed
    }

    pub fn fills_executed(&self) -> u64 {
        self.next_fill_id - 1
    }

    pub fn volume(&self) -> u64 {
        self.volume
    }

    // ========================================================================
    // State Root
    // ========================================================================

    /// SHA-256 over the book (both sides, priority order) and the ledger.
    ///
    /// Order ids and session counters are not part of the state.
    pub fn state_root(&self) -> [u8; 32] {
        let mut buf = Vec::with_capacity(64 * self.book.order_count() + 32 * self.ledger.len());

        for side in [Side::Bid, Side::Offer] {
            buf.push(side.to_u8());
            buf.extend_from_slice(&(self.book.count(side) as u64).to_le_bytes());
            for order in self.book.iter(side) {
                encode_str(&mut buf, &order.participant);
                buf.extend_from_slice(&order.price.to_le_bytes());
                buf.extend_from_slice(&order.quantity.to_le_bytes());
                buf.extend_from_slice(&order.timestamp.to_le_bytes());
            }
        }

        buf.extend_from_slice(&(self.ledger.len() as u64).to_le_bytes());
        for (participant, position) in self.ledger.iter() {
            encode_str(&mut buf, participant);
            buf.extend_from_slice(&position.to_le_bytes());
        }

        SessionSummary::compute_hash(&buf)
    }

    /// Counters and state root of the session so far
    pub fn summary(&self) -> SessionSummary {
        SessionSummary::new(
            self.orders_processed,
            self.fills_executed(),
            self.volume,
            self.state_root(),
        )
    }

    /// End the session: drain both sides of the book and report final state.
    pub fn close_session(mut self) -> SessionReport {
        let summary = self.summary();
        let bids = self.book.drain(Side::Bid);
        let offers = self.book.drain(Side::Offer);
        let positions = self
            .ledger
            .iter()
            .map(|(participant, position)| (participant.to_owned(), position))
            .collect();

        SessionReport {
            positions,
            bids,
            offers,
            summary,
        }
    }
}

fn encode_str(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u64).to_le_bytes());
    buf.extend_from_slice(s.as_bytes());
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resting_when_book_empty() {
        let mut engine = MatchingEngine::new();

        let result = engine.submit_bid(Order::bid("a", 1_000, 10, 0)).unwrap();

        assert_eq!(result.status, OrderStatus::Resting);
        assert_eq!(result.order_id, 1);
        assert_eq!(result.resting_quantity, 10);
        assert!(!result.traded());
        assert_eq!(engine.book().bid_count(), 1);
    }

    #[test]
    fn test_side_mismatch() {
        let mut engine = MatchingEngine::new();

        let err = engine.submit_bid(Order::offer("a", 1_000, 10, 0)).unwrap_err();
        assert_eq!(
            err,
            EngineError::SideMismatch {
                expected: Side::Bid,
                actual: Side::Offer
            }
        );

        let err = engine.submit_offer(Order::bid("a", 1_000, 10, 0)).unwrap_err();
        assert!(matches!(err, EngineError::SideMismatch { .. }));
        assert!(engine.book().is_empty());
        assert!(!engine.is_halted());
    }

    #[test]
    fn test_zero_quantity_is_noop() {
        let mut engine = MatchingEngine::new();
        engine.submit(Order::bid("a", 1_000, 10, 0)).unwrap();
        let before = engine.state_root();

        let result = engine.submit(Order::offer("b", 900, 0, 1)).unwrap();

        assert_eq!(result.status, OrderStatus::Ignored);
        assert_eq!(result.order_id, 0);
        assert_eq!(engine.state_root(), before);
        assert_eq!(engine.ledger().get("b"), None);
        assert_eq!(engine.orders_processed(), 1);
    }

    #[test]
    fn test_offer_partial_fill_rests_remainder() {
        let mut engine = MatchingEngine::new();
        engine.submit_bid(Order::bid("buyer", 100, 30, 1)).unwrap();

        let result = engine.submit_offer(Order::offer("seller", 100, 50, 2)).unwrap();

        assert_eq!(result.fills.len(), 1);
        assert_eq!(result.fills[0].quantity, 30);
        assert_eq!(result.status, OrderStatus::PartiallyFilled);
        assert_eq!(result.resting_quantity, 20);
        assert_eq!(engine.book().bid_count(), 0);

        let offers = engine.snapshot_book(Side::Offer);
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].quantity, 20);
        assert_eq!(offers[0].price, 100);
        assert_eq!(offers[0].timestamp, 2);
    }

    #[test]
    fn test_fill_at_resting_price() {
        let mut engine = MatchingEngine::new();
        engine.submit(Order::offer("s", 990, 10, 0)).unwrap();

        let result = engine.submit(Order::bid("b", 1_000, 10, 1)).unwrap();

        let fill = &result.fills[0];
        assert_eq!(fill.price, 990);
        assert_eq!(fill.aggressor, Side::Bid);
        assert_eq!(fill.bid_order_id, 2);
        assert_eq!(fill.offer_order_id, 1);
        assert_eq!(fill.resting_order_id(), 1);
        assert!(result.fully_filled());
    }

    #[test]
    fn test_resting_partial_is_rekeyed() {
        let mut engine = MatchingEngine::new();
        engine.submit(Order::bid("big", 1_000, 50, 0)).unwrap();
        engine.submit(Order::bid("mid", 1_000, 40, 1)).unwrap();

        // takes 20 from "big", which now ranks behind "mid"
        engine.submit(Order::offer("s", 1_000, 20, 2)).unwrap();

        let bids = engine.snapshot_book(Side::Bid);
        assert_eq!(bids[0].participant, "mid");
        assert_eq!(bids[1].participant, "big");
        assert_eq!(bids[1].quantity, 30);
        assert_eq!(bids[1].timestamp, 0);
    }

    #[test]
    fn test_sweeps_multiple_levels() {
        let mut engine = MatchingEngine::new();
        engine.submit(Order::offer("a", 1_000, 10, 0)).unwrap();
        engine.submit(Order::offer("b", 1_010, 10, 1)).unwrap();
        engine.submit(Order::offer("c", 1_020, 10, 2)).unwrap();

        let result = engine.submit(Order::bid("x", 1_010, 25, 3)).unwrap();

        assert_eq!(result.fills.len(), 2);
        assert_eq!(result.filled_quantity, 20);
        assert_eq!(result.resting_quantity, 5);
        assert_eq!(engine.book().best_bid(), Some(1_010));
        assert_eq!(engine.book().best_offer(), Some(1_020));
        assert_eq!(engine.position("x"), 20);
        assert_eq!(engine.fills_executed(), 2);
        assert_eq!(engine.volume(), 20);
    }

    #[test]
    fn test_self_trade_consumes_without_position() {
        let mut engine = MatchingEngine::new();
        engine.submit(Order::bid("Mal", 1_000, 10, 0)).unwrap();

        let result = engine.submit(Order::offer("Mal", 1_000, 10, 1)).unwrap();

        assert!(result.fully_filled());
        assert!(result.fills[0].is_self_trade());
        assert!(engine.book().is_empty());
        assert_eq!(engine.ledger().get("Mal"), Some(0));
    }

    #[test]
    fn test_position_overflow_halts() {
        let mut engine = MatchingEngine::new();
        engine.submit(Order::bid("a", 1_000, i64::MAX as u64, 0)).unwrap();
        engine.submit(Order::offer("b", 1_000, i64::MAX as u64, 1)).unwrap();
        engine.submit(Order::bid("c", 1_000, 2, 2)).unwrap();

        let err = engine.submit(Order::offer("b", 1_000, 2, 3)).unwrap_err();
        assert_eq!(err, EngineError::PositionOverflow { participant: "b".into() });
        assert!(engine.is_halted());
        assert_eq!(engine.position("c"), 0);
        assert_eq!(engine.snapshot_book(Side::Bid)[0].quantity, 2);

        assert_eq!(
            engine.submit(Order::bid("d", 1, 1, 4)).unwrap_err(),
            EngineError::Halted
        );
    }

    #[test]
    fn test_state_root_tracks_state() {
        let mut a = MatchingEngine::new();
        let mut b = MatchingEngine::new();
        assert_eq!(a.state_root(), b.state_root());

        a.submit(Order::bid("x", 1_000, 10, 0)).unwrap();
        assert_ne!(a.state_root(), b.state_root());

        b.submit(Order::bid("x", 1_000, 10, 0)).unwrap();
        assert_eq!(a.state_root(), b.state_root());
    }

    #[test]
    fn test_close_session_drains() {
        let mut engine = MatchingEngine::new();
        engine.submit(Order::bid("a", 1_000, 10, 0)).unwrap();
        engine.submit(Order::bid("b", 1_005, 10, 1)).unwrap();
        engine.submit(Order::offer("c", 1_010, 5, 2)).unwrap();
        engine.submit(Order::offer("d", 1_005, 4, 3)).unwrap();
        let root = engine.state_root();

        let report = engine.close_session();

        assert_eq!(report.summary.state_root, root);
        assert_eq!(report.summary.orders_processed, 4);
        assert_eq!(report.summary.fills_executed, 1);
        assert_eq!(report.bids.len(), 2);
        assert_eq!(report.bids[0].participant, "b");
        assert_eq!(report.bids[0].quantity, 6);
        assert_eq!(report.offers.len(), 1);
        assert_eq!(
            report.positions,
            vec![
                ("a".to_string(), 0),
                ("b".to_string(), 4),
                ("c".to_string(), 0),
                ("d".to_string(), -4),
            ]
        );
    }
}
