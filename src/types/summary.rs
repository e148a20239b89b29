//! Session summary: counters plus the state root of the book and ledger.

use sha2::{Digest, Sha256};

/// Summary of a trading session (or of the session so far).
///
/// ## State Root
///
/// The 32-byte state root is a SHA-256 hash over a canonical encoding of
/// both book sides (priority order) and every ledger entry (participant
/// order). Two runs over the same input must produce the same root.
///
/// ## Example
///
/// ```
/// use crossbook::types::SessionSummary;
///
/// let summary = SessionSummary::new(
///     1000,                   // orders_processed
///     500,                    // fills_executed
///     25_000,                 // volume
///     [0u8; 32],              // state_root
/// );
/// assert_eq!(summary.fill_rate(), Some(0.5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSummary {
    /// Number of orders accepted by the engine (zero-quantity no-ops excluded)
    pub orders_processed: u64,

    /// Number of fills executed, self trades included
    pub fills_executed: u64,

    /// Total traded quantity
    pub volume: u64,

    /// SHA-256 of the book and ledger state
    pub state_root: [u8; 32],
}

impl SessionSummary {
    pub fn new(
        orders_processed: u64,
        fills_executed: u64,
        volume: u64,
        state_root: [u8; 32],
    ) -> Self {
        Self {
            orders_processed,
            fills_executed,
            volume,
            state_root,
        }
    }

    /// Compute SHA-256 hash of the given data
    pub fn compute_hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.finalize().into()
    }

    /// Get the state root as a hex string
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root)
    }

    /// No order was processed in this session
    pub fn is_empty(&self) -> bool {
        self.orders_processed == 0
    }

    /// Fills per processed order
    ///
    /// Returns None if no orders were processed.
    pub fn fill_rate(&self) -> Option<f64> {
        if self.orders_processed == 0 {
            None
        } else {
            Some(self.fills_executed as f64 / self.orders_processed as f64)
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
