//! Engine configuration.

/// Default number of resting order slots reserved up front.
pub const DEFAULT_ORDER_CAPACITY: usize = 4_096;

/// Tunables for one matching session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Resting order slots to pre-allocate in the book
    pub order_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            order_capacity: DEFAULT_ORDER_CAPACITY,
        }
    }
}

impl EngineConfig {
    pub fn with_order_capacity(mut self, order_capacity: usize) -> Self {
        self.order_capacity = order_capacity;
        self
    }
}
