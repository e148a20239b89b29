//! Stress tests for the crossbook matching engine.
//!
//! These tests verify:
//! 1. The engine stays consistent under a large random stream
//! 2. Determinism is preserved across runs (state root)
//! 3. The book stays bounded when both sides overlap
//!
//! ## Running Stress Tests
//!
//! ```bash
//! cargo test --release --test stress_test -- --nocapture
//! ```

use std::time::Instant;

use crossbook::{MatchingEngine, Order, Side};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Number of orders for the large stress test
const STRESS_ORDER_COUNT: usize = 200_000;

/// Base price: 100.00
const BASE_PRICE: u64 = 10_000;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Generate deterministic orders for stress testing.
///
/// Uses a seeded RNG for reproducibility. Same seed = same orders.
/// Timestamps are the sequence number, so they never go backwards.
fn generate_deterministic_orders(count: usize, seed: u64, spread: u64, traders: u32) -> Vec<Order> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut orders = Vec::with_capacity(count);

    for i in 0..count {
        let side = if rng.gen_bool(0.5) { Side::Bid } else { Side::Offer };
        let price = rng.gen_range(BASE_PRICE - spread..=BASE_PRICE + spread);
        let quantity: u64 = rng.gen_range(1..=500);
        let trader = rng.gen_range(0..traders);

        orders.push(Order::new(format!("trader-{trader}"), side, price, quantity, i as u64));
    }

    orders
}

/// Run a deterministic order sequence and return the final state root.
fn run_deterministic_sequence(seed: u64, count: usize) -> [u8; 32] {
    let mut engine = MatchingEngine::new();

    for order in generate_deterministic_orders(count, seed, 200, 50) {
        engine.submit(order).unwrap();
    }

    engine.state_root()
}

// ============================================================================
// STRESS TESTS
// ============================================================================

/// Large random stream: every invariant is checked at the end.
#[test]
fn stress_random_stream() {
    println!("\n=== STRESS TEST: {} Orders ===\n", STRESS_ORDER_COUNT);

    let orders = generate_deterministic_orders(STRESS_ORDER_COUNT, 42, 200, 100);
    let submitted: u64 = orders.iter().map(|o| o.quantity).sum();
    let mut engine = MatchingEngine::new();

    let start = Instant::now();
    let mut fill_count = 0;
    let mut filled: u64 = 0;
    for order in orders {
        let result = engine.submit(order).unwrap();
        fill_count += result.fills.len();
        filled += result.filled_quantity;
    }
    let elapsed = start.elapsed();

    println!("  Orders processed:  {:>12}", engine.orders_processed());
    println!("  Fills generated:   {:>12}", fill_count);
    println!("  Final book size:   {:>12}", engine.book().order_count());
    println!("  Elapsed time:      {:>12.2?}", elapsed);
    println!("  State root:        {}", engine.summary().state_root_hex());

    assert!(fill_count > 0, "Expected some fills to occur");
    assert_eq!(engine.fills_executed() as usize, fill_count);
    assert_eq!(engine.volume(), filled);

    // Every unit submitted either traded (counted once on each side) or rests
    let resting = engine.book().depth(Side::Bid) + engine.book().depth(Side::Offer);
    assert_eq!(submitted, 2 * filled + resting);

    // Book never crossed, never holds an empty order
    if let (Some(bid), Some(offer)) = (engine.book().best_bid(), engine.book().best_offer()) {
        assert!(bid < offer, "book left crossed: bid {bid} >= offer {offer}");
    }
    for side in [Side::Bid, Side::Offer] {
        assert!(engine.book().iter(side).all(|o| o.quantity > 0));
    }

    assert_eq!(engine.ledger().net(), 0);
}

/// Verify determinism: Same sequence produces identical state root.
#[test]
fn verify_determinism() {
    const TEST_COUNT: usize = 10_000;
    const SEED: u64 = 12345;

    let root1 = run_deterministic_sequence(SEED, TEST_COUNT);
    let root2 = run_deterministic_sequence(SEED, TEST_COUNT);

    println!("  Run 1 state root: {}", hex::encode(root1));
    println!("  Run 2 state root: {}", hex::encode(root2));
    assert_eq!(root1, root2, "State roots must match for determinism");

    let root3 = run_deterministic_sequence(SEED + 1, TEST_COUNT);
    assert_ne!(root1, root3, "Different seeds should produce different roots");
}

/// With balanced, overlapping flow the book should stay bounded.
#[test]
fn stress_memory_stability() {
    const ITERATIONS: usize = 100_000;
    const MAX_BOOK_SIZE: usize = 50_000;

    let mut engine = MatchingEngine::new();
    let mut max_size_seen = 0;

    for order in generate_deterministic_orders(ITERATIONS, 42, 20, 10) {
        engine.submit(order).unwrap();
        max_size_seen = max_size_seen.max(engine.book().order_count());
    }

    println!("  Max book size:     {:>12}", max_size_seen);
    println!("  Final book size:   {:>12}", engine.book().order_count());

    assert!(
        max_size_seen < MAX_BOOK_SIZE,
        "Book grew too large: {} (max {})",
        max_size_seen,
        MAX_BOOK_SIZE
    );
}
