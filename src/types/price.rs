//! Fixed-point price utilities.
//!
//! ## Overview
//!
//! The feed carries prices as decimal text ("10.25"). The engine compares
//! prices as integers, so every price is scaled by [`SCALE`] into cents on
//! the way in. Conversion goes through `rust_decimal` so that values like
//! "10.15" land on exactly 1015 instead of drifting through binary floating
//! point.
//!
//! ## Examples
//!
//! ```
//! use crossbook::types::price::{to_cents, from_cents};
//!
//! let price = to_cents("50000.12").unwrap();
//! assert_eq!(price, 5_000_012);
//! assert_eq!(from_cents(price), "50000.12");
//! ```

use std::str::FromStr;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor: prices are stored in hundredths.
pub const SCALE: u64 = 100;

/// Number of decimal places kept after scaling.
pub const DECIMALS: u32 = 2;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal string to integer cents
///
/// Sub-cent digits are rounded to the nearest cent (banker's rounding, as
/// `rust_decimal` does by default).
///
/// # Returns
///
/// * `Some(u64)` - The scaled price
/// * `None` - If parsing fails, the value is negative, or out of range
///
/// # Example
///
/// ```
/// use crossbook::types::price::to_cents;
///
/// assert_eq!(to_cents("1"), Some(100));
/// assert_eq!(to_cents("10.15"), Some(1_015));
/// assert_eq!(to_cents("-1"), None);
/// ```
pub fn to_cents(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s.trim()).ok()?;
    decimal_to_cents(decimal)
}

/// Convert a Decimal to integer cents
///
/// # Returns
///
/// * `None` - If value is negative or does not fit in u64
pub fn decimal_to_cents(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() && !d.is_zero() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    scaled.round_dp(0).to_u64()
}

/// Convert integer cents back to a Decimal
pub fn cents_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Format integer cents with two decimal places
///
/// # Example
///
/// ```
/// use crossbook::types::price::from_cents;
///
/// assert_eq!(from_cents(100), "1.00");
/// assert_eq!(from_cents(1_015), "10.15");
/// ```
pub fn from_cents(value: u64) -> String {
    let mut decimal = cents_to_decimal(value);
    decimal.rescale(DECIMALS);
    decimal.to_string()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_cents_basic() {
        assert_eq!(to_cents("1.0"), Some(100));
        assert_eq!(to_cents("1"), Some(100));
        assert_eq!(to_cents("0.5"), Some(50));
        assert_eq!(to_cents("0.01"), Some(1));
        assert_eq!(to_cents(" 12.34 "), Some(1_234));
    }

    #[test]
    fn test_to_cents_exact_where_float_drifts() {
        // 10.15f32 * 100 truncates to 1014
        assert_eq!(to_cents("10.15"), Some(1_015));
        assert_eq!(to_cents("0.29"), Some(29));
    }

    #[test]
    fn test_to_cents_rounding() {
        assert_eq!(to_cents("1.004"), Some(100));
        assert_eq!(to_cents("1.006"), Some(101));
    }

    #[test]
    fn test_to_cents_edge_cases() {
        assert_eq!(to_cents("0"), Some(0));
        assert_eq!(to_cents("-0"), Some(0));
        assert_eq!(to_cents("-1.0"), None);
        assert_eq!(to_cents("abc"), None);
        assert_eq!(to_cents(""), None);
        assert_eq!(to_cents("1e400"), None);
    }

    #[test]
    fn test_from_cents() {
        assert_eq!(from_cents(100), "1.00");
        assert_eq!(from_cents(50), "0.50");
        assert_eq!(from_cents(1), "0.01");
        assert_eq!(from_cents(0), "0.00");
        assert_eq!(from_cents(5_000_012), "50000.12");
    }
}
