//! Fixed-point price utilities.
//!
//! ## Overview
//!
//! Prices are stored as u64 scaled by 10^8. A fixed-point integer gives the
//! side indexes a total order and makes "same price" an exact comparison,
//! which a binary float key cannot guarantee.
//!
//! ## Examples
//!
//! ```
//! use limit_book::types::price::{to_fixed, from_fixed, from_f64};
//!
//! let price = to_fixed("99.45").unwrap();
//! assert_eq!(price, 9_945_000_000);
//! assert_eq!(from_f64(99.45), Some(price));
//! assert_eq!(from_fixed(price), "99.45000000");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point prices: 10^8
pub const SCALE: u64 = 100_000_000;

/// Number of decimal places carried by [`SCALE`]
pub const DECIMALS: u32 = 8;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal string to fixed-point u64
///
/// Returns `None` if parsing fails or the value is negative or out of range.
///
/// ```
/// use limit_book::types::price::to_fixed;
///
/// assert_eq!(to_fixed("1.0"), Some(100_000_000));
/// assert_eq!(to_fixed("0.00000001"), Some(1));
/// assert_eq!(to_fixed("-1"), None);
/// ```
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a float to fixed-point u64
///
/// The float is first converted to the nearest short decimal, so `100.01`
/// maps to exactly `10_001_000_000`. NaN, infinities and negative values
/// return `None`.
pub fn from_f64(value: f64) -> Option<u64> {
    if !value.is_finite() {
        return None;
    }
    decimal_to_fixed(Decimal::from_f64(value)?)
}

/// Convert a Decimal to fixed-point u64
///
/// Rounds to 8 decimal places. Returns `None` if the value is negative or
/// out of range.
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() && !d.is_zero() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    scaled.round_dp(0).to_u64()
}

/// Convert fixed-point u64 to a Decimal
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from_i128_with_scale(value as i128, DECIMALS)
}

/// Convert fixed-point u64 to a string with 8 decimal places
///
/// ```
/// use limit_book::types::price::from_fixed;
///
/// assert_eq!(from_fixed(100_000_000), "1.00000000");
/// ```
pub fn from_fixed(value: u64) -> String {
    format!("{:.8}", fixed_to_decimal(value))
}

// ============================================================================
// Unit Tests
// ============================================================================
