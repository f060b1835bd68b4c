//! Order record for the limit book.
//!
//! ## SSZ Serialization
//!
//! `Order` derives `SimpleSerialize` from ssz_rs so that the book's state
//! root is computed over a fixed, platform-independent byte layout:
//! - Basic types (u64, u8): little-endian
//! - Fixed-size containers: fields concatenated in declaration order
//!
//! ## Fixed-Point Representation
//!
//! Prices are stored as u64 scaled by 10^8 (see [`crate::types::price`]).
//! Quantities are plain unit counts.

use ssz_rs::prelude::*;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
///
/// Represented as u8 for SSZ compatibility:
/// - Buy = 0
/// - Sell = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Buy order (bid)
    #[default]
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A resting limit order.
///
/// `id`, side and `timestamp` are fixed for the life of the order.
/// `quantity` is the remaining quantity and is the only field an amend
/// changes in place; a price change re-inserts the order.
///
/// ## SSZ Layout
///
/// Fixed-size container, 33 bytes (8+1+8+8+8).
///
/// ## Example
///
/// ```
/// use limit_book::types::{Order, Side};
///
/// // Buy 10 units at 100.00
/// let order = Order::new(
///     1,                  // id
///     Side::Buy,          // side
///     10_000_000_000,     // price: 100.00000000
///     10,                 // quantity
///     1_000,              // timestamp
/// );
/// assert_eq!(order.side(), Side::Buy);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Order {
    /// Unique order identifier (supplied by the caller)
    pub id: u64,

    /// Order side as u8 (0=Buy, 1=Sell)
    pub side_raw: u8,

    /// Price in fixed-point (scaled by 10^8)
    pub price: u64,

    /// Remaining quantity
    pub quantity: u64,

    /// Arrival timestamp, used only as a tiebreak and never regenerated
    pub timestamp: u64,
}

impl Order {
    /// Create a new limit order
    ///
    /// # Arguments
    ///
    /// * `id` - Unique order identifier
    /// * `side` - Buy or Sell
    /// * `price` - Price in fixed-point (scaled by 10^8)
    /// * `quantity` - Quantity in units
    /// * `timestamp` - Caller-assigned arrival timestamp
    pub fn new(id: u64, side: Side, price: u64, quantity: u64, timestamp: u64) -> Self {
        Self {
            id,
            side_raw: side.to_u8(),
            price,
            quantity,
            timestamp,
        }
    }

    /// Get the order side
    pub fn side(&self) -> Side {
        Side::from_u8(self.side_raw).unwrap_or(Side::Buy)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_conversion() {
        assert_eq!(Side::Buy.to_u8(), 0);
        assert_eq!(Side::Sell.to_u8(), 1);
        assert_eq!(Side::from_u8(0), Some(Side::Buy));
        assert_eq!(Side::from_u8(1), Some(Side::Sell));
        assert_eq!(Side::from_u8(2), None);
    }

    #[test]
    fn test_order_new() {
        let order = Order::new(7, Side::Sell, 10_100_000_000, 25, 4_000);

        assert_eq!(order.id, 7);
        assert_eq!(order.side(), Side::Sell);
        assert_eq!(order.price, 10_100_000_000);
        assert_eq!(order.quantity, 25);
        assert_eq!(order.timestamp, 4_000);
    }

    #[test]
    fn test_order_ssz_size() {
        let order = Order::new(1, Side::Buy, 10_000_000_000, 10, 0);
        let bytes = ssz_rs::serialize(&order).expect("Failed to serialize");

        // id + side_raw + price + quantity + timestamp
        assert_eq!(bytes.len(), 33, "Order should serialize to 33 bytes");
    }

    #[test]
    fn test_order_deterministic_serialization() {
        let order = Order::new(1, Side::Sell, 10_300_000_000, 40, 4_000);

        let bytes1 = ssz_rs::serialize(&order).expect("Failed to serialize");
        let bytes2 = ssz_rs::serialize(&order).expect("Failed to serialize");

        assert_eq!(bytes1, bytes2, "SSZ serialization must be deterministic");
        // id is the first field, little-endian
        assert_eq!(&bytes1[..8], &1u64.to_le_bytes());
        assert_eq!(bytes1[8], Side::Sell.to_u8());
    }
}
