//! # Limit Book
//!
//! Live state of a two-sided limit order book for a single instrument.
//!
//! ## Architecture
//!
//! - **Types**: `Order`, `Side`, fixed-point prices
//! - **OrderBook**: slab-backed price levels with an O(1) order locator
//! - **Config / Error**: sizing defaults and the error taxonomy
//!
//! ## Design Principles
//!
//! 1. **Resting liquidity only**: orders are added, cancelled and amended,
//!    never matched
//! 2. **No Floating Point keys**: prices are u64 scaled by 10^8
//! 3. **Stable handles**: a slab key identifies an order's queue position
//!    for as long as the order rests
//! 4. **Synchronous Execution**: every call runs to completion; callers
//!    provide any locking
//!
//! ## Quick Start
//!
//! ```
//! use limit_book::{OrderBook, Order, Side};
//! use limit_book::types::price::to_fixed;
//!
//! let mut book = OrderBook::new();
//! book.add(Order::new(1, Side::Buy, to_fixed("99.50").unwrap(), 100, 1)).unwrap();
//! book.add(Order::new(2, Side::Sell, to_fixed("100.00").unwrap(), 75, 2)).unwrap();
//!
//! let snapshot = book.get_snapshot(5);
//! assert_eq!(snapshot.spread(), to_fixed("0.5"));
//! println!("{snapshot}");
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Side, fixed-point prices
pub mod types;

/// Order book engine and its indexes
pub mod orderbook;

/// Sizing and display configuration
pub mod config;

/// Error types
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use crate::config::BookConfig;
pub use error::{BookError, InvariantViolation};
pub use orderbook::{BookSnapshot, LevelSummary, OrderBook, PriceLevel};
pub use types::{Order, Side};
