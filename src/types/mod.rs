//! Core data types for the limit book.
//!
//! - [`Order`]: A resting limit order
//! - [`Side`]: Buy or Sell
//! - [`price`]: Fixed-point price conversions (scaled by 10^8)

mod order;
pub mod price;

pub use order::{Order, Side};
