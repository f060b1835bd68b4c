//! Depth snapshot of the book.
//!
//! A snapshot is a plain copy of the top levels of each side, already in
//! priority order. Its [`Display`](fmt::Display) impl renders the console
//! ladder; it never looks at the book itself.

use std::fmt;

use ssz_rs::prelude::*;

use crate::types::price::fixed_to_decimal;

/// Price and aggregate quantity of one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, SimpleSerialize)]
pub struct LevelSummary {
    /// Price in fixed-point (scaled by 10^8)
    pub price: u64,

    /// Sum of remaining quantity at this price
    pub total_quantity: u64,
}

impl LevelSummary {
    #[inline]
    pub fn new(price: u64, total_quantity: u64) -> Self {
        Self {
            price,
            total_quantity,
        }
    }
}

/// Top-of-book view returned by [`OrderBook::get_snapshot`].
///
/// [`OrderBook::get_snapshot`]: crate::orderbook::OrderBook::get_snapshot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookSnapshot {
    /// Depth that was requested
    pub depth: usize,

    /// Bid levels, highest price first
    pub bids: Vec<LevelSummary>,

    /// Ask levels, lowest price first
    pub asks: Vec<LevelSummary>,
}

impl BookSnapshot {
    pub fn best_bid(&self) -> Option<&LevelSummary> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&LevelSummary> {
        self.asks.first()
    }

    /// Best ask minus best bid, if both sides are present and not crossed
    pub fn spread(&self) -> Option<u64> {
        let bid = self.best_bid()?.price;
        self.best_ask()?.price.checked_sub(bid)
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

const RULE_WIDTH: usize = 50;

/// Fixed-point price rendered with two decimals
fn cents(price: u64) -> String {
    format!("{:.2}", fixed_to_decimal(price))
}

impl fmt::Display for BookSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "{rule}")?;
        writeln!(f, "ORDER BOOK (Top {} levels)", self.depth)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "{:>15} | {:>15}", "BIDS", "ASKS")?;
        writeln!(f, "{:>8} {:>6} | {:>8} {:>6}", "Price", "Qty", "Price", "Qty")?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;

        let rows = self.bids.len().max(self.asks.len());
        for i in 0..rows {
            match self.bids.get(i) {
                Some(level) => write!(f, "{:>8} {:>6}", cents(level.price), level.total_quantity)?,
                None => write!(f, "{:>15}", "")?,
            }
            write!(f, " | ")?;
            if let Some(level) = self.asks.get(i) {
                write!(f, "{:>8} {:>6}", cents(level.price), level.total_quantity)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "{rule}")?;
        if let Some(spread) = self.spread() {
            writeln!(f, "Spread: {}", cents(spread))?;
        }
        write!(f, "{rule}")
    }
}
