//! One side of the book: price levels in priority order.
//!
//! ## Price Ordering
//!
//! The map key decides the iteration order, so the best level is always
//! the first entry:
//!
//! - **Bids**: `Reverse<u64>` keys, highest price first
//! - **Asks**: `u64` keys, lowest price first
//!
//! A level exists in the map if and only if it holds at least one order.
//! [`SideIndex::push`] creates it on demand and [`SideIndex::unlink`]
//! erases it the moment its queue empties.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;

use slab::Slab;
use tracing::debug;

use crate::orderbook::{LevelSummary, OrderNode, PriceLevel};

/// Map key that fixes a side's sort order.
pub trait LevelKey: Ord + Copy + fmt::Debug {
    /// Build the key for a fixed-point price
    fn from_price(price: u64) -> Self;

    /// Recover the fixed-point price
    fn price(self) -> u64;
}

impl LevelKey for u64 {
    #[inline]
    fn from_price(price: u64) -> Self {
        price
    }

    #[inline]
    fn price(self) -> u64 {
        self
    }
}

impl LevelKey for Reverse<u64> {
    #[inline]
    fn from_price(price: u64) -> Self {
        Reverse(price)
    }

    #[inline]
    fn price(self) -> u64 {
        self.0
    }
}

/// Ordered price levels for one side of the book.
#[derive(Debug, Clone)]
pub struct SideIndex<K: LevelKey> {
    levels: BTreeMap<K, PriceLevel>,
}

/// Bid levels, best (highest) price first
pub type BidIndex = SideIndex<Reverse<u64>>;

/// Ask levels, best (lowest) price first
pub type AskIndex = SideIndex<u64>;

impl<K: LevelKey> Default for SideIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: LevelKey> SideIndex<K> {
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Number of distinct price levels
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level at an exact price
    #[inline]
    pub fn get(&self, price: u64) -> Option<&PriceLevel> {
        self.levels.get(&K::from_price(price))
    }

    /// Best level on this side
    #[inline]
    pub fn best(&self) -> Option<&PriceLevel> {
        self.levels.values().next()
    }

    /// All levels, best first
    pub fn levels(&self) -> impl Iterator<Item = &PriceLevel> + '_ {
        self.levels.values()
    }

    /// All levels paired with the price decoded from their map key, best first
    pub fn entries(&self) -> impl Iterator<Item = (u64, &PriceLevel)> + '_ {
        self.levels.iter().map(|(key, level)| (key.price(), level))
    }

    /// Summaries of at most `depth` levels, best first
    ///
    /// Lazy: walks only the levels it yields.
    pub fn top(&self, depth: usize) -> impl Iterator<Item = LevelSummary> + '_ {
        self.levels.values().take(depth).map(PriceLevel::summary)
    }

    /// Append an order to the level at `price`, creating the level if needed
    pub fn push(&mut self, price: u64, key: usize, slab: &mut Slab<OrderNode>) {
        let level = self.levels.entry(K::from_price(price)).or_insert_with(|| {
            debug!(price, "price level created");
            PriceLevel::new(price)
        });
        level.push_back(key, slab);
    }

    /// Unlink an order from the level at `price`
    ///
    /// Erases the level if it is now empty.
    ///
    /// # Returns
    ///
    /// The removed quantity, or None if no level exists at `price`
    pub fn unlink(&mut self, price: u64, key: usize, slab: &mut Slab<OrderNode>) -> Option<u64> {
        let map_key = K::from_price(price);
        let level = self.levels.get_mut(&map_key)?;
        let quantity = level.remove(key, slab);

        if level.is_empty() {
            self.levels.remove(&map_key);
            debug!(price, "price level erased");
        }

        Some(quantity)
    }

    /// Change an order's quantity in place at the level at `price`
    ///
    /// # Returns
    ///
    /// The previous quantity, or None if no level exists at `price`
    pub fn resize(
        &mut self,
        price: u64,
        key: usize,
        quantity: u64,
        slab: &mut Slab<OrderNode>,
    ) -> Option<u64> {
        let level = self.levels.get_mut(&K::from_price(price))?;
        Some(level.resize(key, quantity, slab))
    }

    /// Remove every level
    pub fn clear(&mut self) {
        self.levels.clear();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
