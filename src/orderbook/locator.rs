//! Order id to position lookup.
//!
//! Each resting order has exactly one [`OrderLocation`]: its side, its
//! price and the slab key of its node. The key is a back-reference into
//! the price level's queue, not an owner; the slab owns the node.
//!
//! Cancel and amend go through here to reach the right level and queue
//! position in O(1) without scanning.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::types::Side;

/// Where a resting order lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLocation {
    pub side: Side,

    /// Price of the level holding the order (fixed-point)
    pub price: u64,

    /// Slab key of the order's node
    pub key: usize,
}

impl OrderLocation {
    #[inline]
    pub fn new(side: Side, price: u64, key: usize) -> Self {
        Self { side, price, key }
    }
}

/// Hash index from order id to [`OrderLocation`].
#[derive(Debug, Clone, Default)]
pub struct OrderLocator {
    entries: HashMap<u64, OrderLocation>,
}

impl OrderLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Record a location for a new id
    ///
    /// Never overwrites: returns `false` and leaves the index untouched if
    /// the id is already present.
    pub fn insert(&mut self, order_id: u64, location: OrderLocation) -> bool {
        match self.entries.entry(order_id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(location);
                true
            }
        }
    }

    #[inline]
    pub fn get(&self, order_id: u64) -> Option<&OrderLocation> {
        self.entries.get(&order_id)
    }

    #[inline]
    pub fn remove(&mut self, order_id: u64) -> Option<OrderLocation> {
        self.entries.remove(&order_id)
    }

    #[inline]
    pub fn contains(&self, order_id: u64) -> bool {
        self.entries.contains_key(&order_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All (id, location) pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (u64, &OrderLocation)> + '_ {
        self.entries.iter().map(|(id, location)| (*id, location))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
