//! Price level: the FIFO queue of orders at one price.
//!
//! ## Queue Structure
//!
//! ```text
//! head (oldest) <-> order2 <-> order3 <-> tail (newest)
//! ```
//!
//! - New orders are appended at the tail
//! - Any order can be removed in O(1) using its slab key
//! - A quantity change keeps the order where it is
//!
//! `total_quantity` is maintained incrementally on every push, remove and
//! resize and always equals the sum of member quantities.

use slab::Slab;

use crate::orderbook::{LevelSummary, OrderNode};
use crate::types::Order;

/// All resting orders at a single price on one side.
///
/// The order data lives in the slab; this struct only holds the queue
/// metadata and the running aggregate.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Price for this level (fixed-point, scaled by 10^8)
    pub price: u64,

    /// Sum of remaining quantity at this level
    pub total_quantity: u64,

    /// Oldest order (slab key)
    pub head: Option<usize>,

    /// Newest order (slab key)
    pub tail: Option<usize>,

    /// Number of orders at this price level
    pub order_count: usize,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new(price: u64) -> Self {
        Self {
            price,
            total_quantity: 0,
            head: None,
            tail: None,
            order_count: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Append an order at the tail of the queue
    ///
    /// # Panics
    ///
    /// Panics if the key doesn't exist in the slab
    pub fn push_back(&mut self, key: usize, slab: &mut Slab<OrderNode>) {
        let node = slab.get_mut(key).expect("Invalid slab key");
        let quantity = node.quantity();

        node.prev = self.tail;
        node.next = None;

        if let Some(tail_key) = self.tail {
            let tail_node = slab.get_mut(tail_key).expect("Invalid tail key");
            tail_node.next = Some(key);
        } else {
            self.head = Some(key);
        }

        self.tail = Some(key);
        self.order_count += 1;
        self.total_quantity += quantity;
    }

    /// Unlink an order from the queue by slab key
    ///
    /// The node stays in the slab with cleared links; the caller decides
    /// whether to free or re-insert it.
    ///
    /// # Returns
    ///
    /// The remaining quantity of the removed order
    pub fn remove(&mut self, key: usize, slab: &mut Slab<OrderNode>) -> u64 {
        let node = slab.get(key).expect("Invalid slab key");
        let quantity = node.quantity();
        let prev_key = node.prev;
        let next_key = node.next;

        if let Some(prev) = prev_key {
            slab.get_mut(prev).expect("Invalid prev key").next = next_key;
        } else {
            self.head = next_key;
        }

        if let Some(next) = next_key {
            slab.get_mut(next).expect("Invalid next key").prev = prev_key;
        } else {
            self.tail = prev_key;
        }

        let node = slab.get_mut(key).expect("Invalid slab key");
        node.prev = None;
        node.next = None;

        self.order_count -= 1;
        self.total_quantity -= quantity;

        quantity
    }

    /// Change an order's quantity in place
    ///
    /// Queue position is untouched. The aggregate moves by
    /// `new_quantity - old_quantity`.
    ///
    /// # Returns
    ///
    /// The previous quantity of the order
    pub fn resize(&mut self, key: usize, new_quantity: u64, slab: &mut Slab<OrderNode>) -> u64 {
        let node = slab.get_mut(key).expect("Invalid slab key");
        let old_quantity = node.set_quantity(new_quantity);

        self.total_quantity = (self.total_quantity - old_quantity) + new_quantity;
        old_quantity
    }

    /// Quantity that can still join this level before the aggregate overflows
    ///
    /// [`PriceLevel::push_back`] and [`PriceLevel::resize`] assume the
    /// caller has checked it.
    #[inline]
    pub fn headroom(&self) -> u64 {
        u64::MAX - self.total_quantity
    }

    /// Iterate the queue from oldest to newest
    pub fn iter<'a>(&self, slab: &'a Slab<OrderNode>) -> LevelIter<'a> {
        LevelIter {
            slab,
            cursor: self.head,
        }
    }

    /// Price and aggregate quantity, as reported in snapshots
    #[inline]
    pub fn summary(&self) -> LevelSummary {
        LevelSummary::new(self.price, self.total_quantity)
    }
}

/// FIFO iterator over the orders of one level.
pub struct LevelIter<'a> {
    slab: &'a Slab<OrderNode>,
    cursor: Option<usize>,
}

impl<'a> Iterator for LevelIter<'a> {
    type Item = &'a Order;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.slab.get(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.order)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
