//! Order node for slab-based storage.
//!
//! `OrderNode` wraps an `Order` with doubly-linked list pointers so the
//! node can be unlinked from its price level in O(1) given only its slab key.
//!
//! ## Slab Integration
//!
//! Per slab docs (https://docs.rs/slab/0.4.11):
//! - Keys are `usize` values returned by `slab.insert()`
//! - A key stays valid until that entry is removed, no matter how many
//!   other entries are inserted or removed
//! - Keys may be reused after `slab.remove()`
//!
//! The second property is what lets the order locator hold a key as a
//! position handle into a price level.

use crate::types::Order;

/// Order node stored in the slab.
///
/// `prev` and `next` are slab keys, not references. The node is owned by
/// the slab; the price level only records head and tail keys.
#[derive(Debug, Clone)]
pub struct OrderNode {
    /// The order data
    pub order: Order,

    /// Next (newer) order at the same price, None at the tail
    pub next: Option<usize>,

    /// Previous (older) order at the same price, None at the head
    pub prev: Option<usize>,
}

impl OrderNode {
    /// Create a new, unlinked order node
    ///
    /// ```
    /// use limit_book::orderbook::OrderNode;
    /// use limit_book::types::{Order, Side};
    ///
    /// let node = OrderNode::new(Order::new(1, Side::Buy, 10_000_000_000, 10, 0));
    /// assert!(node.is_unlinked());
    /// ```
    #[inline]
    pub fn new(order: Order) -> Self {
        Self {
            order,
            next: None,
            prev: None,
        }
    }

    /// Check if this node has no neighbours
    ///
    /// Also true for the only order at a level.
    #[inline]
    pub fn is_unlinked(&self) -> bool {
        self.next.is_none() && self.prev.is_none()
    }

    #[inline]
    pub fn quantity(&self) -> u64 {
        self.order.quantity
    }

    /// Replace the remaining quantity, returning the previous value
    #[inline]
    pub fn set_quantity(&mut self, quantity: u64) -> u64 {
        std::mem::replace(&mut self.order.quantity, quantity)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
