//! Order book engine.
//!
//! ## Architecture
//!
//! Three indexes describe the same set of resting orders:
//!
//! - **Slab**: owns every [`OrderNode`]; a node's key is its position handle
//! - **Side indexes**: `BTreeMap` of price levels, each level an intrusive
//!   FIFO list threaded through the slab
//! - **Locator**: `HashMap` from order id to side, price and slab key
//!
//! Every mutating call updates all three before returning. Between calls:
//!
//! 1. every locator entry names a node queued at the level matching its
//!    recorded side and price;
//! 2. every indexed level is non-empty and its aggregate equals the sum of
//!    its members' quantities;
//! 3. the queued orders across both sides are exactly the located ids.
//!
//! [`OrderBook::check_invariants`] audits all of this in O(N).
//!
//! ## Complexity
//!
//! | Operation                    | Cost             |
//! |------------------------------|------------------|
//! | `add`                        | O(log P)         |
//! | `cancel`                     | O(1), O(log P) when a level empties |
//! | `amend` (same price)         | O(1)             |
//! | `amend` (new price)          | O(log P)         |
//! | `get_snapshot(depth)`        | O(min(depth, P)) per side |
//!
//! P is the number of levels on the affected side.
//!
//! ## Example
//!
//! ```
//! use limit_book::orderbook::OrderBook;
//! use limit_book::types::{price, Order, Side};
//!
//! let mut book = OrderBook::with_capacity(1_000);
//! let px = |s| price::to_fixed(s).unwrap();
//!
//! book.add(Order::new(1, Side::Buy, px("100.00"), 10, 1)).unwrap();
//! book.add(Order::new(2, Side::Sell, px("101.00"), 20, 2)).unwrap();
//!
//! assert!(book.amend(1, px("100.00"), 50));
//! assert!(book.cancel(2));
//!
//! let snapshot = book.get_snapshot(5);
//! assert_eq!(snapshot.bids[0].total_quantity, 50);
//! assert!(snapshot.asks.is_empty());
//! ```

use sha2::{Digest, Sha256};
use slab::Slab;
use tracing::{debug, trace, warn};

use crate::config::BookConfig;
use crate::error::{BookError, InvariantViolation};
use crate::orderbook::{
    AskIndex, BidIndex, BookSnapshot, LevelKey, OrderLocation, OrderLocator, OrderNode,
    PriceLevel, SideIndex,
};
use crate::types::{Order, Side};

/// Limit order book for a single instrument.
///
/// Tracks resting liquidity only; it never matches or crosses orders.
/// Not internally synchronized: wrap it in a lock or give it a single
/// owning thread.
#[derive(Debug)]
pub struct OrderBook {
    /// Order storage, keyed by position handle
    orders: Slab<OrderNode>,

    /// Bid levels (highest price first)
    bids: BidIndex,

    /// Ask levels (lowest price first)
    asks: AskIndex,

    /// Order id to location
    locator: OrderLocator,

    /// Depth used by [`OrderBook::snapshot`]
    default_depth: usize,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// Create an empty book with default configuration
    pub fn new() -> Self {
        Self::with_config(&BookConfig::default())
    }

    /// Create an empty book with room for `order_capacity` orders
    ///
    /// ```
    /// use limit_book::orderbook::OrderBook;
    ///
    /// let book = OrderBook::with_capacity(100_000);
    /// assert!(book.capacity() >= 100_000);
    /// ```
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self::with_config(&BookConfig {
            order_capacity,
            ..BookConfig::default()
        })
    }

    pub fn with_config(config: &BookConfig) -> Self {
        Self {
            orders: Slab::with_capacity(config.order_capacity),
            bids: BidIndex::new(),
            asks: AskIndex::new(),
            locator: OrderLocator::with_capacity(config.order_capacity),
            default_depth: config.default_depth,
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Pre-allocated order slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    /// Number of resting orders
    #[inline]
    pub fn total_orders(&self) -> usize {
        self.locator.len()
    }

    /// Number of distinct bid prices
    #[inline]
    pub fn bid_level_count(&self) -> usize {
        self.bids.len()
    }

    /// Number of distinct ask prices
    #[inline]
    pub fn ask_level_count(&self) -> usize {
        self.asks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.locator.is_empty()
    }

    // ========================================================================
    // Order Management
    // ========================================================================

    /// Rest a new order at the back of its price level
    ///
    /// # Errors
    ///
    /// - [`BookError::InvalidQuantity`] if the quantity is zero
    /// - [`BookError::InvalidPrice`] if the price is zero
    /// - [`BookError::DuplicateOrderId`] if the id is already resting
    /// - [`BookError::QuantityOverflow`] if the level's aggregate would
    ///   exceed `u64::MAX`
    ///
    /// The book is unchanged when an error is returned.
    pub fn add(&mut self, order: Order) -> Result<(), BookError> {
        if order.quantity == 0 {
            warn!(order_id = order.id, "rejected order with zero quantity");
            return Err(BookError::InvalidQuantity { id: order.id });
        }
        if order.price == 0 {
            warn!(order_id = order.id, "rejected order with zero price");
            return Err(BookError::InvalidPrice { id: order.id });
        }
        if self.locator.contains(order.id) {
            warn!(order_id = order.id, "rejected duplicate order id");
            return Err(BookError::DuplicateOrderId(order.id));
        }
        if order.quantity > self.headroom(order.side(), order.price) {
            warn!(order_id = order.id, price = order.price, "rejected order overflowing its level");
            return Err(BookError::QuantityOverflow {
                id: order.id,
                price: order.price,
            });
        }

        trace!(
            order_id = order.id,
            side = ?order.side(),
            price = order.price,
            quantity = order.quantity,
            "order added"
        );
        self.rest(order);
        Ok(())
    }

    /// Cancel a resting order
    ///
    /// Returns `false`, with no side effect, if the id is not resting.
    pub fn cancel(&mut self, order_id: u64) -> bool {
        match self.remove_order(order_id) {
            Some(order) => {
                trace!(
                    order_id,
                    price = order.price,
                    quantity = order.quantity,
                    "order cancelled"
                );
                true
            }
            None => {
                debug!(order_id, "cancel of unknown order");
                false
            }
        }
    }

    /// Remove a resting order and hand back its record
    ///
    /// Same effect as [`OrderBook::cancel`].
    pub fn remove_order(&mut self, order_id: u64) -> Option<Order> {
        let location = self.locator.remove(order_id)?;

        let unlinked = match location.side {
            Side::Buy => self.bids.unlink(location.price, location.key, &mut self.orders),
            Side::Sell => self.asks.unlink(location.price, location.key, &mut self.orders),
        };
        debug_assert!(unlinked.is_some(), "order {order_id} located at a missing level");

        Some(self.orders.remove(location.key).order)
    }

    /// Change a resting order's price and/or quantity
    ///
    /// - Same price: the quantity is updated in place and the order keeps
    ///   its queue position.
    /// - New price: the order leaves its level and joins the back of the
    ///   level at `new_price`, keeping its id, side and timestamp.
    /// - `new_quantity == 0`: the order is cancelled.
    ///
    /// Returns `false`, with no side effect, if the id is not resting,
    /// `new_price` is zero, or the target level's aggregate would exceed
    /// `u64::MAX`.
    pub fn amend(&mut self, order_id: u64, new_price: u64, new_quantity: u64) -> bool {
        let Some(location) = self.locator.get(order_id).copied() else {
            debug!(order_id, "amend of unknown order");
            return false;
        };
        if new_price == 0 {
            warn!(order_id, "rejected amend to zero price");
            return false;
        }
        if new_quantity == 0 {
            trace!(order_id, "amend to zero quantity");
            return self.cancel(order_id);
        }

        if new_price == location.price {
            let current = self.orders.get(location.key).map_or(0, OrderNode::quantity);
            // current is part of the aggregate, so this sum cannot overflow
            if new_quantity > self.headroom(location.side, location.price) + current {
                warn!(order_id, new_quantity, "rejected amend overflowing its level");
                return false;
            }

            let (price, key) = (location.price, location.key);
            let old_quantity = match location.side {
                Side::Buy => self.bids.resize(price, key, new_quantity, &mut self.orders),
                Side::Sell => self.asks.resize(price, key, new_quantity, &mut self.orders),
            };
            debug_assert!(old_quantity.is_some(), "order {order_id} located at a missing level");
            trace!(order_id, ?old_quantity, new_quantity, "order resized");
            return true;
        }

        if new_quantity > self.headroom(location.side, new_price) {
            warn!(order_id, new_price, new_quantity, "rejected amend overflowing its level");
            return false;
        }

        let Some(mut order) = self.remove_order(order_id) else {
            return false;
        };
        order.price = new_price;
        order.quantity = new_quantity;
        trace!(
            order_id,
            old_price = location.price,
            new_price,
            new_quantity,
            "order repriced"
        );
        self.rest(order);
        true
    }

    /// Quantity the level at `price` can still absorb
    fn headroom(&self, side: Side, price: u64) -> u64 {
        self.level(side, price).map_or(u64::MAX, PriceLevel::headroom)
    }

    /// Insert an already validated order into all three indexes
    fn rest(&mut self, order: Order) {
        let order_id = order.id;
        let price = order.price;
        let side = order.side();

        let key = self.orders.insert(OrderNode::new(order));
        match side {
            Side::Buy => self.bids.push(price, key, &mut self.orders),
            Side::Sell => self.asks.push(price, key, &mut self.orders),
        }

        let fresh = self.locator.insert(order_id, OrderLocation::new(side, price, key));
        debug_assert!(fresh, "order {order_id} indexed twice");
    }

    /// Remove every order
    pub fn clear(&mut self) {
        self.orders.clear();
        self.bids.clear();
        self.asks.clear();
        self.locator.clear();
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Top `depth` levels of each side, best first
    ///
    /// Only the returned levels are visited.
    pub fn get_snapshot(&self, depth: usize) -> BookSnapshot {
        BookSnapshot {
            depth,
            bids: self.bids.top(depth).collect(),
            asks: self.asks.top(depth).collect(),
        }
    }

    /// Snapshot at the configured default depth
    pub fn snapshot(&self) -> BookSnapshot {
        self.get_snapshot(self.default_depth)
    }

    /// Highest bid price
    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.best().map(|level| level.price)
    }

    /// Lowest ask price
    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.best().map(|level| level.price)
    }

    /// `best_ask - best_bid`, or None if either side is empty
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if ask >= bid => Some(ask - bid),
            _ => None,
        }
    }

    /// Resting order by id
    pub fn get_order(&self, order_id: u64) -> Option<&Order> {
        let location = self.locator.get(order_id)?;
        self.orders.get(location.key).map(|node| &node.order)
    }

    #[inline]
    pub fn contains_order(&self, order_id: u64) -> bool {
        self.locator.contains(order_id)
    }

    /// Level at an exact price on one side
    pub fn level(&self, side: Side, price: u64) -> Option<&PriceLevel> {
        match side {
            Side::Buy => self.bids.get(price),
            Side::Sell => self.asks.get(price),
        }
    }

    /// Orders at one level in queue order (oldest first)
    ///
    /// Empty if there is no level at that price.
    pub fn queue(&self, side: Side, price: u64) -> impl Iterator<Item = &Order> + '_ {
        self.level(side, price)
            .into_iter()
            .flat_map(move |level| level.iter(&self.orders))
    }

    // ========================================================================
    // Verification
    // ========================================================================

    /// Audit the consistency of the slab, side indexes and locator
    ///
    /// O(N) in the number of resting orders. Intended for tests and
    /// debugging tools, not the hot path.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let queued =
            self.audit_side(Side::Buy, &self.bids)? + self.audit_side(Side::Sell, &self.asks)?;

        for (id, location) in self.locator.iter() {
            match self.orders.get(location.key) {
                Some(node) if node.order.id == id => {}
                _ => return Err(InvariantViolation::LocatorMismatch { id }),
            }
        }

        if queued != self.locator.len() || queued != self.orders.len() {
            return Err(InvariantViolation::IndexSizeMismatch {
                queued,
                located: self.locator.len(),
                stored: self.orders.len(),
            });
        }
        Ok(())
    }

    /// Walk every level of one side, returning the number of queued orders
    fn audit_side<K: LevelKey>(
        &self,
        side: Side,
        index: &SideIndex<K>,
    ) -> Result<usize, InvariantViolation> {
        let mut queued = 0;

        for (key_price, level) in index.entries() {
            let price = level.price;
            if key_price != price {
                return Err(InvariantViolation::LevelKeyMismatch {
                    side,
                    key: key_price,
                    price,
                });
            }
            if level.is_empty() || level.head.is_none() {
                return Err(InvariantViolation::EmptyLevel { side, price });
            }

            let mut sum = 0u64;
            let mut count = 0usize;
            let mut prev = None;
            let mut cursor = level.head;

            while let Some(key) = cursor {
                let node = self
                    .orders
                    .get(key)
                    .ok_or(InvariantViolation::BrokenLink { side, price })?;
                let order = &node.order;

                if node.prev != prev || count >= self.orders.len() {
                    return Err(InvariantViolation::BrokenLink { side, price });
                }
                if order.side() != side || order.price != price {
                    return Err(InvariantViolation::MisplacedOrder { id: order.id, side, price });
                }
                if order.quantity == 0 {
                    return Err(InvariantViolation::ZeroQuantity { id: order.id });
                }
                if self.locator.get(order.id) != Some(&OrderLocation::new(side, price, key)) {
                    return Err(InvariantViolation::LocatorMismatch { id: order.id });
                }

                sum = sum
                    .checked_add(order.quantity)
                    .ok_or(InvariantViolation::AggregateOverflow { side, price })?;
                count += 1;
                prev = Some(key);
                cursor = node.next;
            }

            if level.tail != prev {
                return Err(InvariantViolation::BrokenLink { side, price });
            }
            if count != level.order_count {
                return Err(InvariantViolation::CountMismatch {
                    side,
                    price,
                    recorded: level.order_count,
                    actual: count,
                });
            }
            if sum != level.total_quantity {
                return Err(InvariantViolation::AggregateMismatch {
                    side,
                    price,
                    recorded: level.total_quantity,
                    actual: sum,
                });
            }
            queued += count;
        }

        Ok(queued)
    }

    /// SHA-256 over the SSZ encoding of every resting order
    ///
    /// Orders are visited bids then asks, best level first, oldest order
    /// first within a level. Two books holding the same orders in the same
    /// priority produce the same root regardless of slab key assignment.
    pub fn state_root(&self) -> Result<[u8; 32], BookError> {
        let mut hasher = Sha256::new();

        for level in self.bids.levels().chain(self.asks.levels()) {
            for order in level.iter(&self.orders) {
                let bytes = ssz_rs::serialize(order)
                    .map_err(|err| BookError::Encoding(format!("{err:?}")))?;
                hasher.update(&bytes);
            }
        }

        let mut root = [0u8; 32];
        root.copy_from_slice(&hasher.finalize());
        Ok(root)
    }

    /// [`OrderBook::state_root`] as a hex string
    pub fn state_root_hex(&self) -> Result<String, BookError> {
        self.state_root().map(hex::encode)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
