//! Order book module.
//!
//! ## Architecture
//!
//! - **Slab-based storage**: O(1) order insertion, removal, and lookup
//! - **Price levels**: orders grouped by price in a `BTreeMap` per side
//! - **Price-time priority**: intrusive FIFO list at each price level
//! - **Locator**: order id to side, price and slab key for O(1) cancel
//!
//! ## Components
//!
//! - [`OrderNode`]: `Order` plus linked-list pointers
//! - [`PriceLevel`]: FIFO queue and aggregate quantity at one price
//! - [`SideIndex`]: ordered levels for one side ([`BidIndex`], [`AskIndex`])
//! - [`OrderLocator`]: id to [`OrderLocation`]
//! - [`OrderBook`]: the engine tying them together
//! - [`BookSnapshot`]: top-of-book view and console rendering
//!
//! ## Example
//!
//! ```
//! use limit_book::orderbook::OrderBook;
//! use limit_book::types::{Order, Side};
//!
//! let mut book = OrderBook::with_capacity(10_000);
//! book.add(Order::new(1, Side::Buy, 10_000_000_000, 10, 0)).unwrap();
//!
//! assert_eq!(book.best_bid(), Some(10_000_000_000));
//! ```

pub mod book;
pub mod level;
pub mod locator;
pub mod node;
pub mod side;
pub mod snapshot;

pub use book::OrderBook;
pub use level::PriceLevel;
pub use locator::{OrderLocation, OrderLocator};
pub use node::OrderNode;
pub use side::{AskIndex, BidIndex, LevelKey, SideIndex};
pub use snapshot::{BookSnapshot, LevelSummary};
