//! Error types.
//!
//! [`BookError`] is returned for rejected input and encoding failures.
//! Unknown ids on cancel/amend are not errors; those calls return `false`.
//!
//! [`InvariantViolation`] is only produced by
//! [`OrderBook::check_invariants`](crate::orderbook::OrderBook::check_invariants).
//! Seeing one means the book itself is defective.

use thiserror::Error;

use crate::types::Side;

/// Errors surfaced by the book's fallible operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    /// An order with this id is already resting
    #[error("order {0} is already resting")]
    DuplicateOrderId(u64),

    /// Resting orders must have a positive quantity
    #[error("order {id} has zero quantity")]
    InvalidQuantity { id: u64 },

    /// Resting orders must have a positive price
    #[error("order {id} has zero price")]
    InvalidPrice { id: u64 },

    /// Resting this quantity would overflow the aggregate of its level
    #[error("order {id} would overflow the aggregate quantity at price {price}")]
    QuantityOverflow { id: u64, price: u64 },

    /// SSZ encoding failed while hashing book state
    #[error("encoding failed: {0}")]
    Encoding(String),

    /// Configuration could not be loaded or deserialized
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<config::ConfigError> for BookError {
    fn from(err: config::ConfigError) -> Self {
        BookError::InvalidConfig(err.to_string())
    }
}

/// A broken cross-index consistency rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("{side:?} level {price} is empty but still indexed")]
    EmptyLevel { side: Side, price: u64 },

    #[error("{side:?} level {price} aggregate is {recorded}, members sum to {actual}")]
    AggregateMismatch {
        side: Side,
        price: u64,
        recorded: u64,
        actual: u64,
    },

    #[error("{side:?} level {price} records {recorded} orders, queue holds {actual}")]
    CountMismatch {
        side: Side,
        price: u64,
        recorded: usize,
        actual: usize,
    },

    #[error("order {id} is queued at {side:?} {price} but belongs elsewhere")]
    MisplacedOrder { id: u64, side: Side, price: u64 },

    #[error("{side:?} level {price} members sum past u64::MAX")]
    AggregateOverflow { side: Side, price: u64 },

    #[error("{side:?} level {price} is filed under key price {key}")]
    LevelKeyMismatch { side: Side, key: u64, price: u64 },

    #[error("order {id} rests with zero quantity")]
    ZeroQuantity { id: u64 },

    #[error("locator entry for order {id} does not match its queue position")]
    LocatorMismatch { id: u64 },

    #[error("queue links at {side:?} level {price} are inconsistent")]
    BrokenLink { side: Side, price: u64 },

    #[error("{queued} orders queued, {located} located, {stored} stored")]
    IndexSizeMismatch {
        queued: usize,
        located: usize,
        stored: usize,
    },
}
