//! Property-based tests for the limit book.
//!
//! Random add/cancel/amend sequences are replayed against both the book and
//! a naive model (a flat map of resting orders). After every sequence:
//!
//! - the book's cross-index audit passes
//! - per-level aggregates and queue order match the model
//! - bids are strictly descending and asks strictly ascending
//! - snapshots are truncated to the requested depth
//!
//! ```bash
//! cargo test --release --test properties
//! ```

use std::collections::{BTreeMap, HashMap};

use limit_book::types::price;
use limit_book::{LevelSummary, Order, OrderBook, Side};
use proptest::prelude::*;

/// One price tick: 0.01 in fixed-point
const TICK: u64 = price::SCALE / 100;

/// Ticks are offset from 90.00 so every generated price is non-zero
const FLOOR: u64 = 90 * price::SCALE;

#[derive(Debug, Clone, Copy)]
enum Op {
    Add { id: u64, side: Side, tick: u64, quantity: u64 },
    Cancel { id: u64 },
    Amend { id: u64, tick: u64, quantity: u64 },
}

fn px(tick: u64) -> u64 {
    FLOOR + tick * TICK
}

fn arb_side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Buy), Just(Side::Sell)]
}

/// Small id and tick ranges so sequences collide on ids and share levels
fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (1u64..48, arb_side(), 0u64..24, 1u64..500)
            .prop_map(|(id, side, tick, quantity)| Op::Add { id, side, tick, quantity }),
        1 => (1u64..48).prop_map(|id| Op::Cancel { id }),
        2 => (1u64..48, 0u64..24, 0u64..500)
            .prop_map(|(id, tick, quantity)| Op::Amend { id, tick, quantity }),
    ]
}

// ============================================================================
// Reference model
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Resting {
    side: Side,
    price: u64,
    quantity: u64,
    /// Arrival sequence at the current price, reset on reprice
    seq: u64,
}

#[derive(Debug, Default)]
struct Model {
    orders: HashMap<u64, Resting>,
    next_seq: u64,
}

impl Model {
    fn bump(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn apply(&mut self, op: Op) -> bool {
        match op {
            Op::Add { id, side, tick, quantity } => {
                if self.orders.contains_key(&id) {
                    return false;
                }
                let seq = self.bump();
                self.orders.insert(id, Resting { side, price: px(tick), quantity, seq });
                true
            }
            Op::Cancel { id } => self.orders.remove(&id).is_some(),
            Op::Amend { id, tick, quantity } => {
                let Some(resting) = self.orders.get(&id).copied() else {
                    return false;
                };
                if quantity == 0 {
                    self.orders.remove(&id);
                    return true;
                }
                let price = px(tick);
                let seq = if price == resting.price { resting.seq } else { self.bump() };
                self.orders.insert(id, Resting { price, quantity, seq, ..resting });
                true
            }
        }
    }

    /// Queue (ids oldest first) per (side, price)
    fn queues(&self) -> BTreeMap<(u8, u64), Vec<u64>> {
        let mut by_level: BTreeMap<(u8, u64), Vec<(u64, u64)>> = BTreeMap::new();
        for (&id, resting) in &self.orders {
            by_level
                .entry((resting.side.to_u8(), resting.price))
                .or_default()
                .push((resting.seq, id));
        }
        by_level
            .into_iter()
            .map(|(level, mut members)| {
                members.sort_unstable();
                (level, members.into_iter().map(|(_, id)| id).collect())
            })
            .collect()
    }

    /// Every level of one side, best first
    fn levels(&self, side: Side) -> Vec<LevelSummary> {
        let mut totals: BTreeMap<u64, u64> = BTreeMap::new();
        for resting in self.orders.values().filter(|r| r.side == side) {
            *totals.entry(resting.price).or_default() += resting.quantity;
        }
        let levels = totals
            .into_iter()
            .map(|(price, total_quantity)| LevelSummary { price, total_quantity });
        match side {
            Side::Buy => levels.rev().collect(),
            Side::Sell => levels.collect(),
        }
    }
}

fn apply(book: &mut OrderBook, op: Op, ts: u64) -> bool {
    match op {
        Op::Add { id, side, tick, quantity } => {
            book.add(Order::new(id, side, px(tick), quantity, ts)).is_ok()
        }
        Op::Cancel { id } => book.cancel(id),
        Op::Amend { id, tick, quantity } => book.amend(id, px(tick), quantity),
    }
}

fn replay(ops: &[Op]) -> OrderBook {
    let mut book = OrderBook::new();
    for (ts, &op) in ops.iter().enumerate() {
        apply(&mut book, op, ts as u64);
    }
    book
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_book_matches_model(ops in prop::collection::vec(arb_op(), 1..200)) {
        let mut book = OrderBook::new();
        let mut model = Model::default();

        for (ts, &op) in ops.iter().enumerate() {
            let expected = model.apply(op);
            prop_assert_eq!(apply(&mut book, op, ts as u64), expected, "op {:?}", op);
            prop_assert!(book.check_invariants().is_ok(), "audit failed after {:?}", op);
        }

        prop_assert_eq!(book.total_orders(), model.orders.len());

        let snapshot = book.get_snapshot(usize::MAX);
        prop_assert_eq!(&snapshot.bids, &model.levels(Side::Buy));
        prop_assert_eq!(&snapshot.asks, &model.levels(Side::Sell));
        prop_assert_eq!(book.bid_level_count(), snapshot.bids.len());
        prop_assert_eq!(book.ask_level_count(), snapshot.asks.len());

        for ((side, price), ids) in model.queues() {
            let side = Side::from_u8(side).unwrap();
            let queued: Vec<u64> = book.queue(side, price).map(|order| order.id).collect();
            prop_assert_eq!(queued, ids);
        }
    }

    #[test]
    fn prop_snapshot_sorted_and_truncated(
        ops in prop::collection::vec(arb_op(), 0..150),
        depth in 0usize..30,
    ) {
        let book = replay(&ops);
        let snapshot = book.get_snapshot(depth);

        prop_assert_eq!(snapshot.bids.len(), depth.min(book.bid_level_count()));
        prop_assert_eq!(snapshot.asks.len(), depth.min(book.ask_level_count()));
        prop_assert!(snapshot.bids.windows(2).all(|w| w[0].price > w[1].price));
        prop_assert!(snapshot.asks.windows(2).all(|w| w[0].price < w[1].price));
        prop_assert!(snapshot.bids.iter().chain(&snapshot.asks).all(|l| l.total_quantity > 0));

        // A shallower snapshot is a prefix of a deeper one
        let deeper = book.get_snapshot(depth + 5);
        prop_assert_eq!(&deeper.bids[..snapshot.bids.len()], &snapshot.bids[..]);
        prop_assert_eq!(&deeper.asks[..snapshot.asks.len()], &snapshot.asks[..]);
    }

    #[test]
    fn prop_cancel_is_idempotent(
        ops in prop::collection::vec(arb_op(), 0..150),
        id in 1u64..48,
    ) {
        let mut book = replay(&ops);
        let was_resting = book.contains_order(id);

        prop_assert_eq!(book.cancel(id), was_resting);
        let after_first = book.get_snapshot(usize::MAX);
        let root = book.state_root().unwrap();

        prop_assert!(!book.cancel(id));
        prop_assert_eq!(book.get_snapshot(usize::MAX), after_first);
        prop_assert_eq!(book.state_root().unwrap(), root);
        prop_assert!(book.check_invariants().is_ok());
    }

    #[test]
    fn prop_quantity_amend_keeps_queue_position(
        quantities in prop::collection::vec(1u64..1_000, 2..20),
        pick in any::<prop::sample::Index>(),
        new_quantity in 1u64..1_000,
        side in arb_side(),
    ) {
        let mut book = OrderBook::new();
        let price = px(10);
        for (i, &quantity) in quantities.iter().enumerate() {
            book.add(Order::new(i as u64 + 1, side, price, quantity, i as u64)).unwrap();
        }
        let before: Vec<u64> = book.queue(side, price).map(|o| o.id).collect();
        let target = pick.index(quantities.len()) as u64 + 1;

        prop_assert!(book.amend(target, price, new_quantity));

        let after: Vec<u64> = book.queue(side, price).map(|o| o.id).collect();
        prop_assert_eq!(after, before);

        let expected: u64 = quantities.iter().sum::<u64>()
            - quantities[target as usize - 1]
            + new_quantity;
        prop_assert_eq!(book.level(side, price).unwrap().total_quantity, expected);
    }

    #[test]
    fn prop_price_amend_moves_to_back(
        resting in 1usize..10,
        side in arb_side(),
        quantity in 1u64..1_000,
    ) {
        let mut book = OrderBook::new();
        let (from, to) = (px(5), px(6));

        book.add(Order::new(1, side, from, quantity, 0)).unwrap();
        for i in 0..resting {
            let id = i as u64 + 2;
            book.add(Order::new(id, side, to, 1, id)).unwrap();
        }

        prop_assert!(book.amend(1, to, quantity));

        let queue: Vec<u64> = book.queue(side, to).map(|o| o.id).collect();
        prop_assert_eq!(queue.len(), resting + 1);
        prop_assert_eq!(queue.last().copied(), Some(1));
        prop_assert!(book.level(side, from).is_none());
        prop_assert_eq!(book.get_order(1).unwrap().timestamp, 0);
    }
}
