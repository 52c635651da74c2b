//! The limit order book.
//!
//! ## Architecture
//!
//! The book is a single value composed of:
//!
//! - **Order pool**: `Slab<OrderNode>` holding every resting order
//! - **Level pool**: `Slab<PriceLevel>` holding every non-empty price level
//! - **Side indices**: `BTreeMap` per side, price ticks -> level slab key;
//!   bids iterate descending (via `Reverse`), asks ascending
//! - **Order index**: pre-sized `HashMap`, order id -> order slab key
//! - **Top-of-book cache**: memoized best bid/ask with an invalidation flag
//!
//! ## Concurrency model
//!
//! Single writer, no internal locking. Mutations take `&mut self`; the
//! read path (`snapshot`, `best_prices`, `stats`) takes `&self` and uses
//! `Cell` for the memoized best prices and the snapshot counter. Readers
//! on other threads must synchronize externally.
//!
//! ## Performance
//!
//! | Operation            | Complexity |
//! |----------------------|------------|
//! | Add order            | O(log L) new level, O(1) existing |
//! | Cancel order by id   | O(log L) when the level empties, else O(1) |
//! | Amend quantity       | O(1) |
//! | Amend price          | cancel + add |
//! | Best bid/ask         | O(1) cached |
//! | Snapshot depth d     | O(d) |
//!
//! L is the number of distinct price levels on the touched side.

use std::cell::Cell;
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use slab::Slab;
use tracing::trace;

use crate::book::{BookError, DepthLevel, DepthSnapshot, OrderNode, PriceLevel};
use crate::types::price;
use crate::types::{Order, Side};
use crate::utils::current_time_nanos;

/// Default pre-allocation for the order pool and order index.
pub const DEFAULT_ORDER_CAPACITY: usize = 10_000;

/// Default pre-allocation for the level pool.
pub const DEFAULT_LEVEL_CAPACITY: usize = 256;

/// Cached best-bid ticks when the bid side is empty.
const BID_EMPTY_TICKS: u64 = 0;

/// Cached best-ask ticks when the ask side is empty.
const ASK_EMPTY_TICKS: u64 = u64::MAX;

/// A single-instrument, resting-only limit order book.
///
/// The book indexes orders by price and arrival time and answers
/// market-data queries. It never matches: a crossed book is observable
/// through [`Book::can_match`] but not resolved.
///
/// ## Example
///
/// ```
/// use limitbook::{Book, Order, Side};
///
/// let mut book = Book::new();
/// book.add_order(Order::new(1, Side::Buy, 100.00, 50, 0)).unwrap();
/// book.add_order(Order::new(2, Side::Sell, 101.00, 25, 0)).unwrap();
///
/// assert_eq!(book.best_prices(), (100.00, 101.00));
/// assert!(!book.can_match());
/// ```
#[derive(Debug)]
pub struct Book {
    /// Order pool: every resting order lives here
    orders: Slab<OrderNode>,

    /// Level pool: every non-empty price level lives here
    levels: Slab<PriceLevel>,

    /// Bid side index (highest price first)
    bids: BTreeMap<Reverse<u64>, usize>,

    /// Ask side index (lowest price first)
    asks: BTreeMap<u64, usize>,

    /// Order id -> order pool key
    order_index: HashMap<u64, usize>,

    /// Orders accepted over the book's lifetime
    total_orders: u64,

    /// Cancels applied over the book's lifetime
    total_cancels: u64,

    /// Amends applied over the book's lifetime
    total_amends: u64,

    /// Snapshots served; `Cell` because snapshots take `&self`
    total_snapshots: Cell<u64>,

    /// Memoized best bid in ticks (`BID_EMPTY_TICKS` when no bids)
    cached_best_bid: Cell<u64>,

    /// Memoized best ask in ticks (`ASK_EMPTY_TICKS` when no asks)
    cached_best_ask: Cell<u64>,

    /// Whether the memoized best prices are current
    cache_valid: Cell<bool>,
}

/// Counters and book-shape summary returned by [`Book::stats`].
///
/// Counters are monotonically non-decreasing and reset only by dropping
/// the book.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BookStats {
    /// Orders accepted (including re-adds from price-change amends)
    pub total_orders: u64,
    /// Cancels applied (including cancels from price-change amends)
    pub total_cancels: u64,
    /// Amends applied
    pub total_amends: u64,
    /// Depth snapshots served
    pub total_snapshots: u64,
    /// Orders currently resting
    pub active_orders: u64,
    /// Distinct bid price levels
    pub bid_levels: usize,
    /// Distinct ask price levels
    pub ask_levels: usize,
    /// Best bid, `0.0` when the bid side is empty
    pub best_bid: f64,
    /// Best ask, `f64::MAX` when the ask side is empty
    pub best_ask: f64,
    /// `best_ask - best_bid`, `0.0` when the ask side is empty
    pub spread: f64,
}

impl Default for Book {
    fn default() -> Self {
        Self::new()
    }
}

impl Book {
    /// Create a book with default pre-allocation
    /// ([`DEFAULT_ORDER_CAPACITY`] orders).
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_ORDER_CAPACITY)
    }

    /// Create a book pre-sized for `order_capacity` resting orders.
    ///
    /// Pre-sizing the order pool and the order index keeps reallocation
    /// and rehashing out of the hot path.
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            levels: Slab::with_capacity(DEFAULT_LEVEL_CAPACITY),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            order_index: HashMap::with_capacity(order_capacity),
            total_orders: 0,
            total_cancels: 0,
            total_amends: 0,
            total_snapshots: Cell::new(0),
            cached_best_bid: Cell::new(BID_EMPTY_TICKS),
            cached_best_ask: Cell::new(ASK_EMPTY_TICKS),
            cache_valid: Cell::new(false),
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Pre-allocated order pool capacity.
    #[inline]
    pub fn order_capacity(&self) -> usize {
        self.orders.capacity()
    }

    /// Number of orders currently resting.
    #[inline]
    pub fn active_orders(&self) -> usize {
        self.order_index.len()
    }

    /// Check if the book holds no orders.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_index.is_empty()
    }

    /// Number of distinct bid price levels.
    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    /// Number of distinct ask price levels.
    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }

    /// Check if an order id is resting in the book.
    #[inline]
    pub fn contains_order(&self, order_id: u64) -> bool {
        self.order_index.contains_key(&order_id)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Add a resting order to the book.
    ///
    /// The order joins the tail of its price level's FIFO queue; a new
    /// level is created when none exists at that price.
    ///
    /// # Errors
    ///
    /// - [`BookError::InvalidQuantity`] when `quantity == 0`
    /// - [`BookError::InvalidPrice`] when the price is NaN, infinite,
    ///   non-positive, or outside the tick grid's range
    /// - [`BookError::DuplicateOrderId`] when the id is already resting
    ///
    /// Rejected orders leave the book untouched.
    pub fn add_order(&mut self, order: Order) -> Result<(), BookError> {
        if order.quantity == 0 {
            return Err(BookError::InvalidQuantity {
                order_id: order.order_id,
            });
        }
        let ticks = price::to_ticks(order.price).ok_or(BookError::InvalidPrice {
            order_id: order.order_id,
            price: order.price,
        })?;
        if self.order_index.contains_key(&order.order_id) {
            return Err(BookError::DuplicateOrderId(order.order_id));
        }

        trace!(
            "add order {}: {:?} {} x {}",
            order.order_id,
            order.side,
            order.price,
            order.quantity
        );

        let order_id = order.order_id;
        let side = order.side;

        let key = self.orders.insert(OrderNode::new(order, ticks));
        self.order_index.insert(order_id, key);
        self.link_into_side(side, ticks, key);

        self.cache_valid.set(false);
        self.total_orders += 1;
        Ok(())
    }

    /// Cancel a resting order by id.
    ///
    /// Returns the cancelled order, or `None` when the id is unknown.
    /// The level is erased from its side index and returned to the level
    /// pool when this was its last order.
    pub fn cancel_order(&mut self, order_id: u64) -> Option<Order> {
        let &key = self.order_index.get(&order_id)?;
        let (side, ticks) = {
            let node = self.orders.get(key).expect("order index points at vacant slot");
            (node.side(), node.price_ticks)
        };

        self.unlink_from_side(side, ticks, key);
        self.order_index.remove(&order_id);
        let node = self.orders.remove(key);

        self.cache_valid.set(false);
        self.total_cancels += 1;
        trace!("cancel order {order_id}");
        Some(node.order)
    }

    /// Amend a resting order's price and/or quantity.
    ///
    /// - Same price (to the tick): the quantity is updated in place and
    ///   the order keeps its queue position.
    /// - Different price: the order is cancelled and re-added at the new
    ///   price with a refreshed `timestamp_ns`, moving it to the tail of
    ///   the new level. Losing time priority on a price change is the
    ///   intended semantic.
    /// - `new_quantity == 0`: treated as an implicit cancel.
    ///
    /// Returns `Ok(false)` when the id is unknown.
    ///
    /// # Errors
    ///
    /// [`BookError::InvalidPrice`] when `new_price` fails validation; the
    /// book is left untouched.
    pub fn amend_order(
        &mut self,
        order_id: u64,
        new_price: f64,
        new_quantity: u64,
    ) -> Result<bool, BookError> {
        let Some(&key) = self.order_index.get(&order_id) else {
            return Ok(false);
        };
        let new_ticks = price::to_ticks(new_price).ok_or(BookError::InvalidPrice {
            order_id,
            price: new_price,
        })?;

        trace!("amend order {order_id}: price {new_price}, quantity {new_quantity}");

        if new_quantity == 0 {
            // Zero-quantity amend is an implicit cancel.
            let cancelled = self.cancel_order(order_id);
            debug_assert!(cancelled.is_some());
            self.total_amends += 1;
            return Ok(true);
        }

        let (side, old_ticks) = {
            let node = self.orders.get(key).expect("order index points at vacant slot");
            (node.side(), node.price_ticks)
        };

        if new_ticks == old_ticks {
            self.update_quantity_in_place(side, old_ticks, key, new_quantity);
        } else {
            // Price change: cancel and re-add so the order requeues at the
            // tail of the new level.
            let old = self
                .cancel_order(order_id)
                .expect("amend target vanished mid-amend");
            let replacement = Order::new(
                order_id,
                old.side,
                new_price,
                new_quantity,
                current_time_nanos(),
            );
            self.add_order(replacement)
                .expect("replacement for amended order must be addable");
        }

        self.cache_valid.set(false);
        self.total_amends += 1;
        Ok(true)
    }

    // ========================================================================
    // Market Data
    // ========================================================================

    /// Depth snapshot of the top `depth` levels per side.
    ///
    /// Bids come back highest price first, asks lowest price first, each
    /// entry aggregated to `(price, total_quantity)`. Pure with respect to
    /// book state; only the snapshot counter advances.
    pub fn snapshot(&self, depth: usize) -> DepthSnapshot {
        self.total_snapshots.set(self.total_snapshots.get() + 1);

        let mut bids = Vec::with_capacity(depth.min(self.bids.len()));
        for (&Reverse(ticks), &level_key) in self.bids.iter().take(depth) {
            let level = self.levels.get(level_key).expect("side index points at vacant level");
            bids.push(DepthLevel {
                price: price::from_ticks(ticks),
                total_quantity: level.total_quantity,
            });
        }

        let mut asks = Vec::with_capacity(depth.min(self.asks.len()));
        for (&ticks, &level_key) in self.asks.iter().take(depth) {
            let level = self.levels.get(level_key).expect("side index points at vacant level");
            asks.push(DepthLevel {
                price: price::from_ticks(ticks),
                total_quantity: level.total_quantity,
            });
        }

        trace!("snapshot depth {depth}: {} bids, {} asks", bids.len(), asks.len());
        DepthSnapshot { bids, asks }
    }

    /// Best bid and ask prices, memoized.
    ///
    /// An empty bid side reports `0.0`; an empty ask side reports
    /// `f64::MAX`. The cached pair is recomputed lazily after any
    /// mutation.
    pub fn best_prices(&self) -> (f64, f64) {
        if !self.cache_valid.get() {
            let bid = self.bids.keys().next().map_or(BID_EMPTY_TICKS, |r| r.0);
            let ask = self
                .asks
                .keys()
                .next()
                .copied()
                .unwrap_or(ASK_EMPTY_TICKS);
            self.cached_best_bid.set(bid);
            self.cached_best_ask.set(ask);
            self.cache_valid.set(true);
        }

        let bid = price::from_ticks(self.cached_best_bid.get());
        let ask = match self.cached_best_ask.get() {
            ASK_EMPTY_TICKS => f64::MAX,
            ticks => price::from_ticks(ticks),
        };
        (bid, ask)
    }

    /// Best bid price, read directly from the side index (uncached).
    #[inline]
    pub fn best_bid(&self) -> Option<f64> {
        self.bids.keys().next().map(|r| price::from_ticks(r.0))
    }

    /// Best ask price, read directly from the side index (uncached).
    #[inline]
    pub fn best_ask(&self) -> Option<f64> {
        self.asks.keys().next().map(|&t| price::from_ticks(t))
    }

    /// Check whether the book is crossed (best bid >= best ask).
    ///
    /// The book never resolves a cross; this is an observation hook for
    /// an external matching engine.
    pub fn can_match(&self) -> bool {
        match (self.bids.keys().next(), self.asks.keys().next()) {
            (Some(bid), Some(&ask)) => bid.0 >= ask,
            _ => false,
        }
    }

    /// Operation counters and book-shape summary.
    pub fn stats(&self) -> BookStats {
        let (best_bid, best_ask) = self.best_prices();
        BookStats {
            total_orders: self.total_orders,
            total_cancels: self.total_cancels,
            total_amends: self.total_amends,
            total_snapshots: self.total_snapshots.get(),
            active_orders: self.order_index.len() as u64,
            bid_levels: self.bids.len(),
            ask_levels: self.asks.len(),
            best_bid,
            best_ask,
            spread: if best_ask == f64::MAX {
                0.0
            } else {
                best_ask - best_bid
            },
        }
    }

    // ========================================================================
    // Side Index Plumbing
    // ========================================================================

    /// Append an order node to the level at `ticks`, creating the level
    /// from the pool when this is the first order at that price.
    fn link_into_side(&mut self, side: Side, ticks: u64, key: usize) {
        let level_key = match side {
            Side::Buy => match self.bids.get(&Reverse(ticks)) {
                Some(&level_key) => level_key,
                None => {
                    let level_key = self.levels.insert(PriceLevel::new(ticks));
                    self.bids.insert(Reverse(ticks), level_key);
                    level_key
                }
            },
            Side::Sell => match self.asks.get(&ticks) {
                Some(&level_key) => level_key,
                None => {
                    let level_key = self.levels.insert(PriceLevel::new(ticks));
                    self.asks.insert(ticks, level_key);
                    level_key
                }
            },
        };

        let level = self
            .levels
            .get_mut(level_key)
            .expect("side index points at vacant level");
        level.push_back(key, &mut self.orders);
    }

    /// Unlink an order node from the level at `ticks`; erase the level
    /// and return its cell to the pool when it empties.
    fn unlink_from_side(&mut self, side: Side, ticks: u64, key: usize) {
        match side {
            Side::Buy => {
                if let Some(&level_key) = self.bids.get(&Reverse(ticks)) {
                    let level = self
                        .levels
                        .get_mut(level_key)
                        .expect("bid index points at vacant level");
                    level.remove(key, &mut self.orders);
                    if level.is_empty() {
                        self.bids.remove(&Reverse(ticks));
                        self.levels.remove(level_key);
                    }
                }
            }
            Side::Sell => {
                if let Some(&level_key) = self.asks.get(&ticks) {
                    let level = self
                        .levels
                        .get_mut(level_key)
                        .expect("ask index points at vacant level");
                    level.remove(key, &mut self.orders);
                    if level.is_empty() {
                        self.asks.remove(&ticks);
                        self.levels.remove(level_key);
                    }
                }
            }
        }
    }

    /// In-place quantity update for a quantity-only amend.
    fn update_quantity_in_place(&mut self, side: Side, ticks: u64, key: usize, new_quantity: u64) {
        let level_key = match side {
            Side::Buy => self.bids.get(&Reverse(ticks)).copied(),
            Side::Sell => self.asks.get(&ticks).copied(),
        };
        if let Some(level_key) = level_key {
            let level = self
                .levels
                .get_mut(level_key)
                .expect("side index points at vacant level");
            level.update_quantity(key, &mut self.orders, new_quantity);
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
