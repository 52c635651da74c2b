//! # Limitbook
//!
//! A single-writer limit order book for one instrument.
//!
//! ## Architecture
//!
//! - **Types**: [`Order`], [`Side`], and the fixed-point price grid
//! - **Book**: slab-backed pools, intrusive FIFO price levels, ordered
//!   side indices, an O(1) order-id index, and a memoized top of book
//!
//! ## Design Principles
//!
//! 1. **Resting only**: the book indexes orders and serves market data;
//!    crossed states are observable, never resolved. Matching belongs to
//!    an external engine.
//! 2. **Pre-allocated memory**: order nodes and price levels come from
//!    slab pools so the hot path never hits the general allocator.
//! 3. **Tick-quantized prices**: `f64` at the API, `u64` ticks inside,
//!    one tick per 1e-9 of price - the equality epsilon becomes exact.
//! 4. **Single writer**: mutations are synchronous and run to completion;
//!    no internal locking. Concurrent readers synchronize externally.
//!
//! ## Example
//!
//! ```
//! use limitbook::{Book, Order, Side};
//!
//! let mut book = Book::with_capacity(10_000);
//!
//! book.add_order(Order::new(1, Side::Buy, 100.00, 100, 0)).unwrap();
//! book.add_order(Order::new(2, Side::Buy, 100.00, 150, 0)).unwrap();
//! book.add_order(Order::new(3, Side::Sell, 101.00, 80, 0)).unwrap();
//!
//! let (best_bid, best_ask) = book.best_prices();
//! assert_eq!((best_bid, best_ask), (100.00, 101.00));
//!
//! let depth = book.snapshot(5);
//! assert_eq!(depth.bids[0].total_quantity, 250);
//!
//! assert!(book.cancel_order(2).is_some());
//! assert_eq!(book.snapshot(5).bids[0].total_quantity, 100);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// The order book: pools, levels, side indices, operations
pub mod book;

/// Core data types: Order, Side, fixed-point prices
pub mod types;

mod utils;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use book::{Book, BookError, BookStats, DepthLevel, DepthSnapshot, OrderNode, PriceLevel};
pub use types::{Order, Side};
pub use utils::current_time_nanos;
