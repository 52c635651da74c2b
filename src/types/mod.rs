//! Core data types for the limit order book.
//!
//! ## Types
//!
//! - [`Order`]: A resting limit order as submitted by a client
//! - [`Side`]: Buy or Sell
//! - [`price`]: Fixed-point tick representation of prices
//!
//! ## Prices
//!
//! The public API speaks `f64`; internally every price is a `u64` tick
//! count scaled by 10^9 so that the 1e-9 equality tolerance becomes exact
//! integer comparison. See [`price`] for the conversion rules.

mod order;
pub mod price;

// Re-export all types at module level
pub use order::{Order, Side};
