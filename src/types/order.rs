//! Order types for the limit order book.
//!
//! An [`Order`] is the external record a client submits. Prices arrive as
//! `f64` and are converted to fixed-point ticks at the book boundary (see
//! [`crate::types::price`]); the record itself keeps the price as
//! submitted.

use serde::{Deserialize, Serialize};

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy order (bid) - wants to purchase the instrument
    Buy,
    /// Sell order (ask) - wants to sell the instrument
    Sell,
}

// ============================================================================
// Order struct
// ============================================================================

/// A resting limit order.
///
/// ## Fields
///
/// - `order_id` uniquely identifies a live order; the book rejects
///   duplicates.
/// - `price` must be positive and finite. It is quantized to the book's
///   1e-9 tick grid on entry.
/// - `quantity` must be strictly positive on submission.
/// - `timestamp_ns` is informational only. Queue priority within a price
///   level is submission order, never this field.
///
/// ## Example
///
/// ```
/// use limitbook::{Order, Side};
///
/// // Buy 100 units at 99.50
/// let order = Order::new(1, Side::Buy, 99.50, 100, 1_703_577_600_000_000_000);
/// assert_eq!(order.side, Side::Buy);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier
    pub order_id: u64,

    /// Buy or Sell
    pub side: Side,

    /// Limit price as submitted
    pub price: f64,

    /// Open quantity
    pub quantity: u64,

    /// Wall-clock nanoseconds at submission (informational)
    pub timestamp_ns: u64,
}

impl Order {
    /// Create a new limit order.
    pub fn new(order_id: u64, side: Side, price: f64, quantity: u64, timestamp_ns: u64) -> Self {
        Self {
            order_id,
            side,
            price,
            quantity,
            timestamp_ns,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
