//! Book error types.
//!
//! Only precondition violations are errors. Lookup misses (cancel or amend
//! of an unknown order id) are ordinary `Option`/`bool` returns - they are
//! not logged, not counted, not fatal.

use thiserror::Error;

/// Errors reported by [`crate::Book`] mutations.
///
/// Every variant is rejected before any state change; the book never
/// applies a mutation partially.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum BookError {
    /// An order with this id is already resting in the book
    #[error("duplicate order id {0}")]
    DuplicateOrderId(u64),

    /// Order quantity must be strictly positive on submission
    #[error("order {order_id} rejected: quantity must be positive")]
    InvalidQuantity {
        /// The order ID that was rejected
        order_id: u64,
    },

    /// Price is NaN, infinite, non-positive, below one tick, or too large
    /// to represent on the tick grid
    #[error("order {order_id} rejected: price {price} is not a valid positive price")]
    InvalidPrice {
        /// The order ID that was rejected
        order_id: u64,
        /// The price that failed validation
        price: f64,
    },
}
