//! Depth snapshot read model.
//!
//! A snapshot is a pure projection of the top N price levels per side,
//! aggregated per level. The types here are plain data with serde derives
//! so market-data consumers can encode them; the book itself never
//! serializes anything.

use serde::{Deserialize, Serialize};

/// One aggregated price level in a depth snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthLevel {
    /// Level price
    pub price: f64,

    /// Sum of open quantities resting at this price
    pub total_quantity: u64,
}

/// Top-of-book depth for both sides.
///
/// `bids` are ordered best (highest) price first, `asks` best (lowest)
/// price first - the natural iteration order of the side indices. Each
/// side holds at most the requested depth.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DepthSnapshot {
    /// Bid levels, descending by price
    pub bids: Vec<DepthLevel>,

    /// Ask levels, ascending by price
    pub asks: Vec<DepthLevel>,
}
