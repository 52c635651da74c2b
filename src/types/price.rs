//! Fixed-point price representation.
//!
//! ## Overview
//!
//! The book keys its price indices by `u64` ticks rather than raw doubles.
//! Values are scaled by 10^9, so one tick equals 1e-9 — the same tolerance
//! the public API uses for price equality. Two submitted prices within that
//! tolerance quantize to the same tick and therefore the same price level,
//! which turns the amend path's "same price?" test into plain integer
//! equality.
//!
//! ## Scale Factor
//!
//! 10^9 gives 9 decimal places and a maximum representable price of
//! `u64::MAX / 10^9` (about 1.8e10), far beyond any quoted instrument.
//!
//! ## Examples
//!
//! ```
//! use limitbook::types::price::{to_ticks, from_ticks};
//!
//! let ticks = to_ticks(100.25).unwrap();
//! assert_eq!(ticks, 100_250_000_000);
//! assert_eq!(from_ticks(ticks), 100.25);
//!
//! // Prices within 1e-9 collapse onto the same tick.
//! assert_eq!(to_ticks(100.25), to_ticks(100.25 + 4e-10));
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point prices: 10^9.
///
/// One tick is 1e-9, matching the price-equality tolerance at the API
/// boundary.
pub const SCALE: u64 = 1_000_000_000;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert an `f64` price to ticks.
///
/// Returns `None` for any price the book cannot rest an order at:
/// NaN, infinities, zero or negative values, values that round to zero
/// ticks, and values whose tick representation overflows `u64`.
///
/// # Example
///
/// ```
/// use limitbook::types::price::to_ticks;
///
/// assert_eq!(to_ticks(1.0), Some(1_000_000_000));
/// assert_eq!(to_ticks(0.0), None);
/// assert_eq!(to_ticks(-5.0), None);
/// assert_eq!(to_ticks(f64::NAN), None);
/// ```
pub fn to_ticks(price: f64) -> Option<u64> {
    if !price.is_finite() || price <= 0.0 {
        return None;
    }

    let decimal = Decimal::from_f64(price)?;
    let scaled = decimal.checked_mul(Decimal::from(SCALE))?;
    let ticks = scaled.round_dp(0).to_u64()?;

    // Anything below half a tick is indistinguishable from zero.
    if ticks == 0 {
        return None;
    }

    Some(ticks)
}

/// Convert ticks back to an `f64` price.
///
/// Total for every tick value the book stores; `from_ticks(0)` is `0.0`,
/// which is also the empty-bid-side sentinel.
pub fn from_ticks(ticks: u64) -> f64 {
    let decimal = Decimal::from(ticks) / Decimal::from(SCALE);
    decimal.to_f64().unwrap_or(0.0)
}

// ============================================================================
// Unit Tests
// ============================================================================
