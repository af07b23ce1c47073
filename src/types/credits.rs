//! Fixed-point temporal-credit utilities.
//!
//! ## Overview
//!
//! All prices in the market engine are stored as `u64` credits scaled by
//! 10^4. Four decimal places give sub-credit resolution for gradual price
//! drift (a 0.1% move on a 100-credit resource is representable exactly)
//! without ever touching floating point.
//!
//! ## Why Fixed-Point?
//!
//! Floating-point accumulation drifts: thousands of compounding price
//! updates would make quote history depend on evaluation order. Fixed-point
//! storage with [`rust_decimal`] arithmetic keeps every recomputation exact
//! and reproducible.
//!
//! ## Examples
//!
//! ```
//! use temporal_market::types::credits::{to_fixed, from_whole, format_credits};
//!
//! assert_eq!(to_fixed("10000"), Some(100_000_000));
//! assert_eq!(from_whole(10_000), 100_000_000);
//! assert_eq!(format_credits(105_000_000), "10500");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point credits: 10^4 (four decimal places).
pub const SCALE: u64 = 10_000;

/// Largest whole-credit amount representable without overflow.
pub const MAX_WHOLE: u64 = u64::MAX / SCALE;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a whole-credit amount to fixed-point.
///
/// Saturates at `u64::MAX` for amounts beyond [`MAX_WHOLE`]; catalog base
/// values are nowhere near that range.
#[inline]
pub fn from_whole(credits: u64) -> u64 {
    credits.saturating_mul(SCALE)
}

/// Convert a decimal string to fixed-point credits.
///
/// Returns `None` for negative, unparseable, or out-of-range values.
///
/// # Example
///
/// ```
/// use temporal_market::types::credits::to_fixed;
///
/// assert_eq!(to_fixed("1"), Some(10_000));
/// assert_eq!(to_fixed("0.5"), Some(5_000));
/// assert_eq!(to_fixed("-1"), None);
/// assert_eq!(to_fixed("abc"), None);
/// ```
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a [`Decimal`] credit amount to fixed-point.
///
/// Rounds to the nearest 10^-4 credit. Returns `None` if the value is
/// negative or does not fit in `u64` after scaling.
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    scaled.round_dp(0).to_u64()
}

/// Convert fixed-point credits to a [`Decimal`].
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Format fixed-point credits as a human-readable string, trailing zeros
/// trimmed.
///
/// # Example
///
/// ```
/// use temporal_market::types::credits::format_credits;
///
/// assert_eq!(format_credits(10_000), "1");
/// assert_eq!(format_credits(15_000), "1.5");
/// assert_eq!(format_credits(89_250_000), "8925");
/// ```
pub fn format_credits(value: u64) -> String {
    format!("{}", fixed_to_decimal(value).normalize())
}

// ============================================================================
// Comparison Helpers
// ============================================================================

/// Compare two fixed-point amounts with a tolerance (for testing).
///
/// Returns `true` if `|a - b| <= tolerance`.
pub fn approx_eq(a: u64, b: u64, tolerance: u64) -> bool {
    a.abs_diff(b) <= tolerance
}

// ============================================================================
// Unit Tests
// ============================================================================
