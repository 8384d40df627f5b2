//! # Fee Splitting
//!
//! Basis-point protocol fee computation. The protocol keeps
//! `price * rate / 10_000` (integer truncation) and the creator is credited
//! the remainder, so `fee + creator_amount == price` always holds.

/// Basis points in a whole price.
pub const FEE_DENOMINATOR: u64 = 10_000;

/// Default protocol fee when no fee record exists: 500 bps = 5%.
pub const DEFAULT_FEE_BPS: u64 = 500;

/// Result of splitting one payment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeSplit {
    /// Protocol cut, truncated down.
    pub fee: u64,
    /// Amount credited to the creator.
    pub creator_amount: u64,
}

/// Splits `price` at `rate_bps` basis points.
///
/// Computes `floor(price * rate_bps / 10_000)` without the intermediate
/// product, so the split is exact for the full u64 price range. Rates are
/// bounded to the denominator by the admin entry point, so `creator_amount`
/// never underflows for any stored rate.
#[must_use]
pub fn split(price: u64, rate_bps: u64) -> FeeSplit {
    let whole = price / FEE_DENOMINATOR;
    let rest = price % FEE_DENOMINATOR;
    let fee = whole * rate_bps + rest * rate_bps / FEE_DENOMINATOR;
    FeeSplit {
        fee,
        creator_amount: price - fee,
    }
}

// =============================================================================
// TESTS
// =============================================================================
