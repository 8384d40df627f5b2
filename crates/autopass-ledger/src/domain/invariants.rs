//! # Domain Invariants
//!
//! Invariants the ledger must hold across every call. The service checks
//! them against freshly computed state before committing a write batch and
//! escalates a violation to a hard abort, since a violation means either a
//! logic fault or corrupted stored state.

use crate::domain::entities::{Pass, Subscription};
use crate::domain::fees::FeeSplit;
use std::fmt;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Supply bound: a finite `max_supply` is never exceeded by `sold`.
///
/// `max_supply == 0` means unlimited and always passes.
#[must_use]
pub fn check_supply(pass: &Pass) -> bool {
    pass.max_supply == 0 || pass.sold <= pass.max_supply
}

/// Counter monotonicity: each allocation yields exactly the successor.
#[must_use]
pub fn check_monotonic_id(previous: u64, allocated: u64) -> bool {
    allocated == previous + 1
}

/// Subscription window: the paid period never ends before it starts.
#[must_use]
pub fn check_subscription_window(sub: &Subscription) -> bool {
    sub.expiry_time >= sub.start_time
}

/// Renewal cadence: after `renewals` successful renewals the expiry sits
/// exactly `renewals * duration` past the first period's end, independent
/// of when callbacks were delivered.
#[must_use]
pub fn check_renewal_cadence(
    first_expiry: u64,
    duration_seconds: u64,
    renewals: u64,
    current_expiry: u64,
) -> bool {
    current_expiry == first_expiry + renewals * duration_seconds
}

/// Fee conservation: the split hands out exactly the price, with the fee
/// never exceeding it.
#[must_use]
pub fn check_fee_split(price: u64, split: &FeeSplit) -> bool {
    split.fee <= price && split.fee + split.creator_amount == price
}

// =============================================================================
// VIOLATIONS
// =============================================================================

/// A specific invariant violation, reported in hard aborts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// `sold` exceeded a finite `max_supply`.
    SupplyExceeded {
        /// Units sold.
        sold: u32,
        /// The finite cap.
        max_supply: u32,
    },
    /// An id allocation skipped or repeated a value.
    NonMonotonicId {
        /// Counter value before allocation.
        previous: u64,
        /// Value the allocation produced.
        allocated: u64,
    },
    /// A subscription's expiry preceded its start.
    InvertedWindow {
        /// Period start.
        start_time: u64,
        /// Period end.
        expiry_time: u64,
    },
    /// A fee split did not conserve the price.
    FeeNotConserved {
        /// The price being split.
        price: u64,
        /// The protocol cut.
        fee: u64,
        /// The creator credit.
        creator_amount: u64,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SupplyExceeded { sold, max_supply } => {
                write!(f, "supply exceeded: sold {sold} > max {max_supply}")
            }
            Self::NonMonotonicId {
                previous,
                allocated,
            } => {
                write!(f, "non-monotonic id: {previous} -> {allocated}")
            }
            Self::InvertedWindow {
                start_time,
                expiry_time,
            } => {
                write!(f, "inverted window: expiry {expiry_time} < start {start_time}")
            }
            Self::FeeNotConserved {
                price,
                fee,
                creator_amount,
            } => {
                write!(
                    f,
                    "fee not conserved: {fee} + {creator_amount} != {price}"
                )
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
