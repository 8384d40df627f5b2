//! # Error Types
//!
//! All error types for the access-pass ledger.
//!
//! Failures travel on two channels. Business-rule rejections (pass not
//! found, sold out, unauthorized, ...) are **soft**: the call completes at
//! the platform level, makes no state change, and hands the caller a tagged
//! reason. Decode, store and scheduling failures are **hard aborts**: the
//! entire call reverts with zero state change. [`LedgerError::is_abort`]
//! tells the host which channel it is looking at.

use crate::domain::value_objects::{PassId, SubscriptionId};
use thiserror::Error;

// =============================================================================
// DECODE ERRORS (hard abort)
// =============================================================================

/// Errors from decoding a stored record or an argument blob.
///
/// Any decode failure aborts the whole call before a single write lands.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Input ended before a field could be read in full.
    #[error("unexpected end of input: wanted {wanted} more bytes, {remaining} remaining")]
    UnexpectedEof {
        /// Bytes the next field still needed.
        wanted: usize,
        /// Bytes actually left in the input.
        remaining: usize,
    },

    /// A boolean byte was neither 0 nor 1.
    #[error("invalid boolean byte: 0x{0:02X}")]
    InvalidBool(u8),

    /// A status byte did not name a known subscription status.
    #[error("invalid subscription status tag: 0x{0:02X}")]
    InvalidStatus(u8),

    /// A length-prefixed string was not valid UTF-8.
    #[error("invalid UTF-8 in string field")]
    InvalidUtf8,

    /// Input had bytes left over after the last field of a record.
    #[error("trailing bytes after record: {remaining} remaining")]
    TrailingBytes {
        /// Bytes left unread.
        remaining: usize,
    },
}

// =============================================================================
// STORE ERRORS (hard abort)
// =============================================================================

/// Errors from the durable key-value store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A write batch was rejected by the store.
    #[error("write batch rejected: {0}")]
    BatchRejected(String),
}

// =============================================================================
// SCHEDULE ERRORS (hard abort)
// =============================================================================

/// Errors from the deferred-call facility.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// The scheduler refused the call.
    #[error("deferred call rejected: {0}")]
    Rejected(String),

    /// The scheduler could not be reached.
    #[error("scheduler unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// All failure outcomes of a ledger entry point.
///
/// Soft variants reject the call with zero state change while the call
/// itself completes; hard variants abort the call entirely. See
/// [`LedgerError::is_abort`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    // --- soft rejections -----------------------------------------------------
    /// No pass exists under this id.
    #[error("pass {0} not found")]
    PassNotFound(PassId),

    /// The pass exists but is paused.
    #[error("pass {0} is not active")]
    PassInactive(PassId),

    /// The pass has a finite supply and it is exhausted.
    #[error("pass {0} sold out")]
    SoldOut(PassId),

    /// Auto-renewal was requested but the pass does not allow it.
    #[error("auto-renew not allowed for pass {0}")]
    AutoRenewNotAllowed(PassId),

    /// The caller does not own the entity it tried to act on.
    #[error("unauthorized caller")]
    Unauthorized,

    /// No subscription exists under this id.
    #[error("subscription {0} not found")]
    SubscriptionNotFound(SubscriptionId),

    /// Withdrawal with a zero balance.
    #[error("no earnings to withdraw")]
    NothingToWithdraw,

    /// Protocol fee above the full-price bound.
    #[error("fee rate {0} exceeds 10000 basis points")]
    FeeOutOfRange(u64),

    // --- hard aborts ---------------------------------------------------------
    /// A stored record or argument blob failed to decode.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The durable store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The deferred-call facility failed.
    #[error("schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Stored state violated a ledger invariant.
    #[error("invariant violated: {0}")]
    InvariantViolated(String),
}

impl LedgerError {
    /// Returns true if this error aborts the whole call at the platform
    /// level rather than rejecting it as a business outcome.
    #[must_use]
    pub fn is_abort(&self) -> bool {
        matches!(
            self,
            Self::Decode(_) | Self::Store(_) | Self::Schedule(_) | Self::InvariantViolated(_)
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
