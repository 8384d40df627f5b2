//! # Autopass Ledger - Access-Pass Subsystem
//!
//! ## Purpose
//!
//! Lets creators sell time-bounded access passes, tracks subscriptions with
//! optional auto-renewal, and issues immutable certificates, over a durable
//! key-value store reached through discrete, atomic external calls. The
//! ledger owns counter allocation, the binary record codec, index-list
//! maintenance, the subscription lifecycle, fee splitting into creator
//! earnings, and the renewal-scheduling protocol.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Finite supply never exceeded | `domain/invariants.rs` - `check_supply()` |
//! | Id allocation is dense and monotonic | `domain/invariants.rs` - `check_monotonic_id()` |
//! | Subscription window never inverted | `domain/invariants.rs` - `check_subscription_window()` |
//! | Renewal cadence is delivery-independent | `domain/invariants.rs` - `check_renewal_cadence()` |
//! | Fee split conserves the price | `domain/invariants.rs` - `check_fee_split()` |
//!
//! ## Call Model
//!
//! The host serializes calls: each entry point runs to completion before
//! the next is admitted, so the ledger holds no locks of its own. Every
//! call is all-or-nothing — writes are staged in a `WriteBatch` and commit
//! in a single atomic store operation only after every precondition has
//! passed. Deferred expiry callbacks are delivered at-least-once with no
//! upper bound on delay, so `process_expiry` re-validates everything and
//! tolerates duplicates.
//!
//! ## Error Channels
//!
//! | Channel | Cause | Effect |
//! |---------|-------|--------|
//! | Soft rejection | Business-rule violation | Tagged error value, zero state change |
//! | Hard abort | Decode/store/schedule failure | Whole call reverts |
//!
//! ## Usage Example
//!
//! ```ignore
//! use autopass_ledger::prelude::*;
//!
//! let service = create_test_service();
//! let ctx = CallContext::new(Address::from("AU1creator"), now);
//! let pass_id = service.create_pass(&ctx, draft).await?;
//! let sub_id = service.buy_pass(&buyer_ctx, pass_id, true).await?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        Certificate, CertificateDraft, CreatorProfile, Pass, PassDraft, Subscription,
        SubscriptionStatus,
    };

    // Value objects
    pub use crate::domain::value_objects::{Address, CertificateId, PassId, SubscriptionId};

    // Codec and keys
    pub use crate::domain::codec::{ByteReader, ByteWriter, WireRecord};
    pub use crate::domain::keys::StoreKey;

    // Fees and invariants
    pub use crate::domain::fees::{FeeSplit, DEFAULT_FEE_BPS, FEE_DENOMINATOR};
    pub use crate::domain::invariants::InvariantViolation;

    // Ports
    pub use crate::ports::inbound::{CallContext, ExpiryOutcome, PassLedgerApi};
    pub use crate::ports::outbound::{
        DeferredCall, DeferredCallScheduler, EventSink, KeyValueStore, TaskId, WriteBatch,
    };

    // Events
    pub use crate::events::{topics, ExpiryReason, LedgerEvent};

    // Errors
    pub use crate::errors::{DecodeError, LedgerError, ScheduleError, StoreError};

    // Adapters
    pub use crate::adapters::{InMemoryScheduler, InMemoryStore, RecordingEventSink};

    // Service
    pub use crate::service::{
        create_test_service, PassLedgerService, ServiceConfig, ServiceStats,
    };
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
