//! # Driving Ports (Inbound)
//!
//! The ledger's entry points. Each method is one discrete, atomic external
//! call: the host decodes the argument blob, builds a [`CallContext`] from
//! the platform's caller identity and clock, and invokes exactly one method.
//! No ambient state is read anywhere below this seam.

use crate::domain::entities::{
    Certificate, CertificateDraft, CreatorProfile, Pass, PassDraft, SubscriptionStatus,
};
use crate::domain::value_objects::{Address, CertificateId, PassId, SubscriptionId};
use crate::errors::LedgerError;
use async_trait::async_trait;

// =============================================================================
// CALL CONTEXT
// =============================================================================

/// Per-call facts the host supplies: who is calling and when.
///
/// The timestamp is fixed for the whole call, so every time comparison
/// within one call is consistent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallContext {
    /// The calling account.
    pub caller: Address,
    /// Call time in unix seconds.
    pub timestamp: u64,
}

impl CallContext {
    /// Builds a context for a call arriving now.
    #[must_use]
    pub fn new(caller: Address, timestamp: u64) -> Self {
        Self { caller, timestamp }
    }
}

// =============================================================================
// EXPIRY OUTCOME
// =============================================================================

/// What expiry processing did to a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpiryOutcome {
    /// Renewed in place; the new period ends at `expiry_time`.
    Renewed {
        /// End of the renewed period.
        expiry_time: u64,
    },
    /// Settled as expired.
    Expired,
    /// Settled as expired because the pass is gone or paused, even though
    /// auto-renew was requested.
    PassUnavailable,
    /// Already settled by an earlier delivery; nothing changed.
    AlreadySettled(SubscriptionStatus),
}

// =============================================================================
// LEDGER API
// =============================================================================

/// The access-pass ledger's entry points.
///
/// Soft business rejections come back as `Err` with a non-abort
/// [`LedgerError`] variant and change no state; hard aborts
/// ([`LedgerError::is_abort`]) mean the platform must revert the call.
#[async_trait]
pub trait PassLedgerApi: Send + Sync {
    /// Initializes the ledger: records the owner, zeroes the id counters,
    /// writes the default protocol fee.
    async fn init(&self, ctx: &CallContext, owner: Address) -> Result<(), LedgerError>;

    /// Creates or overwrites the caller's creator profile.
    async fn set_creator_profile(
        &self,
        ctx: &CallContext,
        profile: CreatorProfile,
    ) -> Result<(), LedgerError>;

    /// Reads a creator's profile.
    async fn get_creator_profile(
        &self,
        creator: &Address,
    ) -> Result<Option<CreatorProfile>, LedgerError>;

    /// Lists a new pass owned by the caller. Returns the allocated id.
    async fn create_pass(&self, ctx: &CallContext, draft: PassDraft)
        -> Result<PassId, LedgerError>;

    /// Reads a pass.
    async fn get_pass(&self, id: PassId) -> Result<Option<Pass>, LedgerError>;

    /// Pauses or reactivates a pass. Caller must be its creator.
    /// Returns the new active state.
    async fn toggle_pass_active(
        &self,
        ctx: &CallContext,
        id: PassId,
    ) -> Result<bool, LedgerError>;

    /// Purchases a pass for the caller, opening an active subscription and
    /// crediting the creator's earnings with the fee-split price.
    ///
    /// Payment-amount verification is a settlement-layer concern: this
    /// ledger credits the split of the listed price and never inspects the
    /// attached payment.
    async fn buy_pass(
        &self,
        ctx: &CallContext,
        pass_id: PassId,
        auto_renew: bool,
    ) -> Result<SubscriptionId, LedgerError>;

    /// True iff `user` holds a live subscription to `pass_id` at the call
    /// time. Linear in the user's subscription count.
    async fn has_access(
        &self,
        ctx: &CallContext,
        user: &Address,
        pass_id: PassId,
    ) -> Result<bool, LedgerError>;

    /// Turns auto-renew off for a subscription the caller owns. The pending
    /// expiry callback is not retracted; it observes the flag when it fires.
    async fn cancel_auto_renew(
        &self,
        ctx: &CallContext,
        sub_id: SubscriptionId,
    ) -> Result<(), LedgerError>;

    /// Settles a subscription whose period has ended: renews in place when
    /// auto-renew is on and the pass is still purchasable, expires it
    /// otherwise. Idempotent — safe under duplicate or late delivery.
    async fn process_expiry(
        &self,
        ctx: &CallContext,
        sub_id: SubscriptionId,
    ) -> Result<ExpiryOutcome, LedgerError>;

    /// Issues an immutable certificate under a pass the caller created.
    async fn issue_certificate(
        &self,
        ctx: &CallContext,
        pass_id: PassId,
        draft: CertificateDraft,
    ) -> Result<CertificateId, LedgerError>;

    /// Reads a certificate.
    async fn get_certificate(&self, id: CertificateId)
        -> Result<Option<Certificate>, LedgerError>;

    /// Lists a user's subscription ids in purchase order.
    async fn get_user_subscriptions(
        &self,
        user: &Address,
    ) -> Result<Vec<SubscriptionId>, LedgerError>;

    /// Lists a pass's subscriber subscription ids in purchase order.
    async fn get_pass_subscribers(
        &self,
        pass_id: PassId,
    ) -> Result<Vec<SubscriptionId>, LedgerError>;

    /// Lists a creator's pass ids in creation order.
    async fn get_creator_passes(&self, creator: &Address) -> Result<Vec<PassId>, LedgerError>;

    /// Reads the caller's earnings balance.
    async fn get_earnings(&self, ctx: &CallContext) -> Result<u64, LedgerError>;

    /// Resets the caller's earnings balance to zero and returns the prior
    /// value. No asset moves; settlement is external.
    async fn withdraw_earnings(&self, ctx: &CallContext) -> Result<u64, LedgerError>;

    /// Owner-only: sets the protocol fee in basis points (at most 10_000).
    async fn set_protocol_fee(&self, ctx: &CallContext, rate_bps: u64)
        -> Result<(), LedgerError>;

    /// Reads the protocol fee, defaulting when no record exists.
    async fn protocol_fee(&self) -> Result<u64, LedgerError>;
}
