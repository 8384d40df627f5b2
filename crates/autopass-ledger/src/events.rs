//! # Ledger Events
//!
//! Typed payloads emitted to the event sink on every state transition.
//! Events are observability output: fire-and-forget, never read back by the
//! ledger, and only emitted after a call's writes have committed.

use crate::domain::value_objects::{Address, CertificateId, PassId, SubscriptionId};
use serde::{Deserialize, Serialize};

/// Why a subscription stopped renewing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpiryReason {
    /// The paid period ran out with auto-renew off.
    PeriodEnded,
    /// Auto-renew was set but the pass no longer exists.
    PassMissing,
    /// Auto-renew was set but the pass is paused.
    PassInactive,
}

/// A state transition the ledger announces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// The ledger was initialized with its owner.
    Initialized {
        /// Deployer-designated owner account.
        owner: Address,
    },
    /// A creator profile was written (created or overwritten).
    ProfileUpdated {
        /// The profiled creator.
        creator: Address,
    },
    /// A new pass was listed.
    PassCreated {
        /// The new pass.
        pass_id: PassId,
        /// Its creator.
        creator: Address,
    },
    /// A pass was paused or reactivated.
    PassToggled {
        /// The toggled pass.
        pass_id: PassId,
        /// Purchasability after the toggle.
        active: bool,
    },
    /// A pass was purchased and a subscription opened.
    PassPurchased {
        /// The purchased pass.
        pass_id: PassId,
        /// The new subscription.
        subscription_id: SubscriptionId,
        /// The buyer.
        user: Address,
        /// Whether the subscription will auto-renew.
        auto_renew: bool,
    },
    /// A subscription renewed in place for another period.
    SubscriptionRenewed {
        /// The renewed subscription.
        subscription_id: SubscriptionId,
        /// End of the new period.
        expiry_time: u64,
    },
    /// A subscription was settled as expired.
    SubscriptionExpired {
        /// The settled subscription.
        subscription_id: SubscriptionId,
        /// Why it did not renew.
        reason: ExpiryReason,
    },
    /// A subscriber turned auto-renew off.
    AutoRenewCancelled {
        /// The affected subscription.
        subscription_id: SubscriptionId,
    },
    /// A deferred expiry/renewal callback was handed to the scheduler.
    ExpiryScheduled {
        /// The subscription the callback settles.
        subscription_id: SubscriptionId,
        /// Earliest delivery time.
        not_before: u64,
    },
    /// A certificate was issued.
    CertificateIssued {
        /// The new certificate.
        certificate_id: CertificateId,
        /// The pass it was issued under.
        pass_id: PassId,
        /// The issuing creator.
        issuer: Address,
    },
    /// A creator reset their earnings balance.
    EarningsWithdrawn {
        /// The withdrawing creator.
        creator: Address,
        /// Balance at withdrawal time.
        amount: u64,
    },
    /// The owner changed the protocol fee.
    ProtocolFeeUpdated {
        /// New rate in basis points.
        rate_bps: u64,
    },
}

impl LedgerEvent {
    /// Topic string for routing on an external event bus.
    #[must_use]
    pub fn topic(&self) -> &'static str {
        match self {
            Self::Initialized { .. } => topics::INITIALIZED,
            Self::ProfileUpdated { .. } => topics::PROFILE_UPDATED,
            Self::PassCreated { .. } => topics::PASS_CREATED,
            Self::PassToggled { .. } => topics::PASS_TOGGLED,
            Self::PassPurchased { .. } => topics::PASS_PURCHASED,
            Self::SubscriptionRenewed { .. } => topics::SUBSCRIPTION_RENEWED,
            Self::SubscriptionExpired { .. } => topics::SUBSCRIPTION_EXPIRED,
            Self::AutoRenewCancelled { .. } => topics::AUTO_RENEW_CANCELLED,
            Self::ExpiryScheduled { .. } => topics::EXPIRY_SCHEDULED,
            Self::CertificateIssued { .. } => topics::CERTIFICATE_ISSUED,
            Self::EarningsWithdrawn { .. } => topics::EARNINGS_WITHDRAWN,
            Self::ProtocolFeeUpdated { .. } => topics::PROTOCOL_FEE_UPDATED,
        }
    }
}

/// Event bus topics, one per transition.
pub mod topics {
    /// Ledger initialization.
    pub const INITIALIZED: &str = "autopass.ledger.initialized";
    /// Creator profile written.
    pub const PROFILE_UPDATED: &str = "autopass.profile.updated";
    /// Pass listed.
    pub const PASS_CREATED: &str = "autopass.pass.created";
    /// Pass paused/reactivated.
    pub const PASS_TOGGLED: &str = "autopass.pass.toggled";
    /// Pass purchased.
    pub const PASS_PURCHASED: &str = "autopass.pass.purchased";
    /// Subscription renewed.
    pub const SUBSCRIPTION_RENEWED: &str = "autopass.subscription.renewed";
    /// Subscription expired.
    pub const SUBSCRIPTION_EXPIRED: &str = "autopass.subscription.expired";
    /// Auto-renew turned off.
    pub const AUTO_RENEW_CANCELLED: &str = "autopass.subscription.auto_renew_cancelled";
    /// Expiry callback scheduled.
    pub const EXPIRY_SCHEDULED: &str = "autopass.subscription.expiry_scheduled";
    /// Certificate issued.
    pub const CERTIFICATE_ISSUED: &str = "autopass.certificate.issued";
    /// Earnings withdrawn.
    pub const EARNINGS_WITHDRAWN: &str = "autopass.earnings.withdrawn";
    /// Protocol fee changed.
    pub const PROTOCOL_FEE_UPDATED: &str = "autopass.protocol.fee_updated";
}

// =============================================================================
// TESTS
// =============================================================================
