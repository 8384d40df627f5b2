//! # Core Domain Entities
//!
//! The records the ledger persists: passes, subscriptions, certificates and
//! creator profiles, plus the draft structs entry points accept.

use crate::domain::value_objects::{Address, CertificateId, PassId, SubscriptionId};
use serde::{Deserialize, Serialize};

// =============================================================================
// PASS
// =============================================================================

/// A purchasable access-right definition created by a creator.
///
/// Created once, mutated only by purchase (`sold += 1`) and the active
/// toggle, never deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pass {
    /// Immutable identifier assigned at creation.
    pub id: PassId,
    /// Creator account; the only account allowed to toggle or issue
    /// certificates against this pass.
    pub creator: Address,
    /// Display name.
    pub name: String,
    /// Display description.
    pub description: String,
    /// Free-form category label.
    pub category: String,
    /// Free-form kind label (e.g. "subscription", "one-time", "timed").
    pub pass_type: String,
    /// Listed price per period, in the smallest token unit.
    pub price: u64,
    /// Reference to the payment token accepted for this pass.
    pub token_ref: String,
    /// Length of one access period in seconds.
    pub duration_seconds: u64,
    /// Whether buyers may opt into auto-renewal.
    pub auto_renew_allowed: bool,
    /// Supply cap; `0` means unlimited.
    pub max_supply: u32,
    /// Units sold so far. Monotonically non-decreasing.
    pub sold: u32,
    /// Off-ledger metadata reference (content-addressed).
    pub metadata_ref: String,
    /// Whether the pass is currently purchasable and renewable.
    pub active: bool,
}

impl Pass {
    /// Materializes a pass from a draft with a freshly allocated id.
    ///
    /// New passes start with zero sales and are active.
    #[must_use]
    pub fn from_draft(id: PassId, creator: Address, draft: PassDraft) -> Self {
        Self {
            id,
            creator,
            name: draft.name,
            description: draft.description,
            category: draft.category,
            pass_type: draft.pass_type,
            price: draft.price,
            token_ref: draft.token_ref,
            duration_seconds: draft.duration_seconds,
            auto_renew_allowed: draft.auto_renew_allowed,
            max_supply: draft.max_supply,
            sold: 0,
            metadata_ref: draft.metadata_ref,
            active: true,
        }
    }

    /// Returns true if the supply cap is exhausted.
    ///
    /// A cap of `0` means unlimited supply and is never sold out.
    #[must_use]
    pub fn is_sold_out(&self) -> bool {
        self.max_supply > 0 && self.sold >= self.max_supply
    }

    /// Returns true if the supply is uncapped.
    #[must_use]
    pub fn is_unlimited(&self) -> bool {
        self.max_supply == 0
    }
}

/// Creator-supplied fields of a new pass.
///
/// Everything except the id, the creator (taken from the caller), and the
/// ledger-managed `sold`/`active` fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassDraft {
    /// Display name.
    pub name: String,
    /// Display description.
    pub description: String,
    /// Free-form category label.
    pub category: String,
    /// Free-form kind label.
    pub pass_type: String,
    /// Listed price per period.
    pub price: u64,
    /// Payment token reference.
    pub token_ref: String,
    /// Length of one access period in seconds.
    pub duration_seconds: u64,
    /// Whether buyers may opt into auto-renewal.
    pub auto_renew_allowed: bool,
    /// Supply cap; `0` means unlimited.
    pub max_supply: u32,
    /// Off-ledger metadata reference.
    pub metadata_ref: String,
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Lifecycle state of a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubscriptionStatus {
    /// Within a paid period, or awaiting expiry processing.
    Active,
    /// Settled by expiry processing; terminal.
    Expired,
    /// Declared in the domain but never assigned by any operation:
    /// cancellation only clears the auto-renew flag and lets the
    /// subscription run out its paid period.
    Cancelled,
}

impl SubscriptionStatus {
    /// One-byte wire tag for this status.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Active => 0,
            Self::Expired => 1,
            Self::Cancelled => 2,
        }
    }

    /// Parses a one-byte wire tag. Returns `None` for unknown tags.
    #[must_use]
    pub const fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Active),
            1 => Some(Self::Expired),
            2 => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// A user's time-bounded grant of access to one pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Immutable identifier assigned at purchase.
    pub id: SubscriptionId,
    /// The pass this subscription grants access to.
    pub pass_id: PassId,
    /// The subscriber account.
    pub user: Address,
    /// Purchase time (unix seconds). Never changes, even across renewals.
    pub start_time: u64,
    /// End of the current paid period (unix seconds). Invariant:
    /// `expiry_time >= start_time`.
    pub expiry_time: u64,
    /// Whether expiry processing should renew instead of expire.
    pub auto_renew: bool,
    /// Lifecycle state.
    pub status: SubscriptionStatus,
}

impl Subscription {
    /// Opens a new active subscription starting now.
    #[must_use]
    pub fn open(
        id: SubscriptionId,
        pass_id: PassId,
        user: Address,
        now: u64,
        duration_seconds: u64,
        auto_renew: bool,
    ) -> Self {
        Self {
            id,
            pass_id,
            user,
            start_time: now,
            expiry_time: now.saturating_add(duration_seconds),
            auto_renew,
            status: SubscriptionStatus::Active,
        }
    }

    /// Returns true if this subscription grants access at `now`.
    #[must_use]
    pub fn is_live(&self, now: u64) -> bool {
        self.status == SubscriptionStatus::Active && now < self.expiry_time
    }

    /// Extends the current period by one duration.
    ///
    /// The new expiry is computed from the scheduled expiry, not from the
    /// delivery time, so renewal cadence never drifts with callback latency.
    pub fn renew(&mut self, duration_seconds: u64) {
        self.expiry_time = self.expiry_time.saturating_add(duration_seconds);
    }

    /// Settles the subscription as expired and clears auto-renew.
    pub fn expire(&mut self) {
        self.status = SubscriptionStatus::Expired;
        self.auto_renew = false;
    }
}

// =============================================================================
// CERTIFICATE
// =============================================================================

/// An immutable attestation record issued by a pass's creator.
///
/// Never mutated after creation and never indexed by recipient or issuer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    /// Immutable identifier assigned at issuance.
    pub id: CertificateId,
    /// The pass this certificate was issued under.
    pub pass_id: PassId,
    /// The issuing account (the pass creator at issuance time).
    pub issuer: Address,
    /// Recipient display name.
    pub recipient_name: String,
    /// Issuing organization display name.
    pub organization_name: String,
    /// Course or achievement display name.
    pub course_name: String,
    /// Issue date as supplied by the issuer.
    pub issue_date: String,
    /// Free-form certificate kind label.
    pub certificate_type: String,
    /// Off-ledger metadata reference.
    pub metadata_ref: String,
}

impl Certificate {
    /// Materializes a certificate from a draft with a freshly allocated id.
    #[must_use]
    pub fn from_draft(
        id: CertificateId,
        pass_id: PassId,
        issuer: Address,
        draft: CertificateDraft,
    ) -> Self {
        Self {
            id,
            pass_id,
            issuer,
            recipient_name: draft.recipient_name,
            organization_name: draft.organization_name,
            course_name: draft.course_name,
            issue_date: draft.issue_date,
            certificate_type: draft.certificate_type,
            metadata_ref: draft.metadata_ref,
        }
    }
}

/// Issuer-supplied fields of a new certificate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateDraft {
    /// Recipient display name.
    pub recipient_name: String,
    /// Issuing organization display name.
    pub organization_name: String,
    /// Course or achievement display name.
    pub course_name: String,
    /// Issue date as supplied by the issuer.
    pub issue_date: String,
    /// Free-form certificate kind label.
    pub certificate_type: String,
    /// Off-ledger metadata reference.
    pub metadata_ref: String,
}

// =============================================================================
// CREATOR PROFILE
// =============================================================================

/// Public profile of a creator, keyed by creator address.
///
/// Overwritten wholesale on every update.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreatorProfile {
    /// Display name.
    pub name: String,
    /// Display description.
    pub description: String,
    /// Off-ledger logo reference (content-addressed).
    pub logo_ref: String,
    /// Serialized social links, opaque to the ledger.
    pub social_links: String,
}

// =============================================================================
// TESTS
// =============================================================================
