//! # Storage Keys
//!
//! Structured (entity-tag, id) keys for the durable store: a one-byte tag
//! followed by the raw id bytes (u64, little-endian) or the address bytes.
//! Replaces ad-hoc string concatenation so key construction is total and
//! collision-free by construction.

use crate::domain::value_objects::{Address, CertificateId, PassId, SubscriptionId};

/// One-byte entity tags. Stable: changing a tag orphans stored records.
pub mod tags {
    /// Deployer/owner address record.
    pub const OWNER: u8 = 0x01;
    /// Protocol fee record (basis points).
    pub const PROTOCOL_FEE: u8 = 0x02;
    /// Pass id counter.
    pub const PASS_COUNTER: u8 = 0x03;
    /// Subscription id counter.
    pub const SUBSCRIPTION_COUNTER: u8 = 0x04;
    /// Certificate id counter.
    pub const CERTIFICATE_COUNTER: u8 = 0x05;
    /// Pass record, keyed by pass id.
    pub const PASS: u8 = 0x10;
    /// Subscription record, keyed by subscription id.
    pub const SUBSCRIPTION: u8 = 0x11;
    /// Certificate record, keyed by certificate id.
    pub const CERTIFICATE: u8 = 0x12;
    /// Creator profile, keyed by creator address.
    pub const CREATOR_PROFILE: u8 = 0x20;
    /// Creator's pass id list, keyed by creator address.
    pub const CREATOR_PASSES: u8 = 0x21;
    /// User's subscription id list, keyed by user address.
    pub const USER_SUBSCRIPTIONS: u8 = 0x22;
    /// Pass's subscriber id list, keyed by pass id.
    pub const PASS_SUBSCRIBERS: u8 = 0x23;
    /// Creator earnings balance, keyed by creator address.
    pub const EARNINGS: u8 = 0x24;
}

/// A typed key into the durable store.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StoreKey<'a> {
    /// Deployer/owner address record.
    Owner,
    /// Protocol fee record (basis points).
    ProtocolFee,
    /// Pass id counter.
    PassCounter,
    /// Subscription id counter.
    SubscriptionCounter,
    /// Certificate id counter.
    CertificateCounter,
    /// Pass record.
    Pass(PassId),
    /// Subscription record.
    Subscription(SubscriptionId),
    /// Certificate record.
    Certificate(CertificateId),
    /// Creator profile.
    CreatorProfile(&'a Address),
    /// Creator's pass id list.
    CreatorPasses(&'a Address),
    /// User's subscription id list.
    UserSubscriptions(&'a Address),
    /// Pass's subscriber id list.
    PassSubscribers(PassId),
    /// Creator earnings balance.
    Earnings(&'a Address),
}

impl StoreKey<'_> {
    /// Encodes the key to its byte form.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        fn tagged_id(tag: u8, id: u64) -> Vec<u8> {
            let mut key = Vec::with_capacity(9);
            key.push(tag);
            key.extend_from_slice(&id.to_le_bytes());
            key
        }
        fn tagged_addr(tag: u8, addr: &Address) -> Vec<u8> {
            let mut key = Vec::with_capacity(1 + addr.as_bytes().len());
            key.push(tag);
            key.extend_from_slice(addr.as_bytes());
            key
        }

        match self {
            Self::Owner => vec![tags::OWNER],
            Self::ProtocolFee => vec![tags::PROTOCOL_FEE],
            Self::PassCounter => vec![tags::PASS_COUNTER],
            Self::SubscriptionCounter => vec![tags::SUBSCRIPTION_COUNTER],
            Self::CertificateCounter => vec![tags::CERTIFICATE_COUNTER],
            Self::Pass(id) => tagged_id(tags::PASS, id.raw()),
            Self::Subscription(id) => tagged_id(tags::SUBSCRIPTION, id.raw()),
            Self::Certificate(id) => tagged_id(tags::CERTIFICATE, id.raw()),
            Self::CreatorProfile(addr) => tagged_addr(tags::CREATOR_PROFILE, addr),
            Self::CreatorPasses(addr) => tagged_addr(tags::CREATOR_PASSES, addr),
            Self::UserSubscriptions(addr) => tagged_addr(tags::USER_SUBSCRIPTIONS, addr),
            Self::PassSubscribers(id) => tagged_id(tags::PASS_SUBSCRIBERS, id.raw()),
            Self::Earnings(addr) => tagged_addr(tags::EARNINGS, addr),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
