//! # Pass Ledger Service
//!
//! The state machine behind every entry point. Each call follows the same
//! shape: read the affected records, gate on preconditions, stage every
//! write in a [`WriteBatch`], and only then commit the batch in one atomic
//! store operation. A call that fails any gate drops its batch, so no
//! partial state ever lands.
//!
//! Deferred calls are submitted to the scheduler *before* the batch
//! commits: if the commit then fails, the orphaned callback later meets
//! [`PassLedgerService::process_expiry`]'s re-validation and dies as a
//! no-op, which the at-least-once delivery contract already requires us to
//! tolerate.

use crate::adapters::{InMemoryScheduler, InMemoryStore, RecordingEventSink};
use crate::domain::codec::{decode_id_list, decode_u64, encode_id_list, encode_u64, WireRecord};
use crate::domain::entities::{
    Certificate, CertificateDraft, CreatorProfile, Pass, PassDraft, Subscription,
    SubscriptionStatus,
};
use crate::domain::fees::{self, FEE_DENOMINATOR};
use crate::domain::invariants;
use crate::domain::keys::StoreKey;
use crate::domain::value_objects::{Address, CertificateId, PassId, SubscriptionId};
use crate::errors::{DecodeError, LedgerError, StoreError};
use crate::events::{ExpiryReason, LedgerEvent};
use crate::ports::inbound::{CallContext, ExpiryOutcome, PassLedgerApi};
use crate::ports::outbound::{
    DeferredCall, DeferredCallScheduler, EventSink, KeyValueStore, WriteBatch,
};

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Ledger service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Fee applied when no protocol-fee record exists yet; also the value
    /// `init` writes.
    pub default_fee_bps: u64,
    /// Whether purchases and renewals hand expiry callbacks to the
    /// scheduler. Hosts that drive expiry externally can turn this off.
    pub scheduling: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_fee_bps: fees::DEFAULT_FEE_BPS,
            scheduling: true,
        }
    }
}

/// Counters the service keeps about its own activity.
#[derive(Debug, Default, Clone)]
pub struct ServiceStats {
    /// Passes listed.
    pub passes_created: u64,
    /// Subscriptions opened by purchase.
    pub subscriptions_opened: u64,
    /// In-place renewals processed.
    pub renewals: u64,
    /// Subscriptions settled as expired.
    pub expirations: u64,
    /// Certificates issued.
    pub certificates_issued: u64,
}

// =============================================================================
// SERVICE
// =============================================================================

/// The access-pass ledger over its three outbound ports.
pub struct PassLedgerService<S, D, E>
where
    S: KeyValueStore,
    D: DeferredCallScheduler,
    E: EventSink,
{
    store: Arc<S>,
    scheduler: Arc<D>,
    events: Arc<E>,
    config: ServiceConfig,
    stats: Arc<RwLock<ServiceStats>>,
}

impl<S, D, E> PassLedgerService<S, D, E>
where
    S: KeyValueStore,
    D: DeferredCallScheduler,
    E: EventSink,
{
    /// Creates a service over the given ports.
    pub fn new(store: Arc<S>, scheduler: Arc<D>, events: Arc<E>, config: ServiceConfig) -> Self {
        Self {
            store,
            scheduler,
            events,
            config,
            stats: Arc::new(RwLock::new(ServiceStats::default())),
        }
    }

    /// The store this service reads and commits to.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The scheduler this service hands deferred calls to.
    pub fn scheduler(&self) -> &Arc<D> {
        &self.scheduler
    }

    /// The sink this service emits events into.
    pub fn events(&self) -> &Arc<E> {
        &self.events
    }

    /// Snapshot of the service's activity counters.
    pub async fn stats(&self) -> ServiceStats {
        self.stats.read().await.clone()
    }

    // -------------------------------------------------------------------------
    // Read helpers (read-through the call's staged writes)
    // -------------------------------------------------------------------------

    async fn read_raw(
        &self,
        batch: &WriteBatch,
        key: &StoreKey<'_>,
    ) -> Result<Option<Vec<u8>>, StoreError> {
        let key_bytes = key.to_bytes();
        if let Some(staged) = batch.get(&key_bytes) {
            return Ok(Some(staged.to_vec()));
        }
        self.store.get(&key_bytes).await
    }

    async fn read_record<T: WireRecord>(
        &self,
        batch: &WriteBatch,
        key: &StoreKey<'_>,
    ) -> Result<Option<T>, LedgerError> {
        match self.read_raw(batch, key).await? {
            Some(bytes) => Ok(Some(T::from_bytes(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn read_u64_or(
        &self,
        batch: &WriteBatch,
        key: &StoreKey<'_>,
        default: u64,
    ) -> Result<u64, LedgerError> {
        match self.read_raw(batch, key).await? {
            Some(bytes) => Ok(decode_u64(&bytes)?),
            None => Ok(default),
        }
    }

    async fn read_id_list<I: From<u64>>(
        &self,
        batch: &WriteBatch,
        key: &StoreKey<'_>,
    ) -> Result<Vec<I>, LedgerError> {
        match self.read_raw(batch, key).await? {
            Some(bytes) => Ok(decode_id_list(&bytes)?),
            None => Ok(Vec::new()),
        }
    }

    /// Reads, bumps and stages an id counter. The id sequence is dense:
    /// each allocation yields exactly the successor of the last.
    async fn alloc_id(
        &self,
        batch: &mut WriteBatch,
        key: &StoreKey<'_>,
    ) -> Result<u64, LedgerError> {
        let previous = self.read_u64_or(batch, key, 0).await?;
        let allocated = previous + 1;
        if !invariants::check_monotonic_id(previous, allocated) {
            return Err(LedgerError::InvariantViolated(
                invariants::InvariantViolation::NonMonotonicId {
                    previous,
                    allocated,
                }
                .to_string(),
            ));
        }
        batch.set(key, encode_u64(allocated));
        Ok(allocated)
    }

    /// Appends an id to a stored list, rewriting the list wholesale.
    async fn append_to_list<I: Copy + Into<u64> + From<u64>>(
        &self,
        batch: &mut WriteBatch,
        key: &StoreKey<'_>,
        id: I,
    ) -> Result<(), LedgerError> {
        let mut ids: Vec<I> = self.read_id_list(batch, key).await?;
        ids.push(id);
        batch.set(key, encode_id_list(&ids));
        Ok(())
    }

    async fn fee_rate(&self, batch: &WriteBatch) -> Result<u64, LedgerError> {
        self.read_u64_or(batch, &StoreKey::ProtocolFee, self.config.default_fee_bps)
            .await
    }

    /// Credits a creator's earnings balance inside the batch.
    async fn credit_earnings(
        &self,
        batch: &mut WriteBatch,
        creator: &Address,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let key = StoreKey::Earnings(creator);
        let balance = self.read_u64_or(batch, &key, 0).await?;
        batch.set(&key, encode_u64(balance.saturating_add(amount)));
        Ok(())
    }

    async fn owner(&self, batch: &WriteBatch) -> Result<Option<Address>, LedgerError> {
        match self.read_raw(batch, &StoreKey::Owner).await? {
            Some(bytes) => {
                let addr = String::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8)?;
                Ok(Some(Address::from(addr)))
            }
            None => Ok(None),
        }
    }

    // -------------------------------------------------------------------------
    // Commit / schedule / emit
    // -------------------------------------------------------------------------

    async fn commit(&self, batch: WriteBatch) -> Result<(), LedgerError> {
        debug!(writes = batch.len(), "committing write batch");
        self.store.apply(batch).await?;
        Ok(())
    }

    /// Hands the expiry callback for a subscription to the scheduler.
    /// Must run before the batch commits; see the module docs.
    async fn schedule_expiry(
        &self,
        sub_id: SubscriptionId,
        not_before: u64,
    ) -> Result<bool, LedgerError> {
        if !self.config.scheduling {
            return Ok(false);
        }
        let task_id = self
            .scheduler
            .schedule(DeferredCall::process_expiry(sub_id, not_before))
            .await?;
        debug!(%sub_id, not_before, %task_id, "scheduled expiry callback");
        Ok(true)
    }

    /// Settles a subscription as expired inside the batch.
    fn stage_expiry(batch: &mut WriteBatch, sub: &mut Subscription) {
        sub.expire();
        batch.set(&StoreKey::Subscription(sub.id), sub.to_bytes());
    }
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

#[async_trait]
impl<S, D, E> PassLedgerApi for PassLedgerService<S, D, E>
where
    S: KeyValueStore,
    D: DeferredCallScheduler,
    E: EventSink,
{
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    async fn init(&self, ctx: &CallContext, owner: Address) -> Result<(), LedgerError> {
        let mut batch = WriteBatch::new();
        // Runs once, at deployment. A second attempt would reset the id
        // counters, so it is rejected outright.
        if self.owner(&batch).await?.is_some() {
            return Err(LedgerError::Unauthorized);
        }
        batch.set(&StoreKey::Owner, owner.as_bytes().to_vec());
        batch.set(&StoreKey::PassCounter, encode_u64(0));
        batch.set(&StoreKey::SubscriptionCounter, encode_u64(0));
        batch.set(&StoreKey::CertificateCounter, encode_u64(0));
        batch.set(&StoreKey::ProtocolFee, encode_u64(self.config.default_fee_bps));
        self.commit(batch).await?;

        info!(%owner, "ledger initialized");
        self.events.emit(LedgerEvent::Initialized { owner }).await;
        Ok(())
    }

    #[instrument(skip(self, ctx, profile), fields(caller = %ctx.caller))]
    async fn set_creator_profile(
        &self,
        ctx: &CallContext,
        profile: CreatorProfile,
    ) -> Result<(), LedgerError> {
        let mut batch = WriteBatch::new();
        batch.set(&StoreKey::CreatorProfile(&ctx.caller), profile.to_bytes());
        self.commit(batch).await?;

        self.events
            .emit(LedgerEvent::ProfileUpdated {
                creator: ctx.caller.clone(),
            })
            .await;
        Ok(())
    }

    async fn get_creator_profile(
        &self,
        creator: &Address,
    ) -> Result<Option<CreatorProfile>, LedgerError> {
        self.read_record(&WriteBatch::new(), &StoreKey::CreatorProfile(creator))
            .await
    }

    #[instrument(skip(self, ctx, draft), fields(caller = %ctx.caller, name = %draft.name))]
    async fn create_pass(
        &self,
        ctx: &CallContext,
        draft: PassDraft,
    ) -> Result<PassId, LedgerError> {
        let mut batch = WriteBatch::new();

        let pass_id = PassId::new(self.alloc_id(&mut batch, &StoreKey::PassCounter).await?);
        let pass = Pass::from_draft(pass_id, ctx.caller.clone(), draft);
        batch.set(&StoreKey::Pass(pass_id), pass.to_bytes());
        self.append_to_list(&mut batch, &StoreKey::CreatorPasses(&ctx.caller), pass_id)
            .await?;
        self.commit(batch).await?;

        info!(%pass_id, "pass created");
        self.stats.write().await.passes_created += 1;
        self.events
            .emit(LedgerEvent::PassCreated {
                pass_id,
                creator: ctx.caller.clone(),
            })
            .await;
        Ok(pass_id)
    }

    async fn get_pass(&self, id: PassId) -> Result<Option<Pass>, LedgerError> {
        self.read_record(&WriteBatch::new(), &StoreKey::Pass(id)).await
    }

    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    async fn toggle_pass_active(
        &self,
        ctx: &CallContext,
        id: PassId,
    ) -> Result<bool, LedgerError> {
        let mut batch = WriteBatch::new();
        let mut pass: Pass = self
            .read_record(&batch, &StoreKey::Pass(id))
            .await?
            .ok_or(LedgerError::PassNotFound(id))?;
        if pass.creator != ctx.caller {
            return Err(LedgerError::Unauthorized);
        }

        pass.active = !pass.active;
        batch.set(&StoreKey::Pass(id), pass.to_bytes());
        self.commit(batch).await?;

        info!(%id, active = pass.active, "pass toggled");
        self.events
            .emit(LedgerEvent::PassToggled {
                pass_id: id,
                active: pass.active,
            })
            .await;
        Ok(pass.active)
    }

    #[instrument(skip(self, ctx), fields(caller = %ctx.caller, %pass_id))]
    async fn buy_pass(
        &self,
        ctx: &CallContext,
        pass_id: PassId,
        auto_renew: bool,
    ) -> Result<SubscriptionId, LedgerError> {
        let mut batch = WriteBatch::new();

        let mut pass: Pass = self
            .read_record(&batch, &StoreKey::Pass(pass_id))
            .await?
            .ok_or(LedgerError::PassNotFound(pass_id))?;
        if !pass.active {
            return Err(LedgerError::PassInactive(pass_id));
        }
        if pass.is_sold_out() {
            return Err(LedgerError::SoldOut(pass_id));
        }
        if auto_renew && !pass.auto_renew_allowed {
            return Err(LedgerError::AutoRenewNotAllowed(pass_id));
        }

        // Credit the creator with the fee-split listed price. Whether the
        // attached payment actually covers it is the settlement layer's
        // problem, not this ledger's.
        let rate = self.fee_rate(&batch).await?;
        let split = fees::split(pass.price, rate);
        if !invariants::check_fee_split(pass.price, &split) {
            return Err(LedgerError::InvariantViolated(
                invariants::InvariantViolation::FeeNotConserved {
                    price: pass.price,
                    fee: split.fee,
                    creator_amount: split.creator_amount,
                }
                .to_string(),
            ));
        }
        self.credit_earnings(&mut batch, &pass.creator, split.creator_amount)
            .await?;

        let sub_id = SubscriptionId::new(
            self.alloc_id(&mut batch, &StoreKey::SubscriptionCounter)
                .await?,
        );
        let sub = Subscription::open(
            sub_id,
            pass_id,
            ctx.caller.clone(),
            ctx.timestamp,
            pass.duration_seconds,
            auto_renew,
        );
        batch.set(&StoreKey::Subscription(sub_id), sub.to_bytes());

        self.append_to_list(
            &mut batch,
            &StoreKey::UserSubscriptions(&ctx.caller),
            sub_id,
        )
        .await?;
        self.append_to_list(&mut batch, &StoreKey::PassSubscribers(pass_id), sub_id)
            .await?;

        pass.sold += 1;
        if !invariants::check_supply(&pass) {
            return Err(LedgerError::InvariantViolated(
                invariants::InvariantViolation::SupplyExceeded {
                    sold: pass.sold,
                    max_supply: pass.max_supply,
                }
                .to_string(),
            ));
        }
        batch.set(&StoreKey::Pass(pass_id), pass.to_bytes());

        let scheduled = self.schedule_expiry(sub_id, sub.expiry_time).await?;
        self.commit(batch).await?;

        info!(%sub_id, expiry = sub.expiry_time, auto_renew, "pass purchased");
        self.stats.write().await.subscriptions_opened += 1;
        self.events
            .emit(LedgerEvent::PassPurchased {
                pass_id,
                subscription_id: sub_id,
                user: ctx.caller.clone(),
                auto_renew,
            })
            .await;
        if scheduled {
            self.events
                .emit(LedgerEvent::ExpiryScheduled {
                    subscription_id: sub_id,
                    not_before: sub.expiry_time,
                })
                .await;
        }
        Ok(sub_id)
    }

    async fn has_access(
        &self,
        ctx: &CallContext,
        user: &Address,
        pass_id: PassId,
    ) -> Result<bool, LedgerError> {
        let batch = WriteBatch::new();
        let sub_ids: Vec<SubscriptionId> = self
            .read_id_list(&batch, &StoreKey::UserSubscriptions(user))
            .await?;

        for sub_id in sub_ids {
            let sub = match self
                .read_record::<Subscription>(&batch, &StoreKey::Subscription(sub_id))
                .await?
            {
                Some(sub) => sub,
                None => continue,
            };
            if sub.pass_id == pass_id && sub.is_live(ctx.timestamp) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    #[instrument(skip(self, ctx), fields(caller = %ctx.caller, %sub_id))]
    async fn cancel_auto_renew(
        &self,
        ctx: &CallContext,
        sub_id: SubscriptionId,
    ) -> Result<(), LedgerError> {
        let mut batch = WriteBatch::new();
        let mut sub: Subscription = self
            .read_record(&batch, &StoreKey::Subscription(sub_id))
            .await?
            .ok_or(LedgerError::SubscriptionNotFound(sub_id))?;
        if sub.user != ctx.caller {
            return Err(LedgerError::Unauthorized);
        }

        // Only the flag changes; the status stays as it is and the pending
        // callback is left in place to observe the flag when it fires.
        sub.auto_renew = false;
        batch.set(&StoreKey::Subscription(sub_id), sub.to_bytes());
        self.commit(batch).await?;

        info!(%sub_id, "auto-renew cancelled");
        self.events
            .emit(LedgerEvent::AutoRenewCancelled {
                subscription_id: sub_id,
            })
            .await;
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(%sub_id, now = ctx.timestamp))]
    async fn process_expiry(
        &self,
        ctx: &CallContext,
        sub_id: SubscriptionId,
    ) -> Result<ExpiryOutcome, LedgerError> {
        let mut batch = WriteBatch::new();
        let mut sub: Subscription = self
            .read_record(&batch, &StoreKey::Subscription(sub_id))
            .await?
            .ok_or(LedgerError::SubscriptionNotFound(sub_id))?;

        // Duplicate or late delivery of an already-settled subscription is
        // the expected case under at-least-once scheduling.
        if sub.status != SubscriptionStatus::Active {
            debug!(status = ?sub.status, "expiry already settled");
            return Ok(ExpiryOutcome::AlreadySettled(sub.status));
        }

        if sub.auto_renew && ctx.timestamp >= sub.expiry_time {
            let pass = match self
                .read_record::<Pass>(&batch, &StoreKey::Pass(sub.pass_id))
                .await?
            {
                Some(pass) if pass.active => pass,
                missing_or_paused => {
                    let reason = if missing_or_paused.is_none() {
                        ExpiryReason::PassMissing
                    } else {
                        ExpiryReason::PassInactive
                    };
                    warn!(pass_id = %sub.pass_id, ?reason, "renewal impossible, expiring");
                    Self::stage_expiry(&mut batch, &mut sub);
                    self.commit(batch).await?;
                    self.stats.write().await.expirations += 1;
                    self.events
                        .emit(LedgerEvent::SubscriptionExpired {
                            subscription_id: sub_id,
                            reason,
                        })
                        .await;
                    return Ok(ExpiryOutcome::PassUnavailable);
                }
            };

            // Renew from the scheduled expiry, not from the delivery time,
            // at the pass's current price.
            let rate = self.fee_rate(&batch).await?;
            let split = fees::split(pass.price, rate);
            self.credit_earnings(&mut batch, &pass.creator, split.creator_amount)
                .await?;
            sub.renew(pass.duration_seconds);
            batch.set(&StoreKey::Subscription(sub_id), sub.to_bytes());

            let scheduled = self.schedule_expiry(sub_id, sub.expiry_time).await?;
            self.commit(batch).await?;

            info!(new_expiry = sub.expiry_time, "subscription renewed");
            self.stats.write().await.renewals += 1;
            self.events
                .emit(LedgerEvent::SubscriptionRenewed {
                    subscription_id: sub_id,
                    expiry_time: sub.expiry_time,
                })
                .await;
            if scheduled {
                self.events
                    .emit(LedgerEvent::ExpiryScheduled {
                        subscription_id: sub_id,
                        not_before: sub.expiry_time,
                    })
                    .await;
            }
            return Ok(ExpiryOutcome::Renewed {
                expiry_time: sub.expiry_time,
            });
        }

        // No renewal wanted (or an early delivery with auto-renew on, which
        // only the renewal branch time-gates): settle as expired.
        Self::stage_expiry(&mut batch, &mut sub);
        self.commit(batch).await?;

        info!("subscription expired");
        self.stats.write().await.expirations += 1;
        self.events
            .emit(LedgerEvent::SubscriptionExpired {
                subscription_id: sub_id,
                reason: ExpiryReason::PeriodEnded,
            })
            .await;
        Ok(ExpiryOutcome::Expired)
    }

    #[instrument(skip(self, ctx, draft), fields(caller = %ctx.caller, %pass_id))]
    async fn issue_certificate(
        &self,
        ctx: &CallContext,
        pass_id: PassId,
        draft: CertificateDraft,
    ) -> Result<CertificateId, LedgerError> {
        let mut batch = WriteBatch::new();
        let pass: Pass = self
            .read_record(&batch, &StoreKey::Pass(pass_id))
            .await?
            .ok_or(LedgerError::PassNotFound(pass_id))?;
        if pass.creator != ctx.caller {
            return Err(LedgerError::Unauthorized);
        }

        let cert_id = CertificateId::new(
            self.alloc_id(&mut batch, &StoreKey::CertificateCounter)
                .await?,
        );
        let cert = Certificate::from_draft(cert_id, pass_id, ctx.caller.clone(), draft);
        batch.set(&StoreKey::Certificate(cert_id), cert.to_bytes());
        self.commit(batch).await?;

        info!(%cert_id, "certificate issued");
        self.stats.write().await.certificates_issued += 1;
        self.events
            .emit(LedgerEvent::CertificateIssued {
                certificate_id: cert_id,
                pass_id,
                issuer: ctx.caller.clone(),
            })
            .await;
        Ok(cert_id)
    }

    async fn get_certificate(
        &self,
        id: CertificateId,
    ) -> Result<Option<Certificate>, LedgerError> {
        self.read_record(&WriteBatch::new(), &StoreKey::Certificate(id))
            .await
    }

    async fn get_user_subscriptions(
        &self,
        user: &Address,
    ) -> Result<Vec<SubscriptionId>, LedgerError> {
        self.read_id_list(&WriteBatch::new(), &StoreKey::UserSubscriptions(user))
            .await
    }

    async fn get_pass_subscribers(
        &self,
        pass_id: PassId,
    ) -> Result<Vec<SubscriptionId>, LedgerError> {
        self.read_id_list(&WriteBatch::new(), &StoreKey::PassSubscribers(pass_id))
            .await
    }

    async fn get_creator_passes(&self, creator: &Address) -> Result<Vec<PassId>, LedgerError> {
        self.read_id_list(&WriteBatch::new(), &StoreKey::CreatorPasses(creator))
            .await
    }

    async fn get_earnings(&self, ctx: &CallContext) -> Result<u64, LedgerError> {
        self.read_u64_or(&WriteBatch::new(), &StoreKey::Earnings(&ctx.caller), 0)
            .await
    }

    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    async fn withdraw_earnings(&self, ctx: &CallContext) -> Result<u64, LedgerError> {
        let mut batch = WriteBatch::new();
        let key = StoreKey::Earnings(&ctx.caller);
        let balance = self.read_u64_or(&batch, &key, 0).await?;
        if balance == 0 {
            return Err(LedgerError::NothingToWithdraw);
        }

        batch.set(&key, encode_u64(0));
        self.commit(batch).await?;

        info!(amount = balance, "earnings withdrawn");
        self.events
            .emit(LedgerEvent::EarningsWithdrawn {
                creator: ctx.caller.clone(),
                amount: balance,
            })
            .await;
        Ok(balance)
    }

    #[instrument(skip(self, ctx), fields(caller = %ctx.caller, rate_bps))]
    async fn set_protocol_fee(
        &self,
        ctx: &CallContext,
        rate_bps: u64,
    ) -> Result<(), LedgerError> {
        if rate_bps > FEE_DENOMINATOR {
            return Err(LedgerError::FeeOutOfRange(rate_bps));
        }
        let mut batch = WriteBatch::new();
        match self.owner(&batch).await? {
            Some(owner) if owner == ctx.caller => {}
            _ => return Err(LedgerError::Unauthorized),
        }

        batch.set(&StoreKey::ProtocolFee, encode_u64(rate_bps));
        self.commit(batch).await?;

        info!(rate_bps, "protocol fee updated");
        self.events
            .emit(LedgerEvent::ProtocolFeeUpdated { rate_bps })
            .await;
        Ok(())
    }

    async fn protocol_fee(&self) -> Result<u64, LedgerError> {
        self.fee_rate(&WriteBatch::new()).await
    }
}

// =============================================================================
// TEST SERVICE
// =============================================================================

/// Builds a service over the in-memory adapters with default config.
#[must_use]
pub fn create_test_service(
) -> PassLedgerService<InMemoryStore, InMemoryScheduler, RecordingEventSink> {
    PassLedgerService::new(
        Arc::new(InMemoryStore::new()),
        Arc::new(InMemoryScheduler::new()),
        Arc::new(RecordingEventSink::new()),
        ServiceConfig::default(),
    )
}

// =============================================================================
// TESTS
// =============================================================================
