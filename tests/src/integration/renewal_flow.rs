//! # Renewal Flow Integration
//!
//! Drives the deferred-call loop the way a host platform would: pull due
//! callbacks from the scheduler, feed each into `process_expiry`, and let
//! the ledger re-validate everything. Covers renewal cadence under delayed
//! and duplicated delivery, cancellation, and expiry settlement.

#[cfg(test)]
mod tests {
    use autopass_ledger::prelude::*;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const T0: u64 = 1_700_000_000;
    const DAY: u64 = 86_400;

    fn ctx(caller: &str, timestamp: u64) -> CallContext {
        CallContext::new(Address::from(caller), timestamp)
    }

    fn renewable_pass(price: u64) -> PassDraft {
        PassDraft {
            name: "Monthly".into(),
            description: "Rolling access".into(),
            category: "membership".into(),
            pass_type: "subscription".into(),
            price,
            token_ref: "MAS".into(),
            duration_seconds: DAY,
            auto_renew_allowed: true,
            max_supply: 0,
            metadata_ref: "bafy-monthly".into(),
        }
    }

    async fn ledger_with_pass() -> (
        PassLedgerService<InMemoryStore, InMemoryScheduler, RecordingEventSink>,
        PassId,
    ) {
        let service = create_test_service();
        service
            .init(&ctx("AU1owner", T0), Address::from("AU1owner"))
            .await
            .unwrap();
        let pass_id = service
            .create_pass(&ctx("AU1creator", T0), renewable_pass(10_000))
            .await
            .unwrap();
        (service, pass_id)
    }

    /// Pulls every due callback at `now` and feeds it back into the ledger,
    /// exactly as the host's delivery loop would.
    async fn deliver_due(
        service: &PassLedgerService<InMemoryStore, InMemoryScheduler, RecordingEventSink>,
        now: u64,
    ) -> Vec<ExpiryOutcome> {
        let mut outcomes = Vec::new();
        for pending in service.scheduler().take_due(now) {
            let sub_id = pending.call.subscription_id().unwrap();
            let outcome = service
                .process_expiry(&ctx("AU1scheduler", now), sub_id)
                .await
                .unwrap();
            outcomes.push(outcome);
        }
        outcomes
    }

    // =============================================================================
    // RENEWAL CADENCE
    // =============================================================================

    /// Deliveries land late every cycle, but the expiry keeps stepping in
    /// exact multiples of the duration from the original expiry.
    #[tokio::test]
    async fn test_cadence_is_immune_to_delivery_delay() {
        let (service, pass_id) = ledger_with_pass().await;
        let sub_id = service
            .buy_pass(&ctx("AU1alice", T0), pass_id, true)
            .await
            .unwrap();
        let first_expiry = T0 + DAY;

        // Three renewal rounds, each delivered with a different lag.
        for (round, lag) in [(1u64, 17u64), (2, 4_000), (3, 86_000)] {
            let due_at = first_expiry + (round - 1) * DAY;
            let outcomes = deliver_due(&service, due_at + lag).await;
            assert_eq!(
                outcomes,
                vec![ExpiryOutcome::Renewed {
                    expiry_time: first_expiry + round * DAY
                }]
            );
        }

        let subs = service
            .get_user_subscriptions(&Address::from("AU1alice"))
            .await
            .unwrap();
        assert_eq!(subs, vec![sub_id]);

        // Each renewal credited the creator again: 4 periods at 9_500.
        assert_eq!(
            service.get_earnings(&ctx("AU1creator", T0)).await.unwrap(),
            4 * 9_500
        );
        assert_eq!(service.stats().await.renewals, 3);
    }

    #[tokio::test]
    async fn test_renewal_recomputes_fee_split() {
        let (service, pass_id) = ledger_with_pass().await;
        service
            .buy_pass(&ctx("AU1alice", T0), pass_id, true)
            .await
            .unwrap();

        // The owner doubles the protocol fee before the first renewal.
        service
            .set_protocol_fee(&ctx("AU1owner", T0 + 100), 1_000)
            .await
            .unwrap();

        deliver_due(&service, T0 + DAY).await;

        // First period at 5%, renewal at 10%.
        assert_eq!(
            service.get_earnings(&ctx("AU1creator", T0)).await.unwrap(),
            9_500 + 9_000
        );
    }

    // =============================================================================
    // EXPIRY WITHOUT RENEWAL
    // =============================================================================

    #[tokio::test]
    async fn test_one_shot_purchase_expires_and_access_ends() {
        let (service, pass_id) = ledger_with_pass().await;
        let alice = Address::from("AU1alice");
        service
            .buy_pass(&ctx("AU1alice", T0), pass_id, false)
            .await
            .unwrap();

        assert!(service
            .has_access(&ctx("AU1x", T0 + DAY - 1), &alice, pass_id)
            .await
            .unwrap());

        let outcomes = deliver_due(&service, T0 + DAY).await;
        assert_eq!(outcomes, vec![ExpiryOutcome::Expired]);

        assert!(!service
            .has_access(&ctx("AU1x", T0 + DAY), &alice, pass_id)
            .await
            .unwrap());
        // Nothing further is scheduled for a settled subscription.
        assert_eq!(service.scheduler().pending_count(), 0);
    }

    // =============================================================================
    // IDEMPOTENT SETTLEMENT
    // =============================================================================

    /// At-least-once delivery: the same callback lands twice. The second
    /// delivery is a pure no-op with an identical observable result.
    #[tokio::test]
    async fn test_duplicate_delivery_is_idempotent() {
        let (service, pass_id) = ledger_with_pass().await;
        let sub_id = service
            .buy_pass(&ctx("AU1alice", T0), pass_id, false)
            .await
            .unwrap();

        let due = service.scheduler().take_due(T0 + DAY);
        assert_eq!(due.len(), 1);

        let first = service
            .process_expiry(&ctx("AU1scheduler", T0 + DAY), sub_id)
            .await
            .unwrap();
        assert_eq!(first, ExpiryOutcome::Expired);

        // Redeliver the very same callback.
        service.scheduler().requeue(due[0].clone());
        let events_before = service.events().len();
        for _ in 0..2 {
            let again = service
                .process_expiry(&ctx("AU1scheduler", T0 + DAY + 50), sub_id)
                .await
                .unwrap();
            assert_eq!(
                again,
                ExpiryOutcome::AlreadySettled(SubscriptionStatus::Expired)
            );
        }

        // No state drift, no extra events, one expiration counted.
        assert_eq!(service.events().len(), events_before);
        assert_eq!(service.stats().await.expirations, 1);
    }

    #[tokio::test]
    async fn test_expiry_of_unknown_subscription_is_soft() {
        let (service, _) = ledger_with_pass().await;
        let err = service
            .process_expiry(&ctx("AU1scheduler", T0), SubscriptionId::new(99))
            .await
            .unwrap_err();
        assert_eq!(err, LedgerError::SubscriptionNotFound(SubscriptionId::new(99)));
        assert!(!err.is_abort());
    }

    // =============================================================================
    // CANCELLATION
    // =============================================================================

    /// Cancelling auto-renew does not retract the scheduled callback; the
    /// callback finds the flag off and lets the subscription expire.
    #[tokio::test]
    async fn test_cancel_auto_renew_lets_pending_callback_expire() {
        let (service, pass_id) = ledger_with_pass().await;
        let sub_id = service
            .buy_pass(&ctx("AU1alice", T0), pass_id, true)
            .await
            .unwrap();

        service
            .cancel_auto_renew(&ctx("AU1alice", T0 + 100), sub_id)
            .await
            .unwrap();

        // Still live for the rest of the paid period; the callback stays queued.
        assert!(service
            .has_access(&ctx("AU1x", T0 + 200), &Address::from("AU1alice"), pass_id)
            .await
            .unwrap());
        assert_eq!(service.scheduler().pending_count(), 1);

        let outcomes = deliver_due(&service, T0 + DAY).await;
        assert_eq!(outcomes, vec![ExpiryOutcome::Expired]);
        assert_eq!(
            service.get_earnings(&ctx("AU1creator", T0)).await.unwrap(),
            9_500
        );
    }

    #[tokio::test]
    async fn test_cancel_requires_the_subscriber() {
        let (service, pass_id) = ledger_with_pass().await;
        let sub_id = service
            .buy_pass(&ctx("AU1alice", T0), pass_id, true)
            .await
            .unwrap();

        let err = service
            .cancel_auto_renew(&ctx("AU1mallory", T0), sub_id)
            .await
            .unwrap_err();
        assert_eq!(err, LedgerError::Unauthorized);

        // The flag is untouched and the next delivery still renews.
        let outcomes = deliver_due(&service, T0 + DAY).await;
        assert!(matches!(outcomes[0], ExpiryOutcome::Renewed { .. }));
    }

    // =============================================================================
    // RENEWAL AGAINST AN UNAVAILABLE PASS
    // =============================================================================

    #[tokio::test]
    async fn test_renewal_stops_when_pass_is_paused() {
        let (service, pass_id) = ledger_with_pass().await;
        service
            .buy_pass(&ctx("AU1alice", T0), pass_id, true)
            .await
            .unwrap();

        service
            .toggle_pass_active(&ctx("AU1creator", T0 + 10), pass_id)
            .await
            .unwrap();

        let outcomes = deliver_due(&service, T0 + DAY).await;
        assert_eq!(outcomes, vec![ExpiryOutcome::PassUnavailable]);

        // Expired, auto-renew cleared, no new credit, nothing rescheduled.
        assert!(!service
            .has_access(&ctx("AU1x", T0 + DAY), &Address::from("AU1alice"), pass_id)
            .await
            .unwrap());
        assert_eq!(
            service.get_earnings(&ctx("AU1creator", T0)).await.unwrap(),
            9_500
        );
        assert_eq!(service.scheduler().pending_count(), 0);

        let events = service.events().events();
        assert!(events.iter().any(|e| matches!(
            e,
            LedgerEvent::SubscriptionExpired {
                reason: ExpiryReason::PassInactive,
                ..
            }
        )));
    }

    /// A subscription whose pass record is gone entirely. Unreachable
    /// through the entry points (passes are never deleted), so the broken
    /// record is planted straight through the store port.
    #[tokio::test]
    async fn test_renewal_stops_when_pass_is_missing() {
        let (service, _) = ledger_with_pass().await;

        let orphan = Subscription::open(
            SubscriptionId::new(77),
            PassId::new(404),
            Address::from("AU1alice"),
            T0,
            DAY,
            true,
        );
        let mut batch = WriteBatch::new();
        batch.set(&StoreKey::Subscription(orphan.id), orphan.to_bytes());
        service.store().apply(batch).await.unwrap();

        let outcome = service
            .process_expiry(&ctx("AU1scheduler", T0 + DAY), orphan.id)
            .await
            .unwrap();
        assert_eq!(outcome, ExpiryOutcome::PassUnavailable);

        let events = service.events().events();
        assert!(events.iter().any(|e| matches!(
            e,
            LedgerEvent::SubscriptionExpired {
                reason: ExpiryReason::PassMissing,
                ..
            }
        )));
    }

    // =============================================================================
    // EARLY DELIVERY
    // =============================================================================

    /// Only the renewal branch checks the clock: an early delivery with
    /// auto-renew on settles the subscription as expired rather than
    /// renewing ahead of schedule.
    #[tokio::test]
    async fn test_early_delivery_with_auto_renew_expires() {
        let (service, pass_id) = ledger_with_pass().await;
        let sub_id = service
            .buy_pass(&ctx("AU1alice", T0), pass_id, true)
            .await
            .unwrap();

        let outcome = service
            .process_expiry(&ctx("AU1scheduler", T0 + DAY - 1), sub_id)
            .await
            .unwrap();
        assert_eq!(outcome, ExpiryOutcome::Expired);
    }
}
