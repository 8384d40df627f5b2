//! # Atomicity Integration
//!
//! All-or-nothing behavior under store failure: when the commit fails the
//! whole call aborts with zero state change, and the callback that was
//! scheduled ahead of the failed commit dies harmlessly against the
//! re-validating expiry entry point.

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use autopass_ledger::prelude::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    const T0: u64 = 1_700_000_000;

    fn ctx(caller: &str, timestamp: u64) -> CallContext {
        CallContext::new(Address::from(caller), timestamp)
    }

    /// Store whose next `apply` can be armed to fail, leaving reads intact.
    #[derive(Default)]
    struct FlakyStore {
        inner: InMemoryStore,
        fail_next_apply: AtomicBool,
    }

    impl FlakyStore {
        fn arm_failure(&self) {
            self.fail_next_apply.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl KeyValueStore for FlakyStore {
        async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
            self.inner.get(key).await
        }

        async fn apply(&self, batch: WriteBatch) -> Result<(), StoreError> {
            if self.fail_next_apply.swap(false, Ordering::SeqCst) {
                return Err(StoreError::BatchRejected("injected failure".into()));
            }
            self.inner.apply(batch).await
        }
    }

    fn flaky_ledger() -> (
        PassLedgerService<FlakyStore, InMemoryScheduler, RecordingEventSink>,
        Arc<FlakyStore>,
    ) {
        let store = Arc::new(FlakyStore::default());
        let service = PassLedgerService::new(
            Arc::clone(&store),
            Arc::new(InMemoryScheduler::new()),
            Arc::new(RecordingEventSink::new()),
            ServiceConfig::default(),
        );
        (service, store)
    }

    #[tokio::test]
    async fn test_failed_commit_aborts_with_zero_state_change() {
        let (service, store) = flaky_ledger();
        let creator = ctx("AU1creator", T0);
        let pass_id = service
            .create_pass(
                &creator,
                PassDraft {
                    name: "Flaky".into(),
                    description: String::new(),
                    category: "membership".into(),
                    pass_type: "timed".into(),
                    price: 10_000,
                    token_ref: "MAS".into(),
                    duration_seconds: 3_600,
                    auto_renew_allowed: true,
                    max_supply: 0,
                    metadata_ref: String::new(),
                },
            )
            .await
            .unwrap();

        store.arm_failure();
        let err = service
            .buy_pass(&ctx("AU1alice", T0), pass_id, true)
            .await
            .unwrap_err();
        assert!(err.is_abort());

        // Every write of the call vanished with the batch: no subscription,
        // no sold increment, no earnings, no counter bump.
        assert!(service
            .get_user_subscriptions(&Address::from("AU1alice"))
            .await
            .unwrap()
            .is_empty());
        assert_eq!(service.get_pass(pass_id).await.unwrap().unwrap().sold, 0);
        assert_eq!(service.get_earnings(&creator).await.unwrap(), 0);
        assert!(!service.events().events().iter().any(|e| matches!(
            e,
            LedgerEvent::PassPurchased { .. } | LedgerEvent::ExpiryScheduled { .. }
        )));

        // The callback submitted ahead of the failed commit is still queued.
        // Delivering it meets no subscription and dies as a soft no-op —
        // exactly what the at-least-once contract requires us to tolerate.
        let pending = service.scheduler().take_due(T0 + 3_600);
        assert_eq!(pending.len(), 1);
        let orphan_id = pending[0].call.subscription_id().unwrap();
        let err = service
            .process_expiry(&ctx("AU1scheduler", T0 + 3_600), orphan_id)
            .await
            .unwrap_err();
        assert_eq!(err, LedgerError::SubscriptionNotFound(orphan_id));

        // The ledger works again once the store recovers: the orphaned
        // counter bump never landed, so the next purchase takes id 1.
        let sub_id = service
            .buy_pass(&ctx("AU1alice", T0 + 4_000), pass_id, false)
            .await
            .unwrap();
        assert_eq!(sub_id, SubscriptionId::new(1));
    }
}
