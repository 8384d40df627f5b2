//! # Purchase Flow Integration
//!
//! End-to-end flows over the in-memory adapters: listing passes, buying
//! them, splitting fees into creator earnings, withdrawing, and issuing
//! certificates. Mirrors how a host platform drives the ledger one atomic
//! call at a time.

#[cfg(test)]
mod tests {
    use autopass_ledger::prelude::*;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const T0: u64 = 1_700_000_000;

    fn ctx(caller: &str, timestamp: u64) -> CallContext {
        CallContext::new(Address::from(caller), timestamp)
    }

    fn day_pass(price: u64, max_supply: u32) -> PassDraft {
        PassDraft {
            name: "Day Pass".into(),
            description: "24h of access".into(),
            category: "membership".into(),
            pass_type: "timed".into(),
            price,
            token_ref: "MAS".into(),
            duration_seconds: 86_400,
            auto_renew_allowed: true,
            max_supply,
            metadata_ref: "bafy-daypass".into(),
        }
    }

    async fn init_ledger(
    ) -> PassLedgerService<InMemoryStore, InMemoryScheduler, RecordingEventSink> {
        let service = create_test_service();
        service
            .init(&ctx("AU1owner", T0), Address::from("AU1owner"))
            .await
            .unwrap();
        service
    }

    // =============================================================================
    // LIMITED SUPPLY
    // =============================================================================

    /// The headline scenario: a single-unit pass at 1 MAS with the default
    /// 5% fee. The first buyer gets the unit and the creator is credited
    /// 0.95 MAS; the second buyer bounces off the supply cap.
    #[tokio::test]
    async fn test_limited_supply_sells_exactly_once() {
        let service = init_ledger().await;
        let creator = ctx("AU1creator", T0);

        let pass_id = service
            .create_pass(&creator, day_pass(1_000_000_000, 1))
            .await
            .unwrap();

        let sub_id = service
            .buy_pass(&ctx("AU1alice", T0 + 10), pass_id, false)
            .await
            .unwrap();
        assert_eq!(sub_id, SubscriptionId::new(1));
        assert_eq!(service.get_earnings(&creator).await.unwrap(), 950_000_000);

        let err = service
            .buy_pass(&ctx("AU1bob", T0 + 20), pass_id, false)
            .await
            .unwrap_err();
        assert_eq!(err, LedgerError::SoldOut(pass_id));
        assert!(!err.is_abort());

        // The failed call changed nothing.
        let pass = service.get_pass(pass_id).await.unwrap().unwrap();
        assert_eq!(pass.sold, 1);
        assert_eq!(service.get_earnings(&creator).await.unwrap(), 950_000_000);
        assert!(service
            .get_user_subscriptions(&Address::from("AU1bob"))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_unlimited_supply_never_sells_out() {
        let service = init_ledger().await;
        let creator = ctx("AU1creator", T0);
        let pass_id = service
            .create_pass(&creator, day_pass(1_000, 0))
            .await
            .unwrap();

        for i in 0..10u64 {
            let buyer = ctx(&format!("AU1buyer{i}"), T0 + i);
            service.buy_pass(&buyer, pass_id, false).await.unwrap();
        }
        let pass = service.get_pass(pass_id).await.unwrap().unwrap();
        assert_eq!(pass.sold, 10);
        assert_eq!(
            service.get_pass_subscribers(pass_id).await.unwrap().len(),
            10
        );
    }

    // =============================================================================
    // FEES AND EARNINGS
    // =============================================================================

    #[tokio::test]
    async fn test_earnings_accumulate_across_sales_and_reset_on_withdraw() {
        let service = init_ledger().await;
        let creator = ctx("AU1creator", T0);
        let pass_id = service
            .create_pass(&creator, day_pass(10_000, 0))
            .await
            .unwrap();

        service
            .buy_pass(&ctx("AU1alice", T0), pass_id, false)
            .await
            .unwrap();
        service
            .buy_pass(&ctx("AU1bob", T0), pass_id, false)
            .await
            .unwrap();
        assert_eq!(service.get_earnings(&creator).await.unwrap(), 19_000);

        assert_eq!(service.withdraw_earnings(&creator).await.unwrap(), 19_000);
        assert_eq!(service.get_earnings(&creator).await.unwrap(), 0);

        // A later sale starts a fresh balance.
        service
            .buy_pass(&ctx("AU1carol", T0), pass_id, false)
            .await
            .unwrap();
        assert_eq!(service.get_earnings(&creator).await.unwrap(), 9_500);
    }

    #[tokio::test]
    async fn test_owner_fee_change_applies_to_later_sales() {
        let service = init_ledger().await;
        let owner = ctx("AU1owner", T0);
        let creator = ctx("AU1creator", T0);
        let pass_id = service
            .create_pass(&creator, day_pass(10_000, 0))
            .await
            .unwrap();

        service
            .buy_pass(&ctx("AU1alice", T0), pass_id, false)
            .await
            .unwrap();
        service.set_protocol_fee(&owner, 2_500).await.unwrap();
        service
            .buy_pass(&ctx("AU1bob", T0), pass_id, false)
            .await
            .unwrap();

        // 9_500 at 5%, then 7_500 at 25%.
        assert_eq!(service.get_earnings(&creator).await.unwrap(), 17_000);
    }

    // =============================================================================
    // AUTO-RENEW GATE
    // =============================================================================

    #[tokio::test]
    async fn test_auto_renew_request_rejected_when_disallowed() {
        let service = init_ledger().await;
        let creator = ctx("AU1creator", T0);
        let mut draft = day_pass(10_000, 0);
        draft.auto_renew_allowed = false;
        let pass_id = service.create_pass(&creator, draft).await.unwrap();

        let err = service
            .buy_pass(&ctx("AU1alice", T0), pass_id, true)
            .await
            .unwrap_err();
        assert_eq!(err, LedgerError::AutoRenewNotAllowed(pass_id));

        // No subscription, no credit, no scheduled callback.
        assert!(service
            .get_user_subscriptions(&Address::from("AU1alice"))
            .await
            .unwrap()
            .is_empty());
        assert_eq!(service.get_earnings(&creator).await.unwrap(), 0);
        assert_eq!(service.scheduler().pending_count(), 0);

        // Buying without auto-renew still works.
        service
            .buy_pass(&ctx("AU1alice", T0), pass_id, false)
            .await
            .unwrap();
    }

    // =============================================================================
    // CERTIFICATES
    // =============================================================================

    fn completion_cert(recipient: &str) -> CertificateDraft {
        CertificateDraft {
            recipient_name: recipient.into(),
            organization_name: "Rust Studio".into(),
            course_name: "Ownership & Borrowing".into(),
            issue_date: "2026-02-01".into(),
            certificate_type: "completion".into(),
            metadata_ref: "bafy-cert".into(),
        }
    }

    #[tokio::test]
    async fn test_only_the_pass_creator_issues_certificates() {
        let service = init_ledger().await;
        let creator = ctx("AU1creator", T0);
        let pass_id = service
            .create_pass(&creator, day_pass(10_000, 0))
            .await
            .unwrap();

        let err = service
            .issue_certificate(&ctx("AU1student", T0), pass_id, completion_cert("Eve"))
            .await
            .unwrap_err();
        assert_eq!(err, LedgerError::Unauthorized);

        // The rejected call did not burn an id: the first real issuance
        // still gets certificate 1.
        let cert_id = service
            .issue_certificate(&creator, pass_id, completion_cert("Grace"))
            .await
            .unwrap();
        assert_eq!(cert_id, CertificateId::new(1));

        let cert = service.get_certificate(cert_id).await.unwrap().unwrap();
        assert_eq!(cert.pass_id, pass_id);
        assert_eq!(cert.recipient_name, "Grace");
    }

    #[tokio::test]
    async fn test_certificates_for_unknown_pass_rejected() {
        let service = init_ledger().await;
        let err = service
            .issue_certificate(&ctx("AU1creator", T0), PassId::new(42), completion_cert("X"))
            .await
            .unwrap_err();
        assert_eq!(err, LedgerError::PassNotFound(PassId::new(42)));
    }

    // =============================================================================
    // EVENTS
    // =============================================================================

    #[tokio::test]
    async fn test_purchase_emits_purchase_then_schedule_events() {
        let service = init_ledger().await;
        let creator = ctx("AU1creator", T0);
        let pass_id = service
            .create_pass(&creator, day_pass(10_000, 0))
            .await
            .unwrap();
        let before = service.events().len();

        service
            .buy_pass(&ctx("AU1alice", T0), pass_id, true)
            .await
            .unwrap();

        let events = service.events().events();
        assert!(matches!(
            events[before],
            LedgerEvent::PassPurchased { auto_renew: true, .. }
        ));
        assert!(matches!(
            events[before + 1],
            LedgerEvent::ExpiryScheduled { .. }
        ));
    }

    #[tokio::test]
    async fn test_rejected_calls_emit_nothing() {
        let service = init_ledger().await;
        let before = service.events().len();
        let _ = service
            .buy_pass(&ctx("AU1alice", T0), PassId::new(9), false)
            .await
            .unwrap_err();
        assert_eq!(service.events().len(), before);
    }
}
