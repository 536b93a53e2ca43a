//! # Account Synchronization Scenarios
//!
//! Identity feed → state store → query synchronizer, including the
//! stale-result discard when sessions change while queries are in
//! flight.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use gallery_client::{
        Address, CollectionState, GalleryApi, GalleryConfig, GalleryService, IdentityProvider,
        LedgerGateway, LocalIdentity, MemoryLedger, MockLedger, Picture, RetryingLedger, Session,
        SigningCapability, TxRequest, LOCAL_ADDRESS, SKIPPED_BALANCE,
    };

    use crate::{await_state, init_tracing};

    #[tokio::test]
    async fn test_unauthenticated_session_is_not_ready() {
        init_tracing();
        let ledger = Arc::new(MemoryLedger::new());
        let identity = Arc::new(LocalIdentity::new(Address::new(LOCAL_ADDRESS)));
        let service = Arc::new(GalleryService::new(
            GalleryConfig::for_testing(),
            ledger,
            identity,
        ));
        service.spawn_session_task();

        let state = service.state();
        assert_eq!(state.session, Session::anonymous());
        assert_eq!(state.balance, None);
        assert_eq!(state.collection, CollectionState::NotFetched);
        assert!(!service.is_ready());
    }

    #[tokio::test]
    async fn test_local_artist_login_becomes_ready_with_sentinel_balance() {
        init_tracing();
        let ledger = Arc::new(MemoryLedger::new());

        // Provision a collection holding one picture for the local artist.
        let signer = SigningCapability::for_account(Address::new(LOCAL_ADDRESS));
        let picture = Picture::new("010101", 3, 2);
        for request in [TxRequest::CreateCollection, TxRequest::print(&picture)] {
            let id = ledger.submit(request, signer.clone(), 100).await.unwrap();
            ledger.await_finalized(id).await.unwrap();
        }

        let identity = Arc::new(LocalIdentity::new(Address::new(LOCAL_ADDRESS)));
        let service = Arc::new(GalleryService::new(
            GalleryConfig::for_testing(),
            Arc::clone(&ledger),
            identity,
        ));
        service.spawn_session_task();
        service.log_in();

        await_state(&service, |state| state.is_ready()).await;

        let state = service.state();
        assert_eq!(state.balance, Some(SKIPPED_BALANCE));
        assert_eq!(
            state.collection,
            CollectionState::Synced(vec![picture.clone()])
        );
        assert!(service.is_ready());
    }

    #[tokio::test]
    async fn test_collection_unavailable_when_receiver_missing() {
        init_tracing();
        // Ledger knows nothing about the local artist: the balance query
        // is skipped, the collection query fails and is absorbed.
        let ledger = Arc::new(MemoryLedger::new());
        let identity = Arc::new(LocalIdentity::new(Address::new(LOCAL_ADDRESS)));
        let service = Arc::new(GalleryService::new(
            GalleryConfig::for_testing(),
            ledger,
            identity,
        ));
        service.spawn_session_task();
        service.log_in();

        await_state(&service, |state| state.is_ready()).await;
        assert_eq!(service.state().collection, CollectionState::Unavailable);
    }

    #[tokio::test]
    async fn test_sync_through_retrying_gateway() {
        init_tracing();
        let ledger = Arc::new(MemoryLedger::new());
        let signer = SigningCapability::for_account(Address::new(LOCAL_ADDRESS));
        let id = ledger
            .submit(TxRequest::CreateCollection, signer, 100)
            .await
            .unwrap();
        ledger.await_finalized(id).await.unwrap();

        let retrying = Arc::new(RetryingLedger::new(
            ledger,
            GalleryConfig::default().query_retries,
        ));
        let identity = Arc::new(LocalIdentity::new(Address::new(LOCAL_ADDRESS)));
        let service = Arc::new(GalleryService::new(
            GalleryConfig::for_testing(),
            retrying,
            identity,
        ));
        service.spawn_session_task();
        service.log_in();

        await_state(&service, |state| state.is_ready()).await;
        assert_eq!(service.state().collection, CollectionState::Synced(vec![]));
    }

    #[tokio::test]
    async fn test_log_out_clears_session() {
        init_tracing();
        let ledger = Arc::new(MemoryLedger::new());
        let identity = Arc::new(LocalIdentity::new(Address::new(LOCAL_ADDRESS)));
        let service = Arc::new(GalleryService::new(
            GalleryConfig::for_testing(),
            ledger,
            identity,
        ));
        service.spawn_session_task();

        service.log_in();
        await_state(&service, |state| state.session.is_authenticated()).await;

        service.log_out();
        await_state(&service, |state| !state.session.is_authenticated()).await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_rapid_session_change_discards_stale_results() {
        init_tracing();
        let first = Address::new("0xfirst");
        let second = Address::new("0xsecond");

        let mut ledger = MockLedger::default();
        ledger.balances.insert(first.clone(), 10.0);
        ledger.balances.insert(second.clone(), 20.0);
        ledger
            .collections
            .insert(first.clone(), vec![Picture::new("1111", 2, 2)]);
        ledger
            .collections
            .insert(second.clone(), vec![Picture::new("0000", 2, 2)]);
        // The first session's queries resolve long after the second
        // session has taken over.
        ledger
            .query_delays
            .insert(first.clone(), Duration::from_millis(150));

        let identity = Arc::new(LocalIdentity::new(first.clone()));
        let service = Arc::new(GalleryService::new(
            GalleryConfig::for_testing(),
            Arc::new(ledger),
            Arc::clone(&identity) as Arc<dyn IdentityProvider>,
        ));
        service.spawn_session_task();

        identity.announce(Session::authenticated(first));
        tokio::time::sleep(Duration::from_millis(20)).await;
        identity.announce(Session::authenticated(second.clone()));

        await_state(&service, |state| state.is_ready()).await;

        // Let the delayed queries for the replaced session resolve; they
        // must be discarded, not applied.
        tokio::time::sleep(Duration::from_millis(250)).await;

        let state = service.state();
        assert_eq!(state.session.address, Some(second));
        assert_eq!(state.balance, Some(20.0));
        assert_eq!(
            state.collection,
            CollectionState::Synced(vec![Picture::new("0000", 2, 2)])
        );
    }
}
