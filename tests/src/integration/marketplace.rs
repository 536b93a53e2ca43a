//! # Marketplace Scenarios
//!
//! Transaction coordinator against the in-memory ledger: the full
//! mint → list → buy flow plus the failure paths that must not touch
//! local state.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use gallery_client::{
        Address, CollectionState, GalleryApi, GalleryConfig, GalleryError, GalleryService,
        LocalIdentity, MemoryLedger, Picture,
    };

    use crate::{await_state, init_tracing};

    async fn client_for(
        ledger: &Arc<MemoryLedger>,
        address: &str,
    ) -> Arc<GalleryService<MemoryLedger>> {
        let identity = Arc::new(LocalIdentity::new(Address::new(address)));
        let service = Arc::new(GalleryService::new(
            GalleryConfig::for_testing(),
            Arc::clone(ledger),
            identity,
        ));
        service.spawn_session_task();
        service.log_in();
        await_state(&service, |state| state.session.is_authenticated()).await;
        service
    }

    #[tokio::test]
    async fn test_mint_list_buy_flow() {
        init_tracing();
        let ledger = Arc::new(MemoryLedger::new());
        let artist = client_for(&ledger, "0xartist").await;
        let buyer = client_for(&ledger, "0xbuyer").await;
        ledger.credit(Address::new("0xbuyer"), 20.0).await;

        // Artist mints and lists.
        let picture = Picture::new("00110011", 4, 2);
        artist.create_collection().await.unwrap();
        artist.print_picture(picture.clone()).await.unwrap();
        artist.refresh_collection().await.unwrap();
        artist.post_listing(picture.clone(), 12.5).await.unwrap();

        let listings = buyer.fetch_listings().await.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].seller, Address::new("0xartist"));
        assert_eq!(listings[0].price, 12.5);

        // Buyer takes the listing.
        buyer.create_collection().await.unwrap();
        buyer.buy(0).await.unwrap();

        // Derived state is refreshed by the caller, not implicitly.
        buyer.refresh_balance().await.unwrap();
        buyer.refresh_collection().await.unwrap();
        let state = buyer.state();
        assert_eq!(state.balance, Some(7.5));
        assert_eq!(state.collection, CollectionState::Synced(vec![picture]));

        assert_eq!(ledger.listing_count().await, 0);
        assert_eq!(
            ledger.balance_of(&Address::new("0xartist")).await,
            Some(12.5)
        );
    }

    #[tokio::test]
    async fn test_post_listing_foreign_picture_fails_before_submission() {
        init_tracing();
        let ledger = Arc::new(MemoryLedger::new());
        let artist = client_for(&ledger, "0xartist").await;

        artist.create_collection().await.unwrap();
        artist.refresh_collection().await.unwrap();

        let result = artist.post_listing(Picture::new("1010", 2, 2), 12.5).await;
        match result {
            Err(error) => assert!(error.is_precondition()),
            Ok(_) => panic!("listing a foreign picture must fail"),
        }
        assert_eq!(ledger.listing_count().await, 0);
    }

    #[tokio::test]
    async fn test_buy_missing_listing_fails_at_finalization() {
        init_tracing();
        let ledger = Arc::new(MemoryLedger::new());
        let buyer = client_for(&ledger, "0xbuyer").await;
        buyer.create_collection().await.unwrap();
        buyer.refresh_collection().await.unwrap();
        ledger.credit(Address::new("0xbuyer"), 20.0).await;
        buyer.refresh_balance().await.unwrap();
        let before = buyer.state();

        let result = buyer.buy(2).await;
        assert!(matches!(result, Err(GalleryError::Finalization { .. })));

        // No implicit refresh: local balance and collection untouched.
        assert_eq!(buyer.state(), before);
        assert_eq!(ledger.balance_of(&Address::new("0xbuyer")).await, Some(20.0));
    }

    #[tokio::test]
    async fn test_withdraw_listing_returns_picture() {
        init_tracing();
        let ledger = Arc::new(MemoryLedger::new());
        let artist = client_for(&ledger, "0xartist").await;

        let picture = Picture::new("0110", 2, 2);
        artist.create_collection().await.unwrap();
        artist.print_picture(picture.clone()).await.unwrap();
        artist.refresh_collection().await.unwrap();
        artist.post_listing(picture.clone(), 5.0).await.unwrap();
        assert_eq!(ledger.listing_count().await, 1);

        artist.withdraw_listing(0).await.unwrap();
        assert_eq!(ledger.listing_count().await, 0);

        artist.refresh_collection().await.unwrap();
        assert_eq!(
            artist.state().collection,
            CollectionState::Synced(vec![picture])
        );
    }

    #[tokio::test]
    async fn test_lookup_collection_of_other_account() {
        init_tracing();
        let ledger = Arc::new(MemoryLedger::new());
        let artist = client_for(&ledger, "0xartist").await;
        let visitor = client_for(&ledger, "0xvisitor").await;

        let picture = Picture::new("1", 1, 1);
        artist.create_collection().await.unwrap();
        artist.print_picture(picture.clone()).await.unwrap();

        let before = visitor.state();
        let found = visitor.lookup_collection(Address::new("0xartist")).await;
        assert_eq!(found, Some(vec![picture]));
        assert_eq!(visitor.state(), before);
    }
}
