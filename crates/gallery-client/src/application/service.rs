//! # Gallery Service
//!
//! Application service orchestrating session tracking, derived-state
//! refreshes, and the transaction lifecycle against the ledger gateway.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::application::store::StateStore;
use crate::config::GalleryConfig;
use crate::domain::{
    AccountState, Address, CollectionState, GalleryError, Listing, Picture, QueryRequest,
    Session, SigningCapability, StateAction, TransactionOutcome, TransactionStatus, TxRequest,
};
use crate::ports::{GalleryApi, IdentityProvider, LedgerGateway};

/// Gallery service - the session-scoped synchronizer.
///
/// Generic over the ledger gateway; the identity provider is injected as
/// a trait object since only its subscription feed and two pass-through
/// triggers are used.
pub struct GalleryService<L: LedgerGateway> {
    config: GalleryConfig,
    store: Arc<StateStore>,
    ledger: Arc<L>,
    identity: Arc<dyn IdentityProvider>,
}

impl<L: LedgerGateway> GalleryService<L> {
    /// Create a new service with an empty state store.
    pub fn new(config: GalleryConfig, ledger: Arc<L>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            config,
            store: Arc::new(StateStore::new()),
            ledger,
            identity,
        }
    }

    /// The underlying state store.
    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }

    /// Subscribe to state changes (latest-value feed).
    pub fn watch(&self) -> watch::Receiver<AccountState> {
        self.store.watch()
    }

    /// Internal: the session's signing capability, or fail fast.
    fn require_signer(&self) -> Result<SigningCapability, GalleryError> {
        self.store
            .state()
            .session
            .signing_capability()
            .ok_or(GalleryError::NotAuthenticated)
    }

    /// Internal: submit a mutating request and await finality.
    ///
    /// Any non-sealed terminal status surfaces as a failure. The id is
    /// never resubmitted.
    async fn execute(&self, request: TxRequest) -> Result<TransactionOutcome, GalleryError> {
        let authorization = self.require_signer()?;
        let id = self
            .ledger
            .submit(request, authorization, self.config.compute_limit)
            .await?;
        debug!(%id, "transaction submitted, awaiting finality");

        let outcome = self.ledger.await_finalized(id.clone()).await?;
        match outcome.status {
            TransactionStatus::Sealed => Ok(outcome),
            TransactionStatus::Failed(reason) => {
                warn!(%id, %reason, "transaction reached terminal failure");
                Err(GalleryError::Finalization { id, reason })
            }
            TransactionStatus::Pending => Err(GalleryError::Finalization {
                id,
                reason: "finality wait returned a non-terminal status".to_string(),
            }),
        }
    }

    /// Internal: query and decode one account's collection.
    async fn fetch_collection_of(&self, address: &Address) -> Result<Vec<Picture>, GalleryError> {
        let raw = self
            .ledger
            .query(QueryRequest::Collection {
                address: address.clone(),
            })
            .await?;
        let pictures: Vec<Picture> = serde_json::from_value(raw)?;
        Ok(pictures)
    }

    /// Internal: balance refresh for a concrete address, guarded by the
    /// session epoch captured before the first await.
    async fn refresh_balance_for(
        &self,
        address: &Address,
        epoch: u64,
    ) -> Result<(), GalleryError> {
        if *address == self.config.local_address {
            self.store
                .dispatch_if_current(epoch, StateAction::SetBalance(self.config.skipped_balance));
            return Ok(());
        }

        let raw = self
            .ledger
            .query(QueryRequest::FlowBalance {
                address: address.clone(),
            })
            .await?;
        let balance: f64 = serde_json::from_value(raw)?;
        self.store
            .dispatch_if_current(epoch, StateAction::SetBalance(balance));
        Ok(())
    }

    /// Internal: collection refresh for a concrete address; failures are
    /// absorbed into an `Unavailable` collection state.
    async fn refresh_collection_for(&self, address: &Address, epoch: u64) {
        let action = match self.fetch_collection_of(address).await {
            Ok(pictures) => StateAction::SetCollection(CollectionState::Synced(pictures)),
            Err(error) => {
                warn!(%address, %error, "collection refresh failed");
                StateAction::SetCollection(CollectionState::Unavailable)
            }
        };
        self.store.dispatch_if_current(epoch, action);
    }
}

impl<L: LedgerGateway + 'static> GalleryService<L> {
    /// Spawn the identity loop: forwards every emitted session into the
    /// store and fires both refreshes once whenever the session gains a
    /// new concrete address.
    ///
    /// The loop is the single writer for the session field; `log_in` and
    /// `log_out` never touch state directly.
    pub fn spawn_session_task(self: &Arc<Self>) -> JoinHandle<()> {
        let this = Arc::clone(self);
        let mut subscription = self.identity.subscribe();
        tokio::spawn(async move {
            while let Some(session) = subscription.recv().await {
                this.handle_session(session);
            }
            debug!("identity channel closed, session task exiting");
        })
    }

    fn handle_session(self: &Arc<Self>, session: Session) {
        let previous = self.store.state().session.address;
        let epoch = self
            .store
            .dispatch(StateAction::SetSession(session.clone()));

        let Some(address) = session.address else {
            return;
        };
        if previous.as_ref() == Some(&address) {
            return;
        }
        debug!(%address, epoch, "session became active, refreshing derived state");

        // Refreshes run detached so a slow query never blocks the next
        // identity event; the epoch guard discards stale results.
        let this = Arc::clone(self);
        let balance_address = address.clone();
        tokio::spawn(async move {
            if let Err(error) = this.refresh_balance_for(&balance_address, epoch).await {
                warn!(address = %balance_address, %error, "balance refresh failed");
            }
        });

        let this = Arc::clone(self);
        tokio::spawn(async move {
            this.refresh_collection_for(&address, epoch).await;
        });
    }
}

#[async_trait]
impl<L: LedgerGateway + 'static> GalleryApi for GalleryService<L> {
    fn state(&self) -> AccountState {
        self.store.state()
    }

    fn is_ready(&self) -> bool {
        self.store.is_ready()
    }

    fn log_in(&self) {
        self.identity.log_in();
    }

    fn log_out(&self) {
        self.identity.log_out();
    }

    async fn refresh_balance(&self) -> Result<(), GalleryError> {
        let (session, epoch) = self.store.session_snapshot();
        match session.address {
            Some(address) => self.refresh_balance_for(&address, epoch).await,
            None => {
                self.store
                    .dispatch(StateAction::SetBalance(self.config.skipped_balance));
                Ok(())
            }
        }
    }

    async fn refresh_collection(&self) -> Result<(), GalleryError> {
        let (session, epoch) = self.store.session_snapshot();
        let address = session.address.ok_or(GalleryError::NotAuthenticated)?;
        self.refresh_collection_for(&address, epoch).await;
        Ok(())
    }

    async fn lookup_collection(&self, address: Address) -> Option<Vec<Picture>> {
        match self.fetch_collection_of(&address).await {
            Ok(pictures) => Some(pictures),
            Err(error) => {
                debug!(%address, %error, "collection lookup failed");
                None
            }
        }
    }

    async fn create_collection(&self) -> Result<TransactionOutcome, GalleryError> {
        self.execute(TxRequest::CreateCollection).await
    }

    async fn destroy_collection(&self) -> Result<TransactionOutcome, GalleryError> {
        self.execute(TxRequest::DestroyCollection).await
    }

    async fn print_picture(&self, picture: Picture) -> Result<TransactionOutcome, GalleryError> {
        self.execute(TxRequest::print(&picture)).await
    }

    async fn fetch_listings(&self) -> Result<Vec<Listing>, GalleryError> {
        let raw = self.ledger.query(QueryRequest::Listings).await?;
        let listings: Vec<Listing> = serde_json::from_value(raw)?;
        Ok(listings)
    }

    async fn post_listing(
        &self,
        picture: Picture,
        price: f64,
    ) -> Result<TransactionOutcome, GalleryError> {
        self.require_signer()?;
        match self.store.state().collection {
            CollectionState::Synced(pictures) => {
                if !pictures.contains(&picture) {
                    return Err(GalleryError::AssetNotInCollection);
                }
            }
            _ => return Err(GalleryError::CollectionNotSynced),
        }
        self.execute(TxRequest::post_listing(&picture, price)).await
    }

    async fn withdraw_listing(&self, index: usize) -> Result<TransactionOutcome, GalleryError> {
        self.execute(TxRequest::WithdrawListing { index }).await
    }

    async fn buy(&self, index: usize) -> Result<TransactionOutcome, GalleryError> {
        self.execute(TxRequest::Buy { index }).await
    }
}
