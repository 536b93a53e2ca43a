//! # In-Memory Ledger Adapter
//!
//! A working ledger gateway holding vaults, collections, and the
//! marketplace in memory, applying each mutating request with the
//! contract semantics of the remote ledger. Transactions are atomic:
//! every precondition is checked before any field is touched, so a
//! failed transaction leaves no partial state.

use crate::domain::{
    Address, GalleryError, Listing, Picture, QueryRequest, SigningCapability, TransactionId,
    TransactionOutcome, TransactionStatus, TxRequest,
};
use crate::ports::LedgerGateway;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

#[derive(Default)]
struct LedgerInner {
    /// Fungible vault balances. Absent address means no vault.
    vaults: HashMap<Address, f64>,
    /// Picture collections. Absent address means no receiver published.
    collections: HashMap<Address, Vec<Picture>>,
    /// Shared marketplace listing set, addressed by index.
    listings: Vec<Listing>,
    /// Terminal statuses of submitted transactions.
    statuses: HashMap<TransactionId, TransactionStatus>,
}

/// In-memory ledger gateway.
#[derive(Default)]
pub struct MemoryLedger {
    inner: Mutex<LedgerInner>,
}

impl MemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or top up a vault.
    pub async fn credit(&self, address: Address, amount: f64) {
        let mut inner = self.inner.lock().await;
        *inner.vaults.entry(address).or_insert(0.0) += amount;
    }

    /// Current vault balance, if the account has one.
    pub async fn balance_of(&self, address: &Address) -> Option<f64> {
        self.inner.lock().await.vaults.get(address).copied()
    }

    /// Number of live marketplace listings.
    pub async fn listing_count(&self) -> usize {
        self.inner.lock().await.listings.len()
    }

    fn apply(inner: &mut LedgerInner, request: TxRequest, signer: &Address) -> TransactionStatus {
        match request {
            TxRequest::CreateCollection => {
                if inner.collections.contains_key(signer) {
                    return TransactionStatus::Failed(
                        "collection already exists under account".to_string(),
                    );
                }
                inner.collections.insert(signer.clone(), Vec::new());
                TransactionStatus::Sealed
            }
            TxRequest::DestroyCollection => {
                if inner.collections.remove(signer).is_none() {
                    return TransactionStatus::Failed("no collection under account".to_string());
                }
                TransactionStatus::Sealed
            }
            TxRequest::PrintPicture {
                width,
                height,
                pixels,
            } => {
                let Some(collection) = inner.collections.get_mut(signer) else {
                    return TransactionStatus::Failed(
                        "no picture receiver published".to_string(),
                    );
                };
                // The printer refuses duplicate canvases; the deposit is
                // then a no-op rather than a failure.
                if !collection.iter().any(|p| p.pixels == pixels) {
                    collection.push(Picture::new(pixels, width, height));
                }
                TransactionStatus::Sealed
            }
            TxRequest::PostListing { pixels, price } => {
                let Ok(price) = price.parse::<f64>() else {
                    return TransactionStatus::Failed("malformed listing price".to_string());
                };
                let Some(collection) = inner.collections.get_mut(signer) else {
                    return TransactionStatus::Failed("no collection under account".to_string());
                };
                let Some(position) = collection.iter().position(|p| p.pixels == pixels) else {
                    return TransactionStatus::Failed(
                        "picture not found in collection".to_string(),
                    );
                };
                let picture = collection.remove(position);
                inner
                    .listings
                    .push(Listing::new(picture, signer.clone(), price));
                TransactionStatus::Sealed
            }
            TxRequest::WithdrawListing { index } => {
                if index >= inner.listings.len() {
                    return TransactionStatus::Failed("listing index out of bounds".to_string());
                }
                if inner.listings[index].seller != *signer {
                    return TransactionStatus::Failed(
                        "only the seller may withdraw a listing".to_string(),
                    );
                }
                if !inner.collections.contains_key(signer) {
                    return TransactionStatus::Failed(
                        "no picture receiver published".to_string(),
                    );
                }
                let listing = inner.listings.remove(index);
                if let Some(collection) = inner.collections.get_mut(signer) {
                    collection.push(listing.picture);
                }
                TransactionStatus::Sealed
            }
            TxRequest::Buy { index } => {
                if index >= inner.listings.len() {
                    return TransactionStatus::Failed("listing index out of bounds".to_string());
                }
                let price = inner.listings[index].price;
                if !inner.collections.contains_key(signer) {
                    return TransactionStatus::Failed(
                        "no picture receiver published".to_string(),
                    );
                }
                match inner.vaults.get(signer) {
                    Some(balance) if *balance >= price => {}
                    Some(_) => {
                        return TransactionStatus::Failed("insufficient funds".to_string());
                    }
                    None => {
                        return TransactionStatus::Failed("no vault under account".to_string());
                    }
                }

                // Debit the buyer, credit the seller, then transfer.
                let listing = inner.listings.remove(index);
                if let Some(balance) = inner.vaults.get_mut(signer) {
                    *balance -= price;
                }
                *inner.vaults.entry(listing.seller.clone()).or_insert(0.0) += price;
                if let Some(collection) = inner.collections.get_mut(signer) {
                    collection.push(listing.picture);
                }
                TransactionStatus::Sealed
            }
        }
    }
}

#[async_trait]
impl LedgerGateway for MemoryLedger {
    async fn query(&self, request: QueryRequest) -> Result<Value, GalleryError> {
        let inner = self.inner.lock().await;
        match request {
            QueryRequest::FlowBalance { address } => {
                let balance = inner.vaults.get(&address).ok_or_else(|| {
                    GalleryError::Query(format!("could not borrow a balance reference for {address}"))
                })?;
                Ok(serde_json::to_value(balance)?)
            }
            QueryRequest::Collection { address } => {
                let pictures = inner.collections.get(&address).ok_or_else(|| {
                    GalleryError::Query(format!(
                        "could not borrow a picture receiver for {address}"
                    ))
                })?;
                Ok(serde_json::to_value(pictures)?)
            }
            QueryRequest::Listings => Ok(serde_json::to_value(&inner.listings)?),
        }
    }

    async fn submit(
        &self,
        request: TxRequest,
        authorization: SigningCapability,
        _compute_limit: u64,
    ) -> Result<TransactionId, GalleryError> {
        let mut inner = self.inner.lock().await;
        let id = TransactionId::new(Uuid::new_v4().to_string());
        let status = Self::apply(&mut inner, request, authorization.account());
        debug!(%id, ?status, "transaction applied");
        inner.statuses.insert(id.clone(), status);
        Ok(id)
    }

    async fn await_finalized(
        &self,
        id: TransactionId,
    ) -> Result<TransactionOutcome, GalleryError> {
        let inner = self.inner.lock().await;
        let status = inner.statuses.get(&id).cloned().ok_or_else(|| {
            GalleryError::Finalization {
                id: id.clone(),
                reason: "unknown transaction id".to_string(),
            }
        })?;
        Ok(TransactionOutcome { id, status })
    }
}
