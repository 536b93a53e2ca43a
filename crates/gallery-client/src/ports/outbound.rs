//! # Outbound Ports
//!
//! Traits for the external collaborators: the remote ledger gateway and
//! the identity provider, plus a mock gateway for unit tests.

use crate::domain::{
    Address, GalleryError, Listing, Picture, QueryRequest, Session, SigningCapability,
    TransactionId, TransactionOutcome, TxRequest,
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::debug;

/// Remote ledger gateway - outbound port.
///
/// Queries are read-only; mutating requests are two-phase: `submit`
/// yields an id, `await_finalized` resolves once the transaction reaches
/// a terminal status. Once submitted, a transaction cannot be withdrawn.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Execute a read-only query and return the raw, undecoded result.
    async fn query(&self, request: QueryRequest) -> Result<Value, GalleryError>;

    /// Submit a mutating request signed by `authorization`.
    async fn submit(
        &self,
        request: TxRequest,
        authorization: SigningCapability,
        compute_limit: u64,
    ) -> Result<TransactionId, GalleryError>;

    /// Wait for a submitted transaction to reach a terminal status.
    async fn await_finalized(&self, id: TransactionId)
        -> Result<TransactionOutcome, GalleryError>;
}

/// Identity provider - outbound port.
///
/// The subscription feed is the single writer for the session: `log_in`
/// and `log_out` only trigger the external flow, and the resulting
/// session (or session loss) arrives through the feed.
pub trait IdentityProvider: Send + Sync {
    /// Subscribe to session changes.
    fn subscribe(&self) -> SessionSubscription;

    /// Start an authentication flow with the external provider.
    fn log_in(&self);

    /// Drop the current session at the external provider.
    fn log_out(&self);
}

/// A subscription handle receiving session changes.
pub struct SessionSubscription {
    receiver: broadcast::Receiver<Session>,
}

impl SessionSubscription {
    /// Wrap a broadcast receiver of session events.
    pub fn new(receiver: broadcast::Receiver<Session>) -> Self {
        Self { receiver }
    }

    /// Receive the next session change.
    ///
    /// Returns `None` once the provider is gone. A lagged receiver skips
    /// to the most recent events; only the latest session matters.
    pub async fn recv(&mut self) -> Option<Session> {
        loop {
            match self.receiver.recv().await {
                Ok(session) => return Some(session),
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "session subscriber lagged");
                    continue;
                }
            }
        }
    }
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock ledger gateway with canned responses for unit tests.
#[derive(Default)]
pub struct MockLedger {
    /// Vault balances by address.
    pub balances: HashMap<Address, f64>,
    /// Collection contents by address.
    pub collections: HashMap<Address, Vec<Picture>>,
    /// Marketplace listing set.
    pub listings: Vec<Listing>,
    /// Fail every query?
    pub fail_queries: bool,
    /// Reject every submission?
    pub fail_submissions: bool,
    /// Terminal failure reason reported by `await_finalized`, if any.
    pub finalize_failure: Option<String>,
    /// Artificial query latency per address (for in-flight interleaving).
    pub query_delays: HashMap<Address, Duration>,
    pub(crate) queries: AtomicUsize,
}

impl MockLedger {
    /// Number of queries executed so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    async fn apply_delay(&self, address: Option<&Address>) {
        if let Some(delay) = address.and_then(|a| self.query_delays.get(a)) {
            tokio::time::sleep(*delay).await;
        }
    }
}

#[async_trait]
impl LedgerGateway for MockLedger {
    async fn query(&self, request: QueryRequest) -> Result<Value, GalleryError> {
        self.queries.fetch_add(1, Ordering::SeqCst);

        let address = match &request {
            QueryRequest::FlowBalance { address } | QueryRequest::Collection { address } => {
                Some(address.clone())
            }
            QueryRequest::Listings => None,
        };
        self.apply_delay(address.as_ref()).await;

        if self.fail_queries {
            return Err(GalleryError::Query("mock query failure".to_string()));
        }

        match request {
            QueryRequest::FlowBalance { address } => {
                let balance = self
                    .balances
                    .get(&address)
                    .ok_or_else(|| GalleryError::Query(format!("no vault for {address}")))?;
                Ok(serde_json::to_value(balance)?)
            }
            QueryRequest::Collection { address } => {
                let pictures = self.collections.get(&address).ok_or_else(|| {
                    GalleryError::Query(format!("no picture receiver for {address}"))
                })?;
                Ok(serde_json::to_value(pictures)?)
            }
            QueryRequest::Listings => Ok(serde_json::to_value(&self.listings)?),
        }
    }

    async fn submit(
        &self,
        _request: TxRequest,
        _authorization: SigningCapability,
        _compute_limit: u64,
    ) -> Result<TransactionId, GalleryError> {
        if self.fail_submissions {
            return Err(GalleryError::Submission("mock rejection".to_string()));
        }
        Ok(TransactionId::new(uuid::Uuid::new_v4().to_string()))
    }

    async fn await_finalized(
        &self,
        id: TransactionId,
    ) -> Result<TransactionOutcome, GalleryError> {
        match &self.finalize_failure {
            Some(reason) => Ok(TransactionOutcome::failed(id, reason.clone())),
            None => Ok(TransactionOutcome::sealed(id)),
        }
    }
}
