//! # Retrying Gateway Decorator
//!
//! Bounded retries for read-only queries at the gateway boundary.
//! Mutating submissions stay submit-once: a retried submission could
//! double-apply a ledger effect, a retried query cannot.

use crate::domain::{
    GalleryError, QueryRequest, SigningCapability, TransactionId, TransactionOutcome, TxRequest,
};
use crate::ports::LedgerGateway;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// Gateway decorator retrying failed queries a bounded number of times.
pub struct RetryingLedger<L: LedgerGateway> {
    inner: Arc<L>,
    retries: u32,
}

impl<L: LedgerGateway> RetryingLedger<L> {
    /// Wrap a gateway, allowing up to `retries` additional attempts per
    /// query.
    pub fn new(inner: Arc<L>, retries: u32) -> Self {
        Self { inner, retries }
    }
}

#[async_trait]
impl<L: LedgerGateway> LedgerGateway for RetryingLedger<L> {
    async fn query(&self, request: QueryRequest) -> Result<Value, GalleryError> {
        let mut attempt = 0;
        loop {
            match self.inner.query(request.clone()).await {
                Ok(value) => return Ok(value),
                Err(error) if attempt < self.retries => {
                    attempt += 1;
                    warn!(%error, attempt, "query failed, retrying");
                }
                Err(error) => return Err(error),
            }
        }
    }

    async fn submit(
        &self,
        request: TxRequest,
        authorization: SigningCapability,
        compute_limit: u64,
    ) -> Result<TransactionId, GalleryError> {
        self.inner.submit(request, authorization, compute_limit).await
    }

    async fn await_finalized(
        &self,
        id: TransactionId,
    ) -> Result<TransactionOutcome, GalleryError> {
        self.inner.await_finalized(id).await
    }
}
