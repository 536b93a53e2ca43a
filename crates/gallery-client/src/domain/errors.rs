//! # Domain Errors
//!
//! Failure taxonomy for the gallery client. Every failure is local to
//! the invoking call; one failed operation never takes the synchronizer
//! down with it.

use super::transaction::TransactionId;
use thiserror::Error;

/// Gallery client error types.
#[derive(Debug, Error)]
pub enum GalleryError {
    /// An operation requiring an authenticated session was invoked
    /// without one. Fails before any remote call.
    #[error("no authenticated session")]
    NotAuthenticated,

    /// The current session's collection has not been synchronized, so a
    /// collection-dependent precondition cannot be checked.
    #[error("collection is not synchronized for the current session")]
    CollectionNotSynced,

    /// The referenced picture is not present in the session's collection.
    #[error("picture is not present in the current collection")]
    AssetNotInCollection,

    /// A read-only gateway call failed (network, missing capability).
    #[error("query failed: {0}")]
    Query(String),

    /// A raw ledger result could not be decoded into its local shape.
    #[error("failed to decode ledger result: {0}")]
    Decode(#[from] serde_json::Error),

    /// Submission was rejected before a transaction id was obtained.
    /// No partial state is recorded.
    #[error("transaction submission rejected: {0}")]
    Submission(String),

    /// A submitted transaction reached a non-sealed terminal status, or
    /// the finality wait itself failed. The id is never resubmitted.
    #[error("transaction {id} failed: {reason}")]
    Finalization {
        /// Id of the failed transaction.
        id: TransactionId,
        /// Terminal failure reason reported by the ledger.
        reason: String,
    },
}

impl GalleryError {
    /// Whether this error was raised before any remote call was made.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NotAuthenticated | Self::CollectionNotSynced | Self::AssetNotInCollection
        )
    }
}
