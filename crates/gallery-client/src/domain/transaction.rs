//! # Transaction Lifecycle Values
//!
//! A submitted transaction is identified by an opaque id and reaches a
//! terminal status asynchronously. The client keeps an outcome only for
//! the lifetime of the awaiting call; nothing is persisted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier assigned by the ledger at submission.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Wrap a ledger-assigned id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The string form of the id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status of a submitted transaction.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Submitted but not yet terminal.
    Pending,
    /// Finalized successfully.
    Sealed,
    /// Reached a terminal failure status.
    Failed(String),
}

impl TransactionStatus {
    /// Whether this status is terminal (sealed or failed).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// The reported state of one transaction at a point in time.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionOutcome {
    /// The transaction this outcome describes.
    pub id: TransactionId,
    /// Reported status.
    pub status: TransactionStatus,
}

impl TransactionOutcome {
    /// A sealed outcome for the given id.
    pub fn sealed(id: TransactionId) -> Self {
        Self {
            id,
            status: TransactionStatus::Sealed,
        }
    }

    /// A failed outcome with a reason.
    pub fn failed(id: TransactionId, reason: impl Into<String>) -> Self {
        Self {
            id,
            status: TransactionStatus::Failed(reason.into()),
        }
    }
}

/// Opaque signing authority for one account, supplied by the identity
/// integration. The client forwards it to the gateway untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningCapability {
    account: super::assets::Address,
}

impl SigningCapability {
    /// Create a capability bound to one account.
    pub fn for_account(account: super::assets::Address) -> Self {
        Self { account }
    }

    /// The account this capability signs for.
    pub fn account(&self) -> &super::assets::Address {
        &self.account
    }
}
