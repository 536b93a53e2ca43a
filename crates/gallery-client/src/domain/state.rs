//! # Account State
//!
//! The reducer-style state derived from the current session: session,
//! fungible balance, and picture collection. Actions replace exactly one
//! field by whole-value replacement; there are no partial merges, so a
//! reader can never observe a torn field.

use super::assets::{Address, Picture};
use super::transaction::SigningCapability;
use serde::{Deserialize, Serialize};

/// Reserved address of the local/offline identity. Sessions with this
/// address have no on-ledger vault and skip the balance query.
pub const LOCAL_ADDRESS: &str = "0xLocalArtist";

/// Sentinel balance meaning "fetch intentionally skipped".
pub const SKIPPED_BALANCE: f64 = -42.0;

/// The locally observed authenticated identity.
///
/// Replaced wholesale on every identity event; never mutated in place.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// Account address, or `None` when unauthenticated.
    pub address: Option<Address>,
}

impl Session {
    /// An unauthenticated session.
    pub fn anonymous() -> Self {
        Self { address: None }
    }

    /// A session authenticated for the given address.
    pub fn authenticated(address: Address) -> Self {
        Self {
            address: Some(address),
        }
    }

    /// Whether this session carries a concrete address.
    pub fn is_authenticated(&self) -> bool {
        self.address.is_some()
    }

    /// Whether this session is the reserved local/offline identity.
    pub fn is_local(&self) -> bool {
        self.address
            .as_ref()
            .map(|a| a.as_str() == LOCAL_ADDRESS)
            .unwrap_or(false)
    }

    /// Signing capability for this session, if authenticated.
    pub fn signing_capability(&self) -> Option<SigningCapability> {
        self.address
            .as_ref()
            .map(|a| SigningCapability::for_account(a.clone()))
    }
}

/// Synchronization state of the session's picture collection.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub enum CollectionState {
    /// No fetch has completed for the current session yet.
    #[default]
    NotFetched,
    /// A fetch was attempted and failed.
    Unavailable,
    /// Fetched successfully (possibly empty).
    Synced(Vec<Picture>),
}

impl CollectionState {
    /// The synced pictures, if the collection is synced.
    pub fn pictures(&self) -> Option<&[Picture]> {
        match self {
            Self::Synced(pictures) => Some(pictures),
            _ => None,
        }
    }
}

/// The full derived account state.
///
/// `balance` and `collection` are only meaningful for `session`; every
/// session change must eventually overwrite both.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct AccountState {
    /// Current session.
    pub session: Session,
    /// Vault balance; `None` until fetched, [`SKIPPED_BALANCE`] when the
    /// fetch was intentionally skipped.
    pub balance: Option<f64>,
    /// Collection synchronization state.
    pub collection: CollectionState,
}

impl AccountState {
    /// Readiness gate: dependent UI may render once the balance has been
    /// resolved and a collection fetch has completed (even unsuccessfully).
    pub fn is_ready(&self) -> bool {
        self.balance.is_some() && !matches!(self.collection, CollectionState::NotFetched)
    }
}

/// One whole-field state transition.
#[derive(Clone, Debug, PartialEq)]
pub enum StateAction {
    /// Replace the session.
    SetSession(Session),
    /// Replace the balance.
    SetBalance(f64),
    /// Replace the collection state.
    SetCollection(CollectionState),
}

impl AccountState {
    /// Apply one action, replacing exactly the named field.
    pub fn apply(&mut self, action: StateAction) {
        match action {
            StateAction::SetSession(session) => self.session = session,
            StateAction::SetBalance(balance) => self.balance = Some(balance),
            StateAction::SetCollection(collection) => self.collection = collection,
        }
    }
}
