//! # Local Identity Adapter
//!
//! In-process identity provider backed by a broadcast channel. Sessions
//! only ever reach the client through the subscription feed, so the feed
//! stays the single writer even when `log_in`/`log_out` are called from
//! several places.

use crate::domain::{Address, Session};
use crate::ports::{IdentityProvider, SessionSubscription};
use tokio::sync::broadcast;
use tracing::debug;

/// Events buffered per subscriber before older sessions are dropped.
const SESSION_CHANNEL_CAPACITY: usize = 16;

/// Identity provider granting a fixed address on `log_in`.
pub struct LocalIdentity {
    address: Address,
    sender: broadcast::Sender<Session>,
}

impl LocalIdentity {
    /// Create a provider that authenticates as `address`.
    pub fn new(address: Address) -> Self {
        let (sender, _) = broadcast::channel(SESSION_CHANNEL_CAPACITY);
        Self { address, sender }
    }

    /// Push an arbitrary session into the feed (account switching).
    pub fn announce(&self, session: Session) {
        debug!(address = ?session.address, "announcing session");
        // A send error only means no subscriber is listening yet.
        let _ = self.sender.send(session);
    }
}

impl IdentityProvider for LocalIdentity {
    fn subscribe(&self) -> SessionSubscription {
        SessionSubscription::new(self.sender.subscribe())
    }

    fn log_in(&self) {
        self.announce(Session::authenticated(self.address.clone()));
    }

    fn log_out(&self) {
        self.announce(Session::anonymous());
    }
}
