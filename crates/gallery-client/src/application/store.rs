//! # Account State Store
//!
//! The single shared mutable resource. All writes go through
//! [`StateStore::dispatch`], which applies whole-field replacement and
//! notifies subscribers synchronously. The store also tracks a session
//! epoch so that in-flight refreshes can detect that the session they
//! captured is no longer current.

use crate::domain::{AccountState, Session, StateAction};
use std::sync::Mutex;
use tokio::sync::watch;
use tracing::debug;

struct Inner {
    state: AccountState,
    /// Bumped on every `SetSession`; in-flight refreshes compare this
    /// against the epoch they captured before dispatching results.
    epoch: u64,
}

/// Dependency-injected state container with a typed action set.
pub struct StateStore {
    inner: Mutex<Inner>,
    notifier: watch::Sender<AccountState>,
}

impl StateStore {
    /// Create a store holding the empty initial state.
    pub fn new() -> Self {
        let state = AccountState::default();
        let (notifier, _) = watch::channel(state.clone());
        Self {
            inner: Mutex::new(Inner { state, epoch: 0 }),
            notifier,
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AccountState {
        self.lock().state.clone()
    }

    /// Current session epoch.
    pub fn epoch(&self) -> u64 {
        self.lock().epoch
    }

    /// Derived readiness signal over the current state.
    pub fn is_ready(&self) -> bool {
        self.lock().state.is_ready()
    }

    /// The current session together with its epoch, read atomically.
    /// Refreshes capture this pair before their first suspension point.
    pub fn session_snapshot(&self) -> (Session, u64) {
        let inner = self.lock();
        (inner.state.session.clone(), inner.epoch)
    }

    /// Apply an action and notify subscribers.
    ///
    /// Returns the epoch current after the action was applied.
    pub fn dispatch(&self, action: StateAction) -> u64 {
        let mut inner = self.lock();
        let (epoch, snapshot) = Self::apply_locked(&mut inner, action);
        drop(inner);

        // send_replace notifies even without active receivers.
        self.notifier.send_replace(snapshot);
        epoch
    }

    /// Apply an action only if `epoch` is still the current session
    /// epoch. A stale epoch discards the action: the result it carries
    /// belongs to a session that has since been replaced.
    pub fn dispatch_if_current(&self, epoch: u64, action: StateAction) -> bool {
        let mut inner = self.lock();
        if inner.epoch != epoch {
            debug!(
                stale = epoch,
                current = inner.epoch,
                "discarding result from a replaced session"
            );
            return false;
        }
        let (_, snapshot) = Self::apply_locked(&mut inner, action);
        drop(inner);

        self.notifier.send_replace(snapshot);
        true
    }

    fn apply_locked(inner: &mut Inner, action: StateAction) -> (u64, AccountState) {
        if matches!(action, StateAction::SetSession(_)) {
            inner.epoch += 1;
        }
        inner.state.apply(action);
        (inner.epoch, inner.state.clone())
    }

    /// Subscribe to state changes. The receiver always observes the
    /// latest state; intermediate states may be skipped.
    pub fn watch(&self) -> watch::Receiver<AccountState> {
        self.notifier.subscribe()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
