//! # Gallery Client Test Suite
//!
//! Cross-component scenarios driving the full stack: identity feed →
//! state store → query synchronizer → transaction coordinator, against
//! the in-memory ledger and identity adapters.
//!
//! ```bash
//! cargo test -p gallery-tests
//! ```

use std::time::Duration;

use gallery_client::{AccountState, GalleryService, LedgerGateway};


/// Install a test subscriber once; repeated calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Wait (bounded) until the service's state satisfies a predicate.
pub async fn await_state<L, F>(service: &GalleryService<L>, predicate: F)
where
    L: LedgerGateway,
    F: Fn(&AccountState) -> bool,
{
    let mut rx = service.watch();
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            if predicate(&rx.borrow_and_update()) {
                return;
            }
            rx.changed().await.expect("state feed closed");
        }
    })
    .await
    .expect("timed out waiting for state");
}
