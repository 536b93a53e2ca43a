//! # Gallery Client Configuration

use crate::domain::{Address, LOCAL_ADDRESS, SKIPPED_BALANCE};
use serde::{Deserialize, Serialize};

/// Compute limit attached to every submitted transaction. Fixed and
/// generous; the ledger meters actual usage.
pub const DEFAULT_COMPUTE_LIMIT: u64 = 9999;

/// Gallery client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Reserved local/offline address whose balance query is skipped.
    pub local_address: Address,

    /// Sentinel stored in place of a skipped balance fetch.
    pub skipped_balance: f64,

    /// Compute limit for submitted transactions.
    pub compute_limit: u64,

    /// Additional attempts for read-only queries at the gateway
    /// boundary. Mutating submissions are never retried.
    pub query_retries: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            local_address: Address::new(LOCAL_ADDRESS),
            skipped_balance: SKIPPED_BALANCE,
            compute_limit: DEFAULT_COMPUTE_LIMIT,
            query_retries: 2,
        }
    }
}

impl GalleryConfig {
    /// Create a config for testing (no retries, small limit).
    pub fn for_testing() -> Self {
        Self {
            local_address: Address::new(LOCAL_ADDRESS),
            skipped_balance: SKIPPED_BALANCE,
            compute_limit: 100,
            query_retries: 0,
        }
    }
}
