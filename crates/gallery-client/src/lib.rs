//! # Gallery Client
//!
//! Session-scoped state synchronizer for an artist-marketplace ledger.
//!
//! The client tracks the authenticated identity, derives the account's
//! fungible balance and picture collection from read-only queries, and
//! submits mutating requests that resolve only once the ledger reports a
//! sealed status.
//!
//! ## Module Structure
//!
//! ```text
//! gallery-client/
//! ├── domain/       # Core types: state machine, requests, assets, errors
//! ├── ports/        # API trait (inbound) + dependency traits (outbound)
//! ├── application/  # StateStore and the orchestrating GalleryService
//! ├── adapters/     # In-memory ledger, local identity, retry decorator
//! └── config.rs     # GalleryConfig
//! ```
//!
//! ## Consistency model
//!
//! All derived state is written through the [`StateStore`] as whole-field
//! replacements. Every asynchronous refresh captures a session epoch
//! before its first suspension point and discards its result if the
//! session changed while the call was in flight, so a stale query can
//! never overwrite state belonging to a newer session.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{LocalIdentity, MemoryLedger, RetryingLedger};
pub use application::{GalleryService, StateStore};
pub use config::{GalleryConfig, DEFAULT_COMPUTE_LIMIT};
pub use domain::{
    format_ufix, AccountState, Address, CollectionState, GalleryError, Listing, Picture,
    QueryRequest, Session, SigningCapability, StateAction, TransactionId, TransactionOutcome,
    TransactionStatus, TxRequest, LOCAL_ADDRESS, SKIPPED_BALANCE,
};
pub use ports::{GalleryApi, IdentityProvider, LedgerGateway, MockLedger, SessionSubscription};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
