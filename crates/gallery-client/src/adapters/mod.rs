//! Adapters: concrete implementations of the outbound ports.

pub mod identity;
pub mod memory_ledger;
pub mod retry;

pub use identity::LocalIdentity;
pub use memory_ledger::MemoryLedger;
pub use retry::RetryingLedger;
