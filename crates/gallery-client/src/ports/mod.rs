//! Ports: inbound API trait and outbound dependency traits.

pub mod inbound;
pub mod outbound;

pub use inbound::GalleryApi;
pub use outbound::{IdentityProvider, LedgerGateway, MockLedger, SessionSubscription};
