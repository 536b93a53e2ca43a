//! # Inbound Port
//!
//! The surface exposed to the UI: state access, session triggers, the
//! query synchronizer, and the transaction coordinator.

use crate::domain::{
    AccountState, Address, GalleryError, Listing, Picture, TransactionOutcome,
};
use async_trait::async_trait;

/// Gallery client API - inbound port.
#[async_trait]
pub trait GalleryApi: Send + Sync {
    /// Snapshot of the current account state.
    fn state(&self) -> AccountState;

    /// Derived readiness signal gating dependent UI.
    fn is_ready(&self) -> bool;

    /// Ask the identity provider to start an authentication flow. State
    /// only changes via the provider's subscription feed.
    fn log_in(&self);

    /// Ask the identity provider to drop the current session.
    fn log_out(&self);

    /// Refresh the session's vault balance. Skipped (sentinel stored)
    /// for the reserved local identity; query failures propagate.
    async fn refresh_balance(&self) -> Result<(), GalleryError>;

    /// Refresh the session's collection. Query failures are absorbed
    /// into an `Unavailable` collection state, not returned.
    async fn refresh_collection(&self) -> Result<(), GalleryError>;

    /// Read-only probe of an arbitrary account's collection. Never
    /// touches local state; `None` on any failure.
    async fn lookup_collection(&self, address: Address) -> Option<Vec<Picture>>;

    /// Provision an empty collection under the session's account and
    /// publish its receiving capability.
    async fn create_collection(&self) -> Result<TransactionOutcome, GalleryError>;

    /// Revoke the receiving capability and destroy the collection with
    /// its contents.
    async fn destroy_collection(&self) -> Result<TransactionOutcome, GalleryError>;

    /// Mint a picture server-side and deposit it into the session's
    /// collection.
    async fn print_picture(&self, picture: Picture) -> Result<TransactionOutcome, GalleryError>;

    /// The full current marketplace listing set (read-only path).
    async fn fetch_listings(&self) -> Result<Vec<Listing>, GalleryError>;

    /// Withdraw a picture from the session's collection and list it at
    /// the given price.
    async fn post_listing(
        &self,
        picture: Picture,
        price: f64,
    ) -> Result<TransactionOutcome, GalleryError>;

    /// Remove one of the session's own listings, returning its picture.
    async fn withdraw_listing(&self, index: usize) -> Result<TransactionOutcome, GalleryError>;

    /// Buy a listing: debit the session's vault by the listing price and
    /// transfer the picture into the session's collection.
    async fn buy(&self, index: usize) -> Result<TransactionOutcome, GalleryError>;
}
