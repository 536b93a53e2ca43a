//! # Ledger Requests
//!
//! Structured request values sent through the gateway. The client never
//! manipulates request text; it only populates typed parameters and leaves
//! encoding to the gateway's own protocol.

use super::assets::{Address, Picture};
use serde::{Deserialize, Serialize};

/// Number of fraction digits carried by fixed-point token amounts.
pub const UFIX_DECIMALS: u32 = 4;

/// Format a token amount into its fixed-precision wire form.
///
/// Amounts cross the gateway boundary as `UFix64`-style strings, so a
/// listing price of `12.5` becomes `"12.5000"`.
pub fn format_ufix(amount: f64) -> String {
    format!("{amount:.prec$}", prec = UFIX_DECIMALS as usize)
}

/// A read-only request with no persisted side effect on the ledger.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryRequest {
    /// Fungible token balance of one account's vault.
    FlowBalance {
        /// Account to read.
        address: Address,
    },
    /// The pictures held by one account's collection.
    Collection {
        /// Account to read.
        address: Address,
    },
    /// The full current marketplace listing set.
    Listings,
}

/// A state-mutating request, submitted and then awaited to finality.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TxRequest {
    /// Provision an empty picture collection under the signer's account
    /// and publish its receiving capability.
    CreateCollection,
    /// Revoke the receiving capability and destroy the signer's
    /// collection together with its contents.
    DestroyCollection,
    /// Mint a new picture server-side and deposit it into the signer's
    /// collection. A mint that yields no picture is a no-op deposit.
    PrintPicture {
        /// Canvas width.
        width: i64,
        /// Canvas height.
        height: i64,
        /// Serialized pixel data.
        pixels: String,
    },
    /// Withdraw a picture from the signer's collection and list it for
    /// sale at a fixed-precision price.
    PostListing {
        /// Pixels identifying the picture to withdraw.
        pixels: String,
        /// Asking price, already in `UFix64` wire form.
        price: String,
    },
    /// Remove one of the signer's own listings and return its picture.
    WithdrawListing {
        /// Index into the marketplace listing set.
        index: usize,
    },
    /// Debit the signer's vault by the listing price and transfer the
    /// listed picture into the signer's collection.
    Buy {
        /// Index into the marketplace listing set.
        index: usize,
    },
}

impl TxRequest {
    /// Build a mint request from a picture value.
    pub fn print(picture: &Picture) -> Self {
        Self::PrintPicture {
            width: picture.width,
            height: picture.height,
            pixels: picture.pixels.clone(),
        }
    }

    /// Build a listing request for a picture at the given price.
    pub fn post_listing(picture: &Picture, price: f64) -> Self {
        Self::PostListing {
            pixels: picture.pixels.clone(),
            price: format_ufix(price),
        }
    }
}
