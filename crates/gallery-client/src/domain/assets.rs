//! # Asset Value Objects
//!
//! Pictures and marketplace listings as they exist on the ledger.
//! These are ephemeral transfer values; the ledger owns their canonical
//! state, the client only ever holds snapshots.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ledger account address (e.g. `0xd91c618ba21469f9`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Create an address from its string form.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// The string form of the address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(address: &str) -> Self {
        Self(address.to_string())
    }
}

/// A minted picture: a pixel string plus its canvas dimensions.
///
/// Equality is value equality of the triple; the ledger enforces that a
/// picture is owned by exactly one collection at a time.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Picture {
    /// Serialized pixel data.
    pub pixels: String,
    /// Canvas width in pixels.
    pub width: i64,
    /// Canvas height in pixels.
    pub height: i64,
}

impl Picture {
    /// Create a new picture value.
    pub fn new(pixels: impl Into<String>, width: i64, height: i64) -> Self {
        Self {
            pixels: pixels.into(),
            width,
            height,
        }
    }
}

/// A marketplace entry offering one picture for sale.
///
/// Listings live in the shared market registry, outside any single
/// account's collection.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    /// The picture held in escrow by the market.
    pub picture: Picture,
    /// Account that posted the listing and receives the sale proceeds.
    pub seller: Address,
    /// Asking price in fungible tokens.
    pub price: f64,
}

impl Listing {
    /// Create a new listing value.
    pub fn new(picture: Picture, seller: Address, price: f64) -> Self {
        Self {
            picture,
            seller,
            price,
        }
    }
}
