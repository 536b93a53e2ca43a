//! Domain layer: core types, state machine, and errors.

pub mod assets;
pub mod errors;
pub mod requests;
pub mod state;
pub mod transaction;

pub use assets::{Address, Listing, Picture};
pub use errors::GalleryError;
pub use requests::{format_ufix, QueryRequest, TxRequest, UFIX_DECIMALS};
pub use state::{
    AccountState, CollectionState, Session, StateAction, LOCAL_ADDRESS, SKIPPED_BALANCE,
};
pub use transaction::{SigningCapability, TransactionId, TransactionOutcome, TransactionStatus};
