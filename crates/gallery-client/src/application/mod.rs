//! Application layer: the state store and the orchestrating service.

pub mod service;
pub mod store;

pub use service::GalleryService;
pub use store::StateStore;
