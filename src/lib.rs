//! Registry of books and the editions, translations and revisions derived from them.
//!
//! This crate keeps an append-only catalog keyed by title and edition,
//! validates every registration, and answers identity and lineage queries
//! over the resulting derivation forest.

pub mod book_key;
pub mod error;
pub mod observers;
pub mod record;
pub mod registry;
pub mod snapshot;
pub mod visualization;

pub use book_key::BookKey;
pub use error::{RegistryError, Result};
pub use observers::{RegistrationLogger, RegistryObserver};
pub use record::{BookOrigin, BookRecord};
pub use registry::BookRegistry;
pub use snapshot::{RegistrySnapshot, SnapshotEntry};
pub use visualization::LineageVisualization;
