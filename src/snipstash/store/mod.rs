//! # Storage Layer
//!
//! The [`DataStore`] trait abstracts the durable key/value store the
//! collection is synchronized with. The whole collection is serialized and
//! written after every reducer transition; reads happen once, at session
//! start.
//!
//! ## Contract
//!
//! - `load` returns `Ok(None)` when nothing has ever been saved; the
//!   caller falls back to the built-in seed set.
//! - `load` returns `Err` when stored data exists but cannot be parsed;
//!   the caller falls back to the seed set and surfaces a warning.
//! - `save` failures are non-fatal: the in-memory collection is never
//!   reverted, the failure is reported as a warning and not retried.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage, a single pretty-printed
//!   `collection.json` under the platform data directory.
//! - [`memory::InMemoryStore`]: in-memory storage for tests, including a
//!   switch to simulate write failures.

use crate::collection::Collection;
use crate::error::Result;

pub mod fs;
pub mod memory;

/// Abstract interface for collection persistence.
pub trait DataStore {
    /// Read the stored collection, `None` if nothing was ever saved.
    fn load(&self) -> Result<Option<Collection>>;

    /// Serialize and write the entire collection.
    fn save(&mut self, collection: &Collection) -> Result<()>;
}
