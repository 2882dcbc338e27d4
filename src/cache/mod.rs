//! First-page episode cache.
//!
//! - [`store`]: CacheStore trait, CacheError, and the in-memory store
//! - [`file_store`]: JSON-file store that survives restarts

pub mod file_store;
pub mod store;

pub use file_store::FileCacheStore;
pub use store::{CacheError, CacheStore, MemoryCacheStore};
