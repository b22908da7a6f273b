//! Response caching for API queries
//!
//! This module provides an in-memory TTL cache and the deterministic key
//! scheme that indexes it. Entries live at most five minutes by default and
//! the store is bounded, so an abandoned browsing session cannot grow memory
//! without limit. Nothing is persisted; the cache is lost on process exit.

mod key;
mod store;

pub use key::{detail_key, list_key};
pub use store::TtlCache;
