//! Dual-tier cache for externally fetched data
//!
//! Each named cache keeps an in-process snapshot tier backed by a persistent
//! tier, refreshed on a timer with per-endpoint failure isolation.

mod fetch;
mod registry;
mod service;
mod store;
mod types;


// Re-export public types
pub use fetch::{DEFAULT_FETCH_TIMEOUT, EndpointFetcher, HttpEndpointFetcher};
pub use registry::CacheRegistry;
pub use service::ExternalDataCache;
pub use store::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
pub use types::{CacheConfig, CacheEntry, CacheRefreshEvent, CacheSnapshot, RefreshOutcome};
