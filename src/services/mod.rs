//! Services module
//!
//! This module contains external-data plumbing shared by the advisory
//! strategies: the dual-tier cache and the carbon-intensity service on
//! top of it.

pub mod cache;
pub mod carbon;

pub use cache::{
    CacheConfig, CacheEntry, CacheRefreshEvent, CacheRegistry, CacheSnapshot, EndpointFetcher,
    ExternalDataCache, FileSnapshotStore, HttpEndpointFetcher, MemorySnapshotStore, RefreshOutcome,
    SnapshotStore,
};
pub use carbon::{CarbonIntensityRecord, CarbonIntensityService, Granularity};
