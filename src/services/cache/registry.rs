//! Registry of named cache instances

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

use super::fetch::EndpointFetcher;
use super::service::ExternalDataCache;
use super::store::SnapshotStore;
use super::types::CacheConfig;

/// Explicit singleton-by-name registry: the scheduler and in-process tier of
/// a named cache must never be duplicated, so lookup-or-create happens under
/// one lock and always yields the same live instance per name.
#[derive(Default)]
pub struct CacheRegistry {
    caches: Mutex<HashMap<String, Arc<ExternalDataCache>>>,
}

impl CacheRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing instance for the name, or a newly constructed one. Settings
    /// of a later construction are ignored; the live instance wins.
    pub fn get_or_create(
        &self,
        config: CacheConfig,
        store: Arc<dyn SnapshotStore>,
        fetcher: Arc<dyn EndpointFetcher>,
    ) -> Arc<ExternalDataCache> {
        let mut caches = self.caches.lock();
        if let Some(existing) = caches.get(&config.name) {
            if existing.endpoints() != config.endpoints || existing.ttl() != config.ttl {
                warn!(
                    cache = %config.name,
                    "cache already registered with different settings, keeping existing instance"
                );
            }
            return Arc::clone(existing);
        }

        let cache = Arc::new(ExternalDataCache::new(config, store, fetcher));
        caches.insert(cache.name().to_string(), Arc::clone(&cache));
        cache
    }

    pub fn get(&self, name: &str) -> Option<Arc<ExternalDataCache>> {
        self.caches.lock().get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.caches.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Abort every registered cache's refresh task (embedder shutdown).
    pub fn stop_all(&self) {
        for cache in self.caches.lock().values() {
            cache.stop();
        }
    }
}
