//! Dual-tier external data cache

use arc_swap::ArcSwap;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::fetch::EndpointFetcher;
use super::store::SnapshotStore;
use super::types::{CacheConfig, CacheEntry, CacheRefreshEvent, CacheSnapshot, RefreshOutcome};
use crate::utils::error::Result;

/// Cache of N external endpoints under one logical name: an in-process tier
/// holding an atomically swapped immutable snapshot, backed by a persistent
/// tier for restart survival, refreshed by one background task per instance.
pub struct ExternalDataCache {
    name: String,
    endpoints: Vec<String>,
    ttl: Duration,
    /// In-process tier. Readers clone the snapshot out; refresh replaces it
    /// wholesale, so a reader never observes a half-written tier.
    memory: ArcSwap<CacheSnapshot>,
    store: Arc<dyn SnapshotStore>,
    fetcher: Arc<dyn EndpointFetcher>,
    event_sender: broadcast::Sender<CacheRefreshEvent>,
    started: AtomicBool,
    refresh_task: Mutex<Option<JoinHandle<()>>>,
}

impl ExternalDataCache {
    pub fn new(
        config: CacheConfig,
        store: Arc<dyn SnapshotStore>,
        fetcher: Arc<dyn EndpointFetcher>,
    ) -> Self {
        let (event_sender, _) = broadcast::channel(100);
        Self {
            name: config.name,
            endpoints: config.endpoints,
            ttl: config.ttl,
            memory: ArcSwap::from_pointee(CacheSnapshot::default()),
            store,
            fetcher,
            event_sender,
            started: AtomicBool::new(false),
            refresh_task: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// One refresh cycle. A fresh persistent snapshot is reused without any
    /// network round; otherwise every endpoint is fetched concurrently, each
    /// failure recorded as that endpoint's entry, and the full snapshot is
    /// swapped into the in-process tier and upserted into the persistent one.
    /// Only a persistent-tier read/write failure makes this return an error.
    pub async fn refresh(&self) -> Result<()> {
        let now = Utc::now();
        if let Some(snapshot) = self.store.load(&self.name).await? {
            if snapshot.is_fresh(now) {
                info!(cache = %self.name, "reusing fresh persisted snapshot");
                self.memory.store(Arc::new(snapshot));
                self.emit(RefreshOutcome::ReusedPersistent, 0);
                return Ok(());
            }
        }

        info!(
            cache = %self.name,
            endpoints = self.endpoints.len(),
            "fetching results from endpoints"
        );
        let results = futures::future::join_all(
            self.endpoints.iter().map(|url| self.fetcher.fetch_json(url)),
        )
        .await;

        let mut entries = BTreeMap::new();
        let mut failures = 0;
        for (url, outcome) in self.endpoints.iter().zip(results) {
            let entry = match outcome {
                Ok(payload) => CacheEntry::Payload(payload),
                Err(e) => {
                    error!(cache = %self.name, url = %url, "endpoint fetch failed: {}", e);
                    failures += 1;
                    CacheEntry::Failure {
                        error: e.to_string(),
                    }
                }
            };
            entries.insert(url.clone(), entry);
        }

        let snapshot = CacheSnapshot {
            entries,
            expires_at: Some(now + chrono::Duration::seconds(self.ttl.as_secs() as i64)),
        };
        // The in-process tier gets the fetched data even if persisting fails;
        // the scheduler retries the write on the next tick.
        self.memory.store(Arc::new(snapshot.clone()));
        self.store.persist(&self.name, &snapshot).await?;
        self.emit(RefreshOutcome::Fetched, failures);
        Ok(())
    }

    /// Idempotent startup: one synchronous pre-warm refresh (failure logged,
    /// not fatal), then a background task refreshing every `ttl`.
    pub async fn start(self: Arc<Self>) {
        if self.started.swap(true, Ordering::SeqCst) {
            debug!(cache = %self.name, "cache service already started");
            return;
        }

        info!(cache = %self.name, ttl_secs = self.ttl.as_secs(), "starting cache service");
        if let Err(e) = self.refresh().await {
            warn!(cache = %self.name, "pre-warm refresh failed: {}", e);
        }

        let service = Arc::clone(&self);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(service.ttl);
            // The first tick fires immediately; the pre-warm already covered it.
            interval.tick().await;
            loop {
                interval.tick().await;
                if let Err(e) = service.refresh().await {
                    warn!(cache = %service.name, "scheduled refresh failed: {}", e);
                } else {
                    debug!(cache = %service.name, "scheduled refresh completed");
                }
            }
        });
        *self.refresh_task.lock() = Some(handle);
    }

    /// Abort the background refresh task.
    pub fn stop(&self) {
        if let Some(handle) = self.refresh_task.lock().take() {
            handle.abort();
        }
        self.started.store(false, Ordering::SeqCst);
    }

    /// Current snapshot by value: the in-process tier when non-empty,
    /// otherwise a direct persistent-tier read (empty snapshot if the store
    /// holds none).
    pub async fn get_results(&self) -> Result<CacheSnapshot> {
        let snapshot = self.memory.load_full();
        if !snapshot.is_empty() {
            return Ok(snapshot.as_ref().clone());
        }
        Ok(self.store.load(&self.name).await?.unwrap_or_default())
    }

    /// Refresh-completion events.
    pub fn subscribe(&self) -> broadcast::Receiver<CacheRefreshEvent> {
        self.event_sender.subscribe()
    }

    fn emit(&self, outcome: RefreshOutcome, failures: usize) {
        let _ = self.event_sender.send(CacheRefreshEvent {
            cache: self.name.clone(),
            outcome,
            sources: self.endpoints.len(),
            failures,
            timestamp: Utc::now(),
        });
    }
}

impl Drop for ExternalDataCache {
    fn drop(&mut self) {
        if let Some(handle) = self.refresh_task.lock().take() {
            handle.abort();
        }
    }
}
