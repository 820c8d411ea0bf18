//! Persistent snapshot tier

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

use super::types::CacheSnapshot;
use crate::utils::error::{AdvisorError, Result};

/// Persistent tier behind the in-process one: one snapshot document per cache
/// name, written atomically.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn load(&self, name: &str) -> Result<Option<CacheSnapshot>>;
    async fn persist(&self, name: &str, snapshot: &CacheSnapshot) -> Result<()>;
}

/// Stores each snapshot as `<name>.json` under one directory. Writes go to a
/// temporary file first and are renamed into place so readers never see a
/// partial document.
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn snapshot_path(&self, name: &str) -> PathBuf {
        // Cache names are code-defined; this only guards against separators.
        let file: String = name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", file))
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn load(&self, name: &str) -> Result<Option<CacheSnapshot>> {
        let path = self.snapshot_path(name);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AdvisorError::persistence(format!(
                    "failed to read snapshot {}: {}",
                    path.display(),
                    e
                )));
            }
        };
        let snapshot = serde_json::from_str(&content).map_err(|e| {
            AdvisorError::persistence(format!(
                "corrupt snapshot {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Some(snapshot))
    }

    async fn persist(&self, name: &str, snapshot: &CacheSnapshot) -> Result<()> {
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            AdvisorError::persistence(format!(
                "failed to create snapshot directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let path = self.snapshot_path(name);
        let staging = path.with_extension("json.tmp");
        let content = serde_json::to_vec(snapshot)?;

        fs::write(&staging, &content).await.map_err(|e| {
            AdvisorError::persistence(format!(
                "failed to write snapshot {}: {}",
                staging.display(),
                e
            ))
        })?;
        fs::rename(&staging, &path).await.map_err(|e| {
            AdvisorError::persistence(format!(
                "failed to commit snapshot {}: {}",
                path.display(),
                e
            ))
        })?;

        debug!(cache = name, path = %path.display(), "snapshot persisted");
        Ok(())
    }
}

/// In-memory store for tests and embedders without a durable tier.
#[derive(Default)]
pub struct MemorySnapshotStore {
    snapshots: Mutex<HashMap<String, CacheSnapshot>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self, name: &str) -> Result<Option<CacheSnapshot>> {
        Ok(self.snapshots.lock().get(name).cloned())
    }

    async fn persist(&self, name: &str, snapshot: &CacheSnapshot) -> Result<()> {
        self.snapshots
            .lock()
            .insert(name.to_string(), snapshot.clone());
        Ok(())
    }
}
