//! Catalog and pricing collaborator interfaces

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::debug;

use super::types::{ProviderListing, RawInstanceRow};
use crate::core::models::CloudProvider;
use crate::utils::error::{AdvisorError, Result};

/// Supplies raw per-provider instance listings to the catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load(&self) -> Result<Vec<ProviderListing>>;
}

/// Supplies pricing availability for catalog reconciliation and region
/// enumeration for the greener-region search.
pub trait PricingSource: Send + Sync {
    /// Instance ids the provider has current price data for. `None` means the
    /// provider has no price feed at all, which the catalog treats as
    /// "list unfiltered" rather than "list nothing".
    fn priceable_instances(&self, provider: &CloudProvider) -> Option<HashSet<String>>;

    /// Regions in which the provider offers the given instance type.
    fn regions_for_instance(&self, provider: &CloudProvider, instance_type: &str) -> Vec<String>;
}

/// Index file listing provider metadata, not an instance listing itself.
const PROVIDER_INDEX_STEM: &str = "providers";

/// Reads a directory of `<provider>.csv` instance listings. The provider name
/// is derived from the file stem, lower-cased.
pub struct CsvCatalogSource {
    dir: PathBuf,
}

impl CsvCatalogSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn parse_rows(content: &str) -> Vec<RawInstanceRow> {
        let mut reader = csv::Reader::from_reader(content.as_bytes());
        let mut rows = Vec::new();
        for row in reader.deserialize::<RawInstanceRow>() {
            match row {
                Ok(row) => rows.push(row),
                Err(e) => debug!("skipping malformed catalog row: {}", e),
            }
        }
        rows
    }
}

#[async_trait]
impl CatalogSource for CsvCatalogSource {
    async fn load(&self) -> Result<Vec<ProviderListing>> {
        let mut entries = tokio::fs::read_dir(&self.dir).await.map_err(|e| {
            AdvisorError::catalog(format!(
                "cannot read catalog directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("csv") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if stem.eq_ignore_ascii_case(PROVIDER_INDEX_STEM) {
                continue;
            }
            files.push((stem.to_string(), path));
        }
        // Directory iteration order is OS-dependent.
        files.sort();

        let mut listings = Vec::with_capacity(files.len());
        for (stem, path) in files {
            let content = tokio::fs::read_to_string(&path).await?;
            let rows = Self::parse_rows(&content);
            let provider = CloudProvider::from(stem.as_str());
            debug!(provider = %provider, rows = rows.len(), "loaded catalog file");
            listings.push(ProviderListing { provider, rows });
        }
        Ok(listings)
    }
}
