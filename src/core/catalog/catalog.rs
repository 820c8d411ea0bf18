//! The unified instance catalog

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::source::{CatalogSource, PricingSource};
use super::types::{InstanceRecord, ProviderListing, ProviderMaximums, RawInstanceRow};
use crate::core::models::CloudProvider;
use crate::utils::error::{AdvisorError, Result};

/// Union of all providers' instance listings, reconciled against pricing
/// availability. Built once at startup and read-only afterwards.
pub struct InstanceCatalog {
    records: Vec<InstanceRecord>,
    by_provider: HashMap<CloudProvider, Vec<usize>>,
    pricing: Arc<dyn PricingSource>,
}

impl InstanceCatalog {
    /// Load and merge every provider listing supplied by the source.
    pub async fn load(
        source: &dyn CatalogSource,
        pricing: Arc<dyn PricingSource>,
    ) -> Result<Self> {
        let listings = source.load().await?;
        let catalog = Self::from_listings(listings, pricing);
        info!(
            records = catalog.records.len(),
            providers = catalog.by_provider.len(),
            "instance catalog loaded"
        );
        Ok(catalog)
    }

    /// Build the catalog from already-loaded listings. Numeric fields are
    /// coerced, unparsable rows discarded, and duplicate
    /// `(provider, instance_id)` pairs keep their first occurrence.
    pub fn from_listings(
        listings: Vec<ProviderListing>,
        pricing: Arc<dyn PricingSource>,
    ) -> Self {
        let mut records: Vec<InstanceRecord> = Vec::new();
        let mut by_provider: HashMap<CloudProvider, Vec<usize>> = HashMap::new();
        let mut seen: HashSet<(CloudProvider, String)> = HashSet::new();

        for listing in listings {
            for row in listing.rows {
                let Some(record) = Self::coerce(&listing.provider, &row) else {
                    debug!(
                        provider = %listing.provider,
                        id = %row.id,
                        "discarding unparsable catalog row"
                    );
                    continue;
                };
                let key = (record.provider.clone(), record.instance_id.clone());
                if !seen.insert(key) {
                    warn!(
                        provider = %record.provider,
                        id = %record.instance_id,
                        "duplicate catalog entry ignored"
                    );
                    continue;
                }
                by_provider
                    .entry(record.provider.clone())
                    .or_default()
                    .push(records.len());
                records.push(record);
            }
        }

        Self {
            records,
            by_provider,
            pricing,
        }
    }

    fn coerce(provider: &CloudProvider, row: &RawInstanceRow) -> Option<InstanceRecord> {
        let id = row.id.trim();
        if id.is_empty() {
            return None;
        }
        let vcpu = row.vcpu.trim().parse::<f64>().ok()?;
        let memory_gb = row.memory.trim().parse::<f64>().ok()?;
        let storage_gb = Self::parse_storage(&row.ssd_storage)?;
        Some(InstanceRecord {
            provider: provider.clone(),
            instance_id: id.to_string(),
            vcpu,
            memory_gb,
            storage_gb,
        })
    }

    // Storage is frequently unlisted; an empty column means none, while a
    // present-but-garbled one invalidates the row.
    fn parse_storage(value: &str) -> Option<f64> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Some(0.0);
        }
        trimmed.parse::<f64>().ok()
    }

    /// Providers with at least one record, minus the delisted set. Delisted
    /// providers stay directly queryable.
    pub fn providers(&self) -> Vec<CloudProvider> {
        let mut providers: Vec<CloudProvider> = self
            .by_provider
            .keys()
            .filter(|provider| !provider.is_delisted())
            .cloned()
            .collect();
        providers.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        providers
    }

    /// Instance ids available to the provider: catalog entries intersected
    /// with the provider's priceable ids, sorted. When the provider has no
    /// price feed at all the catalog ids are returned unfiltered.
    pub fn instance_types(&self, provider: &CloudProvider) -> Result<Vec<String>> {
        let indexes = self
            .by_provider
            .get(provider)
            .ok_or_else(|| AdvisorError::unknown_provider(provider.to_string()))?;

        let ids = indexes
            .iter()
            .map(|&index| self.records[index].instance_id.as_str());

        let mut ids: Vec<String> = match self.pricing.priceable_instances(provider) {
            Some(priceable) => ids
                .filter(|id| priceable.contains(*id))
                .map(String::from)
                .collect(),
            None => {
                warn!(
                    provider = %provider,
                    "no price feed for provider, listing catalog ids unfiltered"
                );
                ids.map(String::from).collect()
            }
        };
        ids.sort();
        Ok(ids)
    }

    /// Records of one provider satisfying a predicate, in load order.
    pub fn query<'a>(
        &'a self,
        provider: &CloudProvider,
        predicate: impl Fn(&InstanceRecord) -> bool,
    ) -> Result<Vec<&'a InstanceRecord>> {
        let indexes = self
            .by_provider
            .get(provider)
            .ok_or_else(|| AdvisorError::unknown_provider(provider.to_string()))?;
        Ok(indexes
            .iter()
            .map(|&index| &self.records[index])
            .filter(|record| predicate(record))
            .collect())
    }

    /// Single record lookup.
    pub fn find(&self, provider: &CloudProvider, instance_id: &str) -> Option<&InstanceRecord> {
        let indexes = self.by_provider.get(provider)?;
        indexes
            .iter()
            .map(|&index| &self.records[index])
            .find(|record| record.instance_id == instance_id)
    }

    /// Largest vcpu/memory the provider offers, `None` for an unknown or
    /// empty provider.
    pub fn provider_maximums(&self, provider: &CloudProvider) -> Option<ProviderMaximums> {
        let indexes = self.by_provider.get(provider)?;
        let mut maximums: Option<ProviderMaximums> = None;
        for &index in indexes {
            let record = &self.records[index];
            let current = maximums.get_or_insert(ProviderMaximums {
                vcpu: record.vcpu,
                memory_gb: record.memory_gb,
            });
            current.vcpu = current.vcpu.max(record.vcpu);
            current.memory_gb = current.memory_gb.max(record.memory_gb);
        }
        maximums
    }

    /// Ids the provider's price feed covers, or `None` without a feed.
    pub fn priceable_instances(&self, provider: &CloudProvider) -> Option<HashSet<String>> {
        self.pricing.priceable_instances(provider)
    }

    /// Regions offering the given instance type.
    pub fn regions_for_instance(
        &self,
        provider: &CloudProvider,
        instance_type: &str,
    ) -> Vec<String> {
        self.pricing.regions_for_instance(provider, instance_type)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
