//! Carbon-intensity service
//!
//! Owns one external-data cache per temporal granularity, built over the
//! grid-zone endpoints of a carbon-intensity API, and folds cached payloads
//! into per-zone intensity values for the greener-region search.

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;
use url::Url;

use super::cache::{
    CacheConfig, CacheRegistry, CacheSnapshot, EndpointFetcher, ExternalDataCache,
    HttpEndpointFetcher, SnapshotStore,
};
use crate::config::CarbonSettings;
use crate::utils::error::{AdvisorError, Result};

/// Temporal granularity of the intensity data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Hourly,
    Monthly,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Monthly => "monthly",
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One zone's latest intensity as the API reports it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonIntensityRecord {
    pub zone: String,
    /// Grams of CO2-equivalent per kWh
    pub carbon_intensity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CarbonIntensityRecord {
    fn observed_at(&self) -> DateTime<Utc> {
        self.datetime
            .or(self.updated_at)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Carbon-intensity caches, one per granularity.
pub struct CarbonIntensityService {
    hourly: Arc<ExternalDataCache>,
    monthly: Arc<ExternalDataCache>,
}

impl CarbonIntensityService {
    /// Service with the production HTTP fetcher; the configured API key is
    /// sent as an `auth-token` header on every fetch.
    pub fn new(
        settings: &CarbonSettings,
        registry: &CacheRegistry,
        store: Arc<dyn SnapshotStore>,
    ) -> Result<Self> {
        let fetcher: Arc<dyn EndpointFetcher> = Arc::new(Self::build_fetcher(settings)?);
        Self::with_fetcher(settings, registry, store, fetcher)
    }

    /// Service over an externally supplied fetcher.
    pub fn with_fetcher(
        settings: &CarbonSettings,
        registry: &CacheRegistry,
        store: Arc<dyn SnapshotStore>,
        fetcher: Arc<dyn EndpointFetcher>,
    ) -> Result<Self> {
        let hourly = registry.get_or_create(
            Self::cache_config(settings, Granularity::Hourly)?,
            Arc::clone(&store),
            Arc::clone(&fetcher),
        );
        let monthly = registry.get_or_create(
            Self::cache_config(settings, Granularity::Monthly)?,
            store,
            fetcher,
        );
        Ok(Self { hourly, monthly })
    }

    fn build_fetcher(settings: &CarbonSettings) -> Result<HttpEndpointFetcher> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &settings.api_key {
            let value = HeaderValue::from_str(api_key)
                .map_err(|e| AdvisorError::config(format!("invalid carbon api key: {}", e)))?;
            headers.insert("auth-token", value);
        }
        HttpEndpointFetcher::with_headers(headers)
    }

    fn cache_config(settings: &CarbonSettings, granularity: Granularity) -> Result<CacheConfig> {
        let endpoints = settings
            .zones
            .iter()
            .map(|zone| Self::endpoint(&settings.api_base, zone, granularity))
            .collect::<Result<Vec<String>>>()?;
        Ok(CacheConfig::new(
            format!("carbon-intensity-{}", granularity),
            endpoints,
            settings.ttl(granularity),
        ))
    }

    fn endpoint(api_base: &str, zone: &str, granularity: Granularity) -> Result<String> {
        let mut url = Url::parse(api_base)
            .map_err(|e| AdvisorError::config(format!("invalid carbon api base: {}", e)))?;
        url.set_path("/v3/carbon-intensity/latest");
        url.query_pairs_mut()
            .append_pair("zone", zone)
            .append_pair("temporalGranularity", granularity.as_str());
        Ok(url.to_string())
    }

    /// Pre-warm and schedule both granularity caches.
    pub async fn start(&self) {
        Arc::clone(&self.hourly).start().await;
        Arc::clone(&self.monthly).start().await;
    }

    pub fn stop(&self) {
        self.hourly.stop();
        self.monthly.stop();
    }

    pub fn cache(&self, granularity: Granularity) -> &Arc<ExternalDataCache> {
        match granularity {
            Granularity::Hourly => &self.hourly,
            Granularity::Monthly => &self.monthly,
        }
    }

    /// Current per-zone intensity values from the granularity's snapshot.
    pub async fn intensities(&self, granularity: Granularity) -> Result<HashMap<String, f64>> {
        let snapshot = self.cache(granularity).get_results().await?;
        Ok(fold_intensities(&snapshot))
    }
}

/// Fold snapshot payloads into one intensity per zone. When several records
/// share a zone the newest observation wins; equal timestamps resolve by
/// source-key order, so the fold is deterministic. Failure entries and
/// unparsable payloads are skipped.
pub fn fold_intensities(snapshot: &CacheSnapshot) -> HashMap<String, f64> {
    let mut newest: HashMap<String, (f64, DateTime<Utc>)> = HashMap::new();
    for (source, payload) in snapshot.payloads() {
        let record: CarbonIntensityRecord = match serde_json::from_value(payload.clone()) {
            Ok(record) => record,
            Err(e) => {
                warn!(source = %source, "skipping unparsable carbon intensity payload: {}", e);
                continue;
            }
        };
        if !record.carbon_intensity.is_finite() {
            warn!(zone = %record.zone, "skipping non-finite carbon intensity");
            continue;
        }
        let observed_at = record.observed_at();
        match newest.get(&record.zone) {
            Some((_, existing)) if *existing > observed_at => {}
            _ => {
                newest.insert(record.zone.clone(), (record.carbon_intensity, observed_at));
            }
        }
    }
    newest
        .into_iter()
        .map(|(zone, (value, _))| (zone, value))
        .collect()
}
