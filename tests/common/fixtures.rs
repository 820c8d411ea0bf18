//! Test fixtures and data factories
//!
//! Provides factory methods for creating test data with sensible defaults.
//! All factories create real objects, not mocks.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Value, json};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use cloudvisor_rs::config::CarbonSettings;
use cloudvisor_rs::core::catalog::{
    InstanceCatalog, PricingSource, ProviderListing, RawInstanceRow,
};
use cloudvisor_rs::core::evaluator::{CostImpactEvaluator, Evaluation};
use cloudvisor_rs::core::models::{
    CloudConfiguration, CloudProvider, CostBreakdown, CriterionImpact, Currency,
    ImpactAssessment, ImpactCriterion, LoadProfile, OnPremiseConfiguration, PhaseImpact,
    PricingPlan, ServerUsage, UsageMethod,
};
use cloudvisor_rs::services::cache::{
    CacheEntry, CacheRegistry, CacheSnapshot, EndpointFetcher, MemorySnapshotStore, SnapshotStore,
};
use cloudvisor_rs::services::carbon::CarbonIntensityService;
use cloudvisor_rs::utils::error::{AdvisorError, Result};

/// Pricing collaborator backed by static data
#[derive(Default)]
pub struct StaticPricing {
    priceable: Option<HashSet<String>>,
    regions: HashMap<String, Vec<String>>,
}

impl StaticPricing {
    /// No price feed at all: the catalog lists ids unfiltered.
    pub fn unfiltered() -> Self {
        Self::default()
    }

    /// Price feed covering exactly the given ids.
    pub fn priceable(ids: &[&str]) -> Self {
        Self {
            priceable: Some(ids.iter().map(|id| id.to_string()).collect()),
            regions: HashMap::new(),
        }
    }

    /// Declare the regions offering one instance type.
    pub fn with_regions(mut self, instance_type: &str, regions: &[&str]) -> Self {
        self.regions.insert(
            instance_type.to_string(),
            regions.iter().map(|region| region.to_string()).collect(),
        );
        self
    }
}

impl PricingSource for StaticPricing {
    fn priceable_instances(&self, _: &CloudProvider) -> Option<HashSet<String>> {
        self.priceable.clone()
    }

    fn regions_for_instance(&self, _: &CloudProvider, instance_type: &str) -> Vec<String> {
        self.regions.get(instance_type).cloned().unwrap_or_default()
    }
}

/// Factory for building instance catalogs
pub struct CatalogFactory;

impl CatalogFactory {
    /// Seven-instance AWS catalog most engine tests run against.
    pub fn standard() -> InstanceCatalog {
        Self::with_pricing(StaticPricing::unfiltered())
    }

    pub fn with_pricing(pricing: StaticPricing) -> InstanceCatalog {
        InstanceCatalog::from_listings(vec![Self::aws_listing()], Arc::new(pricing))
    }

    pub fn aws_listing() -> ProviderListing {
        Self::listing(
            CloudProvider::Aws,
            &[
                ("m6g.medium", 1.0, 4.0),
                ("m6g.xlarge", 4.0, 16.0),
                ("m6g.2xlarge", 8.0, 32.0),
                ("r6g.2xlarge", 8.0, 64.0),
                ("c6g.4xlarge", 16.0, 32.0),
                ("m6g.4xlarge", 16.0, 64.0),
                ("r6g.4xlarge", 16.0, 128.0),
            ],
        )
    }

    pub fn listing(provider: CloudProvider, rows: &[(&str, f64, f64)]) -> ProviderListing {
        ProviderListing {
            provider,
            rows: rows
                .iter()
                .map(|(id, vcpu, memory)| RawInstanceRow {
                    id: id.to_string(),
                    vcpu: vcpu.to_string(),
                    memory: memory.to_string(),
                    ssd_storage: "100".to_string(),
                })
                .collect(),
        }
    }
}

/// Factory for creating server configurations
pub struct ConfigFactory;

impl ConfigFactory {
    /// 8 vcpu / 32 GB on-premise workload (4 cores x 2 sockets, 16 GB x 2).
    pub fn on_prem() -> OnPremiseConfiguration {
        OnPremiseConfiguration {
            name: "db-01".to_string(),
            cpu_core_units: 4,
            cpu_quantity: 2,
            ram_capacity_gb: 16.0,
            ram_quantity: 2,
            storage_gb: Some(500.0),
            usage: ServerUsage {
                method: UsageMethod::Electricity,
                load: Some(LoadProfile::Flat(50.0)),
                ..ServerUsage::default()
            },
        }
    }

    /// AWS-hosted workload in `IE` with a flat load profile.
    pub fn cloud(instance_type: &str, load: f64) -> CloudConfiguration {
        CloudConfiguration {
            name: "api-eu".to_string(),
            provider: CloudProvider::Aws,
            instance_type: instance_type.to_string(),
            usage: ServerUsage {
                location: Some("IE".to_string()),
                load: Some(LoadProfile::Flat(load)),
                pricing: Some(PricingPlan::default_for(&CloudProvider::Aws).unwrap()),
                ..ServerUsage::default()
            },
        }
    }
}

/// Factory for creating evaluator results
pub struct EvaluationFactory;

impl EvaluationFactory {
    /// Evaluation with both cost components and proportional impacts.
    pub fn costed(total: f64, energy: f64, operating: f64) -> Evaluation {
        Self::build(total, Some(energy), Some(operating), (total / 10.0, total, total / 1000.0))
    }

    pub fn build(
        total: f64,
        energy: Option<f64>,
        operating: Option<f64>,
        (gwp, pe, adp): (f64, f64, f64),
    ) -> Evaluation {
        let mut costs = HashMap::new();
        costs.insert(
            Currency::Eur,
            CostBreakdown {
                total,
                energy,
                operating,
            },
        );
        let mut assessment = ImpactAssessment::default();
        for (criterion, value) in [
            (ImpactCriterion::Gwp, gwp),
            (ImpactCriterion::Pe, pe),
            (ImpactCriterion::Adp, adp),
        ] {
            assessment.criteria.insert(
                criterion,
                CriterionImpact {
                    embedded: None,
                    use_phase: Some(PhaseImpact { value, unit: None }),
                },
            );
        }
        Evaluation {
            costs,
            impacts: assessment,
        }
    }
}

/// Evaluator returning scripted results keyed by instance type
pub struct ScriptedEvaluator {
    evaluations: HashMap<String, Evaluation>,
}

impl ScriptedEvaluator {
    pub fn new(entries: Vec<(&str, Evaluation)>) -> Self {
        Self {
            evaluations: entries
                .into_iter()
                .map(|(id, evaluation)| (id.to_string(), evaluation))
                .collect(),
        }
    }

    /// Evaluator failing every call; strategies degrade those to zeros.
    pub fn failing() -> Self {
        Self {
            evaluations: HashMap::new(),
        }
    }
}

#[async_trait]
impl CostImpactEvaluator for ScriptedEvaluator {
    async fn evaluate(&self, configuration: &CloudConfiguration) -> Result<Evaluation> {
        self.evaluations
            .get(&configuration.instance_type)
            .cloned()
            .ok_or_else(|| AdvisorError::adapter("no scripted evaluation"))
    }
}

/// Fetcher refusing every call; used where the network must stay quiet.
pub struct StubFetcher;

#[async_trait]
impl EndpointFetcher for StubFetcher {
    async fn fetch_json(&self, _: &str) -> Result<Value> {
        Err(AdvisorError::adapter("network disabled in tests"))
    }
}

/// Factory for carbon-intensity services with pre-seeded snapshots
pub struct CarbonFactory;

impl CarbonFactory {
    /// Service whose monthly cache reads the given per-zone intensities from
    /// the persistent tier; no network fetches happen.
    pub async fn seeded(intensities: &[(&str, f64)]) -> CarbonIntensityService {
        let store = Arc::new(MemorySnapshotStore::new());
        if !intensities.is_empty() {
            let mut entries = BTreeMap::new();
            for (zone, value) in intensities {
                entries.insert(
                    format!("https://api.example.test/{}", zone),
                    CacheEntry::Payload(json!({
                        "zone": zone,
                        "carbonIntensity": value,
                        "datetime": "2026-03-01T00:00:00Z"
                    })),
                );
            }
            let snapshot = CacheSnapshot {
                entries,
                expires_at: Some(Utc::now() + chrono::Duration::hours(1)),
            };
            store
                .persist("carbon-intensity-monthly", &snapshot)
                .await
                .unwrap();
        }

        CarbonIntensityService::with_fetcher(
            &Self::settings(),
            &CacheRegistry::new(),
            store,
            Arc::new(StubFetcher),
        )
        .unwrap()
    }

    pub fn settings() -> CarbonSettings {
        CarbonSettings {
            api_base: "https://api.example.test".to_string(),
            api_key: None,
            zones: vec!["FR".to_string(), "IE".to_string(), "DE".to_string()],
            hourly_ttl_secs: 3600,
            monthly_ttl_secs: 86400,
        }
    }
}
