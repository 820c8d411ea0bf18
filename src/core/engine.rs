//! Advisory engine facade
//!
//! Bundles the catalog, evaluator and carbon-intensity service behind one
//! entry point the surrounding service layer calls. The engine owns no
//! state of its own; strategy calls stay request-scoped.

use std::sync::Arc;

use crate::core::catalog::InstanceCatalog;
use crate::core::evaluator::CostImpactEvaluator;
use crate::core::models::{
    AdvisoryResult, CloudConfiguration, CloudProvider, OnPremiseConfiguration,
};
use crate::core::strategies;
use crate::services::carbon::CarbonIntensityService;
use crate::utils::error::Result;

pub struct AdvisoryEngine {
    catalog: Arc<InstanceCatalog>,
    evaluator: Arc<dyn CostImpactEvaluator>,
    carbon: Arc<CarbonIntensityService>,
}

impl AdvisoryEngine {
    pub fn new(
        catalog: Arc<InstanceCatalog>,
        evaluator: Arc<dyn CostImpactEvaluator>,
        carbon: Arc<CarbonIntensityService>,
    ) -> Self {
        Self {
            catalog,
            evaluator,
            carbon,
        }
    }

    /// Pre-warm and schedule the external-data caches.
    pub async fn start(&self) {
        self.carbon.start().await;
    }

    pub fn stop(&self) {
        self.carbon.stop();
    }

    pub fn catalog(&self) -> &InstanceCatalog {
        &self.catalog
    }

    pub fn carbon(&self) -> &CarbonIntensityService {
        &self.carbon
    }

    /// Providers the catalog can recommend into.
    pub fn providers(&self) -> Vec<CloudProvider> {
        self.catalog.providers()
    }

    /// Instance types offered by one provider, reconciled with pricing.
    pub fn instance_types(&self, provider: &CloudProvider) -> Result<Vec<String>> {
        self.catalog.instance_types(provider)
    }

    /// Smallest adequate instance of the target provider for an on-premise
    /// workload.
    pub fn lift_and_shift(
        &self,
        configuration: &OnPremiseConfiguration,
        provider: &CloudProvider,
    ) -> Result<AdvisoryResult> {
        strategies::lift_and_shift(&self.catalog, configuration, provider)
    }

    /// Smaller instance hitting the utilization target, ranked on real cost
    /// and impact figures.
    pub async fn right_size(&self, configuration: &CloudConfiguration) -> Result<AdvisoryResult> {
        strategies::right_size(&self.catalog, self.evaluator.as_ref(), configuration).await
    }

    /// Lowest-carbon region offering the same instance type.
    pub async fn greener_region(
        &self,
        configuration: &CloudConfiguration,
    ) -> Result<AdvisoryResult> {
        strategies::greener_region(&self.catalog, &self.carbon, configuration).await
    }
}
