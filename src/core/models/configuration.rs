//! Server configurations and advisory results

use serde::{Deserialize, Serialize};

use super::impacts::UsePhaseImpacts;
use super::pricing::CostBreakdown;
use super::provider::CloudProvider;
use super::usage::ServerUsage;

/// Description of a physical on-premise server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnPremiseConfiguration {
    pub name: String,
    pub cpu_core_units: u32,
    pub cpu_quantity: u32,
    pub ram_capacity_gb: f64,
    pub ram_quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_gb: Option<f64>,
    #[serde(default)]
    pub usage: ServerUsage,
}

impl OnPremiseConfiguration {
    /// Total vcpu the workload occupies.
    pub fn required_vcpu(&self) -> f64 {
        f64::from(self.cpu_core_units * self.cpu_quantity)
    }

    /// Total memory the workload occupies.
    pub fn required_memory_gb(&self) -> f64 {
        self.ram_capacity_gb * f64::from(self.ram_quantity)
    }
}

/// A provider instance hosting a workload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudConfiguration {
    pub name: String,
    pub provider: CloudProvider,
    pub instance_type: String,
    #[serde(default)]
    pub usage: ServerUsage,
}

/// A recommended configuration with its estimated utilization, cost and
/// footprint where the strategy computed them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryResult {
    pub configuration: CloudConfiguration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_load: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<CostBreakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impacts: Option<UsePhaseImpacts>,
}

impl AdvisoryResult {
    /// Result carrying a configuration and nothing else.
    pub fn bare(configuration: CloudConfiguration) -> Self {
        Self {
            configuration,
            estimated_load: None,
            cost: None,
            impacts: None,
        }
    }
}
