//! Workload usage profiles

use serde::{Deserialize, Serialize};

use super::pricing::PricingPlan;
use super::provider::CloudProvider;
use crate::utils::error::Result;

/// How a configuration's electricity consumption is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageMethod {
    /// Consumption modeled from the utilization level
    #[default]
    Load,
    /// Consumption taken from a measured electricity draw
    Electricity,
}

impl UsageMethod {
    /// Cloud billing has no notion of a direct electricity draw; a measured
    /// method degrades to the load-based one when a configuration moves to
    /// the cloud.
    pub fn for_cloud(self) -> Self {
        match self {
            Self::Electricity => Self::Load,
            other => other,
        }
    }
}

/// One labeled slot of the advanced load profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadSlot {
    /// Utilization during the slot, percent
    pub load: f64,
}

/// Three-slot time-weighted utilization profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSlotLoad {
    pub slot1: LoadSlot,
    pub slot2: LoadSlot,
    pub slot3: LoadSlot,
}

/// Server utilization, either a single flat percentage or the slotted form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoadProfile {
    TimeSlotted(TimeSlotLoad),
    Flat(f64),
}

impl LoadProfile {
    /// Average utilization: the flat value, or the mean of the three slots.
    pub fn average(&self) -> f64 {
        match self {
            Self::Flat(load) => *load,
            Self::TimeSlotted(slots) => {
                (slots.slot1.load + slots.slot2.load + slots.slot3.load) / 3.0
            }
        }
    }

    /// Overwrite every slot (or the flat value) with one utilization level.
    pub fn set_all(&mut self, load: f64) {
        match self {
            Self::Flat(value) => *value = load,
            Self::TimeSlotted(slots) => {
                slots.slot1.load = load;
                slots.slot2.load = load;
                slots.slot3.load = load;
            }
        }
    }
}

fn default_lifespan() -> f64 {
    1.0
}

/// Usage context shared by on-premise and cloud configurations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerUsage {
    /// Grid zone or country code the server runs in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Amortization period in years
    #[serde(default = "default_lifespan")]
    pub lifespan_years: f64,
    #[serde(default)]
    pub method: UsageMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load: Option<LoadProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<PricingPlan>,
}

impl Default for ServerUsage {
    fn default() -> Self {
        Self {
            location: None,
            lifespan_years: default_lifespan(),
            method: UsageMethod::default(),
            load: None,
            pricing: None,
        }
    }
}

impl ServerUsage {
    /// Average utilization when a load profile is declared.
    pub fn average_load(&self) -> Option<f64> {
        self.load.map(|profile| profile.average())
    }

    /// Copy of this usage adjusted for a cloud target: the method is
    /// translated for cloud billing and the pricing plan reset to the
    /// provider's default.
    pub fn for_cloud(&self, provider: &CloudProvider) -> Result<ServerUsage> {
        let mut usage = self.clone();
        usage.method = usage.method.for_cloud();
        usage.pricing = Some(PricingPlan::default_for(provider)?);
        Ok(usage)
    }
}
