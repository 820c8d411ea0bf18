//! Pricing plans and monetary cost breakdowns

use serde::{Deserialize, Serialize};

use super::provider::CloudProvider;
use crate::utils::error::{AdvisorError, Result};

/// Currency strategies compare candidate costs in
pub const REFERENCE_CURRENCY: Currency = Currency::Eur;

/// Currencies price feeds quote in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Usd,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Eur => write!(f, "EUR"),
            Currency::Usd => write!(f, "USD"),
        }
    }
}

/// Billing plan a provider's price feed is queried with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPlan {
    pub pricing_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved_plan: Option<String>,
}

impl PricingPlan {
    /// Default plan per provider. The labels are the providers' own price
    /// feed vocabulary and must match it verbatim.
    pub fn default_for(provider: &CloudProvider) -> Result<Self> {
        let plan = match provider {
            CloudProvider::Aws => Self {
                pricing_type: "OnDemand".to_string(),
                reserved_plan: Some("yrTerm1Standard.allUpfront".to_string()),
            },
            CloudProvider::Azure => Self {
                pricing_type: "LinuxOnDemand".to_string(),
                reserved_plan: Some("yrTerm1Standard.allUpfront".to_string()),
            },
            CloudProvider::Gcp => Self {
                pricing_type: "Linux On Demand cost".to_string(),
                reserved_plan: None,
            },
            other => return Err(AdvisorError::unknown_provider(other.to_string())),
        };
        Ok(plan)
    }
}

/// Monetary cost of running a configuration, split into components
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating: Option<f64>,
}

impl CostBreakdown {
    /// Which components are present and non-zero, as `(energy, operating)`.
    /// Right-sizing only compares candidates sharing the input's shape.
    pub fn component_shape(&self) -> (bool, bool) {
        (
            Self::has_component(self.energy),
            Self::has_component(self.operating),
        )
    }

    fn has_component(component: Option<f64>) -> bool {
        component.is_some_and(|value| value != 0.0)
    }
}
