//! Core data models for the advisory engine

pub mod configuration;
pub mod impacts;
pub mod pricing;
pub mod provider;
pub mod usage;

// Re-export commonly used types
pub use configuration::{AdvisoryResult, CloudConfiguration, OnPremiseConfiguration};
pub use impacts::{
    CriterionImpact, ImpactAssessment, ImpactCriterion, PhaseImpact, UsePhaseImpacts,
};
pub use pricing::{CostBreakdown, Currency, PricingPlan, REFERENCE_CURRENCY};
pub use provider::{CloudProvider, DELISTED_PROVIDERS};
pub use usage::{LoadProfile, LoadSlot, ServerUsage, TimeSlotLoad, UsageMethod};
