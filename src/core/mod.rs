//! Core functionality of the advisory engine
//!
//! This module contains the instance catalog, the advisory strategies and
//! the data structures they exchange.

pub mod catalog;
pub mod engine;
pub mod evaluator;
pub mod models;
pub mod regions;
pub mod strategies;

pub use catalog::{CatalogSource, CsvCatalogSource, InstanceCatalog, InstanceRecord, PricingSource};
pub use engine::AdvisoryEngine;
pub use evaluator::{CostImpactEvaluator, Evaluation};
pub use models::{
    AdvisoryResult, CloudConfiguration, CloudProvider, CostBreakdown, LoadProfile,
    OnPremiseConfiguration, ServerUsage, UsePhaseImpacts,
};
pub use strategies::TARGET_UTILIZATION;
