//! # Cloudvisor-RS
//!
//! A cloud configuration advisory engine: recommends cloud-instance
//! substitutions for on-premise or existing cloud servers under resource,
//! cost and environmental-impact constraints.
//!
//! ## Features
//!
//! - **Lift-and-Shift**: smallest cloud instance covering an on-premise
//!   workload's vcpu and memory
//! - **Right-Sizing**: shrink an oversized cloud instance toward an 85%
//!   utilization target, ranked on real cost and impact figures
//! - **Greener-Region**: move a workload to the grid zone with the lowest
//!   cached carbon intensity
//! - **Multi-Provider Catalog**: per-provider instance listings merged into
//!   one queryable table, reconciled against pricing availability
//! - **Dual-Tier Cache**: in-process snapshots backed by a persistent store,
//!   refreshed on a timer and tolerant of per-endpoint failures
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::collections::HashSet;
//! use std::sync::Arc;
//!
//! use cloudvisor_rs::core::catalog::{CsvCatalogSource, InstanceCatalog, PricingSource};
//! use cloudvisor_rs::core::models::{CloudProvider, OnPremiseConfiguration, ServerUsage};
//! use cloudvisor_rs::core::strategies;
//!
//! struct NoPricing;
//!
//! impl PricingSource for NoPricing {
//!     fn priceable_instances(&self, _: &CloudProvider) -> Option<HashSet<String>> {
//!         None
//!     }
//!     fn regions_for_instance(&self, _: &CloudProvider, _: &str) -> Vec<String> {
//!         Vec::new()
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = CsvCatalogSource::new("data/catalog");
//!     let catalog = InstanceCatalog::load(&source, Arc::new(NoPricing)).await?;
//!
//!     let workload = OnPremiseConfiguration {
//!         name: "db-01".to_string(),
//!         cpu_core_units: 4,
//!         cpu_quantity: 2,
//!         ram_capacity_gb: 16.0,
//!         ram_quantity: 2,
//!         storage_gb: None,
//!         usage: ServerUsage::default(),
//!     };
//!
//!     let advice = strategies::lift_and_shift(&catalog, &workload, &CloudProvider::Aws)?;
//!     println!("recommended: {}", advice.configuration.instance_type);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod services;
pub mod utils;

// Re-export main types
pub use config::Settings;
pub use utils::error::{AdvisorError, Result};

pub use crate::core::catalog::InstanceCatalog;
pub use crate::core::engine::AdvisoryEngine;
pub use crate::core::models::{
    AdvisoryResult, CloudConfiguration, CloudProvider, OnPremiseConfiguration,
};
pub use services::cache::{CacheRegistry, ExternalDataCache};
pub use services::carbon::{CarbonIntensityService, Granularity};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
