//! Common test utilities for cloudvisor-rs
//!
//! This module provides shared test infrastructure for all tests:
//! - Catalog and configuration factories
//! - Scripted evaluator and pricing fakes
//! - Carbon-intensity snapshot seeding
//!
//! # Usage
//!
//! ```rust
//! use crate::common::{CatalogFactory, ConfigFactory};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let catalog = CatalogFactory::standard();
//!     let workload = ConfigFactory::on_prem();
//!     // ...
//! }
//! ```

pub mod fixtures;

// Re-export commonly used items
pub use fixtures::{
    CarbonFactory, CatalogFactory, ConfigFactory, EvaluationFactory, ScriptedEvaluator,
    StaticPricing, StubFetcher,
};
