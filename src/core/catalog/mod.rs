//! Multi-provider instance catalog
//!
//! Merges per-provider listings into one read-only table, reconciled against
//! pricing availability.

mod catalog;
mod source;
mod types;


pub use catalog::InstanceCatalog;
pub use source::{CatalogSource, CsvCatalogSource, PricingSource};
pub use types::{InstanceRecord, ProviderListing, ProviderMaximums, RawInstanceRow};
