//! Catalog row and record types

use serde::{Deserialize, Serialize};

use crate::core::models::CloudProvider;

/// Raw listing row as a catalog source yields it, before numeric coercion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInstanceRow {
    pub id: String,
    #[serde(default)]
    pub vcpu: String,
    #[serde(default)]
    pub memory: String,
    #[serde(default)]
    pub ssd_storage: String,
}

/// One provider's raw listing
#[derive(Debug, Clone)]
pub struct ProviderListing {
    pub provider: CloudProvider,
    pub rows: Vec<RawInstanceRow>,
}

/// A single catalog entry after coercion and dedup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceRecord {
    pub provider: CloudProvider,
    pub instance_id: String,
    pub vcpu: f64,
    pub memory_gb: f64,
    pub storage_gb: f64,
}

/// Largest vcpu and memory any of one provider's records offers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProviderMaximums {
    pub vcpu: f64,
    pub memory_gb: f64,
}
