//! Cloud provider identification

use serde::{Deserialize, Serialize};

/// Cloud provider enumeration
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CloudProvider {
    Aws,
    Azure,
    Gcp,
    Scaleway,
    Custom(String),
}

/// Providers hidden from the public provider listing but still queryable.
pub const DELISTED_PROVIDERS: &[CloudProvider] = &[CloudProvider::Scaleway];

impl CloudProvider {
    pub fn as_str(&self) -> &str {
        match self {
            CloudProvider::Aws => "aws",
            CloudProvider::Azure => "azure",
            CloudProvider::Gcp => "gcp",
            CloudProvider::Scaleway => "scaleway",
            CloudProvider::Custom(name) => name.as_str(),
        }
    }

    /// Whether the provider is excluded from `InstanceCatalog::providers()`.
    pub fn is_delisted(&self) -> bool {
        DELISTED_PROVIDERS.contains(self)
    }
}

impl From<&str> for CloudProvider {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "aws" | "amazon" => CloudProvider::Aws,
            "azure" | "microsoft-azure" => CloudProvider::Azure,
            "gcp" | "google" | "google-cloud" => CloudProvider::Gcp,
            "scaleway" => CloudProvider::Scaleway,
            other => CloudProvider::Custom(other.to_string()),
        }
    }
}

impl std::fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
