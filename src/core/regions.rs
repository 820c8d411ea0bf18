//! Provider region to grid-zone estimation
//!
//! Maps each provider's region identifiers to the electricity-grid zone codes
//! carbon-intensity data is published under. Regions without a mapping cannot
//! take part in the greener-region comparison and are skipped by callers.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::core::models::CloudProvider;

static AWS_REGION_ZONES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // US regions
        ("us-east-1", "US-MIDA-PJM"),
        ("us-east-2", "US-MIDA-PJM"),
        ("us-west-1", "US-CAL-CISO"),
        ("us-west-2", "US-NW-PACW"),
        // EU regions
        ("eu-west-1", "IE"),
        ("eu-west-2", "GB"),
        ("eu-west-3", "FR"),
        ("eu-central-1", "DE"),
        ("eu-north-1", "SE"),
        ("eu-south-1", "IT"),
        // Asia Pacific regions
        ("ap-northeast-1", "JP"),
        ("ap-northeast-2", "KR"),
        ("ap-south-1", "IN"),
        ("ap-southeast-1", "SG"),
        ("ap-southeast-2", "AU-NSW"),
        // Other regions
        ("ca-central-1", "CA-QC"),
        ("sa-east-1", "BR-CS"),
    ])
});

static AZURE_REGION_ZONES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("eastus", "US-MIDA-PJM"),
        ("eastus2", "US-MIDA-PJM"),
        ("westus", "US-CAL-CISO"),
        ("westus2", "US-NW-PACW"),
        ("westus3", "US-SW-AZPS"),
        ("canadacentral", "CA-ON"),
        ("northeurope", "IE"),
        ("westeurope", "NL"),
        ("uksouth", "GB"),
        ("francecentral", "FR"),
        ("germanywestcentral", "DE"),
        ("swedencentral", "SE"),
        ("switzerlandnorth", "CH"),
        ("italynorth", "IT"),
        ("polandcentral", "PL"),
        ("japaneast", "JP"),
        ("koreacentral", "KR"),
        ("centralindia", "IN"),
        ("southeastasia", "SG"),
        ("australiaeast", "AU-NSW"),
        ("brazilsouth", "BR-CS"),
    ])
});

static GCP_REGION_ZONES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("us-central1", "US-MIDW-MISO"),
        ("us-east1", "US-CAR-SC"),
        ("us-east4", "US-MIDA-PJM"),
        ("us-west1", "US-NW-PACW"),
        ("us-west2", "US-CAL-LDWP"),
        ("northamerica-northeast1", "CA-QC"),
        ("europe-west1", "BE"),
        ("europe-west2", "GB"),
        ("europe-west3", "DE"),
        ("europe-west4", "NL"),
        ("europe-west6", "CH"),
        ("europe-west8", "IT"),
        ("europe-west9", "FR"),
        ("europe-north1", "FI"),
        ("europe-southwest1", "ES"),
        ("asia-northeast1", "JP"),
        ("asia-south1", "IN"),
        ("asia-southeast1", "SG"),
        ("australia-southeast1", "AU-NSW"),
        ("southamerica-east1", "BR-CS"),
    ])
});

/// Grid zone a provider region runs in, `None` when the region has no known
/// mapping.
pub fn estimate_location(provider: &CloudProvider, region: &str) -> Option<&'static str> {
    let table = match provider {
        CloudProvider::Aws => &*AWS_REGION_ZONES,
        CloudProvider::Azure => &*AZURE_REGION_ZONES,
        CloudProvider::Gcp => &*GCP_REGION_ZONES,
        _ => return None,
    };
    table.get(region.trim().to_lowercase().as_str()).copied()
}

/// Every distinct zone the region tables reference, sorted. Used as the
/// default zone set the carbon-intensity service tracks.
pub fn tracked_zones() -> Vec<&'static str> {
    let mut zones: Vec<&'static str> = AWS_REGION_ZONES
        .values()
        .chain(AZURE_REGION_ZONES.values())
        .chain(GCP_REGION_ZONES.values())
        .copied()
        .collect();
    zones.sort_unstable();
    zones.dedup();
    zones
}
