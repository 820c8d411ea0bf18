//! Greener-region strategy
//!
//! Cross-region emissions comparison: among the regions offering the same
//! instance type, move the workload to the grid zone with the lowest cached
//! monthly carbon intensity.

use tracing::{debug, info, warn};

use crate::core::catalog::InstanceCatalog;
use crate::core::models::{AdvisoryResult, CloudConfiguration};
use crate::core::regions;
use crate::services::carbon::{CarbonIntensityService, Granularity};
use crate::utils::error::{AdvisorError, Result};

pub async fn greener_region(
    catalog: &InstanceCatalog,
    carbon: &CarbonIntensityService,
    configuration: &CloudConfiguration,
) -> Result<AdvisoryResult> {
    let current_location = configuration.usage.location.clone().ok_or_else(|| {
        AdvisorError::invalid_configuration("a location is required for the greener-region search")
    })?;

    let available_regions =
        catalog.regions_for_instance(&configuration.provider, &configuration.instance_type);
    if available_regions.len() <= 1 {
        debug!(
            provider = %configuration.provider,
            instance_type = %configuration.instance_type,
            "no alternative region offers the instance, keeping configuration"
        );
        return Ok(AdvisoryResult::bare(configuration.clone()));
    }

    let mut locations: Vec<&'static str> = available_regions
        .iter()
        .filter_map(|region| {
            let location = regions::estimate_location(&configuration.provider, region);
            if location.is_none() {
                warn!(
                    provider = %configuration.provider,
                    region = %region,
                    "region has no grid-zone mapping, skipping"
                );
            }
            location
        })
        .collect();
    locations.sort_unstable();
    locations.dedup();

    let intensities = carbon.intensities(Granularity::Monthly).await?;

    let mut scored: Vec<(&str, f64)> = locations
        .iter()
        .filter_map(|location| {
            intensities
                .get(*location)
                .map(|intensity| (*location, *intensity))
        })
        .collect();
    if scored.is_empty() {
        return Err(AdvisorError::no_data(
            "no candidate region has carbon-intensity data",
        ));
    }

    scored.sort_by(|a, b| a.1.total_cmp(&b.1));
    let (best_location, best_intensity) = scored[0];
    if scored.len() > 1 && scored[1].1 == best_intensity {
        return Err(AdvisorError::ambiguous(format!(
            "{} and {} share the lowest carbon intensity",
            best_location, scored[1].0
        )));
    }

    if best_location == current_location {
        debug!(
            location = %current_location,
            "current region is already the greenest"
        );
        return Ok(AdvisoryResult::bare(configuration.clone()));
    }

    info!(
        from = %current_location,
        to = %best_location,
        intensity = best_intensity,
        "greener-region recommendation"
    );

    let mut recommended = configuration.clone();
    recommended.usage.location = Some(best_location.to_string());
    Ok(AdvisoryResult::bare(recommended))
}
