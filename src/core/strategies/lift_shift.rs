//! Lift-and-shift strategy
//!
//! One-shot nearest-fit search: the smallest priceable instance of the
//! target provider that covers the on-premise workload's vcpu and memory.

use tracing::{debug, warn};

use crate::core::catalog::InstanceCatalog;
use crate::core::models::{
    AdvisoryResult, CloudConfiguration, CloudProvider, OnPremiseConfiguration,
};
use crate::utils::error::{AdvisorError, Result};

/// Suffix appended to the source configuration's name on the recommendation
const NAME_SUFFIX: &str = "-lift&shift";

pub fn lift_and_shift(
    catalog: &InstanceCatalog,
    configuration: &OnPremiseConfiguration,
    provider: &CloudProvider,
) -> Result<AdvisoryResult> {
    let mut required_vcpu = configuration.required_vcpu();
    let mut required_memory = configuration.required_memory_gb();

    let maximums = catalog
        .provider_maximums(provider)
        .ok_or_else(|| AdvisorError::unknown_provider(provider.to_string()))?;

    // A requirement beyond the provider's largest instance clamps down to
    // that maximum; the recommendation is degraded, not refused.
    if required_vcpu > maximums.vcpu {
        warn!(
            provider = %provider,
            required = required_vcpu,
            maximum = maximums.vcpu,
            "required vcpu exceeds the provider's largest instance, clamping"
        );
        required_vcpu = maximums.vcpu;
    }
    if required_memory > maximums.memory_gb {
        warn!(
            provider = %provider,
            required = required_memory,
            maximum = maximums.memory_gb,
            "required memory exceeds the provider's largest instance, clamping"
        );
        required_memory = maximums.memory_gb;
    }

    let priceable = catalog.priceable_instances(provider);
    let mut candidates = catalog.query(provider, |record| {
        record.vcpu >= required_vcpu
            && record.memory_gb >= required_memory
            && priceable
                .as_ref()
                .is_none_or(|ids| ids.contains(&record.instance_id))
    })?;

    candidates.sort_by(|a, b| {
        a.vcpu
            .total_cmp(&b.vcpu)
            .then_with(|| a.memory_gb.total_cmp(&b.memory_gb))
    });

    let Some(best) = candidates.first() else {
        return Err(AdvisorError::no_match(format!(
            "no {} instance offers {} vcpu and {} GB memory",
            provider, required_vcpu, required_memory
        )));
    };

    debug!(
        provider = %provider,
        instance_type = %best.instance_id,
        vcpu = best.vcpu,
        memory_gb = best.memory_gb,
        "lift-and-shift candidate selected"
    );

    let cloud = CloudConfiguration {
        name: format!("{}{}", configuration.name, NAME_SUFFIX),
        provider: provider.clone(),
        instance_type: best.instance_id.clone(),
        usage: configuration.usage.for_cloud(provider)?,
    };
    Ok(AdvisoryResult::bare(cloud))
}
