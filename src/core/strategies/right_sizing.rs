//! Right-sizing strategy
//!
//! Iterative utilization-target search: shrink an already-cloud-hosted
//! workload onto a smaller instance so its utilization lands between the
//! current level and the target ceiling, then rank the survivors on real
//! cost and impact figures.

use futures::future::join_all;
use tracing::{debug, info};

use crate::core::catalog::{InstanceCatalog, InstanceRecord};
use crate::core::evaluator::{CostImpactEvaluator, evaluate_degraded};
use crate::core::models::{
    AdvisoryResult, CloudConfiguration, CostBreakdown, PricingPlan, UsePhaseImpacts,
};
use crate::utils::error::{AdvisorError, Result};

/// Utilization ceiling a right-sized instance may reach, percent
pub const TARGET_UTILIZATION: f64 = 85.0;

struct RankedCandidate<'a> {
    record: &'a InstanceRecord,
    estimated_load: f64,
    cost: Option<CostBreakdown>,
    impacts: UsePhaseImpacts,
}

impl RankedCandidate<'_> {
    fn total_cost(&self) -> f64 {
        self.cost.map(|cost| cost.total).unwrap_or(0.0)
    }
}

fn cost_shape(cost: Option<&CostBreakdown>) -> (bool, bool) {
    cost.map(CostBreakdown::component_shape)
        .unwrap_or((false, false))
}

pub async fn right_size(
    catalog: &InstanceCatalog,
    evaluator: &dyn CostImpactEvaluator,
    configuration: &CloudConfiguration,
) -> Result<AdvisoryResult> {
    let current_load = configuration.usage.average_load().ok_or_else(|| {
        AdvisorError::invalid_configuration("a load profile is required for right-sizing")
    })?;

    if current_load >= TARGET_UTILIZATION {
        debug!(
            instance_type = %configuration.instance_type,
            current_load,
            "utilization already at target, keeping configuration"
        );
        return Ok(AdvisoryResult {
            configuration: configuration.clone(),
            estimated_load: Some(current_load),
            cost: None,
            impacts: None,
        });
    }

    let archetype = catalog
        .find(&configuration.provider, &configuration.instance_type)
        .ok_or_else(|| {
            AdvisorError::unknown_instance(
                configuration.provider.to_string(),
                configuration.instance_type.clone(),
            )
        })?;

    let priceable = catalog.priceable_instances(&configuration.provider);
    let candidates = catalog.query(&configuration.provider, |record| {
        record.vcpu <= archetype.vcpu
            && record.memory_gb >= archetype.memory_gb
            && priceable
                .as_ref()
                .is_none_or(|ids| ids.contains(&record.instance_id))
    })?;
    if candidates.is_empty() {
        return Err(AdvisorError::no_match(format!(
            "no {} instance fits below {}",
            configuration.provider, configuration.instance_type
        )));
    }
    if archetype.vcpu == 0.0 {
        return Err(AdvisorError::no_data(format!(
            "{}/{} carries no vcpu information",
            configuration.provider, configuration.instance_type
        )));
    }

    // Inverse scaling: halving the vcpu roughly doubles the utilization.
    // Candidates must improve utilization without crossing the ceiling.
    let shortlisted: Vec<(&InstanceRecord, f64)> = candidates
        .into_iter()
        .filter_map(|record| {
            let estimated_load = archetype.vcpu * current_load / record.vcpu;
            (estimated_load >= current_load && estimated_load <= TARGET_UTILIZATION)
                .then_some((record, estimated_load))
        })
        .collect();
    if shortlisted.is_empty() {
        return Err(AdvisorError::no_match(format!(
            "no {} candidate lands between {}% and {}% utilization",
            configuration.provider, current_load, TARGET_UTILIZATION
        )));
    }

    let reference = evaluate_degraded(evaluator, configuration).await;
    let reference_shape = cost_shape(reference.reference_cost());

    let evaluations = join_all(shortlisted.iter().map(|(record, estimated_load)| {
        let candidate = candidate_configuration(configuration, record, *estimated_load);
        async move { evaluate_degraded(evaluator, &candidate).await }
    }))
    .await;

    let mut ranked: Vec<RankedCandidate> = shortlisted
        .iter()
        .zip(evaluations)
        .map(|(&(record, estimated_load), evaluation)| RankedCandidate {
            record,
            estimated_load,
            cost: evaluation.reference_cost().copied(),
            impacts: evaluation.impacts.use_phase_summary(),
        })
        .collect();

    // Only candidates billed with the same cost components as the input
    // compare apples-to-apples.
    ranked.retain(|candidate| cost_shape(candidate.cost.as_ref()) == reference_shape);
    if ranked.is_empty() {
        return Err(AdvisorError::no_match(
            "no candidate matches the configuration's cost structure",
        ));
    }

    ranked.sort_by(|a, b| {
        a.total_cost()
            .total_cmp(&b.total_cost())
            .then_with(|| b.estimated_load.total_cmp(&a.estimated_load))
            .then_with(|| a.impacts.gwp.total_cmp(&b.impacts.gwp))
            .then_with(|| a.impacts.pe.total_cmp(&b.impacts.pe))
            .then_with(|| a.impacts.adp.total_cmp(&b.impacts.adp))
    });
    let winner = &ranked[0];

    let mut recommended = configuration.clone();
    if winner.record.provider != recommended.provider {
        recommended.usage.pricing = Some(PricingPlan::default_for(&winner.record.provider)?);
    }
    recommended.provider = winner.record.provider.clone();
    recommended.instance_type = winner.record.instance_id.clone();
    if let Some(load) = recommended.usage.load.as_mut() {
        load.set_all(winner.estimated_load);
    }

    info!(
        from = %configuration.instance_type,
        to = %recommended.instance_type,
        estimated_load = winner.estimated_load,
        "right-sizing recommendation"
    );

    Ok(AdvisoryResult {
        estimated_load: Some(winner.estimated_load),
        cost: winner.cost,
        impacts: Some(winner.impacts),
        configuration: recommended,
    })
}

fn candidate_configuration(
    base: &CloudConfiguration,
    record: &InstanceRecord,
    estimated_load: f64,
) -> CloudConfiguration {
    let mut candidate = base.clone();
    candidate.provider = record.provider.clone();
    candidate.instance_type = record.instance_id.clone();
    if let Some(load) = candidate.usage.load.as_mut() {
        load.set_all(estimated_load);
    }
    candidate
}
