//! Cost and impact evaluation interface
//!
//! Wraps the external cost and sustainability computation consumed per
//! candidate configuration. Implementations may fail transiently; strategies
//! degrade a failed candidate to zeros instead of surfacing the error.

use async_trait::async_trait;
use std::collections::HashMap;
use tracing::warn;

use crate::core::models::{
    CloudConfiguration, CostBreakdown, Currency, ImpactAssessment, REFERENCE_CURRENCY,
};
use crate::utils::error::Result;

/// Full evaluation of one candidate configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    /// Monetary cost per currency
    pub costs: HashMap<Currency, CostBreakdown>,
    /// Environmental impact per criterion
    pub impacts: ImpactAssessment,
}

impl Evaluation {
    /// Cost breakdown in the reference currency, absent when the evaluator
    /// produced none.
    pub fn reference_cost(&self) -> Option<&CostBreakdown> {
        self.costs.get(&REFERENCE_CURRENCY)
    }
}

/// External cost/impact computation, one call per candidate.
#[async_trait]
pub trait CostImpactEvaluator: Send + Sync {
    async fn evaluate(&self, configuration: &CloudConfiguration) -> Result<Evaluation>;
}

/// Evaluate a candidate, degrading any failure to the all-zero evaluation.
/// A candidate the evaluator cannot score still participates in ranking with
/// zeroed cost and impact fields.
pub async fn evaluate_degraded(
    evaluator: &dyn CostImpactEvaluator,
    configuration: &CloudConfiguration,
) -> Evaluation {
    match evaluator.evaluate(configuration).await {
        Ok(evaluation) => evaluation,
        Err(e) => {
            warn!(
                provider = %configuration.provider,
                instance_type = %configuration.instance_type,
                "candidate evaluation failed, degrading to zeros: {}",
                e
            );
            Evaluation::default()
        }
    }
}
