//! Environmental impact criteria and assessments

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Impact criteria the advisor ranks on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactCriterion {
    /// Global-warming potential
    Gwp,
    /// Primary energy
    Pe,
    /// Abiotic depletion potential
    Adp,
}

impl ImpactCriterion {
    pub const ALL: [ImpactCriterion; 3] = [Self::Gwp, Self::Pe, Self::Adp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gwp => "gwp",
            Self::Pe => "pe",
            Self::Adp => "adp",
        }
    }
}

impl std::fmt::Display for ImpactCriterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One lifecycle phase's scored value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PhaseImpact {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// One criterion's scores across lifecycle phases
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CriterionImpact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedded: Option<PhaseImpact>,
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub use_phase: Option<PhaseImpact>,
}

/// Full impact structure returned by the evaluator, keyed by criterion
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImpactAssessment {
    #[serde(flatten)]
    pub criteria: HashMap<ImpactCriterion, CriterionImpact>,
}

impl ImpactAssessment {
    /// Use-phase scalar for one criterion; `0.0` when the criterion or its
    /// use phase is absent.
    pub fn use_phase_value(&self, criterion: ImpactCriterion) -> f64 {
        self.criteria
            .get(&criterion)
            .and_then(|impact| impact.use_phase.as_ref())
            .map(|phase| phase.value)
            .unwrap_or(0.0)
    }

    /// The three use-phase scalars strategies rank on.
    pub fn use_phase_summary(&self) -> UsePhaseImpacts {
        UsePhaseImpacts {
            gwp: self.use_phase_value(ImpactCriterion::Gwp),
            pe: self.use_phase_value(ImpactCriterion::Pe),
            adp: self.use_phase_value(ImpactCriterion::Adp),
        }
    }
}

/// Single use-phase scalar per criterion, as reported in advisory results
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UsePhaseImpacts {
    pub gwp: f64,
    pub pe: f64,
    pub adp: f64,
}
