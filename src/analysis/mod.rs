//! Laminate analyses and their options

mod failure;
mod homogenization;
mod response;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::elements::DEFAULT_DENSITY;
use crate::error::CltError;

pub use failure::{evaluate_failure, evaluate_failure_by_name, StrainAllowables, StrengthAllowables};
pub use homogenization::effective_properties;
pub use response::{analyze_load, ply_state, solve};

/// Ply failure criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCriterion {
    /// Worst single stress component against its allowable
    MaxStress,
    /// Worst single strain component against its allowable
    MaxStrain,
    /// Tsai-Hill quadratic interaction
    TsaiHill,
}

impl FailureCriterion {
    pub const ALL: [FailureCriterion; 3] = [Self::MaxStress, Self::MaxStrain, Self::TsaiHill];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MaxStress => "max_stress",
            Self::MaxStrain => "max_strain",
            Self::TsaiHill => "tsai_hill",
        }
    }
}

impl fmt::Display for FailureCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailureCriterion {
    type Err = CltError;

    /// Parse a criterion identifier; there is no fallback criterion
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                CltError::Configuration(format!(
                    "unknown failure criterion '{s}' (expected one of max_stress, max_strain, tsai_hill)"
                ))
            })
    }
}

/// Options for a full laminate analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Failure criterion to evaluate (None = skip failure evaluation)
    pub criterion: Option<FailureCriterion>,
    /// Density assigned to materials defined without one (kg/m³)
    pub default_density: f64,
    /// |B|/|A| above which a mirror-symmetric layup is reported as coupled
    pub symmetry_tolerance: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            criterion: None,
            default_density: DEFAULT_DENSITY,
            symmetry_tolerance: 1e-9,
        }
    }
}

impl AnalysisOptions {
    /// Options for stiffness and stress recovery only
    pub fn stiffness_only() -> Self {
        Self::default()
    }

    /// Options that also evaluate ply failure
    pub fn with_criterion(mut self, criterion: FailureCriterion) -> Self {
        self.criterion = Some(criterion);
        self
    }

    pub fn with_default_density(mut self, density: f64) -> Self {
        self.default_density = density;
        self
    }

    pub fn with_symmetry_tolerance(mut self, tol: f64) -> Self {
        self.symmetry_tolerance = tol;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_criterion_parsing() {
        assert_eq!("max_stress".parse::<FailureCriterion>().unwrap(), FailureCriterion::MaxStress);
        assert_eq!("max_strain".parse::<FailureCriterion>().unwrap(), FailureCriterion::MaxStrain);
        assert_eq!("tsai_hill".parse::<FailureCriterion>().unwrap(), FailureCriterion::TsaiHill);
    }

    #[test]
    fn test_unknown_criterion_is_configuration_error() {
        for name in ["tsai_wu", "", "MAX_STRESS", "hashin"] {
            let err = name.parse::<FailureCriterion>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration, "criterion {name:?}");
        }
    }

    #[test]
    fn test_criterion_serde_names() {
        let json = serde_json::to_string(&FailureCriterion::TsaiHill).unwrap();
        assert_eq!(json, "\"tsai_hill\"");
    }

    #[test]
    fn test_options_builder() {
        let opts = AnalysisOptions::stiffness_only()
            .with_criterion(FailureCriterion::MaxStrain)
            .with_default_density(1500.0);
        assert_eq!(opts.criterion, Some(FailureCriterion::MaxStrain));
        assert_eq!(opts.default_density, 1500.0);
        assert_eq!(opts.symmetry_tolerance, 1e-9);
    }
}
