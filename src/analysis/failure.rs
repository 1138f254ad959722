//! Ply failure criteria
//!
//! All three criteria share one allowables record. Tension and compression
//! limits are positive magnitudes; the sign of the acting stress (or strain)
//! picks which one applies.

use serde::{Deserialize, Serialize};

use super::FailureCriterion;
use crate::elements::Material;
use crate::error::{CltError, CltResult};
use crate::math::Vec3;
use crate::results::{FailureReport, PlyResult};

const MPA: f64 = 1e6;

/// Ply strength limits in material axes (Pa)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrengthAllowables {
    /// Longitudinal tensile strength
    pub xt: f64,
    /// Longitudinal compressive strength
    pub xc: f64,
    /// Transverse tensile strength
    pub yt: f64,
    /// Transverse compressive strength
    pub yc: f64,
    /// In-plane shear strength
    pub s: f64,
    /// Strain limits, required by the max-strain criterion only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strain: Option<StrainAllowables>,
}

/// Ply strain limits in material axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrainAllowables {
    pub e1t: f64,
    pub e1c: f64,
    pub e2t: f64,
    pub e2c: f64,
    /// Engineering shear strain limit
    pub g12: f64,
}

impl StrengthAllowables {
    pub fn new(xt: f64, xc: f64, yt: f64, yc: f64, s: f64) -> Self {
        Self {
            xt,
            xc,
            yt,
            yc,
            s,
            strain: None,
        }
    }

    /// Create allowables from MPa values
    pub fn from_mpa(xt: f64, xc: f64, yt: f64, yc: f64, s: f64) -> Self {
        Self::new(xt * MPA, xc * MPA, yt * MPA, yc * MPA, s * MPA)
    }

    pub fn with_strain_limits(mut self, strain: StrainAllowables) -> Self {
        self.strain = Some(strain);
        self
    }

    /// Attach strain limits derived from the stress limits and the ply moduli
    pub fn with_strain_limits_from(self, material: &Material) -> Self {
        let strain = StrainAllowables::from_stress(&self, material);
        self.with_strain_limits(strain)
    }

    fn validate(&self) -> CltResult<()> {
        let limits = [("xt", self.xt), ("xc", self.xc), ("yt", self.yt), ("yc", self.yc), ("s", self.s)];
        check_positive(&limits)?;
        if let Some(strain) = &self.strain {
            strain.validate()?;
        }
        Ok(())
    }
}

impl StrainAllowables {
    pub fn new(e1t: f64, e1c: f64, e2t: f64, e2c: f64, g12: f64) -> Self {
        Self {
            e1t,
            e1c,
            e2t,
            e2c,
            g12,
        }
    }

    /// Linear-elastic strain at each stress limit: ε = X / E
    pub fn from_stress(stress: &StrengthAllowables, material: &Material) -> Self {
        Self::new(
            stress.xt / material.e11,
            stress.xc / material.e11,
            stress.yt / material.e22,
            stress.yc / material.e22,
            stress.s / material.g12,
        )
    }

    fn validate(&self) -> CltResult<()> {
        let limits = [
            ("e1t", self.e1t),
            ("e1c", self.e1c),
            ("e2t", self.e2t),
            ("e2c", self.e2c),
            ("g12", self.g12),
        ];
        check_positive(&limits)
    }
}

fn check_positive(limits: &[(&str, f64)]) -> CltResult<()> {
    for (label, value) in limits {
        if !(*value > 0.0 && value.is_finite()) {
            return Err(CltError::Configuration(format!(
                "allowable {label} must be positive, got {value}"
            )));
        }
    }
    Ok(())
}

/// Ratio of a normal component to the tension or compression limit
fn normal_ratio(value: f64, tension: f64, compression: f64) -> f64 {
    if value >= 0.0 {
        value / tension
    } else {
        -value / compression
    }
}

fn max_stress_index(stress: &Vec3, a: &StrengthAllowables) -> f64 {
    normal_ratio(stress[0], a.xt, a.xc)
        .max(normal_ratio(stress[1], a.yt, a.yc))
        .max(stress[2].abs() / a.s)
}

fn max_strain_index(strain: &Vec3, a: &StrainAllowables) -> f64 {
    normal_ratio(strain[0], a.e1t, a.e1c)
        .max(normal_ratio(strain[1], a.e2t, a.e2c))
        .max(strain[2].abs() / a.g12)
}

fn tsai_hill_index(stress: &Vec3, a: &StrengthAllowables) -> f64 {
    let (s1, s2, t12) = (stress[0], stress[1], stress[2]);
    let x = if s1 >= 0.0 { a.xt } else { a.xc };
    let y = if s2 >= 0.0 { a.yt } else { a.yc };

    let index = (s1 / x).powi(2) - s1 * s2 / (x * x) + (s2 / y).powi(2) + (t12 / a.s).powi(2);
    index.max(0.0)
}

/// Evaluate ply failure indices
///
/// # Arguments
/// * `ply_results` - Ply states in stacking order
/// * `criterion` - Failure criterion
/// * `allowables` - One entry applied to every ply, or one entry per ply
///
/// # Errors
///
/// `Configuration` if the allowables are mis-sized, non-positive, or lack the
/// strain limits the max-strain criterion needs.
pub fn evaluate_failure(
    ply_results: &[PlyResult],
    criterion: FailureCriterion,
    allowables: &[StrengthAllowables],
) -> CltResult<FailureReport> {
    if ply_results.is_empty() {
        return Err(CltError::Validation("no ply results to evaluate".into()));
    }
    if allowables.len() != 1 && allowables.len() != ply_results.len() {
        return Err(CltError::Configuration(format!(
            "expected 1 or {} allowables entries, got {}",
            ply_results.len(),
            allowables.len()
        )));
    }
    for a in allowables {
        a.validate()?;
    }

    let failure_indices = ply_results
        .iter()
        .enumerate()
        .map(|(k, ply)| -> CltResult<f64> {
            let a = allowables.get(k).unwrap_or(&allowables[0]);
            match criterion {
                FailureCriterion::MaxStress => Ok(max_stress_index(&ply.stress_material, a)),
                FailureCriterion::TsaiHill => Ok(tsai_hill_index(&ply.stress_material, a)),
                FailureCriterion::MaxStrain => {
                    let strain = a.strain.as_ref().ok_or_else(|| {
                        CltError::Configuration(format!(
                            "criterion {criterion} requires strain allowables (ply {k})"
                        ))
                    })?;
                    Ok(max_strain_index(&ply.strain_material, strain))
                }
            }
        })
        .collect::<CltResult<Vec<f64>>>()?;

    let (critical_ply, max_failure_index) = failure_indices
        .iter()
        .copied()
        .enumerate()
        .fold((0, failure_indices[0]), |best, (k, fi)| if fi > best.1 { (k, fi) } else { best });

    let failed_plies: Vec<usize> = failure_indices
        .iter()
        .enumerate()
        .filter(|(_, fi)| **fi >= 1.0)
        .map(|(k, _)| k)
        .collect();

    if !failed_plies.is_empty() {
        log::warn!(
            "{criterion}: {} of {} plies predicted to fail (max index {:.3} at ply {})",
            failed_plies.len(),
            failure_indices.len(),
            max_failure_index,
            critical_ply
        );
    }

    Ok(FailureReport {
        criterion,
        failure_indices,
        max_failure_index,
        critical_ply,
        failed_plies,
    })
}

/// Evaluate failure with the criterion given by its identifier
/// (`max_stress`, `max_strain` or `tsai_hill`)
pub fn evaluate_failure_by_name(
    ply_results: &[PlyResult],
    criterion: &str,
    allowables: &[StrengthAllowables],
) -> CltResult<FailureReport> {
    evaluate_failure(ply_results, criterion.parse()?, allowables)
}
