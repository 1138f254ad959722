//! Result types for laminate analysis

use serde::{Deserialize, Serialize};

use crate::analysis::FailureCriterion;
use crate::math::{AbdMatrices, Vec3};

const GPA: f64 = 1e9;
const MPA: f64 = 1e6;

/// Homogenized (smeared) engineering constants of a laminate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveProperties {
    /// Effective modulus in X (Pa)
    pub ex: f64,
    /// Effective modulus in Y (Pa)
    pub ey: f64,
    /// Effective in-plane Poisson's ratio
    pub nu_xy: f64,
    /// Effective in-plane shear modulus (Pa)
    pub gxy: f64,
    /// Total thickness (m)
    pub thickness: f64,
    /// Thickness-weighted average density (kg/m³)
    pub density: f64,
    /// Areal mass (kg/m²)
    pub mass_per_area: f64,
}

impl EffectiveProperties {
    pub fn ex_gpa(&self) -> f64 {
        self.ex / GPA
    }

    pub fn ey_gpa(&self) -> f64 {
        self.ey / GPA
    }

    pub fn gxy_gpa(&self) -> f64 {
        self.gxy / GPA
    }

    pub fn thickness_mm(&self) -> f64 {
        self.thickness * 1e3
    }
}

/// Mid-plane deformation of a loaded laminate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MidplaneResponse {
    /// Mid-plane strain [εx, εy, γxy]
    pub strain: Vec3,
    /// Curvature [κx, κy, κxy] (1/m)
    pub curvature: Vec3,
}

impl MidplaneResponse {
    /// Global strain at a through-thickness coordinate: ε₀ + z·κ
    pub fn strain_at(&self, z: f64) -> Vec3 {
        self.strain + self.curvature * z
    }
}

/// Strain and stress state of one ply, evaluated at its mid-thickness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlyResult {
    /// Stacking index (0 = bottom)
    pub index: usize,
    /// Ply label, "Ply N" (1-based) when the ply has no name
    pub name: String,
    /// Fiber angle (degrees)
    pub orientation: f64,
    /// Mid-thickness coordinate (m)
    pub z_mid: f64,
    /// [ε1, ε2, γ12] in material axes
    pub strain_material: Vec3,
    /// [εx, εy, γxy] in laminate axes
    pub strain_global: Vec3,
    /// [σ1, σ2, τ12] in material axes (Pa)
    pub stress_material: Vec3,
    /// [σx, σy, τxy] in laminate axes (Pa)
    pub stress_global: Vec3,
}

impl PlyResult {
    pub fn stress_material_mpa(&self) -> Vec3 {
        self.stress_material / MPA
    }

    pub fn stress_global_mpa(&self) -> Vec3 {
        self.stress_global / MPA
    }

    pub fn z_mid_mm(&self) -> f64 {
        self.z_mid * 1e3
    }
}

/// Mid-plane response together with the per-ply states it produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadResponse {
    pub midplane: MidplaneResponse,
    pub plies: Vec<PlyResult>,
}

/// Outcome of a failure evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureReport {
    /// Criterion the indices were computed with
    pub criterion: FailureCriterion,
    /// Failure index per ply, in stacking order
    pub failure_indices: Vec<f64>,
    /// Largest index over all plies
    pub max_failure_index: f64,
    /// Ply attaining the largest index (lowest stacking index on ties)
    pub critical_ply: usize,
    /// Plies with index >= 1.0, ascending stacking order
    pub failed_plies: Vec<usize>,
}

impl FailureReport {
    pub fn has_failure(&self) -> bool {
        !self.failed_plies.is_empty()
    }

    /// Load multiplier at which the critical ply reaches index 1.0,
    /// for criteria whose index scales linearly with the load
    pub fn reserve_factor(&self) -> Option<f64> {
        match self.criterion {
            FailureCriterion::MaxStress | FailureCriterion::MaxStrain if self.max_failure_index > 0.0 => {
                Some(1.0 / self.max_failure_index)
            }
            FailureCriterion::TsaiHill if self.max_failure_index > 0.0 => {
                Some(1.0 / self.max_failure_index.sqrt())
            }
            _ => None,
        }
    }
}

/// Everything computed for one laminate under one load state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaminateReport {
    pub abd: AbdMatrices,
    pub effective: EffectiveProperties,
    pub response: LoadResponse,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureReport>,
}
