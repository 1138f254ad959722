//! CLT Solver - Classical Lamination Theory for fiber-reinforced laminates
//!
//! Given a stack of orthotropic plies this crate computes:
//! - Reduced and rotated ply stiffness (Q, Q̄)
//! - Laminate A, B, D stiffness matrices
//! - Homogenized in-plane engineering constants
//! - Mid-plane strain/curvature and per-ply stress/strain under applied resultants
//! - Ply failure indices (max stress, max strain, Tsai-Hill)
//!
//! All quantities are SI (Pa, m, N/m, N·m/m); angles are degrees.
//!
//! ## Example
//! ```rust
//! use clt_solver::prelude::*;
//!
//! let template = Ply::from_engineering_units(Material::carbon_t300(), 0.125, 0.0).unwrap();
//! let laminate = Laminate::symmetric(&template, &[0.0, 45.0, -45.0, 90.0]).unwrap();
//!
//! let props = effective_properties(&laminate).unwrap();
//! assert!((props.ex - props.ey).abs() / props.ex < 1e-6);
//!
//! let response = analyze_load(&laminate, &LoadState::nx(1000.0)).unwrap();
//! let allowables = [StrengthAllowables::from_mpa(1500.0, 1200.0, 50.0, 250.0, 70.0)];
//! let report = evaluate_failure(&response.plies, FailureCriterion::TsaiHill, &allowables).unwrap();
//! assert!(!report.has_failure());
//! ```

pub mod analysis;
pub mod elements;
pub mod error;
pub mod loads;
pub mod math;
pub mod model;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{
        analyze_load, effective_properties, evaluate_failure, evaluate_failure_by_name, ply_state, solve,
        AnalysisOptions, FailureCriterion, StrainAllowables, StrengthAllowables,
    };
    pub use crate::elements::{Laminate, Material, MaterialLibrary, Ply};
    pub use crate::error::{CltError, CltResult, ErrorKind};
    pub use crate::loads::LoadState;
    pub use crate::math::AbdMatrices;
    pub use crate::model::{analyze_laminate, LayupModel, PlyDefinition};
    pub use crate::results::{
        EffectiveProperties, FailureReport, LaminateReport, LoadResponse, MidplaneResponse, PlyResult,
    };
}
