//! Layup model - named materials plus a ply sequence, built into a laminate

use serde::{Deserialize, Serialize};

use crate::analysis::{analyze_load, effective_properties, evaluate_failure, AnalysisOptions, StrengthAllowables};
use crate::elements::{Laminate, Material, MaterialLibrary, Ply};
use crate::error::{CltError, CltResult};
use crate::loads::LoadState;
use crate::results::LaminateReport;

/// One entry of a ply sequence, referring to a material by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlyDefinition {
    /// Material name in the model's library
    pub material: String,
    /// Thickness in mm
    pub thickness_mm: f64,
    /// Fiber angle in degrees
    pub orientation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PlyDefinition {
    pub fn new(material: &str, thickness_mm: f64, orientation: f64) -> Self {
        Self {
            material: material.to_string(),
            thickness_mm,
            orientation,
            name: None,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}

/// A laminate described as a sequence of plies over a material library
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayupModel {
    /// Materials available to the plies
    pub materials: MaterialLibrary,
    /// Ply sequence, bottom to top
    pub plies: Vec<PlyDefinition>,
}

impl LayupModel {
    /// Create a new model with an empty material library
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new model seeded with the preset materials
    pub fn with_presets() -> Self {
        Self {
            materials: MaterialLibrary::with_presets(),
            plies: Vec::new(),
        }
    }

    /// Add a material to the model
    pub fn add_material(&mut self, name: &str, material: Material) -> CltResult<()> {
        self.materials.insert(name, material)
    }

    /// Append a ply to the top of the sequence
    pub fn add_ply(&mut self, ply: PlyDefinition) -> CltResult<()> {
        if !self.materials.contains(&ply.material) {
            return Err(CltError::Configuration(format!(
                "material '{}' not found",
                ply.material
            )));
        }
        self.plies.push(ply);
        Ok(())
    }

    /// Append the current sequence in reverse, making the layup symmetric
    pub fn mirror(&mut self) {
        let reversed: Vec<PlyDefinition> = self.plies.iter().rev().cloned().collect();
        self.plies.extend(reversed);
    }

    /// Resolve materials and build the laminate
    pub fn build(&self) -> CltResult<Laminate> {
        let plies = self
            .plies
            .iter()
            .map(|def| -> CltResult<Ply> {
                let material = *self.materials.get(&def.material)?;
                let ply = Ply::from_engineering_units(material, def.thickness_mm, def.orientation)?;
                Ok(match &def.name {
                    Some(name) => ply.with_name(name),
                    None => ply,
                })
            })
            .collect::<CltResult<Vec<Ply>>>()?;
        Laminate::new(plies)
    }

    /// Build the laminate and run the full analysis
    pub fn analyze(
        &self,
        load: &LoadState,
        allowables: &[StrengthAllowables],
        options: &AnalysisOptions,
    ) -> CltResult<LaminateReport> {
        analyze_laminate(&self.build()?, load, allowables, options)
    }
}

/// Stiffness, homogenized properties, ply states and (optionally) failure
/// for one laminate under one load state
pub fn analyze_laminate(
    laminate: &Laminate,
    load: &LoadState,
    allowables: &[StrengthAllowables],
    options: &AnalysisOptions,
) -> CltResult<LaminateReport> {
    let abd = laminate.abd()?;
    if laminate.is_symmetric() && abd.coupling_ratio() > options.symmetry_tolerance {
        log::warn!(
            "Symmetric layup shows bending-extension coupling |B|/|A| = {:e}",
            abd.coupling_ratio()
        );
    }

    let effective = effective_properties(laminate)?;
    let response = analyze_load(laminate, load)?;
    let failure = options
        .criterion
        .map(|criterion| evaluate_failure(&response.plies, criterion, allowables))
        .transpose()?;

    Ok(LaminateReport {
        abd,
        effective,
        response,
        failure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::FailureCriterion;
    use crate::error::ErrorKind;
    use approx::assert_relative_eq;

    fn quasi_iso_model() -> LayupModel {
        let mut model = LayupModel::with_presets();
        for angle in [0.0, 45.0, -45.0, 90.0] {
            model.add_ply(PlyDefinition::new("carbon_t300", 0.125, angle)).unwrap();
        }
        model.mirror();
        model
    }

    #[test]
    fn test_unknown_material_rejected() {
        let mut model = LayupModel::with_presets();
        let err = model.add_ply(PlyDefinition::new("boron", 0.1, 0.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_empty_model_fails_to_build() {
        let err = LayupModel::with_presets().build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_mixed_material_sequence() {
        let mut model = LayupModel::with_presets();
        let custom = Material::from_engineering_units(200.0, 8.0, 0.3, 5.0)
            .unwrap()
            .with_density(1800.0)
            .unwrap();
        model.add_material("custom", custom).unwrap();
        model.add_ply(PlyDefinition::new("custom", 0.1, 0.0).with_name("Custom 0")).unwrap();
        model.add_ply(PlyDefinition::new("glass_e", 0.2, 45.0)).unwrap();
        model.add_ply(PlyDefinition::new("kevlar_49", 0.15, -45.0)).unwrap();

        let laminate = model.build().unwrap();
        assert_eq!(laminate.len(), 3);
        assert_eq!(laminate.plies()[0].name.as_deref(), Some("Custom 0"));
        assert_relative_eq!(laminate.total_thickness(), 0.45e-3, max_relative = 1e-12);
        assert_relative_eq!(laminate.plies()[0].density(), 1800.0);
    }

    #[test]
    fn test_full_analysis() {
        let model = quasi_iso_model();
        let allowables = [StrengthAllowables::from_mpa(1500.0, 1200.0, 50.0, 250.0, 70.0)];
        let options = AnalysisOptions::default().with_criterion(FailureCriterion::TsaiHill);

        let report = model.analyze(&LoadState::nx(1000.0), &allowables, &options).unwrap();
        assert!(report.abd.coupling_ratio() < 1e-9);
        assert_relative_eq!(report.effective.ex, report.effective.ey, max_relative = 1e-6);
        assert_eq!(report.response.plies.len(), 8);

        let failure = report.failure.unwrap();
        assert_eq!(failure.failure_indices.len(), 8);
        assert!(failure.failed_plies.is_empty());
    }

    #[test]
    fn test_analysis_without_criterion_skips_failure() {
        let report = quasi_iso_model()
            .analyze(&LoadState::nx(1000.0), &[], &AnalysisOptions::stiffness_only())
            .unwrap();
        assert!(report.failure.is_none());
    }
}
