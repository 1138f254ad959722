//! Orthotropic ply materials and the preset library

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CltError, CltResult};

/// Density used when a material is defined without one (kg/m³)
pub const DEFAULT_DENSITY: f64 = 1600.0;

const GPA: f64 = 1e9;

/// Orthotropic lamina material properties in SI units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Longitudinal (fiber direction) modulus in Pa
    pub e11: f64,
    /// Transverse modulus in Pa
    pub e22: f64,
    /// Major Poisson's ratio
    pub nu12: f64,
    /// In-plane shear modulus in Pa
    pub g12: f64,
    /// Density in kg/m³
    pub density: f64,
}

impl Material {
    /// Create a new orthotropic material from SI values
    ///
    /// # Errors
    ///
    /// Returns a validation error if any modulus is non-positive or the
    /// Poisson combination is not admissible (|ν12·ν21| ≥ 1).
    pub fn new(e11: f64, e22: f64, nu12: f64, g12: f64) -> CltResult<Self> {
        let material = Self {
            e11,
            e22,
            nu12,
            g12,
            density: DEFAULT_DENSITY,
        };
        material.validate()?;
        Ok(material)
    }

    /// Create a material from GPa moduli
    pub fn from_engineering_units(e11_gpa: f64, e22_gpa: f64, nu12: f64, g12_gpa: f64) -> CltResult<Self> {
        Self::new(e11_gpa * GPA, e22_gpa * GPA, nu12, g12_gpa * GPA)
    }

    /// Set the density (kg/m³)
    pub fn with_density(mut self, density: f64) -> CltResult<Self> {
        if !(density > 0.0 && density.is_finite()) {
            return Err(CltError::Validation(format!(
                "density must be positive, got {density}"
            )));
        }
        self.density = density;
        Ok(self)
    }

    /// Minor Poisson's ratio ν21 = ν12·E22/E11
    pub fn nu21(&self) -> f64 {
        self.nu12 * self.e22 / self.e11
    }

    /// Check the orthotropic admissibility conditions
    pub fn validate(&self) -> CltResult<()> {
        for (label, value) in [("E11", self.e11), ("E22", self.e22), ("G12", self.g12)] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(CltError::Validation(format!(
                    "{label} must be positive and finite, got {value}"
                )));
            }
        }
        if !self.nu12.is_finite() || (self.nu12 * self.nu21()).abs() >= 1.0 {
            return Err(CltError::Validation(format!(
                "non-physical Poisson combination: nu12 = {}, nu21 = {}",
                self.nu12,
                self.nu21()
            )));
        }
        if !(self.density > 0.0 && self.density.is_finite()) {
            return Err(CltError::Validation(format!(
                "density must be positive, got {}",
                self.density
            )));
        }
        Ok(())
    }
}

/// Common material presets.
impl Material {
    /// T300 carbon/epoxy (E11 = 138 GPa, E22 = 9 GPa, ν12 = 0.3, G12 = 6.9 GPa, ρ = 1600 kg/m³)
    pub fn carbon_t300() -> Self {
        Self {
            e11: 138.0 * GPA,
            e22: 9.0 * GPA,
            nu12: 0.3,
            g12: 6.9 * GPA,
            density: 1600.0,
        }
    }

    /// E-glass/epoxy (E11 = 45 GPa, E22 = 12 GPa, ν12 = 0.3, G12 = 5.5 GPa, ρ = 2000 kg/m³)
    pub fn glass_e() -> Self {
        Self {
            e11: 45.0 * GPA,
            e22: 12.0 * GPA,
            nu12: 0.3,
            g12: 5.5 * GPA,
            density: 2000.0,
        }
    }

    /// Kevlar 49/epoxy (E11 = 76 GPa, E22 = 5.5 GPa, ν12 = 0.34, G12 = 2.1 GPa, ρ = 1440 kg/m³)
    pub fn kevlar_49() -> Self {
        Self {
            e11: 76.0 * GPA,
            e22: 5.5 * GPA,
            nu12: 0.34,
            g12: 2.1 * GPA,
            density: 1440.0,
        }
    }
}

/// Static registry the preset library is populated from
const PRESETS: &[(&str, fn() -> Material)] = &[
    ("carbon_t300", Material::carbon_t300),
    ("glass_e", Material::glass_e),
    ("kevlar_49", Material::kevlar_49),
];

/// Name → material lookup table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialLibrary {
    materials: BTreeMap<String, Material>,
}

impl MaterialLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a library holding the built-in presets
    pub fn with_presets() -> Self {
        let materials = PRESETS
            .iter()
            .map(|(name, make)| (name.to_string(), make()))
            .collect();
        Self { materials }
    }

    /// Add a material, rejecting duplicate names
    pub fn insert(&mut self, name: &str, material: Material) -> CltResult<()> {
        if self.materials.contains_key(name) {
            return Err(CltError::Validation(format!(
                "material '{name}' already exists"
            )));
        }
        material.validate()?;
        self.materials.insert(name.to_string(), material);
        Ok(())
    }

    /// Look up a material by name
    pub fn get(&self, name: &str) -> CltResult<&Material> {
        self.materials
            .get(name)
            .ok_or_else(|| CltError::Configuration(format!("material '{name}' not found")))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.materials.contains_key(name)
    }

    /// Material names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.materials.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Material)> {
        self.materials.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
