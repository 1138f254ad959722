//! A single lamina: material, thickness and fiber orientation

use serde::{Deserialize, Serialize};

use super::Material;
use crate::error::{CltError, CltResult};
use crate::math::{self, Mat3};

const MM: f64 = 1e-3;

/// One ply of a laminate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ply {
    /// Material properties (SI)
    pub material: Material,
    /// Thickness in m
    pub thickness: f64,
    /// Fiber angle from the laminate x-axis in degrees
    pub orientation: f64,
    /// Optional label used in reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Ply {
    /// Create a new ply
    ///
    /// # Arguments
    /// * `material` - Orthotropic material
    /// * `thickness` - Ply thickness (m, > 0)
    /// * `orientation` - Fiber angle (degrees, any real value)
    pub fn new(material: Material, thickness: f64, orientation: f64) -> CltResult<Self> {
        let ply = Self {
            material,
            thickness,
            orientation,
            name: None,
        };
        ply.validate()?;
        Ok(ply)
    }

    /// Create a ply with thickness given in mm
    pub fn from_engineering_units(material: Material, thickness_mm: f64, orientation: f64) -> CltResult<Self> {
        Self::new(material, thickness_mm * MM, orientation)
    }

    /// Set the ply label
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Override the material density (kg/m³)
    pub fn with_density(mut self, density: f64) -> CltResult<Self> {
        self.material = self.material.with_density(density)?;
        Ok(self)
    }

    /// Copy of this ply at another fiber angle
    pub fn with_orientation(&self, orientation: f64) -> Self {
        Self {
            orientation,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> CltResult<()> {
        if !(self.thickness > 0.0 && self.thickness.is_finite()) {
            return Err(CltError::Validation(format!(
                "ply thickness must be positive, got {}",
                self.thickness
            )));
        }
        if !self.orientation.is_finite() {
            return Err(CltError::Validation(format!(
                "ply orientation must be finite, got {}",
                self.orientation
            )));
        }
        self.material.validate()
    }

    /// Minor Poisson's ratio
    pub fn nu21(&self) -> f64 {
        self.material.nu21()
    }

    pub fn density(&self) -> f64 {
        self.material.density
    }

    /// Orientation mapped into (-180°, 180°]
    pub fn normalized_orientation(&self) -> f64 {
        let wrapped = self.orientation.rem_euclid(360.0);
        if wrapped > 180.0 {
            wrapped - 360.0
        } else {
            wrapped
        }
    }

    /// Reduced stiffness Q in material axes
    pub fn reduced_stiffness(&self) -> CltResult<Mat3> {
        let m = &self.material;
        math::reduced_stiffness(m.e11, m.e22, m.nu12, m.g12)
    }

    /// Stress rotation T for this ply's orientation
    pub fn rotation_transform(&self) -> Mat3 {
        math::rotation_transform(self.orientation)
    }

    /// Rotated stiffness Q̄ in laminate axes
    pub fn rotated_stiffness(&self) -> CltResult<Mat3> {
        Ok(math::rotated_stiffness(&self.reduced_stiffness()?, self.orientation))
    }
}
