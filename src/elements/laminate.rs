//! Ordered ply stack sharing a common midplane

use serde::{Deserialize, Serialize};

use super::Ply;
use crate::error::{CltError, CltResult};
use crate::math::{self, AbdMatrices};

/// An immutable laminate
///
/// Ply 0 is the bottom of the stack. Through-thickness coordinates start at
/// -h/2 and the last ply ends at +h/2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Ply>", into = "Vec<Ply>")]
pub struct Laminate {
    plies: Vec<Ply>,
    total_thickness: f64,
}

impl Laminate {
    /// Create a laminate from plies in stacking order
    ///
    /// # Errors
    ///
    /// Returns a validation error if `plies` is empty or any ply is invalid.
    pub fn new(plies: Vec<Ply>) -> CltResult<Self> {
        if plies.is_empty() {
            return Err(CltError::Validation(
                "laminate must contain at least one ply".into(),
            ));
        }
        for (k, ply) in plies.iter().enumerate() {
            ply.validate()
                .map_err(|e| CltError::Validation(format!("ply {k}: {e}")))?;
        }

        let total_thickness = plies.iter().map(|p| p.thickness).sum();
        Ok(Self {
            plies,
            total_thickness,
        })
    }

    /// Create a mirror-symmetric laminate
    ///
    /// The stack is `template` at each of `orientations`, followed by the same
    /// orientations in reverse order.
    pub fn symmetric(template: &Ply, orientations: &[f64]) -> CltResult<Self> {
        let plies = orientations
            .iter()
            .chain(orientations.iter().rev())
            .map(|&theta| template.with_orientation(theta))
            .collect();
        Self::new(plies)
    }

    pub fn plies(&self) -> &[Ply] {
        &self.plies
    }

    pub fn ply(&self, index: usize) -> Option<&Ply> {
        self.plies.get(index)
    }

    pub fn len(&self) -> usize {
        self.plies.len()
    }

    /// Always false for a constructed laminate
    pub fn is_empty(&self) -> bool {
        self.plies.is_empty()
    }

    /// Total thickness h (m)
    pub fn total_thickness(&self) -> f64 {
        self.total_thickness
    }

    /// Ply interface coordinates, bottom to top (len = plies + 1)
    pub fn z_coordinates(&self) -> Vec<f64> {
        let half = self.total_thickness / 2.0;
        let mut z = Vec::with_capacity(self.plies.len() + 1);
        z.push(-half);

        let mut current = -half;
        for ply in &self.plies[..self.plies.len() - 1] {
            current += ply.thickness;
            z.push(current);
        }
        // snapped so the stack tiles [-h/2, h/2] exactly
        z.push(half);
        z
    }

    /// (z_bottom, z_top) of every ply in stacking order
    pub fn z_bounds(&self) -> Vec<(f64, f64)> {
        self.z_coordinates().windows(2).map(|w| (w[0], w[1])).collect()
    }

    /// Mid-thickness coordinate of every ply
    pub fn z_midpoints(&self) -> Vec<f64> {
        self.z_bounds()
            .into_iter()
            .map(|(bottom, top)| (bottom + top) / 2.0)
            .collect()
    }

    /// Thickness-weighted average density (kg/m³)
    pub fn average_density(&self) -> f64 {
        self.plies
            .iter()
            .map(|p| p.density() * p.thickness)
            .sum::<f64>()
            / self.total_thickness
    }

    /// Areal mass (kg/m²)
    pub fn mass_per_area(&self) -> f64 {
        self.plies.iter().map(|p| p.density() * p.thickness).sum()
    }

    /// Whether the stack mirrors about the midplane in material, thickness
    /// and orientation
    pub fn is_symmetric(&self) -> bool {
        let n = self.plies.len();
        (0..n / 2).all(|k| {
            let (lower, upper) = (&self.plies[k], &self.plies[n - 1 - k]);
            lower.material == upper.material
                && lower.thickness == upper.thickness
                && lower.normalized_orientation() == upper.normalized_orientation()
        })
    }

    /// Assemble the A, B, D stiffness blocks
    pub fn abd(&self) -> CltResult<AbdMatrices> {
        math::assemble_abd(self)
    }
}

impl TryFrom<Vec<Ply>> for Laminate {
    type Error = CltError;

    fn try_from(plies: Vec<Ply>) -> CltResult<Self> {
        Self::new(plies)
    }
}

impl From<Laminate> for Vec<Ply> {
    fn from(laminate: Laminate) -> Self {
        laminate.plies
    }
}
