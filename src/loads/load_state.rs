//! Force/moment resultants per unit width applied to a laminate

use serde::{Deserialize, Serialize};

use crate::math::Vec6;

/// Resultants applied at the laminate midplane
///
/// Components left out of a JSON payload default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadState {
    /// Force resultant in X (N/m)
    pub nx: f64,
    /// Force resultant in Y (N/m)
    pub ny: f64,
    /// In-plane shear resultant (N/m)
    pub nxy: f64,
    /// Moment resultant about Y, bending in X (N·m/m)
    pub mx: f64,
    /// Moment resultant, bending in Y (N·m/m)
    pub my: f64,
    /// Twisting moment resultant (N·m/m)
    pub mxy: f64,
}

impl LoadState {
    /// Create a load state with all components
    pub fn new(nx: f64, ny: f64, nxy: f64, mx: f64, my: f64, mxy: f64) -> Self {
        Self {
            nx,
            ny,
            nxy,
            mx,
            my,
            mxy,
        }
    }

    /// Create a membrane-only load state
    pub fn force(nx: f64, ny: f64, nxy: f64) -> Self {
        Self::new(nx, ny, nxy, 0.0, 0.0, 0.0)
    }

    /// Create a bending-only load state
    pub fn moment(mx: f64, my: f64, mxy: f64) -> Self {
        Self::new(0.0, 0.0, 0.0, mx, my, mxy)
    }

    /// Pure axial load in X
    pub fn nx(value: f64) -> Self {
        Self::force(value, 0.0, 0.0)
    }

    /// Pure axial load in Y
    pub fn ny(value: f64) -> Self {
        Self::force(0.0, value, 0.0)
    }

    /// Pure in-plane shear
    pub fn nxy(value: f64) -> Self {
        Self::force(0.0, 0.0, value)
    }

    /// Pure bending moment Mx
    pub fn mx(value: f64) -> Self {
        Self::moment(value, 0.0, 0.0)
    }

    /// Create from array [Nx, Ny, Nxy, Mx, My, Mxy]
    pub fn from_array(arr: [f64; 6]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3], arr[4], arr[5])
    }

    /// Stack into the right-hand side [N; M] of the laminate system
    pub fn as_vector(&self) -> Vec6 {
        Vec6::new(self.nx, self.ny, self.nxy, self.mx, self.my, self.mxy)
    }

    /// Scale the load by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.nx * factor,
            self.ny * factor,
            self.nxy * factor,
            self.mx * factor,
            self.my * factor,
            self.mxy * factor,
        )
    }

    pub fn is_zero(&self) -> bool {
        self.as_vector().iter().all(|v| *v == 0.0)
    }
}
