//! Through-thickness integration of ply stiffness into the A, B, D blocks

use serde::{Deserialize, Serialize};

use super::{max_abs, Mat3, Mat6};
use crate::elements::Laminate;
use crate::error::CltResult;

/// Extensional (A), coupling (B) and bending (D) stiffness of a laminate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbdMatrices {
    /// Extensional stiffness (N/m)
    pub a: Mat3,
    /// Bending-extension coupling (N)
    pub b: Mat3,
    /// Bending stiffness (N·m)
    pub d: Mat3,
}

impl AbdMatrices {
    /// Block-concatenate into the 6x6 matrix [[A, B], [B, D]]
    pub fn abd(&self) -> Mat6 {
        let mut abd = Mat6::zeros();
        abd.fixed_view_mut::<3, 3>(0, 0).copy_from(&self.a);
        abd.fixed_view_mut::<3, 3>(0, 3).copy_from(&self.b);
        abd.fixed_view_mut::<3, 3>(3, 0).copy_from(&self.b);
        abd.fixed_view_mut::<3, 3>(3, 3).copy_from(&self.d);
        abd
    }

    /// Ratio max|B| / max|A|; zero for a laminate without bending-extension coupling
    pub fn coupling_ratio(&self) -> f64 {
        let a_max = max_abs(&self.a);
        if a_max > 0.0 {
            max_abs(&self.b) / a_max
        } else {
            0.0
        }
    }
}

/// Assemble A, B and D for a laminate
///
/// For ply k between `z_bottom` and `z_top`:
/// - A += Q̄ (z_top - z_bottom)
/// - B += Q̄ (z_top² - z_bottom²) / 2
/// - D += Q̄ (z_top³ - z_bottom³) / 3
pub fn assemble_abd(laminate: &Laminate) -> CltResult<AbdMatrices> {
    let mut a = Mat3::zeros();
    let mut b = Mat3::zeros();
    let mut d = Mat3::zeros();

    for (ply, (z_bottom, z_top)) in laminate.plies().iter().zip(laminate.z_bounds()) {
        let q_bar = ply.rotated_stiffness()?;

        a += q_bar * (z_top - z_bottom);
        b += q_bar * ((z_top.powi(2) - z_bottom.powi(2)) / 2.0);
        d += q_bar * ((z_top.powi(3) - z_bottom.powi(3)) / 3.0);
    }

    log::debug!(
        "Assembled ABD for {} plies (h = {:e} m, |B|/|A| = {:e})",
        laminate.len(),
        laminate.total_thickness(),
        max_abs(&b) / max_abs(&a).max(f64::MIN_POSITIVE)
    );

    Ok(AbdMatrices { a, b, d })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Material, Ply};
    use approx::assert_relative_eq;

    fn carbon_ply(thickness: f64, orientation: f64) -> Ply {
        Ply::new(Material::carbon_t300(), thickness, orientation).unwrap()
    }

    fn assert_symmetric(m: &Mat6) {
        let scale = m.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        for i in 0..6 {
            for j in 0..6 {
                assert!(
                    (m[(i, j)] - m[(j, i)]).abs() <= 1e-12 * scale,
                    "ABD[{},{}] = {} vs ABD[{},{}] = {}",
                    i, j, m[(i, j)], j, i, m[(j, i)]
                );
            }
        }
    }

    #[test]
    fn test_single_ply_blocks() {
        let t = 1e-3;
        let ply = carbon_ply(t, 0.0);
        let q = ply.reduced_stiffness().unwrap();
        let laminate = Laminate::new(vec![ply]).unwrap();
        let abd = assemble_abd(&laminate).unwrap();

        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(abd.a[(i, j)], q[(i, j)] * t, max_relative = 1e-12);
                assert_relative_eq!(abd.d[(i, j)], q[(i, j)] * t.powi(3) / 12.0, max_relative = 1e-12);
                assert_eq!(abd.b[(i, j)], 0.0);
            }
        }
    }

    #[test]
    fn test_thickness_scaling() {
        let s = 2.5;
        let thin = Laminate::new(vec![carbon_ply(0.2e-3, 30.0)]).unwrap();
        let thick = Laminate::new(vec![carbon_ply(0.2e-3 * s, 30.0)]).unwrap();
        let abd_thin = assemble_abd(&thin).unwrap();
        let abd_thick = assemble_abd(&thick).unwrap();

        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(abd_thick.a[(i, j)], abd_thin.a[(i, j)] * s, max_relative = 1e-9, epsilon = 1e-6);
                assert_relative_eq!(abd_thick.d[(i, j)], abd_thin.d[(i, j)] * s.powi(3), max_relative = 1e-9, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_abd_symmetry_unsymmetric_layup() {
        let laminate = Laminate::new(vec![
            carbon_ply(0.1e-3, 0.0),
            carbon_ply(0.2e-3, 30.0),
            carbon_ply(0.15e-3, -60.0),
            carbon_ply(0.1e-3, 90.0),
        ])
        .unwrap();
        let abd = assemble_abd(&laminate).unwrap();
        assert_symmetric(&abd.abd());
        assert!(abd.coupling_ratio() > 1e-6, "unsymmetric layup should couple");
    }

    #[test]
    fn test_symmetric_layup_has_no_coupling() {
        let template = carbon_ply(0.125e-3, 0.0);
        let laminate = Laminate::symmetric(&template, &[0.0, 45.0, -45.0, 90.0, 30.0]).unwrap();
        let abd = assemble_abd(&laminate).unwrap();
        assert!(abd.coupling_ratio() < 1e-9, "coupling ratio {}", abd.coupling_ratio());
    }

    #[test]
    fn test_block_layout() {
        let laminate = Laminate::new(vec![carbon_ply(0.1e-3, 0.0), carbon_ply(0.1e-3, 90.0)]).unwrap();
        let abd = assemble_abd(&laminate).unwrap();
        let full = abd.abd();
        assert_eq!(full[(0, 0)], abd.a[(0, 0)]);
        assert_eq!(full[(0, 3)], abd.b[(0, 0)]);
        assert_eq!(full[(3, 0)], abd.b[(0, 0)]);
        assert_eq!(full[(5, 5)], abd.d[(2, 2)]);
    }
}
