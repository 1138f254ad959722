//! Mathematical utilities for lamination theory calculations

pub mod abd;

use nalgebra::{Matrix3, Matrix6, Vector3, Vector6};

use crate::error::{CltError, CltResult};

pub type Mat3 = Matrix3<f64>;
pub type Mat6 = Matrix6<f64>;
pub type Vec3 = Vector3<f64>;
pub type Vec6 = Vector6<f64>;

pub use abd::{assemble_abd, AbdMatrices};

/// Compute the reduced (plane stress) stiffness matrix of an orthotropic ply
/// in its material axes
///
/// # Arguments
/// * `e11` - Longitudinal modulus
/// * `e22` - Transverse modulus
/// * `nu12` - Major Poisson's ratio
/// * `g12` - In-plane shear modulus
///
/// # Returns
/// 3x3 matrix Q such that [σ1, σ2, τ12] = Q * [ε1, ε2, γ12]
pub fn reduced_stiffness(e11: f64, e22: f64, nu12: f64, g12: f64) -> CltResult<Mat3> {
    let nu21 = nu12 * e22 / e11;
    let denom = 1.0 - nu12 * nu21;

    if !(denom > 0.0) {
        return Err(CltError::Validation(format!(
            "non-physical Poisson combination: 1 - nu12*nu21 = {denom} (nu12 = {nu12}, nu21 = {nu21})"
        )));
    }

    let q11 = e11 / denom;
    let q22 = e22 / denom;
    let q12 = nu12 * e22 / denom;

    #[rustfmt::skip]
    let q = Mat3::new(
        q11, q12, 0.0,
        q12, q22, 0.0,
        0.0, 0.0, g12,
    );
    Ok(q)
}

/// Stress rotation matrix for a fiber orientation
///
/// Maps global [σx, σy, τxy] to material [σ1, σ2, τ12].
///
/// # Arguments
/// * `theta` - Fiber angle from the laminate x-axis (degrees)
pub fn rotation_transform(theta: f64) -> Mat3 {
    let (s, c) = theta.to_radians().sin_cos();
    let (c2, s2, cs) = (c * c, s * s, c * s);

    #[rustfmt::skip]
    let t = Mat3::new(
        c2,  s2,  2.0 * cs,
        s2,  c2,  -2.0 * cs,
        -cs, cs,  c2 - s2,
    );
    t
}

/// Inverse of [`rotation_transform`]
///
/// A rotation by -θ undoes a rotation by θ, so no numerical inversion is needed.
pub fn inverse_rotation_transform(theta: f64) -> Mat3 {
    rotation_transform(-theta)
}

/// Strain rotation matrix for engineering shear strain
///
/// Maps global [εx, εy, γxy] to material [ε1, ε2, γ12]. Equal to R·T·R⁻¹ with
/// R = diag(1, 1, 2), i.e. the stress rotation re-expressed for γ = 2ε.
pub fn strain_transform(theta: f64) -> Mat3 {
    let (s, c) = theta.to_radians().sin_cos();
    let (c2, s2, cs) = (c * c, s * s, c * s);

    #[rustfmt::skip]
    let t = Mat3::new(
        c2,        s2,       cs,
        s2,        c2,       -cs,
        -2.0 * cs, 2.0 * cs, c2 - s2,
    );
    t
}

/// Rotate a material-axis stiffness into laminate axes: Q̄ = T⁻¹ · Q · T_ε
pub fn rotated_stiffness(q: &Mat3, theta: f64) -> Mat3 {
    inverse_rotation_transform(theta) * q * strain_transform(theta)
}

/// Solve the 6x6 laminate system using LU decomposition
pub fn solve_linear_system(a: &Mat6, b: &Vec6) -> Option<Vec6> {
    a.lu().solve(b).filter(|x| x.iter().all(|v| v.is_finite()))
}

/// Invert a 6x6 matrix, rejecting results that are not finite
pub fn invert(a: &Mat6) -> Option<Mat6> {
    a.try_inverse().filter(|inv| inv.iter().all(|v| v.is_finite()))
}

/// Largest absolute entry of a 3x3 block
pub fn max_abs(m: &Mat3) -> f64 {
    m.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const E11: f64 = 138e9;
    const E22: f64 = 9e9;
    const NU12: f64 = 0.3;
    const G12: f64 = 6.9e9;

    #[test]
    fn test_reduced_stiffness_values() {
        let q = reduced_stiffness(E11, E22, NU12, G12).unwrap();
        let nu21 = NU12 * E22 / E11;
        let denom = 1.0 - NU12 * nu21;

        assert_relative_eq!(q[(0, 0)], E11 / denom, max_relative = 1e-12);
        assert_relative_eq!(q[(1, 1)], E22 / denom, max_relative = 1e-12);
        assert_relative_eq!(q[(0, 1)], NU12 * E22 / denom, max_relative = 1e-12);
        assert_eq!(q[(0, 2)], 0.0);
        assert_eq!(q[(1, 2)], 0.0);
        assert_eq!(q[(2, 2)], G12);
    }

    #[test]
    fn test_reduced_stiffness_rejects_non_physical_poisson() {
        // nu12 * nu21 = 3.0 * 3.0 > 1
        assert!(reduced_stiffness(10e9, 10e9, 3.0, 4e9).is_err());
    }

    #[test]
    fn test_zero_angle_is_identity() {
        assert_eq!(rotation_transform(0.0), Mat3::identity());
        assert_eq!(strain_transform(0.0), Mat3::identity());

        let q = reduced_stiffness(E11, E22, NU12, G12).unwrap();
        assert_eq!(rotated_stiffness(&q, 0.0), q);
    }

    #[test]
    fn test_inverse_rotation() {
        for theta in [15.0, 30.0, 45.0, -60.0, 90.0, 137.0] {
            let product = rotation_transform(theta) * inverse_rotation_transform(theta);
            for i in 0..3 {
                for j in 0..3 {
                    let expected = if i == j { 1.0 } else { 0.0 };
                    assert_relative_eq!(product[(i, j)], expected, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_rotated_stiffness_symmetry() {
        let q = reduced_stiffness(E11, E22, NU12, G12).unwrap();
        for theta in [10.0, 30.0, 45.0, -45.0, 75.0, 90.0] {
            let q_bar = rotated_stiffness(&q, theta);
            for i in 0..3 {
                for j in 0..3 {
                    assert_relative_eq!(q_bar[(i, j)], q_bar[(j, i)], max_relative = 1e-10, epsilon = 1e-3);
                }
            }
        }
    }

    #[test]
    fn test_rotated_stiffness_at_ninety_swaps_axes() {
        let q = reduced_stiffness(E11, E22, NU12, G12).unwrap();
        let q_bar = rotated_stiffness(&q, 90.0);
        assert_relative_eq!(q_bar[(0, 0)], q[(1, 1)], max_relative = 1e-9);
        assert_relative_eq!(q_bar[(1, 1)], q[(0, 0)], max_relative = 1e-9);
        assert_relative_eq!(q_bar[(2, 2)], q[(2, 2)], max_relative = 1e-9);
    }

    #[test]
    fn test_rotated_stiffness_half_turn_periodic() {
        let q = reduced_stiffness(E11, E22, NU12, G12).unwrap();
        let a = rotated_stiffness(&q, 30.0);
        let b = rotated_stiffness(&q, 210.0);
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(a[(i, j)], b[(i, j)], max_relative = 1e-9, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn test_singular_system_returns_none() {
        let a = Mat6::zeros();
        let b = Vec6::repeat(1.0);
        assert!(solve_linear_system(&a, &b).is_none());
        assert!(invert(&a).is_none());
    }
}
