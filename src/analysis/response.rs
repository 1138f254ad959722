//! Mid-plane response and ply stress/strain recovery

use crate::elements::Laminate;
use crate::error::{CltError, CltResult};
use crate::loads::LoadState;
use crate::math::{self, Vec3};
use crate::results::{LoadResponse, MidplaneResponse, PlyResult};

/// Solve ABD · [ε₀; κ] = [N; M] for the mid-plane strain and curvature
///
/// # Errors
///
/// `Numerical` if the ABD matrix is singular.
pub fn solve(laminate: &Laminate, load: &LoadState) -> CltResult<MidplaneResponse> {
    let abd = laminate.abd()?.abd();

    let x = math::solve_linear_system(&abd, &load.as_vector()).ok_or(CltError::Numerical {
        operation: "solve",
        thickness: laminate.total_thickness(),
    })?;

    Ok(MidplaneResponse {
        strain: Vec3::new(x[0], x[1], x[2]),
        curvature: Vec3::new(x[3], x[4], x[5]),
    })
}

/// Recover strain and stress at the mid-thickness of every ply
///
/// Returned in stacking order.
pub fn ply_state(laminate: &Laminate, response: &MidplaneResponse) -> CltResult<Vec<PlyResult>> {
    laminate
        .plies()
        .iter()
        .zip(laminate.z_midpoints())
        .enumerate()
        .map(|(index, (ply, z_mid))| -> CltResult<PlyResult> {
            let strain_global = response.strain_at(z_mid);
            let strain_material = math::strain_transform(ply.orientation) * strain_global;
            let stress_material = ply.reduced_stiffness()? * strain_material;
            let stress_global = math::inverse_rotation_transform(ply.orientation) * stress_material;

            Ok(PlyResult {
                index,
                name: ply
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("Ply {}", index + 1)),
                orientation: ply.orientation,
                z_mid,
                strain_material,
                strain_global,
                stress_material,
                stress_global,
            })
        })
        .collect()
}

/// Solve for the mid-plane response and recover all ply states
pub fn analyze_load(laminate: &Laminate, load: &LoadState) -> CltResult<LoadResponse> {
    let midplane = solve(laminate, load)?;
    let plies = ply_state(laminate, &midplane)?;
    log::debug!(
        "Load response: eps0 = [{:e}, {:e}, {:e}], kappa = [{:e}, {:e}, {:e}]",
        midplane.strain[0],
        midplane.strain[1],
        midplane.strain[2],
        midplane.curvature[0],
        midplane.curvature[1],
        midplane.curvature[2]
    );
    Ok(LoadResponse { midplane, plies })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Material, Ply};
    use crate::error::ErrorKind;
    use approx::assert_relative_eq;

    fn carbon(orientation: f64) -> Ply {
        Ply::from_engineering_units(Material::carbon_t300(), 0.125, orientation).unwrap()
    }

    #[test]
    fn test_zero_load_gives_zero_response() {
        let laminate = Laminate::new(vec![carbon(0.0), carbon(45.0)]).unwrap();
        let response = solve(&laminate, &LoadState::default()).unwrap();
        assert_eq!(response.strain, Vec3::zeros());
        assert_eq!(response.curvature, Vec3::zeros());
    }

    #[test]
    fn test_unidirectional_axial_load() {
        let mat = Material::carbon_t300();
        let laminate = Laminate::new(vec![carbon(0.0), carbon(0.0), carbon(0.0)]).unwrap();
        let h = laminate.total_thickness();
        let nx = 1000.0;

        let result = analyze_load(&laminate, &LoadState::nx(nx)).unwrap();
        assert_relative_eq!(result.midplane.strain[0], nx / (mat.e11 * h), max_relative = 1e-9);
        assert_relative_eq!(result.midplane.strain[1], -mat.nu12 * nx / (mat.e11 * h), max_relative = 1e-9);

        for ply in &result.plies {
            assert_relative_eq!(ply.stress_material[0], mat.e11 * ply.strain_material[0], max_relative = 1e-9);
            assert_relative_eq!(ply.stress_material[0], nx / h, max_relative = 1e-9);
            assert!(ply.stress_material[1].abs() < 1e-6 * nx / h);
        }
    }

    #[test]
    fn test_material_stress_follows_constitutive_law() {
        let template = carbon(0.0);
        let laminate = Laminate::symmetric(&template, &[0.0, 45.0, -45.0, 90.0]).unwrap();
        let result = analyze_load(&laminate, &LoadState::nx(1000.0)).unwrap();

        assert_eq!(result.plies.len(), 8);
        for (ply, state) in laminate.plies().iter().zip(&result.plies) {
            let q = ply.reduced_stiffness().unwrap();
            let expected = q * state.strain_material;
            for i in 0..3 {
                assert_relative_eq!(state.stress_material[i], expected[i], max_relative = 1e-9, epsilon = 1e-6);
            }
        }

        // 0° plies: σ1 = Q11 ε1 + Q12 ε2
        let zero = &result.plies[0];
        let q = laminate.plies()[0].reduced_stiffness().unwrap();
        assert_relative_eq!(
            zero.stress_material[0],
            q[(0, 0)] * zero.strain_material[0] + q[(0, 1)] * zero.strain_material[1],
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_global_stresses_balance_resultant() {
        let laminate = Laminate::new(vec![carbon(0.0), carbon(30.0), carbon(-60.0), carbon(90.0)]).unwrap();
        let load = LoadState::force(1500.0, -400.0, 250.0);
        let midplane = solve(&laminate, &load).unwrap();

        // Stresses vary linearly within each ply, so the mid-ply value integrates exactly
        let mut n = Vec3::zeros();
        let mut m = Vec3::zeros();
        for ((ply, (zb, zt)), state) in laminate
            .plies()
            .iter()
            .zip(laminate.z_bounds())
            .zip(ply_state(&laminate, &midplane).unwrap())
        {
            let q_bar = ply.rotated_stiffness().unwrap();
            n += state.stress_global * ply.thickness;
            m += q_bar * (midplane.strain * (zt.powi(2) - zb.powi(2)) / 2.0
                + midplane.curvature * (zt.powi(3) - zb.powi(3)) / 3.0);
        }
        let expected = load.as_vector();
        for i in 0..3 {
            assert_relative_eq!(n[i], expected[i], max_relative = 1e-6, epsilon = 1e-6);
            assert_relative_eq!(m[i], expected[i + 3], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_pure_bending_antisymmetric_strain() {
        let laminate = Laminate::new(vec![carbon(0.0), carbon(0.0)]).unwrap();
        let result = analyze_load(&laminate, &LoadState::mx(1.0)).unwrap();
        let bottom = &result.plies[0];
        let top = &result.plies[1];
        assert_relative_eq!(bottom.strain_global[0], -top.strain_global[0], max_relative = 1e-9);
        assert!(top.stress_global[0] > 0.0);
        assert_eq!(bottom.name, "Ply 1");
    }

    #[test]
    fn test_degenerate_laminate_solve_is_numerical_error() {
        let ply = Ply::new(Material::carbon_t300(), 1e-200, 0.0).unwrap();
        let laminate = Laminate::new(vec![ply]).unwrap();
        let err = solve(&laminate, &LoadState::nx(1000.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Numerical);
    }
}
