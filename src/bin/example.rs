//! CLT Solver Example - Laminate stiffness, ply stresses and failure

use clt_solver::math::Mat3;
use clt_solver::prelude::*;

fn print_matrix(label: &str, m: &Mat3, scale: f64, unit: &str) {
    println!("  {} ({}):", label, unit);
    for i in 0..3 {
        println!(
            "    [{:>12.4} {:>12.4} {:>12.4}]",
            m[(i, 0)] / scale,
            m[(i, 1)] / scale,
            m[(i, 2)] / scale
        );
    }
}

fn report(title: &str, laminate: &Laminate, load: &LoadState, allowables: &[StrengthAllowables]) -> anyhow::Result<()> {
    println!("=== {} ===\n", title);
    println!(
        "{} plies, h = {:.3} mm, symmetric: {}",
        laminate.len(),
        laminate.total_thickness() * 1e3,
        laminate.is_symmetric()
    );

    let options = AnalysisOptions::default().with_criterion(FailureCriterion::TsaiHill);
    let result = analyze_laminate(laminate, load, allowables, &options)?;

    // Effective properties
    let props = &result.effective;
    println!("\nEffective Laminate Properties:");
    println!("  Ex   = {:.3} GPa", props.ex_gpa());
    println!("  Ey   = {:.3} GPa", props.ey_gpa());
    println!("  nuxy = {:.4}", props.nu_xy);
    println!("  Gxy  = {:.3} GPa", props.gxy_gpa());
    println!("  rho  = {:.1} kg/m³, {:.4} kg/m²", props.density, props.mass_per_area);

    // Stiffness matrices
    println!("\nStiffness Matrices:");
    print_matrix("A", &result.abd.a, 1e6, "MN/m");
    print_matrix("B", &result.abd.b, 1e3, "kN");
    print_matrix("D", &result.abd.d, 1.0, "N·m");

    // Ply stresses
    println!(
        "\nPly Stresses under Nx={:.0} Ny={:.0} Nxy={:.0} N/m (material axes, MPa):",
        load.nx, load.ny, load.nxy
    );
    for ply in &result.response.plies {
        let s = ply.stress_material_mpa();
        println!(
            "  {:<10} {:>6.1}°  z={:>7.3}mm  σ1={:>9.3}  σ2={:>8.3}  τ12={:>8.3}",
            ply.name,
            ply.orientation,
            ply.z_mid_mm(),
            s[0],
            s[1],
            s[2]
        );
    }

    // Failure
    if let Some(failure) = &result.failure {
        println!("\nFailure Analysis ({}):", failure.criterion);
        println!(
            "  Max index: {:.4} at ply {}",
            failure.max_failure_index,
            failure.critical_ply + 1
        );
        if let Some(rf) = failure.reserve_factor() {
            println!("  Reserve factor: {:.2}", rf);
        }
        if failure.has_failure() {
            println!("  Failed plies: {:?}", failure.failed_plies);
        } else {
            println!("  No ply failure predicted");
        }
    }
    println!();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let carbon_allowables = [StrengthAllowables::from_mpa(1500.0, 1200.0, 50.0, 250.0, 70.0)];
    let load = LoadState::nx(1000.0);

    // [0/45/-45/0]s carbon/epoxy, 0.1 mm plies
    let template = Ply::from_engineering_units(Material::carbon_t300(), 0.1, 0.0)?;
    let laminate = Laminate::symmetric(&template, &[0.0, 45.0, -45.0, 0.0])?;
    report("Symmetric Carbon Laminate [0/45/-45/0]s", &laminate, &load, &carbon_allowables)?;

    // Mixed-material sequence with per-ply allowables
    let mut model = LayupModel::with_presets();
    let custom = Material::from_engineering_units(180.0, 10.0, 0.28, 7.0)?.with_density(1550.0)?;
    model.add_material("custom_carbon", custom)?;
    model.add_ply(PlyDefinition::new("custom_carbon", 0.15, 0.0).with_name("Skin 0"))?;
    model.add_ply(PlyDefinition::new("glass_e", 0.2, 45.0))?;
    model.add_ply(PlyDefinition::new("kevlar_49", 0.25, 90.0).with_name("Core 90"))?;
    model.add_ply(PlyDefinition::new("glass_e", 0.2, -45.0))?;
    model.add_ply(PlyDefinition::new("custom_carbon", 0.15, 0.0).with_name("Skin 0"))?;

    let glass = StrengthAllowables::from_mpa(1080.0, 620.0, 39.0, 128.0, 89.0);
    let kevlar = StrengthAllowables::from_mpa(1400.0, 235.0, 12.0, 53.0, 34.0);
    let carbon = carbon_allowables[0];
    let allowables = [carbon, glass, kevlar, glass, carbon];

    let mixed = model.build()?;
    report("Mixed Material Laminate", &mixed, &LoadState::force(1000.0, 200.0, 0.0), &allowables)?;

    println!("=== Analysis Complete ===");
    Ok(())
}
