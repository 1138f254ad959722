//! Effective engineering constants from the laminate compliance
//!
//! The in-plane constants are read straight off the upper-left block of the
//! inverted 6x6 ABD matrix. For laminates with bending-extension coupling this
//! is an approximation: no correction is made for B, so the constants do not
//! match a fully coupled treatment.

use crate::elements::Laminate;
use crate::error::{CltError, CltResult};
use crate::math;
use crate::results::EffectiveProperties;

/// Compute the homogenized properties of a laminate
///
/// # Errors
///
/// `Numerical` if the ABD matrix cannot be inverted (degenerate laminate).
pub fn effective_properties(laminate: &Laminate) -> CltResult<EffectiveProperties> {
    let h = laminate.total_thickness();
    let abd = laminate.abd()?;

    let s = math::invert(&abd.abd()).ok_or(CltError::Numerical {
        operation: "effective_properties",
        thickness: h,
    })?;

    let props = EffectiveProperties {
        ex: 1.0 / (h * s[(0, 0)]),
        ey: 1.0 / (h * s[(1, 1)]),
        nu_xy: -s[(0, 1)] / s[(0, 0)],
        gxy: 1.0 / (h * s[(2, 2)]),
        thickness: h,
        density: laminate.average_density(),
        mass_per_area: laminate.mass_per_area(),
    };

    if [props.ex, props.ey, props.nu_xy, props.gxy].iter().any(|v| !v.is_finite()) {
        return Err(CltError::Numerical {
            operation: "effective_properties",
            thickness: h,
        });
    }

    log::debug!(
        "Effective properties: Ex = {:.3} GPa, Ey = {:.3} GPa, nu_xy = {:.4}, Gxy = {:.3} GPa",
        props.ex_gpa(),
        props.ey_gpa(),
        props.nu_xy,
        props.gxy_gpa()
    );

    Ok(props)
}
