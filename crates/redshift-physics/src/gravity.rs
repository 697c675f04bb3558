//! Gravitational redshift (Schwarzschild geometry)
//!
//! SI units: mass in kg, radii in meters. Inside the event horizon the
//! functions return +∞ rather than failing; callers check for infinity
//! before compositing.

use crate::constants::{C_M_S, G_SI};

/// Schwarzschild radius r_s = 2GM/c²
pub fn schwarzschild_radius(mass_kg: f64) -> f64 {
    2.0 * G_SI * mass_kg / (C_M_S * C_M_S)
}

/// Gravitational redshift for light emitted at radius `r` and observed at
/// infinity: z = 1/√(1 - r_s/r) - 1
///
/// Returns +∞ when `r` is at or inside the horizon.
pub fn gravitational_redshift(mass_kg: f64, r: f64) -> f64 {
    let rs = schwarzschild_radius(mass_kg);
    if r <= rs {
        return f64::INFINITY;
    }
    1.0 / (1.0 - rs / r).sqrt() - 1.0
}

/// Gravitational redshift for light traveling from `r_emit` to `r_obs` in
/// the same field: z = √((1 - r_s/r_obs)/(1 - r_s/r_emit)) - 1
///
/// Climbing out of the well (r_obs > r_emit) gives z > 0. Returns +∞ if
/// either radius is inside the horizon.
pub fn gravitational_redshift_between(mass_kg: f64, r_emit: f64, r_obs: f64) -> f64 {
    let rs = schwarzschild_radius(mass_kg);
    if r_emit <= rs || r_obs <= rs {
        return f64::INFINITY;
    }
    ((1.0 - rs / r_obs) / (1.0 - rs / r_emit)).sqrt() - 1.0
}
