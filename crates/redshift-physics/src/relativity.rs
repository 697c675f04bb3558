//! Special-relativistic kinematics and Doppler formulas
//!
//! Velocities are in km/s throughout; `c` is a parameter (defaulting to
//! [`C_KM_S`] at call sites) so tests can substitute a convenient value.
//! Mass and energy use SI internally.

use crate::constants::{BETA_CLAMP, C_M_S};

/// Lorentz factor γ = 1/√(1-β²), β = |v|/c
///
/// Returns +∞ when |v| ≥ c. Deliberately unclamped: the infinity is a
/// valid boundary signal callers must handle.
pub fn lorentz_factor(v: f64, c: f64) -> f64 {
    let beta = v.abs() / c;
    if beta >= 1.0 {
        return f64::INFINITY;
    }
    1.0 / (1.0 - beta * beta).sqrt()
}

/// Relativistic Doppler factor λ_obs/λ_emit = √((1+β)/(1-β))
///
/// Positive v (receding) gives a factor > 1 (redshift). β is clamped to
/// ±0.9999, which puts a ceiling on the reported shift instead of
/// producing a singularity at |v| = c.
pub fn doppler_factor(v: f64, c: f64) -> f64 {
    let beta = (v / c).clamp(-BETA_CLAMP, BETA_CLAMP);
    ((1.0 + beta) / (1.0 - beta)).sqrt()
}

/// Angle-dependent relativistic Doppler factor γ(1 + β·cosθ)
///
/// θ = 0 is recession along the line of sight (maximum redshift), θ = π is
/// approach (maximum blueshift), θ = π/2 is the pure transverse case where
/// only time dilation remains.
pub fn relativistic_doppler_with_angle(v: f64, theta: f64, c: f64) -> f64 {
    let beta = (v.abs() / c).min(BETA_CLAMP);
    let gamma = 1.0 / (1.0 - beta * beta).sqrt();
    gamma * (1.0 + beta * theta.cos())
}

/// Transverse Doppler redshift γ - 1 (time dilation alone)
pub fn transverse_doppler_redshift(v: f64, c: f64) -> f64 {
    lorentz_factor(v, c) - 1.0
}

/// Time dilation factor 1/γ (moving clock rate as seen by the observer)
pub fn time_dilation(v: f64, c: f64) -> f64 {
    1.0 / lorentz_factor(v, c)
}

/// Relativistic velocity addition (v1 + v2)/(1 + v1·v2/c²)
pub fn relativistic_velocity_addition(v1: f64, v2: f64, c: f64) -> f64 {
    (v1 + v2) / (1.0 + v1 * v2 / (c * c))
}

/// Relativistic momentum p = γmv (kg·m/s; mass in kg, v in km/s)
pub fn relativistic_momentum(mass_kg: f64, v: f64, c: f64) -> f64 {
    lorentz_factor(v, c) * mass_kg * v * 1000.0
}

/// Relativistic kinetic energy (γ-1)mc² (joules; mass in kg, v in km/s)
pub fn relativistic_kinetic_energy(mass_kg: f64, v: f64, c: f64) -> f64 {
    (lorentz_factor(v, c) - 1.0) * mass_kg * C_M_S * C_M_S
}

/// Length contraction L/γ; collapses to 0 at |v| ≥ c
pub fn length_contraction(length: f64, v: f64, c: f64) -> f64 {
    let beta = v.abs() / c;
    if beta >= 1.0 {
        return 0.0;
    }
    length * (1.0 - beta * beta).sqrt()
}
