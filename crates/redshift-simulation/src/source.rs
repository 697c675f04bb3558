//! The light-emitting body
//!
//! Position lives on a circle of radius `comoving_distance` around the
//! observer at the origin. A nonzero peculiar velocity can carry an
//! orbital oscillation (binary/pulsar-style presets): radial velocity
//! swings around the base value while the angular position follows the
//! same phase, so position and velocity stay phase-locked.
//!
//! Time is always passed in explicitly; the source never holds a reference
//! to the universe.

use std::f64::consts::TAU;

use glam::DVec3;
use rand::Rng;
use redshift_physics::{MIN_SOURCE_DISTANCE, ORBITAL_PERIOD, ORBIT_RADIUS};

/// Parameters of the circular motion superimposed on the base velocity.
///
/// The phase is drawn (or injected) exactly once, when orbital motion
/// transitions disabled → enabled, and preserved across any
/// purely-magnitude velocity adjustment.
#[derive(Debug, Clone, Copy)]
pub struct Orbit {
    pub radius: f64,
    pub period: f64,
    pub phase: f64,
}

/// Read-only state snapshot for the UI layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceState {
    pub comoving_distance: f64,
    pub base_velocity: f64,
    pub velocity_radial: f64,
    pub velocity_transverse: f64,
    pub orbital_enabled: bool,
}

#[derive(Debug, Clone)]
pub struct Source {
    comoving_distance: f64,
    initial_distance: f64,
    // User-set radial velocity (km/s, positive = receding)
    base_velocity: f64,
    velocity_radial: f64,
    velocity_transverse: f64,
    orbit: Option<Orbit>,
}

impl Source {
    pub fn new(initial_distance: f64) -> Self {
        Self {
            comoving_distance: initial_distance,
            initial_distance,
            base_velocity: 0.0,
            velocity_radial: 0.0,
            velocity_transverse: 0.0,
            orbit: None,
        }
    }

    /// Set the user-facing radial velocity.
    ///
    /// A nonzero velocity enables orbital motion (with a fresh random
    /// phase) only if it was previously disabled; adjusting the magnitude
    /// of an already-orbiting source keeps its phase. Zero disables
    /// orbital motion entirely.
    pub fn set_velocities(&mut self, radial: f64) {
        self.base_velocity = radial;
        if radial == 0.0 {
            self.disable_orbit();
        } else if self.orbit.is_none() {
            self.enable_orbit(None);
        }
    }

    /// Enable orbital motion. `phase` of `None` draws a random phase on
    /// the disabled → enabled transition; an existing orbit keeps its
    /// phase unless one is injected explicitly.
    pub fn enable_orbit(&mut self, phase: Option<f64>) {
        match self.orbit.as_mut() {
            Some(orbit) => {
                if let Some(p) = phase {
                    orbit.phase = p;
                }
            }
            None => {
                let phase = phase.unwrap_or_else(|| rand::rng().random::<f64>() * TAU);
                self.orbit = Some(Orbit {
                    radius: ORBIT_RADIUS,
                    period: ORBITAL_PERIOD,
                    phase,
                });
            }
        }
    }

    pub fn disable_orbit(&mut self) {
        self.orbit = None;
        self.velocity_transverse = 0.0;
    }

    /// Instantaneous orbital phase angle at `time`.
    fn phase_at(&self, time: f64) -> Option<f64> {
        self.orbit.map(|o| TAU * time / o.period + o.phase)
    }

    /// Recompute the instantaneous velocity components from the orbital
    /// phase. Must run before any velocity-dependent redshift calculation:
    /// the components are phase-dependent, not constant.
    pub fn update_radial_velocity(&mut self, time: f64) {
        match self.phase_at(time) {
            Some(phase) => {
                let amplitude = 0.5 * self.base_velocity.abs();
                self.velocity_radial = self.base_velocity + amplitude * phase.sin();
                self.velocity_transverse = amplitude * phase.cos();
            }
            None => {
                self.velocity_radial = self.base_velocity;
                self.velocity_transverse = 0.0;
            }
        }
    }

    /// Comoving position at `time`: a point on the circle of radius
    /// `comoving_distance` around the observer. Orbital motion rotates the
    /// angular position with the same phase as the velocity oscillation;
    /// otherwise the angle is fixed. The minimum-distance floor is applied
    /// by radial rescaling.
    ///
    /// Refreshes the velocity components as a side effect so velocity and
    /// position always agree on the phase.
    pub fn position(&mut self, time: f64) -> DVec3 {
        self.update_radial_velocity(time);
        let angle = self.phase_at(time).unwrap_or(0.0);
        let dist = self.comoving_distance.max(MIN_SOURCE_DISTANCE);
        DVec3::new(dist * angle.cos(), dist * angle.sin(), 0.0)
    }

    /// Physical position: comoving position scaled by a(t).
    pub fn physical_position(&mut self, time: f64, scale_factor: f64) -> DVec3 {
        self.position(time) * scale_factor
    }

    /// Position the source would have riding the Hubble flow alone (no
    /// peculiar/orbital motion): the fixed base angle at the floored
    /// comoving distance.
    pub fn hubble_flow_position(&self) -> DVec3 {
        DVec3::new(self.comoving_distance.max(MIN_SOURCE_DISTANCE), 0.0, 0.0)
    }

    /// Signed speed of the source projected onto the direction toward
    /// `target`; positive = approaching. The (radial, transverse)
    /// components are expressed along the observer line of sight and
    /// rebuilt into a world-frame vector first.
    pub fn get_velocity_toward(&mut self, time: f64, target: DVec3) -> f64 {
        let pos = self.position(time);
        let dist = pos.length();
        if dist <= f64::EPSILON {
            return 0.0;
        }
        // Outward radial unit vector and its in-plane perpendicular
        let ur = pos / dist;
        let ut = DVec3::new(-ur.y, ur.x, 0.0);
        let velocity = self.velocity_radial * ur + self.velocity_transverse * ut;

        let to_target = target - pos;
        let len = to_target.length();
        if len <= f64::EPSILON {
            return 0.0;
        }
        velocity.dot(to_target / len)
    }

    pub fn set_distance(&mut self, distance: f64) {
        self.comoving_distance = distance;
        self.initial_distance = distance;
    }

    /// Clear velocity/orbital state; optionally reassign the distance.
    pub fn reset(&mut self, initial_distance: Option<f64>) {
        if let Some(d) = initial_distance {
            self.initial_distance = d;
        }
        self.comoving_distance = self.initial_distance;
        self.base_velocity = 0.0;
        self.velocity_radial = 0.0;
        self.velocity_transverse = 0.0;
        self.orbit = None;
    }

    pub fn comoving_distance(&self) -> f64 {
        self.comoving_distance
    }

    pub fn base_velocity(&self) -> f64 {
        self.base_velocity
    }

    pub fn velocity_radial(&self) -> f64 {
        self.velocity_radial
    }

    pub fn velocity_transverse(&self) -> f64 {
        self.velocity_transverse
    }

    pub fn orbit(&self) -> Option<&Orbit> {
        self.orbit.as_ref()
    }

    pub fn state(&self) -> SourceState {
        SourceState {
            comoving_distance: self.comoving_distance,
            base_velocity: self.base_velocity,
            velocity_radial: self.velocity_radial,
            velocity_transverse: self.velocity_transverse,
            orbital_enabled: self.orbit.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OBSERVER: DVec3 = DVec3::ZERO;

    #[test]
    fn test_constant_velocity_without_orbit() {
        let mut s = Source::new(500.0);
        s.set_velocities(5000.0);
        s.disable_orbit();
        s.update_radial_velocity(3.7);
        assert_eq!(s.velocity_radial(), 5000.0);
        assert_eq!(s.velocity_transverse(), 0.0);
    }

    #[test]
    fn test_orbit_enabled_on_nonzero_velocity() {
        let mut s = Source::new(500.0);
        assert!(s.orbit().is_none());
        s.set_velocities(8000.0);
        assert!(s.orbit().is_some());
        s.set_velocities(0.0);
        assert!(s.orbit().is_none());
    }

    #[test]
    fn test_phase_preserved_across_magnitude_change() {
        let mut s = Source::new(500.0);
        s.set_velocities(8000.0);
        let phase = s.orbit().unwrap().phase;
        s.set_velocities(4000.0);
        assert_eq!(s.orbit().unwrap().phase, phase);
        // Injection overrides, plain re-enable does not
        s.enable_orbit(None);
        assert_eq!(s.orbit().unwrap().phase, phase);
        s.enable_orbit(Some(1.25));
        assert_eq!(s.orbit().unwrap().phase, 1.25);
    }

    #[test]
    fn test_orbital_oscillation_is_periodic() {
        let mut s = Source::new(500.0);
        s.set_velocities(8000.0);
        s.enable_orbit(Some(0.4));
        let period = s.orbit().unwrap().period;

        for t in [0.0, 1.3, 2.9] {
            s.update_radial_velocity(t);
            let v0 = s.velocity_radial();
            s.update_radial_velocity(t + period);
            assert!((s.velocity_radial() - v0).abs() < 1e-9, "t={t}");
        }
    }

    #[test]
    fn test_orbital_velocity_crosses_base_twice_per_period() {
        let mut s = Source::new(500.0);
        s.set_velocities(8000.0);
        s.enable_orbit(Some(0.0));
        let period = s.orbit().unwrap().period;

        // v_r - base = A·sin(2πt/T) changes sign exactly twice per period
        let mut crossings = 0;
        let samples = 1000;
        let mut prev = 0.0_f64;
        for i in 0..=samples {
            let t = period * i as f64 / samples as f64;
            s.update_radial_velocity(t);
            let dev = s.velocity_radial() - s.base_velocity();
            if i > 0 && prev * dev < 0.0 {
                crossings += 1;
            }
            prev = dev;
        }
        assert_eq!(crossings, 2);
    }

    #[test]
    fn test_velocity_amplitude_is_half_base() {
        let mut s = Source::new(500.0);
        s.set_velocities(8000.0);
        s.enable_orbit(Some(0.0));
        let mut min_v = f64::INFINITY;
        let mut max_v = f64::NEG_INFINITY;
        for i in 0..600 {
            s.update_radial_velocity(i as f64 * 0.01);
            min_v = min_v.min(s.velocity_radial());
            max_v = max_v.max(s.velocity_radial());
        }
        assert!((max_v - 12000.0).abs() < 20.0, "max={max_v}");
        assert!((min_v - 4000.0).abs() < 20.0, "min={min_v}");
    }

    #[test]
    fn test_velocity_toward_observer_sign() {
        let mut s = Source::new(500.0);
        // Receding source: moving away from the observer, so the
        // projection toward the observer is negative (not approaching)
        s.set_velocities(5000.0);
        s.disable_orbit();
        assert!((s.get_velocity_toward(0.0, OBSERVER) + 5000.0).abs() < 1e-9);

        s.set_velocities(-3000.0);
        s.disable_orbit();
        assert!((s.get_velocity_toward(0.0, OBSERVER) - 3000.0).abs() < 1e-9);
    }

    #[test]
    fn test_position_and_velocity_phase_lock() {
        let mut s = Source::new(500.0);
        s.set_velocities(8000.0);
        s.enable_orbit(Some(0.7));
        let t = 2.3;
        let pos = s.position(t);
        let expected_angle = TAU * t / s.orbit().unwrap().period + 0.7;
        let angle = pos.y.atan2(pos.x);
        // Compare directions, not raw angles (atan2 wraps)
        assert!((angle.cos() - expected_angle.cos()).abs() < 1e-9);
        assert!((angle.sin() - expected_angle.sin()).abs() < 1e-9);
        assert!((pos.length() - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_minimum_distance_floor() {
        let mut s = Source::new(2.0);
        let pos = s.position(0.0);
        assert!((pos.length() - MIN_SOURCE_DISTANCE).abs() < 1e-9);
        assert!((s.hubble_flow_position().length() - MIN_SOURCE_DISTANCE).abs() < 1e-9);
    }

    #[test]
    fn test_physical_position_scales() {
        let mut s = Source::new(100.0);
        let pos = s.physical_position(0.0, 2.5);
        assert!((pos.length() - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset_clears_velocity_state() {
        let mut s = Source::new(500.0);
        s.set_velocities(8000.0);
        s.set_distance(300.0);
        s.update_radial_velocity(1.0);
        s.reset(None);
        assert_eq!(s.base_velocity(), 0.0);
        assert_eq!(s.velocity_radial(), 0.0);
        assert!(s.orbit().is_none());
        assert_eq!(s.comoving_distance(), 300.0);

        s.reset(Some(750.0));
        assert_eq!(s.comoving_distance(), 750.0);
    }
}
