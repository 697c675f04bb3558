//! Expanding universe: simulation clock and scale factor
//!
//! The scale factor integrates multiplicatively, `a *= exp(H0_sim·dt)`,
//! which is exact for constant-H (de Sitter) expansion — the result depends
//! only on total elapsed time, not on step size. Past scale factors are
//! reconstructed by inverting the same law analytically, so forward and
//! backward queries can never drift apart.

use std::collections::VecDeque;

use redshift_physics::{
    cosmological_redshift, DEFAULT_H0, H0_VISUAL_SCALE, SCALE_FACTOR_HISTORY_CAP, SCALE_FACTOR_MAX,
};

use crate::mode::SimulationMode;

/// Read-only lifecycle/state snapshot for the UI layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniverseState {
    pub time: f64,
    pub scale_factor: f64,
    pub h0: f64,
    pub mode: SimulationMode,
    pub is_running: bool,
    pub is_paused: bool,
}

/// Owns simulation time and the scale factor a(t).
#[derive(Debug, Clone)]
pub struct Universe {
    time: f64,
    scale_factor: f64,
    h0: f64,
    mode: SimulationMode,
    is_running: bool,
    is_paused: bool,
    // (time, scale factor) samples for charting; oldest evicted first
    history: VecDeque<(f64, f64)>,
}

impl Default for Universe {
    fn default() -> Self {
        Self::new()
    }
}

impl Universe {
    pub fn new() -> Self {
        let mut history = VecDeque::with_capacity(SCALE_FACTOR_HISTORY_CAP);
        history.push_back((0.0, 1.0));
        Self {
            time: 0.0,
            scale_factor: 1.0,
            h0: DEFAULT_H0,
            mode: SimulationMode::default(),
            is_running: false,
            is_paused: false,
            history,
        }
    }

    /// Reinitialize every field to its starting value.
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.scale_factor = 1.0;
        self.h0 = DEFAULT_H0;
        self.mode = SimulationMode::default();
        self.is_running = false;
        self.is_paused = false;
        self.history.clear();
        self.history.push_back((0.0, 1.0));
        log::debug!("Universe reset");
    }

    pub fn set_mode(&mut self, mode: SimulationMode) {
        self.mode = mode;
    }

    pub fn set_h0(&mut self, h0: f64) {
        self.h0 = h0;
    }

    pub fn start(&mut self) {
        self.is_running = true;
        self.is_paused = false;
        log::info!("Universe started (H0 = {} km/s/Mpc, mode = {:?})", self.h0, self.mode);
    }

    /// Flip the pause flag. No effect unless running.
    pub fn toggle_pause(&mut self) {
        if self.is_running {
            self.is_paused = !self.is_paused;
        }
    }

    /// H0 converted to a dimensionless per-simulation-second rate.
    ///
    /// The divisor is a pure visualization choice (expansion visible on
    /// human timescales), not a physical conversion.
    fn h0_sim(&self) -> f64 {
        self.h0 / H0_VISUAL_SCALE
    }

    /// Advance the clock and evolve the scale factor. No-op unless running
    /// and unpaused.
    pub fn update(&mut self, dt: f64) {
        if !self.is_running || self.is_paused {
            return;
        }
        self.time += dt;

        match self.mode {
            SimulationMode::Cosmological | SimulationMode::Mixed => {
                // Exact for constant H: a(t+dt) = a(t)·e^{H·dt}
                self.scale_factor =
                    (self.scale_factor * (self.h0_sim() * dt).exp()).min(SCALE_FACTOR_MAX);
            }
            SimulationMode::Doppler | SimulationMode::Gravitational => {
                // Pinned every tick so no drift can accumulate
                self.scale_factor = 1.0;
            }
        }

        self.history.push_back((self.time, self.scale_factor));
        if self.history.len() > SCALE_FACTOR_HISTORY_CAP {
            self.history.pop_front();
        }
    }

    /// Scale factor at a past time `t`, reconstructed by inverting the
    /// forward integration law (not interpolated from the history buffer,
    /// which would compound float error).
    pub fn get_scale_factor_at_time(&self, t: f64) -> f64 {
        if t >= self.time {
            return self.scale_factor;
        }
        if t <= 0.0 {
            return 1.0;
        }
        if self.mode.expands_space() {
            self.scale_factor * (-self.h0_sim() * (self.time - t)).exp()
        } else {
            1.0
        }
    }

    /// Redshift of light emitted at `t_emit` and observed now.
    pub fn get_cosmological_redshift(&self, t_emit: f64) -> f64 {
        cosmological_redshift(self.get_scale_factor_at_time(t_emit), self.scale_factor)
    }

    pub fn comoving_to_physical(&self, d: f64) -> f64 {
        d * self.scale_factor
    }

    /// Inverse of [`comoving_to_physical`]; identity for a degenerate
    /// scale factor.
    pub fn physical_to_comoving(&self, d: f64) -> f64 {
        if self.scale_factor <= 0.0 {
            return d;
        }
        d / self.scale_factor
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn h0(&self) -> f64 {
        self.h0
    }

    pub fn mode(&self) -> SimulationMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// (time, scale factor) samples for charting.
    pub fn history(&self) -> &VecDeque<(f64, f64)> {
        &self.history
    }

    pub fn state(&self) -> UniverseState {
        UniverseState {
            time: self.time,
            scale_factor: self.scale_factor,
            h0: self.h0,
            mode: self.mode,
            is_running: self.is_running,
            is_paused: self.is_paused,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_universe(mode: SimulationMode, h0: f64) -> Universe {
        let mut u = Universe::new();
        u.set_mode(mode);
        u.set_h0(h0);
        u.start();
        u
    }

    #[test]
    fn test_update_noop_unless_running() {
        let mut u = Universe::new();
        u.update(1.0);
        assert_eq!(u.time(), 0.0);
        assert_eq!(u.scale_factor(), 1.0);

        u.start();
        u.toggle_pause();
        u.update(1.0);
        assert_eq!(u.time(), 0.0);

        u.toggle_pause();
        u.update(1.0);
        assert_eq!(u.time(), 1.0);
    }

    #[test]
    fn test_pause_has_no_effect_when_stopped() {
        let mut u = Universe::new();
        u.toggle_pause();
        assert!(!u.is_paused());
    }

    #[test]
    fn test_exact_exponential_integration() {
        // Same total elapsed time must give the same scale factor
        // regardless of step count: the multiplicative tick is exact.
        let total = 10.0;
        let h0 = 70.0;

        let mut fine = running_universe(SimulationMode::Cosmological, h0);
        for _ in 0..1000 {
            fine.update(0.01);
        }

        let mut coarse = running_universe(SimulationMode::Cosmological, h0);
        for _ in 0..10 {
            coarse.update(1.0);
        }

        let expected = (h0 / H0_VISUAL_SCALE * total).exp();
        assert!((fine.scale_factor() - expected).abs() < 1e-9, "fine={}", fine.scale_factor());
        assert!((coarse.scale_factor() - expected).abs() < 1e-12);
        assert!((fine.scale_factor() - coarse.scale_factor()).abs() < 1e-9);
    }

    #[test]
    fn test_scale_factor_clamped_at_max() {
        let mut u = running_universe(SimulationMode::Cosmological, 200.0);
        for _ in 0..2000 {
            u.update(0.1);
        }
        assert_eq!(u.scale_factor(), SCALE_FACTOR_MAX);
    }

    #[test]
    fn test_doppler_mode_never_expands() {
        let mut u = running_universe(SimulationMode::Doppler, 70.0);
        for _ in 0..500 {
            u.update(0.1);
        }
        assert_eq!(u.scale_factor(), 1.0);
        assert_eq!(u.get_scale_factor_at_time(1.0), 1.0);
    }

    #[test]
    fn test_history_inversion_round_trip() {
        let mut u = running_universe(SimulationMode::Cosmological, 70.0);
        for _ in 0..100 {
            u.update(0.1);
        }
        // z(t) must equal a(now)/a(t) - 1 exactly, by construction
        for t in [1.0, 2.5, 5.0, 9.9] {
            let a_t = u.get_scale_factor_at_time(t);
            let z = u.get_cosmological_redshift(t);
            let expected = u.scale_factor() / a_t - 1.0;
            assert!((z - expected).abs() < 1e-15, "t={t}");
            assert!(z > 0.0);
        }
    }

    #[test]
    fn test_scale_factor_at_time_boundaries() {
        let mut u = running_universe(SimulationMode::Cosmological, 70.0);
        for _ in 0..50 {
            u.update(0.1);
        }
        assert_eq!(u.get_scale_factor_at_time(-1.0), 1.0);
        assert_eq!(u.get_scale_factor_at_time(0.0), 1.0);
        assert_eq!(u.get_scale_factor_at_time(u.time()), u.scale_factor());
        assert_eq!(u.get_scale_factor_at_time(u.time() + 100.0), u.scale_factor());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut u = running_universe(SimulationMode::Cosmological, 70.0);
        for _ in 0..(SCALE_FACTOR_HISTORY_CAP + 500) {
            u.update(0.01);
        }
        assert_eq!(u.history().len(), SCALE_FACTOR_HISTORY_CAP);
        // Oldest entries were evicted first
        assert!(u.history().front().unwrap().0 > 0.0);
    }

    #[test]
    fn test_comoving_physical_round_trip() {
        let mut u = running_universe(SimulationMode::Cosmological, 70.0);
        for _ in 0..30 {
            u.update(0.1);
        }
        let d = 250.0;
        let back = u.physical_to_comoving(u.comoving_to_physical(d));
        assert!((back - d).abs() < 1e-12);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut u = running_universe(SimulationMode::Mixed, 120.0);
        for _ in 0..100 {
            u.update(0.1);
        }
        u.reset();
        let s = u.state();
        assert_eq!(s.time, 0.0);
        assert_eq!(s.scale_factor, 1.0);
        assert_eq!(s.h0, DEFAULT_H0);
        assert_eq!(s.mode, SimulationMode::Cosmological);
        assert!(!s.is_running && !s.is_paused);
        assert_eq!(u.history().len(), 1);
    }
}
