//! Simulation orchestrator
//!
//! One session owns a Universe, a Source, and a WaveTrain and drives them
//! in a fixed order each animation frame: universe clock → source
//! kinematics → wave propagation → redshift composition. The result is a
//! read-only status snapshot; rendering/UI layers consume it and feed
//! scalar inputs back only through the setters below.
//!
//! Sessions are plain values — no globals, so independent simulations can
//! coexist (and tests get clean instances).

use glam::DVec3;
use redshift_physics::{
    gravitational_redshift, lorentz_factor, observed_wavelength, relativistic_doppler_with_angle,
    time_dilation, total_redshift, transverse_doppler_redshift, C_KM_S, DEFAULT_GRAV_MASS_KG,
    DEFAULT_GRAV_RADIUS_M, DEFAULT_SOURCE_DISTANCE, H_ALPHA_REST_NM, MAX_TICK_DT,
    MIN_SOURCE_DISTANCE, WAVE_TRAVEL_TIME,
};

use crate::mode::SimulationMode;
use crate::source::Source;
use crate::universe::Universe;
use crate::wave::{FrameContext, WaveTrain};

/// Per-tick derived quantities published to the display layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RedshiftSnapshot {
    /// Doppler redshift at the configured motion angle (0 when the mode
    /// excludes Doppler or the source is at rest)
    pub z_doppler: f64,
    /// Pure transverse (time-dilation-only) redshift at the current speed,
    /// for comparison display
    pub z_transverse: f64,
    /// Cosmological redshift over the estimated light-travel lookback
    pub z_cosmo: f64,
    /// Gravitational redshift (0 outside gravitational mode; may be +∞
    /// inside the horizon)
    pub z_grav: f64,
    /// Multiplicative composition of the components
    pub z_total: f64,
    /// Rest wavelength shifted by z_total (nm)
    pub wavelength_observed: f64,
    pub lorentz_factor: f64,
    pub time_dilation: f64,
    /// Current source distance in physical units
    pub physical_distance: f64,
    /// Line-of-sight speed, positive = receding (km/s)
    pub recession_velocity: f64,
    /// Source position in physical coordinates
    pub source_position: DVec3,
    /// Where the source would sit riding the Hubble flow alone; the gap to
    /// `source_position` is the peculiar/orbital contribution
    pub hubble_flow_position: DVec3,
}

impl RedshiftSnapshot {
    fn at_rest(rest_wavelength: f64, distance: f64) -> Self {
        Self {
            z_doppler: 0.0,
            z_transverse: 0.0,
            z_cosmo: 0.0,
            z_grav: 0.0,
            z_total: 0.0,
            wavelength_observed: rest_wavelength,
            lorentz_factor: 1.0,
            time_dilation: 1.0,
            physical_distance: distance,
            recession_velocity: 0.0,
            source_position: DVec3::new(distance, 0.0, 0.0),
            hubble_flow_position: DVec3::new(distance, 0.0, 0.0),
        }
    }
}

/// Owns one complete simulation and drives it tick by tick.
#[derive(Debug)]
pub struct SimulationSession {
    universe: Universe,
    source: Source,
    wave: WaveTrain,
    rest_wavelength: f64,
    /// User-configured motion angle in degrees: 0 = receding along the
    /// line of sight, 180 = approaching
    motion_angle_deg: f64,
    wave_speed: f64,
    observer_pos: DVec3,
    grav_mass_kg: f64,
    grav_radius_m: f64,
    snapshot: RedshiftSnapshot,
}

impl Default for SimulationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationSession {
    pub fn new() -> Self {
        Self {
            universe: Universe::new(),
            source: Source::new(DEFAULT_SOURCE_DISTANCE),
            wave: WaveTrain::new(H_ALPHA_REST_NM),
            rest_wavelength: H_ALPHA_REST_NM,
            motion_angle_deg: 0.0,
            wave_speed: DEFAULT_SOURCE_DISTANCE / WAVE_TRAVEL_TIME,
            observer_pos: DVec3::ZERO,
            grav_mass_kg: DEFAULT_GRAV_MASS_KG,
            grav_radius_m: DEFAULT_GRAV_RADIUS_M,
            snapshot: RedshiftSnapshot::at_rest(H_ALPHA_REST_NM, DEFAULT_SOURCE_DISTANCE),
        }
    }

    // ---- inputs -----------------------------------------------------

    pub fn set_h0(&mut self, h0: f64) {
        self.universe.set_h0(h0);
    }

    /// Peculiar radial velocity in km/s, positive = receding.
    pub fn set_velocity(&mut self, radial: f64) {
        self.source.set_velocities(radial);
    }

    /// Motion angle in degrees, clamped to [0, 180].
    pub fn set_motion_angle_deg(&mut self, degrees: f64) {
        self.motion_angle_deg = degrees.clamp(0.0, 180.0);
    }

    /// Comoving source distance; also rescales the visual wave speed so
    /// crests cross the gap on the same timescale.
    pub fn set_distance(&mut self, distance: f64) {
        self.source.set_distance(distance);
        self.wave_speed = distance.max(MIN_SOURCE_DISTANCE) / WAVE_TRAVEL_TIME;
    }

    pub fn set_rest_wavelength(&mut self, nm: f64) {
        self.rest_wavelength = nm;
        self.wave.set_rest_wavelength(nm);
    }

    /// Switching modes tears down the in-flight wave train: crests emitted
    /// under one mode's stretch rules are meaningless under another's.
    pub fn set_mode(&mut self, mode: SimulationMode) {
        if mode != self.universe.mode() {
            log::info!("Mode changed to {mode:?}");
            self.universe.set_mode(mode);
            self.wave.reset();
        }
    }

    /// Compact-object parameters for gravitational mode (kg, meters).
    pub fn set_gravitational_source(&mut self, mass_kg: f64, radius_m: f64) {
        self.grav_mass_kg = mass_kg;
        self.grav_radius_m = radius_m;
    }

    /// Explicit orbital-motion control; `phase` of `None` keeps (or draws)
    /// the phase, `Some` injects it for deterministic runs.
    pub fn enable_orbit(&mut self, phase: Option<f64>) {
        self.source.enable_orbit(phase);
    }

    pub fn disable_orbit(&mut self) {
        self.source.disable_orbit();
    }

    // ---- lifecycle --------------------------------------------------

    pub fn start(&mut self) {
        self.universe.start();
    }

    pub fn toggle_pause(&mut self) {
        self.universe.toggle_pause();
    }

    /// Begin emitting wave crests; starts the universe clock if it is not
    /// already running.
    pub fn start_emission(&mut self) {
        if !self.universe.is_running() {
            self.universe.start();
        }
        self.wave.start_emission(self.universe.time());
    }

    pub fn stop_emission(&mut self) {
        self.wave.stop_emission();
    }

    /// Reinitialize everything; safe at any point in the tick sequence.
    pub fn reset(&mut self) {
        self.universe.reset();
        self.source.reset(None);
        self.wave.reset();
        self.snapshot =
            RedshiftSnapshot::at_rest(self.rest_wavelength, self.source.comoving_distance());
        log::info!("Session reset");
    }

    // ---- per-frame tick ---------------------------------------------

    /// One frame tick, in fixed order: Universe → Source → WaveTrain →
    /// redshift composition. `dt` is clamped to bound integration error
    /// from irregular frame gaps.
    pub fn update(&mut self, dt: f64) {
        let dt = dt.clamp(0.0, MAX_TICK_DT);
        self.universe.update(dt);
        if !self.universe.is_running() || self.universe.is_paused() {
            return;
        }

        let time = self.universe.time();
        let scale_factor = self.universe.scale_factor();
        self.source.update_radial_velocity(time);

        let frame = FrameContext {
            time,
            dt,
            scale_factor,
            mode: self.universe.mode(),
            wave_speed: self.wave_speed,
            observer_pos: self.observer_pos,
        };
        self.wave.update(&mut self.source, &frame);

        self.snapshot = self.compute_snapshot(time);
    }

    fn compute_snapshot(&mut self, time: f64) -> RedshiftSnapshot {
        let mode = self.universe.mode();
        let v_radial = self.source.velocity_radial();
        let speed = v_radial.abs();

        let z_doppler = if mode.includes_doppler() && speed > 0.0 {
            relativistic_doppler_with_angle(speed, self.motion_angle_deg.to_radians(), C_KM_S) - 1.0
        } else {
            0.0
        };
        let z_transverse = transverse_doppler_redshift(speed, C_KM_S);

        let physical_distance = self
            .universe
            .comoving_to_physical(self.source.comoving_distance().max(MIN_SOURCE_DISTANCE));

        let z_cosmo = if mode.expands_space() {
            // Emission-time lookback from an approximate light-travel delay
            let t_emit = (time - physical_distance / self.wave_speed).max(0.0);
            self.universe.get_cosmological_redshift(t_emit)
        } else {
            0.0
        };

        let z_grav = if mode == SimulationMode::Gravitational {
            gravitational_redshift(self.grav_mass_kg, self.grav_radius_m)
        } else {
            0.0
        };

        let z_total = total_redshift(z_doppler, z_cosmo, z_grav);
        let recession_velocity = -self.source.get_velocity_toward(time, self.observer_pos);
        let scale_factor = self.universe.scale_factor();
        let source_position = self.source.physical_position(time, scale_factor);
        let hubble_flow_position = self.source.hubble_flow_position() * scale_factor;

        RedshiftSnapshot {
            z_doppler,
            z_transverse,
            z_cosmo,
            z_grav,
            z_total,
            wavelength_observed: observed_wavelength(self.rest_wavelength, z_total),
            lorentz_factor: lorentz_factor(speed, C_KM_S),
            time_dilation: time_dilation(speed, C_KM_S),
            physical_distance,
            recession_velocity,
            source_position,
            hubble_flow_position,
        }
    }

    // ---- outputs ----------------------------------------------------

    pub fn snapshot(&self) -> &RedshiftSnapshot {
        &self.snapshot
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn wave_train(&self) -> &WaveTrain {
        &self.wave
    }

    pub fn wave_speed(&self) -> f64 {
        self.wave_speed
    }
}
