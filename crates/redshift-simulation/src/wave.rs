//! Wave propagation: discrete crests from source to observer
//!
//! The source emits wave crests at a fixed cadence; each crest travels
//! toward the observer at a finite speed, its wavelength stretching
//! tick-by-tick with the scale factor while in flight. Arriving at the
//! observer records an observation and deactivates the crest exactly once.
//!
//! All universe state (time, scale factor, mode) arrives through a
//! [`FrameContext`] snapshot; the wave engine holds no live references.

use std::collections::VecDeque;

use glam::DVec3;
use redshift_physics::{
    doppler_factor, wavelength_to_rgb, ARRIVAL_THRESHOLD, CREST_INTERVAL, C_KM_S,
    EMISSION_DURATION, MAX_CRESTS, MAX_OBSERVATIONS,
};

use crate::mode::SimulationMode;
use crate::source::Source;

/// Per-tick read-only snapshot of the world, passed down from the
/// orchestrator.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    pub time: f64,
    pub dt: f64,
    pub scale_factor: f64,
    pub mode: SimulationMode,
    /// Crest propagation speed in world units per simulation second
    pub wave_speed: f64,
    pub observer_pos: DVec3,
}

/// One discrete emitted wavefront.
#[derive(Debug, Clone, Copy)]
pub struct WaveCrest {
    pub position: DVec3,
    /// Unit vector toward the observer at emission time
    pub direction: DVec3,
    /// Wavelength at emission (nm), Doppler shift already applied
    pub wavelength_emit: f64,
    /// Wavelength now (nm), stretched in flight
    pub wavelength_current: f64,
    pub emission_time: f64,
    pub scale_factor_emit: f64,
    scale_factor_prev: f64,
    pub active: bool,
    pub distance_traveled: f64,
}

impl WaveCrest {
    fn new(
        position: DVec3,
        direction: DVec3,
        wavelength_emit: f64,
        scale_factor: f64,
        time: f64,
    ) -> Self {
        Self {
            position,
            direction,
            wavelength_emit,
            wavelength_current: wavelength_emit,
            emission_time: time,
            scale_factor_emit: scale_factor,
            scale_factor_prev: scale_factor,
            active: true,
            distance_traveled: 0.0,
        }
    }

    /// Advance the crest one tick. Returns `true` exactly once, on the
    /// tick the crest reaches the observer.
    pub fn update(
        &mut self,
        dt: f64,
        wave_speed: f64,
        scale_factor: f64,
        mode: SimulationMode,
        observer_pos: DVec3,
    ) -> bool {
        if !self.active {
            return false;
        }

        let to_observer = observer_pos - self.position;
        let distance = to_observer.length();
        if distance > ARRIVAL_THRESHOLD {
            let step = (wave_speed * dt).min(distance);
            self.position += to_observer / distance * step;
            self.distance_traveled += step;
        }

        // In-flight cosmological stretch compounds against the previous
        // tick's scale factor, not the emission-time one.
        if mode.expands_space() {
            if self.scale_factor_prev > 0.0 {
                self.wavelength_current *= scale_factor / self.scale_factor_prev;
            }
            self.scale_factor_prev = scale_factor;
        }

        if (observer_pos - self.position).length() < ARRIVAL_THRESHOLD {
            self.active = false;
            return true;
        }
        false
    }

    /// Redshift accumulated purely from in-flight stretching (excludes
    /// the Doppler shift baked in at emission).
    pub fn redshift(&self) -> f64 {
        self.wavelength_current / self.wavelength_emit - 1.0
    }

    pub fn color(&self) -> [f32; 3] {
        wavelength_to_rgb(self.wavelength_current)
    }
}

/// One recorded arrival at the observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub time: f64,
    pub wavelength_observed: f64,
    pub wavelength_emit: f64,
    pub redshift: f64,
}

/// Emission and bookkeeping for one continuous source.
#[derive(Debug, Clone)]
pub struct WaveTrain {
    crests: VecDeque<WaveCrest>,
    observations: VecDeque<Observation>,
    rest_wavelength: f64,
    is_emitting: bool,
    emission_start_time: f64,
    emission_duration: f64,
    crest_interval: f64,
    last_crest_time: f64,
}

impl WaveTrain {
    pub fn new(rest_wavelength: f64) -> Self {
        Self {
            crests: VecDeque::with_capacity(MAX_CRESTS),
            observations: VecDeque::with_capacity(MAX_OBSERVATIONS),
            rest_wavelength,
            is_emitting: false,
            emission_start_time: 0.0,
            emission_duration: EMISSION_DURATION,
            crest_interval: CREST_INTERVAL,
            last_crest_time: 0.0,
        }
    }

    pub fn set_rest_wavelength(&mut self, nm: f64) {
        self.rest_wavelength = nm;
    }

    /// Begin a fresh emission session at the given universe time.
    pub fn start_emission(&mut self, time: f64) {
        self.is_emitting = true;
        self.emission_start_time = time;
        self.last_crest_time = time;
        self.crests.clear();
        self.observations.clear();
        log::info!("Emission started at t={time:.2} (rest λ = {} nm)", self.rest_wavelength);
    }

    pub fn stop_emission(&mut self) {
        if self.is_emitting {
            self.is_emitting = false;
            log::info!("Emission stopped ({} crests in flight)", self.active_crest_count());
        }
    }

    /// One tick: cadence emission, per-crest advancement, arrival
    /// recording, and oldest-first pruning down to the cap.
    pub fn update(&mut self, source: &mut Source, frame: &FrameContext) {
        if self.is_emitting {
            if frame.time - self.emission_start_time > self.emission_duration {
                self.stop_emission();
            } else if frame.time - self.last_crest_time >= self.crest_interval {
                self.emit_crest(source, frame);
                self.last_crest_time = frame.time;
            }
        }

        for crest in self.crests.iter_mut() {
            let arrived = crest.update(
                frame.dt,
                frame.wave_speed,
                frame.scale_factor,
                frame.mode,
                frame.observer_pos,
            );
            if arrived {
                self.observations.push_back(Observation {
                    time: frame.time,
                    wavelength_observed: crest.wavelength_current,
                    wavelength_emit: crest.wavelength_emit,
                    redshift: crest.redshift(),
                });
                if self.observations.len() > MAX_OBSERVATIONS {
                    self.observations.pop_front();
                }
            }
        }

        while self.crests.len() > MAX_CRESTS {
            self.crests.pop_front();
        }
    }

    /// Emit a single crest from the source's current position, aimed at
    /// the observer. In Doppler-active modes the emitted wavelength
    /// carries the shift from the source's line-of-sight velocity;
    /// `get_velocity_toward` is positive for approach while
    /// `doppler_factor` wants positive for recession, hence the negation.
    pub fn emit_crest(&mut self, source: &mut Source, frame: &FrameContext) {
        let position = source.physical_position(frame.time, frame.scale_factor);
        let to_observer = frame.observer_pos - position;
        let direction = if to_observer.length() > f64::EPSILON {
            to_observer.normalize()
        } else {
            DVec3::X
        };

        let wavelength_emit = if frame.mode.includes_doppler() {
            let v_toward = source.get_velocity_toward(frame.time, frame.observer_pos);
            self.rest_wavelength * doppler_factor(-v_toward, C_KM_S)
        } else {
            self.rest_wavelength
        };

        self.crests.push_back(WaveCrest::new(
            position,
            direction,
            wavelength_emit,
            frame.scale_factor,
            frame.time,
        ));
        if self.crests.len() > MAX_CRESTS {
            self.crests.pop_front();
        }
    }

    pub fn active_crests(&self) -> impl Iterator<Item = &WaveCrest> {
        self.crests.iter().filter(|c| c.active)
    }

    pub fn active_crest_count(&self) -> usize {
        self.crests.iter().filter(|c| c.active).count()
    }

    /// The oldest crest still tracked (the original chart hook).
    pub fn leading_crest(&self) -> Option<&WaveCrest> {
        self.crests.front()
    }

    pub fn observations(&self) -> &VecDeque<Observation> {
        &self.observations
    }

    pub fn is_emitting(&self) -> bool {
        self.is_emitting
    }

    /// Emission over and every crest has arrived.
    pub fn is_finished(&self) -> bool {
        !self.is_emitting && self.crests.iter().all(|c| !c.active)
    }

    /// Drop all crests and observations and stop emitting. Safe to call
    /// at any point in the tick sequence.
    pub fn reset(&mut self) {
        self.is_emitting = false;
        self.crests.clear();
        self.observations.clear();
        self.emission_start_time = 0.0;
        self.last_crest_time = 0.0;
    }
}
