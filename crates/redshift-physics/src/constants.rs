//! Physical and simulation constants
//!
//! Real physical constants sit next to values scaled for real-time
//! visualization. The scaled ones keep relative relationships intact but
//! have no physical meaning on their own.

/// Speed of light in km/s
pub const C_KM_S: f64 = 299_792.458;

/// Speed of light in m/s (SI, for the gravitational formulas)
pub const C_M_S: f64 = 2.997_924_58e8;

/// Gravitational constant (SI)
pub const G_SI: f64 = 6.674e-11;

/// H-alpha emission line rest wavelength (nm), the default spectral line
pub const H_ALPHA_REST_NM: f64 = 656.28;

/// Default Hubble constant (km/s/Mpc)
pub const DEFAULT_H0: f64 = 70.0;

/// Divisor converting H0 (km/s/Mpc) into a per-simulation-second expansion
/// rate. Chosen purely so expansion is visible on human timescales; it has
/// no physical meaning.
pub const H0_VISUAL_SCALE: f64 = 500.0;

/// Upper clamp on the scale factor a(t)
pub const SCALE_FACTOR_MAX: f64 = 10.0;

/// Beta clamp used by the Doppler formulas to avoid the singularity at
/// |v| = c. Puts a ceiling on the redshift they can report.
pub const BETA_CLAMP: f64 = 0.9999;

/// Wave crests travel the initial source distance in this many simulation
/// seconds (sets the visual propagation speed)
pub const WAVE_TRAVEL_TIME: f64 = 20.0;

/// Distance from the observer below which a crest counts as arrived
/// (world units)
pub const ARRIVAL_THRESHOLD: f64 = 1.0;

/// Seconds between emitted wave crests
pub const CREST_INTERVAL: f64 = 0.1;

/// Seconds an emission session stays active before auto-stopping
pub const EMISSION_DURATION: f64 = 25.0;

/// Minimum source distance from the observer (world units), enforced to
/// avoid degenerate geometry at the origin
pub const MIN_SOURCE_DISTANCE: f64 = 10.0;

/// Default comoving distance of the source (world units, Mpc-flavored but
/// visualization-normalized)
pub const DEFAULT_SOURCE_DISTANCE: f64 = 500.0;

/// Visual orbit radius for the oscillating-velocity presets (world units)
pub const ORBIT_RADIUS: f64 = 25.0;

/// Orbital period for the oscillating-velocity presets (simulation seconds)
pub const ORBITAL_PERIOD: f64 = 6.0;

/// Largest dt a single frame tick may integrate; larger gaps (e.g. a
/// backgrounded tab) are clamped to bound integration error
pub const MAX_TICK_DT: f64 = 0.1;

/// Default compact-object mass for gravitational mode (kg, ~1.4 solar
/// masses — neutron-star-like so the shift is visible)
pub const DEFAULT_GRAV_MASS_KG: f64 = 2.8e30;

/// Default emission radius for gravitational mode (m, ~12 km)
pub const DEFAULT_GRAV_RADIUS_M: f64 = 1.2e4;

/// Capacity of the (time, scale factor) history ring
pub const SCALE_FACTOR_HISTORY_CAP: usize = 1000;

/// Maximum wave crests tracked at once; oldest are evicted first
pub const MAX_CRESTS: usize = 300;

/// Maximum recorded arrival observations; oldest are evicted first
pub const MAX_OBSERVATIONS: usize = 500;
