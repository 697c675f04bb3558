//! Redshift Simulation
//!
//! Headless driver for the redshift engine: runs one scripted scenario per
//! mode and logs the status snapshot once per simulated second. The
//! rendering/UI layers consume the same API this driver exercises.

use redshift_physics::wavelength_to_rgb;
use redshift_simulation::{SimulationMode, SimulationSession};

/// Fixed frame tick, ~60 fps
const DT: f64 = 1.0 / 60.0;

/// Run one scenario for `seconds`, logging a status line each simulated
/// second.
fn run_scenario(session: &mut SimulationSession, name: &str, seconds: f64) {
    log::info!("--- {name} ---");
    session.start_emission();

    let mut next_report = 1.0;
    while session.universe().time() < seconds {
        session.update(DT);

        if session.universe().time() >= next_report {
            next_report += 1.0;
            let snap = session.snapshot();
            let [r, g, b] = wavelength_to_rgb(snap.wavelength_observed);
            log::info!(
                "t={:5.1}s  a={:.3}  z_dopp={:+.5}  z_cosmo={:+.5}  z_grav={:+.5}  z_total={:+.5}  λ_obs={:7.2} nm  rgb=({:.2},{:.2},{:.2})  crests={}  arrivals={}",
                session.universe().time(),
                session.universe().scale_factor(),
                snap.z_doppler,
                snap.z_cosmo,
                snap.z_grav,
                snap.z_total,
                snap.wavelength_observed,
                r,
                g,
                b,
                session.wave_train().active_crest_count(),
                session.wave_train().observations().len(),
            );
        }
    }

    let snap = session.snapshot();
    log::info!(
        "{name} final: z_total={:.5}, λ_obs={:.2} nm, γ={:.6}, distance={:.1}",
        snap.z_total,
        snap.wavelength_observed,
        snap.lorentz_factor,
        snap.physical_distance,
    );
}

fn main() {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting redshift simulation scenarios...");

    // Pure expansion: a distant galaxy at rest in the Hubble flow
    let mut session = SimulationSession::new();
    session.set_mode(SimulationMode::Cosmological);
    session.set_h0(70.0);
    session.set_distance(300.0);
    run_scenario(&mut session, "Cosmological (H0=70, d=300)", 10.0);

    // Pure Doppler: a receding source at 5000 km/s, no expansion
    session.reset();
    session.set_mode(SimulationMode::Doppler);
    session.set_velocity(5000.0);
    session.disable_orbit();
    session.set_motion_angle_deg(0.0);
    run_scenario(&mut session, "Doppler (v=+5000 km/s)", 10.0);

    // Binary-style oscillation: orbital motion swings the radial velocity
    session.reset();
    session.set_mode(SimulationMode::Doppler);
    session.set_velocity(8000.0);
    session.enable_orbit(Some(0.0));
    run_scenario(&mut session, "Doppler orbital (v=8000 km/s, oscillating)", 12.0);

    // Both effects combined
    session.reset();
    session.set_mode(SimulationMode::Mixed);
    session.set_h0(70.0);
    session.set_velocity(3000.0);
    session.disable_orbit();
    session.set_distance(300.0);
    run_scenario(&mut session, "Mixed (H0=70, v=+3000 km/s)", 10.0);

    // Gravitational: light climbing out of a neutron-star potential
    session.reset();
    session.set_mode(SimulationMode::Gravitational);
    run_scenario(&mut session, "Gravitational (1.4 M☉, r=12 km)", 5.0);

    log::info!("All scenarios complete");
}
