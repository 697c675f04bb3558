//! # Redshift Physics
//!
//! Pure formulas for the three redshift mechanisms: special-relativistic
//! Doppler shift, cosmological expansion, and gravitational redshift, plus
//! the relativistic kinematics and wavelength-to-color mapping that the
//! simulation layers on top.
//!
//! Everything here is stateless and deterministic given its inputs.

pub mod color;
pub mod constants;
pub mod cosmology;
pub mod gravity;
pub mod relativity;

pub use color::*;
pub use constants::*;
pub use cosmology::*;
pub use gravity::*;
pub use relativity::*;
