//! Physical constants used throughout the crate.
//!
//! Level energies are stored in keV, so the thermodynamic constants are
//! expressed in keV-based units. The Einstein B derivation follows the
//! Planck-law convention in cgs units.

/// Planck constant in keV s.
pub const PLANCK_KEV_S: f64 = 4.135_667_696e-18;

/// Planck constant in erg s (cgs).
pub const PLANCK_ERG_S: f64 = 6.626_070_15e-27;

/// Boltzmann constant in keV / K.
pub const BOLTZMANN_KEV_PER_K: f64 = 8.617_333_262e-8;

/// Speed of light in cm / s (cgs).
pub const SPEED_OF_LIGHT_CM_PER_S: f64 = 2.997_924_58e10;
