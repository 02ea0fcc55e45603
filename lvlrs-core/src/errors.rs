use thiserror::Error;

/// Error type for invalid operations.
#[derive(Error, Debug)]
pub enum LvlrsError {
    #[error("{0}")]
    Error(String),
    #[error(
        "invalid transition: upper level energy {upper_kev} keV must exceed \
         lower level energy {lower_kev} keV"
    )]
    InvalidTransition { upper_kev: f64, lower_kev: f64 },
    #[error("Einstein A coefficient must be non-negative, got {0}")]
    NegativeEinsteinA(f64),
    #[error(
        "level with energy {energy_kev} keV and multiplicity {multiplicity} \
         is not part of species '{species}'"
    )]
    LevelNotFound {
        species: String,
        energy_kev: f64,
        multiplicity: u32,
    },
    #[error("temperature must be non-negative, got {0} K")]
    NegativeTemperature(f64),
    #[error(
        "transition {upper_kev} keV -> {lower_kev} keV is marked usable but \
         references an unusable level"
    )]
    InconsistentUsability { upper_kev: f64, lower_kev: f64 },
    #[error("time grid must be strictly increasing, violated at index {index} (value {value})")]
    NonMonotonicTimeGrid { index: usize, value: f64 },
    #[error("population vector has length {got} but the species has {expected} levels")]
    ShapeMismatch { expected: usize, got: usize },
    #[error("solver failed to converge at step {step} after {iterations} iterations")]
    NonConvergence { step: usize, iterations: usize },
}

/// Convenience type for `Result<T, LvlrsError>`.
pub type LvlrsResult<T> = Result<T, LvlrsError>;
