//! Quantum level-system data and kinetics.
//!
//! This crate is a thin facade over [`lvlrs_core`], which holds the data
//! model (levels, transitions, species) and the kinetics engine (equilibrium
//! probabilities, rate-matrix assembly, time evolution).

pub use lvlrs_core::*;
