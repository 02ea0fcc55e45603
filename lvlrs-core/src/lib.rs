//! Core data model and kinetics engine for discrete quantum level systems.
//!
//! A [`Species`](species::Species) holds levels and the radiative
//! transitions between them. From it one computes equilibrium (Boltzmann)
//! level populations, the generator matrix of the level-occupation Markov
//! process at a given temperature, and the time evolution of a population
//! vector under that matrix via the solvers in [`kinetics`].

pub mod collection;
pub mod constants;
pub mod errors;
pub mod kinetics;
pub mod level;
pub mod properties;
pub mod species;
pub mod transition;
pub mod units;
pub mod weisskopf;

pub use collection::SpeciesCollection;
pub use errors::{LvlrsError, LvlrsResult};
pub use kinetics::{KineticsSolver, NewtonRaphson, SparseExpm};
pub use level::Level;
pub use properties::{Properties, PropertyKey};
pub use species::Species;
pub use transition::Transition;
pub use units::EnergyUnit;
