//! A discrete quantum state.

use crate::constants::BOLTZMANN_KEV_PER_K;
use crate::properties::Properties;
use crate::units::EnergyUnit;
use serde::{Deserialize, Serialize};

/// A single quantum state: an energy, a multiplicity (degeneracy 2J + 1),
/// and an open property map.
///
/// The energy is stored once, in keV; accessors and mutators convert through
/// the fixed table in [`EnergyUnit`] so repeated unit round-trips cannot
/// drift.
///
/// Two levels are equal when their energy and multiplicity match, regardless
/// of properties. That structural identity drives graph operations such as
/// removal. Energy alone is *not* a unique key: a species may hold several
/// levels at the same energy, distinguished only by insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    energy_kev: f64,
    multiplicity: u32,
    properties: Properties,
}

impl Level {
    /// Creates a level from an energy in keV and a multiplicity.
    pub fn new(energy_kev: f64, multiplicity: u32) -> Self {
        Self::with_unit(energy_kev, EnergyUnit::Kev, multiplicity)
    }

    /// Creates a level from an energy in the given unit and a multiplicity.
    pub fn with_unit(energy: f64, unit: EnergyUnit, multiplicity: u32) -> Self {
        Self {
            energy_kev: unit.to_kev(energy),
            multiplicity,
            properties: Properties::new(),
        }
    }

    /// The level energy in keV.
    pub fn energy_kev(&self) -> f64 {
        self.energy_kev
    }

    /// The level energy converted to the given unit.
    pub fn energy(&self, unit: EnergyUnit) -> f64 {
        unit.from_kev(self.energy_kev)
    }

    pub fn multiplicity(&self) -> u32 {
        self.multiplicity
    }

    pub fn set_energy(&mut self, energy: f64, unit: EnergyUnit) {
        self.energy_kev = unit.to_kev(energy);
    }

    pub fn set_multiplicity(&mut self, multiplicity: u32) {
        self.multiplicity = multiplicity;
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    /// Whether this level is flagged usable for rate computations.
    pub fn is_usable(&self) -> bool {
        self.properties.usable()
    }

    /// The raw Boltzmann factor `multiplicity * exp(-E / kT)`.
    ///
    /// Requires `temperature > 0`; the T = 0 boundary is handled explicitly
    /// by [`Species::compute_equilibrium_probabilities`], which also shifts
    /// energies by the ground state to avoid underflow.
    ///
    /// [`Species::compute_equilibrium_probabilities`]:
    ///     crate::species::Species::compute_equilibrium_probabilities
    pub fn boltzmann_factor(&self, temperature: f64) -> f64 {
        let kt = BOLTZMANN_KEV_PER_K * temperature;
        self.multiplicity as f64 * (-self.energy_kev / kt).exp()
    }
}

impl PartialEq for Level {
    fn eq(&self, other: &Self) -> bool {
        self.energy_kev == other.energy_kev && self.multiplicity == other.multiplicity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn energy_unit_round_trip() {
        let level = Level::with_unit(1.5, EnergyUnit::Mev, 5);
        assert_relative_eq!(level.energy_kev(), 1500.0);
        assert_relative_eq!(level.energy(EnergyUnit::Ev), 1.5e6);
        assert_relative_eq!(level.energy(EnergyUnit::Gev), 1.5e-3);
    }

    #[test]
    fn mutators_convert_through_the_same_table() {
        let mut level = Level::new(100.0, 3);
        level.set_energy(level.energy(EnergyUnit::Ev), EnergyUnit::Ev);
        assert!(is_close::is_close!(level.energy_kev(), 100.0));
        level.set_multiplicity(7);
        assert_eq!(level.multiplicity(), 7);
    }

    #[test]
    fn boltzmann_factor() {
        // kT at 1e9 K is ~86.17 keV.
        let level = Level::new(100.0, 2);
        let kt = BOLTZMANN_KEV_PER_K * 1.0e9;
        assert_relative_eq!(
            level.boltzmann_factor(1.0e9),
            2.0 * (-100.0 / kt).exp(),
            max_relative = 1e-14
        );
    }

    #[test]
    fn structural_equality_ignores_properties() {
        let a = Level::new(10.0, 3);
        let mut b = Level::new(10.0, 3);
        b.properties_mut().set("parity", "-");
        assert_eq!(a, b);

        assert_ne!(a, Level::new(10.0, 5));
        assert_ne!(a, Level::new(11.0, 3));
    }
}
