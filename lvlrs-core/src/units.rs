//! Energy units.
//!
//! Level energies are stored canonically in keV. Every conversion goes
//! through the single fixed factor table in [`EnergyUnit::per_kev`], so a
//! value round-tripped through any unit any number of times never drifts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An energy unit accepted by level accessors and mutators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnergyUnit {
    Ev,
    Kev,
    Mev,
    Gev,
}

impl EnergyUnit {
    /// Number of this unit per keV.
    pub fn per_kev(self) -> f64 {
        match self {
            EnergyUnit::Ev => 1.0e3,
            EnergyUnit::Kev => 1.0,
            EnergyUnit::Mev => 1.0e-3,
            EnergyUnit::Gev => 1.0e-6,
        }
    }

    /// Converts a value expressed in this unit to keV.
    pub fn to_kev(self, value: f64) -> f64 {
        value / self.per_kev()
    }

    /// Converts a value expressed in keV to this unit.
    pub fn from_kev(self, value_kev: f64) -> f64 {
        value_kev * self.per_kev()
    }
}

impl fmt::Display for EnergyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EnergyUnit::Ev => "eV",
            EnergyUnit::Kev => "keV",
            EnergyUnit::Mev => "MeV",
            EnergyUnit::Gev => "GeV",
        };
        write!(f, "{s}")
    }
}
