//! A directed radiative transition between two levels.

use crate::constants::{
    BOLTZMANN_KEV_PER_K, PLANCK_ERG_S, PLANCK_KEV_S, SPEED_OF_LIGHT_CM_PER_S,
};
use crate::errors::{LvlrsError, LvlrsResult};
use crate::level::Level;
use crate::properties::Properties;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

/// A user-supplied downward-rate function of temperature (K), injected in
/// place of the Einstein-coefficient kinetics.
pub type RateFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// A directed radiative link from an upper level to a lower level, carrying
/// the spontaneous decay rate (Einstein A, per second).
///
/// Construction fails fast when `upper.energy <= lower.energy` or the
/// Einstein A is negative; every derived quantity assumes both hold.
///
/// The induced-emission and absorption coefficients, the photon occupation
/// of the radiation field, and the temperature-dependent net rates are
/// derived on demand from the level pair and the Einstein A; none of them is
/// stored.
#[derive(Clone, Serialize, Deserialize)]
pub struct Transition {
    upper: Level,
    lower: Level,
    einstein_a: f64,
    properties: Properties,
    #[serde(skip)]
    rate_override: Option<RateFn>,
}

impl Transition {
    pub fn new(upper: Level, lower: Level, einstein_a: f64) -> LvlrsResult<Self> {
        if upper.energy_kev() <= lower.energy_kev() {
            return Err(LvlrsError::InvalidTransition {
                upper_kev: upper.energy_kev(),
                lower_kev: lower.energy_kev(),
            });
        }
        if einstein_a < 0.0 {
            return Err(LvlrsError::NegativeEinsteinA(einstein_a));
        }
        Ok(Self {
            upper,
            lower,
            einstein_a,
            properties: Properties::new(),
            rate_override: None,
        })
    }

    pub fn upper(&self) -> &Level {
        &self.upper
    }

    pub fn lower(&self) -> &Level {
        &self.lower
    }

    /// The spontaneous decay rate from upper to lower, per second.
    pub fn einstein_a(&self) -> f64 {
        self.einstein_a
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    /// Whether this transition is flagged usable for rate computations.
    pub fn is_usable(&self) -> bool {
        self.properties.usable()
    }

    /// Installs a downward-rate override `f(T)`.
    ///
    /// While installed, [`upper_to_lower_rate`](Self::upper_to_lower_rate)
    /// returns `f(T)` and [`lower_to_upper_rate`](Self::lower_to_upper_rate)
    /// returns `(g_u / g_l) exp(-dE / kT) f(T)`: the two rates stay related
    /// through detailed balance alone, and the Einstein coefficients drop
    /// out of the kinetics entirely.
    pub fn set_rate_override(&mut self, rate: RateFn) {
        self.rate_override = Some(rate);
    }

    /// Removes any installed rate override.
    pub fn clear_rate_override(&mut self) {
        self.rate_override = None;
    }

    /// The energy gap between the two levels, in keV.
    pub fn energy_gap_kev(&self) -> f64 {
        self.upper.energy_kev() - self.lower.energy_kev()
    }

    /// The photon frequency of the transition, `dE / h`, in Hz.
    pub fn frequency(&self) -> f64 {
        self.energy_gap_kev() / PLANCK_KEV_S
    }

    /// The Einstein B coefficient for induced emission (upper to lower),
    /// `A / (8 pi h nu^3 / c^3)`, in cgs units.
    pub fn einstein_b_upper_to_lower(&self) -> f64 {
        let nu = self.frequency();
        let energy_density_factor =
            8.0 * PI * PLANCK_ERG_S * nu.powi(3) / SPEED_OF_LIGHT_CM_PER_S.powi(3);
        self.einstein_a / energy_density_factor
    }

    /// The Einstein B coefficient for absorption (lower to upper), scaled
    /// from induced emission by the degeneracy ratio `g_u / g_l`.
    pub fn einstein_b_lower_to_upper(&self) -> f64 {
        self.einstein_b_upper_to_lower() * self.degeneracy_ratio()
    }

    /// The Bose-Einstein occupation of the radiation field at frequency
    /// `nu`, `1 / (exp(h nu / kT) - 1)`. Exactly 0 at T = 0, where only
    /// spontaneous decay survives.
    pub fn photon_occupation(frequency: f64, temperature: f64) -> f64 {
        if temperature == 0.0 {
            return 0.0;
        }
        let x = PLANCK_KEV_S * frequency / (BOLTZMANN_KEV_PER_K * temperature);
        1.0 / (x.exp() - 1.0)
    }

    /// The total downward rate at temperature `T` (K), per second:
    /// spontaneous decay plus emission induced by the blackbody radiation
    /// field, `A (1 + n(nu, T))`.
    pub fn upper_to_lower_rate(&self, temperature: f64) -> f64 {
        if let Some(rate) = &self.rate_override {
            return rate(temperature);
        }
        let occupation = Self::photon_occupation(self.frequency(), temperature);
        self.einstein_a * (1.0 + occupation)
    }

    /// The total upward (absorption) rate at temperature `T` (K), per
    /// second, `(g_u / g_l) A n(nu, T)`. Zero at T = 0.
    pub fn lower_to_upper_rate(&self, temperature: f64) -> f64 {
        let Some(rate) = &self.rate_override else {
            let occupation = Self::photon_occupation(self.frequency(), temperature);
            return self.degeneracy_ratio() * self.einstein_a * occupation;
        };
        if temperature == 0.0 {
            return 0.0;
        }
        let boltzmann = (-self.energy_gap_kev() / (BOLTZMANN_KEV_PER_K * temperature)).exp();
        self.degeneracy_ratio() * boltzmann * rate(temperature)
    }

    fn degeneracy_ratio(&self) -> f64 {
        self.upper.multiplicity() as f64 / self.lower.multiplicity() as f64
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("upper", &self.upper)
            .field("lower", &self.lower)
            .field("einstein_a", &self.einstein_a)
            .field("properties", &self.properties)
            .field("rate_override", &self.rate_override.is_some())
            .finish()
    }
}
