//! Weisskopf single-particle estimates for unmeasured Einstein A
//! coefficients.
//!
//! Given the energies, spins, and parities of two states and the mass
//! number of the species, [`estimate`] sums the single-particle electric or
//! magnetic multipole rate over every allowed gamma multipolarity. Loaders
//! use this when a measured decay rate is missing from the evaluated data.

use crate::errors::{LvlrsError, LvlrsResult};

/// hbar c in keV fm.
const HBARC_KEV_FM: f64 = 197_000.0;

/// Nuclear radius prefactor in fm: R = 1.2 A^(1/3).
const RADIUS_FM: f64 = 1.2;

/// Single-particle estimates overpredict measured rates by roughly an order
/// of magnitude; the customary hindrance factor divides it back out.
const HINDRANCE: f64 = 10.0;

const PER_SECOND_SCALE: f64 = 1.0e21;

/// The parity of a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    fn sign(self) -> i32 {
        match self {
            Parity::Even => 1,
            Parity::Odd => -1,
        }
    }
}

/// The electric multipole rate of order `j` between states at `e_i` and
/// `e_f` (keV, `e_i > e_f`) in a nucleus of mass number `a`, per second.
pub fn rate_electric(e_i: f64, e_f: f64, j: u32, a: u32) -> f64 {
    let j = j as f64;
    let strength = (4.4 * (j + 1.0) / (j * double_factorial(2.0 * j + 1.0).powi(2)))
        * (3.0 / (j + 3.0)).powi(2);
    strength
        * ((e_i - e_f) / HBARC_KEV_FM).powf(2.0 * j + 1.0)
        * (RADIUS_FM * (a as f64).powf(1.0 / 3.0)).powf(2.0 * j)
        * PER_SECOND_SCALE
}

/// The magnetic multipole rate of order `j`, per second. Differs from the
/// electric one in strength (1.9 vs 4.4) and in carrying two fewer powers
/// of the nuclear radius.
pub fn rate_magnetic(e_i: f64, e_f: f64, j: u32, a: u32) -> f64 {
    let j = j as f64;
    let strength = (1.9 * (j + 1.0) / (j * double_factorial(2.0 * j + 1.0).powi(2)))
        * (3.0 / (j + 3.0)).powi(2);
    strength
        * ((e_i - e_f) / HBARC_KEV_FM).powf(2.0 * j + 1.0)
        * (RADIUS_FM * (a as f64).powf(1.0 / 3.0)).powf(2.0 * j - 2.0)
        * PER_SECOND_SCALE
}

/// Estimates the Einstein A coefficient (per second) of the downward
/// transition between two states.
///
/// `energies`, `spins`, and `parities` give initial (upper) and final
/// (lower) state values in that order; `mass_number` is the species' A. The
/// gamma angular momentum runs over `max(1, |j_i - j_f|) ..= j_i + j_f`;
/// each multipolarity contributes the electric rate when
/// `(-1)^j * parity_i == parity_f` and the magnetic rate otherwise, reduced
/// by the customary hindrance factor.
pub fn estimate(
    energies: [f64; 2],
    spins: [u32; 2],
    parities: [Parity; 2],
    mass_number: u32,
) -> LvlrsResult<f64> {
    let j_min = 1.max(spins[0].abs_diff(spins[1]));
    let j_max = spins[0] + spins[1];
    if j_max < j_min {
        return Err(LvlrsError::Error(format!(
            "no allowed gamma multipolarity between spins {} and {}",
            spins[0], spins[1]
        )));
    }

    let mut einstein_a = 0.0;
    for j in j_min..=j_max {
        let parity_flip = if j % 2 == 0 { 1 } else { -1 };
        let rate = if parity_flip * parities[0].sign() == parities[1].sign() {
            rate_electric(energies[0], energies[1], j, mass_number)
        } else {
            rate_magnetic(energies[0], energies[1], j, mass_number)
        };
        einstein_a += rate / HINDRANCE;
    }
    Ok(einstein_a)
}

/// Double factorial of an odd argument, `n!! = n (n-2) (n-4) ...`.
fn double_factorial(n: f64) -> f64 {
    let mut result = 1.0;
    let mut k = n;
    while k > 1.0 {
        result *= k;
        k -= 2.0;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn double_factorial_of_odd_arguments() {
        assert_eq!(double_factorial(1.0), 1.0);
        assert_eq!(double_factorial(3.0), 3.0);
        assert_eq!(double_factorial(5.0), 15.0);
        assert_eq!(double_factorial(7.0), 105.0);
    }

    #[test]
    fn electric_dipole_rate() {
        // E1, 100 keV, A = 60, evaluated by hand from the formula.
        let j = 1.0_f64;
        let strength = (4.4 * 2.0 / (j * 9.0)) * (3.0 / 4.0_f64).powi(2);
        let expected = strength
            * (100.0 / HBARC_KEV_FM).powi(3)
            * (1.2 * 60.0_f64.powf(1.0 / 3.0)).powi(2)
            * 1.0e21;
        assert_relative_eq!(rate_electric(100.0, 0.0, 1, 60), expected, max_relative = 1e-12);
    }

    #[test]
    fn magnetic_dipole_carries_no_radius_dependence() {
        // For j = 1 the radius power is 2j - 2 = 0.
        let light = rate_magnetic(100.0, 0.0, 1, 20);
        let heavy = rate_magnetic(100.0, 0.0, 1, 200);
        assert_relative_eq!(light, heavy, max_relative = 1e-12);
    }

    #[test]
    fn higher_multipoles_are_strongly_suppressed() {
        let e1 = rate_electric(100.0, 0.0, 1, 60);
        let e2 = rate_electric(100.0, 0.0, 2, 60);
        assert!(e2 < 1e-3 * e1);
    }

    #[test]
    fn parity_selects_electric_or_magnetic() {
        // 1- -> 0+: E1 only; rate is the hindered electric dipole.
        let a = estimate(
            [100.0, 0.0],
            [1, 0],
            [Parity::Odd, Parity::Even],
            60,
        )
        .unwrap();
        assert_relative_eq!(a, rate_electric(100.0, 0.0, 1, 60) / 10.0, max_relative = 1e-12);

        // 1+ -> 0+: M1 only.
        let a = estimate(
            [100.0, 0.0],
            [1, 0],
            [Parity::Even, Parity::Even],
            60,
        )
        .unwrap();
        assert_relative_eq!(a, rate_magnetic(100.0, 0.0, 1, 60) / 10.0, max_relative = 1e-12);
    }

    #[test]
    fn estimate_sums_allowed_multipoles() {
        // 2+ -> 1+: j runs over {1, 2, 3}; parity selection alternates
        // M1, E2, M3.
        let a = estimate(
            [200.0, 50.0],
            [2, 1],
            [Parity::Even, Parity::Even],
            26,
        )
        .unwrap();
        let expected = (rate_magnetic(200.0, 50.0, 1, 26)
            + rate_electric(200.0, 50.0, 2, 26)
            + rate_magnetic(200.0, 50.0, 3, 26))
            / 10.0;
        assert_relative_eq!(a, expected, max_relative = 1e-12);
    }

    #[test]
    fn zero_spins_have_no_allowed_multipole() {
        let result = estimate([100.0, 0.0], [0, 0], [Parity::Even, Parity::Even], 60);
        assert!(result.is_err());
    }
}
