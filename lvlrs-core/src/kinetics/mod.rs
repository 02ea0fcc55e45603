//! Time evolution of level populations.
//!
//! Both solvers consume the same `(species, temperature, y0, times)` inputs
//! and produce a `(n_levels, n_times)` trajectory whose column `k` is the
//! population vector at `times[k]`, so they are interchangeable:
//!
//! - [`NewtonRaphson`]: backward-Euler steps with an inner Newton iteration.
//!   Unconditionally stable, which matters for the stiff, widely separated
//!   rates of radiative cascades.
//! - [`SparseExpm`]: directly propagates `y(t + dt) = exp(dt M) y(t)` by a
//!   sparse matrix-exponential action, preferred when M is fixed over the
//!   grid and higher accuracy than fixed-step implicit Euler is wanted.

mod expm;
mod newton;

pub use expm::SparseExpm;
pub use newton::NewtonRaphson;

use crate::errors::{LvlrsError, LvlrsResult};
use crate::species::Species;
use ndarray::{Array1, Array2, ArrayView1};

/// A population-trajectory solver over a time grid.
pub trait KineticsSolver {
    /// Evolves `y0` over `times` (strictly increasing, seconds) under the
    /// species' rate matrix at `temperature` (K).
    ///
    /// Returns an array of shape `(n_levels, times.len())` whose first
    /// column is `y0`.
    fn evolve(
        &self,
        species: &Species,
        temperature: f64,
        y0: ArrayView1<'_, f64>,
        times: ArrayView1<'_, f64>,
    ) -> LvlrsResult<Array2<f64>>;
}

/// Per-time-step drift of the total population away from its initial value,
/// `sum(y(t_k)) - sum(y(t_0))`. A generator matrix conserves the total, so
/// these residuals measure integration error.
pub fn total_population_residuals(trajectory: &Array2<f64>) -> Array1<f64> {
    if trajectory.ncols() == 0 {
        return Array1::zeros(0);
    }
    let initial = trajectory.column(0).sum();
    trajectory
        .columns()
        .into_iter()
        .map(|column| column.sum() - initial)
        .collect()
}

pub(crate) fn validate_inputs(
    n_levels: usize,
    y0: &ArrayView1<'_, f64>,
    times: &ArrayView1<'_, f64>,
) -> LvlrsResult<()> {
    if y0.len() != n_levels {
        return Err(LvlrsError::ShapeMismatch {
            expected: n_levels,
            got: y0.len(),
        });
    }
    if times.is_empty() {
        return Err(LvlrsError::Error(
            "time grid must contain at least one point".to_string(),
        ));
    }
    for i in 1..times.len() {
        if times[i] <= times[i - 1] {
            return Err(LvlrsError::NonMonotonicTimeGrid {
                index: i,
                value: times[i],
            });
        }
    }
    Ok(())
}
