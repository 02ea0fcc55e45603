//! Sparse matrix-exponential propagation.

use super::{validate_inputs, KineticsSolver};
use crate::errors::{LvlrsError, LvlrsResult};
use crate::species::Species;
use log::debug;
use ndarray::{Array1, Array2, ArrayView1};
use sprs::{CsMat, TriMat};

/// Largest 1-norm of the scaled step matrix for which the truncated Taylor
/// series is evaluated directly; larger steps are split.
const THETA: f64 = 0.5;

/// Exact propagator for the linear system `dy/dt = M y`: for each grid
/// interval, `y(t + dt) = exp(dt M) y(t)` evaluated as a matrix-exponential
/// action on the current population vector.
///
/// The rate matrix is stored once in CSR form and the exponential is never
/// formed: each interval is split into `s = ceil(||dt M||_1 / theta)`
/// sub-steps and each sub-step applies a truncated Taylor series through
/// sparse matrix-vector products, with early exit once the running term is
/// negligible against the accumulated result.
#[derive(Debug, Clone)]
pub struct SparseExpm {
    taylor_terms: usize,
    tol: f64,
}

impl Default for SparseExpm {
    fn default() -> Self {
        Self {
            taylor_terms: 30,
            tol: 1.0e-16,
        }
    }
}

impl SparseExpm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of Taylor terms per sub-step.
    pub fn with_taylor_terms(mut self, taylor_terms: usize) -> Self {
        self.taylor_terms = taylor_terms;
        self
    }

    /// Sets the relative truncation tolerance for the Taylor series.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// One application of `exp(B)` to `y` by truncated Taylor series, for a
    /// scaled matrix with `||B||_1 <= THETA`.
    fn apply_taylor(&self, b: &CsMat<f64>, y: &Array1<f64>, step: usize) -> LvlrsResult<Array1<f64>> {
        let mut term = y.clone();
        let mut acc = y.clone();
        for k in 1..=self.taylor_terms {
            term = &(b * &term) / k as f64;
            acc += &term;
            let term_norm = inf_norm(&term);
            if term_norm <= self.tol * inf_norm(&acc) {
                return Ok(acc);
            }
        }
        Err(LvlrsError::NonConvergence {
            step,
            iterations: self.taylor_terms,
        })
    }
}

impl KineticsSolver for SparseExpm {
    fn evolve(
        &self,
        species: &Species,
        temperature: f64,
        y0: ArrayView1<'_, f64>,
        times: ArrayView1<'_, f64>,
    ) -> LvlrsResult<Array2<f64>> {
        let rate_matrix = species.compute_rate_matrix(temperature)?;
        let n = rate_matrix.nrows();
        validate_inputs(n, &y0, &times)?;

        // CSR assembly happens once; only the scale changes per interval.
        let mut triplets = TriMat::new((n, n));
        for ((row, col), &value) in rate_matrix.indexed_iter() {
            if value != 0.0 {
                triplets.add_triplet(row, col, value);
            }
        }
        let csr: CsMat<f64> = triplets.to_csr();
        let matrix_norm = one_norm(&rate_matrix);

        let mut trajectory = Array2::zeros((n, times.len()));
        trajectory.column_mut(0).assign(&y0);

        let mut y = y0.to_owned();
        for step in 1..times.len() {
            let dt = times[step] - times[step - 1];
            let substeps = ((dt * matrix_norm / THETA).ceil() as usize).max(1);
            let scaled = csr.map(|value| value * dt / substeps as f64);
            debug!("interval {step}: dt = {dt}, {substeps} exponential sub-steps");
            for _ in 0..substeps {
                y = self.apply_taylor(&scaled, &y, step)?;
            }
            trajectory.column_mut(step).assign(&y);
        }
        Ok(trajectory)
    }
}

fn inf_norm(v: &Array1<f64>) -> f64 {
    v.iter().fold(0.0, |norm: f64, &value| norm.max(value.abs()))
}

/// Maximum absolute column sum.
fn one_norm(m: &Array2<f64>) -> f64 {
    m.columns()
        .into_iter()
        .map(|column| column.iter().map(|value| value.abs()).sum())
        .fold(0.0, f64::max)
}
