// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use nalgebra::DMatrix;
use seer_core::SeerError;

/// Linear-Gaussian dynamics with scalar observations.
///
/// * `a` transition (n×n)
/// * `b` process-noise shaping (n×k)
/// * `c` measurement (1×n)
/// * `q` process-noise covariance (k×k)
/// * `r` measurement-noise covariance (1×1)
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGaussianSystem {
    a: DMatrix<f64>,
    b: DMatrix<f64>,
    c: DMatrix<f64>,
    q: DMatrix<f64>,
    r: DMatrix<f64>,
}

fn require_eq(lhs: (&str, usize), rhs: (&str, usize)) -> Result<(), SeerError> {
    if lhs.1 != rhs.1 {
        return Err(SeerError::dimension_mismatch(format!(
            "{} ({}) must equal {} ({})",
            lhs.0, lhs.1, rhs.0, rhs.1
        )));
    }
    Ok(())
}

impl LinearGaussianSystem {
    pub fn new(
        a: DMatrix<f64>,
        b: DMatrix<f64>,
        c: DMatrix<f64>,
        q: DMatrix<f64>,
        r: DMatrix<f64>,
    ) -> Result<Self, SeerError> {
        require_eq(("A rows", a.nrows()), ("A cols", a.ncols()))?;
        require_eq(("B rows", b.nrows()), ("A rows", a.nrows()))?;
        require_eq(("C cols", c.ncols()), ("A rows", a.nrows()))?;
        require_eq(("Q rows", q.nrows()), ("Q cols", q.ncols()))?;
        require_eq(("Q rows", q.nrows()), ("B cols", b.ncols()))?;
        require_eq(("R rows", r.nrows()), ("R cols", r.ncols()))?;
        require_eq(("C rows", c.nrows()), ("R rows", r.nrows()))?;
        require_eq(("C rows", c.nrows()), ("observation dim", 1))?;

        Ok(Self { a, b, c, q, r })
    }

    /// Process (state) dimension `n`.
    pub fn dim(&self) -> usize {
        self.a.nrows()
    }

    pub fn a(&self) -> &DMatrix<f64> {
        &self.a
    }

    pub fn b(&self) -> &DMatrix<f64> {
        &self.b
    }

    pub fn c(&self) -> &DMatrix<f64> {
        &self.c
    }

    pub fn q(&self) -> &DMatrix<f64> {
        &self.q
    }

    pub fn r(&self) -> &DMatrix<f64> {
        &self.r
    }
}
