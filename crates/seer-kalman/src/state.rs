// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use nalgebra::{DMatrix, DVector};
use seer_core::{MvNormal, Normal, SeerError};

/// Gaussian belief over a state vector.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianState {
    mean: DVector<f64>,
    covariance: DMatrix<f64>,
}

impl GaussianState {
    pub fn new(mean: DVector<f64>, covariance: DMatrix<f64>) -> Result<Self, SeerError> {
        if !covariance.is_square() {
            return Err(SeerError::dimension_mismatch(format!(
                "covariance rows ({}) must equal covariance cols ({})",
                covariance.nrows(),
                covariance.ncols()
            )));
        }
        if mean.len() != covariance.nrows() {
            return Err(SeerError::dimension_mismatch(format!(
                "mean rows ({}) must equal covariance rows ({})",
                mean.len(),
                covariance.nrows()
            )));
        }
        Ok(Self { mean, covariance })
    }

    pub fn from_belief(belief: &MvNormal) -> Result<Self, SeerError> {
        belief.validate()?;
        let n = belief.dim();
        Self::new(
            DVector::from_column_slice(&belief.location),
            DMatrix::from_row_slice(n, n, &belief.covariance),
        )
    }

    pub fn to_belief(&self) -> MvNormal {
        let n = self.dim();
        let mut covariance = Vec::with_capacity(n * n);
        for row in self.covariance.row_iter() {
            covariance.extend(row.iter().copied());
        }
        MvNormal {
            location: self.mean.iter().copied().collect(),
            covariance,
        }
    }

    pub fn dim(&self) -> usize {
        self.mean.len()
    }

    pub fn mean(&self) -> &DVector<f64> {
        &self.mean
    }

    pub fn covariance(&self) -> &DMatrix<f64> {
        &self.covariance
    }

    /// Scalar marginal of coordinate `index`, carried without validation so that
    /// degenerate variances stay visible to the caller.
    pub fn marginal(&self, index: usize) -> Result<Normal, SeerError> {
        if index >= self.dim() {
            return Err(SeerError::dimension_mismatch(format!(
                "marginal index ({index}) must be below state dim ({})",
                self.dim()
            )));
        }
        Ok(Normal {
            location: self.mean[index],
            scale: self.covariance[(index, index)].sqrt(),
        })
    }
}
