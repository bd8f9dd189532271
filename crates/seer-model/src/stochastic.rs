// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::model::check_horizon;
use nalgebra::DMatrix;
use seer_core::{MvNormal, Normal, SeerError};
use seer_kalman::{GaussianState, LinearGaussianSystem};
use serde::{Deserialize, Serialize};

/// Prior variance of the residual level.
pub const PRIOR_VARIANCE: f64 = 1e12;

/// Scalar local-level model of whatever the deterministic component leaves unexplained.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stochastic {
    belief: MvNormal,
}

impl Default for Stochastic {
    fn default() -> Self {
        Self {
            belief: MvNormal {
                location: vec![0.0],
                covariance: vec![PRIOR_VARIANCE],
            },
        }
    }
}

impl Stochastic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn belief(&self) -> &MvNormal {
        &self.belief
    }

    pub fn system(&self, noise: f64, walk: f64) -> Result<LinearGaussianSystem, SeerError> {
        let one = DMatrix::from_element(1, 1, 1.0);
        LinearGaussianSystem::new(
            one.clone(),
            one.clone(),
            one,
            DMatrix::from_element(1, 1, walk),
            DMatrix::from_element(1, 1, noise),
        )
    }

    pub fn update(&mut self, noise: f64, walk: f64, value: f64) -> Result<f64, SeerError> {
        let system = self.system(noise, walk)?;
        let state = GaussianState::from_belief(&self.belief)?;

        let predicted = seer_kalman::predict(&state, &system)?;
        let (posterior, residual) = seer_kalman::update(&predicted, &system, value)?;
        self.belief = posterior.to_belief();
        Ok(residual)
    }

    pub fn forecast(&self, noise: f64, walk: f64, n: usize) -> Result<Vec<Normal>, SeerError> {
        check_horizon(n)?;
        let system = self.system(noise, walk)?;
        let mut state = GaussianState::from_belief(&self.belief)?;

        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            state = seer_kalman::predict(&state, &system)?;
            out.push(seer_kalman::observe(&state, &system)?.marginal(0)?);
        }
        Ok(out)
    }
}
