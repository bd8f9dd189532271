// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::harmonics::{YEAR, harmonics};
use crate::model::check_horizon;
use nalgebra::DMatrix;
use seer_core::{MvNormal, Normal, SeerError};
use seer_kalman::{GaussianState, LinearGaussianSystem, block_diag, diag, eye};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Process variance of the level coordinate.
pub const LEVEL_VARIANCE: f64 = 1e15;
/// Process variance of the trend coordinate.
pub const TREND_VARIANCE: f64 = 1e5;
/// Process variance of each harmonic coordinate.
pub const HARMONIC_VARIANCE: f64 = 1e4;

/// Trend plus seasonal-harmonic component of a stream.
///
/// The belief is laid out as `(level, trend, h1_cos, h1_sin, ...)`, one pair per
/// harmonic of the stream period up to a year.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deterministic {
    belief: MvNormal,
}

fn process_variances(dim: usize) -> Vec<f64> {
    let mut out = vec![HARMONIC_VARIANCE; dim];
    out[0] = LEVEL_VARIANCE;
    out[1] = TREND_VARIANCE;
    out
}

fn rotation(frequency: f64) -> DMatrix<f64> {
    let theta = 2.0 * PI / frequency;
    let (sin, cos) = theta.sin_cos();
    DMatrix::from_row_slice(2, 2, &[cos, sin, -sin, cos])
}

impl Deterministic {
    /// Diffuse zero-mean prior sized for `period`.
    pub fn new(period: f64) -> Result<Self, SeerError> {
        let dim = 2 + 2 * harmonics(period, YEAR)?.len();
        let covariance = process_variances(dim);

        let mut dense = vec![0.0; dim * dim];
        for (i, var) in covariance.into_iter().enumerate() {
            dense[i * dim + i] = var;
        }
        Ok(Self {
            belief: MvNormal::new(vec![0.0; dim], dense)?,
        })
    }

    pub fn dim(&self) -> usize {
        self.belief.dim()
    }

    pub fn belief(&self) -> &MvNormal {
        &self.belief
    }

    /// Local-trend block followed by one rotation block per harmonic.
    pub fn system(
        &self,
        noise: f64,
        walk: f64,
        period: f64,
    ) -> Result<LinearGaussianSystem, SeerError> {
        let frequencies = harmonics(period, YEAR)?;
        let dim = 2 + 2 * frequencies.len();

        let mut blocks = Vec::with_capacity(1 + frequencies.len());
        blocks.push(DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 0.0, 1.0]));
        blocks.extend(frequencies.iter().map(|&f| rotation(f)));
        let a = block_diag(&blocks);

        let c = DMatrix::from_fn(1, dim, |_, j| if j % 2 == 0 { 1.0 } else { 0.0 });
        let q = diag(&process_variances(dim));
        let r = DMatrix::from_element(1, 1, noise + walk);

        LinearGaussianSystem::new(a, eye(dim), c, q, r)
    }

    /// Filters one observation and returns the post-fit residual.
    pub fn update(
        &mut self,
        noise: f64,
        walk: f64,
        period: f64,
        value: f64,
    ) -> Result<f64, SeerError> {
        let system = self.system(noise, walk, period)?;
        let state = GaussianState::from_belief(&self.belief)?;

        let predicted = seer_kalman::predict(&state, &system)?;
        let (posterior, residual) = seer_kalman::update(&predicted, &system, value)?;
        self.belief = posterior.to_belief();
        Ok(residual)
    }

    /// Noise-free projection of the current belief over `n` steps.
    pub fn forecast(&self, period: f64, n: usize) -> Result<Vec<Normal>, SeerError> {
        check_horizon(n)?;
        let system = self.system(0.0, 0.0, period)?;
        let mut state = GaussianState::from_belief(&self.belief)?;

        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            state = seer_kalman::predict(&state, &system)?;
            out.push(seer_kalman::observe(&state, &system)?.marginal(0)?);
        }
        Ok(out)
    }
}
