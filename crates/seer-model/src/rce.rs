// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use seer_core::{InverseGamma, SeerError};
use serde::{Deserialize, Serialize};

pub const THETA_PRIOR_SHAPE: f64 = 2.0;
pub const THETA_PRIOR_SCALE: f64 = 180.0;
pub const ZETA_PRIOR_SHAPE: f64 = 2.0;
pub const ZETA_PRIOR_SCALE: f64 = 100.0;

/// Recursive covariance estimator.
///
/// `zeta` accumulates squared lag-1 differences and `theta` squared lag-2
/// differences of the values fed to [`Rce::update`]; `walk` and `noise` are
/// derived from their posterior means. `history[0]` is the most recent value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rce {
    theta: InverseGamma,
    zeta: InverseGamma,
    history: [f64; 2],
}

impl Default for Rce {
    fn default() -> Self {
        Self {
            theta: InverseGamma {
                shape: THETA_PRIOR_SHAPE,
                scale: THETA_PRIOR_SCALE,
            },
            zeta: InverseGamma {
                shape: ZETA_PRIOR_SHAPE,
                scale: ZETA_PRIOR_SCALE,
            },
            history: [0.0; 2],
        }
    }
}

impl Rce {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn theta(&self) -> &InverseGamma {
        &self.theta
    }

    pub fn zeta(&self) -> &InverseGamma {
        &self.zeta
    }

    pub fn history(&self) -> [f64; 2] {
        self.history
    }

    /// Process (random walk) variance estimate.
    pub fn walk(&self) -> f64 {
        (self.zeta.mean() - 0.5 * self.theta.mean()).abs()
    }

    /// Observation noise variance estimate.
    pub fn noise(&self) -> f64 {
        (self.zeta.mean() - 2.0 * self.walk()).abs()
    }

    pub fn update(&mut self, value: f64) {
        let lag1 = value - self.history[0];
        let lag2 = value - self.history[1];

        self.zeta.shape += 0.5;
        self.zeta.scale += lag1 * lag1 / 2.0;
        self.theta.shape += 0.5;
        self.theta.scale += lag2 * lag2 / 2.0;

        self.history = [value, self.history[0]];
    }

    pub(crate) fn validate(&self) -> Result<(), SeerError> {
        for (name, dist) in [("theta", &self.theta), ("zeta", &self.zeta)] {
            InverseGamma::new(dist.shape, dist.scale)?;
            if dist.shape <= 1.0 {
                return Err(SeerError::invalid_parameter(format!(
                    "rce {name}.shape must be > 1 for a defined mean; got {}",
                    dist.shape
                )));
            }
        }
        Ok(())
    }
}
