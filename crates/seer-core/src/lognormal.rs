// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::error::SeerError;
use crate::quantile::{Quantile, standard_normal_quantile, validate_probability};
use serde::{Deserialize, Serialize};

/// Log-normal distribution; `location` and `scale` are the mean and standard
/// deviation of the underlying normal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogNormal {
    pub location: f64,
    pub scale: f64,
}

impl LogNormal {
    pub fn new(location: f64, scale: f64) -> Result<Self, SeerError> {
        if !location.is_finite() {
            return Err(SeerError::invalid_parameter(format!(
                "log-normal location must be finite; got {location}"
            )));
        }
        if !(scale.is_finite() && scale > 0.0) {
            return Err(SeerError::invalid_parameter(format!(
                "log-normal scale must be strictly greater than zero; got {scale}"
            )));
        }
        Ok(Self { location, scale })
    }

    pub fn mean(&self) -> f64 {
        (self.location + self.scale * self.scale / 2.0).exp()
    }

    pub fn variance(&self) -> f64 {
        let s2 = self.scale * self.scale;
        s2.exp_m1() * (2.0 * self.location + s2).exp()
    }

    pub fn median(&self) -> f64 {
        self.location.exp()
    }
}

impl Quantile for LogNormal {
    fn quantile(&self, p: f64) -> Result<f64, SeerError> {
        validate_probability(p)?;
        Ok((self.location + self.scale * standard_normal_quantile(p)).exp())
    }
}
