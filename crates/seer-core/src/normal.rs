// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::error::SeerError;
use crate::quantile::{Quantile, standard_normal_quantile, validate_probability};
use serde::{Deserialize, Serialize};

/// Univariate normal distribution parameterized by mean and standard deviation.
///
/// Fields are public so that filter outputs can be carried without re-validation;
/// use [`Normal::new`] for externally supplied parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Normal {
    pub location: f64,
    pub scale: f64,
}

impl Normal {
    pub fn new(location: f64, scale: f64) -> Result<Self, SeerError> {
        if !location.is_finite() {
            return Err(SeerError::invalid_parameter(format!(
                "normal location must be finite; got {location}"
            )));
        }
        if !(scale.is_finite() && scale > 0.0) {
            return Err(SeerError::invalid_parameter(format!(
                "normal scale must be strictly greater than zero; got {scale}"
            )));
        }
        Ok(Self { location, scale })
    }

    pub fn mean(&self) -> f64 {
        self.location
    }

    pub fn variance(&self) -> f64 {
        self.scale * self.scale
    }
}

impl Quantile for Normal {
    fn quantile(&self, p: f64) -> Result<f64, SeerError> {
        validate_probability(p)?;
        Ok(self.location + self.scale * standard_normal_quantile(p))
    }
}
