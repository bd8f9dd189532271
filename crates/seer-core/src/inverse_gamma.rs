// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::error::SeerError;
use serde::{Deserialize, Serialize};

/// Inverse-gamma distribution used as a conjugate prior on variances.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InverseGamma {
    pub shape: f64,
    pub scale: f64,
}

impl InverseGamma {
    pub fn new(shape: f64, scale: f64) -> Result<Self, SeerError> {
        if !(shape.is_finite() && shape > 0.0 && scale.is_finite() && scale > 0.0) {
            return Err(SeerError::invalid_parameter(format!(
                "inverse-gamma shape and scale must both be strictly positive; got shape={shape}, scale={scale}"
            )));
        }
        Ok(Self { shape, scale })
    }

    /// First moment; defined for `shape > 1`.
    pub fn mean(&self) -> f64 {
        self.scale / (self.shape - 1.0)
    }

    /// Second central moment; defined for `shape > 2`.
    pub fn variance(&self) -> f64 {
        let shifted = self.shape - 1.0;
        self.scale * self.scale / (shifted * shifted * (self.shape - 2.0))
    }
}
