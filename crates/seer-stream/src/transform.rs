// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use seer_core::{LogNormal, Normal, SeerError};

/// Log-normal with the same mean and variance as `normal`.
pub fn to_log_normal(normal: &Normal) -> Result<LogNormal, SeerError> {
    if !(normal.location > 0.0) {
        return Err(SeerError::invalid_parameter(format!(
            "must have strictly positive location to transform to log normal; got {}",
            normal.location
        )));
    }
    let spread = (normal.scale / normal.location).powi(2).ln_1p();
    LogNormal::new(normal.location.ln() - spread / 2.0, spread.sqrt())
}
