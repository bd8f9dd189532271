// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::error::SeerError;
use statrs::function::erf::erfc_inv;
use std::f64::consts::SQRT_2;

/// Distributions with a computable inverse CDF on `[0, 1]`.
pub trait Quantile {
    fn quantile(&self, p: f64) -> Result<f64, SeerError>;
}

/// Rejects probabilities outside `[0, 1]` (NaN included).
pub fn validate_probability(p: f64) -> Result<(), SeerError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(SeerError::invalid_parameter(format!(
            "probabilities must be between 0 and 1; got {p}"
        )));
    }
    Ok(())
}

/// Inverse CDF of the standard normal; `p = 0` and `p = 1` map to the infinities.
pub fn standard_normal_quantile(p: f64) -> f64 {
    -SQRT_2 * erfc_inv(2.0 * p)
}

/// Central interval holding probability mass `p`: `(q(0.5 - p/2), q(0.5 + p/2))`.
pub fn confidence_interval<Q>(dist: &Q, p: f64) -> Result<(f64, f64), SeerError>
where
    Q: Quantile + ?Sized,
{
    validate_probability(p)?;
    let lower = dist.quantile(0.5 - p / 2.0)?;
    let upper = dist.quantile(0.5 + p / 2.0)?;
    Ok((lower, upper))
}
