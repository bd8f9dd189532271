// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use seer_core::SeerError;

/// Length of the longest seasonal cycle modeled, in seconds.
pub const YEAR: f64 = 31_577_600.0;

/// Seasonal frequencies (as cycle lengths in seconds) between `min` and `max`.
///
/// For each decade `i` below `floor(log10(max / min))` this yields
/// `max / 10^i / j` for `j = 1..=9`, followed by `max / 10^magnitude`.
/// Longest cycles come first within each decade.
pub fn harmonics(min: f64, max: f64) -> Result<Vec<f64>, SeerError> {
    if !(min.is_finite() && max.is_finite() && min > 0.0 && max > min) {
        return Err(SeerError::invalid_parameter(format!(
            "harmonics require 0 < min < max; got min={min}, max={max}"
        )));
    }

    let magnitude = (max / min).log10().floor() as i32;
    let mut out = Vec::with_capacity(9 * magnitude.max(0) as usize + 1);
    for i in 0..magnitude {
        let decade = max / 10f64.powi(i);
        out.extend((1..=9).map(|j| decade / f64::from(j)));
    }
    out.push(max / 10f64.powi(magnitude));
    Ok(out)
}
