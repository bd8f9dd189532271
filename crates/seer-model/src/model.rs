// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::deterministic::Deterministic;
use crate::harmonics::{YEAR, harmonics};
use crate::rce::Rce;
use crate::stochastic::Stochastic;
use seer_core::{Normal, SeerError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Longest forecast, in periods, a single call may request.
pub const MAX_FORECAST_HORIZON: usize = 10_000;

/// Rejects horizons outside `1..=MAX_FORECAST_HORIZON`.
pub fn check_horizon(n: usize) -> Result<(), SeerError> {
    if n == 0 {
        return Err(SeerError::invalid_parameter(
            "forecast horizon must be >= 1; got 0",
        ));
    }
    if n > MAX_FORECAST_HORIZON {
        return Err(SeerError::invalid_parameter(format!(
            "forecast horizon must be <= {MAX_FORECAST_HORIZON}; got {n}"
        )));
    }
    Ok(())
}

/// Converts a period in seconds to whole nanoseconds, truncating toward zero.
pub fn period_ns(period: f64) -> Result<i64, SeerError> {
    let ns = (period * 1e9).trunc();
    if !(ns.is_finite() && ns >= 1.0 && ns <= i64::MAX as f64) {
        return Err(SeerError::invalid_parameter(format!(
            "period {period}s is not representable in nanoseconds"
        )));
    }
    Ok(ns as i64)
}

/// Per-stream structural model: deterministic trend/seasonality, a stochastic
/// local level, and the noise estimator that feeds both.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Model {
    deterministic: Deterministic,
    stochastic: Stochastic,
    rce: Rce,
    last_event_ns: Option<i64>,
}

impl Model {
    pub fn new(period: f64) -> Result<Self, SeerError> {
        if !(period.is_finite() && period >= 1.0) {
            return Err(SeerError::invalid_parameter(format!(
                "period must be 1s or longer; got {period}"
            )));
        }
        Ok(Self {
            deterministic: Deterministic::new(period)?,
            stochastic: Stochastic::new(),
            rce: Rce::new(),
            last_event_ns: None,
        })
    }

    pub fn deterministic(&self) -> &Deterministic {
        &self.deterministic
    }

    pub fn stochastic(&self) -> &Stochastic {
        &self.stochastic
    }

    pub fn rce(&self) -> &Rce {
        &self.rce
    }

    /// Timestamp of the most recently absorbed observation.
    pub fn last_event_ns(&self) -> Option<i64> {
        self.last_event_ns
    }

    /// Positions the clock one period before the first observation to absorb.
    pub fn anchor_clock(&mut self, first_event_ns: i64, period: f64) -> Result<(), SeerError> {
        let step = period_ns(period)?;
        let anchored = first_event_ns.checked_sub(step).ok_or_else(|| {
            SeerError::sequence_violation(format!(
                "first event time {first_event_ns} is too early to anchor a {period}s clock"
            ))
        })?;
        self.last_event_ns = Some(anchored);
        Ok(())
    }

    /// Absorbs one observation and returns the deterministic residual.
    ///
    /// The model is left untouched when any stage fails.
    pub fn update(&mut self, period: f64, value: f64) -> Result<f64, SeerError> {
        if !value.is_finite() {
            return Err(SeerError::invalid_parameter(format!(
                "observed value must be finite; got {value}"
            )));
        }
        let step = period_ns(period)?;
        let mut next = self.clone();

        let (noise, walk) = (next.rce.noise(), next.rce.walk());
        let residual = next.deterministic.update(noise, walk, period, value)?;
        next.rce.update(residual);

        let (noise, walk) = (next.rce.noise(), next.rce.walk());
        next.stochastic.update(noise, walk, residual)?;
        next.last_event_ns = match next.last_event_ns {
            Some(t) => Some(t.checked_add(step).ok_or_else(|| {
                SeerError::sequence_violation("stream clock overflowed i64 nanoseconds")
            })?),
            None => None,
        };

        debug!(value, residual, noise, walk, "model absorbed observation");
        *self = next;
        Ok(residual)
    }

    /// Predictive distribution for each of the next `n` steps.
    pub fn forecast(&self, period: f64, n: usize) -> Result<Vec<Normal>, SeerError> {
        check_horizon(n)?;
        let d = self.deterministic.forecast(period, n)?;
        let s = self
            .stochastic
            .forecast(self.rce.noise(), self.rce.walk(), n)?;

        Ok(d.iter()
            .zip(&s)
            .map(|(d, s)| Normal {
                location: d.location + s.location,
                scale: d.scale.hypot(s.scale),
            })
            .collect())
    }

    /// Structural checks for state restored from storage.
    pub fn validate(&self, period: f64) -> Result<(), SeerError> {
        let expected = 2 + 2 * harmonics(period, YEAR)?.len();
        self.deterministic.belief().validate()?;
        if self.deterministic.dim() != expected {
            return Err(SeerError::dimension_mismatch(format!(
                "deterministic dim ({}) must equal harmonic basis dim ({expected})",
                self.deterministic.dim()
            )));
        }
        self.stochastic.belief().validate()?;
        if self.stochastic.belief().dim() != 1 {
            return Err(SeerError::dimension_mismatch(format!(
                "stochastic dim ({}) must equal 1",
                self.stochastic.belief().dim()
            )));
        }
        self.rce.validate()
    }
}
