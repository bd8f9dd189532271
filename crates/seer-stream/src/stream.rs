// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::domain::{Domain, StreamConfig};
use crate::event_time::{future_ticks, validate_contiguous};
use crate::transform::to_log_normal;
use seer_core::{Normal, SeerError, confidence_interval, validate_probability};
use seer_model::{Model, check_horizon, period_ns};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default confidence levels reported with a forecast.
pub const DEFAULT_PROBABILITIES: [f64; 3] = [0.8, 0.9, 0.95];

/// Central interval bounds for one confidence level across every forecast step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub probability: f64,
    pub lower_bound: Vec<f64>,
    pub upper_bound: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub times_ns: Vec<i64>,
    pub values: Vec<f64>,
    pub intervals: Vec<Interval>,
}

/// Externally visible description of a stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StreamSummary {
    pub name: String,
    pub period: f64,
    pub last_event_ns: Option<i64>,
    pub domain: Domain,
    pub min: f64,
    pub max: f64,
}

/// A named stream: its configuration and the model fitted to its history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    config: StreamConfig,
    model: Model,
}

impl Stream {
    pub fn new(config: StreamConfig) -> Result<Self, SeerError> {
        config.validate()?;
        let model = Model::new(config.period)?;
        Ok(Self { config, model })
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn last_event_ns(&self) -> Option<i64> {
        self.model.last_event_ns()
    }

    pub fn summary(&self) -> StreamSummary {
        StreamSummary {
            name: self.config.name.clone(),
            period: self.config.period,
            last_event_ns: self.last_event_ns(),
            domain: self.config.domain,
            min: self.config.min,
            max: self.config.max,
        }
    }

    /// Consistency checks for a stream restored from storage.
    pub fn validate(&self) -> Result<(), SeerError> {
        self.config.validate()?;
        self.model.validate(self.config.period)
    }

    /// Absorbs `values` observed at `times_ns`, in order.
    ///
    /// The whole batch is rejected, and the stream left unchanged, if the
    /// timestamps do not continue the stream clock at exactly one period apart.
    pub fn update(&mut self, values: &[f64], times_ns: &[i64]) -> Result<(), SeerError> {
        if values.len() != times_ns.len() {
            return Err(SeerError::sequence_violation(format!(
                "update has {} values but {} timestamps",
                values.len(),
                times_ns.len()
            )));
        }
        let period = self.config.period;
        let step_ns = period_ns(period)?;
        validate_contiguous(self.last_event_ns(), step_ns, times_ns)?;

        let mut model = self.model.clone();
        if model.last_event_ns().is_none() {
            model.anchor_clock(times_ns[0], period)?;
        }
        for &value in values {
            model.update(period, value)?;
        }
        self.model = model;

        debug!(
            stream = %self.config.name,
            events = values.len(),
            last_event_ns = ?self.last_event_ns(),
            "stream updated"
        );
        Ok(())
    }

    /// Forecasts the next `n` periods with central intervals at each probability.
    pub fn forecast(&self, n: usize, probabilities: &[f64]) -> Result<Forecast, SeerError> {
        check_horizon(n)?;
        for &p in probabilities {
            validate_probability(p)?;
        }
        let Some(last_event_ns) = self.last_event_ns() else {
            return Err(SeerError::sequence_violation(format!(
                "stream {} has no events to forecast from",
                self.config.name
            )));
        };

        let period = self.config.period;
        let times_ns = future_ticks(last_event_ns, period_ns(period)?, n)?;
        let steps = self.model.forecast(period, n)?;

        let mut values = Vec::with_capacity(n);
        let mut intervals: Vec<Interval> = probabilities
            .iter()
            .map(|&probability| Interval {
                probability,
                lower_bound: Vec::with_capacity(n),
                upper_bound: Vec::with_capacity(n),
            })
            .collect();

        for step in &steps {
            let (value, bounds) = self.project(step, probabilities)?;
            values.push(value);
            for (interval, (lower, upper)) in intervals.iter_mut().zip(bounds) {
                interval.lower_bound.push(lower);
                interval.upper_bound.push(upper);
            }
        }

        Ok(Forecast {
            times_ns,
            values,
            intervals,
        })
    }

    /// Point value and interval bounds of one step, mapped into the stream's domain.
    fn project(
        &self,
        step: &Normal,
        probabilities: &[f64],
    ) -> Result<(f64, Vec<(f64, f64)>), SeerError> {
        let (value, mut bounds) = if self.config.domain.is_right() {
            let dist = to_log_normal(step)?;
            let bounds = probabilities
                .iter()
                .map(|&p| confidence_interval(&dist, p))
                .collect::<Result<Vec<_>, _>>()?;
            (dist.median(), bounds)
        } else {
            let bounds = probabilities
                .iter()
                .map(|&p| confidence_interval(step, p))
                .collect::<Result<Vec<_>, _>>()?;
            (step.location, bounds)
        };

        let value = self.constrain(value);
        for (lower, upper) in &mut bounds {
            *lower = self.constrain(*lower);
            *upper = self.constrain(*upper);
        }
        Ok((value, bounds))
    }

    /// Clamps into `[min, max]` for interval domains, then rounds discrete domains.
    fn constrain(&self, value: f64) -> f64 {
        let domain = self.config.domain;
        let value = if domain.is_interval() {
            value.clamp(self.config.min, self.config.max)
        } else {
            value
        };
        if domain.is_discrete() {
            value.round()
        } else {
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_PROBABILITIES, Stream};
    use crate::{Domain, StreamConfig};
    use seer_core::ErrorKind;
    use seer_model::MAX_FORECAST_HORIZON;

    const HOUR: f64 = 3_600.0;
    const HOUR_NS: i64 = 3_600_000_000_000;
    const T0: i64 = 1_451_606_400_000_000_000;

    fn stream(domain: Domain, min: f64, max: f64) -> Stream {
        let config = StreamConfig::new("visits", HOUR, min, max, domain)
            .expect("stream config should be valid");
        Stream::new(config).expect("stream should build")
    }

    fn hourly(n: usize) -> Vec<i64> {
        (0..n).map(|i| T0 + i as i64 * HOUR_NS).collect()
    }

    fn feed(stream: &mut Stream, n: usize) {
        let values: Vec<f64> = (0..n).map(|i| 50.0 + (i % 24) as f64).collect();
        stream
            .update(&values, &hourly(n))
            .expect("contiguous update should succeed");
    }

    #[test]
    fn first_update_sets_clock_to_last_event() {
        let mut s = stream(Domain::Continuous, 0.0, 0.0);
        assert_eq!(s.summary().last_event_ns, None);

        s.update(&[3.14, 4.43], &hourly(2)).expect("update should succeed");
        assert_eq!(s.last_event_ns(), Some(T0 + HOUR_NS));

        s.update(&[5.0], &[T0 + 2 * HOUR_NS])
            .expect("continuation should succeed");
        assert_eq!(s.summary().last_event_ns, Some(T0 + 2 * HOUR_NS));
    }

    #[test]
    fn rejected_batches_leave_stream_unchanged() {
        let mut s = stream(Domain::Continuous, 0.0, 0.0);
        feed(&mut s, 3);
        let before = s.clone();

        let cases: [(&[f64], Vec<i64>); 4] = [
            (&[1.0, 2.0], vec![T0 + 3 * HOUR_NS]),
            (&[], vec![]),
            (&[1.0], vec![T0 + 4 * HOUR_NS]),
            (&[1.0, 2.0], vec![T0 + 3 * HOUR_NS, T0 + 3 * HOUR_NS]),
        ];
        for (values, times) in cases {
            let err = s.update(values, &times).expect_err("bad batch must fail");
            assert_eq!(err.kind(), ErrorKind::SequenceViolation);
        }

        let err = s
            .update(&[1.0, f64::NAN], &[T0 + 3 * HOUR_NS, T0 + 4 * HOUR_NS])
            .expect_err("non-finite value must fail");
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert_eq!(s, before);
    }

    #[test]
    fn forecast_shapes_and_times() {
        let mut s = stream(Domain::Continuous, 0.0, 0.0);
        feed(&mut s, 48);
        let forecast = s
            .forecast(6, &DEFAULT_PROBABILITIES)
            .expect("forecast should succeed");

        assert_eq!(forecast.values.len(), 6);
        assert_eq!(forecast.times_ns[0], T0 + 48 * HOUR_NS);
        assert_eq!(forecast.times_ns[5], T0 + 53 * HOUR_NS);
        assert_eq!(forecast.intervals.len(), 3);
        for (narrow, wide) in forecast.intervals.iter().zip(&forecast.intervals[1..]) {
            assert!(narrow.probability < wide.probability);
            for i in 0..6 {
                assert!(wide.lower_bound[i] < narrow.lower_bound[i]);
                assert!(narrow.upper_bound[i] < wide.upper_bound[i]);
                assert!(narrow.lower_bound[i] < forecast.values[i]);
                assert!(forecast.values[i] < narrow.upper_bound[i]);
            }
        }
    }

    #[test]
    fn forecast_requires_history_and_valid_arguments() {
        let mut s = stream(Domain::Continuous, 0.0, 0.0);
        let err = s
            .forecast(3, &DEFAULT_PROBABILITIES)
            .expect_err("empty stream must fail");
        assert_eq!(err.kind(), ErrorKind::SequenceViolation);

        feed(&mut s, 2);
        let err = s.forecast(0, &DEFAULT_PROBABILITIES).expect_err("n = 0 must fail");
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        for n in [MAX_FORECAST_HORIZON + 1, usize::MAX] {
            let err = s
                .forecast(n, &DEFAULT_PROBABILITIES)
                .expect_err("oversized horizon must fail before allocating");
            assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        }
        let err = s.forecast(3, &[1.5]).expect_err("p > 1 must fail");
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    }

    #[test]
    fn interval_domains_clamp_and_discrete_domains_round() {
        let mut s = stream(Domain::DiscreteInterval, 40.0, 60.0);
        feed(&mut s, 48);
        let forecast = s
            .forecast(4, &DEFAULT_PROBABILITIES)
            .expect("forecast should succeed");

        let all = forecast.values.iter().chain(
            forecast
                .intervals
                .iter()
                .flat_map(|i| i.lower_bound.iter().chain(&i.upper_bound)),
        );
        for v in all {
            assert!((40.0..=60.0).contains(v), "{v} escaped [40, 60]");
            assert_eq!(v.fract(), 0.0, "{v} is not integral");
        }
    }

    #[test]
    fn right_domains_keep_bounds_positive() {
        let mut s = stream(Domain::ContinuousRight, 0.0, 0.0);
        feed(&mut s, 48);
        let forecast = s
            .forecast(4, &DEFAULT_PROBABILITIES)
            .expect("forecast should succeed");
        for interval in &forecast.intervals {
            assert!(interval.lower_bound.iter().all(|v| *v >= 0.0));
        }
        assert!(forecast.values.iter().all(|v| *v > 0.0));
    }

    #[test]
    fn right_domain_rejects_non_positive_location() {
        let mut s = stream(Domain::DiscreteRight, 0.0, 0.0);
        s.update(&[-500.0, -510.0, -505.0], &hourly(3))
            .expect("update should succeed");
        let err = s
            .forecast(2, &DEFAULT_PROBABILITIES)
            .expect_err("negative location cannot be log-normal");
        assert!(err.to_string().contains("strictly positive location"));
    }
}
