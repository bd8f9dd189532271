// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod deterministic;
pub mod harmonics;
pub mod model;
pub mod rce;
pub mod stochastic;

pub use deterministic::{Deterministic, HARMONIC_VARIANCE, LEVEL_VARIANCE, TREND_VARIANCE};
pub use harmonics::{YEAR, harmonics};
pub use model::{MAX_FORECAST_HORIZON, Model, check_horizon, period_ns};
pub use rce::Rce;
pub use stochastic::Stochastic;

/// Structural forecasting model for seer.
pub fn crate_name() -> &'static str {
    let _ = seer_kalman::crate_name();
    "seer-model"
}
