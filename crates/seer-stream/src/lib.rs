// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod domain;
pub mod event_time;
pub mod stream;
pub mod transform;

pub use domain::{Domain, MAX_NAME_BYTES, StreamConfig, validate_name};
pub use event_time::{future_ticks, validate_contiguous};
pub use stream::{DEFAULT_PROBABILITIES, Forecast, Interval, Stream, StreamSummary};
pub use transform::to_log_normal;

/// Stream layer for seer.
pub fn crate_name() -> &'static str {
    let _ = seer_model::crate_name();
    "seer-stream"
}
