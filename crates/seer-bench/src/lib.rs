// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use seer_core::SeerError;
use seer_stream::{Domain, Stream, StreamConfig};

pub const HOUR: f64 = 3_600.0;
pub const DAY: f64 = 86_400.0;

/// Daily sawtooth with deterministic LCG jitter in `[-1, 1)`.
pub fn seasonal_series(n: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    (0..n)
        .map(|i| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let jitter = ((state >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0;
            100.0 + (i % 24) as f64 + jitter
        })
        .collect()
}

/// Event times for `n` consecutive ticks of `period` seconds starting at zero.
pub fn ticks(n: usize, period: f64) -> Vec<i64> {
    let step_ns = (period * 1e9) as i64;
    (0..n as i64).map(|i| i * step_ns).collect()
}

/// A stream of `domain` that has absorbed `history` events.
pub fn trained_stream(period: f64, domain: Domain, history: usize) -> Result<Stream, SeerError> {
    let config = StreamConfig::new("bench_stream", period, 0.0, 1_000.0, domain)?;
    let mut stream = Stream::new(config)?;
    stream.update(&seasonal_series(history, 7), &ticks(history, period))?;
    Ok(stream)
}

/// Bench crate marker.
pub fn crate_name() -> &'static str {
    let _ = seer_model::crate_name();
    "seer-bench"
}
