// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use seer_core::{ErrorKind, Normal};
use seer_stream::{Domain, Stream, StreamConfig, to_log_normal, validate_contiguous};

const MIN_PROPTEST_CASES: u32 = 256;
const DAY: f64 = 86_400.0;
const DAY_NS: i64 = 86_400_000_000_000;

fn proptest_cases() -> u32 {
    std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .map(|parsed| parsed.max(MIN_PROPTEST_CASES))
        .unwrap_or(MIN_PROPTEST_CASES)
}

fn relative_close(actual: f64, expected: f64, tol: f64) -> bool {
    (actual - expected).abs() <= tol * expected.abs().max(1.0)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: proptest_cases(),
        ..ProptestConfig::default()
    })]

    #[test]
    fn log_normal_transform_preserves_first_two_moments(
        location in 1.0e-3f64..1.0e6,
        ratio in 1.0e-3f64..10.0,
    ) {
        let scale = location * ratio;
        let normal = Normal::new(location, scale).expect("generated normal should be valid");
        let ln = to_log_normal(&normal).expect("positive location should transform");
        prop_assert!(relative_close(ln.mean(), normal.mean(), 1e-9));
        prop_assert!(relative_close(ln.variance(), normal.variance(), 1e-8));
    }

    #[test]
    fn only_exact_continuations_are_accepted(
        start in -1_000_000i64..1_000_000,
        len in 1usize..16,
        jitter_at in 0usize..16,
        jitter in prop::sample::select(vec![-1i64, 1, DAY_NS]),
    ) {
        let mut times: Vec<i64> = (0..len).map(|i| start + i as i64 * DAY_NS).collect();
        prop_assert!(validate_contiguous(Some(start - DAY_NS), DAY_NS, &times).is_ok());
        prop_assert!(validate_contiguous(None, DAY_NS, &times).is_ok());

        let idx = jitter_at % len;
        times[idx] += jitter;
        let err = validate_contiguous(Some(start - DAY_NS), DAY_NS, &times)
            .expect_err("perturbed sequence must fail");
        prop_assert_eq!(err.kind(), ErrorKind::SequenceViolation);
    }
}

#[test]
fn batched_and_single_updates_reach_the_same_state() {
    let config = StreamConfig::new("orders", DAY, 0.0, 0.0, Domain::Continuous)
        .expect("config should be valid");
    let values = [12.0, 15.0, 11.0, 19.0, 14.0];
    let times: Vec<i64> = (0..5).map(|i| i * DAY_NS).collect();

    let mut batched = Stream::new(config.clone()).expect("stream should build");
    batched.update(&values, &times).expect("batch should succeed");

    let mut single = Stream::new(config).expect("stream should build");
    for (value, t_ns) in values.iter().zip(&times) {
        single
            .update(&[*value], &[*t_ns])
            .expect("single update should succeed");
    }
    assert_eq!(batched, single);
}
