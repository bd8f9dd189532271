// SPDX-License-Identifier: MIT OR Apache-2.0

#![no_main]

#[path = "common.rs"]
mod common;

use libfuzzer_sys::fuzz_target;
use seer_store::{CheckpointEnvelope, PayloadCodec, STREAM_KIND, decode_envelope, encode_envelope};
use seer_stream::{Domain, Stream, StreamConfig};

const PERIODS: [f64; 6] = [1.0, 60.0, 3_600.0, 86_400.0, 604_800.0, 0.5];

fn build_config(cursor: &mut common::ByteCursor<'_>) -> Option<StreamConfig> {
    let domain = match cursor.next_u8() % 6 {
        code @ 0..=4 => Domain::from_code(i32::from(code)).ok()?,
        _ => Domain::ContinuousInterval,
    };
    let period = PERIODS[usize::from(cursor.next_u8()) % PERIODS.len()];
    let min = f64::from(cursor.next_i16()) / 4.0;
    let max = min + f64::from(cursor.next_i16()) / 4.0;
    let name = match cursor.next_u8() % 3 {
        0 => "ab".to_string(),
        _ => "fuzz_stream".to_string(),
    };
    StreamConfig::new(name, period, min, max, domain).ok()
}

fn build_value(base: f64, mode_seed: u8, raw_seed: i16) -> f64 {
    match mode_seed % 8 {
        0 | 1 | 2 => base,
        3 => f64::from(raw_seed) / 8.0,
        4 => 0.0,
        5 => f64::NAN,
        6 => f64::INFINITY,
        _ => -f64::from(raw_seed).abs(),
    }
}

fn build_times(
    stream: &Stream,
    step_ns: i64,
    len: usize,
    mode_seed: u8,
    delta_seed: i16,
) -> Vec<i64> {
    let start = match stream.last_event_ns() {
        Some(last) => match mode_seed % 4 {
            0 => last,
            1 => last.saturating_add(i64::from(delta_seed)),
            _ => last.saturating_add(step_ns),
        },
        None => i64::from(delta_seed).saturating_mul(step_ns),
    };
    let mut times: Vec<i64> = (0..len as i64)
        .map(|i| start.saturating_add(i.saturating_mul(step_ns)))
        .collect();
    if mode_seed % 7 == 0 && !times.is_empty() {
        times.pop();
    }
    times
}

fuzz_target!(|data: &[u8]| {
    let mut cursor = common::ByteCursor::new(data);

    let Some(config) = build_config(&mut cursor) else {
        return;
    };
    let step_ns = (config.period * 1e9) as i64;
    let Ok(mut stream) = Stream::new(config) else {
        return;
    };

    let payload_len = common::bounded(cursor.next_u8(), 0, 64).saturating_mul(8);
    let mut values = common::decode_f64_chunks(&cursor.take_padded(payload_len), 64);
    if values.is_empty() {
        values.push(1.0);
    }

    let mut value_idx = 0usize;
    let steps = common::bounded(cursor.next_u8(), 1, 24);
    for _ in 0..steps {
        let op_seed = cursor.next_u8();

        if op_seed % 7 == 0 {
            let horizon = common::bounded(cursor.next_u8(), 0, 8);
            let p = f64::from(cursor.next_u8()) / 200.0;
            let _ = stream.forecast(horizon, &[p, 0.9]);
            continue;
        }

        if op_seed % 11 == 0 {
            let codec = if cursor.next_u8() & 1 == 0 {
                PayloadCodec::Bincode
            } else {
                PayloadCodec::Json
            };
            if let Ok(envelope) = CheckpointEnvelope::seal(STREAM_KIND, &stream, codec)
                && let Ok(bytes) = encode_envelope(&envelope)
                && let Ok(decoded) = decode_envelope(STREAM_KIND, &bytes)
                && let Ok(restored) = decoded.open::<Stream>(STREAM_KIND)
                && restored.validate().is_ok()
            {
                assert_eq!(restored.last_event_ns(), stream.last_event_ns());
            }
            continue;
        }

        let len = common::bounded(cursor.next_u8(), 0, 6);
        let mut batch = Vec::with_capacity(len);
        for _ in 0..len {
            let base = values[value_idx % values.len()];
            value_idx = value_idx.wrapping_add(1);
            batch.push(build_value(base, cursor.next_u8(), cursor.next_i16()));
        }
        let times = build_times(&stream, step_ns, len, cursor.next_u8(), cursor.next_i16());

        let before = stream.last_event_ns();
        if stream.update(&batch, &times).is_err() {
            assert_eq!(stream.last_event_ns(), before);
        }
    }
});
