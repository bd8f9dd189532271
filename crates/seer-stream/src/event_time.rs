// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use seer_core::SeerError;
use seer_model::check_horizon;

/// Checks that `times_ns` continue the stream clock at exactly `step_ns` spacing.
///
/// With no clock yet, the first timestamp is accepted as-is and the rest must
/// follow it. Equality is exact; there is no tolerance window.
pub fn validate_contiguous(
    clock_ns: Option<i64>,
    step_ns: i64,
    times_ns: &[i64],
) -> Result<(), SeerError> {
    let Some(&first) = times_ns.first() else {
        return Err(SeerError::sequence_violation(
            "update must contain at least one event",
        ));
    };

    let mut expected = match clock_ns {
        Some(clock) => next_tick(clock, step_ns)?,
        None => first,
    };
    for (idx, &t_ns) in times_ns.iter().enumerate() {
        if idx > 0 {
            expected = next_tick(expected, step_ns)?;
        }
        if t_ns != expected {
            return Err(SeerError::sequence_violation(format!(
                "event {idx} has time {t_ns}ns but the stream expects {expected}ns (period {step_ns}ns)"
            )));
        }
    }
    Ok(())
}

fn next_tick(t_ns: i64, step_ns: i64) -> Result<i64, SeerError> {
    t_ns.checked_add(step_ns).ok_or_else(|| {
        SeerError::sequence_violation(format!(
            "stream clock overflow advancing {t_ns}ns by {step_ns}ns"
        ))
    })
}

/// Timestamps of the `n` ticks following `clock_ns`.
pub fn future_ticks(clock_ns: i64, step_ns: i64, n: usize) -> Result<Vec<i64>, SeerError> {
    check_horizon(n)?;
    let mut out = Vec::with_capacity(n);
    let mut t_ns = clock_ns;
    for _ in 0..n {
        t_ns = next_tick(t_ns, step_ns)?;
        out.push(t_ns);
    }
    Ok(out)
}
