// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::block::invert;
use crate::state::GaussianState;
use crate::system::LinearGaussianSystem;
use seer_core::SeerError;

fn check_dims(state: &GaussianState, system: &LinearGaussianSystem) -> Result<(), SeerError> {
    if state.dim() != system.dim() {
        return Err(SeerError::dimension_mismatch(format!(
            "state dim ({}) must equal system dim ({})",
            state.dim(),
            system.dim()
        )));
    }
    Ok(())
}

/// Time update: `A·m` and `A·P·Aᵀ + B·Q·Bᵀ`.
pub fn predict(
    state: &GaussianState,
    system: &LinearGaussianSystem,
) -> Result<GaussianState, SeerError> {
    check_dims(state, system)?;
    let a = system.a();
    let b = system.b();

    let mean = a * state.mean();
    let covariance = a * state.covariance() * a.transpose() + b * system.q() * b.transpose();
    GaussianState::new(mean, covariance)
}

/// Marginal predictive distribution of the next observation, including measurement noise.
pub fn observe(
    state: &GaussianState,
    system: &LinearGaussianSystem,
) -> Result<GaussianState, SeerError> {
    let projected = observe_state(state, system)?;
    let (mean, covariance) = (projected.mean().clone(), projected.covariance() + system.r());
    GaussianState::new(mean, covariance)
}

/// The state's contribution to the observation: `C·m` and `C·P·Cᵀ` without `R`.
pub fn observe_state(
    state: &GaussianState,
    system: &LinearGaussianSystem,
) -> Result<GaussianState, SeerError> {
    check_dims(state, system)?;
    let c = system.c();
    GaussianState::new(c * state.mean(), c * state.covariance() * c.transpose())
}

/// Measurement update against scalar observation `value`.
///
/// Returns the posterior and the post-fit residual `value - C·m_post`. The
/// innovation covariance is inverted directly; a degenerate one produces
/// non-finite output rather than an error.
pub fn update(
    state: &GaussianState,
    system: &LinearGaussianSystem,
    value: f64,
) -> Result<(GaussianState, f64), SeerError> {
    check_dims(state, system)?;
    let c = system.c();
    let prior_cov = state.covariance();

    let innovation = value - (c * state.mean())[0];
    let innovation_cov = c * prior_cov * c.transpose() + system.r();
    let gain = prior_cov * c.transpose() * invert(&innovation_cov);

    let mean = state.mean() + gain.column(0) * innovation;
    let covariance = prior_cov - &gain * &innovation_cov * gain.transpose();
    let posterior = GaussianState::new(mean, covariance)?;

    let residual = value - (c * posterior.mean())[0];
    Ok((posterior, residual))
}
