// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod error;
pub mod inverse_gamma;
pub mod lognormal;
pub mod mv_normal;
pub mod normal;
pub mod quantile;

pub use error::{ErrorKind, SeerError};
pub use inverse_gamma::InverseGamma;
pub use lognormal::LogNormal;
pub use mv_normal::MvNormal;
pub use normal::Normal;
pub use quantile::{Quantile, confidence_interval, standard_normal_quantile, validate_probability};

/// Core shared types for seer.
pub fn crate_name() -> &'static str {
    "seer-core"
}
