// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod block;
pub mod filter;
pub mod state;
pub mod system;

pub use block::{block_diag, diag, eye};
pub use filter::{observe, observe_state, predict, update};
pub use state::GaussianState;
pub use system::LinearGaussianSystem;

/// Kalman filtering primitives for seer.
pub fn crate_name() -> &'static str {
    let _ = seer_core::crate_name();
    "seer-kalman"
}
