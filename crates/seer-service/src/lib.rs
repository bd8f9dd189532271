// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod api;
mod locks;
pub mod service;

pub use api::{
    CreateStreamRequest, GetForecastRequest, ListStreamsRequest, Request, Response, Status,
    UpdateStreamRequest,
};
pub use service::{ForecastConfig, SeerService};

/// Stream service for seer.
pub fn crate_name() -> &'static str {
    let _ = seer_store::crate_name();
    "seer-service"
}
