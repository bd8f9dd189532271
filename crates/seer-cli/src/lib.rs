// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod config;
pub mod logging;
pub mod serve;

pub use config::{LogFormat, LoggingConfig, SeerConfig};
pub use logging::init_tracing;
pub use serve::{ServeStats, serve_lines};

use seer_service::SeerService;
use seer_store::open_store;

/// Opens the configured store and wraps it in a service.
pub fn build_service(config: &SeerConfig) -> anyhow::Result<SeerService> {
    let store = open_store(&config.store)?;
    Ok(SeerService::new(store, config.forecast.clone())?)
}

/// CLI namespace marker.
pub fn crate_name() -> &'static str {
    let _ = seer_service::crate_name();
    "seer-cli"
}
