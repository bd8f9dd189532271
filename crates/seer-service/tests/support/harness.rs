// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]
#![allow(dead_code)]

use seer_core::{ErrorKind, SeerError};
use seer_service::{CreateStreamRequest, ForecastConfig, SeerService, UpdateStreamRequest};
use seer_store::{FileStore, MemoryStore, PayloadCodec};
use seer_stream::{Domain, StreamSummary};
use std::path::Path;
use std::sync::Arc;

pub const HOUR: f64 = 3_600.0;
pub const HOUR_NS: i64 = 3_600_000_000_000;

pub fn memory_service() -> Arc<SeerService> {
    Arc::new(
        SeerService::new(Arc::new(MemoryStore::new()), ForecastConfig::default())
            .expect("memory service should build"),
    )
}

pub fn file_service(root: &Path) -> Arc<SeerService> {
    let store = FileStore::open(root, PayloadCodec::Bincode).expect("file store should open");
    Arc::new(
        SeerService::new(Arc::new(store), ForecastConfig::default())
            .expect("file service should build"),
    )
}

pub fn create_hourly(service: &SeerService, name: &str) -> StreamSummary {
    service
        .create_stream(CreateStreamRequest {
            name: name.to_string(),
            period: HOUR,
            min: 0.0,
            max: 0.0,
            domain: Domain::Continuous,
        })
        .expect("create should succeed")
}

/// Daily sawtooth value for tick `i`.
pub fn sample(i: i64) -> f64 {
    50.0 + (i % 24) as f64
}

/// Appends `batch` consecutive hourly events starting at tick `start`.
pub fn append(
    service: &SeerService,
    name: &str,
    start: i64,
    batch: i64,
) -> Result<StreamSummary, SeerError> {
    let ticks: Vec<i64> = (start..start + batch).collect();
    service.update_stream(UpdateStreamRequest {
        name: name.to_string(),
        values: ticks.iter().copied().map(sample).collect(),
        times_ns: ticks.iter().map(|tick| tick * HOUR_NS).collect(),
    })
}

/// Appends one event at the stream's next tick, retrying when another writer got there first.
pub fn append_next(service: &SeerService, name: &str) -> StreamSummary {
    loop {
        let summary = service.get_stream(name).expect("stream should exist");
        let next = summary
            .last_event_ns
            .map_or(0, |last| last / HOUR_NS + 1);
        match append(service, name, next, 1) {
            Ok(summary) => return summary,
            Err(err) if err.kind() == ErrorKind::SequenceViolation => continue,
            Err(err) => panic!("unexpected update failure: {err}"),
        }
    }
}
