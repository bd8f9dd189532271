// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::api::{
    CreateStreamRequest, GetForecastRequest, ListStreamsRequest, Request, Response,
    UpdateStreamRequest,
};
use crate::locks::StreamLocks;
use seer_core::{SeerError, validate_probability};
use seer_store::StreamStore;
use seer_stream::{DEFAULT_PROBABILITIES, Forecast, Stream, StreamConfig, StreamSummary};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Forecast settings applied to every `get_forecast` call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub probabilities: Vec<f64>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            probabilities: DEFAULT_PROBABILITIES.to_vec(),
        }
    }
}

impl ForecastConfig {
    pub fn validate(&self) -> Result<(), SeerError> {
        if self.probabilities.is_empty() {
            return Err(SeerError::invalid_parameter(
                "forecast.probabilities must contain at least one probability",
            ));
        }
        self.probabilities
            .iter()
            .try_for_each(|&p| validate_probability(p))
    }
}

/// Stream service over a shared store.
///
/// Calls touching the same stream are serialized; calls on different streams
/// run in parallel.
pub struct SeerService {
    store: Arc<dyn StreamStore>,
    forecast: ForecastConfig,
    locks: StreamLocks,
}

impl SeerService {
    pub fn new(store: Arc<dyn StreamStore>, forecast: ForecastConfig) -> Result<Self, SeerError> {
        forecast.validate()?;
        Ok(Self {
            store,
            forecast,
            locks: StreamLocks::default(),
        })
    }

    pub fn create_stream(&self, request: CreateStreamRequest) -> Result<StreamSummary, SeerError> {
        let config = StreamConfig::new(
            request.name,
            request.period,
            request.min,
            request.max,
            request.domain,
        )?;
        let stream = Stream::new(config)?;

        let lock = self.locks.handle(stream.name())?;
        let _guard = lock.acquire()?;
        self.store.create_stream(stream.name(), &stream)?;

        info!(stream = %stream.name(), period = stream.config().period, domain = stream.config().domain.as_str(), "created stream");
        Ok(stream.summary())
    }

    pub fn get_stream(&self, name: &str) -> Result<StreamSummary, SeerError> {
        let summary = self.store.get_stream(name)?.summary();
        debug!(stream = %name, "read stream");
        Ok(summary)
    }

    pub fn update_stream(&self, request: UpdateStreamRequest) -> Result<StreamSummary, SeerError> {
        let lock = self.locks.handle(&request.name)?;
        let _guard = lock.acquire()?;

        let mut stream = self.store.get_stream(&request.name)?;
        stream.update(&request.values, &request.times_ns)?;
        self.store.update_stream(&request.name, &stream)?;

        info!(stream = %request.name, events = request.values.len(), "updated stream");
        Ok(stream.summary())
    }

    pub fn delete_stream(&self, name: &str) -> Result<(), SeerError> {
        let lock = self.locks.handle(name)?;
        let _guard = lock.acquire()?;
        self.store.delete_stream(name)?;

        info!(stream = %name, "deleted stream");
        Ok(())
    }

    pub fn list_streams(&self, request: ListStreamsRequest) -> Result<Vec<StreamSummary>, SeerError> {
        let streams = self
            .store
            .list_streams(request.page_number, request.page_size)?;
        debug!(page = request.page_number, returned = streams.len(), "listed streams");
        Ok(streams.iter().map(Stream::summary).collect())
    }

    /// Forecast under the stream lock so the read never interleaves with an update.
    pub fn get_forecast(&self, request: GetForecastRequest) -> Result<Forecast, SeerError> {
        let stream = {
            let lock = self.locks.handle(&request.name)?;
            let _guard = lock.acquire()?;
            self.store.get_stream(&request.name)?
        };
        let forecast = stream.forecast(request.n, &self.forecast.probabilities)?;
        debug!(stream = %request.name, steps = request.n, "forecast stream");
        Ok(forecast)
    }

    /// Dispatches one request; failures are folded into [`Response::Error`].
    pub fn handle(&self, request: Request) -> Response {
        let op = request.op();
        let result = match request {
            Request::CreateStream(req) => self
                .create_stream(req)
                .map(|stream| Response::Stream { stream }),
            Request::GetStream { name } => self
                .get_stream(&name)
                .map(|stream| Response::Stream { stream }),
            Request::UpdateStream(req) => self
                .update_stream(req)
                .map(|stream| Response::Stream { stream }),
            Request::DeleteStream { name } => self
                .delete_stream(&name)
                .map(|()| Response::Deleted { name }),
            Request::ListStreams(req) => self
                .list_streams(req)
                .map(|streams| Response::Streams { streams }),
            Request::GetForecast(req) => self
                .get_forecast(req)
                .map(|forecast| Response::Forecast { forecast }),
        };

        result.unwrap_or_else(|err| {
            warn!(op, kind = err.kind().as_str(), error = %err, "request rejected");
            Response::from(err)
        })
    }

    #[cfg(test)]
    pub(crate) fn tracked_locks(&self) -> usize {
        self.locks.len()
    }
}
