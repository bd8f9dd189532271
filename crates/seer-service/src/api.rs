// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use seer_core::{ErrorKind, SeerError};
use seer_stream::{Domain, Forecast, StreamSummary};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateStreamRequest {
    pub name: String,
    pub period: f64,
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub max: f64,
    #[serde(default)]
    pub domain: Domain,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateStreamRequest {
    pub name: String,
    pub values: Vec<f64>,
    /// Event times in nanoseconds since the UNIX epoch, one per value.
    pub times_ns: Vec<i64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListStreamsRequest {
    pub page_number: usize,
    pub page_size: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetForecastRequest {
    pub name: String,
    pub n: usize,
}

/// One service call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    CreateStream(CreateStreamRequest),
    GetStream { name: String },
    UpdateStream(UpdateStreamRequest),
    DeleteStream { name: String },
    ListStreams(ListStreamsRequest),
    GetForecast(GetForecastRequest),
}

impl Request {
    pub const fn op(&self) -> &'static str {
        match self {
            Self::CreateStream(_) => "create_stream",
            Self::GetStream { .. } => "get_stream",
            Self::UpdateStream(_) => "update_stream",
            Self::DeleteStream { .. } => "delete_stream",
            Self::ListStreams(_) => "list_streams",
            Self::GetForecast(_) => "get_forecast",
        }
    }
}

/// Coarse outcome class reported to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    InvalidArgument,
    NotFound,
    AlreadyExists,
    DataLoss,
    Internal,
}

impl From<ErrorKind> for Status {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::DimensionMismatch
            | ErrorKind::InvalidParameter
            | ErrorKind::SequenceViolation => Self::InvalidArgument,
            ErrorKind::NotFound | ErrorKind::NoneFound => Self::NotFound,
            ErrorKind::AlreadyExists => Self::AlreadyExists,
            ErrorKind::CorruptData => Self::DataLoss,
            ErrorKind::Storage => Self::Internal,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Response {
    Stream { stream: StreamSummary },
    Streams { streams: Vec<StreamSummary> },
    Deleted { name: String },
    Forecast { forecast: Forecast },
    Error { status: Status, message: String },
}

impl From<SeerError> for Response {
    fn from(err: SeerError) -> Self {
        Self::Error {
            status: err.kind().into(),
            message: err.to_string(),
        }
    }
}
