// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use thiserror::Error;

/// Stable error classification used for status mapping and diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DimensionMismatch,
    InvalidParameter,
    SequenceViolation,
    NotFound,
    AlreadyExists,
    NoneFound,
    CorruptData,
    Storage,
}

impl ErrorKind {
    /// Stable user-facing kind name for diagnostics and messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DimensionMismatch => "DimensionMismatch",
            Self::InvalidParameter => "InvalidParameter",
            Self::SequenceViolation => "SequenceViolation",
            Self::NotFound => "NotFound",
            Self::AlreadyExists => "AlreadyExists",
            Self::NoneFound => "NoneFound",
            Self::CorruptData => "CorruptData",
            Self::Storage => "Storage",
        }
    }
}

/// Error type shared by every seer crate.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SeerError {
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("sequence violation: {0}")]
    SequenceViolation(String),
    #[error("no {kind} with name {name} was found in store")]
    NotFound { kind: String, name: String },
    #[error("a {kind} with name {name} already exists")]
    AlreadyExists { kind: String, name: String },
    #[error("no entities of kind {kind} were found")]
    NoneFound { kind: String },
    #[error("unable to unmarshal entity of kind {kind}: {detail}")]
    CorruptData { kind: String, detail: String },
    #[error("storage failure: {0}")]
    Storage(String),
}

impl SeerError {
    pub fn dimension_mismatch(message: impl Into<String>) -> Self {
        Self::DimensionMismatch(message.into())
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    pub fn sequence_violation(message: impl Into<String>) -> Self {
        Self::SequenceViolation(message.into())
    }

    pub fn not_found(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            name: name.into(),
        }
    }

    pub fn already_exists(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::AlreadyExists {
            kind: kind.into(),
            name: name.into(),
        }
    }

    pub fn none_found(kind: impl Into<String>) -> Self {
        Self::NoneFound { kind: kind.into() }
    }

    pub fn corrupt_data(kind: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::CorruptData {
            kind: kind.into(),
            detail: detail.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DimensionMismatch(_) => ErrorKind::DimensionMismatch,
            Self::InvalidParameter(_) => ErrorKind::InvalidParameter,
            Self::SequenceViolation(_) => ErrorKind::SequenceViolation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::NoneFound { .. } => ErrorKind::NoneFound,
            Self::CorruptData { .. } => ErrorKind::CorruptData,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}
