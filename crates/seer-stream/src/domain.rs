// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use seer_core::SeerError;
use serde::{Deserialize, Serialize};

/// Support of a stream's values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Domain {
    #[default]
    Continuous,
    ContinuousRight,
    ContinuousInterval,
    DiscreteRight,
    DiscreteInterval,
}

impl Domain {
    /// Decodes the stable wire code.
    pub fn from_code(code: i32) -> Result<Self, SeerError> {
        match code {
            0 => Ok(Self::Continuous),
            1 => Ok(Self::ContinuousRight),
            2 => Ok(Self::ContinuousInterval),
            3 => Ok(Self::DiscreteRight),
            4 => Ok(Self::DiscreteInterval),
            other => Err(SeerError::invalid_parameter(format!(
                "domain code {other} is unsupported; expected 0..=4"
            ))),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Continuous => "Continuous",
            Self::ContinuousRight => "ContinuousRight",
            Self::ContinuousInterval => "ContinuousInterval",
            Self::DiscreteRight => "DiscreteRight",
            Self::DiscreteInterval => "DiscreteInterval",
        }
    }

    /// Values restricted to `[min, max]`.
    pub const fn is_interval(self) -> bool {
        matches!(self, Self::ContinuousInterval | Self::DiscreteInterval)
    }

    /// Strictly positive support, open to the right only.
    pub const fn is_right(self) -> bool {
        matches!(self, Self::ContinuousRight | Self::DiscreteRight)
    }

    pub const fn is_discrete(self) -> bool {
        matches!(self, Self::DiscreteRight | Self::DiscreteInterval)
    }
}

/// Longest stream name, in bytes. Hex-encoded with the checkpoint extension it
/// stays under the common 255-byte file-name limit.
pub const MAX_NAME_BYTES: usize = 120;

/// Checks a stream name against the length rules every store enforces.
pub fn validate_name(name: &str) -> Result<(), SeerError> {
    if name.chars().count() < 3 {
        return Err(SeerError::invalid_parameter(format!(
            "name must be three characters or longer; got '{name}'"
        )));
    }
    if name.len() > MAX_NAME_BYTES {
        return Err(SeerError::invalid_parameter(format!(
            "name must be at most {MAX_NAME_BYTES} bytes; got {} bytes",
            name.len()
        )));
    }
    Ok(())
}

/// Static configuration of a stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StreamConfig {
    pub name: String,
    /// Sampling period in seconds.
    pub period: f64,
    pub min: f64,
    pub max: f64,
    pub domain: Domain,
}

impl StreamConfig {
    pub fn new(
        name: impl Into<String>,
        period: f64,
        min: f64,
        max: f64,
        domain: Domain,
    ) -> Result<Self, SeerError> {
        let config = Self {
            name: name.into(),
            period,
            min,
            max,
            domain,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SeerError> {
        if self.domain.is_interval() && !(self.max > self.min) {
            return Err(SeerError::invalid_parameter(format!(
                "max must be greater than min for interval domain; got min={}, max={}",
                self.min, self.max
            )));
        }
        validate_name(&self.name)?;
        if !(self.period.is_finite() && self.period >= 1.0) {
            return Err(SeerError::invalid_parameter(format!(
                "period must be 1s or longer; got {}",
                self.period
            )));
        }
        Ok(())
    }
}
