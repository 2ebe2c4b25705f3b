use log::{info, warn};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("malformed parameters: {0}")]
    Json(#[from] serde_json::Error),
    #[error("parameter `{name}` is out of range: {value}")]
    OutOfRange { name: &'static str, value: f64 },
}

/// Calibration parameters which can be overridden by a JSON document. Fields missing from the
/// document keep their default value.
pub trait Parameters: DeserializeOwned {
    const NAME: &'static str;

    fn validate(&self) -> Result<(), ParameterError>;

    fn from_json(json: &str) -> Result<Self, ParameterError> {
        let parameters: Self = serde_json::from_str(json)?;
        if let Err(error) = parameters.validate() {
            warn!("Rejected {} parameters: {}", Self::NAME, error);
            return Err(error);
        }

        info!("Loaded {} parameters", Self::NAME);
        Ok(parameters)
    }
}

/// Durations are configured in seconds and must be finite and not negative.
pub(crate) fn ensure_duration(name: &'static str, seconds: f64) -> Result<(), ParameterError> {
    if seconds.is_finite() && seconds >= 0. {
        Ok(())
    } else {
        Err(ParameterError::OutOfRange {
            name,
            value: seconds,
        })
    }
}

pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if value >= 0. {
        Ok(())
    } else {
        Err(ParameterError::OutOfRange { name, value })
    }
}

pub(crate) fn ensure_ordered(
    name: &'static str,
    min: f64,
    max: f64,
) -> Result<(), ParameterError> {
    if min <= max {
        Ok(())
    } else {
        Err(ParameterError::OutOfRange { name, value: min })
    }
}

/// Converts a configured number of seconds, reading anything unrepresentable as zero.
pub(crate) fn seconds(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or_default()
}
