//! Sensor packages: raw `(workout_type, data)` readings and batch processing.
//!
//! Packages arrive either as a JSON array or as JSON Lines, one package per
//! line:
//!
//! ```text
//! {"workout_type": "SWM", "data": [720, 1, 80, 25, 40]}
//! {"workout_type": "RUN", "data": [15000, 1, 75]}
//! ```

use crate::core::dispatch::{DispatchError, Dispatcher};
use crate::core::summary::Summary;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single reading from the sensors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorPackage {
    /// Activity code, e.g. `RUN`
    pub workout_type: String,
    /// Positional parameters for the activity code
    pub data: Vec<f64>,
}

impl SensorPackage {
    pub fn new(workout_type: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            workout_type: workout_type.into(),
            data,
        }
    }

    /// Resolve and summarize this package.
    pub fn summarize(&self, dispatcher: &Dispatcher) -> Result<Summary, DispatchError> {
        dispatcher
            .resolve(&self.workout_type, &self.data)
            .map(|activity| activity.summarize())
    }
}

/// Errors raised while reading or processing packages.
#[derive(Debug)]
pub enum PackageError {
    /// Input could not be parsed. `line` is 1-based for JSON Lines input and
    /// `None` for a JSON array.
    Parse {
        line: Option<usize>,
        message: String,
    },
    /// The package at `index` (0-based) could not be resolved
    Dispatch { index: usize, source: DispatchError },
}

impl fmt::Display for PackageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageError::Parse {
                line: Some(line),
                message,
            } => write!(f, "Parse error on line {line}: {message}"),
            PackageError::Parse {
                line: None,
                message,
            } => write!(f, "Parse error: {message}"),
            PackageError::Dispatch { index, source } => {
                write!(f, "Package {index} rejected: {source}")
            }
        }
    }
}

impl std::error::Error for PackageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PackageError::Dispatch { source, .. } => Some(source),
            PackageError::Parse { .. } => None,
        }
    }
}

/// Parse packages from a JSON array or JSON Lines text.
///
/// Blank lines are skipped in JSON Lines input. Empty input yields no packages.
pub fn parse_packages(input: &str) -> Result<Vec<SensorPackage>, PackageError> {
    let trimmed = input.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).map_err(|e| PackageError::Parse {
            line: None,
            message: e.to_string(),
        });
    }

    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|e| PackageError::Parse {
                line: Some(i + 1),
                message: e.to_string(),
            })
        })
        .collect()
}

/// Summarize every package in order, stopping at the first failure.
pub fn process_packages(
    dispatcher: &Dispatcher,
    packages: &[SensorPackage],
) -> Result<Vec<Summary>, PackageError> {
    tracing::debug!(count = packages.len(), "processing sensor packages");

    packages
        .iter()
        .enumerate()
        .map(|(index, package)| {
            package
                .summarize(dispatcher)
                .map_err(|source| PackageError::Dispatch { index, source })
        })
        .collect()
}
