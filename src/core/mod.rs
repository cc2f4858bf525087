//! Core functionality for workout statistics.
//!
//! This module contains:
//! - Workout kinds and their distance, speed and calorie formulas
//! - The dispatcher mapping activity codes to workouts
//! - Sensor package parsing and batch processing
//! - The summary record and its renderings

pub mod activity;
pub mod dispatch;
pub mod package;
pub mod summary;

// Re-export commonly used types
pub use activity::{Activity, Measurements, Running, Swimming, Walking, Workout};
pub use dispatch::{
    resolve, ActivityCode, DispatchError, DispatchRule, Dispatcher, ValidationPolicy,
    DISPATCH_TABLE,
};
pub use package::{parse_packages, process_packages, PackageError, SensorPackage};
pub use summary::{OutputFormat, Summary};
