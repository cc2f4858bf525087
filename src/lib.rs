//! Workout Stats - session statistics from raw workout sensor readings.
//!
//! This library turns a sensor package (an activity code plus an ordered list
//! of numbers) into distance, mean speed and calories burned for running,
//! sports walking and pool swimming, and renders the result as a summary.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                       Workout Stats                        │
//! ├───────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐      │
//! │  │   Package   │──▶│ Dispatcher  │──▶│  Activity   │      │
//! │  │ (code+data) │   │ (RUN/WLK/…) │   │ (formulas)  │      │
//! │  └─────────────┘   └─────────────┘   └─────────────┘      │
//! │                                             │             │
//! │                                             ▼             │
//! │                                      ┌─────────────┐      │
//! │                                      │   Summary   │      │
//! │                                      └─────────────┘      │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use workout_stats::core::resolve;
//!
//! let summary = resolve("RUN", &[15000.0, 1.0, 75.0])?.summarize();
//! assert!((summary.distance_km - 9.75).abs() < 1e-9);
//! println!("{summary}");
//! # Ok::<(), workout_stats::DispatchError>(())
//! ```

pub mod config;
pub mod core;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigError};
pub use self::core::{
    parse_packages, process_packages, resolve, Activity, ActivityCode, DispatchError, Dispatcher,
    OutputFormat, PackageError, SensorPackage, Summary, ValidationPolicy, Workout,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
