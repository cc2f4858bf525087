//! Workout kinds and the formulas that turn raw readings into statistics.
//!
//! Every kind shares [`Workout`]: distance and mean speed have provided
//! implementations built on a per-kind step length, while calories must be
//! supplied by each kind. Swimming measures speed from pool geometry and
//! overrides `mean_speed_kmh`.
//!
//! Derived quantities are recomputed on every call. Constructors accept any
//! values; domain checks happen in the [dispatcher](crate::core::dispatch).

use crate::core::dispatch::ActivityCode;
use crate::core::summary::Summary;

/// Metres in a kilometre.
pub const M_IN_KM: f64 = 1000.0;

/// Minutes in an hour.
pub const MIN_IN_H: f64 = 60.0;

/// Readings common to every workout kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurements {
    action_count: u64,
    duration_hours: f64,
    weight_kg: f64,
}

impl Measurements {
    pub fn new(action_count: u64, duration_hours: f64, weight_kg: f64) -> Self {
        Self {
            action_count,
            duration_hours,
            weight_kg,
        }
    }

    /// Number of steps or strokes.
    pub fn action_count(&self) -> u64 {
        self.action_count
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_hours
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }
}

/// Shared statistics contract for all workout kinds.
pub trait Workout {
    /// Name shown in summaries.
    const DISPLAY_NAME: &'static str;

    /// Distance covered per action unit, in metres.
    const STEP_LENGTH_M: f64;

    fn measurements(&self) -> &Measurements;

    /// Energy spent in kilocalories.
    fn calories(&self) -> f64;

    fn distance_km(&self) -> f64 {
        self.measurements().action_count as f64 * Self::STEP_LENGTH_M / M_IN_KM
    }

    fn mean_speed_kmh(&self) -> f64 {
        self.distance_km() / self.measurements().duration_hours
    }

    fn summarize(&self) -> Summary {
        Summary {
            activity_name: Self::DISPLAY_NAME.to_string(),
            duration_hours: self.measurements().duration_hours,
            distance_km: self.distance_km(),
            mean_speed_kmh: self.mean_speed_kmh(),
            calories: self.calories(),
        }
    }
}

/// Running session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Running {
    measurements: Measurements,
}

impl Running {
    const CALORIES_SPEED_MULTIPLIER: f64 = 18.0;
    const CALORIES_SPEED_SHIFT: f64 = 1.79;

    pub fn new(action_count: u64, duration_hours: f64, weight_kg: f64) -> Self {
        Self {
            measurements: Measurements::new(action_count, duration_hours, weight_kg),
        }
    }
}

impl Workout for Running {
    const DISPLAY_NAME: &'static str = "Running";
    const STEP_LENGTH_M: f64 = 0.65;

    fn measurements(&self) -> &Measurements {
        &self.measurements
    }

    fn calories(&self) -> f64 {
        let m = &self.measurements;
        (Self::CALORIES_SPEED_MULTIPLIER * self.mean_speed_kmh() + Self::CALORIES_SPEED_SHIFT)
            * m.weight_kg
            / M_IN_KM
            * m.duration_hours
            * MIN_IN_H
    }
}

/// Sports walking session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Walking {
    measurements: Measurements,
    height_cm: f64,
}

impl Walking {
    const CALORIES_WEIGHT_MULTIPLIER: f64 = 0.035;
    const CALORIES_SPEED_HEIGHT_MULTIPLIER: f64 = 0.029;
    const KMH_IN_MS: f64 = 0.278;
    const CM_IN_M: f64 = 100.0;

    pub fn new(action_count: u64, duration_hours: f64, weight_kg: f64, height_cm: f64) -> Self {
        Self {
            measurements: Measurements::new(action_count, duration_hours, weight_kg),
            height_cm,
        }
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }
}

impl Workout for Walking {
    const DISPLAY_NAME: &'static str = "SportsWalking";
    const STEP_LENGTH_M: f64 = 0.65;

    fn measurements(&self) -> &Measurements {
        &self.measurements
    }

    fn calories(&self) -> f64 {
        let m = &self.measurements;
        let speed_ms = self.mean_speed_kmh() * Self::KMH_IN_MS;
        let height_m = self.height_cm / Self::CM_IN_M;

        (Self::CALORIES_WEIGHT_MULTIPLIER * m.weight_kg
            + speed_ms.powi(2) / height_m * Self::CALORIES_SPEED_HEIGHT_MULTIPLIER * m.weight_kg)
            * m.duration_hours
            * MIN_IN_H
    }
}

/// Pool swimming session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swimming {
    measurements: Measurements,
    pool_length_m: f64,
    pool_lengths_count: f64,
}

impl Swimming {
    const CALORIES_SPEED_SHIFT: f64 = 1.1;
    const CALORIES_WEIGHT_MULTIPLIER: f64 = 2.0;

    pub fn new(
        action_count: u64,
        duration_hours: f64,
        weight_kg: f64,
        pool_length_m: f64,
        pool_lengths_count: f64,
    ) -> Self {
        Self {
            measurements: Measurements::new(action_count, duration_hours, weight_kg),
            pool_length_m,
            pool_lengths_count,
        }
    }

    pub fn pool_length_m(&self) -> f64 {
        self.pool_length_m
    }

    /// Number of completed pool lengths.
    pub fn pool_lengths_count(&self) -> f64 {
        self.pool_lengths_count
    }
}

impl Workout for Swimming {
    const DISPLAY_NAME: &'static str = "Swimming";
    const STEP_LENGTH_M: f64 = 1.38;

    fn measurements(&self) -> &Measurements {
        &self.measurements
    }

    // Speed comes from completed pool lengths, not from stroke count.
    fn mean_speed_kmh(&self) -> f64 {
        self.pool_length_m * self.pool_lengths_count / M_IN_KM / self.measurements.duration_hours
    }

    fn calories(&self) -> f64 {
        let m = &self.measurements;
        (self.mean_speed_kmh() + Self::CALORIES_SPEED_SHIFT)
            * Self::CALORIES_WEIGHT_MULTIPLIER
            * m.weight_kg
            * m.duration_hours
    }
}

/// A resolved workout of any kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activity {
    Running(Running),
    Walking(Walking),
    Swimming(Swimming),
}

impl Activity {
    pub fn code(&self) -> ActivityCode {
        match self {
            Activity::Running(_) => ActivityCode::Run,
            Activity::Walking(_) => ActivityCode::Wlk,
            Activity::Swimming(_) => ActivityCode::Swm,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Activity::Running(_) => Running::DISPLAY_NAME,
            Activity::Walking(_) => Walking::DISPLAY_NAME,
            Activity::Swimming(_) => Swimming::DISPLAY_NAME,
        }
    }

    pub fn measurements(&self) -> &Measurements {
        match self {
            Activity::Running(w) => w.measurements(),
            Activity::Walking(w) => w.measurements(),
            Activity::Swimming(w) => w.measurements(),
        }
    }

    pub fn distance_km(&self) -> f64 {
        match self {
            Activity::Running(w) => w.distance_km(),
            Activity::Walking(w) => w.distance_km(),
            Activity::Swimming(w) => w.distance_km(),
        }
    }

    pub fn mean_speed_kmh(&self) -> f64 {
        match self {
            Activity::Running(w) => w.mean_speed_kmh(),
            Activity::Walking(w) => w.mean_speed_kmh(),
            Activity::Swimming(w) => w.mean_speed_kmh(),
        }
    }

    pub fn calories(&self) -> f64 {
        match self {
            Activity::Running(w) => w.calories(),
            Activity::Walking(w) => w.calories(),
            Activity::Swimming(w) => w.calories(),
        }
    }

    pub fn summarize(&self) -> Summary {
        match self {
            Activity::Running(w) => w.summarize(),
            Activity::Walking(w) => w.summarize(),
            Activity::Swimming(w) => w.summarize(),
        }
    }
}

impl From<Running> for Activity {
    fn from(w: Running) -> Self {
        Activity::Running(w)
    }
}

impl From<Walking> for Activity {
    fn from(w: Walking) -> Self {
        Activity::Walking(w)
    }
}

impl From<Swimming> for Activity {
    fn from(w: Swimming) -> Self {
        Activity::Swimming(w)
    }
}
