//! Resolution of activity codes and raw parameter lists into workouts.
//!
//! The dispatch table is fixed: each code maps to one workout kind and the
//! ordered list of positional parameters its constructor takes. Parameter
//! counts are checked before anything is built, so a short or long list
//! never produces a partially filled workout.

use crate::core::activity::{Activity, Running, Swimming, Walking, Workout};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Short code identifying a workout kind in sensor packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityCode {
    #[serde(rename = "RUN")]
    Run,
    #[serde(rename = "WLK")]
    Wlk,
    #[serde(rename = "SWM")]
    Swm,
}

impl ActivityCode {
    pub const ALL: [ActivityCode; 3] = [ActivityCode::Run, ActivityCode::Wlk, ActivityCode::Swm];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityCode::Run => "RUN",
            ActivityCode::Wlk => "WLK",
            ActivityCode::Swm => "SWM",
        }
    }

    /// The dispatch rule for this code.
    pub fn rule(&self) -> &'static DispatchRule {
        match self {
            ActivityCode::Run => &DISPATCH_TABLE[0],
            ActivityCode::Wlk => &DISPATCH_TABLE[1],
            ActivityCode::Swm => &DISPATCH_TABLE[2],
        }
    }

    /// Positional parameter names, in constructor order.
    pub fn parameter_names(&self) -> &'static [&'static str] {
        self.rule().parameters
    }

    /// Number of positional parameters the constructor expects.
    pub fn arity(&self) -> usize {
        self.parameter_names().len()
    }
}

impl fmt::Display for ActivityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityCode {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| DispatchError::UnknownActivity(s.to_string()))
    }
}

/// How one activity code is turned into a workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchRule {
    pub code: ActivityCode,
    /// Display name of the workout kind built for this code
    pub display_name: &'static str,
    /// Positional parameter names in constructor order
    pub parameters: &'static [&'static str],
}

pub const DISPATCH_TABLE: [DispatchRule; 3] = [
    DispatchRule {
        code: ActivityCode::Run,
        display_name: Running::DISPLAY_NAME,
        parameters: &["action", "duration", "weight"],
    },
    DispatchRule {
        code: ActivityCode::Wlk,
        display_name: Walking::DISPLAY_NAME,
        parameters: &["action", "duration", "weight", "height"],
    },
    DispatchRule {
        code: ActivityCode::Swm,
        display_name: Swimming::DISPLAY_NAME,
        parameters: &[
            "action",
            "duration",
            "weight",
            "pool_length",
            "pool_lengths_count",
        ],
    },
];

/// Which domain checks run on raw parameters before a workout is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Reject non-finite values, non-positive duration or height, and
    /// negative weight or pool geometry.
    #[default]
    Strict,
    /// Only check arity and the action count. Degenerate values are passed
    /// through and yield `inf` or `NaN` statistics.
    Permissive,
}

impl ValidationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationPolicy::Strict => "strict",
            ValidationPolicy::Permissive => "permissive",
        }
    }
}

impl FromStr for ValidationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(ValidationPolicy::Strict),
            "permissive" => Ok(ValidationPolicy::Permissive),
            other => Err(format!(
                "unknown validation policy '{other}' (expected strict or permissive)"
            )),
        }
    }
}

/// Errors raised while resolving a sensor package.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchError {
    /// The activity code is not in the dispatch table
    UnknownActivity(String),
    /// The parameter list has the wrong length for the code
    ArityMismatch {
        code: ActivityCode,
        expected: usize,
        actual: usize,
    },
    /// A parameter is outside the domain the formulas accept
    InvalidParameter {
        code: ActivityCode,
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::UnknownActivity(code) => write!(f, "Unknown activity code: '{code}'"),
            DispatchError::ArityMismatch {
                code,
                expected,
                actual,
            } => write!(
                f,
                "{code} expects {expected} parameters ({}), got {actual}",
                code.parameter_names().join(", ")
            ),
            DispatchError::InvalidParameter {
                code,
                parameter,
                value,
                reason,
            } => write!(f, "{code}: invalid {parameter} {value}: {reason}"),
        }
    }
}

impl std::error::Error for DispatchError {}

/// Builds workouts from activity codes and raw parameter lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher {
    policy: ValidationPolicy,
}

impl Dispatcher {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Resolve an activity code and its positional parameters into a workout.
    pub fn resolve(
        &self,
        activity_code: &str,
        parameters: &[f64],
    ) -> Result<Activity, DispatchError> {
        let code: ActivityCode = activity_code.parse()?;
        self.resolve_code(code, parameters)
    }

    /// Like [`Dispatcher::resolve`], for an already parsed code.
    pub fn resolve_code(
        &self,
        code: ActivityCode,
        parameters: &[f64],
    ) -> Result<Activity, DispatchError> {
        let expected = code.arity();
        if parameters.len() != expected {
            return Err(DispatchError::ArityMismatch {
                code,
                expected,
                actual: parameters.len(),
            });
        }

        let action_count = action_count(code, parameters[0])?;
        match self.policy {
            ValidationPolicy::Strict => check_domain(code, parameters)?,
            ValidationPolicy::Permissive => {
                if check_domain(code, parameters).is_err() {
                    tracing::warn!(
                        code = %code,
                        ?parameters,
                        "degenerate parameters accepted, statistics may be non-finite"
                    );
                }
            }
        }

        let (duration, weight) = (parameters[1], parameters[2]);
        let activity: Activity = match code {
            ActivityCode::Run => Running::new(action_count, duration, weight).into(),
            ActivityCode::Wlk => Walking::new(action_count, duration, weight, parameters[3]).into(),
            ActivityCode::Swm => {
                Swimming::new(action_count, duration, weight, parameters[3], parameters[4]).into()
            }
        };

        tracing::debug!(code = %code, policy = self.policy.as_str(), "resolved workout");
        Ok(activity)
    }
}

/// Resolve using the default (strict) dispatcher.
pub fn resolve(activity_code: &str, parameters: &[f64]) -> Result<Activity, DispatchError> {
    Dispatcher::default().resolve(activity_code, parameters)
}

/// Convert the raw action reading to a step or stroke count.
fn action_count(code: ActivityCode, value: f64) -> Result<u64, DispatchError> {
    let invalid = |reason| DispatchError::InvalidParameter {
        code,
        parameter: "action",
        value,
        reason,
    };

    if !value.is_finite() {
        return Err(invalid("must be finite"));
    }
    if value < 0.0 {
        return Err(invalid("must not be negative"));
    }
    if value.fract() != 0.0 {
        return Err(invalid("must be a whole number"));
    }
    if value >= u64::MAX as f64 {
        return Err(invalid("is too large"));
    }
    Ok(value as u64)
}

/// Domain checks applied under the strict policy. Assumes arity was checked.
fn check_domain(code: ActivityCode, parameters: &[f64]) -> Result<(), DispatchError> {
    let names = code.parameter_names();
    let invalid = |index: usize, reason| DispatchError::InvalidParameter {
        code,
        parameter: names[index],
        value: parameters[index],
        reason,
    };

    if let Some(index) = parameters.iter().position(|v| !v.is_finite()) {
        return Err(invalid(index, "must be finite"));
    }
    if parameters[1] <= 0.0 {
        return Err(invalid(1, "must be greater than zero"));
    }
    if parameters[2] < 0.0 {
        return Err(invalid(2, "must not be negative"));
    }

    match code {
        ActivityCode::Run => {}
        ActivityCode::Wlk => {
            if parameters[3] <= 0.0 {
                return Err(invalid(3, "must be greater than zero"));
            }
        }
        ActivityCode::Swm => {
            if let Some(index) = (3..=4).find(|&i| parameters[i] < 0.0) {
                return Err(invalid(index, "must not be negative"));
            }
        }
    }

    Ok(())
}
