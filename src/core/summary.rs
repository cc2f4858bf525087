//! Workout summary record and its text rendering.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Computed statistics for a single workout session.
///
/// Produced fresh by every `summarize()` call and never mutated afterwards.
/// In JSON, non-finite statistics are written as the strings `"inf"`,
/// `"-inf"` and `"nan"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Display name of the workout kind
    pub activity_name: String,
    /// Session length in hours, exactly as supplied
    #[serde(serialize_with = "serialize_stat")]
    pub duration_hours: f64,
    /// Distance covered in kilometres
    #[serde(serialize_with = "serialize_stat")]
    pub distance_km: f64,
    /// Average speed over the whole session in km/h
    #[serde(serialize_with = "serialize_stat")]
    pub mean_speed_kmh: f64,
    /// Energy spent in kilocalories
    #[serde(serialize_with = "serialize_stat")]
    pub calories: f64,
}

impl Summary {
    /// Render the summary as a single human-readable line.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Тип тренировки: {}; \
             Длительность: {} ч.; \
             Дистанция: {} км; \
             Ср. скорость: {} км/ч; \
             Потрачено ккал: {}.",
            self.activity_name,
            Stat(self.duration_hours),
            Stat(self.distance_km),
            Stat(self.mean_speed_kmh),
            Stat(self.calories)
        )
    }
}

/// Token for a non-finite statistic, matching the text rendering.
fn non_finite_token(value: f64) -> &'static str {
    if value.is_nan() {
        "nan"
    } else if value > 0.0 {
        "inf"
    } else {
        "-inf"
    }
}

/// Three-decimal rendering of a statistic. NaN prints as `nan`.
struct Stat(f64);

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_finite() {
            write!(f, "{:.3}", self.0)
        } else {
            f.write_str(non_finite_token(self.0))
        }
    }
}

fn serialize_stat<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_str(non_finite_token(*value))
    }
}

/// How a batch of summaries is written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One rendered message per line
    #[default]
    Text,
    /// A single pretty-printed JSON array
    Json,
    /// One JSON object per line
    Jsonl,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Render summaries in this format. The result has no trailing newline.
    pub fn render(&self, summaries: &[Summary]) -> Result<String, serde_json::Error> {
        match self {
            OutputFormat::Text => Ok(summaries
                .iter()
                .map(Summary::message)
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Json => serde_json::to_string_pretty(summaries),
            OutputFormat::Jsonl => {
                let lines = summaries
                    .iter()
                    .map(serde_json::to_string)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(lines.join("\n"))
            }
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "jsonl" => Ok(OutputFormat::Jsonl),
            other => Err(format!(
                "unknown output format '{other}' (expected text, json or jsonl)"
            )),
        }
    }
}
