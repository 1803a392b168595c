//! Training and pedometer summaries
//!
//! `training_info` and `day_action_info` are the string-returning entry
//! points; `training_summary` and `day_summary` return the typed values they
//! render, rounded to two decimal places.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TrackerError};
use crate::formulas;
use crate::models::{ActivityKind, PersonProfile};
use crate::parser;

/// Summary of a single training record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingSummary {
    pub activity: ActivityKind,
    pub steps: i64,
    pub duration_hours: Decimal,
    pub distance_km: Decimal,
    pub speed_kmh: Decimal,
    pub calories: Decimal,
}

impl fmt::Display for TrainingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Training type: {}", self.activity)?;
        writeln!(f, "Duration: {:.2} h.", self.duration_hours)?;
        writeln!(f, "Distance: {:.2} km.", self.distance_km)?;
        writeln!(f, "Speed: {:.2} km/h", self.speed_kmh)?;
        writeln!(f, "Calories burned: {:.2}", self.calories)
    }
}

/// Summary of a pedometer record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub steps: i64,
    pub distance_km: Decimal,
    pub calories: Decimal,
}

impl fmt::Display for DaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Steps: {}.", self.steps)?;
        writeln!(f, "Distance: {:.2} km.", self.distance_km)?;
        write!(f, "Calories burned: {:.2} kcal.", self.calories)
    }
}

/// Two-decimal value matching `{:.2}` on the raw float, ties to even included
fn round_for_report(value: f64, quantity: &str) -> Result<Decimal> {
    if !value.is_finite() {
        return Err(TrackerError::Calculation(format!(
            "{} is not representable: {}",
            quantity, value
        )));
    }
    Decimal::from_str(&format!("{:.2}", value)).map_err(|err| {
        TrackerError::Calculation(format!("{} is not representable: {}", quantity, err))
    })
}

/// Parse a `<steps>,<activity>,<duration>` record and compute its summary.
///
/// # Errors
/// - [`TrackerError::Parse`] for a malformed record
/// - [`TrackerError::UnknownActivity`] for a label other than walking/running
/// - [`TrackerError::Validation`] for non-positive weight, height or duration
pub fn training_summary(data: &str, weight_kg: f64, height_m: f64) -> Result<TrainingSummary> {
    let record = parser::parse_training(data)?.resolve()?;

    let calories = formulas::spent_calories(
        record.kind,
        record.steps,
        weight_kg,
        height_m,
        record.duration,
    )?;
    let distance = formulas::distance(record.steps, height_m);
    let speed = formulas::mean_speed(record.steps, height_m, record.duration);

    tracing::debug!(
        steps = record.steps,
        activity = %record.kind,
        distance_km = distance,
        speed_kmh = speed,
        calories,
        "Computed training summary"
    );

    Ok(TrainingSummary {
        activity: record.kind,
        steps: record.steps,
        duration_hours: round_for_report(formulas::duration_hours(record.duration), "duration")?,
        distance_km: round_for_report(distance, "distance")?,
        speed_kmh: round_for_report(speed, "speed")?,
        calories: round_for_report(calories, "calories")?,
    })
}

/// Same as [`training_summary`] with the measurements taken from a profile
pub fn training_summary_for(data: &str, profile: &PersonProfile) -> Result<TrainingSummary> {
    training_summary(data, profile.weight_kg, profile.height_m)
}

/// Render the training report for a `<steps>,<activity>,<duration>` record
pub fn training_info(data: &str, weight_kg: f64, height_m: f64) -> Result<String> {
    training_summary(data, weight_kg, height_m).map(|summary| summary.to_string())
}

/// Parse a `<steps>,<duration>` pedometer record and compute its summary.
///
/// Distance uses the fixed stride length; calories use the walking formula.
pub fn day_summary(data: &str, weight_kg: f64, height_m: f64) -> Result<DaySummary> {
    let record = parser::parse_day_steps(data)?;

    let calories =
        formulas::walking_spent_calories(record.steps, weight_kg, height_m, record.duration)?;
    let distance = formulas::day_distance(record.steps);

    tracing::debug!(
        steps = record.steps,
        distance_km = distance,
        calories,
        "Computed day summary"
    );

    Ok(DaySummary {
        steps: record.steps,
        distance_km: round_for_report(distance, "distance")?,
        calories: round_for_report(calories, "calories")?,
    })
}

/// Render the pedometer report for a `<steps>,<duration>` record.
///
/// Errors are logged and yield an empty string.
pub fn day_action_info(data: &str, weight_kg: f64, height_m: f64) -> String {
    match day_summary(data, weight_kg, height_m) {
        Ok(summary) => summary.to_string(),
        Err(err) => {
            tracing::error!(error = %err, record = data, "Failed to build day summary");
            String::new()
        }
    }
}
