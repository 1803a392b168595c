//! Distance, speed and calorie formulas
//!
//! All formulas are closed-form and work on plain `f64` values. Distance and
//! speed never fail; the calorie formulas reject non-positive inputs with a
//! [`ValidationError`].
//!
//! # Example
//!
//! ```rust
//! use chrono::Duration;
//! use steptracker::formulas::{distance, running_spent_calories};
//!
//! let km = distance(3456, 1.75);
//! let kcal = running_spent_calories(3456, 75.0, 1.75, Duration::hours(3)).unwrap();
//! assert!(km > 2.7 && km < 2.73);
//! assert!(kcal > 204.0 && kcal < 204.2);
//! ```

use chrono::Duration;

use crate::error::ValidationError;
use crate::models::ActivityKind;

/// Fixed stride length in meters used for pedometer records
pub const STEP_LENGTH_M: f64 = 0.65;
/// Meters in one kilometer
pub const M_IN_KM: f64 = 1000.0;
/// Minutes in one hour
pub const MIN_IN_H: f64 = 60.0;
/// Stride length as a fraction of body height
pub const STEP_LENGTH_COEFFICIENT: f64 = 0.45;
/// Walking burns this fraction of the running calories
pub const WALKING_CALORIES_COEFFICIENT: f64 = 0.5;

const SECONDS_PER_HOUR: f64 = 3600.0;
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Duration length in fractional seconds, nanosecond precision where it fits
fn duration_seconds(duration: Duration) -> f64 {
    match duration.num_nanoseconds() {
        Some(nanos) => nanos as f64 / 1e9,
        None => duration.num_milliseconds() as f64 / 1e3,
    }
}

/// Duration length in fractional hours
pub fn duration_hours(duration: Duration) -> f64 {
    duration_seconds(duration) / SECONDS_PER_HOUR
}

/// Duration length in fractional minutes
pub fn duration_minutes(duration: Duration) -> f64 {
    duration_seconds(duration) / SECONDS_PER_MINUTE
}

/// Distance in kilometers covered by `steps` with a stride derived from height
pub fn distance(steps: i64, height_m: f64) -> f64 {
    let step_length = height_m * STEP_LENGTH_COEFFICIENT;
    (steps as f64 * step_length) / M_IN_KM
}

/// Distance in kilometers for a pedometer record with the fixed stride length
pub fn day_distance(steps: i64) -> f64 {
    (steps as f64 * STEP_LENGTH_M) / M_IN_KM
}

/// Average speed in km/h; zero when the duration is not positive
pub fn mean_speed(steps: i64, height_m: f64, duration: Duration) -> f64 {
    if duration <= Duration::zero() {
        return 0.0;
    }

    distance(steps, height_m) / duration_hours(duration)
}

fn validate_inputs(
    steps: i64,
    weight_kg: f64,
    height_m: f64,
    duration: Duration,
) -> Result<(), ValidationError> {
    if steps <= 0 {
        return Err(ValidationError::NonPositiveSteps { steps });
    }
    // NaN fails these comparisons and is rejected with the rest
    if !(weight_kg > 0.0) {
        return Err(ValidationError::NonPositiveWeight { weight: weight_kg });
    }
    if !(height_m > 0.0) {
        return Err(ValidationError::NonPositiveHeight { height: height_m });
    }
    if duration <= Duration::zero() {
        return Err(ValidationError::NonPositiveDuration { duration });
    }
    Ok(())
}

/// Calories burned while running
///
/// # Errors
/// Fails if steps, weight, height or duration is not positive.
pub fn running_spent_calories(
    steps: i64,
    weight_kg: f64,
    height_m: f64,
    duration: Duration,
) -> Result<f64, ValidationError> {
    validate_inputs(steps, weight_kg, height_m, duration)?;

    let speed = mean_speed(steps, height_m, duration);
    Ok((weight_kg * speed * duration_minutes(duration)) / MIN_IN_H)
}

/// Calories burned while walking
///
/// # Errors
/// Fails if steps, weight, height or duration is not positive.
pub fn walking_spent_calories(
    steps: i64,
    weight_kg: f64,
    height_m: f64,
    duration: Duration,
) -> Result<f64, ValidationError> {
    validate_inputs(steps, weight_kg, height_m, duration)?;

    let speed = mean_speed(steps, height_m, duration);
    Ok(((weight_kg * speed * duration_minutes(duration)) / MIN_IN_H)
        * WALKING_CALORIES_COEFFICIENT)
}

/// Calories burned for the given activity kind
pub fn spent_calories(
    kind: ActivityKind,
    steps: i64,
    weight_kg: f64,
    height_m: f64,
    duration: Duration,
) -> Result<f64, ValidationError> {
    match kind {
        ActivityKind::Walking => walking_spent_calories(steps, weight_kg, height_m, duration),
        ActivityKind::Running => running_spent_calories(steps, weight_kg, height_m, duration),
    }
}
