use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{TrackerError, ValidationError};

/// Activity kinds that select the calorie formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
    Walking,
    Running,
}

impl ActivityKind {
    /// Resolve a record label. Accepts the English names in any case as well
    /// as the Russian labels `Ходьба` and `Бег`.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        match label {
            "Ходьба" => return Some(ActivityKind::Walking),
            "Бег" => return Some(ActivityKind::Running),
            _ => {}
        }

        match label.to_lowercase().as_str() {
            "walking" => Some(ActivityKind::Walking),
            "running" => Some(ActivityKind::Running),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActivityKind::Walking => "Walking",
            ActivityKind::Running => "Running",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActivityKind {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| TrackerError::UnknownActivity {
            label: s.to_string(),
        })
    }
}

/// A three-field training record after parsing, with the activity label
/// still unresolved
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingInput {
    /// Number of steps, always positive
    pub steps: i64,

    /// Activity label exactly as it appeared in the record
    pub label: String,

    /// Activity duration, may be zero or negative
    pub duration: Duration,
}

impl TrainingInput {
    /// Resolve the activity label into a typed record
    pub fn resolve(self) -> Result<ActivityRecord, TrackerError> {
        let kind = self.label.parse::<ActivityKind>()?;
        Ok(ActivityRecord {
            steps: self.steps,
            kind,
            duration: self.duration,
        })
    }
}

/// A fully typed training record
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRecord {
    pub steps: i64,
    pub kind: ActivityKind,
    pub duration: Duration,
}

/// Two-field pedometer record (`<steps>,<duration>`)
#[derive(Debug, Clone, PartialEq)]
pub struct DayRecord {
    pub steps: i64,
    pub duration: Duration,
}

/// Body measurements used by the distance and calorie formulas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersonProfile {
    /// Weight in kilograms
    pub weight_kg: f64,

    /// Height in meters
    pub height_m: f64,
}

impl Default for PersonProfile {
    fn default() -> Self {
        Self {
            weight_kg: 75.0,
            height_m: 1.75,
        }
    }
}

impl PersonProfile {
    /// Create a validated profile
    pub fn new(weight_kg: f64, height_m: f64) -> Result<Self, ValidationError> {
        let profile = Self {
            weight_kg,
            height_m,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Check that weight and height are positive finite numbers
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.weight_kg.is_finite() && self.weight_kg > 0.0) {
            return Err(ValidationError::NonPositiveWeight {
                weight: self.weight_kg,
            });
        }
        if !(self.height_m.is_finite() && self.height_m > 0.0) {
            return Err(ValidationError::NonPositiveHeight {
                height: self.height_m,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_labels() {
        assert_eq!(ActivityKind::from_label("Running"), Some(ActivityKind::Running));
        assert_eq!(ActivityKind::from_label(" walking "), Some(ActivityKind::Walking));
        assert_eq!(ActivityKind::from_label("Бег"), Some(ActivityKind::Running));
        assert_eq!(ActivityKind::from_label("Ходьба"), Some(ActivityKind::Walking));
        assert_eq!(ActivityKind::from_label("Swimming"), None);
        assert_eq!(ActivityKind::from_label(""), None);
    }

    #[test]
    fn test_unknown_label_error() {
        let err = "Cycling".parse::<ActivityKind>().unwrap_err();
        assert!(matches!(err, TrackerError::UnknownActivity { label } if label == "Cycling"));
    }

    #[test]
    fn test_resolve_training_input() {
        let input = TrainingInput {
            steps: 1000,
            label: "Walking".to_string(),
            duration: Duration::minutes(30),
        };
        let record = input.resolve().unwrap();
        assert_eq!(record.kind, ActivityKind::Walking);
        assert_eq!(record.steps, 1000);
        assert_eq!(record.duration, Duration::minutes(30));
    }

    #[test]
    fn test_person_profile_validation() {
        assert!(PersonProfile::new(70.0, 1.8).is_ok());
        assert_eq!(
            PersonProfile::new(0.0, 1.8),
            Err(ValidationError::NonPositiveWeight { weight: 0.0 })
        );
        assert_eq!(
            PersonProfile::new(70.0, -1.0),
            Err(ValidationError::NonPositiveHeight { height: -1.0 })
        );
        assert!(PersonProfile::new(f64::NAN, 1.8).is_err());
    }
}
