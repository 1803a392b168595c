use rust_decimal_macros::dec;
use steptracker::{
    day_action_info, formulas, parser, training_info, training_summary, ActivityKind, ParseError,
    TrackerError, ValidationError,
};

/// Integration tests that exercise the public API end to end

#[cfg(test)]
mod integration_tests {
    use super::*;
    use chrono::Duration;
    use std::io::Write;
    use steptracker::{export, process_file, AppConfig, ExportFormat, PersonProfile};
    use tempfile::{NamedTempFile, TempDir};

    const WEIGHT: f64 = 75.0;
    const HEIGHT: f64 = 1.75;

    /// Reference record: 3456 steps of running over three hours
    #[test]
    fn test_reference_running_record() {
        let summary = training_summary("3456,Running,3h", WEIGHT, HEIGHT).unwrap();

        assert_eq!(summary.distance_km, dec!(2.72));
        assert_eq!(summary.speed_kmh, dec!(0.91));
        assert_eq!(summary.calories, dec!(204.12));

        let report = training_info("3456,Running,3h", WEIGHT, HEIGHT).unwrap();
        assert_eq!(
            report,
            "Training type: Running\nDuration: 3.00 h.\nDistance: 2.72 km.\nSpeed: 0.91 km/h\nCalories burned: 204.12\n"
        );
    }

    #[test]
    fn test_walking_burns_half_of_running() {
        let running = training_summary("8000,Running,1h15m", 68.0, 1.7).unwrap();
        let walking = training_summary("8000,Walking,1h15m", 68.0, 1.7).unwrap();

        assert_eq!(walking.activity, ActivityKind::Walking);
        assert_eq!(walking.distance_km, running.distance_km);
        assert_eq!(walking.speed_kmh, running.speed_kmh);

        let raw_running =
            formulas::running_spent_calories(8000, 68.0, 1.7, Duration::minutes(75)).unwrap();
        let raw_walking =
            formulas::walking_spent_calories(8000, 68.0, 1.7, Duration::minutes(75)).unwrap();
        assert!((raw_walking * 2.0 - raw_running).abs() < 1e-9);
    }

    #[test]
    fn test_error_kinds() {
        assert!(matches!(
            training_info("3456,Running", WEIGHT, HEIGHT),
            Err(TrackerError::Parse(ParseError::FieldCount { .. }))
        ));
        assert!(matches!(
            training_info("3456,Rowing,1h", WEIGHT, HEIGHT),
            Err(TrackerError::UnknownActivity { .. })
        ));
        assert!(matches!(
            training_info("3456,Running,1h", WEIGHT, 0.0),
            Err(TrackerError::Validation(ValidationError::NonPositiveHeight { .. }))
        ));
        assert!(matches!(
            training_info("3456,Running,soon", WEIGHT, HEIGHT),
            Err(TrackerError::Parse(ParseError::InvalidDuration { .. }))
        ));
    }

    #[test]
    fn test_zero_duration_record() {
        // Parses fine, speed would be zero, but calories reject it
        let input = parser::parse_training("3456,Running,0").unwrap();
        assert_eq!(formulas::mean_speed(input.steps, HEIGHT, input.duration), 0.0);

        assert!(matches!(
            training_info("3456,Running,0", WEIGHT, HEIGHT),
            Err(TrackerError::Validation(ValidationError::NonPositiveDuration { .. }))
        ));
    }

    #[test]
    fn test_day_action_info() {
        let report = day_action_info("10000,1h30m", WEIGHT, HEIGHT);
        assert!(report.starts_with("Steps: 10000.\n"));
        assert!(report.contains("Distance: 6.50 km.\n"));

        assert!(day_action_info("10000,Walking,1h30m", WEIGHT, HEIGHT).is_empty());
    }

    #[test]
    fn test_batch_file_to_csv() {
        let mut input = NamedTempFile::new().unwrap();
        writeln!(input, "# morning").unwrap();
        writeln!(input, "3456,Running,3h").unwrap();
        writeln!(input, "3456,Walking,3h").unwrap();
        writeln!(input, "12,Skiing,1h").unwrap();

        let profile = PersonProfile::new(WEIGHT, HEIGHT).unwrap();
        let report = process_file(input.path(), &profile).unwrap();
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].line, 4);

        let dir = TempDir::new().unwrap();
        let output = dir.path().join("results.csv");
        let format = ExportFormat::from_path(&output).unwrap();
        export::export_training_summaries(&report.summaries(), &output, format).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content.contains("204.12"));
        assert!(content.contains("102.06"));
    }

    #[test]
    fn test_config_profile_feeds_reports() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AppConfig::default();
        config.profile = PersonProfile::new(WEIGHT, HEIGHT).unwrap();
        config.save_to_file(&path).unwrap();

        let loaded = AppConfig::load_or_default(Some(path.as_path()));
        let summary =
            steptracker::training_summary_for("3456,Running,3h", &loaded.profile).unwrap();
        assert_eq!(summary.calories, dec!(204.12));
    }
}
