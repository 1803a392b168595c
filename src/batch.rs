//! Line-oriented processing of many training records
//!
//! Each non-empty line that does not start with `#` is one
//! `<steps>,<activity>,<duration>` record. Failed lines are collected next to
//! the successful summaries instead of aborting the run.

use std::fs;
use std::path::Path;
use tracing::Level;

use crate::error::{Result, TrackerError};
use crate::models::PersonProfile;
use crate::report::{self, TrainingSummary};

/// A record that produced a summary
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    /// 1-based line number in the input
    pub line: usize,
    pub summary: TrainingSummary,
}

/// A record that could not be summarized
#[derive(Debug)]
pub struct BatchFailure {
    /// 1-based line number in the input
    pub line: usize,
    pub record: String,
    pub error: TrackerError,
}

/// Outcome of processing a batch of records
#[derive(Debug, Default)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn summaries(&self) -> Vec<&TrainingSummary> {
        self.entries.iter().map(|entry| &entry.summary).collect()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total calories over all successful records
    pub fn total_calories(&self) -> rust_decimal::Decimal {
        self.entries.iter().map(|entry| entry.summary.calories).sum()
    }
}

/// Summarize every record in `input`
pub fn process_records(input: &str, profile: &PersonProfile) -> BatchReport {
    let mut report = BatchReport::default();

    for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        let record = raw.trim();
        if record.is_empty() || record.starts_with('#') {
            continue;
        }

        match report::training_summary_for(record, profile) {
            Ok(summary) => report.entries.push(BatchEntry { line, summary }),
            Err(error) => {
                log_skipped(line, record, &error);
                report.failures.push(BatchFailure {
                    line,
                    record: record.to_string(),
                    error,
                });
            }
        }
    }

    tracing::info!(
        processed = report.entries.len(),
        failed = report.failures.len(),
        "Batch processed"
    );

    report
}

fn log_skipped(line: usize, record: &str, error: &TrackerError) {
    if error.severity().to_tracing_level() == Level::WARN {
        tracing::warn!(line, record, error = %error, "Skipping record");
    } else {
        tracing::error!(line, record, error = %error, "Skipping record");
    }
}

/// Read and summarize a file of records
pub fn process_file<P: AsRef<Path>>(path: P, profile: &PersonProfile) -> Result<BatchReport> {
    profile.validate()?;
    let input = fs::read_to_string(path.as_ref())?;
    Ok(process_records(&input, profile))
}
