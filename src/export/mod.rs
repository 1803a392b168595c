//! Export of computed summaries to CSV and JSON files

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::report::TrainingSummary;

pub mod csv;
pub mod json;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Guess the format from a file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => f.write_str("csv"),
            ExportFormat::Json => f.write_str("json"),
        }
    }
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Write training summaries in the requested format
pub fn export_training_summaries<P: AsRef<Path>>(
    summaries: &[&TrainingSummary],
    output_path: P,
    format: ExportFormat,
) -> Result<(), ExportError> {
    tracing::info!(
        rows = summaries.len(),
        %format,
        path = %output_path.as_ref().display(),
        "Exporting training summaries"
    );

    match format {
        ExportFormat::Csv => csv::export_training_summaries(summaries, output_path),
        ExportFormat::Json => json::export_json(&summaries, output_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!(matches!(
            "pdf".parse::<ExportFormat>(),
            Err(ExportError::UnsupportedFormat(f)) if f == "pdf"
        ));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path("out/results.csv"), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::from_path("results.json"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_path("results"), None);
    }
}
