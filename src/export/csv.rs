use super::ExportError;
use crate::report::TrainingSummary;
use std::path::Path;

/// Export training summaries to CSV, one row per record
pub fn export_training_summaries<P: AsRef<Path>>(
    summaries: &[&TrainingSummary],
    output_path: P,
) -> Result<(), ExportError> {
    let mut writer = ::csv::Writer::from_path(output_path)
        .map_err(|e| ExportError::SerializationError(e.to_string()))?;

    for summary in summaries {
        writer
            .serialize(summary)
            .map_err(|e| ExportError::SerializationError(e.to_string()))?;
    }

    writer.flush()?;
    Ok(())
}
