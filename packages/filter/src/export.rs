//! CSV export of a filtered view's display columns.
//!
//! Writes `Municipio`, the selected month columns in display order, and
//! (when the source had one) a trailing `Total` column, with the header
//! row naming each column exactly as in the source. Values are raw
//! numbers; locale formatting is a presentation concern.

use seizure_map_seizure_models::FilteredView;

/// Errors that can occur while serializing a view to CSV.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The serialized buffer was not valid UTF-8.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes `view` to a UTF-8 CSV string.
///
/// # Errors
///
/// Returns [`ExportError`] if CSV writing fails.
pub fn to_csv_string(view: &FilteredView) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<String> = Vec::with_capacity(view.months.len() + 2);
    header.push("Municipio".to_owned());
    header.extend(view.months.iter().map(ToString::to_string));
    if view.has_source_total {
        header.push("Total".to_owned());
    }
    writer.write_record(&header)?;

    for row in &view.rows {
        let mut record: Vec<String> = Vec::with_capacity(header.len());
        record.push(row.municipality.clone());
        record.extend(row.values.iter().map(ToString::to_string));
        if let Some(total) = row.total {
            record.push(total.to_string());
        }
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}
