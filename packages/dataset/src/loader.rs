//! CSV loader with load-time schema validation.
//!
//! The expected schema is fixed: a `Municipio` key column, one numeric
//! column per known month name, and an optional trailing `Total` column.
//! Anything else is a [`LoadError::Schema`] rather than a silently
//! mis-shaped table.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use std::str::FromStr as _;

use seizure_map_seizure_models::{DrugType, Month, SeizureRow, SeizureTable};

use crate::LoadError;

/// Name of the municipality key column.
const MUNICIPALITY_COLUMN: &str = "Municipio";

/// Name of the optional precomputed annual total column.
const TOTAL_COLUMN: &str = "Total";

/// Loads the dataset for `drug` from a CSV file on disk.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be opened and
/// [`LoadError::Csv`] / [`LoadError::Schema`] as in [`load_from_reader`].
pub fn load_from_path(drug: DrugType, path: &Path) -> Result<SeizureTable, LoadError> {
    let file = std::fs::File::open(path)?;
    let table = load_from_reader(drug, file)?;
    log::info!(
        "Loaded {} rows x {} month columns from {}",
        table.rows.len(),
        table.months.len(),
        path.display()
    );
    Ok(table)
}

/// Loads the dataset for `drug` from any UTF-8 CSV reader.
///
/// Rows with a blank `Municipio` cell are dropped as a data-cleaning
/// step. If the source has no `Total` column, each row's total is
/// computed as the sum of its month columns.
///
/// # Errors
///
/// Returns [`LoadError::Csv`] if the CSV is malformed, and
/// [`LoadError::Schema`] if the header set, a numeric cell, or a
/// duplicate municipality violates the expected schema.
pub fn load_from_reader<R: Read>(drug: DrugType, reader: R) -> Result<SeizureTable, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let (months, has_source_total) = validate_headers(&headers)?;

    let mut rows: Vec<SeizureRow> = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut dropped = 0_usize;

    for record in csv_reader.records() {
        let record = record?;

        let municipality = record.get(0).unwrap_or("").trim().to_owned();
        if municipality.is_empty() {
            dropped += 1;
            continue;
        }
        if !seen.insert(municipality.clone()) {
            return Err(LoadError::Schema(format!(
                "duplicate municipality '{municipality}'"
            )));
        }

        let mut values = Vec::with_capacity(months.len());
        for (idx, month) in months.iter().enumerate() {
            let cell = record.get(idx + 1).unwrap_or("");
            let value = parse_cell(cell, &municipality, &month.to_string())?;
            if value < 0.0 {
                return Err(LoadError::Schema(format!(
                    "negative value {value} for '{municipality}' in column '{month}'"
                )));
            }
            values.push(value);
        }

        let month_sum: f64 = values.iter().sum();
        let total = if has_source_total {
            let cell = record.get(1 + months.len()).unwrap_or("");
            if cell.trim().is_empty() {
                month_sum
            } else {
                parse_cell(cell, &municipality, TOTAL_COLUMN)?
            }
        } else {
            month_sum
        };

        rows.push(SeizureRow {
            municipality,
            values,
            total,
        });
    }

    if dropped > 0 {
        log::debug!("Dropped {dropped} rows with a blank {MUNICIPALITY_COLUMN} cell");
    }

    Ok(SeizureTable {
        drug,
        months,
        rows,
        has_source_total,
    })
}

/// Validates the header row and returns the month columns in source
/// order plus whether a trailing `Total` column is present.
fn validate_headers(headers: &csv::StringRecord) -> Result<(Vec<Month>, bool), LoadError> {
    let mut iter = headers.iter().map(str::trim);

    match iter.next() {
        Some(first) if first == MUNICIPALITY_COLUMN => {}
        Some(first) => {
            return Err(LoadError::Schema(format!(
                "expected first column '{MUNICIPALITY_COLUMN}', found '{first}'"
            )));
        }
        None => {
            return Err(LoadError::Schema("empty header row".to_owned()));
        }
    }

    let remaining: Vec<&str> = iter.collect();
    let has_source_total = remaining.last() == Some(&TOTAL_COLUMN);
    let month_headers = if has_source_total {
        &remaining[..remaining.len() - 1]
    } else {
        &remaining[..]
    };

    let mut months = Vec::with_capacity(month_headers.len());
    for header in month_headers {
        let month = Month::from_str(header).map_err(|_| {
            LoadError::Schema(format!("unknown column '{header}'"))
        })?;
        if months.contains(&month) {
            return Err(LoadError::Schema(format!("duplicate column '{header}'")));
        }
        months.push(month);
    }

    if months.is_empty() {
        return Err(LoadError::Schema("no month columns found".to_owned()));
    }

    Ok((months, has_source_total))
}

/// Parses a numeric cell. Empty cells read as 0.0 (the source data is
/// sparse); non-numeric text is a schema error.
fn parse_cell(cell: &str, municipality: &str, column: &str) -> Result<f64, LoadError> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed.parse::<f64>().map_err(|_| {
        LoadError::Schema(format!(
            "non-numeric value '{trimmed}' for '{municipality}' in column '{column}'"
        ))
    })
}
