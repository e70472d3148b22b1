#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dataset loading for the seizure dashboard.
//!
//! Reads one CSV per drug type into an immutable [`SeizureTable`],
//! validating the column schema at load time, and caches loaded tables
//! for the process lifetime ([`cache::DatasetCache`]).
//!
//! [`SeizureTable`]: seizure_map_seizure_models::SeizureTable

pub mod cache;
pub mod loader;

/// Errors that can occur while loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The backing resource could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The column set or cell values do not match the expected schema.
    #[error("Schema error: {0}")]
    Schema(String),
}
