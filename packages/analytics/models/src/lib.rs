#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived view types produced by the seizure analytics functions.
//!
//! Values here are raw numbers. Thousands separators, locale punctuation,
//! and percentage formatting are presentation concerns layered on top and
//! never alter these values.

use seizure_map_seizure_models::Month;
use serde::{Deserialize, Serialize};

/// One entry of the top-N ranking by annual total.
///
/// The ranking is always computed over the unfiltered table: it shows the
/// statewide picture regardless of the user's municipality focus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    /// Municipality display name.
    pub municipality: String,
    /// Annual seizure total (kg).
    pub total: f64,
}

/// Statewide seizure total for a single month column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotal {
    /// Month column.
    pub month: Month,
    /// Sum of the column over every row of the unfiltered table (kg).
    pub total: f64,
}

/// A municipality's share of the currently selected total.
///
/// Rows with a zero selected total are excluded before this type is
/// produced; the sum of all entries is the 100% baseline for proportion
/// displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareEntry {
    /// Municipality display name.
    pub municipality: String,
    /// Sum of the selected month values for this municipality (kg).
    pub selected_total: f64,
}

/// One point of the long-format monthly-evolution series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    /// Municipality display name.
    pub municipality: String,
    /// Month column.
    pub month: Month,
    /// Seized quantity (kg) for that municipality and month.
    pub value: f64,
}
