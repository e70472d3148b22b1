#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derivations over seizure tables and filtered views.
//!
//! Every function here is pure. Ranking and monthly statewide totals
//! operate on the *unfiltered* table on purpose: those views give the
//! analyst statewide context regardless of the municipality filter,
//! while shares and the time series follow the filtered view.

use std::cmp::Ordering;

use seizure_map_analytics_models::{MonthlyTotal, RankingEntry, ShareEntry, TimeSeriesPoint};
use seizure_map_seizure_models::{FilteredView, Month, SeizureRow, SeizureTable};

/// Maximum number of entries in the ranking view.
const RANKING_SIZE: usize = 10;

/// Top-10 municipalities of the unfiltered table by annual total.
///
/// Descending, with ties broken by original row order (stable sort).
#[must_use]
pub fn ranking(table: &SeizureTable) -> Vec<RankingEntry> {
    let mut rows: Vec<&SeizureRow> = table.rows.iter().collect();
    rows.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));

    rows.into_iter()
        .take(RANKING_SIZE)
        .map(|row| RankingEntry {
            municipality: row.municipality.clone(),
            total: row.total,
        })
        .collect()
}

/// Statewide sum per selected month over the unfiltered table.
///
/// Month order is preserved; selected months absent from the table's
/// column set are skipped.
#[must_use]
pub fn monthly_state_totals(table: &SeizureTable, months: &[Month]) -> Vec<MonthlyTotal> {
    months
        .iter()
        .filter_map(|month| {
            table.month_index(*month).map(|idx| MonthlyTotal {
                month: *month,
                total: table.rows.iter().map(|row| row.values[idx]).sum(),
            })
        })
        .collect()
}

/// Per-municipality share of the selected total.
///
/// Rows with a zero selected total are excluded so proportion displays
/// never divide degenerate slices; no normalization happens here.
#[must_use]
pub fn shares(view: &FilteredView) -> Vec<ShareEntry> {
    view.rows
        .iter()
        .filter(|row| row.selected_total > 0.0)
        .map(|row| ShareEntry {
            municipality: row.municipality.clone(),
            selected_total: row.selected_total,
        })
        .collect()
}

/// Reshapes a filtered view to long format for time-series display.
///
/// Month-major: all municipalities for the first selected month, then
/// the next month, and so on — one point per row x selected month.
#[must_use]
pub fn melt(view: &FilteredView) -> Vec<TimeSeriesPoint> {
    let mut points = Vec::with_capacity(view.months.len() * view.rows.len());
    for (idx, month) in view.months.iter().enumerate() {
        for row in &view.rows {
            points.push(TimeSeriesPoint {
                municipality: row.municipality.clone(),
                month: *month,
                value: row.values[idx],
            });
        }
    }
    points
}
