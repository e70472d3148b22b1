//! One synchronous recomputation pass over the dashboard pipeline.
//!
//! A filter-state change triggers exactly one pass: loader (cache hit
//! after the first) -> filter engine -> aggregations -> geometry join.
//! The selection is passed explicitly through every stage; no mutable
//! global drives recomputation.

use std::collections::BTreeMap;

use seizure_map_analytics_models::{MonthlyTotal, RankingEntry, ShareEntry, TimeSeriesPoint};
use seizure_map_dataset::{LoadError, cache::DatasetCache};
use seizure_map_geography::features::{FeatureIndex, choropleth_values};
use seizure_map_geography::outline::{Ring, rings_from_geojson};
use seizure_map_seizure_models::{FilterSelection, FilteredView};

/// Errors that abort a recomputation pass.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The selected dataset could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Everything one pass derives for the presentation layer.
#[derive(Debug)]
pub struct DashboardView {
    /// Table restricted to the selected municipalities and months.
    pub filtered: FilteredView,
    /// Statewide top-10 by annual total (ignores the municipality filter).
    pub ranking: Vec<RankingEntry>,
    /// Statewide sum per selected month (ignores the municipality filter).
    pub monthly_totals: Vec<MonthlyTotal>,
    /// Nonzero selected totals per filtered municipality.
    pub shares: Vec<ShareEntry>,
    /// Long-format monthly evolution for the filtered municipalities.
    pub time_series: Vec<TimeSeriesPoint>,
    /// Choropleth values keyed by normalized feature name, when a
    /// feature collection was supplied.
    pub choropleth: Option<BTreeMap<String, f64>>,
    /// State outline rings, when an outline geometry was supplied and
    /// well-formed.
    pub outline: Option<Vec<Ring>>,
}

/// Runs one full recomputation pass for `selection`.
///
/// A malformed outline geometry only costs the overlay: it is logged
/// and the rest of the view is still produced.
///
/// # Errors
///
/// Returns [`PipelineError::Load`] if the selected dataset is missing or
/// fails schema validation; the caller surfaces a warning and skips all
/// further work for this selection only.
pub fn recompute(
    selection: &FilterSelection,
    datasets: &mut DatasetCache,
    features: Option<&FeatureIndex>,
    outline_geometry: Option<&geojson::Geometry>,
) -> Result<DashboardView, PipelineError> {
    let table = datasets.get(selection.drug)?;

    let filtered = seizure_map_filter::filter(table, selection);
    let ranking = seizure_map_analytics::ranking(table);
    let monthly_totals = seizure_map_analytics::monthly_state_totals(table, &selection.months);
    let shares = seizure_map_analytics::shares(&filtered);
    let time_series = seizure_map_analytics::melt(&filtered);

    let choropleth = features.map(|index| choropleth_values(&shares, index));

    let outline = outline_geometry.and_then(|geometry| match rings_from_geojson(geometry) {
        Ok(rings) => Some(rings),
        Err(e) => {
            log::warn!("Skipping state outline overlay: {e}");
            None
        }
    });

    Ok(DashboardView {
        filtered,
        ranking,
        monthly_totals,
        shares,
        time_series,
        choropleth,
        outline,
    })
}
