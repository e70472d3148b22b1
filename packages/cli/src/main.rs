#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line driver for the seizure dashboard pipeline.
//!
//! Runs exactly one recomputation pass for the selection given on the
//! command line and prints the derived views, standing in for the
//! presentation layer. Geometry resources are plain `GeoJSON` files
//! read once and cached; a real deployment fetches them over HTTP
//! before handing them to the core.

mod pipeline;

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Parser;
use seizure_map_dataset::cache::DatasetCache;
use seizure_map_geography::cache::GeometryCache;
use seizure_map_geography::features::FeatureIndex;
use seizure_map_seizure_models::{DrugType, FilterSelection, MapSize, Month};

/// Municipalities preselected when none are given, matching the
/// dashboard's default multi-select state.
const DEFAULT_MUNICIPALITIES: &[&str] = &["CURITIBA", "FOZ DO IGUACU", "LONDRINA"];

#[derive(Debug, Parser)]
#[command(name = "seizure-map", about = "Drug seizure dashboard pipeline driver")]
struct Args {
    /// Directory containing one CSV per drug type.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Drug dataset to select (maconha, cocaina, crack).
    #[arg(long, default_value = "maconha")]
    drug: DrugType,

    /// Municipality to include (repeatable). Defaults to the dashboard's
    /// preselected trio when neither this nor --all-municipalities is given.
    #[arg(long = "municipality")]
    municipalities: Vec<String>,

    /// Select every municipality in the table.
    #[arg(long, conflicts_with = "municipalities")]
    all_municipalities: bool,

    /// Month column to include, in display order (repeatable).
    /// Defaults to every month in the table ("select all, default on").
    #[arg(long = "month")]
    months: Vec<Month>,

    /// GeoJSON feature collection of municipality polygons.
    #[arg(long)]
    geojson: Option<PathBuf>,

    /// Feature property holding the municipality display name.
    #[arg(long, default_value = "name")]
    name_property: String,

    /// GeoJSON geometry (or single feature) with the state boundary.
    #[arg(long)]
    outline: Option<PathBuf>,

    /// Write the filtered view as CSV to this path.
    #[arg(long)]
    export: Option<PathBuf>,

    /// Rendered map height (small, medium, large).
    #[arg(long, default_value = "medium")]
    map_size: MapSize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let args = Args::parse();

    let mut datasets = DatasetCache::new(args.data_dir.clone());
    let mut geometry = GeometryCache::new();

    // Loader failure is a visible warning, never a crash: the pass for
    // this selection stops, other drug types remain selectable.
    let (all_municipalities, all_months) = match datasets.get(args.drug) {
        Ok(table) => (
            table
                .rows
                .iter()
                .map(|r| r.municipality.clone())
                .collect::<Vec<_>>(),
            table.months.clone(),
        ),
        Err(e) => {
            log::warn!("Dataset '{}' unavailable: {e}", args.drug.label());
            return Ok(());
        }
    };

    let municipalities: BTreeSet<String> = if args.all_municipalities {
        all_municipalities.into_iter().collect()
    } else if args.municipalities.is_empty() {
        DEFAULT_MUNICIPALITIES.iter().map(|m| (*m).to_owned()).collect()
    } else {
        args.municipalities.iter().cloned().collect()
    };

    let months = if args.months.is_empty() {
        all_months
    } else {
        args.months.clone()
    };

    let selection = FilterSelection {
        drug: args.drug,
        municipalities,
        months,
    };

    let features = match &args.geojson {
        Some(path) => match load_feature_index(&mut geometry, path, &args.name_property) {
            Ok(index) => Some(index),
            Err(e) => {
                log::warn!("Skipping map views: {e}");
                None
            }
        },
        None => None,
    };

    let outline_geometry = match &args.outline {
        Some(path) => match load_outline_geometry(&mut geometry, path) {
            Ok(g) => Some(g),
            Err(e) => {
                log::warn!("Skipping state outline: {e}");
                None
            }
        },
        None => None,
    };

    let view = pipeline::recompute(
        &selection,
        &mut datasets,
        features.as_ref(),
        outline_geometry.as_ref(),
    )?;

    print_view(&args, &view);

    if let Some(path) = &args.export {
        let csv = seizure_map_filter::export::to_csv_string(&view.filtered)?;
        std::fs::write(path, csv)?;
        println!("Exported filtered view to {}", path.display());
    }

    Ok(())
}

/// Reads and indexes the municipality feature collection, via the
/// geometry cache so the file is parsed at most once per process.
fn load_feature_index(
    geometry: &mut GeometryCache,
    path: &std::path::Path,
    name_property: &str,
) -> Result<FeatureIndex, Box<dyn std::error::Error>> {
    let key = path.display().to_string();
    let geojson = geometry.get_or_fetch(&key, || {
        let raw = std::fs::read_to_string(path)?;
        let parsed = raw.parse::<geojson::GeoJson>().map_err(Box::new)?;
        Ok(parsed)
    })?;

    match geojson {
        geojson::GeoJson::FeatureCollection(collection) => {
            let index = FeatureIndex::from_feature_collection(collection, name_property);
            log::info!("Indexed {} map features from {key}", index.len());
            Ok(index)
        }
        _ => Err(format!("'{key}' is not a GeoJSON FeatureCollection").into()),
    }
}

/// Reads the state boundary geometry, accepting either a bare geometry
/// or a single feature wrapping one.
fn load_outline_geometry(
    geometry: &mut GeometryCache,
    path: &std::path::Path,
) -> Result<geojson::Geometry, Box<dyn std::error::Error>> {
    let key = path.display().to_string();
    let geojson = geometry.get_or_fetch(&key, || {
        let raw = std::fs::read_to_string(path)?;
        let parsed = raw.parse::<geojson::GeoJson>().map_err(Box::new)?;
        Ok(parsed)
    })?;

    match geojson {
        geojson::GeoJson::Geometry(g) => Ok(g.clone()),
        geojson::GeoJson::Feature(feature) => feature
            .geometry
            .clone()
            .ok_or_else(|| format!("feature in '{key}' has no geometry").into()),
        geojson::GeoJson::FeatureCollection(_) => {
            Err(format!("'{key}' holds a FeatureCollection, expected one boundary").into())
        }
    }
}

fn print_view(args: &Args, view: &pipeline::DashboardView) {
    println!("Filtered table — {}", args.drug.label());
    if view.filtered.is_empty() {
        println!("  (no data for this selection)");
    }
    for row in &view.filtered.rows {
        println!(
            "  {} selected total: {:.1} kg",
            row.municipality, row.selected_total
        );
    }

    println!("Top municipalities (annual total, statewide):");
    for (position, entry) in view.ranking.iter().enumerate() {
        println!("  {:2}. {} {:.1} kg", position + 1, entry.municipality, entry.total);
    }

    println!("Statewide totals per month:");
    for total in &view.monthly_totals {
        println!("  {} {:.1} kg", total.month, total.total);
    }

    if !view.shares.is_empty() {
        let baseline: f64 = view.shares.iter().map(|s| s.selected_total).sum();
        println!("Share of selected total (baseline {baseline:.1} kg):");
        for share in &view.shares {
            println!("  {} {:.1} kg", share.municipality, share.selected_total);
        }
    }

    if let Some(choropleth) = &view.choropleth {
        println!(
            "Choropleth: {} municipalities matched, height {}px",
            choropleth.len(),
            args.map_size.height_px()
        );
    }
    if let Some(outline) = &view.outline {
        println!("State outline: {} rings", outline.len());
    }
}
