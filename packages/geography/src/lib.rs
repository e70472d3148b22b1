#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geographic side of the seizure dashboard.
//!
//! Joins tabular municipality rows to externally supplied polygon
//! features via a normalized name key ([`features`]), decomposes the
//! state outline into drawable rings ([`outline`]), and caches parsed
//! geometry resources for the process lifetime ([`cache`]). All network
//! and file I/O stays with the caller; this crate only consumes
//! already-parsed structures.

pub mod cache;
pub mod features;
pub mod normalize;
pub mod outline;

/// Errors that can occur in geometry handling.
#[derive(Debug, thiserror::Error)]
pub enum GeographyError {
    /// A geometry resource could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `GeoJSON` parsing failed.
    #[error("GeoJSON error: {0}")]
    Geojson(#[from] Box<geojson::Error>),

    /// The geometry is neither a `Polygon` nor a `MultiPolygon`.
    ///
    /// Fatal for the outline overlay only; the choropleth still renders
    /// without it.
    #[error("Malformed geometry: expected Polygon or MultiPolygon, found {found}")]
    MalformedGeometry {
        /// The geometry type that was encountered.
        found: String,
    },
}
