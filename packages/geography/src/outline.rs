//! State outline decomposition into drawable rings.
//!
//! The overlay is stroke-only: no fill semantics, so outer rings and
//! hole rings are returned flat, each independently drawable as a
//! closed `(lon, lat)` loop.

use geo::{Geometry, LineString, MultiPolygon, Polygon};

use crate::GeographyError;

/// A closed loop of `(longitude, latitude)` pairs.
pub type Ring = Vec<(f64, f64)>;

/// Decomposes a boundary geometry into its rings.
///
/// A `Polygon` is treated as a one-element `MultiPolygon`; each polygon
/// contributes its outer ring followed by its hole rings.
///
/// # Errors
///
/// Returns [`GeographyError::MalformedGeometry`] for any other geometry
/// type. The caller may still render the choropleth without the overlay.
pub fn extract_rings(geometry: &Geometry<f64>) -> Result<Vec<Ring>, GeographyError> {
    match geometry {
        Geometry::Polygon(polygon) => Ok(polygon_rings(polygon)),
        Geometry::MultiPolygon(multi) => Ok(multi_polygon_rings(multi)),
        other => Err(GeographyError::MalformedGeometry {
            found: geometry_type_name(other).to_owned(),
        }),
    }
}

/// Decomposes a parsed `GeoJSON` geometry into rings.
///
/// # Errors
///
/// Returns [`GeographyError::Geojson`] if the `GeoJSON` value cannot be
/// converted to a geometry, and [`GeographyError::MalformedGeometry`] as
/// in [`extract_rings`].
pub fn rings_from_geojson(geometry: &geojson::Geometry) -> Result<Vec<Ring>, GeographyError> {
    let geo_geometry: Geometry<f64> = geometry.try_into().map_err(Box::new)?;
    extract_rings(&geo_geometry)
}

fn multi_polygon_rings(multi: &MultiPolygon<f64>) -> Vec<Ring> {
    multi.iter().flat_map(polygon_rings).collect()
}

fn polygon_rings(polygon: &Polygon<f64>) -> Vec<Ring> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(ring_points)
        .collect()
}

fn ring_points(line: &LineString<f64>) -> Ring {
    line.coords().map(|c| (c.x, c.y)).collect()
}

const fn geometry_type_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
