//! Process-lifetime cache for parsed geometry resources.
//!
//! Geometry arrives from an external fetch layer at most once per
//! distinct resource; after that every recomputation pass reads the
//! cached parse. [`GeometryCache::invalidate`] exists for tests and for
//! an explicit refresh action.

use std::collections::BTreeMap;

use geojson::GeoJson;

use crate::GeographyError;

/// Lazily populated cache of parsed `GeoJSON` resources, keyed by the
/// resource identifier (URL or path string).
#[derive(Debug, Default)]
pub struct GeometryCache {
    resources: BTreeMap<String, GeoJson>,
}

impl GeometryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached resource for `key`, if it has been loaded.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&GeoJson> {
        self.resources.get(key)
    }

    /// Returns the resource for `key`, invoking `fetch` on first access.
    ///
    /// The fetch closure is where the excluded I/O layer plugs in; it
    /// runs at most once per key per process lifetime.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error. Failed fetches are not cached, so a
    /// re-triggered session retries.
    pub fn get_or_fetch<F>(&mut self, key: &str, fetch: F) -> Result<&GeoJson, GeographyError>
    where
        F: FnOnce() -> Result<GeoJson, GeographyError>,
    {
        if !self.resources.contains_key(key) {
            let parsed = fetch()?;
            log::info!("Cached geometry resource '{key}'");
            self.resources.insert(key.to_owned(), parsed);
        }
        Ok(&self.resources[key])
    }

    /// Drops every cached resource, forcing refetches on next access.
    pub fn invalidate(&mut self) {
        self.resources.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point_geojson() -> GeoJson {
        GeoJson::Geometry(geojson::Geometry::new(geojson::Value::Point(vec![
            -51.0, -24.0,
        ])))
    }

    #[test]
    fn fetches_once_per_key() {
        let mut cache = GeometryCache::new();
        let mut calls = 0;

        for _ in 0..3 {
            cache
                .get_or_fetch("parana", || {
                    calls += 1;
                    Ok(point_geojson())
                })
                .unwrap();
        }
        assert_eq!(calls, 1);
        assert!(cache.get("parana").is_some());
    }

    #[test]
    fn failed_fetches_are_not_cached() {
        let mut cache = GeometryCache::new();

        let err = cache.get_or_fetch("parana", || {
            Err(GeographyError::MalformedGeometry {
                found: "Point".to_owned(),
            })
        });
        assert!(err.is_err());
        assert!(cache.get("parana").is_none());

        cache.get_or_fetch("parana", || Ok(point_geojson())).unwrap();
        assert!(cache.get("parana").is_some());
    }

    #[test]
    fn invalidate_clears_resources() {
        let mut cache = GeometryCache::new();
        cache.get_or_fetch("parana", || Ok(point_geojson())).unwrap();

        cache.invalidate();
        assert!(cache.get("parana").is_none());
    }
}
