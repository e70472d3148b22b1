//! Choropleth join between filtered rows and polygon features.
//!
//! Feature names are normalized once at index build time and cached for
//! the life of the index; join lookups are then plain key comparisons.

use std::collections::{BTreeMap, BTreeSet};

use seizure_map_analytics_models::ShareEntry;

use crate::normalize::normalize;

/// Set of normalized join keys derived from a polygon feature collection.
///
/// Built once per geometry resource and read-only afterwards.
#[derive(Debug, Clone)]
pub struct FeatureIndex {
    keys: BTreeSet<String>,
}

impl FeatureIndex {
    /// Builds an index from a `GeoJSON` feature collection, reading each
    /// feature's display name from the `name_property` property.
    ///
    /// Features with a missing or blank name are skipped.
    #[must_use]
    pub fn from_feature_collection(
        collection: &geojson::FeatureCollection,
        name_property: &str,
    ) -> Self {
        let names = collection.features.iter().filter_map(|feature| {
            feature
                .property(name_property)
                .and_then(serde_json::Value::as_str)
                .map(str::trim)
                .filter(|name| !name.is_empty())
        });
        Self::from_names(names)
    }

    /// Builds an index directly from feature display names.
    #[must_use]
    pub fn from_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            keys: names.into_iter().map(normalize).collect(),
        }
    }

    /// Returns `true` if a feature with this normalized key exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Number of indexed features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the index holds no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Maps share entries onto feature join keys for choropleth shading.
///
/// Every entry's municipality is normalized; entries whose key matches
/// no feature are dropped (a data-quality signal, not an error). Share
/// entries already exclude zero-total rows, so the map never shades a
/// zero-valued municipality.
#[must_use]
pub fn choropleth_values(shares: &[ShareEntry], index: &FeatureIndex) -> BTreeMap<String, f64> {
    let mut values = BTreeMap::new();
    let mut unmatched = 0_usize;

    for entry in shares {
        let key = normalize(&entry.municipality);
        if index.contains(&key) {
            values.insert(key, entry.selected_total);
        } else {
            unmatched += 1;
        }
    }

    if unmatched > 0 {
        log::warn!("{unmatched} of {} rows matched no map feature", shares.len());
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share(municipality: &str, selected_total: f64) -> ShareEntry {
        ShareEntry {
            municipality: municipality.to_owned(),
            selected_total,
        }
    }

    #[test]
    fn joins_accented_feature_names_to_normalized_rows() {
        let index = FeatureIndex::from_names(["Foz do Iguaçu", "Curitiba"]);
        let values = choropleth_values(&[share("FOZ DO IGUACU", 12.5)], &index);

        assert_eq!(values.len(), 1);
        assert!((values["FOZ DO IGUACU"] - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn drops_unmatched_rows() {
        let index = FeatureIndex::from_names(["Curitiba"]);
        let values = choropleth_values(
            &[share("CURITIBA", 3.0), share("ATLANTIS", 9.0)],
            &index,
        );

        assert_eq!(values.len(), 1);
        assert!(values.contains_key("CURITIBA"));
    }

    #[test]
    fn skips_features_with_blank_names() {
        let collection = geojson::FeatureCollection {
            bbox: None,
            features: vec![
                feature_named(Some("Londrina")),
                feature_named(Some("   ")),
                feature_named(None),
            ],
            foreign_members: None,
        };

        let index = FeatureIndex::from_feature_collection(&collection, "name");
        assert_eq!(index.len(), 1);
        assert!(index.contains("LONDRINA"));
    }

    #[test]
    fn empty_share_view_yields_empty_map() {
        let index = FeatureIndex::from_names(["Curitiba"]);
        assert!(choropleth_values(&[], &index).is_empty());
    }

    fn feature_named(name: Option<&str>) -> geojson::Feature {
        let mut properties = geojson::JsonObject::new();
        if let Some(name) = name {
            properties.insert("name".to_owned(), serde_json::Value::String(name.to_owned()));
        }
        geojson::Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}
