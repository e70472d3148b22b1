//! Process-lifetime dataset cache.
//!
//! Tables are loaded lazily on first access and never invalidated within
//! a session; [`DatasetCache::invalidate`] exists so tests (and a future
//! refresh action) can force a reload. Failed loads are not cached, so a
//! re-triggered session retries the read.

use std::collections::BTreeMap;
use std::path::PathBuf;

use seizure_map_seizure_models::{DrugType, SeizureTable};

use crate::{LoadError, loader};

/// Lazily populated cache of loaded seizure tables, keyed by drug type.
///
/// Cached tables are read-only after first load; `get` hands out shared
/// references only.
#[derive(Debug)]
pub struct DatasetCache {
    /// Directory containing one CSV per drug type.
    data_dir: PathBuf,
    tables: BTreeMap<DrugType, SeizureTable>,
}

impl DatasetCache {
    /// Creates an empty cache reading datasets from `data_dir`.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            tables: BTreeMap::new(),
        }
    }

    /// Returns the table for `drug`, loading it on first access.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the backing CSV is missing, unreadable,
    /// or fails schema validation. The error is not cached.
    pub fn get(&mut self, drug: DrugType) -> Result<&SeizureTable, LoadError> {
        if !self.tables.contains_key(&drug) {
            let path = self.data_dir.join(drug.dataset_file());
            let table = loader::load_from_path(drug, &path)?;
            self.tables.insert(drug, table);
        }
        Ok(&self.tables[&drug])
    }

    /// Returns `true` if the table for `drug` has already been loaded.
    #[must_use]
    pub fn is_cached(&self, drug: DrugType) -> bool {
        self.tables.contains_key(&drug)
    }

    /// Drops every cached table, forcing reloads on next access.
    pub fn invalidate(&mut self) {
        self.tables.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    fn write_dataset(dir: &std::path::Path, drug: DrugType, contents: &str) {
        let mut file = std::fs::File::create(dir.join(drug.dataset_file())).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("seizure_map_cache_{name}_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn loads_once_and_caches() {
        let dir = temp_dir("loads_once");
        write_dataset(&dir, DrugType::Crack, "Municipio,Janeiro\nCURITIBA,1\n");

        let mut cache = DatasetCache::new(dir.clone());
        assert!(!cache.is_cached(DrugType::Crack));

        let rows = cache.get(DrugType::Crack).unwrap().rows.len();
        assert_eq!(rows, 1);
        assert!(cache.is_cached(DrugType::Crack));

        // A cache hit must not re-read the file.
        std::fs::remove_file(dir.join(DrugType::Crack.dataset_file())).unwrap();
        assert!(cache.get(DrugType::Crack).is_ok());
    }

    #[test]
    fn invalidate_forces_reload() {
        let dir = temp_dir("invalidate");
        write_dataset(&dir, DrugType::Maconha, "Municipio,Janeiro\nCURITIBA,1\n");

        let mut cache = DatasetCache::new(dir.clone());
        cache.get(DrugType::Maconha).unwrap();

        write_dataset(
            &dir,
            DrugType::Maconha,
            "Municipio,Janeiro\nCURITIBA,1\nLONDRINA,2\n",
        );
        cache.invalidate();
        assert!(!cache.is_cached(DrugType::Maconha));

        let rows = cache.get(DrugType::Maconha).unwrap().rows.len();
        assert_eq!(rows, 2);
    }

    #[test]
    fn failed_loads_are_not_cached() {
        let dir = temp_dir("failed_loads");
        let mut cache = DatasetCache::new(dir.clone());

        assert!(matches!(
            cache.get(DrugType::Cocaina).unwrap_err(),
            LoadError::Io(_)
        ));
        assert!(!cache.is_cached(DrugType::Cocaina));

        // One dataset failing must not affect the others.
        write_dataset(&dir, DrugType::Crack, "Municipio,Janeiro\nCURITIBA,1\n");
        assert!(cache.get(DrugType::Crack).is_ok());
    }
}
