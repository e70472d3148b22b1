#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Core domain types for the drug seizure dashboard.
//!
//! This crate defines the canonical table, selection, and filtered-view
//! types shared across the entire seizure-map system. Tables are immutable
//! after load; everything derived from them is recomputed per selection
//! change and never stored.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A drug dataset selector. Each drug type has its own independent table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DrugType {
    /// Marijuana seizures.
    Maconha,
    /// Cocaine seizures.
    Cocaina,
    /// Crack seizures.
    Crack,
}

impl DrugType {
    /// Returns all drug types, in dashboard display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Maconha, Self::Cocaina, Self::Crack]
    }

    /// Human-readable label (with diacritics) for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Maconha => "Maconha",
            Self::Cocaina => "Cocaína",
            Self::Crack => "Crack",
        }
    }

    /// Canonical file name of the backing dataset for this drug type.
    #[must_use]
    pub const fn dataset_file(self) -> &'static str {
        match self {
            Self::Maconha => "MaconhaV2.csv",
            Self::Cocaina => "CocainaV2.csv",
            Self::Crack => "CrackV2.csv",
        }
    }
}

/// A calendar month column, named as in the source spreadsheets.
///
/// Month columns are a fixed enumerated set, not arbitrary strings: a
/// header that does not parse as one of these is a schema error at load
/// time.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Month {
    Janeiro,
    Fevereiro,
    /// Accepts both the ASCII spelling and "Março" on parse; always
    /// displays as "Marco" to match the normalized source headers.
    #[strum(to_string = "Marco", serialize = "Março")]
    Marco,
    Abril,
    Maio,
    Junho,
    Julho,
    Agosto,
    Setembro,
    Outubro,
    Novembro,
    Dezembro,
}

impl Month {
    /// Returns all twelve months in calendar order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Janeiro,
            Self::Fevereiro,
            Self::Marco,
            Self::Abril,
            Self::Maio,
            Self::Junho,
            Self::Julho,
            Self::Agosto,
            Self::Setembro,
            Self::Outubro,
            Self::Novembro,
            Self::Dezembro,
        ]
    }
}

/// One row of a seizure table: a municipality and its monthly quantities.
///
/// `values` is aligned index-for-index with the owning table's month list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeizureRow {
    /// Municipality display name, unique within a table.
    pub municipality: String,
    /// Seized quantity (kg) per month column, aligned with [`SeizureTable::months`].
    pub values: Vec<f64>,
    /// Annual total: taken from the source when present, otherwise the sum
    /// of all month columns.
    pub total: f64,
}

/// A loaded dataset: one row per municipality, one column per month.
///
/// Immutable after load. The month list is carried explicitly with the
/// table so column order is never inferred from row data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeizureTable {
    /// Which drug dataset this table holds.
    pub drug: DrugType,
    /// Month columns present in the source, in source order.
    pub months: Vec<Month>,
    /// One row per municipality.
    pub rows: Vec<SeizureRow>,
    /// Whether the source carried a precomputed `Total` column. When
    /// `false`, row totals were computed at load time and the display
    /// table omits the `Total` column.
    pub has_source_total: bool,
}

impl SeizureTable {
    /// Returns the index of `month` in this table's column list, if present.
    #[must_use]
    pub fn month_index(&self, month: Month) -> Option<usize> {
        self.months.iter().position(|m| *m == month)
    }

    /// Returns all municipality names in row order.
    #[must_use]
    pub fn municipalities(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.municipality.as_str()).collect()
    }
}

/// The user's current filter state: one drug, a municipality subset, and
/// an ordered month subset.
///
/// Session-local and re-read on every recomputation pass; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    /// Selected drug dataset.
    pub drug: DrugType,
    /// Selected municipalities. Empty means an empty filtered view, not
    /// "all municipalities".
    pub municipalities: BTreeSet<String>,
    /// Selected month columns, in display order.
    pub months: Vec<Month>,
}

impl FilterSelection {
    /// Creates a selection covering every municipality and month of `table`
    /// (the "select all" shortcut).
    #[must_use]
    pub fn select_all(table: &SeizureTable) -> Self {
        Self {
            drug: table.drug,
            municipalities: table
                .rows
                .iter()
                .map(|r| r.municipality.clone())
                .collect(),
            months: table.months.clone(),
        }
    }
}

/// One row of a filtered view, with values reordered to the selected
/// month order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredRow {
    /// Municipality display name.
    pub municipality: String,
    /// Values for the selected months, in selection order.
    pub values: Vec<f64>,
    /// Source annual total, carried through when the source had one.
    pub total: Option<f64>,
    /// Sum of the selected month values. Zero when no months are selected.
    pub selected_total: f64,
}

/// A seizure table restricted to the selected municipalities and months.
///
/// Derived on every recomputation pass and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredView {
    /// Drug dataset the view was derived from.
    pub drug: DrugType,
    /// Selected months, in display order.
    pub months: Vec<Month>,
    /// Whether the source table carried a `Total` column. Controls
    /// whether the display table and CSV export append a `Total` column.
    pub has_source_total: bool,
    /// Filtered rows, in the source table's row order.
    pub rows: Vec<FilteredRow>,
}

impl FilteredView {
    /// Returns `true` when no rows survived the municipality filter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Fixed map-height choices offered by the dashboard.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MapSize {
    Small,
    Medium,
    Large,
}

impl MapSize {
    /// Returns all map sizes, smallest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Small, Self::Medium, Self::Large]
    }

    /// Rendered map height in pixels.
    #[must_use]
    pub const fn height_px(self) -> u32 {
        match self {
            Self::Small => 400,
            Self::Medium => 600,
            Self::Large => 800,
        }
    }
}
