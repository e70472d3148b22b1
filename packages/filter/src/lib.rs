#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter engine: restricts a seizure table to the user's municipality
//! and month selection.
//!
//! Filtering is a pure derivation; the source table is never mutated.
//! An empty municipality set yields an empty view (not "all"), and an
//! empty month set yields zero selected totals rather than an error.

pub mod export;

use seizure_map_seizure_models::{
    FilterSelection, FilteredRow, FilteredView, Month, SeizureTable,
};

/// Restricts `table` to the municipalities and months of `selection`.
///
/// Row inclusion requires exact municipality-name membership. Values are
/// reordered to the selected month order; selected months absent from
/// the table's column set are skipped. The per-row `selected_total` is
/// the sum over the selected months (0.0 when none are selected), and
/// the source annual total is carried through when the source had one.
#[must_use]
pub fn filter(table: &SeizureTable, selection: &FilterSelection) -> FilteredView {
    let month_indices: Vec<(Month, usize)> = selection
        .months
        .iter()
        .filter_map(|m| table.month_index(*m).map(|idx| (*m, idx)))
        .collect();

    let rows = table
        .rows
        .iter()
        .filter(|row| selection.municipalities.contains(&row.municipality))
        .map(|row| {
            let values: Vec<f64> = month_indices.iter().map(|(_, idx)| row.values[*idx]).collect();
            let selected_total = values.iter().sum();
            FilteredRow {
                municipality: row.municipality.clone(),
                values,
                total: table.has_source_total.then_some(row.total),
                selected_total,
            }
        })
        .collect();

    FilteredView {
        drug: table.drug,
        months: month_indices.iter().map(|(m, _)| *m).collect(),
        has_source_total: table.has_source_total,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use seizure_map_seizure_models::{DrugType, Month, SeizureRow};

    use super::*;

    fn sample_table() -> SeizureTable {
        SeizureTable {
            drug: DrugType::Maconha,
            months: vec![Month::Janeiro, Month::Fevereiro],
            rows: vec![
                SeizureRow {
                    municipality: "CURITIBA".to_owned(),
                    values: vec![10.0, 5.0],
                    total: 15.0,
                },
                SeizureRow {
                    municipality: "LONDRINA".to_owned(),
                    values: vec![0.0, 0.0],
                    total: 0.0,
                },
                SeizureRow {
                    municipality: "MARINGA".to_owned(),
                    values: vec![3.0, 4.0],
                    total: 7.0,
                },
            ],
            has_source_total: true,
        }
    }

    fn selection(municipalities: &[&str], months: &[Month]) -> FilterSelection {
        FilterSelection {
            drug: DrugType::Maconha,
            municipalities: municipalities.iter().map(|m| (*m).to_owned()).collect(),
            months: months.to_vec(),
        }
    }

    #[test]
    fn filters_rows_and_sums_selected_months() {
        let table = sample_table();
        let view = filter(
            &table,
            &selection(&["CURITIBA", "LONDRINA"], &[Month::Janeiro, Month::Fevereiro]),
        );

        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].municipality, "CURITIBA");
        assert!((view.rows[0].selected_total - 15.0).abs() < f64::EPSILON);
        assert!((view.rows[1].selected_total - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_municipality_set_yields_empty_view() {
        let table = sample_table();
        let view = filter(&table, &selection(&[], &[Month::Janeiro]));
        assert!(view.is_empty());
    }

    #[test]
    fn empty_month_set_yields_zero_selected_totals() {
        let table = sample_table();
        let view = filter(&table, &selection(&["CURITIBA", "LONDRINA"], &[]));

        assert_eq!(view.rows.len(), 2);
        assert!(view.months.is_empty());
        for row in &view.rows {
            assert!(row.values.is_empty());
            assert!((row.selected_total - 0.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn respects_selected_month_order() {
        let table = sample_table();
        let view = filter(
            &table,
            &selection(&["CURITIBA"], &[Month::Fevereiro, Month::Janeiro]),
        );

        assert_eq!(view.months, vec![Month::Fevereiro, Month::Janeiro]);
        assert_eq!(view.rows[0].values, vec![5.0, 10.0]);
    }

    #[test]
    fn skips_months_absent_from_the_table() {
        let table = sample_table();
        let view = filter(
            &table,
            &selection(&["CURITIBA"], &[Month::Janeiro, Month::Dezembro]),
        );

        assert_eq!(view.months, vec![Month::Janeiro]);
        assert_eq!(view.rows[0].values, vec![10.0]);
    }

    #[test]
    fn unknown_municipalities_are_absent_not_errors() {
        let table = sample_table();
        let mut municipalities = BTreeSet::new();
        municipalities.insert("ATLANTIS".to_owned());
        municipalities.insert("CURITIBA".to_owned());

        let view = filter(
            &table,
            &FilterSelection {
                drug: DrugType::Maconha,
                municipalities,
                months: vec![Month::Janeiro],
            },
        );
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].municipality, "CURITIBA");
    }

    #[test]
    fn omits_source_total_when_table_has_none() {
        let mut table = sample_table();
        table.has_source_total = false;

        let view = filter(&table, &selection(&["CURITIBA"], &[Month::Janeiro]));
        assert!(!view.has_source_total);
        assert_eq!(view.rows[0].total, None);
    }
}
