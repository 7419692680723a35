//! Turning a raw table into the two-group [`Dataset`].

use std::collections::BTreeMap;

use tracing::{debug, info};
use twogroup_model::{CellValue, ConfigError, Dataset, GroupConfig, Observation};

use crate::csv_table::CsvTable;
use crate::error::Result;

/// Partition `table` rows into groups A and B.
///
/// Rows whose group cell matches neither label are excluded and counted.
/// Every other column becomes a [`CellValue`] on the observation.
pub fn build_dataset(table: &CsvTable, group: &GroupConfig) -> Result<Dataset> {
    let labels = group.labels();
    let mut missing = Vec::new();
    let group_idx = table.column_index(&group.column);
    if group_idx.is_none() {
        missing.push(group.column.clone());
    }
    let subject_idx = match &group.subject_column {
        Some(column) => {
            let idx = table.column_index(column);
            if idx.is_none() {
                missing.push(column.clone());
            }
            idx
        }
        None => None,
    };
    let Some(group_idx) = group_idx.filter(|_| missing.is_empty()) else {
        return Err(ConfigError::MissingColumns { names: missing }.into());
    };

    let mut observations = Vec::with_capacity(table.rows.len());
    let mut excluded = 0usize;
    for row in &table.rows {
        let Some(assigned) = labels.resolve(&row[group_idx]) else {
            excluded += 1;
            continue;
        };
        let values: BTreeMap<String, CellValue> = table
            .headers
            .iter()
            .zip(row)
            .enumerate()
            .filter(|(idx, _)| *idx != group_idx)
            .map(|(_, (header, raw))| (header.clone(), CellValue::parse(raw)))
            .collect();
        observations.push(Observation {
            subject_id: subject_idx
                .map(|idx| row[idx].clone())
                .filter(|id| !id.is_empty()),
            group: assigned,
            values,
        });
    }
    if excluded > 0 {
        info!(
            column = %group.column,
            excluded,
            "excluded rows outside the two compared groups"
        );
    }
    debug!(rows = observations.len(), "dataset built");
    Ok(Dataset {
        columns: table.headers.clone(),
        group_column: group.column.clone(),
        labels,
        observations,
    })
}
