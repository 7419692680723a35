//! Loading stage shared by `analyze` and `check`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, trace};
use twogroup_core::{validate_against_schema, validate_columns};
use twogroup_ingest::{build_dataset, load_config, read_csv_table};
use twogroup_model::{AnalysisConfig, Dataset, Group};

use crate::logging::redact_value;
use crate::overrides::ConfigOverrides;

/// A validated configuration and the dataset it applies to.
#[derive(Debug, Clone)]
pub struct LoadedInputs {
    pub config: AnalysisConfig,
    pub dataset: Dataset,
}

/// Read the configuration and the data file, apply overrides and run every
/// pre-analysis check. Any error here is fatal for the run.
pub fn load_inputs(
    data: &Path,
    config_path: &Path,
    overrides: &ConfigOverrides,
) -> Result<LoadedInputs> {
    let span = info_span!("load", data = %data.display());
    let _guard = span.enter();

    let mut config = load_config(config_path)
        .with_context(|| format!("load configuration {}", config_path.display()))?;
    overrides.apply(&mut config);
    config.validate().context("invalid configuration")?;

    let table = read_csv_table(data).with_context(|| format!("read data file {}", data.display()))?;
    let (columns, rows) = (table.headers.len(), table.rows.len());
    debug!(columns, rows, "data file read");
    validate_columns(&config, &table.headers).context("configuration does not match data")?;

    let dataset = build_dataset(&table, &config.group).context("partition groups")?;
    validate_against_schema(&config, &dataset).context("configuration does not match data")?;
    for obs in &dataset.observations {
        if let Some(id) = &obs.subject_id {
            trace!(subject = redact_value(id), group = %obs.group, "observation");
        }
    }
    info!(
        group_a = dataset.group_size(Group::A),
        group_b = dataset.group_size(Group::B),
        blocks = config.blocks.len(),
        "inputs loaded"
    );
    Ok(LoadedInputs { config, dataset })
}
