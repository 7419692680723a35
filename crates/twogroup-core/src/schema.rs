//! Configuration checks against the loaded dataset.

use twogroup_model::{AnalysisConfig, ConfigError, Dataset, Group};

/// Every referenced column that is absent from `headers`, in reference order.
pub fn missing_columns(config: &AnalysisConfig, headers: &[String]) -> Vec<String> {
    config
        .referenced_columns()
        .into_iter()
        .filter(|name| !headers.iter().any(|header| header == name))
        .map(str::to_string)
        .collect()
}

/// Fail with one error naming all missing columns.
pub fn validate_columns(config: &AnalysisConfig, headers: &[String]) -> Result<(), ConfigError> {
    let names = missing_columns(config, headers);
    if names.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::MissingColumns { names })
    }
}

/// Full pre-run check: self-consistency, column references and group labels.
pub fn validate_against_schema(
    config: &AnalysisConfig,
    dataset: &Dataset,
) -> Result<(), ConfigError> {
    config.validate()?;
    validate_columns(config, &dataset.columns)?;
    for group in Group::BOTH {
        if dataset.group_size(group) == 0 {
            return Err(ConfigError::MissingGroupLabel {
                column: config.group.column.clone(),
                label: dataset.labels.label(group).to_string(),
            });
        }
    }
    Ok(())
}
