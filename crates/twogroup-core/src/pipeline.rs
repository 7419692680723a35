//! Block-by-block orchestration of one analysis run.
//!
//! # Stages
//!
//! 1. Schema validation (fatal on failure)
//! 2. Baseline checks
//! 3. Per block, per variable: descriptives, normality, test dispatch
//! 4. Per block: Holm and Benjamini–Hochberg correction
//!
//! Failures confined to one variable are recorded on its rows and never stop
//! the run.

use tracing::{debug, info, info_span, warn};
use twogroup_model::{
    AnalysisConfig, AnalysisError, AnalysisResults, BlockConfig, BlockResult, ComparisonRecord,
    ConfigError, Dataset, DescriptiveRecord, DescriptiveStats, Group, NormalityRecord,
    NumericColumn,
};
use twogroup_stats::describe;

use crate::baseline::check_baseline;
use crate::correction::correct_block;
use crate::dispatch::dispatch;
use crate::normality::evaluate_normality;
use crate::schema::validate_against_schema;

/// Validate `config` against `dataset`, then analyze every block.
pub fn run_analysis(
    dataset: &Dataset,
    config: &AnalysisConfig,
) -> Result<AnalysisResults, ConfigError> {
    validate_against_schema(config, dataset)?;
    info!(
        group_a = %dataset.labels.a,
        group_b = %dataset.labels.b,
        n_a = dataset.group_size(Group::A),
        n_b = dataset.group_size(Group::B),
        blocks = config.blocks.len(),
        policy = %config.test_policy,
        "starting analysis"
    );

    let baseline = {
        let _span = info_span!("baseline").entered();
        check_baseline(dataset, config)
    };
    let blocks = config
        .blocks
        .iter()
        .map(|block| analyze_block(dataset, block, config))
        .collect();

    let results = AnalysisResults {
        labels: dataset.labels.clone(),
        significance_alpha: config.significance_alpha,
        baseline,
        blocks,
    };
    info!(failures = results.failure_count(), "analysis complete");
    Ok(results)
}

/// Analyze one block as an independent correction family.
pub fn analyze_block(
    dataset: &Dataset,
    block: &BlockConfig,
    config: &AnalysisConfig,
) -> BlockResult {
    let _span = info_span!("block", block = %block.name).entered();
    let mut result = BlockResult {
        name: block.name.clone(),
        descriptives: Vec::with_capacity(block.variables.len() * 2),
        normality: Vec::with_capacity(block.variables.len() * 2),
        comparisons: Vec::with_capacity(block.variables.len()),
    };
    for variable in &block.variables {
        analyze_variable(dataset, &block.name, variable, config, &mut result);
    }
    correct_block(&mut result.comparisons, config.significance_alpha);
    debug!(
        variables = block.variables.len(),
        corrected = result
            .comparisons
            .iter()
            .filter(|record| record.correction.is_some())
            .count(),
        "block corrected"
    );
    result
}

fn analyze_variable(
    dataset: &Dataset,
    block: &str,
    variable: &str,
    config: &AnalysisConfig,
    result: &mut BlockResult,
) {
    let columns = Group::BOTH.map(|group| dataset.numeric_values(variable, group));
    let non_numeric: usize = columns.iter().map(|column| column.non_numeric).sum();
    if non_numeric > 0 {
        warn!(variable, count = non_numeric, "dropped non-numeric cells");
    }

    let [values_a, values_b] = &columns;
    let normality_a = evaluate_normality(&values_a.values, config.normality_alpha);
    let normality_b = evaluate_normality(&values_b.values, config.normality_alpha);

    for (group, column) in Group::BOTH.into_iter().zip(&columns) {
        let outcome = describe_column(column);
        if let Err(error) = &outcome {
            log_failure(variable, group_scope(group), error);
        }
        result.descriptives.push(DescriptiveRecord {
            block: block.to_string(),
            variable: variable.to_string(),
            group,
            outcome,
        });
    }

    let outcome = dispatch(
        &values_a.values,
        &values_b.values,
        &normality_a,
        &normality_b,
        config.test_policy,
    );
    match &outcome {
        Ok(test) => debug!(
            variable,
            method = test.method.as_str(),
            p_value = test.p_value,
            "test complete"
        ),
        Err(error) => log_failure(variable, "comparison", error),
    }

    for (group, normality) in [(Group::A, normality_a), (Group::B, normality_b)] {
        result.normality.push(NormalityRecord {
            block: block.to_string(),
            variable: variable.to_string(),
            group,
            result: normality,
        });
    }
    result.comparisons.push(ComparisonRecord {
        block: block.to_string(),
        variable: variable.to_string(),
        outcome,
        correction: None,
    });
}

fn describe_column(column: &NumericColumn) -> Result<DescriptiveStats, AnalysisError> {
    if column.values.is_empty() && column.non_numeric > 0 {
        return Err(AnalysisError::insufficient(format!(
            "group has no numeric observations ({} non-numeric cells dropped)",
            column.non_numeric
        )));
    }
    describe(&column.values)
}

fn group_scope(group: Group) -> &'static str {
    match group {
        Group::A => "descriptives A",
        Group::B => "descriptives B",
    }
}

fn log_failure(variable: &str, scope: &str, error: &AnalysisError) {
    warn!(variable, scope, error = %error.kind(), "{error}");
}
