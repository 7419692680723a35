//! The four result tables as polars frames.
//!
//! Each row is keyed by block, variable and group labels. Failed rows carry
//! the error kind and message with null statistics. With `blank_rows` an
//! all-null row separates consecutive blocks.

use polars::prelude::{Column, DataFrame, PolarsResult};
use twogroup_model::{
    AnalysisError, AnalysisResults, BaselineRecord, ComparisonRecord, NormalityRecord,
};

/// Rows of consecutive blocks, with `None` between blocks when requested.
fn separated<'a, T, B, I>(blocks: B, blank_rows: bool) -> Vec<Option<&'a T>>
where
    B: IntoIterator<Item = I>,
    I: IntoIterator<Item = &'a T>,
    T: 'a,
{
    let mut rows = Vec::new();
    for (idx, block) in blocks.into_iter().enumerate() {
        if blank_rows && idx > 0 {
            rows.push(None);
        }
        rows.extend(block.into_iter().map(Some));
    }
    rows
}

fn text<T>(name: &str, rows: &[Option<&T>], value: impl Fn(&T) -> Option<String>) -> Column {
    let values: Vec<Option<String>> = rows.iter().map(|row| row.and_then(&value)).collect();
    Column::new(name.into(), values)
}

fn float<T>(name: &str, rows: &[Option<&T>], value: impl Fn(&T) -> Option<f64>) -> Column {
    let values: Vec<Option<f64>> = rows.iter().map(|row| row.and_then(&value)).collect();
    Column::new(name.into(), values)
}

fn count<T>(name: &str, rows: &[Option<&T>], value: impl Fn(&T) -> Option<usize>) -> Column {
    let values: Vec<Option<u64>> = rows
        .iter()
        .map(|row| row.and_then(&value).map(|n| n as u64))
        .collect();
    Column::new(name.into(), values)
}

fn flag<T>(name: &str, rows: &[Option<&T>], value: impl Fn(&T) -> Option<bool>) -> Column {
    let values: Vec<Option<bool>> = rows.iter().map(|row| row.and_then(&value)).collect();
    Column::new(name.into(), values)
}

fn ok<T>(outcome: &Result<T, AnalysisError>) -> Option<&T> {
    outcome.as_ref().ok()
}

/// A sparse table keeps its statistics and reports the issue as its error.
fn baseline_problem(record: &BaselineRecord) -> Option<&AnalysisError> {
    record.outcome.as_ref().err().or(record.issue.as_ref())
}

fn error_kind<T>(outcome: &Result<T, AnalysisError>) -> Option<String> {
    outcome
        .as_ref()
        .err()
        .map(|error| error.kind().as_str().to_string())
}

fn error_message(error: &AnalysisError) -> String {
    match error {
        AnalysisError::InsufficientData { reason }
        | AnalysisError::DegenerateGroup { reason }
        | AnalysisError::SparseContingencyTable { reason } => reason.clone(),
    }
}

pub fn baseline_frame(results: &AnalysisResults) -> PolarsResult<DataFrame> {
    let rows: Vec<Option<&BaselineRecord>> = results.baseline.iter().map(Some).collect();
    DataFrame::new(vec![
        text("variable", &rows, |r| Some(r.variable.clone())),
        text("test", &rows, |r| Some(r.kind.as_str().to_string())),
        text("statistic_name", &rows, |r| {
            Some(r.kind.statistic_name().to_string())
        }),
        float("statistic", &rows, |r| ok(&r.outcome).map(|s| s.statistic)),
        float("df", &rows, |r| ok(&r.outcome).map(|s| s.df)),
        float("p_value", &rows, |r| ok(&r.outcome).map(|s| s.p_value)),
        text("effect_size_kind", &rows, |r| {
            ok(&r.outcome)
                .and_then(|s| s.effect_size)
                .map(|e| e.kind.as_str().to_string())
        }),
        float("effect_size", &rows, |r| {
            ok(&r.outcome).and_then(|s| s.effect_size).map(|e| e.value)
        }),
        count("n_total", &rows, |r| ok(&r.outcome).and_then(|s| s.n_total)),
        count("n_a", &rows, |r| ok(&r.outcome).and_then(|s| s.n_a)),
        count("n_b", &rows, |r| ok(&r.outcome).and_then(|s| s.n_b)),
        float("min_expected", &rows, |r| {
            ok(&r.outcome).and_then(|s| s.min_expected)
        }),
        flag("unreliable", &rows, |r| {
            ok(&r.outcome).map(|s| s.unreliable)
        }),
        flag("balanced", &rows, |r| ok(&r.outcome).map(|s| s.balanced)),
        text("error", &rows, |r| {
            baseline_problem(r).map(|e| e.kind().as_str().to_string())
        }),
        text("error_message", &rows, |r| {
            baseline_problem(r).map(error_message)
        }),
    ])
}

pub fn descriptives_frame(results: &AnalysisResults, blank_rows: bool) -> PolarsResult<DataFrame> {
    let rows = separated(
        results.blocks.iter().map(|block| &block.descriptives),
        blank_rows,
    );
    let labels = &results.labels;
    DataFrame::new(vec![
        text("block", &rows, |r| Some(r.block.clone())),
        text("variable", &rows, |r| Some(r.variable.clone())),
        text("group", &rows, |r| Some(labels.label(r.group).to_string())),
        count("n", &rows, |r| ok(&r.outcome).map(|s| s.n)),
        float("mean", &rows, |r| ok(&r.outcome).map(|s| s.mean)),
        float("std", &rows, |r| ok(&r.outcome).and_then(|s| s.std)),
        float("median", &rows, |r| ok(&r.outcome).map(|s| s.median)),
        float("q1", &rows, |r| ok(&r.outcome).map(|s| s.q1)),
        float("q3", &rows, |r| ok(&r.outcome).map(|s| s.q3)),
        float("min", &rows, |r| ok(&r.outcome).map(|s| s.min)),
        float("max", &rows, |r| ok(&r.outcome).map(|s| s.max)),
        text("error", &rows, |r| error_kind(&r.outcome)),
        text("error_message", &rows, |r| {
            r.outcome.as_ref().err().map(error_message)
        }),
    ])
}

pub fn normality_frame(results: &AnalysisResults, blank_rows: bool) -> PolarsResult<DataFrame> {
    let rows = separated(
        results.blocks.iter().map(|block| &block.normality),
        blank_rows,
    );
    let labels = &results.labels;
    DataFrame::new(vec![
        text("block", &rows, |r: &NormalityRecord| Some(r.block.clone())),
        text("variable", &rows, |r| Some(r.variable.clone())),
        text("group", &rows, |r| Some(labels.label(r.group).to_string())),
        float("statistic", &rows, |r| r.result.statistic),
        float("p_value", &rows, |r| r.result.p_value),
        text("status", &rows, |r| {
            Some(r.result.status.as_str().to_string())
        }),
        flag("is_normal", &rows, |r| Some(r.result.is_normal())),
        text("note", &rows, |r| r.result.note.clone()),
    ])
}

pub fn tests_frame(results: &AnalysisResults, blank_rows: bool) -> PolarsResult<DataFrame> {
    let rows = separated(
        results.blocks.iter().map(|block| &block.comparisons),
        blank_rows,
    );
    let labels = &results.labels;
    let alpha = results.significance_alpha;
    let flags = |record: &ComparisonRecord| record.correction.map(|c| c.flags(alpha));
    DataFrame::new(vec![
        text("block", &rows, |r| Some(r.block.clone())),
        text("variable", &rows, |r| Some(r.variable.clone())),
        text("group_a", &rows, |_| Some(labels.a.clone())),
        text("group_b", &rows, |_| Some(labels.b.clone())),
        text("method", &rows, |r| {
            ok(&r.outcome).map(|t| t.method.as_str().to_string())
        }),
        float("statistic", &rows, |r| ok(&r.outcome).map(|t| t.statistic)),
        float("df", &rows, |r| ok(&r.outcome).and_then(|t| t.df)),
        float("z", &rows, |r| ok(&r.outcome).and_then(|t| t.z)),
        float("p_value", &rows, |r| ok(&r.outcome).map(|t| t.p_value)),
        text("p_method", &rows, |r| {
            ok(&r.outcome).map(|t| t.p_method.as_str().to_string())
        }),
        text("effect_size_kind", &rows, |r| {
            ok(&r.outcome).map(|t| t.effect_size.kind.as_str().to_string())
        }),
        float("effect_size", &rows, |r| {
            ok(&r.outcome).map(|t| t.effect_size.value)
        }),
        count("n_a", &rows, |r| ok(&r.outcome).map(|t| t.n_a)),
        count("n_b", &rows, |r| ok(&r.outcome).map(|t| t.n_b)),
        float("p_holm", &rows, |r| r.correction.map(|c| c.holm_p)),
        float("p_bh", &rows, |r| r.correction.map(|c| c.bh_p)),
        flag("reject_holm", &rows, |r| {
            r.correction.map(|c| c.reject_holm)
        }),
        flag("reject_bh", &rows, |r| r.correction.map(|c| c.reject_bh)),
        flag("significant_raw", &rows, |r| flags(r).map(|f| f.raw)),
        flag("significant_holm", &rows, |r| flags(r).map(|f| f.holm)),
        flag("significant_bh", &rows, |r| flags(r).map(|f| f.bh)),
        text("error", &rows, |r| error_kind(&r.outcome)),
        text("error_message", &rows, |r| {
            r.outcome.as_ref().err().map(error_message)
        }),
    ])
}
