//! Group-equivalence checks on pre-treatment variables.
//!
//! Categorical variables get a chi-square test of independence with
//! Cramér's V. Continuous variables always get a Welch t-test with Cohen's d,
//! without normality branching. The balance verdict is descriptive only.

use tracing::{debug, warn};
use twogroup_model::{
    AnalysisConfig, AnalysisError, BaselineRecord, BaselineStats, BaselineTestKind, Dataset,
    EffectSize, EffectSizeKind, Group, TestMethod,
};
use twogroup_stats::{ContingencyTable, MIN_EXPECTED_COUNT, chi_square_independence};

use crate::dispatch::run_test;

/// All configured baseline checks, categorical first, in declaration order.
pub fn check_baseline(dataset: &Dataset, config: &AnalysisConfig) -> Vec<BaselineRecord> {
    let alpha = config.significance_alpha;
    let categorical = config
        .baseline
        .categorical
        .iter()
        .map(|variable| check_categorical(dataset, variable, alpha));
    let continuous = config
        .baseline
        .continuous
        .iter()
        .map(|variable| check_continuous(dataset, variable, alpha));
    categorical.chain(continuous).inspect(log_record).collect()
}

/// Chi-square test of group × category.
///
/// A table with an expected count below 5 still yields statistics; the record
/// is flagged `unreliable` and carries a `SparseContingencyTable` issue.
pub fn check_categorical(dataset: &Dataset, variable: &str, alpha: f64) -> BaselineRecord {
    let labels = &dataset.labels;
    let categories: Vec<(Group, Vec<String>)> = Group::BOTH
        .iter()
        .map(|&group| (group, dataset.categories(variable, group)))
        .collect();
    let pairs = categories.iter().flat_map(|(group, values)| {
        values
            .iter()
            .map(move |category| (labels.label(*group), category.as_str()))
    });
    let table = ContingencyTable::from_pairs(pairs);

    let mut issue = None;
    let outcome = chi_square_independence(&table).map(|test| {
        if test.is_sparse() {
            issue = Some(AnalysisError::sparse(format!(
                "minimum expected count {:.2} is below {MIN_EXPECTED_COUNT}",
                test.min_expected
            )));
        }
        BaselineStats {
            statistic: test.statistic,
            df: test.df,
            p_value: test.p_value,
            effect_size: test.cramers_v.map(|value| EffectSize {
                kind: EffectSizeKind::CramersV,
                value,
            }),
            n_total: Some(test.n),
            n_a: None,
            n_b: None,
            min_expected: Some(test.min_expected),
            unreliable: test.is_sparse(),
            balanced: test.p_value >= alpha,
        }
    });
    BaselineRecord {
        variable: variable.to_string(),
        kind: BaselineTestKind::ChiSquare,
        outcome,
        issue,
    }
}

/// Welch t-test of a continuous baseline variable.
pub fn check_continuous(dataset: &Dataset, variable: &str, alpha: f64) -> BaselineRecord {
    let a = dataset.numeric_values(variable, Group::A);
    let b = dataset.numeric_values(variable, Group::B);
    let non_numeric = a.non_numeric + b.non_numeric;
    if non_numeric > 0 {
        warn!(variable, count = non_numeric, "dropped non-numeric cells");
    }
    let outcome = run_test(TestMethod::WelchT, &a.values, &b.values).map(|test| BaselineStats {
        statistic: test.statistic,
        df: test.df.unwrap_or(f64::NAN),
        p_value: test.p_value,
        effect_size: Some(test.effect_size),
        n_total: None,
        n_a: Some(test.n_a),
        n_b: Some(test.n_b),
        min_expected: None,
        unreliable: false,
        balanced: test.p_value >= alpha,
    });
    BaselineRecord {
        variable: variable.to_string(),
        kind: BaselineTestKind::WelchT,
        outcome,
        issue: None,
    }
}

fn log_record(record: &BaselineRecord) {
    match (&record.outcome, &record.issue) {
        (Err(error), _) => warn!(
            variable = %record.variable,
            error = %error.kind(),
            "baseline check failed: {error}"
        ),
        (Ok(_), Some(issue)) => warn!(
            variable = %record.variable,
            error = %issue.kind(),
            "baseline check unreliable: {issue}"
        ),
        (Ok(stats), None) => debug!(
            variable = %record.variable,
            test = record.kind.as_str(),
            p_value = stats.p_value,
            balanced = stats.balanced,
            "baseline check"
        ),
    }
}
