//! Running the selected two-group test and its matching effect size.

use twogroup_model::{
    AnalysisError, EffectSize, EffectSizeKind, NormalityResult, PValueMethod, TestMethod,
    TestPolicy, TestResult,
};
use twogroup_stats::{cohens_d, mann_whitney_u, rank_biserial, welch_t_test};

use crate::selection::select_method;

/// Select a method from normality and policy, then run it.
pub fn dispatch(
    a: &[f64],
    b: &[f64],
    normality_a: &NormalityResult,
    normality_b: &NormalityResult,
    policy: TestPolicy,
) -> Result<TestResult, AnalysisError> {
    run_test(select_method(normality_a, normality_b, policy), a, b)
}

/// Run `method` on groups `a` and `b`.
///
/// Fails with `DegenerateGroup` when a group has fewer than two values or
/// both groups are constant at the same value, regardless of method. Welch
/// also fails when both groups are constant at different values, since the
/// standard error is zero; Mann–Whitney reports full separation instead.
pub fn run_test(method: TestMethod, a: &[f64], b: &[f64]) -> Result<TestResult, AnalysisError> {
    check_degenerate(a, b)?;
    let (n_a, n_b) = (a.len(), b.len());
    match method {
        TestMethod::WelchT => {
            let test = welch_t_test(a, b)?;
            Ok(TestResult {
                method,
                statistic: test.t,
                p_value: test.p_value,
                p_method: PValueMethod::StudentT,
                df: Some(test.df),
                z: None,
                effect_size: EffectSize {
                    kind: EffectSizeKind::CohensD,
                    value: cohens_d(a, b),
                },
                n_a,
                n_b,
            })
        }
        TestMethod::MannWhitney => {
            let test = mann_whitney_u(a, b)?;
            Ok(TestResult {
                method,
                statistic: test.u_a,
                p_value: test.p_value,
                p_method: test.p_method,
                df: None,
                z: Some(test.z),
                effect_size: EffectSize {
                    kind: EffectSizeKind::RankBiserialR,
                    value: rank_biserial(test.u_b, n_a, n_b),
                },
                n_a,
                n_b,
            })
        }
    }
}

fn check_degenerate(a: &[f64], b: &[f64]) -> Result<(), AnalysisError> {
    if a.len() < 2 || b.len() < 2 {
        return Err(AnalysisError::degenerate(format!(
            "each group needs at least 2 observations (got {} and {})",
            a.len(),
            b.len()
        )));
    }
    if let Some(value) = constant_value(a)
        && constant_value(b) == Some(value)
    {
        return Err(AnalysisError::degenerate(format!(
            "both groups are constant at {value}"
        )));
    }
    Ok(())
}

fn constant_value(values: &[f64]) -> Option<f64> {
    let first = *values.first()?;
    values.iter().all(|v| *v == first).then_some(first)
}
