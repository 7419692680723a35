use twogroup_model::AnalysisError;

use crate::descriptive::{mean, sample_variance};
use crate::distribution::student_t_two_sided;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WelchTest {
    pub t: f64,
    /// Welch–Satterthwaite degrees of freedom.
    pub df: f64,
    pub p_value: f64,
}

/// Two-sided Welch two-sample t-test (unequal variances).
///
/// Two constant groups are rejected even when their values differ, because
/// the standard error is zero and t is unbounded.
pub fn welch_t_test(a: &[f64], b: &[f64]) -> Result<WelchTest, AnalysisError> {
    let (Some(var_a), Some(var_b)) = (sample_variance(a), sample_variance(b)) else {
        return Err(AnalysisError::degenerate(format!(
            "Welch t-test needs at least 2 observations per group (got {} and {})",
            a.len(),
            b.len()
        )));
    };
    let se_a = var_a / a.len() as f64;
    let se_b = var_b / b.len() as f64;
    let se2 = se_a + se_b;
    if se2 <= 0.0 {
        return Err(AnalysisError::degenerate(format!(
            "both groups have zero variance (constant at {} and {}); t statistic undefined",
            mean(a),
            mean(b)
        )));
    }
    let t = (mean(a) - mean(b)) / se2.sqrt();
    let df = se2.powi(2)
        / (se_a.powi(2) / (a.len() - 1) as f64 + se_b.powi(2) / (b.len() - 1) as f64);
    let p_value = student_t_two_sided(t, df)?;
    Ok(WelchTest { t, df, p_value })
}
