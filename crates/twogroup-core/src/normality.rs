//! Per-group normality assessment.

use twogroup_model::{NormalityResult, NormalityStatus};
use twogroup_stats::shapiro_wilk;

/// Shapiro–Wilk assessment of one group's values at `alpha`.
///
/// Samples the test is not defined for (fewer than three values, or all
/// values identical) come back as [`NormalityStatus::Undetermined`] with the
/// reason in `note`; they never produce an error.
pub fn evaluate_normality(values: &[f64], alpha: f64) -> NormalityResult {
    match shapiro_wilk(values) {
        Ok(test) => NormalityResult {
            statistic: Some(test.w),
            p_value: Some(test.p_value),
            status: if test.p_value >= alpha {
                NormalityStatus::Normal
            } else {
                NormalityStatus::NonNormal
            },
            note: None,
        },
        Err(error) => NormalityResult::undetermined(error.to_string()),
    }
}
