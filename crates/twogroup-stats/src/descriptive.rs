//! Per-group summary statistics.

use twogroup_model::{AnalysisError, DescriptiveStats};

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance with the n − 1 denominator; `None` below two values.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some(ss / (values.len() - 1) as f64)
}

/// Ascending copy of `values`.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Quantile of sorted data, linear interpolation between order statistics.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        len => {
            let h = (len - 1) as f64 * q.clamp(0.0, 1.0);
            let lo = h.floor() as usize;
            let hi = (lo + 1).min(len - 1);
            sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
        }
    }
}

/// Summary statistics of one group's values.
pub fn describe(values: &[f64]) -> Result<DescriptiveStats, AnalysisError> {
    if values.is_empty() {
        return Err(AnalysisError::insufficient("group has no observations"));
    }
    let data = sorted(values);
    Ok(DescriptiveStats {
        n: data.len(),
        mean: mean(&data),
        std: sample_variance(&data).map(f64::sqrt),
        median: quantile_sorted(&data, 0.5),
        q1: quantile_sorted(&data, 0.25),
        q3: quantile_sorted(&data, 0.75),
        min: data[0],
        max: data[data.len() - 1],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_small_sample() {
        let stats = describe(&[4.0, 1.0, 3.0, 2.0]).expect("non-empty");
        assert_eq!(stats.n, 4);
        assert!((stats.mean - 2.5).abs() < 1e-12);
        let std = stats.std.expect("n > 1");
        assert!((std - 1.290_994_448_735_805_6).abs() < 1e-12);
        assert!((stats.median - 2.5).abs() < 1e-12);
        assert!((stats.q1 - 1.75).abs() < 1e-12);
        assert!((stats.q3 - 3.25).abs() < 1e-12);
        assert!((stats.min - 1.0).abs() < f64::EPSILON);
        assert!((stats.max - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn single_value_has_undefined_std() {
        let stats = describe(&[7.0]).expect("non-empty");
        assert_eq!(stats.std, None);
        assert!((stats.q1 - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn constant_group_has_zero_std() {
        let stats = describe(&[5.0; 10]).expect("non-empty");
        assert_eq!(stats.std, Some(0.0));
    }

    #[test]
    fn empty_group_is_insufficient() {
        assert!(matches!(
            describe(&[]),
            Err(AnalysisError::InsufficientData { .. })
        ));
    }
}
