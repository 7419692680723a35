//! Effect sizes matching each test.
//!
//! Sign convention: positive values mean group A has higher values.

use crate::descriptive::{mean, sample_variance};

/// Cohen's d with the unequal-variance standardizer √((s²_a + s²_b) / 2).
///
/// NaN when either group is empty or the standardizer is zero.
pub fn cohens_d(a: &[f64], b: &[f64]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return f64::NAN;
    }
    let var_a = sample_variance(a).unwrap_or(0.0);
    let var_b = sample_variance(b).unwrap_or(0.0);
    let standardizer = ((var_a + var_b) / 2.0).sqrt();
    if standardizer == 0.0 {
        return f64::NAN;
    }
    (mean(a) - mean(b)) / standardizer
}

/// Rank-biserial correlation `1 − 2·U_b / (n_a·n_b)` from the U of group B.
pub fn rank_biserial(u_b: f64, n_a: usize, n_b: usize) -> f64 {
    if n_a == 0 || n_b == 0 {
        return f64::NAN;
    }
    1.0 - 2.0 * u_b / (n_a as f64 * n_b as f64)
}

/// Cramér's V for a chi-square statistic over an r × c table.
pub fn cramers_v(chi2: f64, n: usize, rows: usize, cols: usize) -> Option<f64> {
    let k = rows.min(cols).checked_sub(1)?;
    if n == 0 || k == 0 {
        return None;
    }
    Some((chi2 / (n as f64 * k as f64)).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cohens_d_uses_average_variance() {
        // var_a = 2.5, var_b = 10 -> sd = sqrt(6.25) = 2.5; diff = -3
        let d = cohens_d(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 6.0, 8.0, 10.0]);
        assert!((d + 1.2).abs() < 1e-12);
        assert!(cohens_d(&[], &[1.0]).is_nan());
    }

    #[test]
    fn rank_biserial_bounds() {
        // Group A entirely above B: U_b = 0.
        assert!((rank_biserial(0.0, 5, 5) - 1.0).abs() < f64::EPSILON);
        assert!((rank_biserial(25.0, 5, 5) + 1.0).abs() < f64::EPSILON);
        assert!(rank_biserial(0.0, 0, 5).is_nan());
    }

    #[test]
    fn cramers_v_for_two_by_two() {
        let v = cramers_v(5.0, 20, 2, 2).expect("defined");
        assert!((v - 0.5).abs() < 1e-12);
        assert_eq!(cramers_v(5.0, 20, 2, 1), None);
    }
}
