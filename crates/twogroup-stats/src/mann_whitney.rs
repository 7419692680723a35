//! Mann–Whitney U test.
//!
//! p-value policy: the exact null distribution of U is used when the pooled
//! sample has no ties and neither group exceeds [`EXACT_MAX_GROUP_SIZE`];
//! otherwise the normal approximation with tie-corrected variance and a 0.5
//! continuity correction. Both are two-sided and capped at 1.

use twogroup_model::{AnalysisError, PValueMethod};

use crate::distribution::normal_sf;

pub const EXACT_MAX_GROUP_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MannWhitney {
    /// U of group A: pairs where A exceeds B, ties counted one half.
    pub u_a: f64,
    pub u_b: f64,
    /// Tie- and continuity-corrected standardized U of group A.
    pub z: f64,
    pub p_value: f64,
    pub p_method: PValueMethod,
}

/// Average ranks (1-based) of `values`, plus the tie term Σ(t³ − t).
pub fn average_ranks(values: &[f64]) -> (Vec<f64>, f64) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&l, &r| values[l].total_cmp(&values[r]));
    let mut ranks = vec![0.0; values.len()];
    let mut tie_term = 0.0;
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // Positions start..end share the average of ranks start+1..=end.
        let rank = (start + end + 1) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        let t = (end - start) as f64;
        tie_term += t * t * t - t;
        start = end;
    }
    (ranks, tie_term)
}

/// Null distribution of U as counts: entry `u` is the number of rank
/// arrangements giving U = u. These are the coefficients of the Gaussian
/// binomial [n_a + n_b choose n_a] in q.
fn u_counts(n_a: usize, n_b: usize) -> Vec<i64> {
    let mut poly: Vec<i64> = vec![1];
    for k in 1..=n_a {
        let shift = n_b + k;
        let mut next = vec![0i64; poly.len() + shift];
        for (i, &c) in poly.iter().enumerate() {
            next[i] += c;
            next[i + shift] -= c;
        }
        // Divide by (1 - q^k).
        for i in k..next.len() {
            next[i] += next[i - k];
        }
        next.truncate(poly.len() + n_b);
        poly = next;
    }
    poly
}

fn exact_two_sided(u: f64, n_a: usize, n_b: usize) -> f64 {
    let counts = u_counts(n_a, n_b);
    let total: i64 = counts.iter().sum();
    let u = u.round() as usize;
    let lower: i64 = counts.iter().take(u + 1).sum();
    let upper: i64 = counts.iter().skip(u).sum();
    let tail = lower.min(upper) as f64 / total as f64;
    (2.0 * tail).min(1.0)
}

/// Two-sided Mann–Whitney U test of `a` against `b`.
pub fn mann_whitney_u(a: &[f64], b: &[f64]) -> Result<MannWhitney, AnalysisError> {
    let (n_a, n_b) = (a.len(), b.len());
    if n_a < 2 || n_b < 2 {
        return Err(AnalysisError::degenerate(format!(
            "Mann-Whitney U needs at least 2 observations per group (got {n_a} and {n_b})"
        )));
    }
    let pooled: Vec<f64> = a.iter().chain(b).copied().collect();
    let (ranks, tie_term) = average_ranks(&pooled);
    let rank_sum_a: f64 = ranks[..n_a].iter().sum();
    let (fa, fb) = (n_a as f64, n_b as f64);
    let u_a = rank_sum_a - fa * (fa + 1.0) / 2.0;
    let u_b = fa * fb - u_a;

    let n = fa + fb;
    let variance = fa * fb / 12.0 * ((n + 1.0) - tie_term / (n * (n - 1.0)));
    if variance <= 0.0 {
        return Err(AnalysisError::degenerate(
            "all values are identical across both groups; U statistic undefined",
        ));
    }
    let diff = u_a - fa * fb / 2.0;
    let z = diff.signum() * (diff.abs() - 0.5).max(0.0) / variance.sqrt();

    let exact = tie_term == 0.0 && n_a <= EXACT_MAX_GROUP_SIZE && n_b <= EXACT_MAX_GROUP_SIZE;
    let (p_value, p_method) = if exact {
        (exact_two_sided(u_a, n_a, n_b), PValueMethod::Exact)
    } else {
        (
            (2.0 * normal_sf(z.abs())).min(1.0),
            PValueMethod::NormalApprox,
        )
    };
    Ok(MannWhitney {
        u_a,
        u_b,
        z,
        p_value,
        p_method,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_average_ties() {
        let (ranks, tie_term) = average_ranks(&[10.0, 20.0, 20.0, 5.0]);
        assert_eq!(ranks, vec![2.0, 3.5, 3.5, 1.0]);
        assert!((tie_term - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn null_distribution_counts() {
        // n_a = n_b = 2: U in 0..=4 with counts 1,1,2,1,1.
        assert_eq!(u_counts(2, 2), vec![1, 1, 2, 1, 1]);
        let counts = u_counts(5, 5);
        assert_eq!(counts.len(), 26);
        assert_eq!(counts.iter().sum::<i64>(), 252);
        assert_eq!(counts[0], 1);
        assert_eq!(counts[25], 1);
    }

    #[test]
    fn complete_separation_exact() {
        let result =
            mann_whitney_u(&[1.0, 2.0, 3.0, 4.0, 5.0], &[6.0, 7.0, 8.0, 9.0, 10.0]).expect("valid");
        assert!(result.u_a.abs() < f64::EPSILON);
        assert!((result.u_b - 25.0).abs() < f64::EPSILON);
        assert_eq!(result.p_method, PValueMethod::Exact);
        // 2 / C(10, 5)
        assert!((result.p_value - 2.0 / 252.0).abs() < 1e-12);
        assert!(result.z < 0.0);
    }

    #[test]
    fn ties_use_normal_approximation() {
        // Tie groups of sizes 3, 2 and 2 give sum(t^3 - t) = 36, so
        // var(U) = 16 / 12 * (9 - 36 / 56) and z = (2.5 - 8 + 0.5) / sd.
        let result = mann_whitney_u(&[1.0, 2.0, 2.0, 3.0], &[2.0, 3.0, 4.0, 4.0]).expect("valid");
        assert_eq!(result.p_method, PValueMethod::NormalApprox);
        assert!((result.u_a - 2.5).abs() < f64::EPSILON);
        assert!((result.u_b - 13.5).abs() < f64::EPSILON);
        let (z, p) = (result.z, result.p_value);
        assert!((z + 1.4979).abs() < 1e-3, "z={z}");
        assert!((p - 0.1342).abs() < 1e-3, "p={p}");
    }

    #[test]
    fn identical_constants_are_degenerate() {
        assert!(matches!(
            mann_whitney_u(&[5.0; 10], &[5.0; 10]),
            Err(AnalysisError::DegenerateGroup { .. })
        ));
        assert!(mann_whitney_u(&[1.0], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn distinct_constants_are_fully_separated() {
        let result = mann_whitney_u(&[5.0; 10], &[3.0; 10]).expect("valid");
        assert!((result.u_a - 100.0).abs() < f64::EPSILON);
        assert!(result.p_value < 0.001);
    }
}
