//! Distribution tail functions backed by `statrs`.

use std::f64::consts::SQRT_2;

use statrs::distribution::{ChiSquared, ContinuousCDF, StudentsT};
use statrs::function::erf::{erfc, erfc_inv};

use twogroup_model::AnalysisError;

/// Upper tail of the standard normal distribution.
pub fn normal_sf(x: f64) -> f64 {
    0.5 * erfc(x / SQRT_2)
}

/// Inverse of the standard normal CDF for `p` in (0, 1).
pub fn normal_quantile(p: f64) -> f64 {
    -SQRT_2 * erfc_inv(2.0 * p)
}

/// Two-sided tail probability of a Student t statistic.
pub fn student_t_two_sided(t: f64, df: f64) -> Result<f64, AnalysisError> {
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| {
        AnalysisError::degenerate(format!("t distribution with df={df}: {e}"))
    })?;
    Ok((2.0 * dist.sf(t.abs())).min(1.0))
}

/// Upper tail of the chi-square distribution.
pub fn chi_squared_sf(x: f64, df: f64) -> Result<f64, AnalysisError> {
    let dist = ChiSquared::new(df).map_err(|e| {
        AnalysisError::insufficient(format!("chi-square distribution with df={df}: {e}"))
    })?;
    Ok(dist.sf(x).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_tails() {
        assert!((normal_sf(0.0) - 0.5).abs() < 1e-12);
        assert!((normal_sf(1.959_963_984_540_054) - 0.025).abs() < 1e-9);
        let z = normal_quantile(0.975);
        assert!((z - 1.959_963_984_540_054).abs() < 1e-9);
        assert!((normal_quantile(0.5)).abs() < 1e-12);
    }

    #[test]
    fn t_and_chi_square_tails() {
        // t = 2.228 is the 97.5% quantile of t(10).
        let p = student_t_two_sided(2.228_138_851_986_52, 10.0).expect("valid df");
        assert!((p - 0.05).abs() < 1e-6);
        assert!(student_t_two_sided(1.0, 0.0).is_err());

        // 3.841 is the 95% quantile of chi2(1).
        let p = chi_squared_sf(3.841_458_820_694_124, 1.0).expect("valid df");
        assert!((p - 0.05).abs() < 1e-6);
    }
}
