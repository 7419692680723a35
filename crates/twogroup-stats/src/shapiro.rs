//! Shapiro–Wilk W test (Royston's 1995 approximation, algorithm AS R94).
//!
//! Valid for 3 ≤ n ≤ 5000. Coefficients for the lower half of the order
//! statistics are computed from normal scores with Royston's polynomial
//! corrections; the p-value comes from a normalizing transformation of W.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use twogroup_model::AnalysisError;

use crate::descriptive::{mean, sorted};
use crate::distribution::{normal_quantile, normal_sf};

const C1: [f64; 6] = [
    0.0, 0.221_157, -0.147_981, -2.071_190, 4.434_685, -2.706_056,
];
const C2: [f64; 6] = [
    0.0, 0.042_981, -0.293_762, -1.752_461, 5.682_633, -3.582_633,
];
const C3: [f64; 4] = [0.5440, -0.399_78, 0.025_054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.778_57, 0.062_767, -0.002_032_2];
const C5: [f64; 4] = [-1.5861, -0.310_82, -0.083_751, 0.003_891_5];
const C6: [f64; 3] = [-0.4803, -0.082_676, 0.003_030_2];
const G: [f64; 2] = [-2.273, 0.459];

/// Ranges below this are treated as zero.
const SMALL: f64 = 1e-19;

/// Minimum sample size for the test.
pub const MIN_SAMPLE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapiroWilk {
    pub w: f64,
    pub p_value: f64,
}

/// `cc[0] + cc[1]·x + cc[2]·x² + …`
fn poly(cc: &[f64], x: f64) -> f64 {
    cc.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Weights for the lower half of the order statistics (positive values).
fn coefficients(n: usize) -> Vec<f64> {
    let half = n / 2;
    let mut a = vec![0.0; half];
    if n == 3 {
        a[0] = FRAC_1_SQRT_2;
        return a;
    }
    let an = n as f64;
    let m: Vec<f64> = (1..=half)
        .map(|i| normal_quantile((i as f64 - 0.375) / (an + 0.25)))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / an.sqrt();
    let a1 = poly(&C1, rsn) - m[0] / ssumm2;

    let (start, fac) = if n > 5 {
        let a2 = -m[1] / ssumm2 + poly(&C2, rsn);
        let num = summ2 - 2.0 * m[0].powi(2) - 2.0 * m[1].powi(2);
        let den = 1.0 - 2.0 * a1.powi(2) - 2.0 * a2.powi(2);
        let fac = (num / den).sqrt();
        a[1] = a2;
        (2, fac)
    } else {
        let fac = ((summ2 - 2.0 * m[0].powi(2)) / (1.0 - 2.0 * a1.powi(2))).sqrt();
        (1, fac)
    };
    a[0] = a1;
    for i in start..half {
        a[i] = -m[i] / fac;
    }
    a
}

fn p_value(w: f64, n: usize) -> f64 {
    if n == 3 {
        // Exact distribution for n = 3.
        let pw = (6.0 / PI) * (w.sqrt().asin() - (0.75f64).sqrt().asin());
        return pw.clamp(0.0, 1.0);
    }
    let an = n as f64;
    let mut y = (1.0 - w).ln();
    let (m, s) = if n <= 11 {
        let gamma = poly(&G, an);
        if y >= gamma {
            return 1e-99;
        }
        y = -(gamma - y).ln();
        (poly(&C3, an), poly(&C4, an).exp())
    } else {
        let xx = an.ln();
        (poly(&C5, xx), poly(&C6, xx).exp())
    };
    normal_sf((y - m) / s).clamp(0.0, 1.0)
}

/// Shapiro–Wilk test of normality.
///
/// Fails with `InsufficientData` below three values and `DegenerateGroup`
/// when all values are identical.
pub fn shapiro_wilk(values: &[f64]) -> Result<ShapiroWilk, AnalysisError> {
    let n = values.len();
    if n < MIN_SAMPLE {
        return Err(AnalysisError::insufficient(format!(
            "Shapiro-Wilk needs at least {MIN_SAMPLE} values, got {n}"
        )));
    }
    let x = sorted(values);
    let range = x[n - 1] - x[0];
    if range < SMALL {
        return Err(AnalysisError::degenerate("all values are identical"));
    }
    let a = coefficients(n);
    let numerator: f64 = a
        .iter()
        .enumerate()
        .map(|(i, ai)| ai * (x[n - 1 - i] - x[i]))
        .sum();
    let m = mean(&x);
    let ssq: f64 = x.iter().map(|v| (v - m).powi(2)).sum();
    let w = (numerator * numerator / ssq).min(1.0);
    Ok(ShapiroWilk {
        w,
        p_value: p_value(w, n),
    })
}
