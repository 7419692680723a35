//! Family-wise multiplicity corrections.
//!
//! Both procedures sort the raw p-values ascending with a stable sort, so
//! equal p-values keep their declaration order and results are reproducible.

/// Indices of `p_values` in ascending order; ties keep input order.
fn ascending_order(p_values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..p_values.len()).collect();
    order.sort_by(|&l, &r| p_values[l].total_cmp(&p_values[r]));
    order
}

/// Holm–Bonferroni step-down adjusted p-values, in input order.
///
/// The i-th smallest p-value (1-based) is scaled by `m − i + 1`, clipped to 1,
/// and made non-decreasing along the sorted order.
pub fn holm(p_values: &[f64]) -> Vec<f64> {
    let m = p_values.len();
    let mut adjusted = vec![0.0; m];
    let mut running_max = 0.0f64;
    for (rank, &idx) in ascending_order(p_values).iter().enumerate() {
        let scaled = ((m - rank) as f64 * p_values[idx]).min(1.0);
        running_max = running_max.max(scaled);
        adjusted[idx] = running_max;
    }
    adjusted
}

/// Benjamini–Hochberg step-up adjusted p-values, in input order.
///
/// The i-th smallest p-value (1-based) becomes `p·m / i`, then the running
/// minimum is taken from the largest rank downward and clipped to 1.
pub fn benjamini_hochberg(p_values: &[f64]) -> Vec<f64> {
    let m = p_values.len();
    let mut adjusted = vec![0.0; m];
    let mut running_min = 1.0f64;
    let order = ascending_order(p_values);
    for (rank, &idx) in order.iter().enumerate().rev() {
        let critical = p_values[idx] * m as f64 / (rank + 1) as f64;
        running_min = running_min.min(critical);
        adjusted[idx] = running_min;
    }
    adjusted
}
