//! Per-block multiplicity correction.
//!
//! Each block is its own family. Only variables with a raw p-value take part;
//! failed rows keep `correction = None`.

use twogroup_model::{ComparisonRecord, CorrectedResult};
use twogroup_stats::{benjamini_hochberg, holm};

/// Holm and BH adjustments of one family, in input order.
pub fn correct_p_values(raw: &[f64], alpha: f64) -> Vec<CorrectedResult> {
    let holm_p = holm(raw);
    let bh_p = benjamini_hochberg(raw);
    raw.iter()
        .zip(holm_p)
        .zip(bh_p)
        .map(|((&raw_p, holm_p), bh_p)| CorrectedResult {
            raw_p,
            holm_p,
            bh_p,
            reject_holm: holm_p <= alpha,
            reject_bh: bh_p <= alpha,
        })
        .collect()
}

/// Fill `correction` on every successful record of one block.
pub fn correct_block(records: &mut [ComparisonRecord], alpha: f64) {
    let raw: Vec<f64> = records
        .iter()
        .filter_map(|record| record.outcome.as_ref().ok())
        .map(|test| test.p_value)
        .collect();
    let mut corrected = correct_p_values(&raw, alpha).into_iter();
    for record in records.iter_mut() {
        record.correction = match record.outcome {
            Ok(_) => corrected.next(),
            Err(_) => None,
        };
    }
}
