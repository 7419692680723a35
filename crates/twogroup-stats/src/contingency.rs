//! Group × category contingency tables and the chi-square test of independence.

use std::collections::BTreeSet;

use twogroup_model::AnalysisError;

use crate::distribution::chi_squared_sf;
use crate::effect_size::cramers_v;

/// Expected counts below this make the chi-square approximation unreliable.
pub const MIN_EXPECTED_COUNT: f64 = 5.0;

/// Observed counts; rows and columns hold only labels that occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContingencyTable {
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    pub counts: Vec<Vec<u64>>,
}

impl ContingencyTable {
    /// Cross-tabulate `(row, column)` pairs. Rows keep first-seen order,
    /// columns are sorted.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let pairs: Vec<(&'a str, &'a str)> = pairs.into_iter().collect();
        let mut row_labels: Vec<String> = Vec::new();
        for (row, _) in &pairs {
            if !row_labels.iter().any(|label| label == row) {
                row_labels.push((*row).to_string());
            }
        }
        let column_labels: Vec<String> = pairs
            .iter()
            .map(|(_, column)| *column)
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .map(str::to_string)
            .collect();
        let mut counts = vec![vec![0u64; column_labels.len()]; row_labels.len()];
        for (row, column) in &pairs {
            let row_idx = row_labels.iter().position(|label| label == row);
            let col_idx = column_labels.iter().position(|label| label == column);
            if let (Some(r), Some(c)) = (row_idx, col_idx) {
                counts[r][c] += 1;
            }
        }
        Self {
            row_labels,
            column_labels,
            counts,
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    fn row_totals(&self) -> Vec<u64> {
        self.counts.iter().map(|row| row.iter().sum()).collect()
    }

    fn column_totals(&self) -> Vec<u64> {
        (0..self.column_labels.len())
            .map(|col| self.counts.iter().map(|row| row[col]).sum())
            .collect()
    }

    /// Expected counts under independence.
    pub fn expected(&self) -> Vec<Vec<f64>> {
        let n = self.total() as f64;
        let column_totals = self.column_totals();
        self.row_totals()
            .iter()
            .map(|&row_total| {
                column_totals
                    .iter()
                    .map(|&col_total| row_total as f64 * col_total as f64 / n)
                    .collect()
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquareTest {
    pub statistic: f64,
    pub df: f64,
    pub p_value: f64,
    pub n: usize,
    pub cramers_v: Option<f64>,
    pub min_expected: f64,
}

impl ChiSquareTest {
    pub fn is_sparse(&self) -> bool {
        self.min_expected < MIN_EXPECTED_COUNT
    }
}

/// Pearson chi-square test of independence.
///
/// Yates' continuity correction is applied when the table has one degree of
/// freedom. Cramér's V is computed from the reported statistic.
pub fn chi_square_independence(table: &ContingencyTable) -> Result<ChiSquareTest, AnalysisError> {
    let rows = table.row_labels.len();
    let cols = table.column_labels.len();
    if rows < 2 {
        return Err(AnalysisError::insufficient(format!(
            "contingency table needs both groups, found {rows}"
        )));
    }
    if cols < 2 {
        return Err(AnalysisError::insufficient(format!(
            "contingency table needs at least two categories, found {cols}"
        )));
    }
    let expected = table.expected();
    let df = ((rows - 1) * (cols - 1)) as f64;
    let yates = rows == 2 && cols == 2;
    let mut statistic = 0.0;
    let mut min_expected = f64::INFINITY;
    for (observed_row, expected_row) in table.counts.iter().zip(&expected) {
        for (&observed, &expected) in observed_row.iter().zip(expected_row) {
            min_expected = min_expected.min(expected);
            let mut diff = observed as f64 - expected;
            if yates {
                diff = diff.signum() * (diff.abs() - 0.5).max(0.0);
            }
            statistic += diff * diff / expected;
        }
    }
    let n = usize::try_from(table.total()).unwrap_or(usize::MAX);
    Ok(ChiSquareTest {
        statistic,
        df,
        p_value: chi_squared_sf(statistic, df)?,
        n,
        cramers_v: cramers_v(statistic, n, rows, cols),
        min_expected,
    })
}
