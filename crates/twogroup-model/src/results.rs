//! Read-only outputs of one analysis run.

use serde::{Deserialize, Serialize};

use crate::dataset::{Group, GroupLabels};
use crate::error::AnalysisError;

/// Per-group summary statistics of one variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub n: usize,
    pub mean: f64,
    /// Sample standard deviation (n − 1 denominator); undefined when n = 1.
    pub std: Option<f64>,
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
    pub min: f64,
    pub max: f64,
}

/// Outcome of a normality assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalityStatus {
    Normal,
    NonNormal,
    /// The test is not defined for this sample (n < 3 or zero variance).
    Undetermined,
}

impl NormalityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::NonNormal => "non_normal",
            Self::Undetermined => "undetermined",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalityResult {
    pub statistic: Option<f64>,
    pub p_value: Option<f64>,
    pub status: NormalityStatus,
    /// Why the result is undetermined.
    pub note: Option<String>,
}

impl NormalityResult {
    pub fn undetermined(note: impl Into<String>) -> Self {
        Self {
            statistic: None,
            p_value: None,
            status: NormalityStatus::Undetermined,
            note: Some(note.into()),
        }
    }

    /// Only a determined, passing test counts as normal.
    pub fn is_normal(&self) -> bool {
        self.status == NormalityStatus::Normal
    }

    pub fn is_undetermined(&self) -> bool {
        self.status == NormalityStatus::Undetermined
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestMethod {
    WelchT,
    MannWhitney,
}

impl TestMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WelchT => "WELCH_T",
            Self::MannWhitney => "MANN_WHITNEY",
        }
    }
}

/// How a p-value was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PValueMethod {
    /// Student t distribution with Welch–Satterthwaite degrees of freedom.
    StudentT,
    /// Exact permutation distribution of U.
    Exact,
    /// Normal approximation with tie and continuity corrections.
    NormalApprox,
}

impl PValueMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StudentT => "student_t",
            Self::Exact => "exact",
            Self::NormalApprox => "normal_approx",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectSizeKind {
    CohensD,
    RankBiserialR,
    CramersV,
}

impl EffectSizeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CohensD => "COHENS_D",
            Self::RankBiserialR => "RANK_BISERIAL_R",
            Self::CramersV => "CRAMERS_V",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectSize {
    pub kind: EffectSizeKind,
    pub value: f64,
}

/// Result of one two-group hypothesis test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub method: TestMethod,
    /// t for Welch, U of group A for Mann–Whitney.
    pub statistic: f64,
    /// Two-sided, uncorrected.
    pub p_value: f64,
    pub p_method: PValueMethod,
    /// Welch–Satterthwaite degrees of freedom.
    pub df: Option<f64>,
    /// Standardized U (Mann–Whitney only).
    pub z: Option<f64>,
    pub effect_size: EffectSize,
    pub n_a: usize,
    pub n_b: usize,
}

/// Multiplicity-adjusted p-values of one variable within its block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectedResult {
    pub raw_p: f64,
    pub holm_p: f64,
    pub bh_p: f64,
    /// Holm decision: adjusted p ≤ alpha.
    pub reject_holm: bool,
    /// Benjamini–Hochberg decision: adjusted p ≤ alpha.
    pub reject_bh: bool,
}

/// Report flags using a strict `p < alpha` comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignificanceFlags {
    pub raw: bool,
    pub holm: bool,
    pub bh: bool,
}

impl CorrectedResult {
    pub fn flags(&self, alpha: f64) -> SignificanceFlags {
        SignificanceFlags {
            raw: self.raw_p < alpha,
            holm: self.holm_p < alpha,
            bh: self.bh_p < alpha,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BaselineTestKind {
    ChiSquare,
    WelchT,
}

impl BaselineTestKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ChiSquare => "CHI_SQUARE",
            Self::WelchT => "WELCH_T",
        }
    }

    pub fn statistic_name(self) -> &'static str {
        match self {
            Self::ChiSquare => "chi2",
            Self::WelchT => "t",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineStats {
    pub statistic: f64,
    pub df: f64,
    pub p_value: f64,
    pub effect_size: Option<EffectSize>,
    /// Total n of the contingency table (chi-square).
    pub n_total: Option<usize>,
    pub n_a: Option<usize>,
    pub n_b: Option<usize>,
    /// Smallest expected cell count (chi-square).
    pub min_expected: Option<f64>,
    /// The chi-square approximation may be unreliable.
    pub unreliable: bool,
    /// p ≥ alpha. Descriptive only; never filters data.
    pub balanced: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineRecord {
    pub variable: String,
    pub kind: BaselineTestKind,
    pub outcome: Result<BaselineStats, AnalysisError>,
    /// Non-fatal condition attached to an otherwise computed result.
    pub issue: Option<AnalysisError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveRecord {
    pub block: String,
    pub variable: String,
    pub group: Group,
    pub outcome: Result<DescriptiveStats, AnalysisError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalityRecord {
    pub block: String,
    pub variable: String,
    pub group: Group,
    pub result: NormalityResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    pub block: String,
    pub variable: String,
    pub outcome: Result<TestResult, AnalysisError>,
    /// Present exactly when `outcome` is `Ok`.
    pub correction: Option<CorrectedResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockResult {
    pub name: String,
    pub descriptives: Vec<DescriptiveRecord>,
    pub normality: Vec<NormalityRecord>,
    pub comparisons: Vec<ComparisonRecord>,
}

/// Everything one run produces, handed to the external reporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResults {
    pub labels: GroupLabels,
    pub significance_alpha: f64,
    pub baseline: Vec<BaselineRecord>,
    pub blocks: Vec<BlockResult>,
}

impl AnalysisResults {
    pub fn comparisons(&self) -> impl Iterator<Item = &ComparisonRecord> {
        self.blocks
            .iter()
            .flat_map(|block| block.comparisons.iter())
    }

    /// Number of rows across all tables that carry an error instead of statistics.
    pub fn failure_count(&self) -> usize {
        let baseline = self
            .baseline
            .iter()
            .filter(|record| record.outcome.is_err())
            .count();
        let blocks: usize = self
            .blocks
            .iter()
            .map(|block| {
                block
                    .descriptives
                    .iter()
                    .filter(|record| record.outcome.is_err())
                    .count()
                    + block
                        .comparisons
                        .iter()
                        .filter(|record| record.outcome.is_err())
                        .count()
            })
            .sum();
        baseline + blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undetermined_normality_is_not_normal() {
        let result = NormalityResult::undetermined("n < 3");
        assert!(!result.is_normal());
        assert!(result.is_undetermined());
    }

    #[test]
    fn flags_use_strict_comparison() {
        let corrected = CorrectedResult {
            raw_p: 0.01,
            holm_p: 0.05,
            bh_p: 0.04,
            reject_holm: true,
            reject_bh: true,
        };
        let flags = corrected.flags(0.05);
        assert!(flags.raw);
        assert!(!flags.holm);
        assert!(flags.bh);
    }

    #[test]
    fn enum_names_match_report_vocabulary() {
        assert_eq!(
            serde_json::to_value(TestMethod::MannWhitney).expect("serialize"),
            "MANN_WHITNEY"
        );
        assert_eq!(
            serde_json::to_value(EffectSizeKind::RankBiserialR).expect("serialize"),
            "RANK_BISERIAL_R"
        );
        assert_eq!(BaselineTestKind::ChiSquare.statistic_name(), "chi2");
    }
}
