//! Analysis configuration.
//!
//! The configuration is an explicit, validated value passed by reference into
//! every pipeline stage. There is no process-wide configuration state.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dataset::GroupLabels;
use crate::error::ConfigError;

pub const DEFAULT_ALPHA: f64 = 0.05;

/// How the two-group test is chosen for each variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestPolicy {
    /// Welch t-test when both groups look normal, Mann–Whitney U otherwise.
    #[default]
    Auto,
    /// Always run the Welch t-test.
    #[serde(alias = "ttest", alias = "welch")]
    ForceWelch,
    /// Always run the Mann–Whitney U test.
    #[serde(alias = "mannwhitney", alias = "mann_whitney")]
    ForceMannWhitney,
}

impl fmt::Display for TestPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::ForceWelch => f.write_str("ttest"),
            Self::ForceMannWhitney => f.write_str("mannwhitney"),
        }
    }
}

/// Group column and the two label values compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    pub column: String,
    pub label_a: String,
    pub label_b: String,
    /// Optional subject identifier column carried into observations.
    #[serde(default)]
    pub subject_column: Option<String>,
}

impl GroupConfig {
    pub fn labels(&self) -> GroupLabels {
        GroupLabels::new(self.label_a.trim(), self.label_b.trim())
    }
}

/// Pre-treatment variables checked for group equivalence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineConfig {
    #[serde(default)]
    pub categorical: Vec<String>,
    #[serde(default)]
    pub continuous: Vec<String>,
}

/// A named family of variables corrected together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockConfig {
    pub name: String,
    pub variables: Vec<String>,
}

/// Output shaping for the external reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Insert an empty row between blocks in per-block tables.
    #[serde(default = "default_true")]
    pub blank_rows_between_blocks: bool,
    /// Append a `_YYYYmmdd_HHMMSS` suffix to the output directory.
    #[serde(default)]
    pub timestamp_output: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            blank_rows_between_blocks: true,
            timestamp_output: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}

/// Complete configuration of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub group: GroupConfig,
    #[serde(default = "default_alpha")]
    pub normality_alpha: f64,
    #[serde(default = "default_alpha")]
    pub significance_alpha: f64,
    #[serde(default)]
    pub test_policy: TestPolicy,
    #[serde(default)]
    pub baseline: BaselineConfig,
    #[serde(default)]
    pub blocks: Vec<BlockConfig>,
    #[serde(default)]
    pub report: ReportOptions,
}

impl AnalysisConfig {
    pub fn new(group: GroupConfig) -> Self {
        Self {
            group,
            normality_alpha: DEFAULT_ALPHA,
            significance_alpha: DEFAULT_ALPHA,
            test_policy: TestPolicy::default(),
            baseline: BaselineConfig::default(),
            blocks: Vec::new(),
            report: ReportOptions::default(),
        }
    }

    #[must_use]
    pub fn with_block(mut self, name: &str, variables: &[&str]) -> Self {
        self.blocks.push(BlockConfig {
            name: name.to_string(),
            variables: variables.iter().map(|v| (*v).to_string()).collect(),
        });
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: TestPolicy) -> Self {
        self.test_policy = policy;
        self
    }

    #[must_use]
    pub fn with_baseline(mut self, categorical: &[&str], continuous: &[&str]) -> Self {
        self.baseline = BaselineConfig {
            categorical: categorical.iter().map(|v| (*v).to_string()).collect(),
            continuous: continuous.iter().map(|v| (*v).to_string()).collect(),
        };
        self
    }

    /// Every column the run will read, in first-reference order.
    pub fn referenced_columns(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        let mut columns = Vec::new();
        let subject = self.group.subject_column.as_deref();
        let group_columns = std::iter::once(self.group.column.as_str()).chain(subject);
        let baseline = self
            .baseline
            .categorical
            .iter()
            .chain(&self.baseline.continuous)
            .map(String::as_str);
        let blocks = self
            .blocks
            .iter()
            .flat_map(|block| block.variables.iter().map(String::as_str));
        for name in group_columns.chain(baseline).chain(blocks) {
            if seen.insert(name) {
                columns.push(name);
            }
        }
        columns
    }

    /// Check internal consistency; dataset-dependent checks live in the pipeline.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_alpha("normality_alpha", self.normality_alpha)?;
        check_alpha("significance_alpha", self.significance_alpha)?;
        let labels = self.group.labels();
        if labels.a == labels.b {
            return Err(ConfigError::IdenticalGroupLabels { label: labels.a });
        }
        if self.blocks.is_empty() {
            return Err(ConfigError::NoBlocks);
        }
        let mut names = BTreeSet::new();
        for block in &self.blocks {
            if !names.insert(block.name.as_str()) {
                return Err(ConfigError::DuplicateBlock {
                    name: block.name.clone(),
                });
            }
            if block.variables.is_empty() {
                return Err(ConfigError::EmptyBlock {
                    name: block.name.clone(),
                });
            }
        }
        Ok(())
    }
}

fn check_alpha(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidAlpha { name, value })
    }
}
