//! Command-line overrides layered on top of the configuration file.

use twogroup_model::{AnalysisConfig, TestPolicy};

/// Values given on the command line; `None` keeps the file value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub group_column: Option<String>,
    pub label_a: Option<String>,
    pub label_b: Option<String>,
    pub test_policy: Option<TestPolicy>,
    pub normality_alpha: Option<f64>,
    pub significance_alpha: Option<f64>,
    pub no_blank_rows: bool,
    pub timestamp: bool,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut AnalysisConfig) {
        if let Some(column) = &self.group_column {
            config.group.column.clone_from(column);
        }
        if let Some(label) = &self.label_a {
            config.group.label_a.clone_from(label);
        }
        if let Some(label) = &self.label_b {
            config.group.label_b.clone_from(label);
        }
        if let Some(policy) = self.test_policy {
            config.test_policy = policy;
        }
        if let Some(alpha) = self.normality_alpha {
            config.normality_alpha = alpha;
        }
        if let Some(alpha) = self.significance_alpha {
            config.significance_alpha = alpha;
        }
        if self.no_blank_rows {
            config.report.blank_rows_between_blocks = false;
        }
        if self.timestamp {
            config.report.timestamp_output = true;
        }
    }
}
