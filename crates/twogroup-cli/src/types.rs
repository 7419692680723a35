use std::path::PathBuf;
use std::time::Duration;

use twogroup_model::AnalysisResults;

#[derive(Debug)]
pub struct AnalyzeOutcome {
    pub results: AnalysisResults,
    /// `None` on a dry run.
    pub output_dir: Option<PathBuf>,
    pub elapsed: Duration,
}

impl AnalyzeOutcome {
    pub fn has_variable_errors(&self) -> bool {
        self.results.failure_count() > 0
    }
}

#[derive(Debug)]
pub struct CheckOutcome {
    pub group_a: (String, usize),
    pub group_b: (String, usize),
    pub blocks: Vec<(String, usize)>,
    pub baseline_variables: usize,
}
