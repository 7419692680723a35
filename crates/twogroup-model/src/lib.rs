pub mod config;
pub mod dataset;
pub mod error;
pub mod results;

pub use config::{
    AnalysisConfig, BaselineConfig, BlockConfig, DEFAULT_ALPHA, GroupConfig, ReportOptions,
    TestPolicy,
};
pub use dataset::{CellValue, Dataset, Group, GroupLabels, NumericColumn, Observation};
pub use error::{AnalysisError, AnalysisErrorKind, ConfigError};
pub use results::{
    AnalysisResults, BaselineRecord, BaselineStats, BaselineTestKind, BlockResult,
    ComparisonRecord, CorrectedResult, DescriptiveRecord, DescriptiveStats, EffectSize,
    EffectSizeKind, NormalityRecord, NormalityResult, NormalityStatus, PValueMethod,
    SignificanceFlags, TestMethod, TestResult,
};
