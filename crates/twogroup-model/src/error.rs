use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-variable failure recorded in a result row.
///
/// None of these abort a run: the row carries the error in place of statistics
/// and the remaining variables are still processed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisError {
    #[error("insufficient data: {reason}")]
    InsufficientData { reason: String },
    #[error("degenerate group: {reason}")]
    DegenerateGroup { reason: String },
    #[error("sparse contingency table: {reason}")]
    SparseContingencyTable { reason: String },
}

impl AnalysisError {
    pub fn insufficient(reason: impl Into<String>) -> Self {
        Self::InsufficientData {
            reason: reason.into(),
        }
    }

    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateGroup {
            reason: reason.into(),
        }
    }

    pub fn sparse(reason: impl Into<String>) -> Self {
        Self::SparseContingencyTable {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> AnalysisErrorKind {
        match self {
            Self::InsufficientData { .. } => AnalysisErrorKind::InsufficientData,
            Self::DegenerateGroup { .. } => AnalysisErrorKind::DegenerateGroup,
            Self::SparseContingencyTable { .. } => AnalysisErrorKind::SparseContingencyTable,
        }
    }
}

/// Discriminant of [`AnalysisError`], used as the `error` column of reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisErrorKind {
    InsufficientData,
    DegenerateGroup,
    SparseContingencyTable,
}

impl AnalysisErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InsufficientData => "InsufficientDataError",
            Self::DegenerateGroup => "DegenerateGroupError",
            Self::SparseContingencyTable => "SparseContingencyTableError",
        }
    }
}

impl fmt::Display for AnalysisErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal misconfiguration, detected before any analysis starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("columns not found in dataset: {}", names.join(", "))]
    MissingColumns { names: Vec<String> },

    #[error("{name} must lie strictly between 0 and 1 (got {value})")]
    InvalidAlpha { name: &'static str, value: f64 },

    #[error("group labels must differ (both are {label:?})")]
    IdenticalGroupLabels { label: String },

    #[error("group label {label:?} does not occur in column {column:?}")]
    MissingGroupLabel { column: String, label: String },

    #[error("duplicate block name: {name}")]
    DuplicateBlock { name: String },

    #[error("block {name} declares no variables")]
    EmptyBlock { name: String },

    #[error("no variable blocks configured")]
    NoBlocks,
}
