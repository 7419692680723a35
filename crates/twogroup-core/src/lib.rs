//! Statistical decision pipeline for independent two-group designs.
//!
//! The configuration is passed by reference into every entry point; nothing
//! here holds state between calls.

pub mod baseline;
pub mod correction;
pub mod dispatch;
pub mod normality;
pub mod pipeline;
pub mod schema;
pub mod selection;

pub use baseline::{check_baseline, check_categorical, check_continuous};
pub use correction::{correct_block, correct_p_values};
pub use dispatch::{dispatch, run_test};
pub use normality::evaluate_normality;
pub use pipeline::{analyze_block, run_analysis};
pub use schema::{missing_columns, validate_against_schema, validate_columns};
pub use selection::select_method;
