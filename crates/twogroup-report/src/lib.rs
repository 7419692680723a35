//! Result tables for an external reader: four CSV files plus a JSON dump.

pub mod frames;
pub mod writer;

pub use frames::{baseline_frame, descriptives_frame, normality_frame, tests_frame};
pub use writer::{
    BASELINE_FILE, DESCRIPTIVES_FILE, NORMALITY_FILE, RESULTS_FILE, TESTS_FILE, output_dir,
    write_report,
};
