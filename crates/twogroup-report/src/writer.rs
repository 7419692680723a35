use std::ffi::OsString;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::info;
use twogroup_model::{AnalysisResults, ReportOptions};

use crate::frames::{baseline_frame, descriptives_frame, normality_frame, tests_frame};

pub const BASELINE_FILE: &str = "baseline.csv";
pub const DESCRIPTIVES_FILE: &str = "descriptives.csv";
pub const NORMALITY_FILE: &str = "normality.csv";
pub const TESTS_FILE: &str = "tests.csv";
pub const RESULTS_FILE: &str = "results.json";

/// Output directory for a run; `base_YYYYmmdd_HHMMSS` when timestamping.
pub fn output_dir(base: &Path, options: &ReportOptions, now: NaiveDateTime) -> PathBuf {
    if !options.timestamp_output {
        return base.to_path_buf();
    }
    let mut name = OsString::from(base.as_os_str());
    name.push(now.format("_%Y%m%d_%H%M%S").to_string());
    PathBuf::from(name)
}

/// Write the four result tables and the JSON dump; returns the directory used.
pub fn write_report(
    results: &AnalysisResults,
    base: &Path,
    options: &ReportOptions,
) -> Result<PathBuf> {
    let dir = output_dir(base, options, Local::now().naive_local());
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    let blank = options.blank_rows_between_blocks;

    let mut baseline = baseline_frame(results).context("build baseline table")?;
    write_csv(&mut baseline, &dir.join(BASELINE_FILE))?;
    let mut descriptives = descriptives_frame(results, blank).context("build descriptives table")?;
    write_csv(&mut descriptives, &dir.join(DESCRIPTIVES_FILE))?;
    let mut normality = normality_frame(results, blank).context("build normality table")?;
    write_csv(&mut normality, &dir.join(NORMALITY_FILE))?;
    let mut tests = tests_frame(results, blank).context("build tests table")?;
    write_csv(&mut tests, &dir.join(TESTS_FILE))?;

    let json_path = dir.join(RESULTS_FILE);
    let file = File::create(&json_path).with_context(|| format!("create {}", json_path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), results)
        .with_context(|| format!("write {}", json_path.display()))?;

    info!(dir = %dir.display(), "report written");
    Ok(dir)
}

fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvWriter::new(BufWriter::new(file))
        .include_header(true)
        .finish(df)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
