//! CLI argument definitions for the two-group analysis tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use twogroup_model::TestPolicy;

use twogroup_cli::overrides::ConfigOverrides;

#[derive(Parser)]
#[command(
    name = "twogroup",
    version,
    about = "Two-group comparative analysis with automatic test selection",
    long_about = "Compare two independent groups across blocks of outcome variables.\n\n\
                  Each variable gets descriptives, a Shapiro-Wilk normality check, a Welch t\n\
                  or Mann-Whitney U test with effect size, and Holm / Benjamini-Hochberg\n\
                  correction within its block. Baseline variables are checked for balance."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow row-level values (subject identifiers) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full analysis and write the result tables.
    Analyze(AnalyzeArgs),

    /// Validate the configuration against the data file without analysing.
    Check(CheckArgs),
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Directory for the result tables.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "results")]
    pub output_dir: PathBuf,

    /// Run the analysis and print the summary without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Do not insert an empty row between blocks.
    #[arg(long = "no-blank-rows")]
    pub no_blank_rows: bool,

    /// Append a `_YYYYmmdd_HHMMSS` suffix to the output directory.
    #[arg(long = "timestamp")]
    pub timestamp: bool,

    /// Exit with status 1 when any variable could not be analysed.
    ///
    /// Per-variable failures are reported as rows in the result tables and
    /// do not fail the run unless this flag is set.
    #[arg(long = "fail-on-variable-errors")]
    pub fail_on_variable_errors: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Data file, configuration file and the overrides shared by every command.
#[derive(Args)]
pub struct InputArgs {
    /// CSV file with one row per subject.
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// TOML analysis configuration.
    #[arg(long = "config", short = 'c', value_name = "PATH")]
    pub config: PathBuf,

    /// Column holding the group label.
    #[arg(long = "group-col", value_name = "NAME")]
    pub group_col: Option<String>,

    /// Label of group A.
    #[arg(long = "label-a", value_name = "LABEL")]
    pub label_a: Option<String>,

    /// Label of group B.
    #[arg(long = "label-b", value_name = "LABEL")]
    pub label_b: Option<String>,

    /// Test selection policy.
    #[arg(long = "test-policy", value_enum)]
    pub test_policy: Option<TestPolicyArg>,

    /// Shapiro-Wilk threshold below which a group counts as non-normal.
    #[arg(long = "normality-alpha", value_name = "ALPHA")]
    pub normality_alpha: Option<f64>,

    /// Significance threshold for raw and adjusted p-values.
    #[arg(long = "significance-alpha", value_name = "ALPHA")]
    pub significance_alpha: Option<f64>,
}

impl InputArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            group_column: self.group_col.clone(),
            label_a: self.label_a.clone(),
            label_b: self.label_b.clone(),
            test_policy: self.test_policy.map(TestPolicy::from),
            normality_alpha: self.normality_alpha,
            significance_alpha: self.significance_alpha,
            ..ConfigOverrides::default()
        }
    }
}

impl AnalyzeArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            no_blank_rows: self.no_blank_rows,
            timestamp: self.timestamp,
            ..self.input.overrides()
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TestPolicyArg {
    Auto,
    Ttest,
    Mannwhitney,
}

impl From<TestPolicyArg> for TestPolicy {
    fn from(value: TestPolicyArg) -> Self {
        match value {
            TestPolicyArg::Auto => Self::Auto,
            TestPolicyArg::Ttest => Self::ForceWelch,
            TestPolicyArg::Mannwhitney => Self::ForceMannWhitney,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
