use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};
use twogroup_cli::pipeline::{LoadedInputs, load_inputs};
use twogroup_core::run_analysis;
use twogroup_model::Group;
use twogroup_report::write_report;

use crate::cli::{AnalyzeArgs, CheckArgs};
use crate::types::{AnalyzeOutcome, CheckOutcome};

pub fn run_analyze(args: &AnalyzeArgs) -> Result<AnalyzeOutcome> {
    let start = Instant::now();
    let LoadedInputs { config, dataset } =
        load_inputs(&args.input.data, &args.input.config, &args.overrides())?;

    let results = {
        let span = info_span!("analyze", policy = %config.test_policy);
        let _guard = span.enter();
        run_analysis(&dataset, &config).context("run analysis")?
    };

    let output_dir = if args.dry_run {
        info!("dry run, skipping report");
        None
    } else {
        let span = info_span!("report");
        let _guard = span.enter();
        let dir = write_report(&results, &args.output_dir, &config.report)
            .with_context(|| format!("write report to {}", args.output_dir.display()))?;
        Some(dir)
    };

    let elapsed = start.elapsed();
    info!(
        failures = results.failure_count(),
        elapsed_ms = elapsed.as_millis(),
        "run finished"
    );
    Ok(AnalyzeOutcome {
        results,
        output_dir,
        elapsed,
    })
}

pub fn run_check(args: &CheckArgs) -> Result<CheckOutcome> {
    let overrides = args.input.overrides();
    let LoadedInputs { config, dataset } =
        load_inputs(&args.input.data, &args.input.config, &overrides)?;
    let labels = &dataset.labels;
    Ok(CheckOutcome {
        group_a: (labels.a.clone(), dataset.group_size(Group::A)),
        group_b: (labels.b.clone(), dataset.group_size(Group::B)),
        blocks: config
            .blocks
            .iter()
            .map(|block| (block.name.clone(), block.variables.len()))
            .collect(),
        baseline_variables: config.baseline.categorical.len() + config.baseline.continuous.len(),
    })
}
