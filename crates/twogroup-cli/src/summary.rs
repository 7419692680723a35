use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use twogroup_model::{
    AnalysisError, AnalysisResults, BaselineRecord, ComparisonRecord, EffectSizeKind, TestResult,
};

use crate::types::{AnalyzeOutcome, CheckOutcome};

pub fn print_analysis_summary(outcome: &AnalyzeOutcome) {
    let results = &outcome.results;
    println!(
        "Groups: {} (A) vs {} (B)",
        results.labels.a, results.labels.b
    );
    match &outcome.output_dir {
        Some(dir) => println!("Output: {}", dir.display()),
        None => println!("Output: (dry run, nothing written)"),
    }
    print_baseline_table(results);
    print_tests_table(results);
    print_failures(results);
    println!("Finished in {:.2}s", outcome.elapsed.as_secs_f64());
}

pub fn print_check_summary(outcome: &CheckOutcome) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Item"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (label, size) in [&outcome.group_a, &outcome.group_b] {
        table.add_row(vec![Cell::new(format!("group {label}")), Cell::new(size)]);
    }
    table.add_row(vec![
        Cell::new("baseline variables"),
        Cell::new(outcome.baseline_variables),
    ]);
    for (name, variables) in &outcome.blocks {
        let label = format!("block {name}");
        table.add_row(vec![Cell::new(label), Cell::new(variables)]);
    }
    println!("{table}");
    println!("Configuration matches the data file.");
}

fn print_baseline_table(results: &AnalysisResults) {
    if results.baseline.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Baseline"),
        header_cell("Test"),
        header_cell("Statistic"),
        header_cell("p"),
        header_cell("Balanced"),
        header_cell("Note"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for record in &results.baseline {
        table.add_row(baseline_row(record));
    }
    println!("{table}");
}

fn baseline_row(record: &BaselineRecord) -> Vec<Cell> {
    let name = Cell::new(&record.variable);
    let kind = Cell::new(record.kind.as_str());
    match &record.outcome {
        Ok(stats) => vec![
            name,
            kind,
            Cell::new(format!(
                "{}={:.3}",
                record.kind.statistic_name(),
                stats.statistic
            )),
            Cell::new(format_p(stats.p_value)),
            flag_cell(stats.balanced, Color::Green),
            record
                .issue
                .as_ref()
                .map_or_else(|| dim_cell("-"), warn_cell),
        ],
        Err(error) => vec![
            name,
            kind,
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            warn_cell(error),
        ],
    }
}

fn print_tests_table(results: &AnalysisResults) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Block"),
        header_cell("Variable"),
        header_cell("Test"),
        header_cell("Effect"),
        header_cell("p"),
        header_cell("p Holm"),
        header_cell("p BH"),
        header_cell("Raw"),
        header_cell("Holm"),
        header_cell("BH"),
    ]);
    apply_table_style(&mut table);
    for index in 3..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for index in 7..=9 {
        align_column(&mut table, index, CellAlignment::Center);
    }
    for record in results.comparisons() {
        table.add_row(comparison_row(record, results.significance_alpha));
    }
    println!("{table}");
}

fn comparison_row(record: &ComparisonRecord, alpha: f64) -> Vec<Cell> {
    let mut row = vec![Cell::new(&record.block), Cell::new(&record.variable)];
    match (&record.outcome, record.correction) {
        (Ok(test), Some(correction)) => {
            let flags = correction.flags(alpha);
            row.extend([
                Cell::new(test.method.as_str()),
                Cell::new(effect_label(test)),
                Cell::new(format_p(test.p_value)),
                Cell::new(format_p(correction.holm_p)),
                Cell::new(format_p(correction.bh_p)),
                flag_cell(flags.raw, Color::Green),
                flag_cell(flags.holm, Color::Green),
                flag_cell(flags.bh, Color::Green),
            ]);
        }
        _ => {
            row.push(Cell::new("failed").fg(Color::Red));
            row.extend((0..7).map(|_| dim_cell("-")));
        }
    }
    row
}

fn print_failures(results: &AnalysisResults) {
    let lines = failure_lines(results);
    if lines.is_empty() {
        return;
    }
    eprintln!("Rows without statistics:");
    for line in lines {
        eprintln!("- {line}");
    }
}

/// One line per baseline, descriptive or comparison row that carries an error.
fn failure_lines(results: &AnalysisResults) -> Vec<String> {
    let mut lines = Vec::new();
    let mut push = |scope: String, error: &AnalysisError| {
        lines.push(format!("{scope}: {} ({error})", error.kind()));
    };
    for record in &results.baseline {
        if let Err(error) = &record.outcome {
            push(format!("baseline/{}", record.variable), error);
        }
    }
    for block in &results.blocks {
        for record in &block.descriptives {
            if let Err(error) = &record.outcome {
                let group = results.labels.label(record.group);
                let scope = format!("{}/{} [{group}]", record.block, record.variable);
                push(scope, error);
            }
        }
        for record in &block.comparisons {
            if let Err(error) = &record.outcome {
                push(format!("{}/{}", record.block, record.variable), error);
            }
        }
    }
    lines
}

fn effect_label(test: &TestResult) -> String {
    let symbol = match test.effect_size.kind {
        EffectSizeKind::CohensD => "d",
        EffectSizeKind::RankBiserialR => "r",
        EffectSizeKind::CramersV => "V",
    };
    format!("{symbol}={:+.3}", test.effect_size.value)
}

fn format_p(p: f64) -> String {
    if p < 0.001 {
        "<0.001".to_string()
    } else {
        format!("{p:.3}")
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn flag_cell(value: bool, color: Color) -> Cell {
    if value {
        Cell::new("yes").fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell("no")
    }
}

fn warn_cell(error: &AnalysisError) -> Cell {
    Cell::new(error.kind()).fg(Color::Yellow)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
