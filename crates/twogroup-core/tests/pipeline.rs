use std::collections::BTreeMap;

use twogroup_core::{run_analysis, validate_against_schema, validate_columns};
use twogroup_model::{
    AnalysisConfig, AnalysisError, BaselineTestKind, CellValue, ConfigError, Dataset,
    EffectSizeKind, Group, GroupConfig, GroupLabels, Observation, TestMethod, TestPolicy,
};

fn config() -> AnalysisConfig {
    AnalysisConfig::new(GroupConfig {
        column: "group".to_string(),
        label_a: "haptic".to_string(),
        label_b: "gesture".to_string(),
        subject_column: None,
    })
}

/// Build a dataset from per-column values listed as (group A, group B).
fn dataset(columns: &[(&str, &[&str], &[&str])]) -> Dataset {
    let rows_a = columns.iter().map(|(_, a, _)| a.len()).max().unwrap_or(0);
    let rows_b = columns.iter().map(|(_, _, b)| b.len()).max().unwrap_or(0);
    let mut observations = Vec::new();
    for (group, rows) in [(Group::A, rows_a), (Group::B, rows_b)] {
        for row in 0..rows {
            let values: BTreeMap<String, CellValue> = columns
                .iter()
                .map(|(name, a, b)| {
                    let cells = if group == Group::A { a } else { b };
                    let cell = cells.get(row).copied().unwrap_or("");
                    ((*name).to_string(), CellValue::parse(cell))
                })
                .collect();
            observations.push(Observation {
                subject_id: Some(format!("{group}{row}")),
                group,
                values,
            });
        }
    }
    let mut names = vec!["group".to_string()];
    names.extend(columns.iter().map(|(name, _, _)| (*name).to_string()));
    Dataset {
        columns: names,
        group_column: "group".to_string(),
        labels: GroupLabels::new("haptic", "gesture"),
        observations,
    }
}

const SCORE_A: &[&str] = &["12", "15", "11", "14", "13", "16", "12", "15", "14", "13"];
const SCORE_B: &[&str] = &["9", "11", "10", "12", "8", "10", "11", "9", "10", "12"];
const FIVES: &[&str] = &["5", "5", "5", "5", "5", "5", "5", "5", "5", "5"];
const SPREAD: &[&str] = &["3", "4", "6", "7", "5", "2", "8", "4", "6", "5"];

#[test]
fn every_declared_variable_gets_a_row() {
    let data = dataset(&[
        ("score", SCORE_A, SCORE_B),
        ("flat", FIVES, FIVES),
        ("sparse", &["1"][..], &["2", "3"][..]),
    ]);
    let config = config().with_block("Main", &["score", "flat", "sparse"]);
    let results = run_analysis(&data, &config).expect("valid configuration");

    let block = &results.blocks[0];
    assert_eq!(block.comparisons.len(), 3);
    assert_eq!(block.descriptives.len(), 6);
    assert_eq!(block.normality.len(), 6);
    let variables: Vec<&str> = block
        .comparisons
        .iter()
        .map(|record| record.variable.as_str())
        .collect();
    assert_eq!(variables, vec!["score", "flat", "sparse"]);

    assert!(block.comparisons[0].outcome.is_ok());
    assert!(matches!(
        block.comparisons[1].outcome,
        Err(AnalysisError::DegenerateGroup { .. })
    ));
    assert!(matches!(
        block.comparisons[2].outcome,
        Err(AnalysisError::DegenerateGroup { .. })
    ));
    // Only the successful variable forms the family.
    let correction = block.comparisons[0].correction.expect("corrected");
    assert!((correction.holm_p - correction.raw_p).abs() < f64::EPSILON);
    assert!(block.comparisons[1].correction.is_none());
    assert_eq!(results.failure_count(), 2);
}

#[test]
fn constant_group_has_zero_std_and_still_compares() {
    let data = dataset(&[("flat", FIVES, SPREAD)]);
    let config = config().with_block("Main", &["flat"]);
    let results = run_analysis(&data, &config).expect("valid configuration");
    let block = &results.blocks[0];

    let stats_a = block.descriptives[0].outcome.as_ref().expect("n = 10");
    assert_eq!(stats_a.n, 10);
    assert_eq!(stats_a.std, Some(0.0));
    assert!(block.normality[0].result.is_undetermined());

    let test = block.comparisons[0].outcome.as_ref().expect("proceeds");
    assert_eq!(test.method, TestMethod::MannWhitney);
}

#[test]
fn single_observation_reports_undefined_std() {
    let data = dataset(&[("score", &["4"][..], SCORE_B)]);
    let config = config().with_block("Main", &["score"]);
    let results = run_analysis(&data, &config).expect("valid configuration");
    let stats = results.blocks[0].descriptives[0]
        .outcome
        .as_ref()
        .expect("n = 1 is described");
    assert_eq!(stats.n, 1);
    assert_eq!(stats.std, None);
}

#[test]
fn empty_group_is_insufficient_data() {
    let data = dataset(&[
        ("score", SCORE_A, SCORE_B),
        ("late", &["1", "2"][..], &[][..]),
    ]);
    let config = config().with_block("Main", &["late"]);
    let results = run_analysis(&data, &config).expect("valid configuration");
    let descriptives = &results.blocks[0].descriptives;
    assert!(descriptives[0].outcome.is_ok());
    assert_eq!(descriptives[1].group, Group::B);
    assert!(matches!(
        descriptives[1].outcome,
        Err(AnalysisError::InsufficientData { .. })
    ));
}

#[test]
fn text_only_group_reports_dropped_cells() {
    let data = dataset(&[("score", &["n/a", "absent", "?"][..], SCORE_B)]);
    let config = config().with_block("Main", &["score"]);
    let results = run_analysis(&data, &config).expect("valid configuration");
    let block = &results.blocks[0];

    let Err(error) = &block.descriptives[0].outcome else {
        panic!("group A has no numbers");
    };
    assert!(matches!(error, AnalysisError::InsufficientData { .. }));
    let message = error.to_string();
    assert!(message.contains("3 non-numeric cells dropped"), "{message}");
    assert!(block.descriptives[1].outcome.is_ok());
    assert!(block.comparisons[0].outcome.is_err());
}

#[test]
fn welch_rejects_distinct_constant_groups() {
    let sixes = ["6"; 10];
    let data = dataset(&[("flat", FIVES, &sixes[..])]);
    let forced = config()
        .with_block("Main", &["flat"])
        .with_policy(TestPolicy::ForceWelch);
    let results = run_analysis(&data, &forced).expect("valid configuration");
    let Err(error) = &results.blocks[0].comparisons[0].outcome else {
        panic!("welch has no t statistic for two constant groups");
    };
    assert!(matches!(error, AnalysisError::DegenerateGroup { .. }));
    assert!(error.to_string().contains("zero variance"));

    for policy in [TestPolicy::ForceMannWhitney, TestPolicy::Auto] {
        let config = forced.clone().with_policy(policy);
        let results = run_analysis(&data, &config).expect("valid configuration");
        let test = results.blocks[0].comparisons[0]
            .outcome
            .as_ref()
            .expect("mann-whitney reports full separation");
        assert_eq!(test.method, TestMethod::MannWhitney);
        assert!(test.p_value < 0.001);
    }
}

#[test]
fn blocks_are_independent_families() {
    let data = dataset(&[
        ("score", SCORE_A, SCORE_B),
        ("spread", SPREAD, SCORE_B),
        ("other", SCORE_B, SPREAD),
    ]);
    let config = config()
        .with_block("First", &["score", "spread"])
        .with_block("Second", &["score"])
        .with_policy(TestPolicy::ForceWelch);
    let results = run_analysis(&data, &config).expect("valid configuration");
    assert_eq!(results.blocks.len(), 2);

    let first = results.blocks[0].comparisons[0]
        .correction
        .expect("corrected in first block");
    let second = results.blocks[1].comparisons[0]
        .correction
        .expect("corrected in second block");
    assert!((first.raw_p - second.raw_p).abs() < f64::EPSILON);
    // A block of one leaves the p-value untouched; the pair may not.
    assert!((second.holm_p - second.raw_p).abs() < f64::EPSILON);
    assert!(first.holm_p >= first.raw_p);
}

#[test]
fn swapping_groups_negates_effects_and_keeps_p() {
    let data = dataset(&[("score", SCORE_A, SCORE_B), ("spread", SPREAD, SCORE_B)]);
    let policies = [
        TestPolicy::ForceWelch,
        TestPolicy::ForceMannWhitney,
        TestPolicy::Auto,
    ];
    for policy in policies {
        let config = config()
            .with_block("Main", &["score", "spread"])
            .with_policy(policy);
        let forward = run_analysis(&data, &config).expect("forward");
        let mut swapped_config = config.clone();
        swapped_config.group.label_a = "gesture".to_string();
        swapped_config.group.label_b = "haptic".to_string();
        let backward =
            run_analysis(&data.with_swapped_groups(), &swapped_config).expect("backward");

        for (f, b) in forward.comparisons().zip(backward.comparisons()) {
            let f = f.outcome.as_ref().expect("forward test");
            let b = b.outcome.as_ref().expect("backward test");
            assert_eq!(f.method, b.method);
            assert!((f.effect_size.value + b.effect_size.value).abs() < 1e-9);
            assert!((f.p_value - b.p_value).abs() < 1e-12);
        }
    }
}

#[test]
fn baseline_rows_are_reported_with_flags() {
    let sex_a = ["f", "f", "f", "f", "f", "f", "f", "f", "m", "m"];
    let sex_b = ["f", "f", "f", "m", "m", "m", "m", "m", "m", "m"];
    let data = dataset(&[
        ("sex", &sex_a[..], &sex_b[..]),
        ("pre_test", SCORE_A, SCORE_B),
        ("score", SCORE_A, SCORE_B),
    ]);
    let config = config()
        .with_baseline(&["sex"], &["pre_test"])
        .with_block("Main", &["score"]);
    let results = run_analysis(&data, &config).expect("valid configuration");

    assert_eq!(results.baseline.len(), 2);
    let sex = &results.baseline[0];
    assert_eq!(sex.kind, BaselineTestKind::ChiSquare);
    let stats = sex.outcome.as_ref().expect("computed despite sparse cells");
    assert!(stats.unreliable);
    assert!(matches!(
        sex.issue,
        Some(AnalysisError::SparseContingencyTable { .. })
    ));

    let pre = &results.baseline[1];
    assert_eq!(pre.kind, BaselineTestKind::WelchT);
    let stats = pre.outcome.as_ref().expect("welch");
    assert!(!stats.balanced);
    assert_eq!(
        stats.effect_size.map(|effect| effect.kind),
        Some(EffectSizeKind::CohensD)
    );
}

#[test]
fn missing_columns_are_all_reported_before_analysis() {
    let data = dataset(&[("score", SCORE_A, SCORE_B)]);
    let config = config()
        .with_baseline(&["sex"], &[])
        .with_block("EEG", &["score", "Alpha_Fz", "Beta_Cz"]);
    assert_eq!(
        run_analysis(&data, &config),
        Err(ConfigError::MissingColumns {
            names: vec![
                "sex".to_string(),
                "Alpha_Fz".to_string(),
                "Beta_Cz".to_string(),
            ],
        })
    );
    assert!(validate_columns(&config, &data.columns).is_err());
}

#[test]
fn absent_group_label_is_fatal() {
    let data = dataset(&[("score", SCORE_A, &[][..])]);
    let config = config().with_block("Main", &["score"]);
    assert!(matches!(
        validate_against_schema(&config, &data),
        Err(ConfigError::MissingGroupLabel { label, .. }) if label == "gesture"
    ));
}
