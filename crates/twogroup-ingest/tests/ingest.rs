use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use twogroup_ingest::{IngestError, build_dataset, load_config, read_csv_table};
use twogroup_model::{CellValue, ConfigError, Group, GroupConfig};

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

fn group_config(subject_column: Option<&str>) -> GroupConfig {
    GroupConfig {
        column: "group".to_string(),
        label_a: "haptic".to_string(),
        label_b: "gesture".to_string(),
        subject_column: subject_column.map(str::to_string),
    }
}

#[test]
fn reads_table_with_bom_blank_and_short_rows() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        &dir,
        "study.csv",
        "\u{feff}id, group ,score\n1,haptic,3\n\n2,gesture\n,,\n3,gesture,4,extra\n",
    );
    let table = read_csv_table(&path).expect("read csv");
    assert_eq!(table.headers, vec!["id", "group", "score"]);
    assert_eq!(
        table.rows,
        vec![
            vec!["1", "haptic", "3"],
            vec!["2", "gesture", ""],
            vec!["3", "gesture", "4"],
        ]
    );
}

#[test]
fn empty_file_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "empty.csv", "\n\n");
    assert!(matches!(
        read_csv_table(&path),
        Err(IngestError::EmptyCsv { .. })
    ));
    assert!(matches!(
        read_csv_table(Path::new("/nonexistent/study.csv")),
        Err(IngestError::CsvParse { .. })
    ));
}

#[test]
fn duplicate_headers_are_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "study.csv", "id,group,score, score\n1,haptic,3,4\n");
    let error = read_csv_table(&path).expect_err("duplicate header");
    assert!(matches!(
        &error,
        IngestError::DuplicateHeader { name, .. } if name == "score"
    ));
    let message = error.to_string();
    assert!(message.contains("duplicate column header \"score\""));
}

#[test]
fn builds_dataset_and_excludes_other_labels() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        &dir,
        "study.csv",
        "id,group,score,sex\n\
         s1,haptic,3.5,f\n\
         s2,gesture,,m\n\
         s3,control,9,f\n\
         s4, gesture ,n/a,m\n",
    );
    let table = read_csv_table(&path).expect("read csv");
    let dataset = build_dataset(&table, &group_config(Some("id"))).expect("dataset");

    assert_eq!(dataset.observations.len(), 3);
    assert_eq!(dataset.group_size(Group::A), 1);
    assert_eq!(dataset.group_size(Group::B), 2);
    assert_eq!(dataset.columns, vec!["id", "group", "score", "sex"]);

    let first = &dataset.observations[0];
    assert_eq!(first.subject_id.as_deref(), Some("s1"));
    assert_eq!(first.value("score"), &CellValue::Number(3.5));
    assert!(!first.values.contains_key("group"));

    let gesture = dataset.numeric_values("score", Group::B);
    assert!(gesture.values.is_empty());
    assert_eq!(gesture.non_numeric, 1);
    assert_eq!(dataset.categories("sex", Group::B), vec!["m", "m"]);
}

#[test]
fn missing_group_and_subject_columns_are_reported_together() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "study.csv", "condition,score\nhaptic,1\n");
    let table = read_csv_table(&path).expect("read csv");
    let err = build_dataset(&table, &group_config(Some("id"))).expect_err("missing columns");
    match err {
        IngestError::Config(ConfigError::MissingColumns { names }) => {
            assert_eq!(names, vec!["group", "id"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn loads_config_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        &dir,
        "analysis.toml",
        r#"
normality_alpha = 0.1
test_policy = "ttest"

[group]
column = "group"
label_a = "haptic"
label_b = "gesture"
subject_column = "id"

[baseline]
categorical = ["sex"]

[report]
blank_rows_between_blocks = false

[[blocks]]
name = "Scores"
variables = ["score"]
"#,
    );
    let config = load_config(&path).expect("load config");
    assert!((config.normality_alpha - 0.1).abs() < f64::EPSILON);
    assert_eq!(config.group.subject_column.as_deref(), Some("id"));
    assert!(!config.report.blank_rows_between_blocks);
    config.validate().expect("valid");

    assert!(matches!(
        load_config(&dir.path().join("absent.toml")),
        Err(IngestError::FileRead { .. })
    ));
}
