use std::fs;
use std::path::Path;

use twogroup_model::AnalysisConfig;

use crate::error::{IngestError, Result};

/// Read and parse a TOML analysis configuration.
///
/// The result is not validated; callers apply overrides first and then call
/// [`AnalysisConfig::validate`].
pub fn load_config(path: &Path) -> Result<AnalysisConfig> {
    let text = fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text, path)
}

pub(crate) fn parse_config(text: &str, path: &Path) -> Result<AnalysisConfig> {
    toml::from_str(text).map_err(|source| IngestError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use twogroup_model::TestPolicy;

    use super::*;

    #[test]
    fn defaults_fill_optional_fields() {
        let text = r#"
            [group]
            column = "condition"
            label_a = "A"
            label_b = "B"

            [[blocks]]
            name = "Scores"
            variables = ["score"]
        "#;
        let config = parse_config(text, Path::new("inline.toml")).expect("parse");
        assert_eq!(config.test_policy, TestPolicy::Auto);
        assert!(config.baseline.categorical.is_empty());
        assert!(!config.report.timestamp_output);
    }

    #[test]
    fn unknown_policy_is_a_toml_error() {
        let text = r#"
            test_policy = "anova"
            [group]
            column = "condition"
            label_a = "A"
            label_b = "B"
        "#;
        let err = parse_config(text, Path::new("bad.toml")).expect_err("bad policy");
        assert!(matches!(err, IngestError::Toml { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }
}
