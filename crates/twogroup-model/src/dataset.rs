//! In-memory observations partitioned into the two comparison groups.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two compared groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Group {
    A,
    B,
}

impl Group {
    pub const BOTH: [Group; 2] = [Group::A, Group::B];

    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

/// Raw label values that identify group A and group B in the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupLabels {
    pub a: String,
    pub b: String,
}

impl GroupLabels {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    pub fn label(&self, group: Group) -> &str {
        match group {
            Group::A => &self.a,
            Group::B => &self.b,
        }
    }

    /// Resolve a raw cell to a group; anything else is outside the comparison.
    pub fn resolve(&self, raw: &str) -> Option<Group> {
        let raw = raw.trim();
        if raw == self.a {
            Some(Group::A)
        } else if raw == self.b {
            Some(Group::B)
        } else {
            None
        }
    }

    /// Labels with A and B exchanged.
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self {
            a: self.b.clone(),
            b: self.a.clone(),
        }
    }
}

/// A single cell as read from the source table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

impl CellValue {
    /// Classify a trimmed raw cell.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Self::Number(value),
            Ok(_) => Self::Missing,
            Err(_) => Self::Text(trimmed.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Category key for contingency tables; numbers keep their source spelling.
    pub fn category(&self) -> Option<String> {
        match self {
            Self::Number(value) => Some(format_category(*value)),
            Self::Text(text) => Some(text.clone()),
            Self::Missing => None,
        }
    }
}

fn format_category(value: f64) -> String {
    let s = format!("{value}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// One subject row. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub subject_id: Option<String>,
    pub group: Group,
    pub values: BTreeMap<String, CellValue>,
}

impl Observation {
    pub fn value(&self, variable: &str) -> &CellValue {
        self.values.get(variable).unwrap_or(&CellValue::Missing)
    }
}

/// Numeric values of one variable within one group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericColumn {
    pub values: Vec<f64>,
    /// Non-empty cells that could not be read as numbers.
    pub non_numeric: usize,
}

/// The loaded table restricted to rows of the two compared groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub group_column: String,
    pub labels: GroupLabels,
    pub observations: Vec<Observation>,
}

impl Dataset {
    pub fn group_size(&self, group: Group) -> usize {
        self.observations
            .iter()
            .filter(|obs| obs.group == group)
            .count()
    }

    /// Non-missing numeric values of `variable` in `group`, in row order.
    pub fn numeric_values(&self, variable: &str, group: Group) -> NumericColumn {
        let mut column = NumericColumn::default();
        for obs in self.observations.iter().filter(|obs| obs.group == group) {
            match obs.value(variable) {
                CellValue::Number(value) => column.values.push(*value),
                CellValue::Text(_) => column.non_numeric += 1,
                CellValue::Missing => {}
            }
        }
        column
    }

    /// Non-missing category keys of `variable` in `group`, in row order.
    pub fn categories(&self, variable: &str, group: Group) -> Vec<String> {
        self.observations
            .iter()
            .filter(|obs| obs.group == group)
            .filter_map(|obs| obs.value(variable).category())
            .collect()
    }

    /// Same observations with group A and group B exchanged.
    #[must_use]
    pub fn with_swapped_groups(&self) -> Self {
        let observations = self
            .observations
            .iter()
            .map(|obs| Observation {
                group: obs.group.other(),
                ..obs.clone()
            })
            .collect();
        Self {
            columns: self.columns.clone(),
            group_column: self.group_column.clone(),
            labels: self.labels.swapped(),
            observations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(group: Group, score: &str) -> Observation {
        let mut values = BTreeMap::new();
        values.insert("score".to_string(), CellValue::parse(score));
        Observation {
            subject_id: None,
            group,
            values,
        }
    }

    #[test]
    fn parses_cells() {
        assert_eq!(CellValue::parse(" 3.5 "), CellValue::Number(3.5));
        assert_eq!(CellValue::parse(""), CellValue::Missing);
        assert_eq!(CellValue::parse("NaN"), CellValue::Missing);
        assert_eq!(CellValue::parse("male"), CellValue::Text("male".into()));
        assert_eq!(CellValue::parse("2").category().as_deref(), Some("2"));
        assert_eq!(CellValue::parse("2.50").category().as_deref(), Some("2.5"));
    }

    #[test]
    fn numeric_values_drop_missing_and_count_text() {
        let dataset = Dataset {
            columns: vec!["group".to_string(), "score".to_string()],
            group_column: "group".to_string(),
            labels: GroupLabels::new("haptic", "gesture"),
            observations: vec![
                obs(Group::A, "1"),
                obs(Group::A, ""),
                obs(Group::A, "n/a"),
                obs(Group::B, "4"),
            ],
        };
        let column = dataset.numeric_values("score", Group::A);
        assert_eq!(column.values, vec![1.0]);
        assert_eq!(column.non_numeric, 1);
        assert_eq!(dataset.numeric_values("score", Group::B).values, vec![4.0]);
        assert!(dataset.numeric_values("absent", Group::B).values.is_empty());
    }

    #[test]
    fn swapping_groups_exchanges_labels_and_rows() {
        let dataset = Dataset {
            columns: vec!["group".to_string(), "score".to_string()],
            group_column: "group".to_string(),
            labels: GroupLabels::new("haptic", "gesture"),
            observations: vec![obs(Group::A, "1"), obs(Group::B, "2")],
        };
        let swapped = dataset.with_swapped_groups();
        assert_eq!(swapped.labels.a, "gesture");
        assert_eq!(swapped.numeric_values("score", Group::A).values, vec![2.0]);
        assert_eq!(swapped.labels.resolve("haptic"), Some(Group::B));
    }
}
