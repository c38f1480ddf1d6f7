//! Collation records
//!
//! A collation is a named alignment table plus its reading direction. The
//! table is optional: a record whose table could not be loaded is kept so
//! the user can see it and delete it.

use serde::{Deserialize, Serialize};

use super::serde_helpers::{deserialize_lenient_table, serialize_option_as_null};
use super::table::Table;

/// Reading direction of the witnesses' script
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    pub fn is_rtl(self) -> bool {
        self == Direction::Rtl
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// A named, persisted alignment table
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Collation {
    /// Stable unique identifier (UUID v4)
    pub id: String,

    /// User-facing name, unique among collations
    #[serde(default)]
    pub name: String,

    /// Reading direction
    #[serde(default)]
    pub dir: Direction,

    /// The alignment table, or None when it could not be loaded
    #[serde(
        rename = "alignmentTable",
        default,
        serialize_with = "serialize_option_as_null",
        deserialize_with = "deserialize_lenient_table"
    )]
    pub alignment_table: Option<Table>,
}

impl Collation {
    /// Create a collation with a fresh id
    pub fn new(name: impl Into<String>, dir: Direction, alignment_table: Option<Table>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            dir,
            alignment_table,
        }
    }

    /// Check whether the table is missing (unloadable import)
    pub fn is_corrupted(&self) -> bool {
        self.alignment_table.is_none()
    }

    /// Summary used by list views
    pub fn summary(&self) -> CollationSummary {
        CollationSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            witnesses: self.alignment_table.as_ref().map(Table::witness_count),
            columns: self.alignment_table.as_ref().map(Table::column_count),
        }
    }
}

/// Row of the collations list
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CollationSummary {
    pub id: String,
    pub name: String,
    pub witnesses: Option<usize>,
    pub columns: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Token;

    fn sample_table() -> Table {
        Table::new(
            vec!["A".into(), "B".into()],
            vec![vec![vec![Token::new("a")], vec![Token::new("b")]]],
        )
    }

    #[test]
    fn test_collation_json_shape() {
        let collation = Collation::new("Test", Direction::Rtl, None);
        let value = serde_json::to_value(&collation).unwrap();

        assert_eq!(value["dir"], "rtl");
        assert!(value["alignmentTable"].is_null());
        assert_eq!(value["name"], "Test");
    }

    #[test]
    fn test_broken_table_loads_as_missing() {
        let json = r#"{"id":"x","name":"Broken","dir":"ltr","alignmentTable":{"witnesses":"nope"}}"#;
        let collation: Collation = serde_json::from_str(json).unwrap();
        assert!(collation.is_corrupted());
    }

    #[test]
    fn test_mismatched_witness_count_loads_as_missing() {
        let json = r#"{"id":"x","name":"Bad","dir":"ltr",
            "alignmentTable":{"witnesses":["A","B"],"table":[[[{"t":"a"}]]]}}"#;
        let collation: Collation = serde_json::from_str(json).unwrap();
        assert!(collation.is_corrupted());
    }

    #[test]
    fn test_summary_counts() {
        let collation = Collation::new("Test", Direction::Ltr, Some(sample_table()));
        let summary = collation.summary();

        assert_eq!(summary.witnesses, Some(2));
        assert_eq!(summary.columns, Some(1));

        let empty = Collation::new("Empty", Direction::Ltr, None).summary();
        assert_eq!(empty.witnesses, None);
    }
}
