//! Validation of alignment tables and collation form input
//!
//! Import payloads and collation names are checked here before anything is
//! handed to the store. Failures are field-level: the form shows the message
//! and blocks submission.

use thiserror::Error;

use crate::models::{Collation, Direction, Table};

/// Minimum number of characters in a collation name
pub const MIN_NAME_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The import payload is not JSON of the table shape
    #[error("The selected file is not a valid CollateX JSON: {0}")]
    InvalidTable(String),

    /// A column does not have one cell per witness
    #[error("Column {column} has {found} cells but there are {expected} witnesses")]
    WitnessCountMismatch {
        column: usize,
        expected: usize,
        found: usize,
    },

    #[error("Name must be at least 3 characters")]
    NameTooShort,

    #[error("A collation with this name already exists")]
    DuplicateName,

    #[error("An alignment table is required")]
    MissingTable,
}

/// Check that every column has exactly one cell per witness
pub fn validate_table(table: &Table) -> Result<(), ValidationError> {
    let expected = table.witnesses.len();
    for (column, cells) in table.table.iter().enumerate() {
        if cells.len() != expected {
            return Err(ValidationError::WitnessCountMismatch {
                column,
                expected,
                found: cells.len(),
            });
        }
    }
    Ok(())
}

/// Parse and validate an import payload
pub fn parse_table(bytes: &[u8]) -> Result<Table, ValidationError> {
    let table: Table = serde_json::from_slice(bytes)
        .map_err(|e| ValidationError::InvalidTable(e.to_string()))?;
    validate_table(&table)?;
    Ok(table)
}

/// Check the synchronous name rule (length only)
pub fn validate_name_length(name: &str) -> Result<(), ValidationError> {
    if name.chars().count() < MIN_NAME_LEN {
        return Err(ValidationError::NameTooShort);
    }
    Ok(())
}

/// Check a name against existing collations
///
/// `own_id` is the id of the collation being edited; its current name does
/// not count as a duplicate.
pub fn validate_name(
    name: &str,
    existing: &[Collation],
    own_id: Option<&str>,
) -> Result<(), ValidationError> {
    validate_name_length(name)?;
    let taken = existing
        .iter()
        .filter(|c| Some(c.id.as_str()) != own_id)
        .any(|c| c.name == name);
    if taken {
        return Err(ValidationError::DuplicateName);
    }
    Ok(())
}

/// Form state for creating or editing a collation
#[derive(Clone, Debug, PartialEq)]
pub struct CollationDraft {
    pub id: String,
    pub name: String,
    pub dir: Direction,
    pub alignment_table: Option<Table>,
}

impl CollationDraft {
    /// A blank draft with a fresh id
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: String::new(),
            dir: Direction::Ltr,
            alignment_table: None,
        }
    }

    /// A draft pre-filled from an existing collation
    pub fn from_collation(collation: &Collation) -> Self {
        Self {
            id: collation.id.clone(),
            name: collation.name.clone(),
            dir: collation.dir,
            alignment_table: collation.alignment_table.clone(),
        }
    }

    /// Replace the table from an import payload
    pub fn load_table(&mut self, bytes: &[u8]) -> Result<(), ValidationError> {
        self.alignment_table = Some(parse_table(bytes)?);
        Ok(())
    }

    /// Validate the draft and produce the collation to import
    pub fn submit(self, existing: &[Collation]) -> Result<Collation, ValidationError> {
        validate_name(&self.name, existing, Some(&self.id))?;
        let table = self.alignment_table.ok_or(ValidationError::MissingTable)?;
        validate_table(&table)?;
        Ok(Collation {
            id: self.id,
            name: self.name,
            dir: self.dir,
            alignment_table: Some(table),
        })
    }
}

impl Default for CollationDraft {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{"witnesses":["A","B"],"table":[[[{"t":"a"}],[{"t":"b"}]],[[],[{"t":"c"}]]]}"#;

    #[test]
    fn test_parse_valid_table() {
        let table = parse_table(VALID.as_bytes()).unwrap();
        assert_eq!(table.witnesses, vec!["A", "B"]);
        assert_eq!(table.table.len(), 2);
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = parse_table(b"{not json").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTable(_)));
    }

    #[test]
    fn test_parse_rejects_missing_text() {
        let json = r#"{"witnesses":["A"],"table":[[[{"n":"a"}]]]}"#;
        assert!(matches!(
            parse_table(json.as_bytes()),
            Err(ValidationError::InvalidTable(_))
        ));
    }

    #[test]
    fn test_parse_rejects_witness_mismatch() {
        let json = r#"{"witnesses":["A","B"],"table":[[[{"t":"a"}]]]}"#;
        assert_eq!(
            parse_table(json.as_bytes()),
            Err(ValidationError::WitnessCountMismatch {
                column: 0,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_name_rules() {
        let existing = vec![Collation::new("Odyssey", Direction::Ltr, None)];
        let own = existing[0].id.clone();

        assert_eq!(validate_name("Od", &existing, None), Err(ValidationError::NameTooShort));
        assert_eq!(
            validate_name("Odyssey", &existing, None),
            Err(ValidationError::DuplicateName)
        );
        assert_eq!(validate_name("Odyssey", &existing, Some(&own)), Ok(()));
        assert_eq!(validate_name("Iliad", &existing, None), Ok(()));
    }

    #[test]
    fn test_draft_submit() {
        let mut draft = CollationDraft::new();
        draft.name = "Iliad".into();
        assert_eq!(draft.clone().submit(&[]), Err(ValidationError::MissingTable));

        draft.load_table(VALID.as_bytes()).unwrap();
        let collation = draft.clone().submit(&[]).unwrap();
        assert_eq!(collation.id, draft.id);
        assert_eq!(collation.dir, Direction::Ltr);
        assert!(!collation.is_corrupted());
    }
}
