//! Token data structures
//!
//! A token is the smallest unit of witness text produced by the collation
//! tool. Persisted tokens carry the tool's fields (`t`, `n`, anything else);
//! tokens loaded into the editor are wrapped in an `EditToken` that adds the
//! bookkeeping needed by the grid mutation engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted key for the per-witness reading order of a token
pub const ORDER_KEY: &str = "collatexEditorTokenOrder";

/// Persisted key for the witness (row) index of a token
pub const ROW_KEY: &str = "collatexEditorTokenRow";

/// Persisted key for the column index of a token
pub const COL_KEY: &str = "collatexEditorTokenCol";

/// Persisted key for the per-load edit identifier of a token
pub const ID_KEY: &str = "collatexEditorTokenId";

/// All editor-only keys that may appear in a persisted token
pub const EDITOR_MARK_KEYS: [&str; 4] = [ORDER_KEY, ROW_KEY, COL_KEY, ID_KEY];

/// A free-form annotation value attached to a token by the collation tool
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Annotation {
    Text(String),
    Number(serde_json::Number),
}

impl From<&str> for Annotation {
    fn from(value: &str) -> Self {
        Annotation::Text(value.to_string())
    }
}

impl From<String> for Annotation {
    fn from(value: String) -> Self {
        Annotation::Text(value)
    }
}

impl From<u64> for Annotation {
    fn from(value: u64) -> Self {
        Annotation::Number(value.into())
    }
}

/// A token as stored in a persisted alignment table
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Token {
    /// Raw token text
    pub t: String,

    /// Normalized form used for display, when the tool provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,

    /// Any other string/number fields the collation tool attached
    #[serde(flatten)]
    pub extra: BTreeMap<String, Annotation>,
}

impl Token {
    /// Create a token with only raw text
    pub fn new(t: impl Into<String>) -> Self {
        Self {
            t: t.into(),
            n: None,
            extra: BTreeMap::new(),
        }
    }

    /// Create a token with raw and normalized text
    pub fn with_normalized(t: impl Into<String>, n: impl Into<String>) -> Self {
        Self {
            t: t.into(),
            n: Some(n.into()),
            extra: BTreeMap::new(),
        }
    }

    /// Text shown in the grid: the normalized form if present, else the raw text
    pub fn display(&self) -> &str {
        match self.n.as_deref() {
            Some(n) if !n.is_empty() => n,
            _ => &self.t,
        }
    }

    /// Check whether this token carries any editor-only marks
    pub fn has_editor_marks(&self) -> bool {
        EDITOR_MARK_KEYS.iter().any(|k| self.extra.contains_key(*k))
    }

    /// Remove editor-only marks, leaving the collation tool's fields intact
    pub fn strip_editor_marks(&mut self) {
        for key in EDITOR_MARK_KEYS {
            self.extra.remove(key);
        }
    }
}

/// A token loaded into the editor, enriched with grid bookkeeping
///
/// `order` and `edit_id` are assigned once at load time and survive every
/// mutation; `row` and `col` follow the token as it moves.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EditToken {
    #[serde(flatten)]
    pub token: Token,

    /// Reading order within the witness row
    #[serde(rename = "collatexEditorTokenOrder")]
    pub order: u32,

    /// Witness (row) index
    #[serde(rename = "collatexEditorTokenRow")]
    pub row: usize,

    /// Column index
    #[serde(rename = "collatexEditorTokenCol")]
    pub col: usize,

    /// Unique identifier for this load of the table
    #[serde(rename = "collatexEditorTokenId")]
    pub edit_id: String,
}

impl EditToken {
    /// Wrap a persisted token, minting a fresh edit id
    ///
    /// Any editor marks left over from an earlier session are dropped so the
    /// new values are authoritative.
    pub fn new(mut token: Token, order: u32, row: usize, col: usize) -> Self {
        token.strip_editor_marks();
        Self {
            token,
            order,
            row,
            col,
            edit_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// Convert back to a persisted token with the editor marks merged in
    pub fn to_persisted(&self) -> Token {
        let mut token = self.token.clone();
        token.extra.insert(ORDER_KEY.to_string(), Annotation::from(self.order as u64));
        token.extra.insert(ROW_KEY.to_string(), Annotation::from(self.row as u64));
        token.extra.insert(COL_KEY.to_string(), Annotation::from(self.col as u64));
        token.extra.insert(ID_KEY.to_string(), Annotation::from(self.edit_id.as_str()));
        token
    }

    pub fn display(&self) -> &str {
        self.token.display()
    }
}
