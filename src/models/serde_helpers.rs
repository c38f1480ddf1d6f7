//! Serde helpers for persisted collation records

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::collation::Collation;
use super::table::Table;

/// Serialize Option<T> as null when None (don't skip the field)
pub fn serialize_option_as_null<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(v) => serializer.serialize_some(v),
        None => serializer.serialize_none(),
    }
}

/// Deserialize an alignment table, falling back to None when it is unusable
///
/// A stored table that no longer parses or whose columns disagree with the
/// witness list becomes `None`, which the editor reports as an unloadable
/// collation instead of rejecting the whole record.
pub fn deserialize_lenient_table<'de, D>(deserializer: D) -> Result<Option<Table>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };

    match serde_json::from_value::<Table>(raw) {
        Ok(table) => match crate::schema::validate_table(&table) {
            Ok(()) => Ok(Some(table)),
            Err(e) => {
                log::warn!("Discarding stored alignment table: {}", e);
                Ok(None)
            }
        },
        Err(e) => {
            log::warn!("Discarding unreadable alignment table: {}", e);
            Ok(None)
        }
    }
}

/// Deserialize a list of collations, skipping records that do not decode
///
/// One damaged record (missing id, unknown direction) is dropped with a
/// warning; the rest of the collection still loads.
pub fn deserialize_lenient_collations<'de, D>(deserializer: D) -> Result<Vec<Collation>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    let collations = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<Collation>(value) {
            Ok(collation) => Some(collation),
            Err(e) => {
                log::warn!("Skipping unreadable collation record {}: {}", index, e);
                None
            }
        })
        .collect();
    Ok(collations)
}
