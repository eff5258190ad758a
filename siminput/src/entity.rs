//! Base contract shared by all domain records.

use crate::context::ContextMap;
use serde_json::Value;

/// Common identity contract implemented by every domain record.
///
/// Records are plain value types: identity changes only by replacing the
/// whole field, and the trait carries no mutation surface.
pub trait NamedEntity {
    /// The record's identifying name.
    fn name(&self) -> &str;

    /// The schema version marker, when the record carries one.
    fn schema_version(&self) -> Option<&str> {
        None
    }

    /// Whether the record is flagged as the default among its siblings.
    fn is_default(&self) -> bool {
        false
    }
}

/// Field selection policy when exporting a record to a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportMode {
    /// Omit unset optional fields and empty collections.
    ExcludeUnset,
    /// Emit every field, with `null` standing in for unset optionals.
    IncludeAll,
}

impl Default for ExportMode {
    fn default() -> Self {
        Self::ExcludeUnset
    }
}

/// Inserts an optional field into an export mapping according to `mode`.
pub(crate) fn insert_opt(map: &mut ContextMap, key: &str, value: Option<Value>, mode: ExportMode) {
    match value {
        Some(value) => {
            map.insert(key.to_string(), value);
        }
        None if mode == ExportMode::IncludeAll => {
            map.insert(key.to_string(), Value::Null);
        }
        None => {}
    }
}

/// Inserts a list field into an export mapping, skipping empty lists in
/// exclude-unset mode.
pub(crate) fn insert_seq(map: &mut ContextMap, key: &str, values: Vec<Value>, mode: ExportMode) {
    if !values.is_empty() || mode == ExportMode::IncludeAll {
        map.insert(key.to_string(), Value::Array(values));
    }
}
