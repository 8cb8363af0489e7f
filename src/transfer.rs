//! Portable progress payloads.
//!
//! Export writes `{ "aprobadas": [<id>, ...] }`; import accepts the same
//! shape and replaces the completed set wholesale. Any shape violation
//! rejects the whole payload: element violations are collected and reported
//! together rather than coerced to sentinel values.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::catalog::{Catalog, CourseId};
use crate::core::CompletedSet;
use crate::error::{MallaError, Result};

/// Field name of the payload. Fixed for compatibility with existing exports.
pub const EXPORT_FIELD: &str = "aprobadas";

#[derive(Debug, Serialize)]
struct ExportPayload {
    aprobadas: Vec<CourseId>,
}

/// Serialize the completed set as a portable payload, ids ascending.
pub fn export_payload(completed: &CompletedSet) -> Result<String> {
    let payload = ExportPayload {
        aprobadas: completed.to_vec(),
    };
    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Parse and validate a portable payload, producing the replacement set.
/// The caller's state is untouched until this returns `Ok`.
///
/// Ids unknown to the catalog are accepted (they are inert) but logged.
pub fn import_payload(raw: &str, catalog: &Catalog) -> Result<CompletedSet> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|err| MallaError::ImportRejected(format!("not valid JSON: {err}")))?;

    let Some(object) = value.as_object() else {
        return Err(MallaError::ImportRejected(
            "top level must be a JSON object".to_string(),
        ));
    };
    let Some(field) = object.get(EXPORT_FIELD) else {
        return Err(MallaError::ImportRejected(format!(
            "missing \"{EXPORT_FIELD}\" field"
        )));
    };
    let Some(items) = field.as_array() else {
        return Err(MallaError::ImportRejected(format!(
            "\"{EXPORT_FIELD}\" must be an array"
        )));
    };

    let mut ids = Vec::with_capacity(items.len());
    let mut violations = Vec::new();
    for (index, item) in items.iter().enumerate() {
        match coerce_id(item) {
            Some(id) => ids.push(id),
            None => violations.push(format!("element {index} ({item}) is not a course id")),
        }
    }
    if !violations.is_empty() {
        return Err(MallaError::ImportRejected(violations.join("; ")));
    }

    for &id in &ids {
        if !catalog.contains(id) {
            warn!(id, "imported id not present in catalog");
        }
    }

    Ok(CompletedSet::from_ids(ids))
}

fn coerce_id(value: &Value) -> Option<CourseId> {
    value.as_u64().and_then(|n| CourseId::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn export_has_the_fixed_field_name() {
        let set = CompletedSet::from_ids([6, 1, 2]);
        let payload = export_payload(&set).unwrap();
        let value: Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value[EXPORT_FIELD], serde_json::json!([1, 2, 6]));
    }

    #[test]
    fn import_replaces_wholesale() {
        let catalog = Catalog::builtin().unwrap();
        let set = import_payload(r#"{"aprobadas":[1,2,6]}"#, &catalog).unwrap();
        assert_eq!(set, CompletedSet::from_ids([1, 2, 6]));
    }

    #[test]
    fn import_rejects_missing_field() {
        let catalog = Catalog::builtin().unwrap();
        let err = import_payload("{}", &catalog).unwrap_err();
        assert!(err.to_string().contains("missing \"aprobadas\""));
    }

    #[test]
    fn import_rejects_non_array_field() {
        let catalog = Catalog::builtin().unwrap();
        let err = import_payload(r#"{"aprobadas":"1,2"}"#, &catalog).unwrap_err();
        assert!(err.to_string().contains("must be an array"));
    }

    #[test]
    fn import_rejects_non_object_top_level() {
        let catalog = Catalog::builtin().unwrap();
        let err = import_payload("[1,2]", &catalog).unwrap_err();
        assert!(err.to_string().contains("top level"));
    }

    #[test]
    fn import_collects_every_element_violation() {
        let catalog = Catalog::builtin().unwrap();
        let err = import_payload(r#"{"aprobadas":[1,"two",-3,4.5,null]}"#, &catalog).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("element 1"));
        assert!(message.contains("element 2"));
        assert!(message.contains("element 3"));
        assert!(message.contains("element 4"));
        assert!(!message.contains("element 0"));
    }

    #[test]
    fn import_accepts_unknown_ids() {
        // Unknown ids are inert: they render nowhere and unlock nothing.
        let catalog = Catalog::builtin().unwrap();
        let set = import_payload(r#"{"aprobadas":[1,999]}"#, &catalog).unwrap();
        assert_eq!(set, CompletedSet::from_ids([1, 999]));
    }

    #[test]
    fn round_trip_preserves_the_set() {
        let catalog = Catalog::builtin().unwrap();
        let original = CompletedSet::from_ids([26, 1, 14, 5]);
        let payload = export_payload(&original).unwrap();
        let restored = import_payload(&payload, &catalog).unwrap();
        assert_eq!(restored, original);
    }
}
