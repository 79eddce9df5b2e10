//!
//! Module: db::validate
//! Responsibility: typed payload validation for the mutation paths.
//!

use crate::{
    model::{EntityModel, FieldKind, RESERVED_COLUMNS},
    types::{Id, Timestamp},
    value::Value,
};
use serde_json::Value as Json;
use std::str::FromStr;
use thiserror::Error as ThisError;

///
/// ValidationError
///
/// All payload problems for one mutation, reported together so the caller
/// can fix everything in one round trip.
///

#[derive(Clone, Debug, ThisError)]
#[error("validation failed for '{entity}' ({} issue(s))", .issues.len())]
pub struct ValidationError {
    pub entity: &'static str,
    pub issues: Vec<FieldIssue>,
}

///
/// FieldIssue
/// One rejected field with a caller-fixable message.
///

#[derive(Clone, Debug, ThisError)]
#[error("{field}: {message}")]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate a create payload into a full column list.
///
/// Absent optional fields materialize as `Null` so every stored row carries
/// the complete declared column set. The parent link is excluded: it is
/// engine-written by the fan-out path, never part of the payload.
pub(crate) fn validate_create(
    entity: &'static EntityModel,
    payload: &Json,
) -> Result<Vec<(&'static str, Value)>, ValidationError> {
    let object = as_object(entity, payload)?;
    let mut issues = Vec::new();
    let mut values = collect_fields(entity, object, &mut issues);

    for field in entity.fields {
        if entity.is_parent_link(field.name) {
            continue;
        }
        let provided = values
            .iter()
            .any(|(name, value)| *name == field.name && *value != Value::Null);
        if field.is_required() && !provided {
            issues.push(FieldIssue::new(field.name, "required field is missing"));
        } else if !values.iter().any(|(name, _)| *name == field.name) {
            values.push((field.name, Value::Null));
        }
    }

    finish(entity, values, issues)
}

/// Validate a partial update payload. Only the provided fields are checked;
/// a required field may be rewritten but never cleared.
pub(crate) fn validate_update(
    entity: &'static EntityModel,
    payload: &Json,
) -> Result<Vec<(&'static str, Value)>, ValidationError> {
    let object = as_object(entity, payload)?;
    let mut issues = Vec::new();
    let values = collect_fields(entity, object, &mut issues);

    for (name, value) in &values {
        if *value == Value::Null && entity.field(name).is_some_and(|f| f.is_required()) {
            issues.push(FieldIssue::new(*name, "required field cannot be cleared"));
        }
    }

    finish(entity, values, issues)
}

fn finish(
    entity: &'static EntityModel,
    values: Vec<(&'static str, Value)>,
    issues: Vec<FieldIssue>,
) -> Result<Vec<(&'static str, Value)>, ValidationError> {
    if issues.is_empty() {
        Ok(values)
    } else {
        Err(ValidationError {
            entity: entity.name,
            issues,
        })
    }
}

fn as_object<'a>(
    entity: &'static EntityModel,
    payload: &'a Json,
) -> Result<&'a serde_json::Map<String, Json>, ValidationError> {
    payload.as_object().ok_or_else(|| ValidationError {
        entity: entity.name,
        issues: vec![FieldIssue::new("payload", "expected a JSON object")],
    })
}

fn collect_fields(
    entity: &'static EntityModel,
    object: &serde_json::Map<String, Json>,
    issues: &mut Vec<FieldIssue>,
) -> Vec<(&'static str, Value)> {
    let mut values = Vec::new();
    for (key, raw) in object {
        if RESERVED_COLUMNS.contains(&key.as_str()) || entity.is_parent_link(key) {
            issues.push(FieldIssue::new(
                key.clone(),
                "column is engine-owned and read-only",
            ));
            continue;
        }
        let Some(field) = entity.field(key) else {
            issues.push(FieldIssue::new(key.clone(), "unknown field"));
            continue;
        };
        match coerce_json(field.kind, raw) {
            Ok(value) => values.push((field.name, value)),
            Err(message) => issues.push(FieldIssue::new(key.clone(), message)),
        }
    }

    values
}

fn coerce_json(kind: FieldKind, raw: &Json) -> Result<Value, String> {
    if raw.is_null() {
        return Ok(Value::Null);
    }

    let coerced = match kind {
        FieldKind::Bool => raw.as_bool().map(Value::Bool),
        FieldKind::Float => raw.as_f64().map(Value::Float),
        FieldKind::Int => raw.as_i64().map(Value::Int),
        FieldKind::Uint => raw.as_u64().map(Value::Uint),
        FieldKind::Text => raw.as_str().map(|s| Value::Text(s.to_string())),
        FieldKind::Timestamp => match raw {
            Json::String(s) => Timestamp::parse_flexible(s).ok().map(Value::Timestamp),
            Json::Number(n) => n.as_u64().map(Timestamp::from_seconds).map(Value::Timestamp),
            _ => None,
        },
        FieldKind::Id => raw
            .as_str()
            .and_then(|s| Id::from_str(s).ok())
            .map(Value::Id),
    };

    coerced.ok_or_else(|| format!("expected {}", kind.label()))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{NOTES, NOTE_TAGS};
    use serde_json::json;

    #[test]
    fn create_fills_absent_optionals_with_null() {
        let values = validate_create(&NOTES, &json!({ "title": "watering schedule" })).unwrap();

        assert_eq!(
            values
                .iter()
                .find(|(name, _)| *name == "title")
                .map(|(_, v)| v),
            Some(&Value::Text("watering schedule".to_string()))
        );
        assert!(
            values.iter().any(|(name, v)| *name == "body" && *v == Value::Null),
            "optional fields must materialize as Null"
        );
    }

    #[test]
    fn create_rejects_missing_required_field() {
        let err = validate_create(&NOTES, &json!({ "body": "no title" })).unwrap_err();

        assert_eq!(err.entity, "notes");
        assert!(err.issues.iter().any(|i| i.field == "title"));
    }

    #[test]
    fn unknown_and_reserved_fields_are_rejected() {
        let err = validate_create(
            &NOTES,
            &json!({ "title": "t", "bogus": 1, "owner_id": "mallory" }),
        )
        .unwrap_err();

        assert!(err.issues.iter().any(|i| i.field == "bogus"));
        assert!(err.issues.iter().any(|i| i.field == "owner_id"));
    }

    #[test]
    fn wrong_json_type_is_rejected_with_kind_label() {
        let err = validate_create(&NOTES, &json!({ "title": "t", "pinned": "yes" })).unwrap_err();

        let issue = err.issues.iter().find(|i| i.field == "pinned").unwrap();
        assert_eq!(issue.message, "expected bool");
    }

    #[test]
    fn update_is_partial_and_protects_required_fields() {
        let values = validate_update(&NOTES, &json!({ "pinned": true })).unwrap();
        assert_eq!(values, vec![("pinned", Value::Bool(true))]);

        let err = validate_update(&NOTES, &json!({ "title": null })).unwrap_err();
        assert!(err.issues.iter().any(|i| i.field == "title"));
    }

    #[test]
    fn parent_link_is_read_only_in_payloads() {
        let err = validate_update(&NOTE_TAGS, &json!({ "note_id": Id::generate().to_string() }))
            .unwrap_err();

        assert!(err.issues.iter().any(|i| i.field == "note_id"));
    }

    #[test]
    fn non_object_payload_is_one_issue() {
        let err = validate_create(&NOTES, &json!([1, 2, 3])).unwrap_err();

        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].field, "payload");
    }
}
