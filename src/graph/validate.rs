//! Per-record validation: narrow a raw JSON record into a typed one with
//! required fields defaulted.

use serde_json::{Map, Value};
use uuid::Uuid;

use super::{Entity, Relationship, DEFAULT_TYPE, UNNAMED_LABEL};

/// Narrow a raw record into a well-typed [`Entity`], defaulting required
/// fields. Total: any input (including non-objects) yields a populated
/// record. Applied on demand, not as part of the sanitize path, so that
/// records heading straight to the widget keep their upstream shape.
///
/// - `id`: supplied non-empty string, else a fresh `node-<uuid>` (fallback
///   path only; collision-resistant within a session).
/// - `label`: supplied non-empty string, else "Unnamed".
/// - `type`: supplied string, else "default" (unclassified marker).
/// - `isAnomaly`: truthy coercion; absent or falsy yields `false`.
///
/// Every other field is preserved in `extra`.
pub fn validate_entity(raw: &Value) -> Entity {
    let id = non_empty_str(raw, "id")
        .map(str::to_string)
        .unwrap_or_else(|| format!("node-{}", Uuid::new_v4()));
    let label = non_empty_str(raw, "label")
        .unwrap_or(UNNAMED_LABEL)
        .to_string();
    let entity_type = raw
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_TYPE)
        .to_string();
    let is_anomaly = raw.get("isAnomaly").map(is_truthy).unwrap_or(false);

    Entity {
        id,
        label,
        entity_type,
        is_anomaly,
        extra: extra_fields(raw, &["id", "label", "type", "isAnomaly"]),
    }
}

/// Lenient typed view of a raw relationship record, for consumers that need
/// field access (listings, element building). Endpoint presence is the
/// sanitizer's concern; here missing fields just become empty strings.
/// The edge label falls back to `type`, which some upstream classifiers
/// emit instead.
pub fn relationship_from_value(raw: &Value) -> Relationship {
    let str_field = |key: &str| {
        raw.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let label = match non_empty_str(raw, "label") {
        Some(label) => label.to_string(),
        None => str_field("type"),
    };

    Relationship {
        id: str_field("id"),
        source: str_field("source"),
        target: str_field("target"),
        label,
        extra: extra_fields(raw, &["id", "source", "target", "label", "type"]),
    }
}

fn non_empty_str<'a>(raw: &'a Value, key: &str) -> Option<&'a str> {
    raw.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// JS-style truthiness for the anomaly flag: the upstream model has been
/// seen emitting booleans, 0/1, and strings.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn extra_fields(raw: &Value, known: &[&str]) -> Map<String, Value> {
    match raw.as_object() {
        Some(obj) => obj
            .iter()
            .filter(|(k, _)| !known.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        None => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_defaults_missing_fields() {
        let entity = validate_entity(&json!({"label": "Bob"}));
        assert!(!entity.id.is_empty());
        assert!(entity.id.starts_with("node-"));
        assert_eq!(entity.label, "Bob");
        assert_eq!(entity.entity_type, "default");
        assert!(!entity.is_anomaly);
    }

    #[test]
    fn test_validate_keeps_supplied_fields() {
        let entity = validate_entity(&json!({
            "id": "e1",
            "label": "Acme Corp",
            "type": "Organization",
            "isAnomaly": true
        }));
        assert_eq!(entity.id, "e1");
        assert_eq!(entity.label, "Acme Corp");
        assert_eq!(entity.entity_type, "Organization");
        assert!(entity.is_anomaly);
    }

    #[test]
    fn test_validate_total_on_non_object() {
        for raw in [json!(null), json!(17), json!("x"), json!([1])] {
            let entity = validate_entity(&raw);
            assert!(entity.id.starts_with("node-"));
            assert_eq!(entity.label, "Unnamed");
            assert_eq!(entity.entity_type, "default");
            assert!(entity.extra.is_empty());
        }
    }

    #[test]
    fn test_validate_empty_strings_defaulted() {
        let entity = validate_entity(&json!({"id": "", "label": ""}));
        assert!(entity.id.starts_with("node-"));
        assert_eq!(entity.label, "Unnamed");
    }

    #[test]
    fn test_generated_ids_unique() {
        let a = validate_entity(&json!({}));
        let b = validate_entity(&json!({}));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_anomaly_truthy_coercion() {
        assert!(validate_entity(&json!({"isAnomaly": 1})).is_anomaly);
        assert!(validate_entity(&json!({"isAnomaly": "yes"})).is_anomaly);
        assert!(!validate_entity(&json!({"isAnomaly": 0})).is_anomaly);
        assert!(!validate_entity(&json!({"isAnomaly": ""})).is_anomaly);
        assert!(!validate_entity(&json!({"isAnomaly": null})).is_anomaly);
        assert!(!validate_entity(&json!({})).is_anomaly);
    }

    #[test]
    fn test_unknown_fields_preserved() {
        let entity = validate_entity(&json!({
            "id": "e1",
            "label": "x",
            "role": "victim",
            "confidence": 0.9
        }));
        assert_eq!(entity.extra["role"], json!("victim"));
        assert_eq!(entity.extra["confidence"], json!(0.9));
        assert!(!entity.extra.contains_key("id"));
    }

    #[test]
    fn test_relationship_label_falls_back_to_type() {
        let rel = relationship_from_value(&json!({
            "id": "r1",
            "source": "a",
            "target": "b",
            "type": "works at"
        }));
        assert_eq!(rel.label, "works at");
    }

    #[test]
    fn test_relationship_lenient_on_missing_fields() {
        let rel = relationship_from_value(&json!({"strength": "STRONG"}));
        assert_eq!(rel.id, "");
        assert_eq!(rel.source, "");
        assert_eq!(rel.extra["strength"], json!("STRONG"));
    }
}
