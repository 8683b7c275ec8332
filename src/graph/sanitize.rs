//! Graph sanitization: shape coercion and referential filtering.

use std::collections::HashSet;

use serde_json::Value;

use super::GraphData;

/// Coerce an untrusted payload into a referentially consistent [`GraphData`].
///
/// The input comes from a network response carrying a remote model's output,
/// so no shape can be assumed. Total: never fails, for any input. Garbage
/// narrows toward an empty graph, not an error — the caller distinguishes
/// "analysis returned nothing" from "analysis failed" at the response layer.
///
/// - `entities`/`relationships` that are not arrays (missing, null, scalar,
///   or `raw` itself not an object) become empty.
/// - A relationship survives iff `source` and `target` are non-empty strings
///   and each matches the `id` of a retained entity (exact comparison). An
///   edge with a missing endpoint is dropped, not defaulted.
/// - Entities pass through unmodified in input order; surviving
///   relationships keep their relative order.
pub fn sanitize_graph(raw: &Value) -> GraphData {
    let entities: Vec<Value> = match raw.get("entities") {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    };
    let relationships: Vec<Value> = match raw.get("relationships") {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    };

    let ids: HashSet<&str> = entities
        .iter()
        .filter_map(|e| e.get("id").and_then(Value::as_str))
        .filter(|id| !id.is_empty())
        .collect();

    let total = relationships.len();
    let relationships: Vec<Value> = relationships
        .into_iter()
        .filter(|rel| {
            endpoint(rel, "source").is_some_and(|s| ids.contains(s))
                && endpoint(rel, "target").is_some_and(|t| ids.contains(t))
        })
        .collect();

    let dropped = total - relationships.len();
    if dropped > 0 {
        log::warn!(
            "Dropped {} relationship(s) with unresolvable endpoints",
            dropped
        );
    }

    GraphData {
        entities,
        relationships,
    }
}

/// Non-empty string endpoint of an edge, if present.
fn endpoint<'a>(rel: &'a Value, key: &str) -> Option<&'a str> {
    rel.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}
