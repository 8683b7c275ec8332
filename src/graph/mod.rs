//! Graph data module: payload sanitization and per-record validation.
//!
//! Takes the raw `{entities, relationships}` blob a case analysis produced
//! and turns it into data the rendering widget can trust: array shape is
//! guaranteed and every edge endpoint resolves to an existing entity.

mod sanitize;
mod validate;

pub use sanitize::sanitize_graph;
pub use validate::{relationship_from_value, validate_entity};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder label for entities that arrive without one.
pub const UNNAMED_LABEL: &str = "Unnamed";

/// Type marker for entities the upstream classifier left unclassified.
/// Distinct from the known type vocabulary; the style layer renders it
/// with its fallback treatment.
pub const DEFAULT_TYPE: &str = "default";

/// A referentially consistent graph: every relationship's `source` and
/// `target` equals the `id` of some entity in the same instance.
///
/// Records stay raw (`serde_json::Value`) so unknown fields and
/// non-enumerated entity types survive the trip to the rendering widget
/// unmodified. Replaced wholesale on each new case selection, never
/// mutated field-by-field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    /// Graph nodes, in upstream order (no dedup, no sort).
    #[serde(default)]
    pub entities: Vec<Value>,
    /// Graph edges, filtered to resolvable endpoints, relative order kept.
    #[serde(default)]
    pub relationships: Vec<Value>,
}

impl GraphData {
    /// True when the analysis produced nothing renderable.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relationships.is_empty()
    }

    pub fn stats(&self) -> String {
        format!(
            "Entities: {}, Relationships: {}",
            self.entities.len(),
            self.relationships.len()
        )
    }
}

/// A well-typed graph node with required fields guaranteed.
///
/// Produced by [`validate_entity`] when a consumer needs defaulted fields;
/// the sanitize path never forces records through this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique within a graph instance; join key for relationship endpoints.
    pub id: String,
    /// Human-readable display string.
    pub label: String,
    /// Open classification string ("person", "Organization", "Phone Number", ...).
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Marks entities the analysis flagged for highlighting.
    #[serde(rename = "isAnomaly", default)]
    pub is_anomaly: bool,
    /// Free-form descriptive attributes, passed through unmodified.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A directed, labeled edge between two entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: String,
    /// Must equal the `id` of an entity in the same graph.
    pub source: String,
    /// Must equal the `id` of an entity in the same graph.
    pub target: String,
    /// Connection description, e.g. "works at".
    pub label: String,
    /// Free-form descriptive attributes, passed through unmodified.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
