//! Style classification for entity types.
//!
//! Entity `type` is an open string: the upstream classifier emits mixed
//! casings and vocabularies ("Person", "person", "Phone Number", "EMAIL",
//! "address"). The palette folds those onto canonical style keys and keeps
//! a defined fallback for anything unclassified, so the rendering layer
//! never meets a type it cannot draw.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::graph::{Entity, DEFAULT_TYPE};

/// Colors for one node class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStyle {
    pub background: String,
    pub border: String,
}

impl NodeStyle {
    fn new(background: &str, border: &str) -> Self {
        Self {
            background: background.to_string(),
            border: border.to_string(),
        }
    }
}

/// Maps open-ended type strings onto node styles.
#[derive(Debug, Clone)]
pub struct StylePalette {
    /// Canonical style key -> style.
    styles: HashMap<String, NodeStyle>,
    /// Normalized type string -> canonical style key.
    aliases: HashMap<String, String>,
    fallback: NodeStyle,
    anomaly: NodeStyle,
}

impl Default for StylePalette {
    fn default() -> Self {
        let mut palette = Self {
            styles: HashMap::new(),
            aliases: HashMap::new(),
            fallback: NodeStyle::new("#00ff44", "#047857"),
            anomaly: NodeStyle::new("#FEE2E2", "#991B1B"),
        };
        palette.insert("person", NodeStyle::new("#00ff44", "#047857"));
        palette.insert("organization", NodeStyle::new("#D8B4FE", "#6D28D9"));
        palette.insert("location", NodeStyle::new("#BFDBFE", "#1D4ED8"));
        palette.insert("date", NodeStyle::new("#FDE68A", "#CA8A04"));
        palette.insert("account", NodeStyle::new("#FBCFE8", "#DB2777"));
        palette.insert("contact", NodeStyle::new("#FFDD57", "#FBBF24"));
        palette.insert("email", NodeStyle::new("#60A5FA", "#2563EB"));
        palette.insert("phone", NodeStyle::new("#34D399", "#10B981"));
        palette.insert("address", NodeStyle::new("#FECACA", "#F87171"));
        palette.alias("phone number", "phone");
        palette.alias("company", "organization");
        palette.alias("property", "address");
        palette
    }
}

impl StylePalette {
    /// Register (or override) a canonical style key.
    pub fn insert(&mut self, key: &str, style: NodeStyle) {
        let canonical = normalize(key);
        self.aliases.insert(canonical.clone(), canonical.clone());
        self.styles.insert(canonical, style);
    }

    /// Route an alternate spelling onto an existing key.
    pub fn alias(&mut self, from: &str, to: &str) {
        self.aliases.insert(normalize(from), normalize(to));
    }

    /// Canonical style key for an arbitrary type string, or "default" when
    /// the type is unknown.
    pub fn classify<'a>(&'a self, entity_type: &str) -> &'a str {
        self.aliases
            .get(&normalize(entity_type))
            .filter(|key| self.styles.contains_key(*key))
            .map(String::as_str)
            .unwrap_or(DEFAULT_TYPE)
    }

    /// Style for an arbitrary type string, falling back for unknown types.
    pub fn style_for(&self, entity_type: &str) -> &NodeStyle {
        self.aliases
            .get(&normalize(entity_type))
            .and_then(|key| self.styles.get(key))
            .unwrap_or(&self.fallback)
    }

    /// Style for a validated entity; anomalous entities get the highlight
    /// treatment regardless of type.
    pub fn style_for_entity(&self, entity: &Entity) -> &NodeStyle {
        if entity.is_anomaly {
            &self.anomaly
        } else {
            self.style_for(&entity.entity_type)
        }
    }

    pub fn fallback(&self) -> &NodeStyle {
        &self.fallback
    }
}

/// Fold casing and separators so "Phone Number", "phone_number" and "PHONE"
/// compare equal.
fn normalize(entity_type: &str) -> String {
    entity_type
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_types_case_insensitive() {
        let palette = StylePalette::default();
        assert_eq!(palette.classify("person"), "person");
        assert_eq!(palette.classify("Person"), "person");
        assert_eq!(palette.classify("PERSON"), "person");
        assert_eq!(palette.classify("Organization"), "organization");
    }

    #[test]
    fn test_separator_insensitive_aliases() {
        let palette = StylePalette::default();
        assert_eq!(palette.classify("Phone Number"), "phone");
        assert_eq!(palette.classify("phone_number"), "phone");
        assert_eq!(palette.classify("phone"), "phone");
    }

    #[test]
    fn test_unknown_type_falls_back() {
        let palette = StylePalette::default();
        assert_eq!(palette.classify("cryptocurrency-wallet"), "default");
        assert_eq!(palette.style_for("cryptocurrency-wallet"), palette.fallback());
        assert_eq!(palette.classify(""), "default");
        assert_eq!(palette.classify("default"), "default");
    }

    #[test]
    fn test_anomaly_overrides_type_style() {
        let palette = StylePalette::default();
        let entity = crate::graph::validate_entity(&json!({
            "id": "e1",
            "label": "x",
            "type": "person",
            "isAnomaly": true
        }));
        assert_eq!(palette.style_for_entity(&entity).border, "#991B1B");
    }

    #[test]
    fn test_insert_overrides_builtin() {
        let mut palette = StylePalette::default();
        palette.insert("person", NodeStyle::new("#000000", "#ffffff"));
        assert_eq!(palette.style_for("Person").background, "#000000");
        // Aliases keep routing to the overridden entry
        assert_eq!(palette.style_for("PERSON").background, "#000000");
    }

    #[test]
    fn test_insert_new_type() {
        let mut palette = StylePalette::default();
        palette.insert("Crypto Wallet", NodeStyle::new("#111111", "#222222"));
        assert_eq!(palette.classify("crypto_wallet"), "cryptowallet");
        assert_eq!(palette.style_for("Crypto Wallet").border, "#222222");
    }
}
