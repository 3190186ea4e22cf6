use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::template::ItemTemplate;

/// A property value attached to an item (`damage: 5`, `light: "bright"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// A 64-bit signed integer value.
    Integer(i64),
    /// A 64-bit floating-point value.
    Float(f64),
    /// A boolean value.
    Boolean(bool),
    /// A text value.
    Text(String),
}

impl PropertyValue {
    /// Numeric view of the value, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// An item instance.
///
/// At any moment an item lives in exactly one place: a scene's item list or
/// the player's inventory. Moving it always means removing it from one and
/// pushing it into the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Display name, also the inventory key.
    pub name: String,
    /// Description, possibly carrying a generation flourish.
    pub description: String,
    /// Free-form properties copied from the template.
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
}

impl Item {
    /// Create an item with no properties.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Instantiate an item from its template.
    pub fn from_template(template: &ItemTemplate) -> Self {
        Self {
            name: template.name.clone(),
            description: template.description.clone(),
            properties: template.properties.clone(),
        }
    }

    /// Add a property.
    pub fn with_property(mut self, key: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Look up a property.
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Case-insensitive name comparison.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_properties_deserialize() {
        let item: Item = serde_json::from_str(
            r#"{"name":"Sword","description":"Sharp.","properties":{"damage":5,"weight":2.5,"cursed":false,"rune":"ash"}}"#,
        )
        .unwrap();
        assert_eq!(item.property("damage"), Some(&PropertyValue::Integer(5)));
        assert_eq!(item.property("weight"), Some(&PropertyValue::Float(2.5)));
        assert_eq!(item.property("cursed"), Some(&PropertyValue::Boolean(false)));
        assert_eq!(
            item.property("rune"),
            Some(&PropertyValue::Text("ash".to_string()))
        );
    }

    #[test]
    fn missing_properties_default_to_empty() {
        let item: Item = serde_json::from_str(r#"{"name":"Map","description":"Old."}"#).unwrap();
        assert!(item.properties.is_empty());
    }

    #[test]
    fn name_match_ignores_case() {
        let item = Item::new("Silver Key", "Small.");
        assert!(item.is_named("silver key"));
        assert!(item.is_named(" SILVER KEY "));
        assert!(!item.is_named("key"));
    }

    #[test]
    fn name_match_folds_non_ascii() {
        let item = Item::new("Épée", "Thin.");
        assert!(item.is_named("épée"));
        assert!(item.is_named("ÉPÉE"));
        assert!(!item.is_named("epee"));
    }

    #[test]
    fn numeric_view() {
        assert_eq!(PropertyValue::Integer(8).as_number(), Some(8.0));
        assert_eq!(PropertyValue::Text("x".into()).as_number(), None);
        assert_eq!(PropertyValue::Integer(8).to_string(), "8");
    }
}
