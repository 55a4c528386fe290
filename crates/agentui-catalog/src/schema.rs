//! Schema entries
//!
//! Every field defaults when absent so partially documented components still
//! load.

use serde::{Deserialize, Serialize};

/// Schema of one component, as published in the describe catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaEntry {
    pub name: String,
    pub description: String,
    pub attributes: Vec<AttributeSchema>,
    pub properties: Vec<PropertySchema>,
    pub methods: Vec<MethodSchema>,
    pub events: Vec<EventSchema>,
    pub slots: Vec<SlotSchema>,
}

impl SchemaEntry {
    /// Entry carrying only what the registry knows about a tag
    pub fn minimal<'a>(tag: &str, observed_attributes: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            name: tag.to_string(),
            attributes: observed_attributes
                .into_iter()
                .map(|name| AttributeSchema {
                    name: name.to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    /// First line of the description
    pub fn summary(&self) -> &str {
        self.description.lines().next().unwrap_or("").trim()
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// Attribute declaration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeSchema {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    pub description: String,
}

/// Property declaration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertySchema {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    pub description: String,
}

/// Method declaration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodSchema {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSchema>,
}

/// Method parameter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamSchema {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    pub description: String,
}

/// Event declaration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSchema {
    pub name: String,
    pub description: String,
    /// Shape of `event.detail`, free-form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

/// Slot declaration (empty name is the default slot)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotSchema {
    pub name: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_entry_deserializes() {
        let entry: SchemaEntry = serde_json::from_str(r#"{
            "description": "A button.\nSecond line.",
            "attributes": [{"name": "variant", "type": "string", "default": "primary"}]
        }"#).unwrap();

        assert_eq!(entry.summary(), "A button.");
        let variant = entry.attribute("variant").unwrap();
        assert_eq!(variant.type_name.as_deref(), Some("string"));
        assert_eq!(variant.default, Some(serde_json::json!("primary")));
        assert!(entry.events.is_empty());
    }

    #[test]
    fn test_minimal_entry() {
        let entry = SchemaEntry::minimal("au-badge", ["tone", "size"]);
        assert_eq!(entry.name, "au-badge");
        assert_eq!(entry.attributes.len(), 2);
        assert_eq!(entry.summary(), "");
    }
}
