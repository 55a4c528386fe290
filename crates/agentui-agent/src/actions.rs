//! MCP action derivation
//!
//! Turns a component's schema into tool descriptions an agent can present:
//! one action per method, event and attribute. Actions are descriptive only,
//! nothing here executes them.

use crate::MarkerId;
use agentui_catalog::{AttributeSchema, EventSchema, MethodSchema, SchemaEntry};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// What an action does to its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Invoke a method
    Call,
    /// Dispatch an event
    Dispatch,
    /// Set an attribute
    SetAttribute,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Dispatch => "dispatch",
            Self::SetAttribute => "set_attribute",
        }
    }
}

/// One action on one live instance
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct McpAction {
    /// `<kind>:<tag>.<member>@<marker>`, unique per page
    pub name: String,
    pub kind: ActionKind,
    pub tag: String,
    /// Method, event or attribute name
    pub member: String,
    pub target: MarkerId,
    pub description: String,
    /// JSON schema of the arguments
    pub parameters: Value,
}

/// Actions for one instance, methods first, then events, then attributes
pub fn derive_actions(tag: &str, target: MarkerId, schema: &SchemaEntry) -> Vec<McpAction> {
    let methods = schema.methods.iter()
        .map(|m| action(ActionKind::Call, tag, target, &m.name, &m.description, method_parameters(m)));
    let events = schema.events.iter()
        .map(|e| action(ActionKind::Dispatch, tag, target, &e.name, &e.description, event_parameters(e)));
    let attributes = schema.attributes.iter()
        .map(|a| action(ActionKind::SetAttribute, tag, target, &a.name, &a.description, attribute_parameters(a)));

    methods.chain(events).chain(attributes)
        .filter(|a| !a.member.is_empty())
        .collect()
}

fn action(kind: ActionKind, tag: &str, target: MarkerId, member: &str, description: &str, parameters: Value) -> McpAction {
    McpAction {
        name: format!("{}:{}.{}@{}", kind.as_str(), tag, member, target),
        kind,
        tag: tag.to_string(),
        member: member.to_string(),
        target,
        description: description.to_string(),
        parameters,
    }
}

fn method_parameters(method: &MethodSchema) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for param in &method.params {
        if param.name.is_empty() {
            continue;
        }
        let mut schema = type_schema(param.type_name.as_deref());
        describe(&mut schema, &param.description);
        properties.insert(param.name.clone(), schema);
        if !param.type_name.as_deref().is_some_and(is_optional) {
            required.push(Value::String(param.name.clone()));
        }
    }
    object_schema(properties, required)
}

fn event_parameters(event: &EventSchema) -> Value {
    let mut properties = Map::new();
    let detail = match &event.detail {
        Some(Value::String(type_name)) => type_schema(Some(type_name.as_str())),
        Some(shape) => shape.clone(),
        None => json!({}),
    };
    properties.insert("detail".to_string(), detail);
    object_schema(properties, Vec::new())
}

fn attribute_parameters(attribute: &AttributeSchema) -> Value {
    let mut value = type_schema(attribute.type_name.as_deref());
    describe(&mut value, &attribute.description);
    if let (Some(default), Value::Object(map)) = (&attribute.default, &mut value) {
        map.insert("default".to_string(), default.clone());
    }

    let mut properties = Map::new();
    properties.insert("value".to_string(), value);
    object_schema(properties, vec![json!("value")])
}

fn object_schema(properties: Map<String, Value>, required: Vec<Value>) -> Value {
    let mut schema = Map::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".to_string(), Value::Array(required));
    }
    Value::Object(schema)
}

fn describe(schema: &mut Value, description: &str) {
    if let (false, Value::Object(map)) = (description.is_empty(), schema) {
        map.insert("description".to_string(), json!(description));
    }
}

fn is_optional(type_name: &str) -> bool {
    type_name.split('|').any(|t| matches!(t.trim(), "undefined" | "null"))
}

/// JSON schema for a documented type name.
///
/// Unions of quoted literals (`'primary' | 'ghost'`) become string enums.
pub fn type_schema(type_name: Option<&str>) -> Value {
    let Some(type_name) = type_name.map(str::trim).filter(|t| !t.is_empty()) else {
        return json!({ "type": "string" });
    };

    let variants: Vec<&str> = type_name.split('|')
        .map(str::trim)
        .filter(|t| !matches!(*t, "undefined" | "null"))
        .collect();

    let literals: Vec<&str> = variants.iter()
        .filter_map(|v| {
            v.strip_prefix('\'').and_then(|v| v.strip_suffix('\''))
                .or_else(|| v.strip_prefix('"').and_then(|v| v.strip_suffix('"')))
        })
        .collect();
    if !literals.is_empty() && literals.len() == variants.len() {
        return json!({ "type": "string", "enum": literals });
    }

    match variants.as_slice() {
        [single] => json!({ "type": primitive(single) }),
        _ => json!({ "type": "string" }),
    }
}

fn primitive(type_name: &str) -> &'static str {
    match type_name.to_ascii_lowercase().as_str() {
        "boolean" | "bool" => "boolean",
        "number" | "float" => "number",
        "integer" | "int" => "integer",
        "object" => "object",
        t if t.ends_with("[]") || t.starts_with("array") => "array",
        _ => "string",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentui_catalog::ParamSchema;

    fn button_schema() -> SchemaEntry {
        serde_json::from_value(json!({
            "name": "au-button",
            "description": "Clickable button",
            "attributes": [
                {"name": "variant", "type": "'primary' | 'secondary' | 'ghost'", "default": "primary"},
                {"name": "disabled", "type": "boolean", "description": "Disable interaction"}
            ],
            "methods": [
                {"name": "focus", "description": "Focus the button"}
            ],
            "events": [
                {"name": "au-click", "detail": {"type": "object"}}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_one_action_per_member() {
        let actions = derive_actions("au-button", MarkerId::from(3), &button_schema());
        let names: Vec<&str> = actions.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec![
            "call:au-button.focus@3",
            "dispatch:au-button.au-click@3",
            "set_attribute:au-button.variant@3",
            "set_attribute:au-button.disabled@3",
        ]);
        assert!(actions.iter().all(|a| a.target == MarkerId::from(3)));
    }

    #[test]
    fn test_attribute_parameters() {
        let actions = derive_actions("au-button", MarkerId::from(1), &button_schema());
        let variant = &actions[2].parameters;
        assert_eq!(variant["required"], json!(["value"]));
        assert_eq!(variant["properties"]["value"]["enum"], json!(["primary", "secondary", "ghost"]));
        assert_eq!(variant["properties"]["value"]["default"], json!("primary"));

        let disabled = &actions[3].parameters["properties"]["value"];
        assert_eq!(disabled["type"], json!("boolean"));
        assert_eq!(disabled["description"], json!("Disable interaction"));
    }

    #[test]
    fn test_method_parameters() {
        let method = MethodSchema {
            name: "goTo".into(),
            description: String::new(),
            params: vec![
                ParamSchema { name: "page".into(), type_name: Some("number".into()), description: "Page index".into() },
                ParamSchema { name: "smooth".into(), type_name: Some("boolean | undefined".into()), description: String::new() },
            ],
        };
        let params = method_parameters(&method);
        assert_eq!(params["properties"]["page"]["type"], json!("number"));
        assert_eq!(params["properties"]["smooth"]["type"], json!("boolean"));
        assert_eq!(params["required"], json!(["page"]));
    }

    #[test]
    fn test_type_schema_fallbacks() {
        assert_eq!(type_schema(None), json!({"type": "string"}));
        assert_eq!(type_schema(Some("string | number")), json!({"type": "string"}));
        assert_eq!(type_schema(Some("Item[]")), json!({"type": "array"}));
    }

    #[test]
    fn test_serializes_kind_in_snake_case() {
        let actions = derive_actions("au-button", MarkerId::from(1), &button_schema());
        let value = serde_json::to_value(&actions[2]).unwrap();
        assert_eq!(value["kind"], json!("set_attribute"));
        assert_eq!(value["target"], json!(1));
    }
}
