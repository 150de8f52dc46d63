//! OpenAI-shaped tool definitions

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A function exposed by a tool server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON schema of the arguments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `{"type": "function", "function": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type", default = "default_tool_type")]
    pub kind: String,
    pub function: FunctionDefinition,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_tool_type() -> String {
    "function".to_string()
}

impl ToolDefinition {
    pub fn function(name: impl Into<String>) -> Self {
        Self {
            kind: default_tool_type(),
            function: FunctionDefinition {
                name: name.into(),
                description: None,
                parameters: None,
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }

    /// Parse a JSON array of tool definitions
    pub fn parse_list(text: &str) -> serde_json::Result<Vec<Self>> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_fields_round_trip() {
        let text = r#"[{"type":"function","function":{"name":"read_file","description":"Read","parameters":{"type":"object"},"strict":true},"cache":"x"}]"#;
        let tools = ToolDefinition::parse_list(text).unwrap();
        assert_eq!(tools[0].name(), "read_file");
        assert_eq!(tools[0].function.extra["strict"], Value::Bool(true));

        let json = serde_json::to_value(&tools[0]).unwrap();
        assert_eq!(json["cache"], "x");
        assert_eq!(json["function"]["strict"], true);
    }

    #[test]
    fn test_type_defaults_to_function() {
        let tools = ToolDefinition::parse_list(r#"[{"function":{"name":"f"}}]"#).unwrap();
        assert_eq!(tools[0].kind, "function");
    }
}
