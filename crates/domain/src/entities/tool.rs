//! Tool definitions and calls
//!
//! Providers receive these with chat requests. They are carried on the
//! request envelope; how (or whether) they reach the model is up to the
//! provider.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A parameter accepted by a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParamDefinition {
    /// JSON type name of the parameter
    pub param_type: String,
    /// What the parameter means
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the caller must supply it
    #[serde(default = "default_required")]
    pub required: bool,
    /// Value used when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

const fn default_required() -> bool {
    true
}

/// A tool the model may call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name
    pub tool_name: String,
    /// What the tool does
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameters by name
    #[serde(default)]
    pub parameters: BTreeMap<String, ToolParamDefinition>,
}

impl ToolDefinition {
    /// Tool with a name and no parameters
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            description: None,
            parameters: BTreeMap::new(),
        }
    }
}

/// A call the model made to a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Correlates the call with its response
    pub call_id: String,
    /// Called tool
    pub tool_name: String,
    /// Call arguments
    #[serde(default)]
    pub arguments: Value,
}

/// Whether the model must, may, or must not call tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolChoice {
    /// Model decides
    #[default]
    Auto,
    /// Model must call a tool
    Required,
    /// Model must not call tools
    None,
}

/// How tool definitions are rendered into prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolPromptFormat {
    /// JSON object per call
    Json,
    /// `<function=...>` tags
    FunctionTag,
    /// Python list of calls
    PythonList,
}

/// Tool settings attached to a chat request
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Tool choice
    #[serde(default)]
    pub tool_choice: ToolChoice,
    /// Prompt format for tool definitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_prompt_format: Option<ToolPromptFormat>,
}
