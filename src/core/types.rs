//! Shared types used across SupaBrowser modules
//!
//! Contains message structures, tool definitions, the credential wrapper and
//! the per-invocation agent configuration.

use serde::{Deserialize, Serialize};

use crate::llm::ModelId;

/// A message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender (user, assistant, system)
    pub role: String,
    /// Content of the message
    pub content: String,
}

impl Message {
    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn is_system(&self) -> bool {
        self.role == "system"
    }
}

/// A tool call made by the LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to invoke
    pub name: String,
    /// JSON arguments for the tool
    pub arguments: serde_json::Value,
}

impl ToolCall {
    /// Create a new tool call
    pub fn new(name: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Get a string argument by key
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.arguments
            .get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }

    /// Get a boolean argument by key
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.arguments.get(key).and_then(|v| v.as_bool())
    }

    /// Get an unsigned integer argument by key
    pub fn get_u32(&self, key: &str) -> Option<u32> {
        self.arguments
            .get(key)
            .and_then(|v| v.as_u64())
            .and_then(|v| u32::try_from(v).ok())
    }
}

/// Definition of a tool that can be called by the LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Name of the tool
    pub name: String,
    /// Description of what the tool does
    pub description: String,
    /// JSON Schema for the parameters
    pub input_schema: serde_json::Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Result of executing a tool
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// Name of the tool that was executed
    pub tool_name: String,
    /// Whether the execution was successful
    pub success: bool,
    /// Output from the tool
    pub output: String,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(tool_name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            output: output.into(),
        }
    }

    /// Create a failed result
    pub fn failure(tool_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            output: error.into(),
        }
    }
}

/// Category of tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolCategory {
    /// Web browsing and automation
    Browser,
    /// Loop control (finishing the task)
    Control,
}

impl std::fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolCategory::Browser => write!(f, "browser"),
            ToolCategory::Control => write!(f, "control"),
        }
    }
}

/// API credential for the model endpoint
///
/// Surrounding whitespace is dropped when the credential is built, so the
/// stored secret is what gets sent. `Debug` never prints the secret.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        let trimmed = secret.trim();
        if trimmed.len() == secret.len() {
            Self(secret)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    /// The secret, for request headers only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_blank() {
            write!(f, "Credential(<blank>)")
        } else {
            write!(f, "Credential(<redacted>)")
        }
    }
}

impl From<&str> for Credential {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Credential {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Everything needed to construct one agent for one task
///
/// Built once per invocation and moved into the agent factory.
#[derive(Debug, Clone)]
pub struct AgentConfiguration {
    /// Natural-language task description
    pub task: String,
    /// Model the agent plans with
    pub model: ModelId,
    /// Credential for the model endpoint
    pub credential: Credential,
    /// Hide the browser window
    pub headless: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("sk-ant-secret");
        let debug = format!("{:?}", credential);
        assert!(!debug.contains("sk-ant-secret"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_credential_blank() {
        assert!(Credential::new("").is_blank());
        assert!(Credential::new("  \t\n").is_blank());
        assert!(!Credential::new("sk-ant-valid").is_blank());
    }

    #[test]
    fn test_credential_trimmed_once() {
        let credential = Credential::new(" sk-ant-valid\n");
        assert_eq!(credential.expose(), "sk-ant-valid");
        assert_eq!(credential, Credential::new("sk-ant-valid"));
        assert_eq!(Credential::from(String::from("\t")), Credential::default());
    }

    #[test]
    fn test_tool_call_arguments() {
        let call = ToolCall::new(
            "browser_scroll",
            serde_json::json!({"direction": "down", "pixels": 400, "flag": true}),
        );
        assert_eq!(call.get_string("direction").as_deref(), Some("down"));
        assert_eq!(call.get_u32("pixels"), Some(400));
        assert_eq!(call.get_bool("flag"), Some(true));
        assert!(call.get_string("missing").is_none());
    }
}
