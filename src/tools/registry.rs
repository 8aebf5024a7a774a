//! Tool registry - manages and dispatches tool calls
//!
//! Central hub for registering tools and routing tool calls to handlers.

use std::collections::HashMap;

use crate::core::{Result, ToolCall, ToolCategory, ToolDefinition, ToolResult};
use crate::tools::browser::BrowserExecutor;

/// Name of the pseudo-tool the model calls to finish a task
pub const DONE_TOOL: &str = "done";

/// Registry of available tools
pub struct ToolRegistry {
    /// Tool definitions in registration order
    definitions: Vec<ToolDefinition>,
    /// Tool categories indexed by name
    categories: HashMap<String, ToolCategory>,
    /// Browser executor instance
    browser: Option<BrowserExecutor>,
}

impl ToolRegistry {
    /// Create a registry with only the control tools
    pub fn new() -> Self {
        let mut registry = Self {
            definitions: Vec::new(),
            categories: HashMap::new(),
            browser: None,
        };

        registry.register_control_tools();
        registry
    }

    /// Create a registry with browser tools enabled
    pub fn with_browser(executor: BrowserExecutor) -> Self {
        let mut registry = Self::new();
        registry.browser = Some(executor);
        registry.register_browser_tools();
        registry
    }

    fn register_control_tools(&mut self) {
        self.register(
            ToolDefinition::new(
                DONE_TOOL,
                "Finish the task and report the final result to the user",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "text": {
                            "type": "string",
                            "description": "The final answer or summary of what was accomplished"
                        }
                    },
                    "required": ["text"]
                }),
            ),
            ToolCategory::Control,
        );
    }

    /// Register browser automation tools
    fn register_browser_tools(&mut self) {
        self.register(
            ToolDefinition::new(
                "browser_url",
                "Navigate to a URL and get the page structure for analysis",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "url": {
                            "type": "string",
                            "description": "Absolute http(s) URL to navigate to"
                        },
                        "wait_for_load": {
                            "type": "boolean",
                            "description": "Wait for network idle before snapshot"
                        }
                    },
                    "required": ["url"]
                }),
            ),
            ToolCategory::Browser,
        );

        self.register(
            ToolDefinition::new(
                "browser_click",
                "Click an element on the page by its ref from snapshot",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "ref": {
                            "type": "string",
                            "description": "Element ref from snapshot (e.g., e1, e2)"
                        }
                    },
                    "required": ["ref"]
                }),
            ),
            ToolCategory::Browser,
        );

        self.register(
            ToolDefinition::new(
                "browser_fill",
                "Fill text into an input field by its ref",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "ref": {
                            "type": "string",
                            "description": "Element ref from snapshot"
                        },
                        "text": {
                            "type": "string",
                            "description": "Text to enter"
                        }
                    },
                    "required": ["ref", "text"]
                }),
            ),
            ToolCategory::Browser,
        );

        self.register(
            ToolDefinition::new(
                "browser_get_text",
                "Get text content from an element",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "ref": {
                            "type": "string",
                            "description": "Element ref from snapshot"
                        }
                    },
                    "required": ["ref"]
                }),
            ),
            ToolCategory::Browser,
        );

        self.register(
            ToolDefinition::new(
                "browser_snapshot",
                "Get current page accessibility tree with interactive element refs",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "interactive_only": {
                            "type": "boolean",
                            "description": "Only return interactive elements (buttons, links, inputs)"
                        }
                    }
                }),
            ),
            ToolCategory::Browser,
        );

        self.register(
            ToolDefinition::new(
                "browser_press",
                "Press a keyboard key, e.g. Enter or Tab",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "key": {
                            "type": "string",
                            "description": "Key name"
                        }
                    },
                    "required": ["key"]
                }),
            ),
            ToolCategory::Browser,
        );

        self.register(
            ToolDefinition::new(
                "browser_scroll",
                "Scroll the page",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "direction": {
                            "type": "string",
                            "enum": ["up", "down", "left", "right"]
                        },
                        "pixels": {
                            "type": "integer",
                            "description": "Distance in pixels (optional)"
                        }
                    },
                    "required": ["direction"]
                }),
            ),
            ToolCategory::Browser,
        );

        self.register(
            ToolDefinition::new(
                "browser_close",
                "Close the browser session",
                serde_json::json!({
                    "type": "object",
                    "properties": {}
                }),
            ),
            ToolCategory::Browser,
        );
    }

    /// Register a tool definition, replacing any previous one with the same name
    pub fn register(&mut self, definition: ToolDefinition, category: ToolCategory) {
        let name = definition.name.clone();
        self.definitions.retain(|d| d.name != name);
        self.definitions.push(definition);
        self.categories.insert(name, category);
    }

    /// Get all tool definitions
    pub fn all_definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    /// Get the category of a tool
    pub fn category(&self, name: &str) -> Option<ToolCategory> {
        self.categories.get(name).copied()
    }

    /// Check if browser is enabled
    pub fn has_browser(&self) -> bool {
        self.browser.is_some()
    }

    /// Get the browser executor
    pub fn browser_executor(&self) -> Option<&BrowserExecutor> {
        self.browser.as_ref()
    }

    /// Execute a tool call
    ///
    /// Control tools are handled by the agent loop and never reach here.
    pub async fn execute(&self, tool_call: &ToolCall) -> Result<ToolResult> {
        match self.category(&tool_call.name) {
            Some(ToolCategory::Browser) => self.execute_browser_tool(tool_call).await,
            Some(ToolCategory::Control) => Ok(ToolResult::failure(
                &tool_call.name,
                format!("{} is handled by the agent loop", tool_call.name),
            )),
            None => Ok(ToolResult::failure(
                &tool_call.name,
                format!("Unknown tool: {}", tool_call.name),
            )),
        }
    }

    /// Execute a browser tool
    async fn execute_browser_tool(&self, tool_call: &ToolCall) -> Result<ToolResult> {
        let browser = match &self.browser {
            Some(b) => b,
            None => {
                return Ok(ToolResult::failure(
                    &tool_call.name,
                    "Browser tools are not enabled",
                ))
            }
        };

        match tool_call.name.as_str() {
            "browser_url" => {
                let url = tool_call.get_string("url").unwrap_or_default();
                let wait = tool_call.get_bool("wait_for_load").unwrap_or(true);
                browser.open(&url, wait).await
            }
            "browser_click" => {
                let ref_id = tool_call.get_string("ref").unwrap_or_default();
                browser.click(&ref_id).await
            }
            "browser_fill" => {
                let ref_id = tool_call.get_string("ref").unwrap_or_default();
                let text = tool_call.get_string("text").unwrap_or_default();
                browser.fill(&ref_id, &text).await
            }
            "browser_get_text" => {
                let ref_id = tool_call.get_string("ref").unwrap_or_default();
                browser.get_text(&ref_id).await
            }
            "browser_snapshot" => {
                let interactive = tool_call.get_bool("interactive_only").unwrap_or(true);
                browser.snapshot(interactive).await
            }
            "browser_press" => {
                let key = tool_call.get_string("key").unwrap_or_default();
                browser.press(&key).await
            }
            "browser_scroll" => {
                let direction = tool_call
                    .get_string("direction")
                    .unwrap_or_else(|| "down".to_string());
                browser.scroll(&direction, tool_call.get_u32("pixels")).await
            }
            "browser_close" => browser.close().await,
            _ => Ok(ToolResult::failure(
                &tool_call.name,
                format!("Unknown browser tool: {}", tool_call.name),
            )),
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
