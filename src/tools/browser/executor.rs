//! Browser executor - wraps agent-browser CLI
//!
//! Provides async interface to agent-browser commands.

use std::process::Stdio;
use tokio::process::Command;

use crate::core::{Result, SupaBrowserError, ToolResult};

/// Executor for browser automation via agent-browser CLI
#[derive(Debug, Clone)]
pub struct BrowserExecutor {
    /// Session name for isolation
    session_name: String,
    /// Whether to hide the browser window
    headless: bool,
}

impl BrowserExecutor {
    /// Create a new browser executor
    pub fn new(session_name: impl Into<String>, headless: bool) -> Self {
        Self {
            session_name: session_name.into(),
            headless,
        }
    }

    pub fn session_name(&self) -> &str {
        &self.session_name
    }

    pub fn is_headless(&self) -> bool {
        self.headless
    }

    /// Check if agent-browser is installed
    pub async fn is_available() -> bool {
        Command::new("agent-browser")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Arguments placed before every command
    fn base_args(&self) -> Vec<&str> {
        let mut args = vec!["--session", self.session_name.as_str()];
        if !self.headless {
            args.push("--headed");
        }
        args
    }

    /// Run an agent-browser command
    async fn run_command(&self, args: &[&str]) -> Result<String> {
        tracing::debug!(session = %self.session_name, ?args, "agent-browser");

        let output = Command::new("agent-browser")
            .args(self.base_args())
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SupaBrowserError::AgentBrowserNotFound
                } else {
                    SupaBrowserError::browser(format!("Failed to run agent-browser: {}", e))
                }
            })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(SupaBrowserError::browser(format!(
                "agent-browser command failed: {}",
                stderr.trim()
            )))
        }
    }

    /// Accept only absolute http(s) URLs
    pub fn validate_url(raw: &str) -> Result<url::Url> {
        let parsed = url::Url::parse(raw.trim())
            .map_err(|e| SupaBrowserError::browser(format!("Invalid URL '{}': {}", raw, e)))?;

        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            other => Err(SupaBrowserError::browser(format!(
                "Unsupported URL scheme '{}'",
                other
            ))),
        }
    }

    /// Navigate to a URL and return the interactive snapshot
    pub async fn open(&self, url: &str, wait_for_load: bool) -> Result<ToolResult> {
        let url = Self::validate_url(url)?;
        self.run_command(&["open", url.as_str()]).await?;

        if wait_for_load {
            if let Err(e) = self.run_command(&["wait", "--load", "networkidle"]).await {
                tracing::debug!("Wait for network idle failed: {}", e);
            }
        }

        let snapshot = self.run_command(&["snapshot", "-i"]).await?;

        Ok(ToolResult::success(
            "browser_url",
            format!("Navigated to {}. Page snapshot:\n{}", url, snapshot.trim()),
        ))
    }

    /// Click an element by ref
    pub async fn click(&self, ref_id: &str) -> Result<ToolResult> {
        let ref_id = normalize_ref(ref_id);
        self.run_command(&["click", ref_id.as_str()]).await?;

        let snapshot = self.run_command(&["snapshot", "-i"]).await?;

        Ok(ToolResult::success(
            "browser_click",
            format!("Clicked {}. Updated page:\n{}", ref_id, snapshot.trim()),
        ))
    }

    /// Fill an input field
    pub async fn fill(&self, ref_id: &str, text: &str) -> Result<ToolResult> {
        let ref_id = normalize_ref(ref_id);
        self.run_command(&["fill", ref_id.as_str(), text]).await?;

        Ok(ToolResult::success(
            "browser_fill",
            format!("Filled {} with '{}'", ref_id, text),
        ))
    }

    /// Get text from an element
    pub async fn get_text(&self, ref_id: &str) -> Result<ToolResult> {
        let ref_id = normalize_ref(ref_id);
        let output = self.run_command(&["get", "text", ref_id.as_str()]).await?;

        Ok(ToolResult::success("browser_get_text", output.trim()))
    }

    /// Get page snapshot
    pub async fn snapshot(&self, interactive_only: bool) -> Result<ToolResult> {
        let args: &[&str] = if interactive_only {
            &["snapshot", "-i"]
        } else {
            &["snapshot"]
        };

        let output = self.run_command(args).await?;
        Ok(ToolResult::success("browser_snapshot", output.trim()))
    }

    /// Press a key
    pub async fn press(&self, key: &str) -> Result<ToolResult> {
        self.run_command(&["press", key]).await?;
        Ok(ToolResult::success("browser_press", format!("Pressed {}", key)))
    }

    /// Scroll the page
    pub async fn scroll(&self, direction: &str, pixels: Option<u32>) -> Result<ToolResult> {
        if !matches!(direction, "up" | "down" | "left" | "right") {
            return Ok(ToolResult::failure(
                "browser_scroll",
                format!("Unknown scroll direction '{}'", direction),
            ));
        }

        let px_str = pixels.map(|px| px.to_string());
        let mut args = vec!["scroll", direction];
        if let Some(ref px) = px_str {
            args.push(px.as_str());
        }

        self.run_command(&args).await?;
        Ok(ToolResult::success(
            "browser_scroll",
            format!("Scrolled {}", direction),
        ))
    }

    /// Close the browser
    pub async fn close(&self) -> Result<ToolResult> {
        self.run_command(&["close"]).await?;
        Ok(ToolResult::success("browser_close", "Browser closed"))
    }
}

impl Default for BrowserExecutor {
    fn default() -> Self {
        Self::new("supabrowser", true)
    }
}

/// Snapshot refs are addressed as `@eN`; models often drop the prefix
fn normalize_ref(ref_id: &str) -> String {
    let trimmed = ref_id.trim();
    if trimmed.starts_with('@') {
        trimmed.to_string()
    } else {
        format!("@{}", trimmed)
    }
}
