//! Configuration management for SupaBrowser
//!
//! Supports environment variables, a `.env` file, config files, and runtime
//! overrides. The API credential is read from the environment but never
//! written to the config file or back into the environment.
//!
//! Config file location: ~/.config/supabrowser/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{Result, SupaBrowserError};
use crate::core::types::Credential;
use crate::llm::ModelId;

/// Environment variable holding the Anthropic API key
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Main configuration for SupaBrowser
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Anthropic endpoint configuration
    #[serde(default)]
    pub anthropic: AnthropicConfig,
    /// Agent behavior configuration
    #[serde(default)]
    pub agent: AgentConfig,
    /// Browser driver configuration
    #[serde(default)]
    pub browser: BrowserConfig,
    /// Web form server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Anthropic API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnthropicConfig {
    /// Base URL (default: https://api.anthropic.com)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum tokens per model response
    pub max_tokens: u32,
    /// Sampling temperature for planning calls
    pub temperature: f32,
}

/// Agent behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Default model identifier
    /// Default: claude-3-opus-20240229
    pub model: String,
    /// Maximum planning steps before the agent gives up
    /// Default: 15
    pub max_steps: usize,
    /// Whether to show debug output
    pub debug: bool,
}

/// Browser automation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Session name for agent-browser
    pub session_name: String,
    /// Whether to hide the browser window
    pub headless: bool,
}

/// Web form server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (default: 127.0.0.1)
    pub host: String,
    /// Port number (default: 7860)
    pub port: u16,
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(default)
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            base_url: env::var("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|_| "https://api.anthropic.com".to_string()),
            timeout_secs: 120,
            max_tokens: 4096,
            temperature: 0.0,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: env::var("SUPABROWSER_MODEL")
                .unwrap_or_else(|_| ModelId::default().as_str().to_string()),
            max_steps: env::var("SUPABROWSER_MAX_STEPS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
            debug: env_flag("SUPABROWSER_DEBUG", false),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            session_name: env::var("SUPABROWSER_BROWSER_SESSION")
                .unwrap_or_else(|_| "supabrowser".to_string()),
            headless: env_flag("SUPABROWSER_HEADLESS", true),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: env::var("SUPABROWSER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("SUPABROWSER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(7860),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("supabrowser")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    /// Priority: CLI args > config file > env vars > defaults
    pub fn load() -> Self {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        let path = Self::config_file();
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from_path(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SupaBrowserError::config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SupaBrowserError::config(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| SupaBrowserError::config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to the default file
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file();
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| {
                    SupaBrowserError::config(format!("Failed to create config dir: {}", e))
                })?;
            }
        }

        fs::write(path, self.to_toml()?)
            .map_err(|e| SupaBrowserError::config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Serialize to pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| SupaBrowserError::config(format!("Failed to serialize config: {}", e)))
    }

    /// The configured default model
    pub fn default_model(&self) -> Result<ModelId> {
        self.agent.model.parse()
    }

    /// Credential from the environment, blank when unset
    pub fn credential_from_env() -> Credential {
        Credential::new(env::var(API_KEY_ENV).unwrap_or_default())
    }

    /// Address the web form binds to
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// URL a local browser can open to reach the form
    pub fn server_url(&self) -> String {
        let host = match self.server.host.as_str() {
            "0.0.0.0" | "::" => "127.0.0.1",
            other => other,
        };
        format!("http://{}:{}/", host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.anthropic.timeout_secs, 120);
        assert_eq!(config.anthropic.max_tokens, 4096);
        assert_eq!(config.anthropic.temperature, 0.0);
        assert!(!config.browser.session_name.is_empty());
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.agent.model = "claude-3-haiku-20240307".to_string();
        config.agent.max_steps = 7;
        config.server.port = 9000;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.agent.model, "claude-3-haiku-20240307");
        assert_eq!(loaded.agent.max_steps, 7);
        assert_eq!(loaded.server.port, 9000);
        assert_eq!(loaded.default_model().unwrap(), ModelId::Claude3Haiku);
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server]\nhost = \"0.0.0.0\"\nport = 8080\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.server_url(), "http://127.0.0.1:8080/");
        assert_eq!(config.anthropic.max_tokens, 4096);
    }

    #[test]
    fn test_partial_section_keeps_other_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[agent]\nmodel = \"claude-3-haiku-20240307\"\n\n[anthropic]\ntimeout_secs = 30\n",
        )
        .unwrap();

        let config = Config::load_from_path(&path).unwrap();
        let defaults = Config::default();
        assert_eq!(config.default_model().unwrap(), ModelId::Claude3Haiku);
        assert_eq!(config.agent.max_steps, defaults.agent.max_steps);
        assert_eq!(config.anthropic.timeout_secs, 30);
        assert_eq!(config.anthropic.max_tokens, 4096);
        assert_eq!(config.anthropic.base_url, defaults.anthropic.base_url);
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from_path(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_config_serialization_has_no_credential() {
        let toml_str = Config::default().to_toml().unwrap();
        assert!(toml_str.contains("max_steps"));
        assert!(!toml_str.contains("api_key"));
    }

    #[test]
    fn test_config_dir() {
        let dir = Config::config_dir();
        assert!(dir.to_string_lossy().contains("supabrowser"));
    }
}
