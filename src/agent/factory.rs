//! Agent factory backed by Anthropic and agent-browser

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::agent::browser_agent::BrowserUseAgent;
use crate::agent::traits::{AgentFactory, BrowserAgent};
use crate::core::{AgentConfiguration, Config, Result};
use crate::llm::AnthropicClient;
use crate::tools::browser::BrowserExecutor;
use crate::tools::ToolRegistry;

/// Builds [`BrowserUseAgent`]s that plan with Anthropic models
///
/// Each agent gets its own model client (carrying its own credential) and
/// its own browser session, so agents built for concurrent requests share
/// nothing.
pub struct AnthropicAgentFactory {
    config: Config,
    sessions: AtomicU64,
}

impl AnthropicAgentFactory {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sessions: AtomicU64::new(0),
        }
    }

    fn next_session_name(&self) -> String {
        let n = self.sessions.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}-{}", self.config.browser.session_name, std::process::id(), n)
    }
}

impl AgentFactory for AnthropicAgentFactory {
    fn create(&self, config: AgentConfiguration) -> Result<Box<dyn BrowserAgent>> {
        let llm = AnthropicClient::from_config(&self.config, config.credential)?;
        let executor = BrowserExecutor::new(self.next_session_name(), config.headless);

        tracing::debug!(
            session = executor.session_name(),
            headless = config.headless,
            "Creating browser agent"
        );

        let agent = BrowserUseAgent::new(
            config.task,
            config.model,
            Arc::new(llm),
            ToolRegistry::with_browser(executor),
        )
        .with_max_steps(self.config.agent.max_steps)
        .with_temperature(self.config.anthropic.temperature);

        Ok(Box::new(agent))
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}
