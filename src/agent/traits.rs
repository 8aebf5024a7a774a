//! Agent traits
//!
//! The task runner only sees these two seams: a factory that builds an agent
//! from one configuration, and the agent's single `run` operation.

use async_trait::async_trait;

use crate::agent::history::AgentHistory;
use crate::core::{AgentConfiguration, Result};

/// An agent built for exactly one task
#[async_trait]
pub trait BrowserAgent: Send {
    /// Plan and execute until the task is done or the agent gives up
    async fn run(&mut self) -> Result<AgentHistory>;
}

/// Builds agents from per-invocation configuration
pub trait AgentFactory: Send + Sync {
    /// Construct an agent; the configuration is consumed
    fn create(&self, config: AgentConfiguration) -> Result<Box<dyn BrowserAgent>>;

    /// Name used in logs
    fn name(&self) -> &str {
        "agent"
    }
}
