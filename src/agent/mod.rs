//! Agent module - the browser agent behind the task runner
//!
//! Contains the agent traits, the structured run history, and the
//! Anthropic-backed implementation.

pub mod browser_agent;
pub mod factory;
pub mod history;
pub mod loop_state;
pub mod traits;

pub use browser_agent::BrowserUseAgent;
pub use factory::AnthropicAgentFactory;
pub use history::{ActionResult, AgentHistory};
pub use loop_state::AgentLoopState;
pub use traits::{AgentFactory, BrowserAgent};
