//! SupaBrowser - natural-language browser tasks
//!
//! Hands a task description to an LLM browser agent backed by Anthropic
//! Claude and shows what it did, either in the console or through a small
//! web form.
//!
//! # Architecture
//!
//! - **Core**: Shared types, configuration, and error handling
//! - **LLM**: Model catalogue and the Anthropic Messages client
//! - **Tools**: Browser tools driven through the agent-browser CLI
//! - **Agent**: The browsing agent, its history, and the factory seam
//! - **Task**: Credential validation and one-shot task runs
//! - **Present**: Console panels and the text trace parser
//! - **Web**: The HTML form and JSON API
//! - **CLI**: Console subcommands
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use supabrowser::{AnthropicAgentFactory, Config, TaskRequest, TaskRunner};
//!
//! #[tokio::main]
//! async fn main() {
//!     let runner = TaskRunner::new(Arc::new(AnthropicAgentFactory::new(Config::load())));
//!     let request = TaskRequest::new("Find the latest Rust release", "sk-ant-...");
//!
//!     println!("{}", runner.run_to_text(request).await);
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod core;
pub mod llm;
pub mod present;
pub mod task;
pub mod tools;
pub mod web;

// Re-export commonly used items
pub use agent::{AgentFactory, AgentHistory, AnthropicAgentFactory, BrowserAgent};
pub use core::{AgentConfiguration, Config, Credential, ErrorKind, Result, SupaBrowserError};
pub use llm::ModelId;
pub use present::ConsolePresenter;
pub use task::{TaskRequest, TaskRunner};
