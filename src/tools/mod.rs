//! Tools module - Tool implementations for the agent
//!
//! Contains browser automation and the tool registry.

pub mod browser;
pub mod registry;

pub use registry::{ToolRegistry, DONE_TOOL};
