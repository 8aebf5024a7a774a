//! Browser automation module
//!
//! Wraps agent-browser CLI for web automation.

mod executor;

pub use executor::BrowserExecutor;
