//! Task module - single-shot task execution shared by the console and the web form

pub mod runner;

pub use runner::{render_outcome, TaskRequest, TaskRunner, MISSING_API_KEY};
