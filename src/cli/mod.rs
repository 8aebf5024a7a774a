//! CLI module - console commands behind the binary's subcommands

pub mod commands;

pub use commands::{
    config_text, console_request, models_text, render_trace, run_task, DEFAULT_TASK,
};
