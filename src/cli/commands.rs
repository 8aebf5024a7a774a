//! CLI commands
//!
//! Each subcommand of the binary maps to one function here so the console
//! pipeline can be driven with any writer.

use std::io::Write;

use crate::agent::AgentHistory;
use crate::core::{Config, Credential, Result};
use crate::llm::{get_model_presets, ModelId};
use crate::present::{ConsolePresenter, MarkerTraceParser};
use crate::task::{TaskRequest, TaskRunner};

/// Task used when `run` is given none
pub const DEFAULT_TASK: &str =
    "Find the founders of browser-use and draft them a short personalized message";

/// Build the request for a console run
///
/// The credential is checked before the model name, and a missing task falls
/// back to [`DEFAULT_TASK`].
pub fn console_request(
    task: Option<String>,
    credential: Credential,
    model: &str,
    headless: bool,
) -> Result<TaskRequest> {
    let task = task.unwrap_or_else(|| DEFAULT_TASK.to_string());
    let request = TaskRequest::new(task, credential).with_headless(headless);
    request.validate()?;

    let model: ModelId = model.trim().parse()?;
    Ok(request.with_model(model))
}

/// Run one task and print its steps followed by the result
///
/// Validation and agent errors are returned to the caller untouched.
pub async fn run_task<W: Write>(
    runner: &TaskRunner,
    request: TaskRequest,
    presenter: &mut ConsolePresenter<W>,
) -> Result<AgentHistory> {
    let history = runner.run(request).await?;

    presenter.present_history(&history)?;
    presenter.present_result(&history)?;

    Ok(history)
}

/// Print panels for a textual trace
///
/// Returns the number of steps found.
pub fn render_trace<W: Write>(trace: &str, presenter: &mut ConsolePresenter<W>) -> Result<usize> {
    let steps = presenter.present_trace(trace, &MarkerTraceParser)?;
    if steps == 0 {
        tracing::debug!("No step results found in trace");
    }
    Ok(steps)
}

/// Supported models, default marked with `*`
pub fn models_text(config: &Config) -> String {
    let default = config.default_model().ok();

    get_model_presets()
        .iter()
        .map(|p| {
            let mark = if Some(p.model) == default { "*" } else { " " };
            format!(
                "{} {:<26} {:<16} {}",
                mark,
                p.model.as_str(),
                p.display_name,
                p.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Effective configuration, optionally written to disk
///
/// When `write` is set, the path written to is appended as a comment line.
pub fn config_text(config: &Config, write: bool) -> Result<String> {
    let mut text = config.to_toml()?;

    if write {
        let path = config.save()?;
        text.push_str(&format!("\n# Saved to {}\n", path.display()));
    }

    Ok(text)
}
