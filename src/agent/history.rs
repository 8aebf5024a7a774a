//! Agent run history
//!
//! The structured result of one agent run: an ordered list of step records
//! plus the raw model output behind each step.

use serde::{Deserialize, Serialize};

/// Outcome of one agent step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    /// Whether this step finished the task
    pub is_done: bool,
    /// Text the step produced for the user or for later steps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_content: Option<String>,
    /// Failure message if the step's action failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Whether later planning calls should see this step
    pub include_in_memory: bool,
}

impl ActionResult {
    /// A successful intermediate step
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            is_done: false,
            extracted_content: Some(content.into()),
            error: None,
            include_in_memory: true,
        }
    }

    /// A failed intermediate step
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            is_done: false,
            extracted_content: None,
            error: Some(error.into()),
            include_in_memory: true,
        }
    }

    /// The final step
    pub fn done(content: impl Into<String>) -> Self {
        Self {
            is_done: true,
            extracted_content: Some(content.into()),
            error: None,
            include_in_memory: false,
        }
    }

    /// Render in the informal `ActionResult(...)` text form
    pub fn trace(&self) -> String {
        format!(
            "ActionResult(is_done={}, extracted_content={}, error={}, include_in_memory={})",
            py_bool(self.is_done),
            py_str(self.extracted_content.as_deref()),
            py_str(self.error.as_deref()),
            py_bool(self.include_in_memory)
        )
    }
}

fn py_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn py_str(value: Option<&str>) -> String {
    match value {
        Some(s) => format!("'{}'", s),
        None => "None".to_string(),
    }
}

/// Everything an agent run produced
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentHistory {
    /// Step records in execution order
    pub all_results: Vec<ActionResult>,
    /// Raw model output for each planning call
    #[serde(default)]
    pub all_model_outputs: Vec<serde_json::Value>,
}

impl AgentHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a plain string result as a single finished step
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            all_results: vec![ActionResult::done(text)],
            all_model_outputs: Vec::new(),
        }
    }

    pub fn push(&mut self, result: ActionResult) {
        self.all_results.push(result);
    }

    pub fn push_model_output(&mut self, output: serde_json::Value) {
        self.all_model_outputs.push(output);
    }

    pub fn len(&self) -> usize {
        self.all_results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_results.is_empty()
    }

    /// Whether the last step finished the task
    pub fn is_done(&self) -> bool {
        self.all_results.last().map(|r| r.is_done).unwrap_or(false)
    }

    /// Content of the final step, if the agent finished
    pub fn final_result(&self) -> Option<&str> {
        self.all_results
            .last()
            .filter(|r| r.is_done)
            .and_then(|r| r.extracted_content.as_deref())
    }

    /// All step errors in order
    pub fn errors(&self) -> Vec<&str> {
        self.all_results
            .iter()
            .filter_map(|r| r.error.as_deref())
            .collect()
    }

    /// All extracted contents in order
    pub fn extracted_contents(&self) -> Vec<&str> {
        self.all_results
            .iter()
            .filter_map(|r| r.extracted_content.as_deref())
            .collect()
    }

    /// The informal text form of the whole history
    pub fn trace(&self) -> String {
        let results: Vec<String> = self.all_results.iter().map(ActionResult::trace).collect();
        let outputs: Vec<String> = self
            .all_model_outputs
            .iter()
            .map(|o| o.to_string())
            .collect();

        format!(
            "AgentHistoryList(all_results=[{}], all_model_outputs=[{}])",
            results.join(", "),
            outputs.join(", ")
        )
    }
}

impl std::fmt::Display for AgentHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.final_result() {
            Some(result) => f.write_str(result),
            None => f.write_str(&self.trace()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_result_requires_done() {
        let mut history = AgentHistory::new();
        history.push(ActionResult::content("Navigated to example.com"));
        assert!(!history.is_done());
        assert!(history.final_result().is_none());

        history.push(ActionResult::done("Found it"));
        assert!(history.is_done());
        assert_eq!(history.final_result(), Some("Found it"));
        assert_eq!(history.to_string(), "Found it");
    }

    #[test]
    fn test_from_text_displays_unchanged() {
        let history = AgentHistory::from_text("Done: found X");
        assert_eq!(history.len(), 1);
        assert_eq!(history.to_string(), "Done: found X");
    }

    #[test]
    fn test_trace_format() {
        let mut history = AgentHistory::new();
        history.push(ActionResult::failure("boom"));
        history.push(ActionResult::content("page text"));

        let trace = history.trace();
        assert!(trace.starts_with("AgentHistoryList(all_results=[ActionResult("));
        assert!(trace.contains(
            "ActionResult(is_done=False, extracted_content=None, error='boom', include_in_memory=True)"
        ));
        assert!(trace.contains("extracted_content='page text'"));
        assert_eq!(trace.matches("ActionResult(").count(), 2);

        // Unfinished histories display as their trace
        assert_eq!(history.to_string(), trace);
    }

    #[test]
    fn test_errors_and_contents() {
        let mut history = AgentHistory::new();
        history.push(ActionResult::failure("e1"));
        history.push(ActionResult::content("c1"));
        history.push(ActionResult::done("c2"));
        assert_eq!(history.errors(), vec!["e1"]);
        assert_eq!(history.extracted_contents(), vec!["c1", "c2"]);
    }
}
