//! Agent loop state management
//!
//! Tracks the step counter of the planning loop and the history built so far.

use crate::agent::history::{ActionResult, AgentHistory};

/// Longest observation text carried into the next prompt
const MAX_OBSERVATION_CHARS: usize = 4000;

/// State of the agent planning loop
#[derive(Debug, Clone)]
pub struct AgentLoopState {
    /// Current step number (0-indexed)
    pub step: usize,
    /// Maximum allowed steps
    pub max_steps: usize,
    /// History recorded so far
    pub history: AgentHistory,
}

impl AgentLoopState {
    /// Create a new loop state with the given max steps
    pub fn new(max_steps: usize) -> Self {
        Self {
            step: 0,
            max_steps,
            history: AgentHistory::new(),
        }
    }

    /// Check if the loop should continue
    pub fn should_continue(&self) -> bool {
        self.step < self.max_steps && !self.history.is_done()
    }

    /// Record a step result
    pub fn record(&mut self, result: ActionResult) {
        self.history.push(result);
    }

    /// Increment the step counter
    pub fn next_step(&mut self) {
        self.step += 1;
    }

    /// Format remembered steps for inclusion in the next prompt
    pub fn format_observations(&self) -> String {
        let remembered: Vec<(usize, &ActionResult)> = self
            .history
            .all_results
            .iter()
            .enumerate()
            .filter(|(_, r)| r.include_in_memory)
            .collect();

        if remembered.is_empty() {
            return String::new();
        }

        let mut output = String::from("\n\n## Previous steps:\n");
        for (i, result) in remembered {
            let (label, text) = match (&result.error, &result.extracted_content) {
                (Some(error), _) => ("error", error.as_str()),
                (None, Some(content)) => ("result", content.as_str()),
                (None, None) => ("result", ""),
            };
            output.push_str(&format!(
                "\n### Step {} ({})\n{}\n",
                i + 1,
                label,
                truncate(text, MAX_OBSERVATION_CHARS)
            ));
        }
        output
    }

    /// Consume the state, returning the history
    pub fn into_history(self) -> AgentHistory {
        self.history
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}... [truncated]", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_state_new() {
        let state = AgentLoopState::new(10);
        assert_eq!(state.step, 0);
        assert_eq!(state.max_steps, 10);
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_should_continue() {
        let mut state = AgentLoopState::new(2);
        assert!(state.should_continue());

        state.next_step();
        assert!(state.should_continue());

        state.next_step();
        assert!(!state.should_continue()); // Reached max steps
    }

    #[test]
    fn test_done_stops_loop() {
        let mut state = AgentLoopState::new(5);
        state.record(ActionResult::done("ok"));
        assert!(!state.should_continue());
    }

    #[test]
    fn test_format_observations() {
        let mut state = AgentLoopState::new(10);
        assert!(state.format_observations().is_empty());

        state.record(ActionResult::content("Navigated to google.com"));
        state.record(ActionResult::failure("Element e9 not found"));

        let formatted = state.format_observations();
        assert!(formatted.contains("Step 1 (result)"));
        assert!(formatted.contains("Navigated to google.com"));
        assert!(formatted.contains("Step 2 (error)"));
    }

    #[test]
    fn test_truncate_long_observation() {
        let long = "x".repeat(MAX_OBSERVATION_CHARS + 10);
        let out = truncate(&long, MAX_OBSERVATION_CHARS);
        assert!(out.ends_with("[truncated]"));
    }
}
