//! Task runner
//!
//! Validates a request, builds one agent through the factory, awaits its
//! single `run`, and hands back the history. Nothing is retried and nothing
//! is shared between runs.

use std::sync::Arc;

use crate::agent::{AgentFactory, AgentHistory};
use crate::core::{AgentConfiguration, Credential, Result, SupaBrowserError};
use crate::llm::ModelId;

/// Message returned when the credential is blank
pub const MISSING_API_KEY: &str = "Please provide an API key";

/// One task submission
#[derive(Debug, Clone)]
pub struct TaskRequest {
    pub task: String,
    pub credential: Credential,
    pub model: ModelId,
    pub headless: bool,
}

impl TaskRequest {
    pub fn new(task: impl Into<String>, credential: impl Into<Credential>) -> Self {
        Self {
            task: task.into(),
            credential: credential.into(),
            model: ModelId::default(),
            headless: true,
        }
    }

    pub fn with_model(mut self, model: ModelId) -> Self {
        self.model = model;
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Pre-flight checks run before any external call
    pub fn validate(&self) -> Result<()> {
        if self.credential.is_blank() {
            return Err(SupaBrowserError::validation(MISSING_API_KEY));
        }
        Ok(())
    }

    fn into_configuration(self) -> AgentConfiguration {
        AgentConfiguration {
            task: self.task,
            model: self.model,
            credential: self.credential,
            headless: self.headless,
        }
    }
}

/// Runs tasks through agents built by a factory
#[derive(Clone)]
pub struct TaskRunner {
    factory: Arc<dyn AgentFactory>,
}

impl TaskRunner {
    pub fn new(factory: Arc<dyn AgentFactory>) -> Self {
        Self { factory }
    }

    /// Run one task and return the agent's history unchanged
    ///
    /// Blank credentials fail with a validation error before the factory is
    /// touched. Every factory or agent failure is reported as an external
    /// call failure with its original message.
    pub async fn run(&self, request: TaskRequest) -> Result<AgentHistory> {
        request.validate()?;

        tracing::info!(
            factory = self.factory.name(),
            model = %request.model,
            headless = request.headless,
            task_chars = request.task.chars().count(),
            "Running task"
        );

        let outcome = match self.factory.create(request.into_configuration()) {
            Ok(mut agent) => agent.run().await,
            Err(e) => Err(e),
        };

        outcome.map_err(|e| {
            tracing::warn!("Task failed: {}", e);
            into_external(e)
        })
    }

    /// Run one task and render the outcome as the text an output field shows
    pub async fn run_to_text(&self, request: TaskRequest) -> String {
        render_outcome(self.run(request).await)
    }
}

/// Text for an output sink
///
/// Validation failures show their message, other failures show
/// `Error: {message}`, and successes show the history.
pub fn render_outcome(outcome: Result<AgentHistory>) -> String {
    match outcome {
        Ok(history) => history.to_string(),
        Err(e) if e.is_validation() => e.to_string(),
        Err(e) => format!("Error: {}", e),
    }
}

/// Anything raised past validation is an external failure, whatever the
/// agent chose to call it
fn into_external(error: SupaBrowserError) -> SupaBrowserError {
    if error.is_validation() {
        SupaBrowserError::agent(error.to_string())
    } else {
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorKind;

    #[test]
    fn test_validate_blank_credential() {
        let err = TaskRequest::new("find X", "   ").validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), MISSING_API_KEY);
    }

    #[test]
    fn test_empty_task_is_allowed() {
        assert!(TaskRequest::new("", "sk-ant-valid").validate().is_ok());
    }

    #[test]
    fn test_render_outcome() {
        assert_eq!(
            render_outcome(Ok(AgentHistory::from_text("Done: found X"))),
            "Done: found X"
        );
        assert_eq!(
            render_outcome(Err(SupaBrowserError::agent("timeout"))),
            "Error: timeout"
        );
        assert_eq!(
            render_outcome(Err(SupaBrowserError::validation(MISSING_API_KEY))),
            MISSING_API_KEY
        );
    }

    #[test]
    fn test_agent_validation_errors_become_external() {
        let err = into_external(SupaBrowserError::UnsupportedModel("x".into()));
        assert_eq!(err.kind(), ErrorKind::ExternalCall);
        assert_eq!(err.to_string(), "Unsupported model 'x'");
    }

    #[test]
    fn test_request_builder() {
        let request = TaskRequest::new("t", "k")
            .with_model(ModelId::Claude3Haiku)
            .with_headless(false);
        assert_eq!(request.model, ModelId::Claude3Haiku);
        assert!(!request.headless);
    }
}
