//! Browser agent
//!
//! Plans with an LLM and acts through browser tools, one step at a time.
//! Each step is a planning call followed by the tool calls it requested;
//! the loop ends when the model calls `done`, answers without tools, or the
//! step budget runs out.

use std::sync::Arc;

use async_trait::async_trait;

use crate::agent::history::{ActionResult, AgentHistory};
use crate::agent::loop_state::AgentLoopState;
use crate::agent::traits::BrowserAgent;
use crate::core::{Message, Result, SupaBrowserError, ToolCall};
use crate::llm::{GenerateOptions, LLMProvider, LLMResponse, ModelId};
use crate::tools::{ToolRegistry, DONE_TOOL};

const DEFAULT_MAX_STEPS: usize = 15;

/// LLM-driven browser agent for a single task
pub struct BrowserUseAgent {
    /// Task description
    task: String,
    /// Model used for planning
    model: ModelId,
    /// LLM client
    llm: Arc<dyn LLMProvider>,
    /// Tool registry
    tools: ToolRegistry,
    /// Maximum planning steps
    max_steps: usize,
    /// Sampling temperature for planning calls
    temperature: f32,
}

impl BrowserUseAgent {
    /// Create a new agent
    pub fn new(
        task: impl Into<String>,
        model: ModelId,
        llm: Arc<dyn LLMProvider>,
        tools: ToolRegistry,
    ) -> Self {
        Self {
            task: task.into(),
            model,
            llm,
            tools,
            max_steps: DEFAULT_MAX_STEPS,
            temperature: 0.0,
        }
    }

    /// Set maximum steps
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Set planning temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    fn system_prompt(&self) -> String {
        let browser_instructions = if self.tools.has_browser() {
            r#"
## Browser Tools
- `browser_url`: Navigate to a URL. Returns a snapshot of interactive elements.
- `browser_snapshot`: Get interactive elements with [ref=eN] tags.
- `browser_fill`: Type text into an element. Args: {"ref": "e5", "text": "search query"}
- `browser_click`: Click an element. Args: {"ref": "e8"}
- `browser_get_text`, `browser_press`, `browser_scroll`, `browser_close`

Always pick element refs from the LATEST snapshot in the previous steps."#
        } else {
            ""
        };

        format!(
            r#"You are a browser automation agent. Work step by step:
1. THINK about what you need to do next.
2. ACT by calling tools.
3. OBSERVE the results in the previous steps and continue.
{}

## Finishing
Call `done` with the final answer as soon as the task is complete.
If the task cannot be completed, call `done` and explain why."#,
            browser_instructions
        )
    }

    /// One planning call with everything observed so far
    async fn plan(&self, state: &AgentLoopState) -> Result<LLMResponse> {
        let user_content = format!(
            "Task: {}\n\nStep {} of {}.{}",
            self.task,
            state.step + 1,
            state.max_steps,
            state.format_observations()
        );

        let messages = vec![Message::system(self.system_prompt()), Message::user(user_content)];

        self.llm
            .chat_with_tools(
                self.model.as_str(),
                &messages,
                self.tools.all_definitions(),
                Some(GenerateOptions {
                    temperature: Some(self.temperature),
                }),
            )
            .await
    }

    /// Execute one non-control tool call and turn it into a step record
    async fn act(&self, call: &ToolCall) -> Result<ActionResult> {
        match self.tools.execute(call).await {
            Ok(result) if result.success => Ok(ActionResult::content(result.output)),
            Ok(result) => Ok(ActionResult::failure(result.output)),
            // Without the driver no later step can succeed
            Err(SupaBrowserError::AgentBrowserNotFound) => {
                Err(SupaBrowserError::AgentBrowserNotFound)
            }
            Err(e) => Ok(ActionResult::failure(e.to_string())),
        }
    }

    async fn close_browser(&self) {
        if let Some(browser) = self.tools.browser_executor() {
            if let Err(e) = browser.close().await {
                tracing::debug!("Closing browser session failed: {}", e);
            }
        }
    }

    async fn run_loop(&self) -> Result<AgentHistory> {
        let mut state = AgentLoopState::new(self.max_steps);

        while state.should_continue() {
            tracing::debug!(step = state.step + 1, max = state.max_steps, "Planning");

            let response = self.plan(&state).await?;
            state.history.push_model_output(serde_json::json!({
                "content": response.content,
                "tool_calls": response.tool_calls,
            }));

            if response.tool_calls.is_empty() {
                let answer = if response.content.trim().is_empty() {
                    "The agent finished without a response.".to_string()
                } else {
                    response.content.clone()
                };
                state.record(ActionResult::done(answer));
                break;
            }

            for call in &response.tool_calls {
                if call.name == DONE_TOOL {
                    let text = call
                        .get_string("text")
                        .unwrap_or_else(|| response.content.clone());
                    state.record(ActionResult::done(text));
                    break;
                }

                let result = self.act(call).await?;
                if let Some(ref error) = result.error {
                    tracing::debug!(tool = %call.name, "Tool failed: {}", error);
                }
                state.record(result);
            }

            state.next_step();
        }

        if !state.history.is_done() {
            tracing::warn!(steps = state.step, "Agent stopped after reaching max steps");
        }

        Ok(state.into_history())
    }
}

#[async_trait]
impl BrowserAgent for BrowserUseAgent {
    async fn run(&mut self) -> Result<AgentHistory> {
        tracing::info!(model = %self.model, max_steps = self.max_steps, "Agent started");

        let outcome = self.run_loop().await;
        self.close_browser().await;

        if let Ok(ref history) = outcome {
            tracing::info!(steps = history.len(), done = history.is_done(), "Agent finished");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ToolDefinition;
    use std::sync::Mutex;

    /// Provider that replays canned responses and records prompts
    struct ScriptedProvider {
        responses: Mutex<Vec<Result<LLMResponse>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn new(mut responses: Vec<Result<LLMResponse>>) -> Self {
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    fn reply(content: &str, tool_calls: Vec<ToolCall>) -> Result<LLMResponse> {
        Ok(LLMResponse {
            content: content.to_string(),
            tool_calls,
            usage: None,
            model: "scripted".to_string(),
            stop_reason: None,
        })
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn chat_with_tools(
            &self,
            _model: &str,
            messages: &[Message],
            _tools: &[ToolDefinition],
            _options: Option<GenerateOptions>,
        ) -> Result<LLMResponse> {
            let prompt = messages.last().map(|m| m.content.clone()).unwrap_or_default();
            self.prompts.lock().unwrap().push(prompt);
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| reply("", vec![]))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn agent(provider: Arc<ScriptedProvider>) -> BrowserUseAgent {
        BrowserUseAgent::new(
            "find X",
            ModelId::Claude3Haiku,
            provider,
            ToolRegistry::new(),
        )
    }

    #[tokio::test]
    async fn test_done_tool_finishes() {
        let provider = Arc::new(ScriptedProvider::new(vec![reply(
            "",
            vec![ToolCall::new(DONE_TOOL, serde_json::json!({"text": "Done: found X"}))],
        )]));
        let mut agent = agent(provider.clone());

        let history = agent.run().await.unwrap();
        assert_eq!(history.final_result(), Some("Done: found X"));
        assert_eq!(history.all_model_outputs.len(), 1);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_plain_answer_finishes() {
        let provider = Arc::new(ScriptedProvider::new(vec![reply("X is 42", vec![])]));
        let history = agent(provider).run().await.unwrap();
        assert_eq!(history.to_string(), "X is 42");
    }

    #[tokio::test]
    async fn test_failed_tool_is_recorded_and_fed_back() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            reply("", vec![ToolCall::new("teleport", serde_json::json!({}))]),
            reply(
                "",
                vec![ToolCall::new(DONE_TOOL, serde_json::json!({"text": "gave up"}))],
            ),
        ]));
        let history = agent(provider.clone()).run().await.unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history.errors(), vec!["Unknown tool: teleport"]);
        assert_eq!(history.final_result(), Some("gave up"));

        let prompts = provider.prompts.lock().unwrap();
        assert!(prompts[1].contains("Unknown tool: teleport"));
        assert!(prompts[1].starts_with("Task: find X"));
    }

    #[tokio::test]
    async fn test_max_steps_without_done() {
        let responses = (0..5)
            .map(|_| reply("", vec![ToolCall::new("browser_url", serde_json::json!({}))]))
            .collect();
        let provider = Arc::new(ScriptedProvider::new(responses));
        let mut agent = agent(provider.clone()).with_max_steps(3);

        let history = agent.run().await.unwrap();
        assert!(!history.is_done());
        assert_eq!(history.len(), 3);
        assert_eq!(provider.calls(), 3);
    }

    #[tokio::test]
    async fn test_llm_error_propagates() {
        let provider = Arc::new(ScriptedProvider::new(vec![Err(SupaBrowserError::anthropic(
            "overloaded",
        ))]));
        let err = agent(provider).run().await.unwrap_err();
        assert!(err.to_string().contains("overloaded"));
    }
}
