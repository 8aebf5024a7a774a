//! Shared fakes for integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use supabrowser::{
    AgentConfiguration, AgentFactory, AgentHistory, BrowserAgent, Result, SupaBrowserError,
};

/// What a fake agent does when run
#[derive(Clone)]
pub enum Script {
    /// Finish with this final result
    Finish(String),
    /// Fail with an agent error carrying this message
    Fail(String),
    /// Fail while being built
    FailToBuild(String),
    /// Echo the task back after a delay
    EchoAfter(Duration),
}

/// Counts every factory call and agent run, and keeps the configurations
pub struct FakeFactory {
    script: Script,
    pub created: AtomicUsize,
    pub runs: Arc<AtomicUsize>,
    pub configs: Mutex<Vec<AgentConfiguration>>,
}

impl FakeFactory {
    pub fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            created: AtomicUsize::new(0),
            runs: Arc::new(AtomicUsize::new(0)),
            configs: Mutex::new(Vec::new()),
        })
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }

    pub fn last_config(&self) -> Option<AgentConfiguration> {
        self.configs.lock().unwrap().last().cloned()
    }
}

impl AgentFactory for FakeFactory {
    fn create(&self, config: AgentConfiguration) -> Result<Box<dyn BrowserAgent>> {
        self.created.fetch_add(1, Ordering::SeqCst);
        self.configs.lock().unwrap().push(config.clone());

        if let Script::FailToBuild(message) = &self.script {
            return Err(SupaBrowserError::anthropic(message.clone()));
        }

        Ok(Box::new(FakeAgent {
            script: self.script.clone(),
            task: config.task,
            runs: Arc::clone(&self.runs),
        }))
    }

    fn name(&self) -> &str {
        "fake"
    }
}

struct FakeAgent {
    script: Script,
    task: String,
    runs: Arc<AtomicUsize>,
}

#[async_trait]
impl BrowserAgent for FakeAgent {
    async fn run(&mut self) -> Result<AgentHistory> {
        self.runs.fetch_add(1, Ordering::SeqCst);

        match &self.script {
            Script::Finish(text) => Ok(AgentHistory::from_text(text.clone())),
            Script::Fail(message) => Err(SupaBrowserError::agent(message.clone())),
            Script::FailToBuild(_) => unreachable!("agent is never built"),
            Script::EchoAfter(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(AgentHistory::from_text(self.task.clone()))
            }
        }
    }
}
