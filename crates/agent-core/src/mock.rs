//! Scripted Mock Provider
//!
//! Returns canned completions in order and records every request, so the
//! agents can be tested without a network.
//!
//! Only available with the `mock` feature:
//!
//! ```toml
//! [dev-dependencies]
//! agent-core = { path = "../agent-core", features = ["mock"] }
//! ```

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{AgentError, Result};
use crate::message::Message;
use crate::provider::{Completion, GenerationOptions, LlmProvider};

/// A request as the provider received it
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub messages: Vec<Message>,
    pub options: GenerationOptions,
}

/// Provider that replays a script of replies and errors
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<Option<String>>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful completion
    pub fn reply(mut self, content: impl Into<String>) -> Self {
        self.script.get_mut().push_back(Ok(Some(content.into())));
        self
    }

    /// Queue a completion that carries no content
    pub fn no_content(mut self) -> Self {
        self.script.get_mut().push_back(Ok(None));
        self
    }

    /// Queue a failed call
    pub fn fail(mut self, error: AgentError) -> Self {
        self.script.get_mut().push_back(Err(error));
        self
    }

    /// Every request received so far
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of calls made
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "Scripted"
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        self.requests.lock().await.push(RecordedRequest {
            messages: messages.to_vec(),
            options: options.clone(),
        });

        let next = self.script.lock().await.pop_front();
        match next {
            Some(Ok(content)) => Ok(Completion {
                content,
                ..Completion::text("", options.model.clone())
            }),
            Some(Err(e)) => Err(e),
            None => Err(AgentError::Provider("scripted provider has no reply left".into())),
        }
    }
}
