//! LLM completion: request/response shapes, the provider seam, and the client that
//! turns a composed prompt into a summary.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind};
use async_trait::async_trait;
use log::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Returned in place of a summary when the provider produces no content.
pub const PLACEHOLDER_SUMMARY: &str = "No summary generated.";

pub const USER_ROLE: &str = "user";

/// Chat-completion request body (OpenAI-compatible).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl CompletionRequest {
    /// A request carrying exactly one user-role message.
    pub fn from_prompt(model: &str, prompt_text: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: USER_ROLE.to_string(),
                content: prompt_text.to_string(),
            }],
        }
    }
}

/// The parts of a chat-completion response we read. Everything is optional so that
/// degenerate but well-formed responses still parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Content of the first choice, if it has any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
            .filter(|content| !content.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResult {
    pub summary_text: String,
}

/// Abstraction over the external LLM completion service.
///
/// Implementations make one network call per invocation and never retry.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn create_chat_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, Error>;
}

/// Sends composed prompts to a [`CompletionProvider`] using a fixed model.
#[derive(Clone)]
pub struct CompletionClient {
    provider: Arc<dyn CompletionProvider>,
    model: String,
}

impl CompletionClient {
    pub fn new(provider: Arc<dyn CompletionProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Runs a single completion for `prompt_text`.
    ///
    /// An empty or choice-less response yields [`PLACEHOLDER_SUMMARY`], not an error. Any
    /// provider failure is reported as `ExternalErrorKind::Completion`.
    pub async fn complete(&self, prompt_text: &str) -> Result<CompletionResult, Error> {
        let request = CompletionRequest::from_prompt(&self.model, prompt_text);

        debug!(
            "Requesting completion from model {} ({} prompt chars)",
            self.model,
            prompt_text.len()
        );

        let response = self
            .provider
            .create_chat_completion(&request)
            .await
            .map_err(|e| {
                error!("Completion provider call failed: {e}");
                match e.error_kind {
                    DomainErrorKind::External(ExternalErrorKind::Completion) => e,
                    _ => Error::completion(e),
                }
            })?;

        let summary_text = match response.first_content() {
            Some(content) => content.to_string(),
            None => {
                warn!(
                    "Completion response had no content ({} choices), using placeholder",
                    response.choices.len()
                );
                PLACEHOLDER_SUMMARY.to_string()
            }
        };

        Ok(CompletionResult { summary_text })
    }
}
