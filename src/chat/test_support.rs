//! Scripted LLM stub for chat unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::LlmError;
use crate::llm::{CompletionRequest, CompletionResponse, FinishReason, LlmProvider};

pub(crate) const STUB_REPLY: &str = "Great! What's your phone number?";

/// Answers extraction prompts from a queue and every other prompt with a
/// fixed reply. `None` entries make the call fail.
pub(crate) struct ScriptedLlm {
    extractions: Mutex<VecDeque<Option<String>>>,
    default_extraction: Option<String>,
    reply: Option<String>,
    calls: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedLlm {
    pub(crate) fn new() -> Self {
        Self {
            extractions: Mutex::new(VecDeque::new()),
            default_extraction: Some("{}".to_string()),
            reply: Some(STUB_REPLY.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails.
    pub(crate) fn failing() -> Self {
        Self {
            default_extraction: None,
            reply: None,
            ..Self::new()
        }
    }

    pub(crate) fn with_extraction(self, raw: &str) -> Self {
        self.extractions
            .lock()
            .unwrap()
            .push_back(Some(raw.to_string()));
        self
    }

    pub(crate) fn with_failed_extraction(self) -> Self {
        self.extractions.lock().unwrap().push_back(None);
        self
    }

    pub(crate) fn with_default_extraction(mut self, raw: &str) -> Self {
        self.default_extraction = Some(raw.to_string());
        self
    }

    pub(crate) fn with_reply(mut self, reply: &str) -> Self {
        self.reply = Some(reply.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn is_extraction(request: &CompletionRequest) -> bool {
        request
            .messages
            .last()
            .is_some_and(|m| m.content.starts_with("Extract the following fields"))
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    fn model_name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let content = if Self::is_extraction(&request) {
            let queued = self.extractions.lock().unwrap().pop_front();
            queued.unwrap_or_else(|| self.default_extraction.clone())
        } else {
            self.reply.clone()
        };
        self.calls.lock().unwrap().push(request);

        let content = content.ok_or_else(|| LlmError::RequestFailed {
            provider: "scripted".to_string(),
            reason: "scripted failure".to_string(),
        })?;

        Ok(CompletionResponse {
            content,
            input_tokens: 0,
            output_tokens: 0,
            finish_reason: FinishReason::Stop,
            response_id: None,
        })
    }
}
