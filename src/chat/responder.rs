//! Response generator — phrases the question for the next missing field.

use std::sync::Arc;

use tracing::warn;

use super::prompts::{fallback_prompt, followup_prompt};
use super::state::ConversationState;
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider};

const RESPONSE_TEMPERATURE: f32 = 0.7;
const RESPONSE_MAX_TOKENS: u32 = 150;

/// Asks the LLM for a short conversational follow-up.
pub struct ResponseGenerator {
    llm: Arc<dyn LlmProvider>,
    system_prompt: String,
}

impl ResponseGenerator {
    pub fn new(llm: Arc<dyn LlmProvider>, system_prompt: impl Into<String>) -> Self {
        Self {
            llm,
            system_prompt: system_prompt.into(),
        }
    }

    /// Produce the next assistant reply.
    ///
    /// `history` alternates user/assistant starting with the user. Whatever
    /// the model returns is used verbatim; only a failed call falls back to
    /// a templated question.
    pub async fn next_prompt(
        &self,
        history: &[String],
        state: ConversationState,
        missing: &[&str],
    ) -> String {
        let request = CompletionRequest::new(build_messages(
            &self.system_prompt,
            history,
            state,
            missing,
        ))
        .with_temperature(RESPONSE_TEMPERATURE)
        .with_max_tokens(RESPONSE_MAX_TOKENS);

        match self.llm.complete(request).await {
            Ok(response) => response.content,
            Err(e) => {
                warn!(error = %e, "Response generator call failed, using fallback");
                fallback_prompt(missing)
            }
        }
    }
}

fn build_messages(
    system_prompt: &str,
    history: &[String],
    state: ConversationState,
    missing: &[&str],
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(system_prompt));
    messages.extend(history.iter().enumerate().map(|(i, text)| {
        if i % 2 == 0 {
            ChatMessage::user(text.as_str())
        } else {
            ChatMessage::assistant(text.as_str())
        }
    }));
    messages.push(ChatMessage::user(followup_prompt(state, missing)));
    messages
}
