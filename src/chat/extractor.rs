//! Field extractor — pulls registration fields out of one free-text message.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::prompts::extraction_prompt;
use super::state::is_recognized_field;
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider};

/// Sampling temperature for extraction. Zero keeps repeated calls stable.
const EXTRACTION_TEMPERATURE: f32 = 0.0;
const EXTRACTION_MAX_TOKENS: u32 = 500;

/// Turns a user message into a partial field mapping via the LLM.
pub struct FieldExtractor {
    llm: Arc<dyn LlmProvider>,
    system_prompt: String,
}

impl FieldExtractor {
    pub fn new(llm: Arc<dyn LlmProvider>, system_prompt: impl Into<String>) -> Self {
        Self {
            llm,
            system_prompt: system_prompt.into(),
        }
    }

    /// Extract recognized fields from `text`.
    ///
    /// Never fails: a call error or an unparseable reply yields an empty map.
    pub async fn extract(&self, text: &str) -> Map<String, Value> {
        let request = CompletionRequest::new(vec![
            ChatMessage::system(&self.system_prompt),
            ChatMessage::user(extraction_prompt(text)),
        ])
        .with_temperature(EXTRACTION_TEMPERATURE)
        .with_max_tokens(EXTRACTION_MAX_TOKENS);

        let response = match self.llm.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Field extraction call failed");
                return Map::new();
            }
        };

        match parse_extraction(&response.content) {
            Some(fields) => {
                debug!(count = fields.len(), "Extracted fields");
                fields
            }
            None => {
                warn!(response = %response.content, "Extraction reply was not a JSON object");
                Map::new()
            }
        }
    }
}

/// Parse a model reply into its recognized fields. Values, `null`
/// included, are kept as the model sent them.
fn parse_extraction(raw: &str) -> Option<Map<String, Value>> {
    let Value::Object(object) = serde_json::from_str(raw).ok()? else {
        return None;
    };

    Some(
        object
            .into_iter()
            .filter(|(key, _)| is_recognized_field(key))
            .collect(),
    )
}
