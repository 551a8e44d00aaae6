//! ChatService — runs one conversation turn: extract, merge, decide, reply.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::extractor::FieldExtractor;
use super::prompts::COMPLETION_MESSAGE;
use super::responder::ResponseGenerator;
use super::state::{Conversation, ConversationState};
use super::store::ConversationStore;
use crate::error::Error;
use crate::llm::LlmProvider;

/// Result of one turn, as returned by `POST /chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub message: String,
    pub state: ConversationState,
    pub collected_data: Map<String, Value>,
}

/// Coordinates the extractor, the response generator, and conversation
/// storage.
pub struct ChatService {
    store: Arc<dyn ConversationStore>,
    extractor: FieldExtractor,
    responder: ResponseGenerator,
}

impl ChatService {
    /// Build a service whose extractor and responder share one provider.
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        store: Arc<dyn ConversationStore>,
        system_prompt: &str,
    ) -> Self {
        Self {
            store,
            extractor: FieldExtractor::new(Arc::clone(&llm), system_prompt),
            responder: ResponseGenerator::new(llm, system_prompt),
        }
    }

    /// Process one user message.
    ///
    /// Model failures degrade (no new fields, templated question); only a
    /// storage failure is returned as an error.
    pub async fn process_user_input(
        &self,
        conversation_id: &str,
        message: &str,
    ) -> Result<ChatReply, Error> {
        let mut conversation = match self.store.load(conversation_id).await? {
            Some(conversation) => conversation,
            None => {
                info!(conversation_id = %conversation_id, "Starting new conversation");
                Conversation::new(conversation_id)
            }
        };

        conversation.push_user(message);

        let extracted = self.extractor.extract(message).await;
        conversation.merge(extracted);

        let missing = conversation.missing_fields();
        debug!(
            conversation_id = %conversation_id,
            collected = conversation.collected_data.len(),
            missing = ?missing,
            "Turn evaluated"
        );

        let reply = if missing.is_empty() {
            if !conversation.state.is_terminal() {
                info!(conversation_id = %conversation_id, "Registration data complete");
            }
            conversation.state = ConversationState::Completed;
            COMPLETION_MESSAGE.to_string()
        } else {
            self.responder
                .next_prompt(&conversation.history, conversation.state, &missing)
                .await
        };

        conversation.push_assistant(reply.clone());
        self.store.save(&conversation).await?;

        Ok(ChatReply {
            message: reply,
            state: conversation.state,
            collected_data: conversation.collected_data,
        })
    }

    /// Current snapshot of a conversation, if it exists.
    pub async fn snapshot(&self, conversation_id: &str) -> Result<Option<Conversation>, Error> {
        Ok(self.store.load(conversation_id).await?)
    }
}
