//! Conversation storage keyed by caller-supplied conversation id.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::state::Conversation;
use crate::error::StoreError;

/// Backend-agnostic conversation storage.
///
/// Callers load a copy, work on it, and save it back. Two turns racing on
/// the same id can overwrite each other; different ids never interfere.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Fetch a conversation by id.
    async fn load(&self, id: &str) -> Result<Option<Conversation>, StoreError>;

    /// Insert or replace a conversation.
    async fn save(&self, conversation: &Conversation) -> Result<(), StoreError>;
}

/// Process-local conversation store. No eviction; contents live until the
/// process exits.
#[derive(Default)]
pub struct InMemoryConversationStore {
    conversations: RwLock<HashMap<String, Conversation>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing backing map.
    pub fn with_map(conversations: HashMap<String, Conversation>) -> Self {
        Self {
            conversations: RwLock::new(conversations),
        }
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn load(&self, id: &str) -> Result<Option<Conversation>, StoreError> {
        Ok(self.conversations.read().await.get(id).cloned())
    }

    async fn save(&self, conversation: &Conversation) -> Result<(), StoreError> {
        self.conversations
            .write()
            .await
            .insert(conversation.id.clone(), conversation.clone());
        Ok(())
    }
}
