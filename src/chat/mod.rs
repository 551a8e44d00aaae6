//! Chat-driven registration.
//!
//! Each user message runs through the field extractor; extracted values are
//! merged into the conversation, and the response generator asks for the
//! first field still missing. Once all required fields are present the
//! conversation is marked completed.

pub mod extractor;
pub mod prompts;
pub mod responder;
pub mod service;
pub mod state;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use extractor::FieldExtractor;
pub use responder::ResponseGenerator;
pub use service::{ChatReply, ChatService};
pub use state::{Conversation, ConversationState};
pub use store::{ConversationStore, InMemoryConversationStore};
