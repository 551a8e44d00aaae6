//! LLM integration for Enroll Assist.
//!
//! Supports any backend that speaks the OpenAI Chat Completions API
//! (OpenAI itself, Azure-style gateways, local servers).

pub mod openai;
pub mod provider;

pub use openai::OpenAiProvider;
pub use provider::*;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::LlmError;

/// Create an LLM provider from configuration.
pub fn create_provider(config: &AppConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    let provider = OpenAiProvider::new(
        config.api_key.clone(),
        config.model.clone(),
        &config.base_url,
        config.request_timeout,
    )?;
    tracing::info!(model = %config.model, base_url = %config.base_url, "Using OpenAI-compatible provider");
    Ok(Arc::new(provider))
}
