//! Error types for Enroll Assist.

use std::time::Duration;

/// Errors the services hand back to request handlers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// LLM provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} timed out after {timeout:?}")]
    Timeout { provider: String, timeout: Duration },

    #[error("Provider {provider} returned HTTP {status}: {body}")]
    HttpStatus {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Student registration errors. The message is shown to the client as-is.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Request body must be a JSON object")]
    InvalidBody,
}

/// Storage errors for conversations and students.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store backend unavailable: {0}")]
    Unavailable(String),
}
