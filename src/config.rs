//! Configuration types, built from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default OpenAI-compatible API base.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default completion model.
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Persona used as the system message for every model call.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are a friendly assistant helping with driving school registrations. \
Your role is to gather all the necessary information from students in a structured format. \
The details needed are: first name, last name, email, phone number, date of birth (YYYY-MM-DD), \
address, whether they currently hold a driving license (yes/no), their license number \
(if applicable), and their preferred type of transmission (automatic or manual). \
If the information provided is unorganized, identify and extract the required details. \
Keep the conversation engaging while ensuring you collect all the necessary data.";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// API key for the completion endpoint.
    pub api_key: SecretString,
    /// Model name sent with every request.
    pub model: String,
    /// Base URL of the OpenAI-compatible API (without `/chat/completions`).
    pub base_url: String,
    /// Per-request timeout for model calls.
    pub request_timeout: Duration,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// System prompt shared by the extractor and the response generator.
    pub system_prompt: String,
}

impl AppConfig {
    /// Build config from environment variables.
    ///
    /// Only `OPENAI_API_KEY` is required; everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let model = std::env::var("ENROLL_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let base_url = std::env::var("ENROLL_LLM_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs: u64 = std::env::var("ENROLL_LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);

        let port: u16 = std::env::var("ENROLL_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5000);

        let ip = match std::env::var("ENROLL_BIND") {
            Ok(raw) => raw.parse::<IpAddr>().map_err(|e| ConfigError::InvalidValue {
                key: "ENROLL_BIND".to_string(),
                message: e.to_string(),
            })?,
            Err(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let system_prompt = std::env::var("ENROLL_SYSTEM_PROMPT")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());

        Ok(Self {
            api_key: SecretString::from(api_key),
            model,
            base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            bind_addr: SocketAddr::new(ip, port),
            system_prompt,
        })
    }
}
