use std::sync::Arc;

use anyhow::Context;

use enroll_assist::api::{self, AppState};
use enroll_assist::chat::{ChatService, ConversationStore, InMemoryConversationStore};
use enroll_assist::config::AppConfig;
use enroll_assist::llm::create_provider;
use enroll_assist::students::{InMemoryStudentStore, RegistrationService, StudentStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env().context("export OPENAI_API_KEY=sk-...")?;

    eprintln!("🚗 Enroll Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", config.model);
    eprintln!("   LLM API: {}", config.base_url);
    eprintln!("   Chat API: http://{}/chat", config.bind_addr);
    eprintln!("   Form API: http://{}/submit-form\n", config.bind_addr);

    let llm = create_provider(&config)?;

    // ── Stores ──────────────────────────────────────────────────────────
    let conversations: Arc<dyn ConversationStore> = Arc::new(InMemoryConversationStore::new());
    let students: Arc<dyn StudentStore> = Arc::new(InMemoryStudentStore::new());

    // ── Services ────────────────────────────────────────────────────────
    let state = AppState {
        chat: Arc::new(ChatService::new(llm, conversations, &config.system_prompt)),
        registration: Arc::new(RegistrationService::new(students)),
    };

    let app = api::routes(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "HTTP server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
