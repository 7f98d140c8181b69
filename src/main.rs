use std::sync::Arc;

use tracing::{info, warn};

use emerald_chat::agent::{CompletionAgent, GeminiAgentService, GEMINI_MODEL};
use emerald_chat::config::AppConfig;
use emerald_chat::routes::create_router;
use emerald_chat::service::chat_service::ChatService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "emerald_chat=debug,tower_http=debug".into()),
        )
        .init();

    let config = AppConfig::from_env();

    // ── Upstream client, built once and shared by every request ───────────────
    let agent: Option<Arc<dyn CompletionAgent>> = match config.gemini_api_key.as_deref() {
        Some(key) => {
            info!("Using upstream model {GEMINI_MODEL}");
            Some(Arc::new(GeminiAgentService::new(key)?))
        }
        None => {
            warn!("GEMINI_API_KEY is not set; /api/chat will answer 500 until it is configured");
            None
        }
    };

    let chat_service = ChatService::new(agent).with_history_forwarding(config.forward_history);

    // ── Router ────────────────────────────────────────────────────────────────
    if let Some(dir) = &config.static_dir {
        info!("Serving static assets from {}", dir.display());
    }
    let app = create_router(chat_service, config.static_dir.as_deref());

    // ── Listen ────────────────────────────────────────────────────────────────
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("EmeraldAI relay listening on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}
