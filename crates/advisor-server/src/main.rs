//! Portfolio mirror HTTP server

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use advisor_server::{build_router, AppState, ServerConfig};
use coach_core::{GenerationOptions, LlmProvider};
use coach_runtime::OllamaProvider;
use stock_advisor::DebateCoach;
use usage_ledger::MemoryUsageStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env();

    // Chat provider
    let provider = Arc::new(OllamaProvider::from_env());
    match provider.health_check().await {
        Ok(true) => tracing::info!(model = %config.chat_model, "✓ Connected to Ollama"),
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ Ollama not available - debate replies will use the fallback text");
            tracing::warn!("  Make sure Ollama is running: ollama serve");
        }
    }
    let coach = DebateCoach::new(provider, GenerationOptions::for_model(config.chat_model.clone()));

    // Quotes
    let market = config.market_data()?;
    tracing::info!(
        source = market.provider_name(),
        cache_ttl_secs = config.quote_cache_ttl_secs,
        jitter_seed = ?config.fallback_jitter_seed,
        "quote source ready"
    );

    let state = AppState::new(market, coach, Arc::new(MemoryUsageStore::new()));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 portfolio mirror running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                 - Health check");
    tracing::info!("  POST /api/mirror             - Past-self reflections");
    tracing::info!("  POST /api/oracle             - Anti-advice warnings");
    tracing::info!("  POST /api/debate             - Argue with the coach");
    tracing::info!("  POST /api/analyze            - Metrics and classification");
    tracing::info!("  GET  /api/stock/{{symbol}}     - Single quote");
    tracing::info!("  POST /api/usage              - Track usage");

    axum::serve(listener, app).await?;

    Ok(())
}
