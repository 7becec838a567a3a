//! Router assembly.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{
    analyze, debate, health_check, mirror, oracle, portfolio_history, stock_quote,
    track_usage, usage_count,
};
use crate::state::AppState;

/// All routes, with permissive CORS and request tracing
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(health_check))

        // Portfolio
        .route("/api/mirror", post(mirror))
        .route("/api/oracle", post(oracle))
        .route("/api/analyze", post(analyze))
        .route("/api/stock/{symbol}", get(stock_quote))

        // Coach
        .route("/api/debate", post(debate))

        // Usage
        .route("/api/usage", post(track_usage))
        .route("/api/usage/{user_id}", get(usage_count))
        .route("/api/history/{user_id}", get(portfolio_history))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
