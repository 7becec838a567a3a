//! # advisor-server
//!
//! Axum HTTP front end for the portfolio mirror.
//!
//! ```text
//! POST /api/mirror   ──▶ MirrorReport   (quotes + metrics + reflections)
//! POST /api/oracle   ──▶ OracleReport   (rule-based warnings)
//! POST /api/analyze  ──▶ AnalysisReport (quotes + metrics + labels)
//! POST /api/debate   ──▶ DebateCoach    (LLM, apology on failure)
//! GET  /api/stock/{symbol}
//! POST /api/usage, GET /api/usage/{user_id}, GET /api/history/{user_id}
//! ```

pub mod config;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::{QuoteSourceKind, ServerConfig};
pub use routes::build_router;
pub use state::AppState;
