//! HTTP Handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header::USER_AGENT, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};

use stock_advisor::{
    AdvisorError, Allocation, AnalysisReport, MirrorReport, OracleReport, Quote,
};
use usage_ledger::{LedgerError, PortfolioRecord, StockEntry, UserId};

use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn api_error(status: StatusCode, error: impl Into<String>, code: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

fn advisor_error(e: &AdvisorError) -> ApiError {
    if e.is_invalid_input() {
        return api_error(StatusCode::BAD_REQUEST, e.user_message(), "INVALID_PORTFOLIO");
    }
    tracing::error!(error = %e, "request failed");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, e.user_message(), "INTERNAL_ERROR")
}

fn ledger_error(e: &LedgerError) -> ApiError {
    if e.is_invalid_input() {
        return api_error(StatusCode::BAD_REQUEST, e.user_message(), "INVALID_USER_ID");
    }
    tracing::error!(error = %e, "usage store failed");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, e.user_message(), "STORAGE_ERROR")
}

fn missing_portfolio() -> ApiError {
    api_error(StatusCode::BAD_REQUEST, "Portfolio array is required", "INVALID_PORTFOLIO")
}

/// Unwrap a JSON body whose `portfolio` must be an array
fn portfolio_from<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected portfolio body");
        missing_portfolio()
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub chat_provider_connected: bool,
    pub chat_model: String,
    pub quote_source: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRequest {
    #[serde(default)]
    pub portfolio: Option<Vec<Allocation>>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MirrorResponse {
    #[serde(flatten)]
    pub report: MirrorReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct DebateRequest {
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DebateResponse {
    pub reply: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageResponse {
    pub success: bool,
    pub message: String,
    pub usage_count: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageCountResponse {
    pub user_id: UserId,
    pub usage_count: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub user_id: UserId,
    pub history: Vec<PortfolioRecord>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let chat_provider_connected = state.coach.provider().health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        chat_provider_connected,
        chat_model: state.coach.model().to_string(),
        quote_source: state.market.provider_name().to_string(),
    })
}

/// Past-self mirror: reflections, summary and metrics
pub async fn mirror(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<PortfolioRequest>, JsonRejection>,
) -> ApiResult<MirrorResponse> {
    let request = portfolio_from(payload)?;
    let portfolio = request.portfolio.ok_or_else(missing_portfolio)?;

    let report = MirrorReport::generate(&state.market, portfolio.clone())
        .await
        .map_err(|e| advisor_error(&e))?;

    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let usage_count = request
        .user_id
        .as_deref()
        .and_then(|id| record_submission(&state, id, &portfolio, user_agent));

    Ok(Json(MirrorResponse { report, usage_count }))
}

/// Best effort: tracking problems never fail the mirror request
fn record_submission(
    state: &AppState,
    raw_user_id: &str,
    portfolio: &[Allocation],
    user_agent: Option<String>,
) -> Option<u64> {
    let tracked = UserId::parse(raw_user_id).and_then(|user_id| {
        let entries = portfolio
            .iter()
            .cloned()
            .map(Allocation::normalized)
            .map(|a| StockEntry { ticker: a.ticker, percentage: a.percentage })
            .collect();
        state.usage.save_portfolio(&user_id, entries, user_agent)?;
        state.usage.increment_usage(&user_id)
    });

    match tracked {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::warn!(error = %e, "could not record portfolio submission");
            None
        }
    }
}

/// Anti-advice oracle
pub async fn oracle(
    payload: Result<Json<PortfolioRequest>, JsonRejection>,
) -> ApiResult<OracleReport> {
    let request = portfolio_from(payload)?;
    let portfolio = request.portfolio.ok_or_else(missing_portfolio)?;
    Ok(Json(OracleReport::generate(&portfolio)))
}

/// Debate the coach about a trade
pub async fn debate(
    State(state): State<AppState>,
    payload: Result<Json<DebateRequest>, JsonRejection>,
) -> ApiResult<DebateResponse> {
    let question = payload
        .ok()
        .and_then(|Json(body)| body.question)
        .ok_or_else(|| {
            api_error(StatusCode::BAD_REQUEST, "Question string is required", "INVALID_QUESTION")
        })?;

    let reply = state.coach.ask(&question).await.map_err(|e| {
        if e.is_invalid_input() {
            api_error(StatusCode::BAD_REQUEST, e.user_message(), "INVALID_QUESTION")
        } else {
            advisor_error(&e)
        }
    })?;

    Ok(Json(DebateResponse { reply }))
}

/// Single quote, live or fallback
pub async fn stock_quote(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> ApiResult<Quote> {
    if symbol.trim().is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Stock symbol is required",
            "INVALID_SYMBOL",
        ));
    }
    Ok(Json(state.market.quote(&symbol).await))
}

/// Holdings, metrics and classification
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<PortfolioRequest>, JsonRejection>,
) -> ApiResult<AnalysisReport> {
    let request = portfolio_from(payload)?;
    let portfolio = request.portfolio.ok_or_else(missing_portfolio)?;

    let report = AnalysisReport::generate(&state.market, portfolio)
        .await
        .map_err(|e| advisor_error(&e))?;
    Ok(Json(report))
}

/// Count one usage event for a user
pub async fn track_usage(
    State(state): State<AppState>,
    payload: Result<Json<UsageRequest>, JsonRejection>,
) -> ApiResult<UsageResponse> {
    let request = payload.map(|Json(body)| body).map_err(|rejection| {
        api_error(StatusCode::BAD_REQUEST, rejection.body_text(), "INVALID_REQUEST")
    })?;

    let user_id = UserId::parse(request.user_id.as_deref().unwrap_or_default())
        .map_err(|e| ledger_error(&e))?;
    let usage_count = state.usage.increment_usage(&user_id).map_err(|e| ledger_error(&e))?;

    tracing::info!(
        user_id = %user_id,
        action = request.action.as_deref().unwrap_or("unspecified"),
        usage_count,
        "usage tracked"
    );

    Ok(Json(UsageResponse {
        success: true,
        message: "Usage tracked successfully".into(),
        usage_count,
    }))
}

/// Current usage count for a user
pub async fn usage_count(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<UsageCountResponse> {
    let user_id = UserId::parse(&user_id).map_err(|e| ledger_error(&e))?;
    let usage_count = state.usage.usage_count(&user_id).map_err(|e| ledger_error(&e))?;
    Ok(Json(UsageCountResponse { user_id, usage_count }))
}

/// Saved portfolios for a user, oldest first
pub async fn portfolio_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<HistoryResponse> {
    let user_id = UserId::parse(&user_id).map_err(|e| ledger_error(&e))?;
    let history = state.usage.history(&user_id).map_err(|e| ledger_error(&e))?;
    Ok(Json(HistoryResponse { user_id, history }))
}
