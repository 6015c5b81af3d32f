use crate::error::MatchError;
use crate::export::matches_to_csv;
use crate::models::{Match, MatchSummary, Order, Transaction};
use crate::service::BatchScheduler;
use axum::{
    extract::{Json, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use thiserror::Error;

/// 共享状态
#[derive(Clone)]
pub struct AppState {
    pub scheduler: BatchScheduler,
}

/// 请求体: 订单与交易
#[derive(Debug, Deserialize, Serialize)]
pub struct MatchRequest {
    pub orders: Vec<Order>,
    pub transactions: Vec<Transaction>,
}

/// 请求体: 可覆盖批次大小
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchMatchRequest {
    pub orders: Vec<Order>,
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub batch_size: Option<usize>,
}

/// 响应体
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchResponse {
    pub matches: Vec<Match>,
}

/// 错误响应体
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("export failed: {0}")]
    Export(#[from] csv::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Match(MatchError::InvalidBatchSize) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!("Request failed: {}", self);

        let body = ErrorResponse {
            success: false,
            message: format!("Error: {}", self),
        };
        (status, Json(body)).into_response()
    }
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

async fn run_match(
    scheduler: &BatchScheduler,
    orders: Vec<Order>,
    transactions: Vec<Transaction>,
    batch_size: Option<usize>,
) -> Result<Vec<Match>, ApiError> {
    let started = Instant::now();
    let (order_count, txn_count) = (orders.len(), transactions.len());

    let matches = scheduler
        .batched_match_orders(orders, transactions, batch_size)
        .await?;

    let summary = MatchSummary::from_matches(&matches);
    tracing::info!(
        "Matched {} transactions to {} orders in {:?} (high: {}, medium: {}, low: {})",
        txn_count,
        order_count,
        started.elapsed(),
        summary.high,
        summary.medium,
        summary.low
    );
    Ok(matches)
}

/// 匹配接口 (使用配置的批次大小)
pub async fn match_orders(
    State(state): State<AppState>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
    let matches = run_match(&state.scheduler, req.orders, req.transactions, None).await?;
    Ok(Json(MatchResponse { matches }))
}

/// 批量匹配接口 (请求可指定批次大小)
pub async fn batch_match(
    State(state): State<AppState>,
    Json(req): Json<BatchMatchRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
    let matches = run_match(
        &state.scheduler,
        req.orders,
        req.transactions,
        req.batch_size,
    )
    .await?;
    Ok(Json(MatchResponse { matches }))
}

/// 匹配并导出 CSV
pub async fn match_csv(
    State(state): State<AppState>,
    Json(req): Json<MatchRequest>,
) -> Result<Response, ApiError> {
    let matches = run_match(&state.scheduler, req.orders, req.transactions, None).await?;
    let body = matches_to_csv(&matches)?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        body,
    )
        .into_response())
}
