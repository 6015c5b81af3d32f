pub mod handlers;

pub use handlers::*;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;

/// 构建路由
pub fn router(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/match", post(match_orders))
        .route("/api/match/batch", post(batch_match))
        .route("/api/match/csv", post(match_csv))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(DefaultBodyLimit::max(body_limit_bytes)))
}
