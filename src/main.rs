use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;
use xact_matcher::api::{self, AppState};
use xact_matcher::service::RayonExecutor;
use xact_matcher::{AppConfig, BatchScheduler, OrderMatcher};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env()?;
    info!("Starting server with config: {:?}", config);

    // 创建匹配服务
    let weights = config.matching.weights.to_field_weights()?;
    let executor = RayonExecutor::new(config.matching.worker_threads)?;
    let scheduler = BatchScheduler::new(
        OrderMatcher::new(weights),
        Arc::new(executor),
        config.matching.batch_size,
    )?;

    let app = api::router(AppState { scheduler }, config.server.body_limit_bytes);

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST /api/match        - batched match, configured batch size");
    info!("  POST /api/match/batch  - batched match, per-request batch size");
    info!("  POST /api/match/csv    - match and export as CSV");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
