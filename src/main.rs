use std::sync::Arc;
use stock_scan_rust::{api, service::FixedDelay, AppConfig, InventoryService, LoyverseClient};
use tower::ServiceBuilder;
use tracing::{info, warn};
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 本地时间格式, RUST_LOG 可覆盖级别
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::load()?;
    info!("Starting server with config: {:?}", config);
    if config.loyverse.token.is_empty() {
        warn!("SCANNER__LOYVERSE__TOKEN is not set, Loyverse requests will be rejected");
    }

    // Loyverse 客户端 + 盘点服务
    let client = Arc::new(LoyverseClient::new(&config.loyverse)?);
    let pacing = Arc::new(FixedDelay(config.sync.delay()));
    let service = Arc::new(InventoryService::new(client, pacing));

    let app = api::router(service).layer(ServiceBuilder::new());

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Scanner app listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST /scan             - scan a barcode");
    info!("  GET  /items            - scanned items");
    info!("  GET  /items/export     - scanned items as CSV");
    info!("  POST /update-loyverse  - push counts to Loyverse");
    info!("  POST /reset            - clear all counts");
    info!("  GET  /test-loyverse    - check Loyverse connection");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
