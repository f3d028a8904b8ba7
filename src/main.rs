use order_multiples::{api, AppConfig, AppState};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::load()?;
    info!("Starting server with config: {:?}", config);

    let state = Arc::new(AppState::new(config));
    state.store.ensure_dirs()?;
    info!(
        "Storage ready: uploads={}, outputs={}",
        state.store.upload_dir().display(),
        state.store.output_dir().display()
    );

    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let app = api::router(state);

    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET  /                     - upload form");
    info!("  POST /api/reconcile        - reconcile an order file");
    info!("  GET  /download/:filename   - download a processed workbook");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
