pub mod handlers;

pub use handlers::*;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;

use crate::config::AppConfig;
use crate::service::ReconcileService;
use crate::storage::ArtifactStore;

/// 共享状态
pub struct AppState {
    pub config: AppConfig,
    pub store: ArtifactStore,
    pub service: ReconcileService,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store = ArtifactStore::new(&config.storage);
        let service = ReconcileService::new(&config.storage, config.output.clone());
        Self {
            config,
            store,
            service,
        }
    }
}

/// 构建路由
pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.server.max_upload_bytes;

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/reconcile", post(reconcile_upload))
        .route("/download/:filename", get(download))
        .layer(ServiceBuilder::new().layer(DefaultBodyLimit::max(body_limit)))
        .with_state(state)
}
