pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod storage;

pub use api::AppState;
pub use config::AppConfig;
pub use error::{ReconcileError, Result};
pub use service::ReconcileService;
