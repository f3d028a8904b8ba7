use crate::api::AppState;
use crate::error::{ReconcileError, Result};
use crate::models::ReconcileSummary;
use crate::service::{allowed_file, read_order_table};
use crate::storage::{file_stem, output_filename};
use axum::{
    extract::{Json, Multipart, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const UPLOAD_FORM: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Order multiples</title></head>
<body>
<form method="post" action="/api/reconcile" enctype="multipart/form-data">
  <input type="file" name="file" accept=".csv,.xlsx,.xls">
  <input type="text" name="order_name" placeholder="order name">
  <button type="submit">Process</button>
</form>
</body>
</html>
"#;

/// 对账响应体
#[derive(Debug, Serialize)]
pub struct ReconcileResponse {
    pub success: bool,
    pub message: String,
    pub filename: String,
    pub download_url: String,
    pub summary: ReconcileSummary,
}

/// 错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl IntoResponse for ReconcileError {
    fn into_response(self) -> Response {
        let status = match &self {
            ReconcileError::Detection
            | ReconcileError::UnsupportedFile(_)
            | ReconcileError::OrderRead(_)
            | ReconcileError::Upload(_)
            | ReconcileError::InvalidFilename(_) => StatusCode::BAD_REQUEST,
            ReconcileError::Configuration(_)
            | ReconcileError::Workbook(_)
            | ReconcileError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let response = ErrorResponse {
            success: false,
            message: format!("Error: {}", self),
        };
        (status, Json(response)).into_response()
    }
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 上传页面
pub async fn index() -> Html<&'static str> {
    Html(UPLOAD_FORM)
}

/// 上传订单文件并对账
pub async fn reconcile_upload(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    match process_upload(&state, multipart).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            warn!("Reconcile request failed: {}", e);
            e.into_response()
        }
    }
}

/// 下载输出文件
pub async fn download(State(state): State<Arc<AppState>>, Path(filename): Path<String>) -> Response {
    match state.store.read_output(&filename).await {
        Ok(Some(bytes)) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, XLSX_MIME.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", filename),
                ),
            ],
            bytes,
        )
            .into_response(),
        Ok(None) => {
            let response = ErrorResponse {
                success: false,
                message: format!("File {} not found", filename),
            };
            (StatusCode::NOT_FOUND, Json(response)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

struct Upload {
    filename: String,
    bytes: Vec<u8>,
    order_name: Option<String>,
}

async fn read_multipart(mut multipart: Multipart) -> Result<Upload> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut order_name = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ReconcileError::Upload(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ReconcileError::Upload(e.to_string()))?;
                file = Some((filename, bytes.to_vec()));
            }
            Some("order_name") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ReconcileError::Upload(e.to_string()))?;
                order_name = Some(text);
            }
            _ => {}
        }
    }

    let Some((filename, bytes)) = file else {
        return Err(ReconcileError::Upload("no file sent".to_string()));
    };
    if filename.is_empty() {
        return Err(ReconcileError::Upload("no file selected".to_string()));
    }

    Ok(Upload {
        filename,
        bytes,
        order_name,
    })
}

async fn process_upload(state: &AppState, multipart: Multipart) -> Result<ReconcileResponse> {
    let upload = read_multipart(multipart).await?;
    if !allowed_file(&upload.filename) {
        return Err(ReconcileError::UnsupportedFile(upload.filename));
    }

    // 1. 保存上传文件
    let saved = state.store.save_upload(&upload.filename, &upload.bytes).await?;
    info!("Received order file {} ({} bytes)", saved, upload.bytes.len());

    // 2. 每次请求重新加载倍数表
    let multiples = state.service.load_multiples().await?;

    // 3. 读取订单并对账
    let table = read_order_table(&saved, &upload.bytes)?;
    let outcome = state.service.run(&table, &multiples)?;

    // 4. 输出工作簿
    let order_name = upload
        .order_name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| file_stem(&saved).to_string());
    let out_name = output_filename(&order_name, &state.service.output_config().file_suffix)?;
    let workbook = state.service.render(&outcome)?;
    state.store.write_output(&out_name, &workbook).await?;

    info!("Wrote {} ({} bytes)", out_name, workbook.len());

    Ok(ReconcileResponse {
        success: true,
        message: format!(
            "Processed {} lines: {} to order, {} to review",
            outcome.summary.total, outcome.summary.accepted, outcome.summary.review
        ),
        download_url: format!("/download/{}", out_name),
        filename: out_name,
        summary: outcome.summary,
    })
}
