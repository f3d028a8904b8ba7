//! 倍数表加载
//!
//! 倍数表是带表头的分隔文本，必须包含商品编码列和倍数列。先按分号解析，
//! 表头不满足要求时再按逗号解析。无法解析的行直接跳过，不影响整体加载。

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{ReconcileError, Result};
use crate::models::MultipleTable;

/// 商品编码列
pub const ITEM_COLUMN: &str = "Número do modelo";
/// 倍数列
pub const MULTIPLE_COLUMN: &str = "Quantidade solicitada";

/// 依次尝试的分隔符
const DELIMITERS: [u8; 2] = [b';', b','];

/// 加载结果
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub table: MultipleTable,
    pub delimiter: u8,
    pub rows_read: usize,
    pub rows_skipped: usize,
}

/// 从文件加载倍数表（异步读取，不阻塞运行时）
pub async fn load_multiple_table_from_path(path: &Path) -> Result<LoadReport> {
    let bytes = tokio::fs::read(path).await?;
    let report = load_multiple_table(&bytes)?;
    info!(
        "Loaded {} multiples from {} ({} rows, {} skipped)",
        report.table.len(),
        path.display(),
        report.rows_read,
        report.rows_skipped
    );
    Ok(report)
}

/// 从内存内容加载倍数表
pub fn load_multiple_table(bytes: &[u8]) -> Result<LoadReport> {
    let content = decode_text(bytes);

    for &delimiter in &DELIMITERS {
        if let Some(report) = parse_with_delimiter(&content, delimiter) {
            if report.rows_skipped > 0 {
                warn!(
                    "Skipped {} unparsable rows in multiple table",
                    report.rows_skipped
                );
            }
            return Ok(report);
        }
    }

    Err(ReconcileError::Configuration(format!(
        "the multiple table needs the columns '{}' and '{}'",
        ITEM_COLUMN, MULTIPLE_COLUMN
    )))
}

/// 按给定分隔符解析；表头缺少必需列时返回 None
fn parse_with_delimiter(content: &str, delimiter: u8) -> Option<LoadReport> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .ok()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let item_idx = headers.iter().position(|h| h == ITEM_COLUMN)?;
    let multiple_idx = headers.iter().position(|h| h == MULTIPLE_COLUMN)?;

    let mut table = MultipleTable::new();
    let mut rows_read = 0;
    let mut rows_skipped = 0;

    for (row, record) in reader.records().enumerate() {
        rows_read += 1;

        let record = match record {
            Ok(r) => r,
            Err(e) => {
                debug!("multiple table row {}: {}", row + 1, e);
                rows_skipped += 1;
                continue;
            }
        };

        let item = record.get(item_idx).unwrap_or("").trim();
        let raw_multiple = record.get(multiple_idx).unwrap_or("");

        let inserted = parse_multiple(raw_multiple)
            .map(|multiple| table.insert(item, multiple))
            .unwrap_or(false);
        if !inserted {
            debug!(
                "multiple table row {}: item {:?} has invalid multiple {:?}",
                row + 1,
                item,
                raw_multiple
            );
            rows_skipped += 1;
        }
    }

    Some(LoadReport {
        table,
        delimiter,
        rows_read,
        rows_skipped,
    })
}

/// 先按浮点解析再截断为整数，倍数必须为正
fn parse_multiple(raw: &str) -> Option<i64> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    let truncated = value.trunc();
    if truncated < 1.0 || truncated > i64::MAX as f64 {
        return None;
    }
    Some(truncated as i64)
}

/// UTF-8 优先，失败时按 Windows-1252 解码；去掉 BOM
pub(crate) fn decode_text(bytes: &[u8]) -> String {
    let text = match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    };

    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}
