use std::path::PathBuf;

use tracing::info;

use crate::config::{OutputConfig, StorageConfig};
use crate::error::Result;
use crate::models::{ColumnMapping, MultipleTable, OrderTable, ReconcileSummary, ResultSet};
use crate::service::{detector, engine, formatter, loader, partition};

/// 单次对账的完整结果
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    pub headers: Vec<String>,
    pub mapping: ColumnMapping,
    pub result: ResultSet,
    pub summary: ReconcileSummary,
}

/// 对账服务：列识别 -> 逐行对账 -> 分区 -> 输出工作簿
pub struct ReconcileService {
    multiples_path: PathBuf,
    output: OutputConfig,
}

impl ReconcileService {
    pub fn new(storage: &StorageConfig, output: OutputConfig) -> Self {
        Self {
            multiples_path: storage.multiples_path.clone(),
            output,
        }
    }

    pub fn output_config(&self) -> &OutputConfig {
        &self.output
    }

    /// 重新读取倍数表（每次请求一次，不做跨请求缓存）
    pub async fn load_multiples(&self) -> Result<MultipleTable> {
        Ok(loader::load_multiple_table_from_path(&self.multiples_path)
            .await?
            .table)
    }

    /// 对订单表执行对账
    pub fn run(&self, table: &OrderTable, multiples: &MultipleTable) -> Result<ReconcileOutcome> {
        // 1. 识别列，识别失败直接终止
        let mapping = detector::detect_columns(&table.headers)?;
        info!(
            "Detected columns: identifier={:?}, quantity={:?}",
            mapping.identifier.name,
            mapping.quantity.name
        );

        // 2. 逐行对账
        let lines = engine::reconcile(table, &mapping, multiples);

        // 3. 分区
        let result = partition::partition(&lines, mapping.quantity.index);
        let summary = ReconcileSummary::new(&lines, &result);

        info!(
            "Reconcile finished: total={}, ok={}, adjusted={}, below_minimum={}, missing_multiple={}",
            summary.total,
            summary.ok,
            summary.adjusted,
            summary.below_minimum,
            summary.missing_multiple
        );

        Ok(ReconcileOutcome {
            headers: table.headers.clone(),
            mapping,
            result,
            summary,
        })
    }

    /// 渲染结果工作簿
    pub fn render(&self, outcome: &ReconcileOutcome) -> Result<Vec<u8>> {
        formatter::render_workbook(&outcome.result, &outcome.headers, &self.output)
    }
}
