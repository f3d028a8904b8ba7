use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::line::{LineStatus, ReconciledLine};

/// 分区结果：下单集合与复核集合（均保持输入顺序）
///
/// missing_multiple 行同时出现在两个集合中。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub accepted: Vec<ReconciledLine>,
    pub review: Vec<ReconciledLine>,
}

/// 单次对账统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileSummary {
    pub total: usize,
    pub ok: usize,
    pub adjusted: usize,
    pub below_minimum: usize,
    pub missing_multiple: usize,
    pub accepted: usize,
    pub review: usize,
    pub processed_at: DateTime<Utc>,
}

impl ReconcileSummary {
    pub fn new(lines: &[ReconciledLine], result: &ResultSet) -> Self {
        let count = |status: LineStatus| lines.iter().filter(|l| l.status == status).count();

        Self {
            total: lines.len(),
            ok: count(LineStatus::Ok),
            adjusted: count(LineStatus::Adjusted),
            below_minimum: count(LineStatus::BelowMinimum),
            missing_multiple: count(LineStatus::MissingMultiple),
            accepted: result.accepted.len(),
            review: result.review.len(),
            processed_at: Utc::now(),
        }
    }
}
