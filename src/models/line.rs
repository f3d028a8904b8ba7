use serde::{Deserialize, Serialize};

use super::table::CellValue;

/// 行状态（互斥且完备）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStatus {
    /// 数量恰为倍数的整数倍
    Ok,
    /// 向下调整到最近的整数倍
    Adjusted,
    /// 低于最小倍数，数量置 0
    BelowMinimum,
    /// 倍数表中没有该商品
    MissingMultiple,
}

impl LineStatus {
    pub const ALL: [LineStatus; 4] = [
        LineStatus::Ok,
        LineStatus::Adjusted,
        LineStatus::BelowMinimum,
        LineStatus::MissingMultiple,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LineStatus::Ok => "ok",
            LineStatus::Adjusted => "adjusted",
            LineStatus::BelowMinimum => "below_minimum",
            LineStatus::MissingMultiple => "missing_multiple",
        }
    }

    /// 是否进入下单集合
    pub fn is_accepted(&self) -> bool {
        !matches!(self, LineStatus::BelowMinimum)
    }

    /// 是否进入人工复核集合
    pub fn needs_review(&self) -> bool {
        matches!(self, LineStatus::BelowMinimum | LineStatus::MissingMultiple)
    }
}

/// 订单行：原始单元格 + 识别出的商品编码与请求数量
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    /// 在输入表中的行号（从 0 开始，不含表头）
    pub row_index: usize,
    pub cells: Vec<CellValue>,
    pub item: String,
    pub requested: i64,
}

/// 对账后的订单行
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledLine {
    pub line: OrderLine,
    pub status: LineStatus,
    pub adjusted_quantity: i64,
}
