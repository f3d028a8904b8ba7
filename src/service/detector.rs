use indexmap::IndexMap;

use crate::error::{ReconcileError, Result};
use crate::models::{ColumnMapping, ResolvedColumn};

/// 商品编码列候选（按优先级）
pub const IDENTIFIER_CANDIDATES: [&str; 8] = [
    "sku",
    "número do modelo",
    "codigo",
    "cod",
    "ean",
    "gtin",
    "produto",
    "product",
];

/// 数量列候选（按优先级）
pub const QUANTITY_CANDIDATES: [&str; 7] = [
    "quantity",
    "qty",
    "qtd",
    "quantidade",
    "quantidade solicitada",
    "amount",
    "amountordered",
];

/// 识别商品编码列与数量列
///
/// 列名不区分大小写；按候选列表顺序（而非表中列顺序）取第一个命中的列。
/// 任一角色没有命中即视为无法识别。
pub fn detect_columns(headers: &[String]) -> Result<ColumnMapping> {
    // 小写列名 -> 列位置；小写后重名时后出现的列覆盖前者
    let mut by_lower: IndexMap<String, usize> = IndexMap::new();
    for (idx, header) in headers.iter().enumerate() {
        by_lower.insert(header.to_lowercase(), idx);
    }

    let resolve = |candidates: &[&str]| {
        candidates.iter().find_map(|c| {
            by_lower.get(*c).map(|&index| ResolvedColumn {
                name: headers[index].clone(),
                index,
            })
        })
    };

    match (
        resolve(&IDENTIFIER_CANDIDATES[..]),
        resolve(&QUANTITY_CANDIDATES[..]),
    ) {
        (Some(identifier), Some(quantity)) => Ok(ColumnMapping {
            identifier,
            quantity,
        }),
        _ => Err(ReconcileError::Detection),
    }
}
