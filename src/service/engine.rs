use crate::models::{
    ColumnMapping, LineStatus, MultipleTable, OrderLine, OrderTable, ReconciledLine,
};

/// 单行判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub status: LineStatus,
    pub adjusted_quantity: i64,
}

/// 按倍数规则判定单行
///
/// `multiple` 为 None 表示倍数表中没有该商品。倍数表保证倍数为正，
/// 所以这里不会出现除零。
pub fn decide(requested: i64, multiple: Option<i64>) -> Decision {
    let Some(multiple) = multiple else {
        return Decision {
            status: LineStatus::MissingMultiple,
            adjusted_quantity: requested,
        };
    };

    if requested < multiple {
        return Decision {
            status: LineStatus::BelowMinimum,
            adjusted_quantity: 0,
        };
    }

    // requested >= multiple > 0，整数除法即向下取整
    let adjusted = (requested / multiple) * multiple;
    if adjusted != requested {
        Decision {
            status: LineStatus::Adjusted,
            adjusted_quantity: adjusted,
        }
    } else {
        Decision {
            status: LineStatus::Ok,
            adjusted_quantity: requested,
        }
    }
}

/// 对整张订单表逐行对账，保持输入顺序
pub fn reconcile(
    table: &OrderTable,
    mapping: &ColumnMapping,
    multiples: &MultipleTable,
) -> Vec<ReconciledLine> {
    table
        .rows
        .iter()
        .enumerate()
        .map(|(row_index, cells)| {
            let item = cells
                .get(mapping.identifier.index)
                .map(|c| c.as_identifier())
                .unwrap_or_default();
            let requested = cells
                .get(mapping.quantity.index)
                .map(|c| c.as_quantity())
                .unwrap_or(0);

            let decision = decide(requested, multiples.get(&item));

            ReconciledLine {
                line: OrderLine {
                    row_index,
                    cells: cells.clone(),
                    item,
                    requested,
                },
                status: decision.status,
                adjusted_quantity: decision.adjusted_quantity,
            }
        })
        .collect()
}
