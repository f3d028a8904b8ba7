use crate::models::{CellValue, ReconciledLine, ResultSet};

/// 将对账结果拆分为下单集合与复核集合
///
/// 下单集合：状态不是 below_minimum 的行，数量列改写为调整后的数量。
/// 复核集合：below_minimum 与 missing_multiple 的行，保持原始数量。
/// missing_multiple 行在两个集合中各出现一次。
pub fn partition(lines: &[ReconciledLine], quantity_column: usize) -> ResultSet {
    let mut result = ResultSet::default();

    for line in lines {
        if line.status.needs_review() {
            result.review.push(line.clone());
        }

        if line.status.is_accepted() {
            let mut accepted = line.clone();
            if let Some(cell) = accepted.line.cells.get_mut(quantity_column) {
                *cell = CellValue::Number(accepted.adjusted_quantity as f64);
            }
            result.accepted.push(accepted);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LineStatus, OrderLine};

    fn line(row_index: usize, qty: &str, status: LineStatus, adjusted: i64) -> ReconciledLine {
        ReconciledLine {
            line: OrderLine {
                row_index,
                cells: vec![
                    CellValue::Text(format!("item-{}", row_index)),
                    CellValue::Text(qty.to_string()),
                ],
                item: format!("item-{}", row_index),
                requested: qty.parse().unwrap_or(0),
            },
            status,
            adjusted_quantity: adjusted,
        }
    }

    fn rows(lines: &[ReconciledLine]) -> Vec<usize> {
        lines.iter().map(|l| l.line.row_index).collect()
    }

    #[test]
    fn membership_and_order() {
        let lines = vec![
            line(0, "10", LineStatus::Adjusted, 6),
            line(1, "5", LineStatus::MissingMultiple, 5),
            line(2, "3", LineStatus::BelowMinimum, 0),
            line(3, "12", LineStatus::Ok, 12),
            line(4, "7", LineStatus::MissingMultiple, 7),
        ];
        let result = partition(&lines, 1);

        assert_eq!(rows(&result.accepted), vec![0, 1, 3, 4]);
        assert_eq!(rows(&result.review), vec![1, 2, 4]);
    }

    #[test]
    fn accepted_quantity_is_overwritten() {
        let lines = vec![
            line(0, "10", LineStatus::Adjusted, 6),
            line(1, "3", LineStatus::BelowMinimum, 0),
        ];
        let result = partition(&lines, 1);

        assert_eq!(result.accepted[0].line.cells[1], CellValue::Number(6.0));
        // 复核集合保留原始数量
        assert_eq!(result.review[0].line.cells[1], CellValue::Text("3".into()));
    }

    #[test]
    fn every_line_lands_somewhere() {
        let lines: Vec<_> = LineStatus::ALL
            .iter()
            .enumerate()
            .map(|(i, s)| line(i, "1", *s, 1))
            .collect();
        let result = partition(&lines, 1);

        for l in &lines {
            let in_accepted = result.accepted.iter().any(|a| a.line.row_index == l.line.row_index);
            let in_review = result.review.iter().any(|r| r.line.row_index == l.line.row_index);
            assert!(in_accepted || in_review);
        }
    }
}
