//! 倍数规则的性质测试

use order_multiples::models::{
    CellValue, ColumnMapping, LineStatus, MultipleTable, OrderTable, ResolvedColumn,
};
use order_multiples::service::{decide, partition, reconcile};
use proptest::prelude::*;

fn mapping() -> ColumnMapping {
    ColumnMapping {
        identifier: ResolvedColumn {
            name: "sku".into(),
            index: 0,
        },
        quantity: ResolvedColumn {
            name: "qty".into(),
            index: 1,
        },
    }
}

fn arb_order() -> impl Strategy<Value = (OrderTable, MultipleTable)> {
    let items = proptest::collection::vec(("[A-D][0-9]", -50i64..500), 0..40);
    let multiples = proptest::collection::vec(("[A-D][0-9]", 1i64..50), 0..20);

    (items, multiples).prop_map(|(items, multiples)| {
        let mut table = OrderTable::new(vec!["sku".into(), "qty".into()]);
        for (sku, qty) in items {
            table.push_row(vec![CellValue::Text(sku), CellValue::Text(qty.to_string())]);
        }
        (table, multiples.into_iter().collect())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn adjusted_is_floor_multiple(requested in 0i64..1_000_000, multiple in 1i64..10_000) {
        let decision = decide(requested, Some(multiple));

        if requested >= multiple {
            prop_assert_eq!(decision.adjusted_quantity, (requested / multiple) * multiple);
            prop_assert!(decision.adjusted_quantity <= requested);
            prop_assert_eq!(decision.adjusted_quantity % multiple, 0);
        } else {
            prop_assert_eq!(decision.status, LineStatus::BelowMinimum);
            prop_assert_eq!(decision.adjusted_quantity, 0);
        }
    }

    #[test]
    fn decision_is_deterministic(requested in any::<i64>(), multiple in proptest::option::of(1i64..10_000)) {
        prop_assert_eq!(decide(requested, multiple), decide(requested, multiple));
    }

    #[test]
    fn adjusting_twice_changes_nothing(requested in 0i64..1_000_000, multiple in 1i64..10_000) {
        let first = decide(requested, Some(multiple));
        prop_assume!(first.status == LineStatus::Adjusted || first.status == LineStatus::Ok);

        let second = decide(first.adjusted_quantity, Some(multiple));
        prop_assert_eq!(second.status, LineStatus::Ok);
        prop_assert_eq!(second.adjusted_quantity, first.adjusted_quantity);
    }

    #[test]
    fn missing_multiple_keeps_quantity(requested in any::<i64>()) {
        let decision = decide(requested, None);
        prop_assert_eq!(decision.status, LineStatus::MissingMultiple);
        prop_assert_eq!(decision.adjusted_quantity, requested);
    }

    #[test]
    fn no_row_is_dropped((table, multiples) in arb_order()) {
        let lines = reconcile(&table, &mapping(), &multiples);
        prop_assert_eq!(lines.len(), table.len());

        let result = partition(&lines, 1);
        for line in &lines {
            let row = line.line.row_index;
            let in_accepted = result.accepted.iter().any(|l| l.line.row_index == row);
            let in_review = result.review.iter().any(|l| l.line.row_index == row);

            prop_assert_eq!(in_accepted, line.status != LineStatus::BelowMinimum);
            prop_assert_eq!(
                in_review,
                matches!(line.status, LineStatus::BelowMinimum | LineStatus::MissingMultiple)
            );
        }

        // 两个集合都保持输入顺序
        let accepted_rows: Vec<_> = result.accepted.iter().map(|l| l.line.row_index).collect();
        let review_rows: Vec<_> = result.review.iter().map(|l| l.line.row_index).collect();
        prop_assert!(accepted_rows.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(review_rows.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn rerunning_accepted_set_is_stable((table, multiples) in arb_order()) {
        let lines = reconcile(&table, &mapping(), &multiples);
        let result = partition(&lines, 1);

        let mut rerun = OrderTable::new(table.headers.clone());
        for line in result.accepted.iter().filter(|l| l.status != LineStatus::MissingMultiple) {
            rerun.push_row(line.line.cells.clone());
        }

        for line in reconcile(&rerun, &mapping(), &multiples) {
            prop_assert_eq!(line.status, LineStatus::Ok);
            prop_assert_eq!(line.adjusted_quantity, line.line.requested);
        }
    }
}
