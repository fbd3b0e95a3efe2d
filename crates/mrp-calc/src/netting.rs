//! 淨需求計算

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use bom_core::ItemCode;
use mrp_core::{RequirementSet, StockSnapshot};

/// 淨需求計算結果
#[derive(Debug, Clone)]
pub struct NetRequirement {
    /// 品目代碼
    pub item_code: ItemCode,

    /// 總需求
    pub gross_qty: Decimal,

    /// 現有庫存
    pub on_hand_qty: Decimal,

    /// 預計入庫（已開立供應）
    pub on_order_qty: Decimal,

    /// 淨需求
    pub net_qty: Decimal,

    /// 最早需求日
    pub needed_by: NaiveDate,
}

/// 淨需求計算器
pub struct NettingCalculator;

impl NettingCalculator {
    /// 計算淨需求
    ///
    /// 淨需求 = max(0, 總需求 - 現有庫存 - 預計入庫)。
    /// 庫存足以涵蓋的品目不會出現在結果中。
    /// 純函數，輸入不被修改。
    pub fn net(
        requirements: &RequirementSet,
        stock: &StockSnapshot,
        receipts: &HashMap<ItemCode, Decimal>,
    ) -> Vec<NetRequirement> {
        let mut results = Vec::new();

        for requirement in requirements.iter() {
            let on_hand = stock.on_hand(&requirement.item_code);
            let on_order = receipts
                .get(&requirement.item_code)
                .copied()
                .unwrap_or(Decimal::ZERO);

            let net = requirement.quantity - on_hand - on_order;
            if net <= Decimal::ZERO {
                continue;
            }

            results.push(NetRequirement {
                item_code: requirement.item_code.clone(),
                gross_qty: requirement.quantity,
                on_hand_qty: on_hand,
                on_order_qty: on_order,
                net_qty: net,
                needed_by: requirement.needed_by,
            });
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mrp_core::StockPosition;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, day).unwrap()
    }

    fn requirements(entries: &[(&str, i64, u32)]) -> RequirementSet {
        let mut set = RequirementSet::new();
        for &(code, quantity, day) in entries {
            set.add(ItemCode::new(code), Decimal::from(quantity), date(day));
        }
        set
    }

    #[test]
    fn test_stock_fully_covers_requirement() {
        // 庫存 10、需求 6：完全涵蓋，不產生淨需求
        let set = requirements(&[("MAT-001", 6, 20)]);
        let stock = StockSnapshot::from_positions(&[StockPosition::new(
            "MAT-001",
            "WH1",
            Decimal::from(10),
        )]);

        let result = NettingCalculator::net(&set, &stock, &HashMap::new());
        assert!(result.is_empty());
    }

    #[test]
    fn test_no_stock_leaves_full_requirement() {
        let set = requirements(&[("MAT-001", 6, 20)]);
        let stock = StockSnapshot::from_positions(&[]);

        let result = NettingCalculator::net(&set, &stock, &HashMap::new());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].net_qty, Decimal::from(6));
        assert_eq!(result[0].needed_by, date(20));
    }

    #[test]
    fn test_partial_coverage() {
        let set = requirements(&[("MAT-001", 100, 20)]);
        let stock = StockSnapshot::from_positions(&[StockPosition::new(
            "MAT-001",
            "WH1",
            Decimal::from(30),
        )]);

        let result = NettingCalculator::net(&set, &stock, &HashMap::new());
        assert_eq!(result[0].net_qty, Decimal::from(70));
        assert_eq!(result[0].on_hand_qty, Decimal::from(30));
    }

    #[test]
    fn test_scheduled_receipts_reduce_net_requirement() {
        let set = requirements(&[("MAT-001", 100, 20)]);
        let stock = StockSnapshot::from_positions(&[StockPosition::new(
            "MAT-001",
            "WH1",
            Decimal::from(30),
        )]);
        let receipts: HashMap<ItemCode, Decimal> =
            [(ItemCode::new("MAT-001"), Decimal::from(50))].into();

        let result = NettingCalculator::net(&set, &stock, &receipts);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].net_qty, Decimal::from(20));
        assert_eq!(result[0].on_order_qty, Decimal::from(50));
    }

    #[test]
    fn test_exact_coverage_is_omitted() {
        let set = requirements(&[("MAT-001", 50, 20)]);
        let stock = StockSnapshot::from_positions(&[StockPosition::new(
            "MAT-001",
            "WH1",
            Decimal::from(50),
        )]);

        let result = NettingCalculator::net(&set, &stock, &HashMap::new());
        assert!(result.is_empty());
    }

    #[test]
    fn test_results_sorted_by_item_code() {
        let set = requirements(&[("PART-001", 5, 20), ("MAT-001", 5, 20)]);
        let stock = StockSnapshot::from_positions(&[]);

        let result = NettingCalculator::net(&set, &stock, &HashMap::new());
        let codes: Vec<&str> = result.iter().map(|r| r.item_code.as_str()).collect();
        assert_eq!(codes, vec!["MAT-001", "PART-001"]);
    }

    #[test]
    fn test_netting_is_pure() {
        let set = requirements(&[("MAT-001", 100, 20)]);
        let stock = StockSnapshot::from_positions(&[StockPosition::new(
            "MAT-001",
            "WH1",
            Decimal::from(30),
        )]);
        let receipts = HashMap::new();

        let first = NettingCalculator::net(&set, &stock, &receipts);
        let second = NettingCalculator::net(&set, &stock, &receipts);

        assert_eq!(first.len(), second.len());
        assert_eq!(first[0].net_qty, second[0].net_qty);
        // 輸入快照不被修改
        assert_eq!(stock.on_hand(&ItemCode::new("MAT-001")), Decimal::from(30));
        assert_eq!(set.quantity_of(&ItemCode::new("MAT-001")), Decimal::from(100));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // 淨需求計算為純函數且結果恆為 max(0, 總需求 - 庫存 - 入庫)
            #[test]
            fn net_matches_closed_form(
                gross in 0u32..100_000,
                on_hand in 0u32..100_000,
                on_order in 0u32..100_000,
            ) {
                let set = requirements(&[("MAT-001", gross as i64, 20)]);
                let stock = StockSnapshot::from_positions(&[StockPosition::new(
                    "MAT-001",
                    "WH1",
                    Decimal::from(on_hand),
                )]);
                let receipts: HashMap<ItemCode, Decimal> =
                    [(ItemCode::new("MAT-001"), Decimal::from(on_order))].into();

                let first = NettingCalculator::net(&set, &stock, &receipts);
                let second = NettingCalculator::net(&set, &stock, &receipts);

                let expected = i64::from(gross) - i64::from(on_hand) - i64::from(on_order);
                if expected > 0 {
                    prop_assert_eq!(first.len(), 1);
                    prop_assert_eq!(first[0].net_qty, Decimal::from(expected));
                } else {
                    prop_assert!(first.is_empty());
                }

                prop_assert_eq!(first.len(), second.len());
            }
        }
    }
}
