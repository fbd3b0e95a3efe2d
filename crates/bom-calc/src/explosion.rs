//! 多層 BOM 展開

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use bom_core::{BomError, ItemCode, Result};
use bom_graph::BomGraph;

/// 展開選項
#[derive(Debug, Clone)]
pub struct ExplosionOptions {
    /// 最大展開深度（防止異常資料造成失控計算）
    pub max_depth: usize,
}

impl Default for ExplosionOptions {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

/// 展開明細行（逐層訪問紀錄）
#[derive(Debug, Clone)]
pub struct ExplosionLine {
    /// 層級（直接子件為 1）
    pub level: usize,

    /// 親品目代碼
    pub parent_item_code: ItemCode,

    /// 品目代碼
    pub item_code: ItemCode,

    /// 每單位親品目用量
    pub quantity_per_parent: Decimal,

    /// 該行的總需求量（含不良率膨脹）
    pub required_quantity: Decimal,
}

/// 展開結果
///
/// `totals` 彙總每個品目在所有分支的總需求量（不含展開起點本身）。
#[derive(Debug, Clone)]
pub struct ExplosionResult {
    /// 展開起點品目
    pub root_item_code: ItemCode,

    /// 展開數量
    pub input_quantity: Decimal,

    /// 品目 -> 總需求量
    totals: BTreeMap<ItemCode, Decimal>,

    /// 逐層明細
    pub lines: Vec<ExplosionLine>,

    /// 缺少主檔而被略過的品目
    pub missing_items: Vec<ItemCode>,
}

impl ExplosionResult {
    fn empty(root_item_code: ItemCode, input_quantity: Decimal) -> Self {
        Self {
            root_item_code,
            input_quantity,
            totals: BTreeMap::new(),
            lines: Vec::new(),
            missing_items: Vec::new(),
        }
    }

    /// 取得品目的彙總需求量
    pub fn total_of(&self, item_code: &ItemCode) -> Option<Decimal> {
        self.totals.get(item_code).copied()
    }

    /// 品目 -> 彙總需求量
    pub fn totals(&self) -> &BTreeMap<ItemCode, Decimal> {
        &self.totals
    }

    /// 取出彙總需求量
    pub fn into_totals(self) -> BTreeMap<ItemCode, Decimal> {
        self.totals
    }

    /// 檢查是否沒有任何展開結果
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// 工作清單框架
struct Frame {
    item_code: ItemCode,
    quantity: Decimal,
    level: usize,
    path: Vec<ItemCode>,
}

/// 多層展開計算器
pub struct ExplosionCalculator;

impl ExplosionCalculator {
    /// 多層展開：計算指定數量親品目所需的所有子階品目數量
    pub fn explode(
        graph: &BomGraph,
        item_code: &ItemCode,
        quantity: Decimal,
    ) -> Result<ExplosionResult> {
        Self::explode_filtered(graph, item_code, quantity, &ExplosionOptions::default(), |_| {
            true
        })
    }

    /// 多層展開（附主檔過濾）
    ///
    /// `known` 回傳 false 的品目視為無主檔：其需求仍被記入缺漏清單，
    /// 但該分支不再往下展開。
    pub fn explode_filtered(
        graph: &BomGraph,
        item_code: &ItemCode,
        quantity: Decimal,
        options: &ExplosionOptions,
        known: impl Fn(&ItemCode) -> bool,
    ) -> Result<ExplosionResult> {
        let mut result = ExplosionResult::empty(item_code.clone(), quantity);

        // 數量為零不是錯誤，直接回傳空結果
        if quantity <= Decimal::ZERO {
            return Ok(result);
        }

        let mut missing: BTreeSet<ItemCode> = BTreeSet::new();

        if !known(item_code) {
            missing.insert(item_code.clone());
            result.missing_items = missing.into_iter().collect();
            return Ok(result);
        }

        // 顯式工作清單取代遞迴，路徑集合只追蹤目前分支
        let mut stack = vec![Frame {
            item_code: item_code.clone(),
            quantity,
            level: 0,
            path: vec![item_code.clone()],
        }];

        while let Some(frame) = stack.pop() {
            for edge in graph.children_of(&frame.item_code) {
                let child = edge.child_item_code.clone();

                if frame.path.contains(&child) {
                    let mut path: Vec<&str> =
                        frame.path.iter().map(ItemCode::as_str).collect();
                    path.push(child.as_str());
                    return Err(BomError::CycleDetected {
                        path: path.join(" -> "),
                    });
                }

                let child_level = frame.level + 1;
                if child_level > options.max_depth {
                    return Err(BomError::MaxDepthExceeded {
                        item: child.to_string(),
                        depth: child_level,
                    });
                }

                let child_quantity = edge.gross_quantity_for(frame.quantity);

                if !known(&child) {
                    tracing::debug!(item = %child, "品目缺少主檔，略過該分支");
                    missing.insert(child);
                    continue;
                }

                *result.totals.entry(child.clone()).or_insert(Decimal::ZERO) +=
                    child_quantity;
                result.lines.push(ExplosionLine {
                    level: child_level,
                    parent_item_code: frame.item_code.clone(),
                    item_code: child.clone(),
                    quantity_per_parent: edge.quantity_per_parent(),
                    required_quantity: child_quantity,
                });

                if !graph.is_leaf(&child) {
                    let mut child_path = frame.path.clone();
                    child_path.push(child.clone());
                    stack.push(Frame {
                        item_code: child,
                        quantity: child_quantity,
                        level: child_level,
                        path: child_path,
                    });
                }
            }
        }

        result.missing_items = missing.into_iter().collect();
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use bom_core::BomEdge;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
    }

    fn edge(parent: &str, child: &str, required: i64) -> BomEdge {
        BomEdge::new(parent, child, Decimal::ONE, Decimal::from(required))
    }

    fn total(result: &ExplosionResult, code: &str) -> Decimal {
        result.total_of(&ItemCode::new(code)).unwrap_or(Decimal::ZERO)
    }

    #[test]
    fn test_two_level_explosion() {
        // PROD-A001 --2--> SEMI-A001 --3--> MAT-001
        let graph = BomGraph::build(
            vec![
                edge("PROD-A001", "SEMI-A001", 2),
                edge("SEMI-A001", "MAT-001", 3),
            ],
            as_of(),
        )
        .unwrap();

        let result =
            ExplosionCalculator::explode(&graph, &ItemCode::new("PROD-A001"), Decimal::ONE)
                .unwrap();

        assert_eq!(total(&result, "SEMI-A001"), Decimal::from(2));
        assert_eq!(total(&result, "MAT-001"), Decimal::from(6));
    }

    #[test]
    fn test_explosion_scales_with_quantity() {
        let graph = BomGraph::build(
            vec![
                edge("PROD-A001", "SEMI-A001", 2),
                edge("SEMI-A001", "MAT-001", 3),
            ],
            as_of(),
        )
        .unwrap();

        let result =
            ExplosionCalculator::explode(&graph, &ItemCode::new("PROD-A001"), Decimal::from(10))
                .unwrap();

        assert_eq!(total(&result, "SEMI-A001"), Decimal::from(20));
        assert_eq!(total(&result, "MAT-001"), Decimal::from(60));
    }

    #[test]
    fn test_defect_rate_inflates_requirement() {
        let graph = BomGraph::build(
            vec![
                edge("PROD-A001", "SEMI-A001", 2),
                BomEdge::new("SEMI-A001", "MAT-001", Decimal::ONE, Decimal::from(3))
                    .with_defect_rate(Decimal::new(5, 2)),
            ],
            as_of(),
        )
        .unwrap();

        let result =
            ExplosionCalculator::explode(&graph, &ItemCode::new("PROD-A001"), Decimal::ONE)
                .unwrap();

        // 6 / (1 - 0.05) = 6.3157...
        let mat = total(&result, "MAT-001");
        assert!(mat > Decimal::new(63157, 4));
        assert!(mat < Decimal::new(63158, 4));
    }

    #[test]
    fn test_shared_component_aggregates_across_branches() {
        // ROOT 之下 SUB-A 與 SUB-B 各用 2 個 BOLT，合計應為 4
        let graph = BomGraph::build(
            vec![
                edge("ROOT", "SUB-A", 1),
                edge("ROOT", "SUB-B", 1),
                edge("SUB-A", "BOLT", 2),
                edge("SUB-B", "BOLT", 2),
            ],
            as_of(),
        )
        .unwrap();

        let result =
            ExplosionCalculator::explode(&graph, &ItemCode::new("ROOT"), Decimal::ONE).unwrap();

        assert_eq!(total(&result, "BOLT"), Decimal::from(4));
        assert_eq!(total(&result, "SUB-A"), Decimal::ONE);
        assert_eq!(total(&result, "SUB-B"), Decimal::ONE);
    }

    #[test]
    fn test_zero_quantity_yields_empty_result() {
        let graph = BomGraph::build(vec![edge("PROD-A001", "PART-001", 2)], as_of()).unwrap();

        let result =
            ExplosionCalculator::explode(&graph, &ItemCode::new("PROD-A001"), Decimal::ZERO)
                .unwrap();

        assert!(result.is_empty());
        assert!(result.lines.is_empty());
    }

    #[test]
    fn test_leaf_item_explodes_to_nothing() {
        let graph = BomGraph::build(vec![edge("PROD-A001", "PART-001", 2)], as_of()).unwrap();

        let result =
            ExplosionCalculator::explode(&graph, &ItemCode::new("PART-001"), Decimal::from(5))
                .unwrap();

        assert!(result.is_empty());
    }

    #[test]
    fn test_lines_carry_levels() {
        let graph = BomGraph::build(
            vec![
                edge("PROD-A001", "SEMI-A001", 2),
                edge("SEMI-A001", "MAT-001", 3),
            ],
            as_of(),
        )
        .unwrap();

        let result =
            ExplosionCalculator::explode(&graph, &ItemCode::new("PROD-A001"), Decimal::ONE)
                .unwrap();

        assert_eq!(result.lines.len(), 2);
        let semi = result
            .lines
            .iter()
            .find(|line| line.item_code.as_str() == "SEMI-A001")
            .unwrap();
        assert_eq!(semi.level, 1);
        let mat = result
            .lines
            .iter()
            .find(|line| line.item_code.as_str() == "MAT-001")
            .unwrap();
        assert_eq!(mat.level, 2);
        assert_eq!(mat.parent_item_code.as_str(), "SEMI-A001");
    }

    #[test]
    fn test_max_depth_guard() {
        // 五層鏈狀 BOM，上限設為 3 時應失敗
        let graph = BomGraph::build(
            vec![
                edge("L0", "L1", 1),
                edge("L1", "L2", 1),
                edge("L2", "L3", 1),
                edge("L3", "L4", 1),
                edge("L4", "L5", 1),
            ],
            as_of(),
        )
        .unwrap();

        let options = ExplosionOptions { max_depth: 3 };
        let result = ExplosionCalculator::explode_filtered(
            &graph,
            &ItemCode::new("L0"),
            Decimal::ONE,
            &options,
            |_| true,
        );
        assert!(matches!(result, Err(BomError::MaxDepthExceeded { .. })));
    }

    #[test]
    fn test_unknown_item_prunes_branch() {
        // SEMI-A001 無主檔：其分支不展開，MAT-001 不應出現
        let graph = BomGraph::build(
            vec![
                edge("PROD-A001", "SEMI-A001", 2),
                edge("PROD-A001", "PART-001", 1),
                edge("SEMI-A001", "MAT-001", 3),
            ],
            as_of(),
        )
        .unwrap();

        let result = ExplosionCalculator::explode_filtered(
            &graph,
            &ItemCode::new("PROD-A001"),
            Decimal::ONE,
            &ExplosionOptions::default(),
            |code| code.as_str() != "SEMI-A001",
        )
        .unwrap();

        assert_eq!(total(&result, "PART-001"), Decimal::ONE);
        assert_eq!(result.total_of(&ItemCode::new("SEMI-A001")), None);
        assert_eq!(result.total_of(&ItemCode::new("MAT-001")), None);
        assert_eq!(result.missing_items, vec![ItemCode::new("SEMI-A001")]);
    }

    #[test]
    fn test_unknown_root_yields_missing_only() {
        let graph = BomGraph::build(vec![edge("PROD-A001", "PART-001", 2)], as_of()).unwrap();

        let result = ExplosionCalculator::explode_filtered(
            &graph,
            &ItemCode::new("PROD-A001"),
            Decimal::ONE,
            &ExplosionOptions::default(),
            |_| false,
        )
        .unwrap();

        assert!(result.is_empty());
        assert_eq!(result.missing_items, vec![ItemCode::new("PROD-A001")]);
    }
}
