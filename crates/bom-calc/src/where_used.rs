//! 逆展開（使用先查詢）

use std::collections::{HashSet, VecDeque};

use bom_core::ItemCode;
use bom_graph::BomGraph;

/// 逆展開計算器
pub struct WhereUsedCalculator;

impl WhereUsedCalculator {
    /// 多層逆展開：找出所有直接或間接使用指定品目的親品目
    ///
    /// 以廣度優先走訪逆向鄰接，由近而遠回傳，不含起點本身。
    pub fn where_used(graph: &BomGraph, item_code: &ItemCode) -> Vec<ItemCode> {
        let mut visited: HashSet<ItemCode> = HashSet::new();
        let mut queue: VecDeque<ItemCode> = VecDeque::new();
        let mut result: Vec<ItemCode> = Vec::new();

        queue.push_back(item_code.clone());
        visited.insert(item_code.clone());

        while let Some(current) = queue.pop_front() {
            for edge in graph.parents_of(&current) {
                let parent = &edge.parent_item_code;
                if visited.insert(parent.clone()) {
                    result.push(parent.clone());
                    queue.push_back(parent.clone());
                }
            }
        }

        result
    }
}
