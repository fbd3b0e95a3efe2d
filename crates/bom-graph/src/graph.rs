//! BOM 鄰接結構

use std::collections::{BTreeSet, HashMap, VecDeque};

use chrono::NaiveDate;

use bom_core::{BomEdge, BomError, ItemCode, Result};

use crate::cycle;

/// BOM 圖
///
/// 以單一生效日快照建立的鄰接結構。建立時即完成邊驗證與循環檢查，
/// 回傳的圖保證為有向無環圖。
#[derive(Debug, Clone)]
pub struct BomGraph {
    /// 快照生效日
    as_of: NaiveDate,

    /// 親品目 -> 子邊（依 sequence 排序）
    children: HashMap<ItemCode, Vec<BomEdge>>,

    /// 子品目 -> 親邊
    parents: HashMap<ItemCode, Vec<BomEdge>>,

    /// 圖中所有品目代碼
    nodes: BTreeSet<ItemCode>,

    /// 邊數
    edge_count: usize,
}

impl BomGraph {
    /// 以生效日篩選 BOM 邊並建立圖
    ///
    /// 無效邊（自我參照、非正基準數量、不良率超界）與循環參照
    /// 都會使建立失敗。
    pub fn build(edges: Vec<BomEdge>, as_of: NaiveDate) -> Result<Self> {
        let mut children: HashMap<ItemCode, Vec<BomEdge>> = HashMap::new();
        let mut parents: HashMap<ItemCode, Vec<BomEdge>> = HashMap::new();
        let mut nodes: BTreeSet<ItemCode> = BTreeSet::new();
        let mut edge_count = 0;

        for edge in edges {
            if !edge.is_effective_at(as_of) {
                continue;
            }
            edge.validate()?;

            nodes.insert(edge.parent_item_code.clone());
            nodes.insert(edge.child_item_code.clone());

            parents
                .entry(edge.child_item_code.clone())
                .or_default()
                .push(edge.clone());
            children
                .entry(edge.parent_item_code.clone())
                .or_default()
                .push(edge);
            edge_count += 1;
        }

        for edge_list in children.values_mut() {
            edge_list.sort_by_key(|e| e.sequence);
        }
        for edge_list in parents.values_mut() {
            edge_list.sort_by_key(|e| e.sequence);
        }

        let graph = Self {
            as_of,
            children,
            parents,
            nodes,
            edge_count,
        };

        // 循環檢查在建立時執行一次，之後的展開呼叫不再重複付出 O(V+E)
        if let Some(path) = cycle::find_cycle(&graph) {
            return Err(BomError::CycleDetected {
                path: path
                    .iter()
                    .map(ItemCode::as_str)
                    .collect::<Vec<_>>()
                    .join(" -> "),
            });
        }

        tracing::debug!(
            as_of = %graph.as_of,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "BOM 圖建立完成"
        );

        Ok(graph)
    }

    /// 快照生效日
    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// 單層展開：取得品目的子邊（葉品目回傳空切片）
    pub fn children_of(&self, item_code: &ItemCode) -> &[BomEdge] {
        self.children
            .get(item_code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 單層逆展開：取得品目的親邊（未被使用時回傳空切片）
    pub fn parents_of(&self, item_code: &ItemCode) -> &[BomEdge] {
        self.parents
            .get(item_code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 檢查品目是否為葉品目（無子邊）
    pub fn is_leaf(&self, item_code: &ItemCode) -> bool {
        self.children_of(item_code).is_empty()
    }

    /// 檢查品目是否存在於圖中
    pub fn contains(&self, item_code: &ItemCode) -> bool {
        self.nodes.contains(item_code)
    }

    /// 圖中品目數
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// 圖中邊數
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// 迭代圖中所有品目代碼
    pub fn nodes(&self) -> impl Iterator<Item = &ItemCode> {
        self.nodes.iter()
    }

    /// 拓撲排序（親品目在前、子品目在後）
    ///
    /// 使用 Kahn 演算法。圖在建立時已確認無循環，結果必含所有節點。
    pub fn topological_order(&self) -> Vec<ItemCode> {
        let mut in_degree: HashMap<&ItemCode, usize> =
            self.nodes.iter().map(|code| (code, 0)).collect();
        for edges in self.children.values() {
            for edge in edges {
                if let Some(degree) = in_degree.get_mut(&edge.child_item_code) {
                    *degree += 1;
                }
            }
        }

        // BTreeSet 迭代順序固定，輸出具決定性
        let mut queue: VecDeque<&ItemCode> = self
            .nodes
            .iter()
            .filter(|code| in_degree[*code] == 0)
            .collect();

        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(code) = queue.pop_front() {
            order.push(code.clone());
            for edge in self.children_of(code) {
                if let Some(degree) = in_degree.get_mut(&edge.child_item_code) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(
                            self.nodes
                                .get(&edge.child_item_code)
                                .unwrap_or(&edge.child_item_code),
                        );
                    }
                }
            }
        }

        order
    }
}
