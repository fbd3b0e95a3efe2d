//! BOM 循環檢查

use std::collections::HashMap;

use bom_core::ItemCode;

use crate::graph::BomGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// 未訪問
    White,
    /// 訪問中（在目前路徑上）
    Gray,
    /// 訪問完成
    Black,
}

/// 深度優先搜尋找出循環路徑
///
/// 訪問中節點被再次觸及即為循環，回傳含頭尾重複節點的路徑
/// （例如 A -> B -> C -> A）。無循環時回傳 None。
pub fn find_cycle(graph: &BomGraph) -> Option<Vec<ItemCode>> {
    let mut color: HashMap<&ItemCode, Color> =
        graph.nodes().map(|code| (code, Color::White)).collect();

    for start in graph.nodes() {
        if color[start] != Color::White {
            continue;
        }

        // 顯式堆疊避免深層 BOM 撐爆呼叫堆疊
        let mut stack: Vec<(&ItemCode, usize)> = vec![(start, 0)];
        color.insert(start, Color::Gray);

        while let Some(&(node, edge_index)) = stack.last() {
            let edges = graph.children_of(node);
            if edge_index < edges.len() {
                if let Some(frame) = stack.last_mut() {
                    frame.1 += 1;
                }
                let child = &edges[edge_index].child_item_code;
                match color.get(child).copied().unwrap_or(Color::White) {
                    Color::White => {
                        color.insert(child, Color::Gray);
                        stack.push((child, 0));
                    }
                    Color::Gray => {
                        let mut path: Vec<ItemCode> =
                            stack.iter().map(|&(code, _)| code.clone()).collect();
                        if let Some(pos) = path.iter().position(|code| code == child) {
                            path.drain(..pos);
                        }
                        path.push(child.clone());
                        return Some(path);
                    }
                    Color::Black => {}
                }
            } else {
                color.insert(node, Color::Black);
                stack.pop();
            }
        }
    }

    None
}
