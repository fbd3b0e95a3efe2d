//! 主檔快照與資料來源介面

use std::collections::HashMap;

use chrono::NaiveDate;

use bom_core::{BomEdge, Item, ItemCode, Unit};

use crate::horizon::PlanningHorizon;
use crate::order::OpenOrder;
use crate::stock::{ScheduledReceipt, StockPosition};

/// 品目主檔快照
///
/// 單次執行期間的唯讀主檔視圖。每次執行重新載入，
/// 不跨執行快取，確保整輪計算看到一致的主檔狀態。
#[derive(Debug, Clone, Default)]
pub struct ItemMaster {
    items: HashMap<ItemCode, Item>,
    units: HashMap<String, Unit>,
}

impl ItemMaster {
    /// 由品目清單建立快照
    pub fn from_items(items: Vec<Item>) -> Self {
        Self::new(items, Vec::new())
    }

    /// 由品目與單位清單建立快照
    pub fn new(items: Vec<Item>, units: Vec<Unit>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|item| (item.item_code.clone(), item))
                .collect(),
            units: units
                .into_iter()
                .map(|unit| (unit.unit_code.clone(), unit))
                .collect(),
        }
    }

    /// 查詢品目
    pub fn find(&self, item_code: &ItemCode) -> Option<&Item> {
        self.items.get(item_code)
    }

    /// 檢查品目是否存在
    pub fn contains(&self, item_code: &ItemCode) -> bool {
        self.items.contains_key(item_code)
    }

    /// 查詢單位
    pub fn find_unit(&self, unit_code: &str) -> Option<&Unit> {
        self.units.get(unit_code)
    }

    /// 檢查是否有任何單位主檔
    pub fn has_units(&self) -> bool {
        !self.units.is_empty()
    }

    /// 迭代所有品目
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// 品目數
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// 檢查快照是否為空
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// 計劃資料來源
///
/// 核心透過此介面於執行開始時一次性載入所有輸入，
/// 之後的計算不再觸及任何外部儲存。
pub trait PlanningDataSource {
    /// 取得指定日期有效的品目主檔
    fn find_items(&self, as_of: NaiveDate) -> Vec<Item>;

    /// 取得單位主檔
    fn find_units(&self) -> Vec<Unit>;

    /// 取得指定日期有效的 BOM 邊
    fn find_bom_edges(&self, as_of: NaiveDate) -> Vec<BomEdge>;

    /// 取得庫存明細快照
    fn find_stock_positions(&self) -> Vec<StockPosition>;

    /// 取得期間內的預計入庫
    fn find_scheduled_receipts(&self, horizon: &PlanningHorizon) -> Vec<ScheduledReceipt>;

    /// 取得期間內的未結需求訂單
    fn find_open_orders(&self, horizon: &PlanningHorizon) -> Vec<OpenOrder>;
}
