//! MRP 執行結果模型

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bom_core::ItemCode;

use crate::horizon::PlanningHorizon;
use crate::plan::PlannedOrder;

/// 警告嚴重度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}

/// MRP 警告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MrpWarning {
    /// 品目代碼
    pub item_code: ItemCode,

    /// 警告內容
    pub message: String,

    /// 嚴重度
    pub severity: WarningSeverity,
}

impl MrpWarning {
    pub fn new(
        item_code: impl Into<ItemCode>,
        message: impl Into<String>,
        severity: WarningSeverity,
    ) -> Self {
        Self {
            item_code: item_code.into(),
            message: message.into(),
            severity,
        }
    }

    pub fn info(item_code: impl Into<ItemCode>, message: impl Into<String>) -> Self {
        Self::new(item_code, message, WarningSeverity::Info)
    }

    pub fn warning(item_code: impl Into<ItemCode>, message: impl Into<String>) -> Self {
        Self::new(item_code, message, WarningSeverity::Warning)
    }

    pub fn error(item_code: impl Into<ItemCode>, message: impl Into<String>) -> Self {
        Self::new(item_code, message, WarningSeverity::Error)
    }
}

/// 庫存不足品目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortageItem {
    /// 品目代碼
    pub item_code: ItemCode,

    /// 不足數量（安全庫存 - 現有庫存）
    pub shortage_quantity: Decimal,

    /// 建議下單日
    pub recommended_order_date: NaiveDate,
}

/// MRP 執行結果
///
/// 單次執行的完整輸出，回傳後即不再變動。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MrpResult {
    /// 執行時刻
    pub executed_at: NaiveDateTime,

    /// 期間起始日
    pub period_start: NaiveDate,

    /// 期間結束日
    pub period_end: NaiveDate,

    /// 計劃訂單
    pub planned_orders: Vec<PlannedOrder>,

    /// 庫存不足品目
    pub shortage_items: Vec<ShortageItem>,

    /// 警告清單
    pub warnings: Vec<MrpWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl MrpResult {
    /// 創建空的執行結果
    pub fn empty(executed_at: NaiveDateTime, horizon: &PlanningHorizon) -> Self {
        Self {
            executed_at,
            period_start: horizon.period_start,
            period_end: horizon.period_end,
            planned_orders: Vec::new(),
            shortage_items: Vec::new(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: MrpWarning) {
        self.warnings.push(warning);
    }

    /// 品目的計劃訂單合計數量
    pub fn planned_quantity_of(&self, item_code: &ItemCode) -> Decimal {
        self.planned_orders
            .iter()
            .filter(|order| &order.item_code == item_code)
            .map(|order| order.quantity)
            .sum()
    }

    /// 品目的計劃訂單
    pub fn planned_orders_of(&self, item_code: &ItemCode) -> Vec<&PlannedOrder> {
        self.planned_orders
            .iter()
            .filter(|order| &order.item_code == item_code)
            .collect()
    }

    /// 檢查是否有警告
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
