//! 計劃訂單模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bom_core::ItemCode;

/// 計劃訂單類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlannedOrderSource {
    /// 自製（製造訂單建議）
    Make,
    /// 採購（採購訂單建議）
    Buy,
}

/// 計劃訂單（MRP 計算結果，不由核心持久化）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedOrder {
    /// 計劃訂單 ID
    pub id: Uuid,

    /// 品目代碼
    pub item_code: ItemCode,

    /// 計劃數量
    pub quantity: Decimal,

    /// 開始日（下單/投產日）
    pub start_date: NaiveDate,

    /// 納期（完成日）
    pub due_date: NaiveDate,

    /// 訂單類型
    pub source: PlannedOrderSource,
}

impl PlannedOrder {
    /// 創建新的計劃訂單
    pub fn new(
        item_code: impl Into<ItemCode>,
        quantity: Decimal,
        start_date: NaiveDate,
        due_date: NaiveDate,
        source: PlannedOrderSource,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            item_code: item_code.into(),
            quantity,
            start_date,
            due_date,
            source,
        }
    }

    /// 開始日到納期的天數
    pub fn offset_days(&self) -> i64 {
        (self.due_date - self.start_date).num_days()
    }

    /// 檢查是否為自製訂單
    pub fn is_make(&self) -> bool {
        self.source == PlannedOrderSource::Make
    }

    /// 檢查是否為採購訂單
    pub fn is_buy(&self) -> bool {
        self.source == PlannedOrderSource::Buy
    }
}
