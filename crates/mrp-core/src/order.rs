//! 未結需求訂單模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bom_core::ItemCode;

/// 需求訂單來源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSource {
    /// 製造訂單
    Manufacturing,
    /// 採購訂單
    Purchase,
}

/// 未結需求訂單（MRP 的需求輸入）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenOrder {
    /// 訂單 ID
    pub id: Uuid,

    /// 品目代碼
    pub item_code: ItemCode,

    /// 計劃數量
    pub quantity: Decimal,

    /// 納期
    pub due_date: NaiveDate,

    /// 訂單來源
    pub source: OrderSource,

    /// 來源單據號碼
    pub source_ref: Option<String>,
}

impl OpenOrder {
    /// 創建新的需求訂單
    pub fn new(
        item_code: impl Into<ItemCode>,
        quantity: Decimal,
        due_date: NaiveDate,
        source: OrderSource,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            item_code: item_code.into(),
            quantity,
            due_date,
            source,
            source_ref: None,
        }
    }

    /// 建構器模式：設置來源單據
    pub fn with_source_ref(mut self, source_ref: impl Into<String>) -> Self {
        self.source_ref = Some(source_ref.into());
        self
    }
}
