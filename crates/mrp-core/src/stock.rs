//! 庫存與預計入庫模型

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bom_core::ItemCode;

/// 庫存明細（品目 x 儲位）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockPosition {
    /// 品目代碼
    pub item_code: ItemCode,

    /// 儲位代碼
    pub location_code: String,

    /// 現有庫存
    pub on_hand_qty: Decimal,
}

impl StockPosition {
    /// 創建新的庫存明細
    pub fn new(
        item_code: impl Into<ItemCode>,
        location_code: impl Into<String>,
        on_hand_qty: Decimal,
    ) -> Self {
        Self {
            item_code: item_code.into(),
            location_code: location_code.into(),
            on_hand_qty,
        }
    }
}

/// 庫存快照
///
/// 單次執行期間的唯讀庫存視圖，同品目跨儲位的數量在載入時合計。
#[derive(Debug, Clone, Default)]
pub struct StockSnapshot {
    on_hand: HashMap<ItemCode, Decimal>,
}

impl StockSnapshot {
    /// 由庫存明細建立快照（同品目合計）
    pub fn from_positions(positions: &[StockPosition]) -> Self {
        let mut on_hand: HashMap<ItemCode, Decimal> = HashMap::new();
        for position in positions {
            *on_hand
                .entry(position.item_code.clone())
                .or_insert(Decimal::ZERO) += position.on_hand_qty;
        }
        Self { on_hand }
    }

    /// 取得品目的現有庫存（無紀錄時為零）
    pub fn on_hand(&self, item_code: &ItemCode) -> Decimal {
        self.on_hand
            .get(item_code)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// 檢查品目是否有庫存紀錄
    pub fn has_record(&self, item_code: &ItemCode) -> bool {
        self.on_hand.contains_key(item_code)
    }

    /// 快照中的品目數
    pub fn len(&self) -> usize {
        self.on_hand.len()
    }

    /// 檢查快照是否為空
    pub fn is_empty(&self) -> bool {
        self.on_hand.is_empty()
    }
}

/// 預計入庫（已開立的供應訂單）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledReceipt {
    /// 入庫 ID
    pub id: Uuid,

    /// 品目代碼
    pub item_code: ItemCode,

    /// 入庫數量
    pub quantity: Decimal,

    /// 預計入庫日
    pub expected_date: NaiveDate,

    /// 來源單據號碼
    pub source_ref: Option<String>,
}

impl ScheduledReceipt {
    /// 創建新的預計入庫
    pub fn new(
        item_code: impl Into<ItemCode>,
        quantity: Decimal,
        expected_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            item_code: item_code.into(),
            quantity,
            expected_date,
            source_ref: None,
        }
    }

    /// 建構器模式：設置來源單據
    pub fn with_source_ref(mut self, source_ref: impl Into<String>) -> Self {
        self.source_ref = Some(source_ref.into());
        self
    }
}
