//! BOM 邊模型（親品目與子品目的構成關係）

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::item::ItemCode;
use crate::{BomError, Result};

/// BOM 邊
///
/// 表示生產 `base_quantity` 個親品目需要消耗 `required_quantity` 個子品目，
/// 並以 `defect_rate` 表示該工序的不良損耗比例。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BomEdge {
    /// 邊 ID
    pub id: Uuid,

    /// 親品目代碼
    pub parent_item_code: ItemCode,

    /// 子品目代碼
    pub child_item_code: ItemCode,

    /// 生效日
    pub effective_from: NaiveDate,

    /// 失效日（None 表示無限期）
    pub effective_to: Option<NaiveDate>,

    /// 基準數量（親品目）
    pub base_quantity: Decimal,

    /// 需求數量（每基準數量的子品目用量）
    pub required_quantity: Decimal,

    /// 不良率 [0, 1)
    pub defect_rate: Decimal,

    /// 展開順序
    pub sequence: u32,
}

impl BomEdge {
    /// 創建新的 BOM 邊
    pub fn new(
        parent_item_code: impl Into<ItemCode>,
        child_item_code: impl Into<ItemCode>,
        base_quantity: Decimal,
        required_quantity: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            parent_item_code: parent_item_code.into(),
            child_item_code: child_item_code.into(),
            effective_from: NaiveDate::MIN,
            effective_to: None,
            base_quantity,
            required_quantity,
            defect_rate: Decimal::ZERO,
            sequence: 1,
        }
    }

    /// 建構器模式：設置不良率
    pub fn with_defect_rate(mut self, defect_rate: Decimal) -> Self {
        self.defect_rate = defect_rate;
        self
    }

    /// 建構器模式：設置展開順序
    pub fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = sequence;
        self
    }

    /// 建構器模式：設置有效區間
    pub fn with_effectivity(mut self, from: NaiveDate, to: Option<NaiveDate>) -> Self {
        self.effective_from = from;
        self.effective_to = to;
        self
    }

    /// 檢查指定日期是否在有效區間內
    pub fn is_effective_at(&self, date: NaiveDate) -> bool {
        if date < self.effective_from {
            return false;
        }
        match self.effective_to {
            Some(to) => date <= to,
            None => true,
        }
    }

    /// 每單位親品目的子品目用量
    pub fn quantity_per_parent(&self) -> Decimal {
        self.required_quantity / self.base_quantity
    }

    /// 計算生產 `parent_quantity` 個親品目所需的子品目總量
    ///
    /// 以 `1 / (1 - 不良率)` 膨脹需求量以涵蓋不良損耗。
    pub fn gross_quantity_for(&self, parent_quantity: Decimal) -> Decimal {
        parent_quantity * self.quantity_per_parent() / (Decimal::ONE - self.defect_rate)
    }

    /// 驗證結構完整性
    pub fn validate(&self) -> Result<()> {
        if self.parent_item_code == self.child_item_code {
            return Err(BomError::SelfReference(
                self.parent_item_code.to_string(),
            ));
        }
        if self.base_quantity <= Decimal::ZERO {
            return Err(BomError::NonPositiveBaseQuantity {
                parent: self.parent_item_code.to_string(),
                child: self.child_item_code.to_string(),
                base_quantity: self.base_quantity,
            });
        }
        if self.defect_rate < Decimal::ZERO || self.defect_rate >= Decimal::ONE {
            return Err(BomError::InvalidDefectRate {
                parent: self.parent_item_code.to_string(),
                child: self.child_item_code.to_string(),
                defect_rate: self.defect_rate,
            });
        }
        Ok(())
    }
}
