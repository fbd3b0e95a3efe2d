//! 品目主檔模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 品目代碼
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCode(String);

impl ItemCode {
    /// 創建新的品目代碼
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// 取得字串表示
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ItemCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for ItemCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

/// 品目區分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemCategory {
    /// 製品
    Product,
    /// 半製品
    SemiProduct,
    /// 部品
    Part,
    /// 材料
    Material,
}

impl ItemCategory {
    /// 檢查是否為自製區分（需生產）
    pub fn is_manufactured(&self) -> bool {
        matches!(self, ItemCategory::Product | ItemCategory::SemiProduct)
    }

    /// 檢查是否為採購區分
    pub fn is_purchased(&self) -> bool {
        matches!(self, ItemCategory::Part | ItemCategory::Material)
    }
}

/// 單位主檔
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    /// 單位代碼
    pub unit_code: String,

    /// 單位名稱
    pub unit_name: String,

    /// 小數位數
    pub decimal_places: u32,
}

impl Unit {
    /// 創建新的單位
    pub fn new(unit_code: impl Into<String>, unit_name: impl Into<String>) -> Self {
        Self {
            unit_code: unit_code.into(),
            unit_name: unit_name.into(),
            decimal_places: 0,
        }
    }

    /// 建構器模式：設置小數位數
    pub fn with_decimal_places(mut self, decimal_places: u32) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    /// 依單位精度進位數量
    pub fn round(&self, quantity: Decimal) -> Decimal {
        quantity.round_dp_with_strategy(
            self.decimal_places,
            rust_decimal::RoundingStrategy::AwayFromZero,
        )
    }
}

/// 品目主檔（計劃參數含提前期、安全庫存、批量規則）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// 品目代碼
    pub item_code: ItemCode,

    /// 品目名稱
    pub item_name: String,

    /// 品目區分
    pub category: ItemCategory,

    /// 單位代碼
    pub unit_code: String,

    /// 生效日
    pub effective_from: NaiveDate,

    /// 提前期（天）
    pub lead_time_days: u32,

    /// 安全提前期（天）
    pub safety_lead_time_days: u32,

    /// 安全庫存
    pub safety_stock: Decimal,

    /// 最小批量
    pub min_lot_size: Option<Decimal>,

    /// 批量增分
    pub lot_increment: Option<Decimal>,

    /// 最大批量
    pub max_lot_size: Option<Decimal>,

    /// 保存期限（天）
    pub shelf_life_days: Option<u32>,
}

impl Item {
    /// 創建新的品目
    pub fn new(
        item_code: impl Into<ItemCode>,
        item_name: impl Into<String>,
        category: ItemCategory,
        unit_code: impl Into<String>,
    ) -> Self {
        Self {
            item_code: item_code.into(),
            item_name: item_name.into(),
            category,
            unit_code: unit_code.into(),
            effective_from: NaiveDate::MIN,
            lead_time_days: 0,
            safety_lead_time_days: 0,
            safety_stock: Decimal::ZERO,
            min_lot_size: None,
            lot_increment: None,
            max_lot_size: None,
            shelf_life_days: None,
        }
    }

    /// 建構器模式：設置生效日
    pub fn with_effective_from(mut self, effective_from: NaiveDate) -> Self {
        self.effective_from = effective_from;
        self
    }

    /// 建構器模式：設置提前期
    pub fn with_lead_time(mut self, days: u32) -> Self {
        self.lead_time_days = days;
        self
    }

    /// 建構器模式：設置安全提前期
    pub fn with_safety_lead_time(mut self, days: u32) -> Self {
        self.safety_lead_time_days = days;
        self
    }

    /// 建構器模式：設置安全庫存
    pub fn with_safety_stock(mut self, quantity: Decimal) -> Self {
        self.safety_stock = quantity;
        self
    }

    /// 建構器模式：設置最小批量
    pub fn with_min_lot_size(mut self, quantity: Decimal) -> Self {
        self.min_lot_size = Some(quantity);
        self
    }

    /// 建構器模式：設置批量增分
    pub fn with_lot_increment(mut self, quantity: Decimal) -> Self {
        self.lot_increment = Some(quantity);
        self
    }

    /// 建構器模式：設置最大批量
    pub fn with_max_lot_size(mut self, quantity: Decimal) -> Self {
        self.max_lot_size = Some(quantity);
        self
    }

    /// 建構器模式：設置保存期限
    pub fn with_shelf_life(mut self, days: u32) -> Self {
        self.shelf_life_days = Some(days);
        self
    }

    /// 下單日推算天數（提前期 + 安全提前期）
    pub fn order_offset_days(&self) -> u32 {
        self.lead_time_days + self.safety_lead_time_days
    }

    /// 調整訂購量以符合批量規則
    ///
    /// 不足最小批量時補足到最小批量，超過時以批量增分向上取整。
    /// 最大批量由計劃層處理（可能拆分為多張訂單）。
    pub fn adjust_lot_quantity(&self, quantity: Decimal) -> Decimal {
        let min_lot = match self.min_lot_size {
            Some(min) if min > Decimal::ZERO => min,
            _ => Decimal::ONE,
        };
        let increment = match self.lot_increment {
            Some(inc) if inc > Decimal::ZERO => inc,
            _ => Decimal::ONE,
        };

        if quantity <= min_lot {
            return min_lot;
        }

        let excess = quantity - min_lot;
        let steps = (excess / increment).ceil();
        min_lot + increment * steps
    }
}
