//! # MRP Core
//!
//! 物料需求計劃的核心資料模型與類型定義

pub mod horizon;
pub mod master;
pub mod order;
pub mod plan;
pub mod requirement;
pub mod result;
pub mod stock;

// Re-export 主要類型
pub use horizon::PlanningHorizon;
pub use master::{ItemMaster, PlanningDataSource};
pub use order::{OpenOrder, OrderSource};
pub use plan::{PlannedOrder, PlannedOrderSource};
pub use requirement::{GrossRequirement, RequirementSet};
pub use result::{MrpResult, MrpWarning, ShortageItem, WarningSeverity};
pub use stock::{ScheduledReceipt, StockPosition, StockSnapshot};

/// MRP 錯誤類型
#[derive(Debug, Clone, thiserror::Error)]
pub enum MrpError {
    #[error("BOM 結構錯誤: {0}")]
    Structural(#[from] bom_core::BomError),

    #[error("無效的計劃期間: 起始日 {start} 晚於結束日 {end}")]
    InvalidHorizon {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("訂單數量不可為負數: {item} (數量 {quantity})")]
    NegativeOrderQuantity {
        item: String,
        quantity: rust_decimal::Decimal,
    },

    #[error("計算錯誤: {0}")]
    CalculationError(String),
}

pub type Result<T> = std::result::Result<T, MrpError>;
