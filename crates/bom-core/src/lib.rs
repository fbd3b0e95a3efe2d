//! # BOM Core
//!
//! 品目主檔與 BOM 邊的核心資料模型

pub mod edge;
pub mod item;

// Re-export 主要類型
pub use edge::BomEdge;
pub use item::{Item, ItemCategory, ItemCode, Unit};

/// BOM 結構錯誤類型
#[derive(Debug, Clone, thiserror::Error)]
pub enum BomError {
    #[error("BOM 自我參照: {0}")]
    SelfReference(String),

    #[error("基準數量必須為正數: {parent} -> {child} (基準數量 {base_quantity})")]
    NonPositiveBaseQuantity {
        parent: String,
        child: String,
        base_quantity: rust_decimal::Decimal,
    },

    #[error("不良率必須在 [0, 1) 區間: {parent} -> {child} (不良率 {defect_rate})")]
    InvalidDefectRate {
        parent: String,
        child: String,
        defect_rate: rust_decimal::Decimal,
    },

    #[error("BOM 存在循環參照: {path}")]
    CycleDetected { path: String },

    #[error("BOM 展開深度超過上限: {item} (深度 {depth})")]
    MaxDepthExceeded { item: String, depth: usize },
}

pub type Result<T> = std::result::Result<T, BomError>;
