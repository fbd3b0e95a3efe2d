//! # BOM Calculation
//!
//! 多層 BOM 展開與逆展開計算

pub mod explosion;
pub mod where_used;

// Re-export 主要類型
pub use explosion::{ExplosionCalculator, ExplosionLine, ExplosionOptions, ExplosionResult};
pub use where_used::WhereUsedCalculator;
