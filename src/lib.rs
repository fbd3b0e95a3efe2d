//! # MRP Engine
//!
//! BOM 展開／逆展開引擎與物料需求計劃（MRP）的統一入口。
//!
//! - [`bom_core`]：品目主檔與 BOM 邊資料模型
//! - [`bom_graph`]：生效日快照的 BOM 鄰接結構與循環檢查
//! - [`bom_calc`]：多層展開與逆展開
//! - [`mrp_core`]：計劃資料模型與資料來源介面
//! - [`mrp_calc`]：淨需求、提前期推算與執行協調
//!
//! 典型流程：
//!
//! ```
//! use bom_core::{BomEdge, Item, ItemCategory};
//! use bom_graph::BomGraph;
//! use chrono::NaiveDate;
//! use mrp_calc::MrpRunCoordinator;
//! use mrp_core::{ItemMaster, OpenOrder, OrderSource, PlanningHorizon, StockSnapshot};
//! use rust_decimal::Decimal;
//!
//! let as_of = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
//! let graph = BomGraph::build(
//!     vec![BomEdge::new("PROD-A001", "SEMI-A001", Decimal::ONE, Decimal::from(2))],
//!     as_of,
//! )
//! .unwrap();
//! let items = ItemMaster::from_items(vec![
//!     Item::new("PROD-A001", "精密軸 A", ItemCategory::Product, "PCS").with_lead_time(7),
//!     Item::new("SEMI-A001", "加工軸", ItemCategory::SemiProduct, "PCS").with_lead_time(5),
//! ]);
//!
//! let horizon = PlanningHorizon::new(
//!     as_of,
//!     NaiveDate::from_ymd_opt(2025, 11, 30).unwrap(),
//! )
//! .unwrap();
//! let orders = vec![OpenOrder::new(
//!     "PROD-A001",
//!     Decimal::from(10),
//!     NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(),
//!     OrderSource::Manufacturing,
//! )];
//!
//! let coordinator = MrpRunCoordinator::new(graph, items);
//! let result = coordinator
//!     .run(&horizon, &orders, &StockSnapshot::default(), &[])
//!     .unwrap();
//! assert_eq!(result.planned_orders.len(), 2);
//! ```

pub use bom_calc;
pub use bom_core;
pub use bom_graph;
pub use mrp_calc;
pub use mrp_core;
