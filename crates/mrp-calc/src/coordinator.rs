//! MRP 執行協調器

use std::collections::HashMap;
use std::time::Instant;

use chrono::NaiveDate;
use rayon::prelude::*;
use rust_decimal::Decimal;

use bom_calc::{ExplosionCalculator, ExplosionOptions};
use bom_core::ItemCode;
use bom_graph::BomGraph;
use mrp_core::{
    ItemMaster, MrpError, MrpResult, MrpWarning, OpenOrder, PlanningDataSource, PlanningHorizon,
    RequirementSet, Result, ScheduledReceipt, StockSnapshot,
};

use crate::netting::NettingCalculator;
use crate::offset::OffsetPlanner;
use crate::shortage::ShortageClassifier;

/// MRP 執行協調器
///
/// 持有單次執行的 BOM 圖與品目主檔快照，驅動
/// 展開、淨需求、提前期推算與安全庫存檢查的完整流程。
/// 跨執行不保留任何狀態。
pub struct MrpRunCoordinator {
    /// BOM 圖（建立時已完成循環檢查）
    graph: BomGraph,

    /// 品目主檔快照
    items: ItemMaster,

    /// 展開選項
    explosion_options: ExplosionOptions,
}

impl MrpRunCoordinator {
    /// 以既有快照創建協調器
    pub fn new(graph: BomGraph, items: ItemMaster) -> Self {
        Self {
            graph,
            items,
            explosion_options: ExplosionOptions::default(),
        }
    }

    /// 建構器模式：設置展開選項
    pub fn with_explosion_options(mut self, options: ExplosionOptions) -> Self {
        self.explosion_options = options;
        self
    }

    /// 由資料來源載入快照並創建協調器
    ///
    /// 所有外部讀取集中在此步驟，BOM 循環在圖建立時即檢出並中止。
    pub fn initialize(source: &impl PlanningDataSource, as_of: NaiveDate) -> Result<Self> {
        let items = ItemMaster::new(source.find_items(as_of), source.find_units());
        let graph = BomGraph::build(source.find_bom_edges(as_of), as_of)?;
        Ok(Self::new(graph, items))
    }

    /// 載入並執行一輪 MRP
    pub fn execute(
        source: &impl PlanningDataSource,
        as_of: NaiveDate,
        horizon: &PlanningHorizon,
    ) -> Result<MrpResult> {
        let coordinator = Self::initialize(source, as_of)?;
        let orders = source.find_open_orders(horizon);
        let stock = StockSnapshot::from_positions(&source.find_stock_positions());
        let receipts = source.find_scheduled_receipts(horizon);
        coordinator.run(horizon, &orders, &stock, &receipts)
    }

    /// 執行一輪 MRP 計算
    pub fn run(
        &self,
        horizon: &PlanningHorizon,
        orders: &[OpenOrder],
        stock: &StockSnapshot,
        receipts: &[ScheduledReceipt],
    ) -> Result<MrpResult> {
        let started = Instant::now();

        // 輸入驗證在任何計算之前
        for order in orders {
            if order.quantity < Decimal::ZERO {
                return Err(MrpError::NegativeOrderQuantity {
                    item: order.item_code.to_string(),
                    quantity: order.quantity,
                });
            }
        }

        tracing::info!(
            orders = orders.len(),
            stock_items = stock.len(),
            receipts = receipts.len(),
            "開始 MRP 計算"
        );

        // Step 1: BOM 展開（訂單彼此獨立，並行展開後於單一合併點歸併）
        tracing::debug!("Step 1: BOM 展開");
        let exploded: Vec<(RequirementSet, Vec<MrpWarning>)> = orders
            .par_iter()
            .map(|order| self.explode_order(order))
            .collect::<Result<_>>()?;

        let mut warnings: Vec<MrpWarning> = Vec::new();
        let mut requirements = RequirementSet::new();
        for (set, mut order_warnings) in exploded {
            requirements = requirements.merge(set);
            warnings.append(&mut order_warnings);
        }
        tracing::debug!(items = requirements.len(), "總需求彙總完成");

        // 單位主檔檢查（缺漏降級為警告）
        if self.items.has_units() {
            for requirement in requirements.iter() {
                if let Some(item) = self.items.find(&requirement.item_code) {
                    if self.items.find_unit(&item.unit_code).is_none() {
                        warnings.push(MrpWarning::warning(
                            item.item_code.clone(),
                            format!("單位主檔不存在: {}", item.unit_code),
                        ));
                    }
                }
            }
        }

        // Step 2: 淨需求計算
        tracing::debug!("Step 2: 淨需求計算");
        let receipt_totals = Self::aggregate_receipts(receipts);
        let net_requirements = NettingCalculator::net(&requirements, stock, &receipt_totals);
        tracing::debug!(items = net_requirements.len(), "淨需求計算完成");

        // Step 3: 提前期推算與計劃訂單產生
        tracing::debug!("Step 3: 計劃訂單產生");
        let mut planned_orders = Vec::new();
        for net in &net_requirements {
            match self.items.find(&net.item_code) {
                Some(item) => {
                    planned_orders.extend(OffsetPlanner::plan(item, net.net_qty, net.needed_by)?);
                }
                None => {
                    warnings.push(MrpWarning::warning(
                        net.item_code.clone(),
                        "品目主檔不存在，無法產生計劃訂單",
                    ));
                }
            }
        }
        planned_orders.sort_by(|a, b| {
            a.item_code
                .cmp(&b.item_code)
                .then(a.due_date.cmp(&b.due_date))
                .then(a.start_date.cmp(&b.start_date))
        });

        // Step 4: 安全庫存檢查（與本輪需求涵蓋無關）
        tracing::debug!("Step 4: 安全庫存檢查");
        let shortage_items = ShortageClassifier::classify(&self.items, stock, horizon.period_start)?;

        let mut result = MrpResult::empty(chrono::Local::now().naive_local(), horizon);
        result.planned_orders = planned_orders;
        result.shortage_items = shortage_items;
        result.warnings = warnings;
        result.calculation_time_ms = Some(started.elapsed().as_millis());

        tracing::info!(
            planned_orders = result.planned_orders.len(),
            shortages = result.shortage_items.len(),
            warnings = result.warnings.len(),
            elapsed_ms = result.calculation_time_ms.unwrap_or_default() as u64,
            "MRP 計算完成"
        );

        Ok(result)
    }

    /// 展開單張訂單為需求集合
    ///
    /// 訂單品目本身也列入需求。主檔缺漏的品目降級為警告，
    /// 結構錯誤（循環、深度超限）則讓整輪執行失敗。
    fn explode_order(&self, order: &OpenOrder) -> Result<(RequirementSet, Vec<MrpWarning>)> {
        let mut set = RequirementSet::new();
        let mut warnings = Vec::new();

        if order.quantity == Decimal::ZERO {
            return Ok((set, warnings));
        }

        if !self.items.contains(&order.item_code) {
            warnings.push(MrpWarning::warning(
                order.item_code.clone(),
                "品目主檔不存在，訂單不列入計劃",
            ));
            return Ok((set, warnings));
        }

        set.add(order.item_code.clone(), order.quantity, order.due_date);

        let explosion = ExplosionCalculator::explode_filtered(
            &self.graph,
            &order.item_code,
            order.quantity,
            &self.explosion_options,
            |code| self.items.contains(code),
        )?;

        for (item_code, quantity) in explosion.totals() {
            set.add(item_code.clone(), *quantity, order.due_date);
        }
        for missing in &explosion.missing_items {
            warnings.push(MrpWarning::warning(
                missing.clone(),
                "品目主檔不存在，該分支不再展開",
            ));
        }

        Ok((set, warnings))
    }

    /// 預計入庫依品目合計
    fn aggregate_receipts(receipts: &[ScheduledReceipt]) -> HashMap<ItemCode, Decimal> {
        let mut totals: HashMap<ItemCode, Decimal> = HashMap::new();
        for receipt in receipts {
            *totals
                .entry(receipt.item_code.clone())
                .or_insert(Decimal::ZERO) += receipt.quantity;
        }
        totals
    }

    /// BOM 圖引用
    pub fn graph(&self) -> &BomGraph {
        &self.graph
    }

    /// 品目主檔引用
    pub fn items(&self) -> &ItemMaster {
        &self.items
    }
}
