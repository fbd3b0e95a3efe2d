//! 齒輪箱 MRP 計算完整範例
//!
//! 展示從未結訂單到計劃訂單與安全庫存報告的完整流程

use chrono::NaiveDate;
use rust_decimal::Decimal;

use bom_core::{BomEdge, Item, ItemCategory};
use bom_graph::BomGraph;
use mrp_calc::MrpRunCoordinator;
use mrp_core::{
    ItemMaster, OpenOrder, OrderSource, PlanningHorizon, ScheduledReceipt, StockPosition,
    StockSnapshot,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("===== Gearbox MRP Calculation Example =====\n");

    let as_of = NaiveDate::from_ymd_opt(2025, 11, 1).ok_or("invalid date")?;

    // 步驟 1: 建立 BOM 結構
    println!("[1] Build BOM Graph");
    let graph = BomGraph::build(
        vec![
            // 齒輪箱 = 本體 x1 + 驅動齒輪 x1 + 螺栓組 x4
            BomEdge::new("PROD-B001", "SEMI-B001", Decimal::ONE, Decimal::ONE).with_sequence(1),
            BomEdge::new("PROD-B001", "SEMI-B002", Decimal::ONE, Decimal::ONE).with_sequence(2),
            BomEdge::new("PROD-B001", "PART-005", Decimal::ONE, Decimal::from(4)).with_sequence(3),
            // 本體 = 鋁鑄件素材 x1（不良率 3%）
            BomEdge::new("SEMI-B001", "MAT-002", Decimal::ONE, Decimal::ONE)
                .with_defect_rate(Decimal::new(3, 2)),
            // 驅動齒輪 = 齒輪用素材 0.8 KG（不良率 5%）
            BomEdge::new("SEMI-B002", "MAT-003", Decimal::ONE, Decimal::new(8, 1))
                .with_defect_rate(Decimal::new(5, 2)),
        ],
        as_of,
    )?;
    println!("    Nodes: {}", graph.node_count());
    println!("    Edges: {}\n", graph.edge_count());

    // 步驟 2: 品目主檔
    println!("[2] Load Item Master");
    let items = ItemMaster::from_items(vec![
        Item::new("PROD-B001", "齒輪箱總成", ItemCategory::Product, "PCS")
            .with_lead_time(14)
            .with_safety_stock(Decimal::from(50)),
        Item::new("SEMI-B001", "齒輪箱本體", ItemCategory::SemiProduct, "PCS")
            .with_lead_time(7)
            .with_safety_stock(Decimal::from(60)),
        Item::new("SEMI-B002", "驅動齒輪", ItemCategory::SemiProduct, "PCS")
            .with_lead_time(7)
            .with_safety_stock(Decimal::from(80)),
        Item::new("PART-005", "螺栓組 M6", ItemCategory::Part, "SET")
            .with_lead_time(3)
            .with_min_lot_size(Decimal::from(100))
            .with_lot_increment(Decimal::from(50)),
        Item::new("MAT-002", "鋁鑄件素材", ItemCategory::Material, "PCS")
            .with_lead_time(21)
            .with_safety_lead_time(2)
            .with_safety_stock(Decimal::from(100)),
        Item::new("MAT-003", "齒輪用素材 SCM415", ItemCategory::Material, "KG")
            .with_lead_time(14)
            .with_safety_stock(Decimal::from(300))
            .with_max_lot_size(Decimal::from(200)),
    ]);
    println!("    Items: {}\n", items.len());

    // 步驟 3: 計劃期間與未結訂單
    println!("[3] Planning Horizon and Open Orders");
    let horizon = PlanningHorizon::new(
        as_of,
        NaiveDate::from_ymd_opt(2025, 11, 30).ok_or("invalid date")?,
    )?;
    let orders = vec![
        OpenOrder::new(
            "PROD-B001",
            Decimal::from(120),
            NaiveDate::from_ymd_opt(2025, 11, 21).ok_or("invalid date")?,
            OrderSource::Manufacturing,
        )
        .with_source_ref("MO-2025-101"),
        OpenOrder::new(
            "PROD-B001",
            Decimal::from(80),
            NaiveDate::from_ymd_opt(2025, 11, 28).ok_or("invalid date")?,
            OrderSource::Manufacturing,
        )
        .with_source_ref("MO-2025-102"),
    ];
    println!("    MO-2025-101: 120 PCS due 2025-11-21");
    println!("    MO-2025-102:  80 PCS due 2025-11-28\n");

    // 步驟 4: 庫存快照與預計入庫
    println!("[4] Stock Snapshot and Scheduled Receipts");
    let stock = StockSnapshot::from_positions(&[
        StockPosition::new("PROD-B001", "WH1", Decimal::from(20)),
        StockPosition::new("SEMI-B001", "WH1", Decimal::from(40)),
        StockPosition::new("MAT-003", "WH1", Decimal::from(100)),
    ]);
    let receipts = vec![ScheduledReceipt::new(
        "MAT-002",
        Decimal::from(60),
        NaiveDate::from_ymd_opt(2025, 11, 12).ok_or("invalid date")?,
    )
    .with_source_ref("PO-2025-310")];
    println!("    Stock records: {}", stock.len());
    println!("    Receipts: {}\n", receipts.len());

    // 步驟 5: 執行 MRP
    println!("[5] Run MRP");
    let coordinator = MrpRunCoordinator::new(graph, items);
    let result = coordinator.run(&horizon, &orders, &stock, &receipts)?;

    println!("\n===== Result =====");
    println!("Planned orders ({}):", result.planned_orders.len());
    for order in &result.planned_orders {
        println!(
            "  {:<10} {:>10}  start {}  due {}  [{}]",
            order.item_code,
            order.quantity,
            order.start_date,
            order.due_date,
            if order.is_make() { "MAKE" } else { "BUY" },
        );
    }

    println!("\nShortage items ({}):", result.shortage_items.len());
    for shortage in &result.shortage_items {
        println!(
            "  {:<10} short {:>8}  order by {}",
            shortage.item_code, shortage.shortage_quantity, shortage.recommended_order_date,
        );
    }

    if result.has_warnings() {
        println!("\nWarnings ({}):", result.warnings.len());
        for warning in &result.warnings {
            println!("  {}: {}", warning.item_code, warning.message);
        }
    }

    if let Some(elapsed) = result.calculation_time_ms {
        println!("\nCalculation time: {elapsed} ms");
    }

    Ok(())
}
