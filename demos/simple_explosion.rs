//! 最小 BOM 展開範例

use bom_calc::{ExplosionCalculator, WhereUsedCalculator};
use bom_core::{BomEdge, ItemCode};
use bom_graph::BomGraph;
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let as_of = NaiveDate::from_ymd_opt(2025, 11, 1).ok_or("invalid date")?;

    // PROD-A001 --2--> SEMI-A001 --3--> MAT-001
    let graph = BomGraph::build(
        vec![
            BomEdge::new("PROD-A001", "SEMI-A001", Decimal::ONE, Decimal::from(2)),
            BomEdge::new("SEMI-A001", "MAT-001", Decimal::ONE, Decimal::from(3))
                .with_defect_rate(Decimal::new(5, 2)),
        ],
        as_of,
    )?;

    let result = ExplosionCalculator::explode(&graph, &ItemCode::new("PROD-A001"), Decimal::ONE)?;

    println!("Explosion of PROD-A001 x 1:");
    for (item_code, quantity) in result.totals() {
        println!("  {item_code}: {quantity}");
    }

    let usage = WhereUsedCalculator::where_used(&graph, &ItemCode::new("MAT-001"));
    println!("\nWhere-used of MAT-001:");
    for item_code in usage {
        println!("  {item_code}");
    }

    Ok(())
}
