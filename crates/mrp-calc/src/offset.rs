//! 提前期推算與計劃訂單產生

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use bom_core::Item;
use mrp_core::{MrpError, PlannedOrder, PlannedOrderSource, Result};

/// 提前期推算計劃器
pub struct OffsetPlanner;

impl OffsetPlanner {
    /// 由納期向前推算開始日（提前期 + 安全提前期）
    pub fn start_date(item: &Item, due_date: NaiveDate) -> Result<NaiveDate> {
        due_date
            .checked_sub_days(Days::new(u64::from(item.order_offset_days())))
            .ok_or_else(|| {
                MrpError::CalculationError(format!(
                    "無法推算開始日: {} 納期 {}",
                    item.item_code, due_date
                ))
            })
    }

    /// 品目區分決定訂單類型
    pub fn order_source(item: &Item) -> PlannedOrderSource {
        if item.category.is_manufactured() {
            PlannedOrderSource::Make
        } else {
            PlannedOrderSource::Buy
        }
    }

    /// 將淨需求轉為計劃訂單
    ///
    /// 數量先依批量規則調整。調整後超過最大批量時拆分為
    /// 多張整批訂單加一張餘量訂單（餘量再套批量下限）。
    pub fn plan(item: &Item, net_qty: Decimal, due_date: NaiveDate) -> Result<Vec<PlannedOrder>> {
        if net_qty <= Decimal::ZERO {
            return Ok(Vec::new());
        }

        let start_date = Self::start_date(item, due_date)?;
        let source = Self::order_source(item);
        let adjusted = item.adjust_lot_quantity(net_qty);

        let mut orders = Vec::new();
        match item.max_lot_size {
            Some(max_lot) if max_lot > Decimal::ZERO && adjusted > max_lot => {
                let mut remaining = net_qty;
                while remaining > max_lot {
                    orders.push(PlannedOrder::new(
                        item.item_code.clone(),
                        max_lot,
                        start_date,
                        due_date,
                        source,
                    ));
                    remaining -= max_lot;
                }
                if remaining > Decimal::ZERO {
                    orders.push(PlannedOrder::new(
                        item.item_code.clone(),
                        item.adjust_lot_quantity(remaining),
                        start_date,
                        due_date,
                        source,
                    ));
                }
            }
            _ => {
                orders.push(PlannedOrder::new(
                    item.item_code.clone(),
                    adjusted,
                    start_date,
                    due_date,
                    source,
                ));
            }
        }

        Ok(orders)
    }
}
