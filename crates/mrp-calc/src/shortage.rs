//! 安全庫存檢查

use chrono::NaiveDate;
use rust_decimal::Decimal;

use mrp_core::{ItemMaster, Result, ShortageItem, StockSnapshot};

use crate::offset::OffsetPlanner;

/// 庫存不足分類器
pub struct ShortageClassifier;

impl ShortageClassifier {
    /// 找出現有庫存低於安全庫存的品目
    ///
    /// 以庫存現狀單獨判定，與本輪需求及計劃涵蓋無關。
    /// 無庫存紀錄的品目視為庫存為零。
    pub fn classify(
        items: &ItemMaster,
        stock: &StockSnapshot,
        period_start: NaiveDate,
    ) -> Result<Vec<ShortageItem>> {
        let mut shortages = Vec::new();

        for item in items.iter() {
            if item.safety_stock <= Decimal::ZERO {
                continue;
            }

            let on_hand = stock.on_hand(&item.item_code);
            if on_hand < item.safety_stock {
                shortages.push(ShortageItem {
                    item_code: item.item_code.clone(),
                    shortage_quantity: item.safety_stock - on_hand,
                    recommended_order_date: OffsetPlanner::start_date(item, period_start)?,
                });
            }
        }

        shortages.sort_by(|a, b| a.item_code.cmp(&b.item_code));
        Ok(shortages)
    }
}
