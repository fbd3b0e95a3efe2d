//! 總需求模型

use std::collections::btree_map::{self, BTreeMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bom_core::ItemCode;

/// 總需求（展開後、扣庫存前）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrossRequirement {
    /// 品目代碼
    pub item_code: ItemCode,

    /// 需求數量
    pub quantity: Decimal,

    /// 最早需求日
    pub needed_by: NaiveDate,
}

/// 總需求彙總集合
///
/// 同品目的需求跨分支與跨訂單合計，需求日保留最早者。
/// 合併運算滿足交換律與結合律，可供並行歸併。
#[derive(Debug, Clone, Default)]
pub struct RequirementSet {
    requirements: BTreeMap<ItemCode, GrossRequirement>,
}

impl RequirementSet {
    /// 創建空的需求集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入需求（同品目合計、保留最早需求日）
    pub fn add(&mut self, item_code: ItemCode, quantity: Decimal, needed_by: NaiveDate) {
        match self.requirements.entry(item_code.clone()) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(GrossRequirement {
                    item_code,
                    quantity,
                    needed_by,
                });
            }
            btree_map::Entry::Occupied(mut entry) => {
                let requirement = entry.get_mut();
                requirement.quantity += quantity;
                if needed_by < requirement.needed_by {
                    requirement.needed_by = needed_by;
                }
            }
        }
    }

    /// 合併另一個需求集合
    pub fn merge(mut self, other: Self) -> Self {
        for (item_code, requirement) in other.requirements {
            self.add(item_code, requirement.quantity, requirement.needed_by);
        }
        self
    }

    /// 取得品目的需求
    pub fn get(&self, item_code: &ItemCode) -> Option<&GrossRequirement> {
        self.requirements.get(item_code)
    }

    /// 取得品目的需求數量（無需求時為零）
    pub fn quantity_of(&self, item_code: &ItemCode) -> Decimal {
        self.requirements
            .get(item_code)
            .map(|requirement| requirement.quantity)
            .unwrap_or(Decimal::ZERO)
    }

    /// 迭代所有需求（依品目代碼排序）
    pub fn iter(&self) -> impl Iterator<Item = &GrossRequirement> {
        self.requirements.values()
    }

    /// 需求品目數
    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    /// 檢查集合是否為空
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, day).unwrap()
    }

    #[test]
    fn test_add_sums_quantities() {
        let mut set = RequirementSet::new();
        set.add(ItemCode::new("MAT-001"), Decimal::from(6), date(20));
        set.add(ItemCode::new("MAT-001"), Decimal::from(4), date(25));

        let requirement = set.get(&ItemCode::new("MAT-001")).unwrap();
        assert_eq!(requirement.quantity, Decimal::from(10));
        // 需求日保留最早者
        assert_eq!(requirement.needed_by, date(20));
    }

    #[test]
    fn test_earlier_date_wins_regardless_of_order() {
        let mut set = RequirementSet::new();
        set.add(ItemCode::new("MAT-001"), Decimal::from(4), date(25));
        set.add(ItemCode::new("MAT-001"), Decimal::from(6), date(20));

        assert_eq!(
            set.get(&ItemCode::new("MAT-001")).unwrap().needed_by,
            date(20)
        );
    }

    #[test]
    fn test_merge_is_commutative() {
        let mut left = RequirementSet::new();
        left.add(ItemCode::new("MAT-001"), Decimal::from(6), date(20));
        left.add(ItemCode::new("PART-001"), Decimal::from(2), date(22));

        let mut right = RequirementSet::new();
        right.add(ItemCode::new("MAT-001"), Decimal::from(4), date(18));

        let ab = left.clone().merge(right.clone());
        let ba = right.merge(left);

        assert_eq!(
            ab.quantity_of(&ItemCode::new("MAT-001")),
            ba.quantity_of(&ItemCode::new("MAT-001"))
        );
        assert_eq!(
            ab.get(&ItemCode::new("MAT-001")).unwrap().needed_by,
            ba.get(&ItemCode::new("MAT-001")).unwrap().needed_by
        );
        assert_eq!(ab.len(), ba.len());
    }

    #[test]
    fn test_iteration_is_sorted_by_item_code() {
        let mut set = RequirementSet::new();
        set.add(ItemCode::new("PART-001"), Decimal::ONE, date(20));
        set.add(ItemCode::new("MAT-001"), Decimal::ONE, date(20));
        set.add(ItemCode::new("SEMI-A001"), Decimal::ONE, date(20));

        let codes: Vec<&str> = set.iter().map(|r| r.item_code.as_str()).collect();
        assert_eq!(codes, vec!["MAT-001", "PART-001", "SEMI-A001"]);
    }
}
