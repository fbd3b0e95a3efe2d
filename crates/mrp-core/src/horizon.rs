//! 計劃期間模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{MrpError, Result};

/// 計劃期間
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningHorizon {
    /// 期間起始日
    pub period_start: NaiveDate,

    /// 期間結束日（含）
    pub period_end: NaiveDate,
}

impl PlanningHorizon {
    /// 創建新的計劃期間
    ///
    /// 結束日早於起始日時回傳錯誤，計算開始前即拒絕。
    pub fn new(period_start: NaiveDate, period_end: NaiveDate) -> Result<Self> {
        if period_end < period_start {
            return Err(MrpError::InvalidHorizon {
                start: period_start,
                end: period_end,
            });
        }
        Ok(Self {
            period_start,
            period_end,
        })
    }

    /// 檢查日期是否落在期間內
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.period_start <= date && date <= self.period_end
    }

    /// 期間天數（含頭尾）
    pub fn days(&self) -> i64 {
        (self.period_end - self.period_start).num_days() + 1
    }
}
