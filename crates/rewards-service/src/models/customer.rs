//! 客户积分记录

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tier::TierAssignment;

/// 客户积分记录
///
/// 以 customer_id（邮箱）为主键，每次累计后整体重算并整条写回
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRewards {
    /// 客户标识（邮箱）
    pub customer_id: String,
    /// 累计积分，非负
    pub points: i64,
    /// 当前等级标识
    pub tier_code: Option<String>,
    /// 当前等级名称
    pub tier_name: Option<String>,
    /// 下一等级标识
    pub next_tier_code: Option<String>,
    /// 下一等级名称
    pub next_tier_name: Option<String>,
    /// 距下一等级的进度，[0, 1]
    pub progress_fraction: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CustomerRewards {
    /// 首次下单客户的零积分记录
    pub fn new(customer_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            customer_id: customer_id.into(),
            points: 0,
            tier_code: None,
            tier_name: None,
            next_tier_code: None,
            next_tier_name: None,
            progress_fraction: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    /// 用新积分与等级判定结果覆盖记录中的派生字段
    pub fn apply(&mut self, points: i64, assignment: &TierAssignment, now: DateTime<Utc>) {
        self.points = points;
        self.tier_code = assignment.current_tier.as_ref().map(|t| t.tier_code.clone());
        self.tier_name = assignment
            .current_tier
            .as_ref()
            .map(|t| t.display_name.clone());
        self.next_tier_code = assignment.next_tier.as_ref().map(|t| t.tier_code.clone());
        self.next_tier_name = assignment
            .next_tier
            .as_ref()
            .map(|t| t.display_name.clone());
        self.progress_fraction = assignment.progress_fraction;
        self.updated_at = now;
    }
}
