//! 等级相关实体定义

use serde::{Deserialize, Serialize};

/// 积分等级
///
/// 从存储加载后只读，本服务从不修改等级表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    /// 等级标识（如 "A"、"gold"）
    pub tier_code: String,
    /// 展示名称
    pub display_name: String,
    /// 获得该等级所需的最低累计积分
    pub threshold_points: i64,
}

impl Tier {
    pub fn new(
        tier_code: impl Into<String>,
        display_name: impl Into<String>,
        threshold_points: i64,
    ) -> Self {
        Self {
            tier_code: tier_code.into(),
            display_name: display_name.into(),
            threshold_points,
        }
    }
}

/// 等级判定结果
///
/// 由 [`crate::engine::resolve`] 根据积分与等级表计算得出，不含任何副作用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierAssignment {
    /// 当前等级（积分低于最低门槛时为 None）
    pub current_tier: Option<Tier>,
    /// 下一等级（已达最高等级时为 None）
    pub next_tier: Option<Tier>,
    /// 从当前门槛到下一门槛的进度，取值 [0, 1]，保留两位小数
    pub progress_fraction: f64,
}
